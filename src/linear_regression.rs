use log::debug;
use nalgebra::{DMatrix, DVector};
use ndarray::{Array1, ArrayView1, ArrayView2};

use crate::error::{RegressionError, Result};
use crate::metrics;

/// Ordinary least squares model with an intercept term.
///
/// Only produced by [`LinearRegression::fit`] and read-only afterwards, so several
/// independently fitted models can be kept side by side.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearRegression {
    coefficients: Array1<f64>,
    intercept: f64,
}

impl LinearRegression {
    /// Fits `targets ≈ features · β + β₀` by minimizing the sum of squared residuals.
    ///
    /// The design matrix is augmented with a column of ones, every column is scaled to
    /// unit norm and the system is solved through an SVD; the scaling is undone on the
    /// weights afterwards. A design that does not have full column rank (constant or
    /// collinear features, or no more samples than features) is rejected with
    /// [`RegressionError::IllConditionedInput`], and NaN or infinite inputs with
    /// [`RegressionError::NonFinite`].
    pub fn fit(features: ArrayView2<f64>, targets: ArrayView1<f64>) -> Result<Self> {
        let (samples_count, features_count) = features.dim();
        RegressionError::check("fit: samples vs targets", samples_count, targets.len())?;
        if samples_count == 0 {
            return Err(RegressionError::EmptyInput("fit: no samples"));
        }
        if features_count == 0 {
            return Err(RegressionError::EmptyInput("fit: no features"));
        }

        if let Some(((row, column), _)) = features
            .indexed_iter()
            .find(|(_, value)| !value.is_finite())
        {
            return Err(RegressionError::NonFinite {
                context: "fit: features",
                row,
                column,
            });
        }
        if let Some((row, _)) = targets.indexed_iter().find(|(_, value)| !value.is_finite()) {
            return Err(RegressionError::NonFinite {
                context: "fit: targets",
                row,
                column: 0,
            });
        }

        // [1 | X]
        let columns_count = features_count + 1;
        let mut design = DMatrix::from_element(samples_count, columns_count, 1.0);
        for ((i, j), &value) in features.indexed_iter() {
            design[(i, j + 1)] = value;
        }

        // unit-norm columns, so the rank test does not depend on feature units
        let mut column_norms = Vec::with_capacity(columns_count);
        for mut column in design.column_iter_mut() {
            let norm = column.norm();
            if norm > 0.0 {
                column.unscale_mut(norm);
            }
            column_norms.push(if norm > 0.0 { norm } else { 1.0 });
        }

        let label_vector = DVector::from_iterator(samples_count, targets.iter().copied());

        let svd = design.svd(true, true);
        let largest_singular_value = svd.singular_values.max();
        let tolerance =
            largest_singular_value * samples_count.max(columns_count) as f64 * f64::EPSILON;

        let rank = svd.rank(tolerance);
        if rank < columns_count {
            return Err(RegressionError::IllConditionedInput {
                rank,
                required: columns_count,
            });
        }

        let weights = svd
            .solve(&label_vector, tolerance)
            .map_err(|_| RegressionError::IllConditionedInput {
                rank,
                required: columns_count,
            })?;

        let intercept = weights[0] / column_norms[0];
        let coefficients: Array1<f64> = weights
            .iter()
            .zip(&column_norms)
            .skip(1)
            .map(|(&weight, &norm)| weight / norm)
            .collect();

        debug!(
            "fitted {features_count} features on {samples_count} samples, \
             singular values in [{:.6e}, {largest_singular_value:.6e}], intercept {intercept:.6}",
            svd.singular_values.min(),
        );

        Ok(Self {
            coefficients,
            intercept,
        })
    }

    /// ŷᵢ = β·xᵢ + β₀ for every row of `features`.
    pub fn predict(&self, features: ArrayView2<f64>) -> Result<Array1<f64>> {
        RegressionError::check("predict: feature count", self.n_features(), features.ncols())?;

        Ok(features.dot(&self.coefficients) + self.intercept)
    }

    /// Coefficient of determination of this model on `(features, targets)`.
    ///
    /// NaN when `targets` has zero variance.
    pub fn score(&self, features: ArrayView2<f64>, targets: ArrayView1<f64>) -> Result<f64> {
        metrics::r_squared(self, features, targets)
    }

    pub fn coefficients(&self) -> ArrayView1<'_, f64> {
        self.coefficients.view()
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    pub fn n_features(&self) -> usize {
        self.coefficients.len()
    }
}
