//! Regression metrics.

use ndarray::{ArrayView1, ArrayView2, Zip};

use crate::error::{RegressionError, Result};
use crate::linear_regression::LinearRegression;

/// Mean squared error: mean((true - pred)²)
pub fn mean_squared_error(y_true: ArrayView1<f64>, y_pred: ArrayView1<f64>) -> Result<f64> {
    RegressionError::check("mean_squared_error", y_true.len(), y_pred.len())?;
    if y_true.is_empty() {
        return Err(RegressionError::EmptyInput("mean_squared_error: no samples"));
    }

    Ok(sum_squared_residuals(y_true, y_pred) / y_true.len() as f64)
}

/// R² = 1 - SS_res / SS_tot on precomputed predictions.
///
/// A target without variance leaves SS_tot at zero; the result is then `f64::NAN`
/// instead of an infinity or a division error.
pub fn r2_score(y_true: ArrayView1<f64>, y_pred: ArrayView1<f64>) -> Result<f64> {
    RegressionError::check("r2_score", y_true.len(), y_pred.len())?;
    let mean = y_true
        .mean()
        .ok_or(RegressionError::EmptyInput("r2_score: no samples"))?;

    let total_sum_of_squares = y_true.fold(0.0, |acc, &value| acc + (value - mean).powi(2));
    #[allow(clippy::float_cmp)]
    if total_sum_of_squares == 0.0 {
        return Ok(f64::NAN);
    }

    Ok(1.0 - sum_squared_residuals(y_true, y_pred) / total_sum_of_squares)
}

/// R² of `model` on `(features, y_true)`.
pub fn r_squared(
    model: &LinearRegression,
    features: ArrayView2<f64>,
    y_true: ArrayView1<f64>,
) -> Result<f64> {
    RegressionError::check("r_squared: samples vs targets", features.nrows(), y_true.len())?;
    let predictions = model.predict(features)?;

    r2_score(y_true, predictions.view())
}

fn sum_squared_residuals(y_true: ArrayView1<f64>, y_pred: ArrayView1<f64>) -> f64 {
    Zip::from(&y_true)
        .and(&y_pred)
        .fold(0.0, |acc, &truth, &prediction| acc + (truth - prediction).powi(2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::{array, Array1};

    #[test]
    fn mse_of_identical_sequences_is_zero() {
        let y = array![3.5, -1.0, 0.0, 12.25];
        assert_eq!(mean_squared_error(y.view(), y.view()).unwrap(), 0.0);
    }

    #[test]
    fn mse_known_value() {
        let y_true = array![1.0, 2.0, 3.0, 4.0];
        let y_pred = array![1.0, 3.0, 1.0, 4.0];
        // (0 + 1 + 4 + 0) / 4
        assert_relative_eq!(
            mean_squared_error(y_true.view(), y_pred.view()).unwrap(),
            1.25
        );
    }

    #[test]
    fn mse_rejects_length_mismatch() {
        let y_true = array![1.0, 2.0, 3.0];
        let y_pred = array![1.0, 2.0];
        let error = mean_squared_error(y_true.view(), y_pred.view()).unwrap_err();
        assert!(matches!(error, RegressionError::DimensionMismatch { .. }));
    }

    #[test]
    fn mse_rejects_empty_input() {
        let empty = Array1::<f64>::zeros(0);
        let error = mean_squared_error(empty.view(), empty.view()).unwrap_err();
        assert!(matches!(error, RegressionError::EmptyInput(_)));
    }

    #[test]
    fn r2_known_value() {
        let y_true = array![3.0, -0.5, 2.0, 7.0];
        let y_pred = array![2.5, 0.0, 2.0, 8.0];
        assert_relative_eq!(
            r2_score(y_true.view(), y_pred.view()).unwrap(),
            0.948_608_137_044_967_9,
            epsilon = 1e-12
        );
    }

    #[test]
    fn r2_of_mean_prediction_is_zero() {
        let y_true = array![1.0, 2.0, 3.0];
        let y_pred = array![2.0, 2.0, 2.0];
        assert_relative_eq!(r2_score(y_true.view(), y_pred.view()).unwrap(), 0.0);
    }

    #[test]
    fn r2_can_be_negative_but_not_above_one() {
        let y_true = array![1.0, 2.0, 3.0, 4.0];
        for y_pred in [
            array![4.0, 3.0, 2.0, 1.0],
            array![1.1, 1.9, 3.2, 3.9],
            array![1.0, 2.0, 3.0, 4.0],
        ] {
            let score = r2_score(y_true.view(), y_pred.view()).unwrap();
            assert!(score <= 1.0);
        }
        let reversed = array![4.0, 3.0, 2.0, 1.0];
        assert!(r2_score(y_true.view(), reversed.view()).unwrap() < 0.0);
    }

    #[test]
    fn r2_of_constant_target_is_nan() {
        let y_true = array![5.0, 5.0, 5.0];
        let y_pred = array![4.0, 5.0, 6.0];
        assert!(r2_score(y_true.view(), y_pred.view()).unwrap().is_nan());
    }

    #[test]
    fn r_squared_uses_model_predictions() {
        let features = array![[0.0], [1.0], [2.0], [3.0], [4.0]];
        let targets = array![0.1, 0.9, 2.2, 2.8, 4.1];
        let model = LinearRegression::fit(features.view(), targets.view()).unwrap();

        let predictions = model.predict(features.view()).unwrap();
        let expected = r2_score(targets.view(), predictions.view()).unwrap();
        let actual = r_squared(&model, features.view(), targets.view()).unwrap();

        assert_relative_eq!(actual, expected);
        assert!(actual <= 1.0);
    }

    #[test]
    fn r_squared_of_constant_target_is_nan() {
        let features = array![[0.0], [1.0], [2.0]];
        let targets = array![1.0, 2.0, 3.0];
        let model = LinearRegression::fit(features.view(), targets.view()).unwrap();

        let constant = array![2.0, 2.0, 2.0];
        assert!(r_squared(&model, features.view(), constant.view())
            .unwrap()
            .is_nan());
    }

    #[test]
    fn r_squared_rejects_mismatched_targets() {
        let features = array![[0.0], [1.0], [2.0]];
        let targets = array![1.0, 2.0, 3.0];
        let model = LinearRegression::fit(features.view(), targets.view()).unwrap();

        let short = array![1.0, 2.0];
        let error = r_squared(&model, features.view(), short.view()).unwrap_err();
        assert!(matches!(error, RegressionError::DimensionMismatch { .. }));
    }
}
