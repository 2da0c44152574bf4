use csv::{ReaderBuilder, Trim};
use log::{debug, info};
use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::error::{RegressionError, Result};

/// Index of the body mass index column in the diabetes table.
pub const BMI_FEATURE_INDEX: usize = 2;

/// Tabular regression data: one row of features per sample plus a target value.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    feature_names: Vec<String>,
    features: Array2<f64>,
    targets: Array1<f64>,
}

impl Dataset {
    pub fn new(
        feature_names: Vec<String>,
        features: Array2<f64>,
        targets: Array1<f64>,
    ) -> Result<Self> {
        RegressionError::check("dataset: feature names", features.ncols(), feature_names.len())?;
        RegressionError::check("dataset: samples vs targets", features.nrows(), targets.len())?;

        Ok(Self {
            feature_names,
            features,
            targets,
        })
    }

    /// Reads the tab-separated diabetes table: a header row followed by one row per
    /// patient, the last column holding the disease progression score.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let dataset = Self::from_reader(BufReader::new(file), b'\t')?;

        info!(
            "loaded {} samples with {} features from {}",
            dataset.n_samples(),
            dataset.n_features(),
            path.display()
        );

        Ok(dataset)
    }

    /// Reads a delimited table with a header row; every column but the last is a feature.
    pub fn from_reader<R: Read>(reader: R, delimiter: u8) -> Result<Self> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .delimiter(delimiter)
            .trim(Trim::All)
            .flexible(true)
            .from_reader(reader);

        let headers = reader.headers()?.clone();
        if headers.len() < 2 {
            return Err(RegressionError::EmptyInput(
                "dataset: need at least one feature column and a target column",
            ));
        }

        const TARGET_COLUMNS: usize = 1;
        let features_count = headers.len() - TARGET_COLUMNS;
        let feature_names = headers
            .iter()
            .take(features_count)
            .map(str::to_owned)
            .collect();

        let mut values = Vec::new();
        let mut targets = Vec::new();

        for (row, result) in reader.records().enumerate() {
            let record = result?;
            RegressionError::check("dataset: row width", headers.len(), record.len())?;

            for (column, field) in record.iter().enumerate() {
                let value = field.parse::<f64>().map_err(|_| RegressionError::Parse {
                    // 1-based, header excluded
                    row: row + 1,
                    column,
                    value: field.to_owned(),
                })?;
                if !value.is_finite() {
                    return Err(RegressionError::NonFinite {
                        context: "dataset",
                        row: row + 1,
                        column,
                    });
                }

                if column < features_count {
                    values.push(value);
                } else {
                    targets.push(value);
                }
            }
        }

        let samples_count = targets.len();
        let values_count = values.len();
        let features = Array2::from_shape_vec((samples_count, features_count), values)
            .map_err(|_| {
                RegressionError::mismatch(
                    "dataset: values",
                    samples_count * features_count,
                    values_count,
                )
            })?;

        debug!("parsed {samples_count} rows of {features_count} features");

        Self::new(feature_names, features, Array1::from(targets))
    }

    /// Centers every feature column and scales it to unit L2 norm, i.e. divides by
    /// `std * sqrt(n_samples)`. Constant columns become zeros.
    pub fn scaled(&self) -> Self {
        let mut features = self.features.clone();

        for mut column in features.axis_iter_mut(Axis(1)) {
            let mean = column.mean().unwrap_or(0.0);
            column.mapv_inplace(|value| value - mean);

            let norm = column.dot(&column).sqrt();
            if norm > 0.0 {
                column.mapv_inplace(|value| value / norm);
            }
        }

        Self {
            feature_names: self.feature_names.clone(),
            features,
            targets: self.targets.clone(),
        }
    }

    /// Keeps only the given feature columns, in the given order.
    pub fn select_features(&self, indices: &[usize]) -> Result<Self> {
        if let Some(&index) = indices.iter().find(|&&index| index >= self.n_features()) {
            return Err(RegressionError::OutOfRange {
                context: "select_features: feature index must be below the feature count",
                value: index,
                limit: self.n_features(),
            });
        }

        Ok(Self {
            feature_names: indices
                .iter()
                .map(|&index| self.feature_names[index].clone())
                .collect(),
            features: self.features.select(Axis(1), indices),
            targets: self.targets.clone(),
        })
    }

    /// Splits off the last `test_size` samples as the test set: `(train, test)`.
    pub fn split_tail(&self, test_size: usize) -> Result<(Self, Self)> {
        if test_size > self.n_samples() {
            return Err(RegressionError::OutOfRange {
                context: "split_tail: test size must not exceed the sample count",
                value: test_size,
                limit: self.n_samples(),
            });
        }

        let train_size = self.n_samples() - test_size;
        let (train_features, test_features) = self.features.view().split_at(Axis(0), train_size);
        let (train_targets, test_targets) = self.targets.view().split_at(Axis(0), train_size);

        let part = |features: ArrayView2<f64>, targets: ArrayView1<f64>| Self {
            feature_names: self.feature_names.clone(),
            features: features.to_owned(),
            targets: targets.to_owned(),
        };

        Ok((
            part(train_features, train_targets),
            part(test_features, test_targets),
        ))
    }

    pub fn features(&self) -> ArrayView2<'_, f64> {
        self.features.view()
    }

    pub fn targets(&self) -> ArrayView1<'_, f64> {
        self.targets.view()
    }

    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    pub fn n_samples(&self) -> usize {
        self.targets.len()
    }

    pub fn n_features(&self) -> usize {
        self.features.ncols()
    }
}
