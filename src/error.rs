use thiserror::Error;

pub type Result<T> = std::result::Result<T, RegressionError>;

#[derive(Debug, Error)]
pub enum RegressionError {
    #[error("dimension mismatch in {context}: expected {expected}, got {actual}")]
    DimensionMismatch {
        context: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("ill-conditioned input: design matrix has rank {rank}, need {required}")]
    IllConditionedInput { rank: usize, required: usize },
    #[error("{context}: {value} is out of range, limit {limit}")]
    OutOfRange {
        context: &'static str,
        value: usize,
        limit: usize,
    },
    #[error("non-finite value in {context} at row {row}, column {column}")]
    NonFinite {
        context: &'static str,
        row: usize,
        column: usize,
    },
    #[error("empty input: {0}")]
    EmptyInput(&'static str),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("cannot parse {value:?} at row {row}, column {column}")]
    Parse {
        row: usize,
        column: usize,
        value: String,
    },
    #[error("plot error: {0}")]
    Plot(String),
}

impl RegressionError {
    pub fn mismatch(context: &'static str, expected: usize, actual: usize) -> Self {
        RegressionError::DimensionMismatch {
            context,
            expected,
            actual,
        }
    }

    /// Fails with [`RegressionError::DimensionMismatch`] unless `expected == actual`.
    pub fn check(context: &'static str, expected: usize, actual: usize) -> Result<()> {
        if expected == actual {
            Ok(())
        } else {
            Err(Self::mismatch(context, expected, actual))
        }
    }
}
