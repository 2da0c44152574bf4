//! Ordinary least squares regression on the diabetes dataset.
//!
//! [`LinearRegression`] fits coefficients and an intercept; [`metrics`] scores the
//! predictions. [`Dataset`] and [`plot`] carry the data in and the picture out.

pub mod dataset;
pub mod error;
pub mod linear_regression;
pub mod metrics;
pub mod plot;

pub use dataset::Dataset;
pub use error::{RegressionError, Result};
pub use linear_regression::LinearRegression;
pub use metrics::{mean_squared_error, r2_score, r_squared};
