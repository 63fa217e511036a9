//! Error types for the stock_forecast crate

use polars::prelude::PolarsError;
use thiserror::Error;

/// Custom error types for the stock_forecast crate
#[derive(Debug, Error)]
pub enum ForecastError {
    /// The market-data provider had no result for the requested symbol
    #[error("Data unavailable: {0}")]
    DataUnavailable(String),

    /// The forecasting model failed to fit or predict
    #[error("Forecasting error: {0}")]
    ForecastingError(String),

    /// Input rejected before any external call was made
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Error related to parameter validation
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Error while rendering a chart
    #[error("Chart error: {0}")]
    ChartError(String),

    /// Error from IO operations
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error from Polars operations
    #[error("Polars error: {0}")]
    PolarsError(String),
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, ForecastError>;

impl From<PolarsError> for ForecastError {
    fn from(err: PolarsError) -> Self {
        ForecastError::PolarsError(err.to_string())
    }
}

impl From<stock_data::DataError> for ForecastError {
    fn from(err: stock_data::DataError) -> Self {
        // Every acquisition failure is terminal and user-visible as
        // "data unavailable"; the message keeps the underlying cause.
        ForecastError::DataUnavailable(err.to_string())
    }
}
