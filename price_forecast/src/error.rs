//! Error types for the price_forecast crate

use thiserror::Error;

/// Custom error types for the price_forecast crate
#[derive(Debug, Error)]
pub enum ForecastError {
    /// Error related to data validation or processing
    #[error("Data error: {0}")]
    DataError(String),

    /// A required input column is absent
    #[error("Missing column: '{0}'")]
    MissingColumn(String),

    /// The target price column did not survive daily aggregation.
    /// This halts the run before anything is simulated or predicted.
    #[error("Target feature '{0}' not found in dataset. Please check your data.")]
    MissingTarget(String),

    /// The dataset holds no rows
    #[error("Dataset is empty")]
    EmptyDataset,

    /// A timestamp cell could not be parsed
    #[error("Cannot parse timestamp '{value}' on row {row}")]
    TimestampParse { row: usize, value: String },

    /// Feature matrix does not match what the model was trained on
    #[error("Feature mismatch: model expects {expected}, got {found}")]
    FeatureMismatch { expected: String, found: String },

    /// Error from invalid parameters
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Malformed or misbehaving model artifact
    #[error("Model error: {0}")]
    ModelError(String),

    /// Error from IO operations
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error from Polars operations
    #[error("Polars error: {0}")]
    PolarsError(String),

    /// Error from CSV writing
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    /// Error from JSON (de)serialization
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// Error from the numeric kernels
    #[error("Math error: {0}")]
    MathError(#[from] outlook_math::MathError),
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, ForecastError>;

impl From<polars::prelude::PolarsError> for ForecastError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        ForecastError::PolarsError(err.to_string())
    }
}
