//! Model inputs: the six covariates and the matrix handed to a model

use serde::{Deserialize, Serialize};

/// Timestamp column of the raw dataset
pub const TIMESTAMP_COLUMN: &str = "timestamp";

/// Timestamp format of the raw dataset
pub const TIMESTAMP_FORMAT: &str = "%d-%m-%Y %H:%M";

/// Price column the model was trained to predict
pub const TARGET_COLUMN: &str = "stock_price";

/// Feature columns, in the order the model was trained on
pub const FEATURE_COLUMNS: [&str; 6] = [
    "nasdaq_index",
    "sp500_index",
    "inflation_rate",
    "unemployment_rate",
    "interest_rate",
    "market_sentiment",
];

/// Number of model inputs
pub const FEATURE_COUNT: usize = FEATURE_COLUMNS.len();

/// One set of covariates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureRow {
    pub nasdaq_index: f64,
    pub sp500_index: f64,
    pub inflation_rate: f64,
    pub unemployment_rate: f64,
    pub interest_rate: f64,
    pub market_sentiment: f64,
}

impl FeatureRow {
    /// Build a row from values in `FEATURE_COLUMNS` order
    pub fn from_array(values: [f64; FEATURE_COUNT]) -> Self {
        Self {
            nasdaq_index: values[0],
            sp500_index: values[1],
            inflation_rate: values[2],
            unemployment_rate: values[3],
            interest_rate: values[4],
            market_sentiment: values[5],
        }
    }

    /// Values in `FEATURE_COLUMNS` order
    pub fn to_array(&self) -> [f64; FEATURE_COUNT] {
        [
            self.nasdaq_index,
            self.sp500_index,
            self.inflation_rate,
            self.unemployment_rate,
            self.interest_rate,
            self.market_sentiment,
        ]
    }

    /// Whether any covariate is missing
    pub fn has_nan(&self) -> bool {
        self.to_array().iter().any(|v| v.is_nan())
    }
}

/// Row-major numeric input for a regression model
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureMatrix {
    columns: Vec<String>,
    rows: Vec<Vec<f64>>,
}

impl FeatureMatrix {
    /// Create a matrix with explicit column names.
    ///
    /// Rows shorter or longer than `columns` are kept as-is; a model will
    /// reject them at prediction time.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<f64>>) -> Self {
        Self { columns, rows }
    }

    /// Matrix in the standard training column order
    pub fn from_feature_rows(rows: &[FeatureRow]) -> Self {
        Self {
            columns: FEATURE_COLUMNS.iter().map(|c| c.to_string()).collect(),
            rows: rows.iter().map(|r| r.to_array().to_vec()).collect(),
        }
    }

    /// Column names
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Rows
    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the matrix has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_array_order_matches_columns() {
        let row = FeatureRow::from_array([1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_eq!(row.sp500_index, 2.0);
        assert_eq!(row.market_sentiment, 6.0);
        assert_eq!(row.to_array(), [1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    }

    #[test]
    fn test_matrix_from_rows() {
        let rows = vec![FeatureRow::from_array([1.0; 6]); 3];
        let matrix = FeatureMatrix::from_feature_rows(&rows);
        assert_eq!(matrix.len(), 3);
        assert_eq!(matrix.width(), FEATURE_COUNT);
        assert_eq!(matrix.columns()[0], "nasdaq_index");
        assert_eq!(matrix.columns()[5], "market_sentiment");
    }
}
