//! Prediction tables, history windows and CSV export

use crate::data::DailySeries;
use crate::error::{ForecastError, Result};
use chrono::{NaiveDate, NaiveDateTime};
use log::info;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;
use std::fmt;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Format of timestamps in exported files
pub const EXPORT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Default name of the exported predictions file
pub const DEFAULT_EXPORT_FILE: &str = "stock_predictions.csv";

/// A predicted price for one future business day
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub timestamp: NaiveDateTime,
    pub predicted_stock_price: f64,
}

/// Predictions in timestamp order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PredictionTable {
    rows: Vec<Prediction>,
}

impl PredictionTable {
    /// Create a table from predictions
    pub fn new(rows: Vec<Prediction>) -> Self {
        Self { rows }
    }

    /// All predictions
    pub fn rows(&self) -> &[Prediction] {
        &self.rows
    }

    /// Predicted prices
    pub fn values(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.predicted_stock_price).collect()
    }

    /// Prediction timestamps
    pub fn timestamps(&self) -> Vec<NaiveDateTime> {
        self.rows.iter().map(|r| r.timestamp).collect()
    }

    /// Number of predictions
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether there are no predictions
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The table as a two-column DataFrame; `NaN` predictions become nulls
    pub fn to_dataframe(&self) -> Result<DataFrame> {
        let timestamps: Vec<String> = self
            .rows
            .iter()
            .map(|r| r.timestamp.format(EXPORT_TIMESTAMP_FORMAT).to_string())
            .collect();
        let prices: Vec<Option<f64>> = self
            .rows
            .iter()
            .map(|r| Some(r.predicted_stock_price).filter(|v| !v.is_nan()))
            .collect();

        let df = DataFrame::new(vec![
            Series::new("timestamp", timestamps),
            Series::new("predicted_stock_price", prices),
        ])?;
        Ok(df)
    }

    /// Write `timestamp,predicted_stock_price` CSV to a writer
    pub fn write_csv<W: Write>(&self, writer: &mut W) -> Result<()> {
        let mut df = self.to_dataframe()?;
        CsvWriter::new(writer).has_header(true).finish(&mut df)?;
        Ok(())
    }

    /// CSV as a string, for download buttons and previews
    pub fn to_csv_string(&self) -> Result<String> {
        let mut buffer = Vec::new();
        self.write_csv(&mut buffer)?;
        String::from_utf8(buffer)
            .map_err(|e| ForecastError::DataError(format!("Exported CSV is not UTF-8: {}", e)))
    }

    /// Write the CSV to a file
    pub fn export_csv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let mut file = File::create(path)?;
        self.write_csv(&mut file)?;
        info!("Exported {} predictions to {}", self.len(), path.display());
        Ok(())
    }

    /// Summary statistics of the predicted prices
    pub fn summary(&self) -> PredictionSummary {
        let values = self.values();
        PredictionSummary {
            count: values.len(),
            mean: values.iter().mean(),
            std_dev: values.iter().std_dev(),
            min: Statistics::min(values.iter()),
            max: Statistics::max(values.iter()),
        }
    }
}

impl fmt::Display for PredictionTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:<21} {:>22}", "timestamp", "predicted_stock_price")?;
        for row in &self.rows {
            writeln!(
                f,
                "{:<21} {:>22.4}",
                row.timestamp.format(EXPORT_TIMESTAMP_FORMAT).to_string(),
                row.predicted_stock_price
            )?;
        }
        Ok(())
    }
}

/// Descriptive statistics of a prediction run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PredictionSummary {
    pub count: usize,
    pub mean: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
}

/// Recent daily prices shown next to the predictions
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistoryWindow {
    points: Vec<(NaiveDate, f64)>,
}

impl HistoryWindow {
    /// Days of history shown by default
    pub const DEFAULT_DAYS: usize = 50;

    /// The last `days` daily prices of a series
    pub fn from_series(series: &DailySeries, days: usize) -> Self {
        Self {
            points: series
                .tail(days)
                .iter()
                .map(|r| (r.date, r.stock_price))
                .collect(),
        }
    }

    /// Date and price pairs, oldest first
    pub fn points(&self) -> &[(NaiveDate, f64)] {
        &self.points
    }

    /// Number of days
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the window is empty
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
