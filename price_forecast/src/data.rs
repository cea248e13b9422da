//! Price history loading and daily aggregation

use crate::error::{ForecastError, Result};
use crate::features::{
    FeatureRow, FEATURE_COLUMNS, FEATURE_COUNT, TARGET_COLUMN, TIMESTAMP_COLUMN, TIMESTAMP_FORMAT,
};
use chrono::{NaiveDate, NaiveDateTime};
use log::{debug, info};
use outlook_math::{nan_mean, tail};
use polars::prelude::*;
use std::collections::BTreeMap;
use std::fs::File;
use std::path::Path;

/// Raw observations with parsed timestamps
#[derive(Debug, Clone)]
pub struct PriceHistory {
    /// Data frame as read from the source
    df: DataFrame,
    /// Parsed timestamp of every row
    timestamps: Vec<NaiveDateTime>,
    /// Numeric columns in source order, nulls as NaN
    columns: Vec<(String, Vec<f64>)>,
}

/// Data loader for timestamped price observations
#[derive(Debug)]
pub struct DataLoader;

impl DataLoader {
    /// Load observations from a CSV file
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<PriceHistory> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let df = CsvReader::new(file)
            .infer_schema(None)
            .has_header(true)
            .finish()?;

        let history = Self::from_dataframe(df)?;
        info!(
            "Loaded {} observations from {}",
            history.len(),
            path.display()
        );
        Ok(history)
    }

    /// Build observations from an existing DataFrame
    pub fn from_dataframe(df: DataFrame) -> Result<PriceHistory> {
        if df.height() == 0 {
            return Err(ForecastError::EmptyDataset);
        }

        let timestamps = Self::parse_timestamps(&df)?;
        let columns = Self::numeric_columns(&df)?;

        Ok(PriceHistory {
            df,
            timestamps,
            columns,
        })
    }

    fn parse_timestamps(df: &DataFrame) -> Result<Vec<NaiveDateTime>> {
        let column = df
            .column(TIMESTAMP_COLUMN)
            .map_err(|_| ForecastError::MissingColumn(TIMESTAMP_COLUMN.to_string()))?;

        let text = column.utf8().map_err(|_| {
            ForecastError::DataError(format!(
                "Column '{}' must hold text in the form {}",
                TIMESTAMP_COLUMN, TIMESTAMP_FORMAT
            ))
        })?;

        text.into_iter()
            .enumerate()
            .map(|(row, cell)| {
                let value = cell.unwrap_or_default();
                NaiveDateTime::parse_from_str(value.trim(), TIMESTAMP_FORMAT).map_err(|_| {
                    ForecastError::TimestampParse {
                        row,
                        value: value.to_string(),
                    }
                })
            })
            .collect()
    }

    /// Every numeric column except the timestamp, cast to f64
    fn numeric_columns(df: &DataFrame) -> Result<Vec<(String, Vec<f64>)>> {
        let mut columns = Vec::new();

        for series in df.get_columns() {
            if series.name() == TIMESTAMP_COLUMN || !series.dtype().is_numeric() {
                continue;
            }

            let cast = series.cast(&DataType::Float64)?;
            let values: Vec<f64> = cast
                .f64()?
                .into_iter()
                .map(|v| v.unwrap_or(f64::NAN))
                .collect();
            columns.push((series.name().to_string(), values));
        }

        Ok(columns)
    }
}

impl PriceHistory {
    /// First `rows` rows of the source, for display
    pub fn preview(&self, rows: usize) -> DataFrame {
        self.df.head(Some(rows))
    }

    /// Parsed timestamps in source order
    pub fn timestamps(&self) -> &[NaiveDateTime] {
        &self.timestamps
    }

    /// Latest timestamp in the dataset
    pub fn last_timestamp(&self) -> Option<NaiveDateTime> {
        self.timestamps.iter().max().copied()
    }

    /// Names of the numeric columns
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|(name, _)| name.as_str()).collect()
    }

    /// Values of a numeric column
    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, values)| values.as_slice())
    }

    /// Check if the history is empty
    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// Number of observations
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    /// Collapse observations to one row per calendar date.
    ///
    /// Every numeric column becomes the mean of that date's non-NaN values.
    pub fn aggregate_daily(&self) -> Result<DailyFrame> {
        let mut groups: BTreeMap<NaiveDate, Vec<usize>> = BTreeMap::new();
        for (row, timestamp) in self.timestamps.iter().enumerate() {
            groups.entry(timestamp.date()).or_default().push(row);
        }

        let dates: Vec<NaiveDate> = groups.keys().copied().collect();
        let columns = self
            .columns
            .iter()
            .map(|(name, values)| {
                let means = groups
                    .values()
                    .map(|rows| {
                        let day: Vec<f64> = rows.iter().map(|&r| values[r]).collect();
                        nan_mean(&day)
                    })
                    .collect();
                (name.clone(), means)
            })
            .collect();

        debug!(
            "Aggregated {} observations into {} days",
            self.len(),
            dates.len()
        );

        Ok(DailyFrame { dates, columns })
    }
}

/// Daily means of every numeric column, before the target check
#[derive(Debug, Clone)]
pub struct DailyFrame {
    dates: Vec<NaiveDate>,
    columns: Vec<(String, Vec<f64>)>,
}

impl DailyFrame {
    /// Calendar dates, ascending
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Daily means of a column
    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, values)| values.as_slice())
    }

    /// Whether a column survived aggregation
    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    /// Number of days
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Whether there are no days
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Type the frame into the price and the six model features.
    ///
    /// Fails with `MissingTarget` when the price column is gone; this is
    /// the point where a run halts without producing anything.
    pub fn into_series(self) -> Result<DailySeries> {
        let prices = self
            .column(TARGET_COLUMN)
            .ok_or_else(|| ForecastError::MissingTarget(TARGET_COLUMN.to_string()))?;

        let mut features: Vec<&[f64]> = Vec::with_capacity(FEATURE_COUNT);
        for name in FEATURE_COLUMNS {
            let column = self
                .column(name)
                .ok_or_else(|| ForecastError::MissingColumn(name.to_string()))?;
            features.push(column);
        }

        let rows = self
            .dates
            .iter()
            .enumerate()
            .map(|(i, &date)| {
                let mut values = [0.0; FEATURE_COUNT];
                for (slot, column) in values.iter_mut().zip(&features) {
                    *slot = column[i];
                }
                DailyAggregate {
                    date,
                    stock_price: prices[i],
                    features: FeatureRow::from_array(values),
                }
            })
            .collect();

        Ok(DailySeries { rows })
    }
}

/// One calendar day of averaged observations
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailyAggregate {
    pub date: NaiveDate,
    pub stock_price: f64,
    pub features: FeatureRow,
}

/// Daily aggregates ordered by date
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DailySeries {
    rows: Vec<DailyAggregate>,
}

impl DailySeries {
    /// Create a series from rows; they are sorted by date
    pub fn new(mut rows: Vec<DailyAggregate>) -> Self {
        rows.sort_by_key(|r| r.date);
        Self { rows }
    }

    /// All rows
    pub fn rows(&self) -> &[DailyAggregate] {
        &self.rows
    }

    /// Most recent day
    pub fn last(&self) -> Option<&DailyAggregate> {
        self.rows.last()
    }

    /// The last `n` days
    pub fn tail(&self, n: usize) -> &[DailyAggregate] {
        tail(&self.rows, n)
    }

    /// Dates, ascending
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.rows.iter().map(|r| r.date).collect()
    }

    /// Daily mean prices
    pub fn prices(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.stock_price).collect()
    }

    /// Daily means of one feature, by column name
    pub fn feature_column(&self, name: &str) -> Option<Vec<f64>> {
        let index = FEATURE_COLUMNS.iter().position(|c| *c == name)?;
        Some(
            self.rows
                .iter()
                .map(|r| r.features.to_array()[index])
                .collect(),
        )
    }

    /// Number of days
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether there are no days
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
