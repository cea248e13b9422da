//! Run configuration

use crate::error::{ForecastError, Result};
use crate::report::{HistoryWindow, DEFAULT_EXPORT_FILE};
use crate::simulation::{FeatureSimulator, Horizon};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Where to read inputs, where to write predictions and how far to look
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutlookConfig {
    /// Timestamped observations
    pub data_path: PathBuf,
    /// Model artifact
    pub model_path: PathBuf,
    /// Business days to predict
    pub horizon: Horizon,
    /// Trailing days used for index growth
    pub trend_window: usize,
    /// Days of history to chart
    pub history_window: usize,
    /// Destination of the predictions CSV
    pub export_path: PathBuf,
}

impl Default for OutlookConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("data/stock_prices.csv"),
            model_path: PathBuf::from("data/model.json"),
            horizon: Horizon::default(),
            trend_window: FeatureSimulator::DEFAULT_TREND_WINDOW,
            history_window: HistoryWindow::DEFAULT_DAYS,
            export_path: PathBuf::from(DEFAULT_EXPORT_FILE),
        }
    }
}

impl OutlookConfig {
    /// Read a JSON config file; absent keys take their defaults
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: OutlookConfig = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Check window sizes
    pub fn validate(&self) -> Result<()> {
        if self.trend_window == 0 {
            return Err(ForecastError::InvalidParameter(
                "trend_window must be positive".to_string(),
            ));
        }
        if self.history_window == 0 {
            return Err(ForecastError::InvalidParameter(
                "history_window must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
