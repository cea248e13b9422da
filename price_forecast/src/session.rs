//! Load-once forecasting session
//!
//! The dataset, its daily aggregate and the model are loaded a single time
//! and shared by reference with every run; a run only re-simulates and
//! re-predicts for the requested horizon.

use crate::config::OutlookConfig;
use crate::data::{DailySeries, DataLoader, PriceHistory};
use crate::error::{ForecastError, Result};
use crate::models::{load_model, RegressionModel};
use crate::predictor::predict;
use crate::report::{HistoryWindow, PredictionTable};
use crate::simulation::{FeatureSimulator, Horizon, Projection};
use chrono::NaiveDateTime;
use log::info;
use std::path::Path;

/// Output of one run
#[derive(Debug, Clone)]
pub struct ForecastReport {
    pub horizon: Horizon,
    pub projection: Projection,
    pub predictions: PredictionTable,
    pub history: HistoryWindow,
}

/// Dataset and model held for the lifetime of the process
#[derive(Debug)]
pub struct ForecastSession {
    history: PriceHistory,
    daily: DailySeries,
    last_timestamp: NaiveDateTime,
    model: Box<dyn RegressionModel>,
    trend_window: usize,
    history_window: usize,
}

impl ForecastSession {
    /// Load the dataset and model named by `config`
    pub fn open(config: &OutlookConfig) -> Result<Self> {
        config.validate()?;
        let history = DataLoader::from_csv(&config.data_path)?;
        let model = load_model(&config.model_path)?;
        Self::from_parts(history, model)?
            .with_windows(config.trend_window, config.history_window)
    }

    /// Load from explicit paths with default windows
    pub fn from_paths<P: AsRef<Path>, Q: AsRef<Path>>(data: P, model: Q) -> Result<Self> {
        let history = DataLoader::from_csv(data)?;
        let model = load_model(model)?;
        Self::from_parts(history, model)
    }

    /// Build a session from already loaded pieces.
    ///
    /// Aggregation and the target check happen here, so a dataset without
    /// `stock_price` never yields a session.
    pub fn from_parts(history: PriceHistory, model: Box<dyn RegressionModel>) -> Result<Self> {
        let last_timestamp = history.last_timestamp().ok_or(ForecastError::EmptyDataset)?;
        let daily = history.aggregate_daily()?.into_series()?;

        info!(
            "Session ready: {} days of history through {}, model {}",
            daily.len(),
            last_timestamp,
            model.name()
        );

        Ok(Self {
            history,
            daily,
            last_timestamp,
            model,
            trend_window: FeatureSimulator::DEFAULT_TREND_WINDOW,
            history_window: HistoryWindow::DEFAULT_DAYS,
        })
    }

    /// Override the trend and history windows
    pub fn with_windows(mut self, trend_window: usize, history_window: usize) -> Result<Self> {
        if trend_window == 0 || history_window == 0 {
            return Err(ForecastError::InvalidParameter(
                "Trend and history windows must be positive".to_string(),
            ));
        }
        self.trend_window = trend_window;
        self.history_window = history_window;
        Ok(self)
    }

    /// Raw observations
    pub fn history(&self) -> &PriceHistory {
        &self.history
    }

    /// Daily aggregates
    pub fn daily(&self) -> &DailySeries {
        &self.daily
    }

    /// Latest observed timestamp
    pub fn last_timestamp(&self) -> NaiveDateTime {
        self.last_timestamp
    }

    /// The loaded model
    pub fn model(&self) -> &dyn RegressionModel {
        self.model.as_ref()
    }

    /// Simulate and predict `horizon` business days ahead
    pub fn run(&self, horizon: Horizon) -> Result<ForecastReport> {
        let simulator = FeatureSimulator::new(horizon).with_trend_window(self.trend_window)?;
        let projection = simulator.simulate(&self.daily, self.last_timestamp)?;
        let predictions = predict(self.model(), &projection)?;
        let history = HistoryWindow::from_series(&self.daily, self.history_window);

        info!(
            "Predicted {} business days after {}",
            predictions.len(),
            self.last_timestamp
        );

        Ok(ForecastReport {
            horizon,
            projection,
            predictions,
            history,
        })
    }
}
