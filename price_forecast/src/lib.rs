//! # Price Forecast
//!
//! Projects stock prices forward from a historical dataset and a
//! pre-trained regression model.
//!
//! ## Pipeline
//!
//! - **Load**: hourly observations with a `timestamp` column (`%d-%m-%Y %H:%M`)
//! - **Aggregate**: one row per calendar date, each numeric column averaged
//! - **Simulate**: `nasdaq_index` and `sp500_index` grow at their mean daily
//!   percentage change over the last 30 days, compounded; the other four
//!   covariates are held at their last value
//! - **Predict**: the model maps each simulated business day to a price
//! - **Present**: prediction table and CSV export
//!
//! ## Quick Start
//!
//! ```no_run
//! use price_forecast::{ForecastSession, Horizon};
//!
//! let session = ForecastSession::from_paths("prices.csv", "model.json")?;
//! let report = session.run(Horizon::new(10)?)?;
//! report.predictions.export_csv("stock_predictions.csv")?;
//! # Ok::<(), price_forecast::ForecastError>(())
//! ```

pub mod config;
pub mod data;
pub mod error;
pub mod features;
pub mod models;
pub mod predictor;
pub mod report;
pub mod session;
pub mod simulation;
pub mod synthetic;

// Re-export commonly used types
pub use crate::config::OutlookConfig;
pub use crate::data::{DailyAggregate, DailyFrame, DailySeries, DataLoader, PriceHistory};
pub use crate::error::{ForecastError, Result};
pub use crate::features::{FeatureMatrix, FeatureRow, FEATURE_COLUMNS, TARGET_COLUMN};
pub use crate::models::{load_model, ModelArtifact, RegressionModel};
pub use crate::predictor::predict;
pub use crate::report::{HistoryWindow, Prediction, PredictionSummary, PredictionTable};
pub use crate::session::{ForecastReport, ForecastSession};
pub use crate::simulation::{FeatureSimulator, Horizon, Projection, ProjectionRow};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
