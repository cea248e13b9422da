//! Dashboard state

use price_forecast::{ForecastReport, ForecastSession, Horizon};
use std::path::PathBuf;
use std::time::Instant;

/// Seconds a status message stays on screen
const STATUS_TTL_SECS: u64 = 5;

/// Main application state.
pub struct App {
    /// Loaded dataset and model, reused for every run
    session: ForecastSession,
    /// Currently selected horizon
    pub horizon: Horizon,
    /// Result of the latest run
    pub report: Option<ForecastReport>,
    /// Error of the latest run, shown instead of the chart
    pub error: Option<String>,
    /// Destination of the CSV export
    pub export_path: PathBuf,
    /// Status message with its creation time
    pub status_message: Option<(String, Instant)>,
    /// Whether the app should quit
    pub should_quit: bool,
}

impl App {
    /// Create the app and run the first forecast
    pub fn new(session: ForecastSession, horizon: Horizon, export_path: PathBuf) -> Self {
        let mut app = Self {
            session,
            horizon,
            report: None,
            error: None,
            export_path,
            status_message: None,
            should_quit: false,
        };
        app.refresh();
        app
    }

    /// The loaded session
    pub fn session(&self) -> &ForecastSession {
        &self.session
    }

    /// Re-simulate and re-predict for the current horizon
    pub fn refresh(&mut self) {
        match self.session.run(self.horizon) {
            Ok(report) => {
                self.report = Some(report);
                self.error = None;
            }
            Err(err) => {
                log::error!("Forecast failed: {}", err);
                self.report = None;
                self.error = Some(err.to_string());
            }
        }
    }

    /// Move the horizon by `delta` days, clamped to the valid range
    pub fn adjust_horizon(&mut self, delta: isize) {
        let days = (self.horizon.days() as isize + delta).max(0) as usize;
        let next = Horizon::clamped(days);
        if next != self.horizon {
            self.horizon = next;
            self.refresh();
        }
    }

    /// Write the current predictions to `export_path`
    pub fn export(&mut self) {
        let outcome = match &self.report {
            Some(report) => report.predictions.export_csv(&self.export_path),
            None => {
                self.set_status("Nothing to export");
                return;
            }
        };

        match outcome {
            Ok(()) => {
                let message = format!(
                    "Saved {} predictions to {}",
                    self.horizon.days(),
                    self.export_path.display()
                );
                self.set_status(message);
            }
            Err(err) => self.set_status(format!("Export failed: {}", err)),
        }
    }

    /// Set a status message that will be displayed temporarily.
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some((message.into(), Instant::now()));
    }

    /// Clear expired status messages.
    pub fn clear_expired_status(&mut self) {
        if let Some((_, instant)) = &self.status_message {
            if instant.elapsed().as_secs() > STATUS_TTL_SECS {
                self.status_message = None;
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use price_forecast::synthetic::{sample_model, SampleDataset};
    use tempfile::{tempdir, TempDir};

    /// Session over a small synthetic dataset; keep the dir alive while used
    pub(crate) fn sample_app(horizon: usize) -> (App, TempDir) {
        let dir = tempdir().unwrap();
        let data = dir.path().join("sample.csv");
        let model = dir.path().join("model.json");
        SampleDataset {
            days: 40,
            ..SampleDataset::default()
        }
        .write_csv(&data)
        .unwrap();
        sample_model().save(&model).unwrap();

        let session = ForecastSession::from_paths(&data, &model).unwrap();
        let export = dir.path().join("stock_predictions.csv");
        let app = App::new(session, Horizon::new(horizon).unwrap(), export);
        (app, dir)
    }

    #[test]
    fn test_initial_run() {
        let (app, _dir) = sample_app(30);
        let report = app.report.as_ref().unwrap();
        assert_eq!(report.predictions.len(), 30);
        assert!(app.error.is_none());
    }

    #[test]
    fn test_horizon_adjustment_is_clamped() {
        let (mut app, _dir) = sample_app(58);
        app.adjust_horizon(10);
        assert_eq!(app.horizon.days(), 60);
        assert_eq!(app.report.as_ref().unwrap().predictions.len(), 60);

        app.adjust_horizon(-100);
        assert_eq!(app.horizon.days(), 1);
        assert_eq!(app.report.as_ref().unwrap().predictions.len(), 1);
    }

    #[test]
    fn test_export_writes_file() {
        let (mut app, _dir) = sample_app(7);
        app.export();

        let contents = std::fs::read_to_string(&app.export_path).unwrap();
        assert_eq!(contents.lines().count(), 8);
        let (message, _) = app.status_message.as_ref().unwrap();
        assert!(message.starts_with("Saved 7 predictions"));
    }
}
