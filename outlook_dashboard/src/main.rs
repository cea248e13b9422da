//! stock-outlook - project stock prices with a pre-trained regression model.

mod app;
mod chart;
mod event;
mod ui;

use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use price_forecast::synthetic::{sample_model, SampleDataset};
use price_forecast::{ForecastSession, Horizon, OutlookConfig};
use ratatui::crossterm::{
    cursor::Show,
    event::Event,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;

use app::App;
use event::{handle_key_event, poll_event};
use ui::draw_ui;

#[derive(Parser)]
#[command(name = "stock-outlook", version)]
#[command(about = "Stock price projections from a pre-trained regression model", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive terminal dashboard
    Dashboard {
        #[command(flatten)]
        source: SourceArgs,

        /// Where the [e] key writes the predictions CSV
        #[arg(short, long)]
        export: Option<PathBuf>,
    },

    /// Print predictions and optionally write them as CSV
    Forecast {
        #[command(flatten)]
        source: SourceArgs,

        /// Output CSV file (optional)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Write a synthetic dataset and a matching model artifact
    Sample {
        /// Directory for sample.csv and model.json
        #[arg(short, long, default_value = "data")]
        out_dir: PathBuf,

        /// Business days of hourly observations
        #[arg(short, long, default_value_t = 120)]
        days: usize,

        /// Random seed
        #[arg(short, long, default_value_t = 42)]
        seed: u64,
    },
}

#[derive(Args)]
struct SourceArgs {
    /// CSV with timestamp, stock_price and the six feature columns
    #[arg(short, long, env = "STOCK_OUTLOOK_DATA")]
    data: Option<PathBuf>,

    /// JSON model artifact
    #[arg(short, long, env = "STOCK_OUTLOOK_MODEL")]
    model: Option<PathBuf>,

    /// Business days to predict (1-60)
    #[arg(long)]
    horizon: Option<usize>,

    /// JSON config file; flags override its values
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl SourceArgs {
    fn resolve(&self) -> anyhow::Result<OutlookConfig> {
        let mut config = match &self.config {
            Some(path) => OutlookConfig::load(path)
                .with_context(|| format!("reading config {}", path.display()))?,
            None => OutlookConfig::default(),
        };

        if let Some(data) = &self.data {
            config.data_path = data.clone();
        }
        if let Some(model) = &self.model {
            config.model_path = model.clone();
        }
        if let Some(days) = self.horizon {
            config.horizon = Horizon::new(days)?;
        }

        Ok(config)
    }
}

fn init_logging(default_filter: &str) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .target(env_logger::Target::Stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Dashboard { source, export } => {
            // keep log lines from drawing over the terminal UI
            init_logging("warn");
            let mut config = source.resolve()?;
            if let Some(path) = export {
                config.export_path = path;
            }
            run_dashboard(&config)
        }
        Commands::Forecast { source, output } => {
            init_logging("info");
            run_forecast(&source.resolve()?, output)
        }
        Commands::Sample {
            out_dir,
            days,
            seed,
        } => {
            init_logging("info");
            run_sample(out_dir, days, seed)
        }
    }
}

fn open_session(config: &OutlookConfig) -> anyhow::Result<ForecastSession> {
    ForecastSession::open(config).with_context(|| {
        format!(
            "loading {} with model {}",
            config.data_path.display(),
            config.model_path.display()
        )
    })
}

fn run_forecast(config: &OutlookConfig, output: Option<PathBuf>) -> anyhow::Result<()> {
    let session = open_session(config)?;

    println!("Dataset Preview:\n{}", session.history().preview(5));
    println!("{} model loaded successfully!", session.model().name());

    let report = session.run(config.horizon)?;
    println!(
        "Average daily % change in nasdaq_index: {:.2}%",
        report.projection.nasdaq_trend() * 100.0
    );
    println!(
        "Average daily % change in sp500_index: {:.2}%",
        report.projection.sp500_trend() * 100.0
    );

    println!(
        "\nPredicted Stock Prices for the Next {} Days",
        config.horizon.days()
    );
    print!("{}", report.predictions);

    if let Some(path) = output {
        report.predictions.export_csv(&path)?;
        println!("\nSaved predictions to {}", path.display());
    }

    Ok(())
}

fn run_sample(out_dir: PathBuf, days: usize, seed: u64) -> anyhow::Result<()> {
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("creating {}", out_dir.display()))?;

    let data_path = out_dir.join("sample.csv");
    let model_path = out_dir.join("model.json");
    let sample = SampleDataset {
        days,
        seed,
        ..SampleDataset::default()
    };
    let rows = sample.write_csv(&data_path)?;
    sample_model().save(&model_path)?;

    println!(
        "Wrote {} observations to {} and a model to {}",
        rows,
        data_path.display(),
        model_path.display()
    );
    Ok(())
}

fn run_dashboard(config: &OutlookConfig) -> anyhow::Result<()> {
    // Load before touching the terminal so load errors print normally
    let session = open_session(config)?;
    let mut app = App::new(session, config.horizon, config.export_path.clone());

    // Setup terminal; the guard restores it on every exit path
    enable_raw_mode()?;
    let _guard = TerminalGuard;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    run_app(&mut terminal, &mut app)
}

/// Leaves raw mode and the alternate screen when dropped
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Err(err) = disable_raw_mode() {
            log::warn!("Failed to leave raw mode: {}", err);
        }
        if let Err(err) = restore_screen(&mut io::stdout()) {
            log::warn!("Failed to restore the screen: {}", err);
        }
    }
}

fn restore_screen<W: Write>(out: &mut W) -> io::Result<()> {
    execute!(out, LeaveAlternateScreen, Show)
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> anyhow::Result<()> {
    let tick_rate = Duration::from_millis(100);

    loop {
        terminal.draw(|frame| draw_ui(frame, app))?;

        app.clear_expired_status();

        if let Some(Event::Key(key)) = poll_event(tick_rate)? {
            handle_key_event(app, key);
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_restore_screen_leaves_alternate_screen_and_shows_cursor() {
        let mut out = Vec::new();
        restore_screen(&mut out).unwrap();
        let written = String::from_utf8(out).unwrap();
        assert!(written.contains("\x1b[?1049l"));
        assert!(written.contains("\x1b[?25h"));
    }

    #[test]
    fn test_flags_override_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("outlook.json");
        std::fs::write(&config_path, r#"{"horizon": 12, "data_path": "file.csv"}"#).unwrap();

        let source = SourceArgs {
            data: Some(PathBuf::from("flag.csv")),
            model: None,
            horizon: None,
            config: Some(config_path),
        };
        let config = source.resolve().unwrap();
        assert_eq!(config.data_path, PathBuf::from("flag.csv"));
        assert_eq!(config.horizon.days(), 12);
    }
}
