//! Chart widget overlaying recent history with the predictions.

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};
use price_forecast::{HistoryWindow, PredictionTable};
use ratatui::{
    prelude::*,
    symbols::Marker,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
};

/// Chart points for both series on a shared day axis
pub struct ForecastPoints {
    pub history: Vec<(f64, f64)>,
    pub predicted: Vec<(f64, f64)>,
    first: Option<NaiveDate>,
    last: Option<NaiveDate>,
}

impl ForecastPoints {
    /// Place history and predictions on one axis measured in days.
    /// Non-finite values are left out of the chart.
    pub fn new(history: &HistoryWindow, predictions: &PredictionTable) -> Self {
        let history_points: Vec<(f64, f64)> = history
            .points()
            .iter()
            .filter(|(_, price)| price.is_finite())
            .map(|(date, price)| (day_number(*date), *price))
            .collect();
        let predicted_points: Vec<(f64, f64)> = predictions
            .rows()
            .iter()
            .filter(|p| p.predicted_stock_price.is_finite())
            .map(|p| (moment_number(p.timestamp), p.predicted_stock_price))
            .collect();

        let first = history
            .points()
            .first()
            .map(|(date, _)| *date)
            .or_else(|| predictions.rows().first().map(|p| p.timestamp.date()));
        let last = predictions
            .rows()
            .last()
            .map(|p| p.timestamp.date())
            .or_else(|| history.points().last().map(|(date, _)| *date));

        Self {
            history: history_points,
            predicted: predicted_points,
            first,
            last,
        }
    }

    fn x_bounds(&self) -> [f64; 2] {
        let xs = self.history.iter().chain(&self.predicted).map(|(x, _)| *x);
        let min = xs.clone().fold(f64::INFINITY, f64::min);
        let max = xs.fold(f64::NEG_INFINITY, f64::max);
        if min.is_finite() && max > min {
            [min, max]
        } else if min.is_finite() {
            [min - 1.0, min + 1.0]
        } else {
            [0.0, 1.0]
        }
    }

    fn y_bounds(&self) -> [f64; 2] {
        let ys = self.history.iter().chain(&self.predicted).map(|(_, y)| *y);
        let min = ys.clone().fold(f64::INFINITY, f64::min);
        let max = ys.fold(f64::NEG_INFINITY, f64::max);
        if !min.is_finite() {
            return [0.0, 1.0];
        }
        let pad = ((max - min) * 0.05).max(1.0);
        [min - pad, max + pad]
    }
}

fn day_number(date: NaiveDate) -> f64 {
    date.num_days_from_ce() as f64
}

fn moment_number(timestamp: NaiveDateTime) -> f64 {
    day_number(timestamp.date()) + timestamp.num_seconds_from_midnight() as f64 / 86_400.0
}

/// Create the historical-and-predicted price chart.
pub fn create_forecast_chart(points: &ForecastPoints) -> Chart<'_> {
    let datasets = vec![
        Dataset::default()
            .name("Historical Stock Price")
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Blue))
            .data(&points.history),
        Dataset::default()
            .name("Predicted Stock Price")
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Yellow))
            .data(&points.predicted),
    ];

    let x_bounds = points.x_bounds();
    let y_bounds = points.y_bounds();
    let date_label = |date: Option<NaiveDate>| {
        date.map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default()
    };

    Chart::new(datasets)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Historical and Predicted Stock Prices "),
        )
        .x_axis(
            Axis::default()
                .title("Date")
                .style(Style::default().fg(Color::Gray))
                .bounds(x_bounds)
                .labels(vec![
                    Span::raw(date_label(points.first)),
                    Span::raw(date_label(points.last)),
                ]),
        )
        .y_axis(
            Axis::default()
                .title("Stock Price")
                .style(Style::default().fg(Color::Gray))
                .bounds(y_bounds)
                .labels(vec![
                    Span::raw(format!("{:.1}", y_bounds[0])),
                    Span::raw(format!("{:.1}", (y_bounds[0] + y_bounds[1]) / 2.0)),
                    Span::raw(format!("{:.1}", y_bounds[1])),
                ]),
        )
}
