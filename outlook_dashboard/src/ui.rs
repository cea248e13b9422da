//! Dashboard layout.

use crate::app::App;
use crate::chart::{create_forecast_chart, ForecastPoints};
use price_forecast::report::EXPORT_TIMESTAMP_FORMAT;
use price_forecast::{ForecastReport, Horizon, RegressionModel};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, Wrap},
};

/// Draw the whole dashboard.
pub fn draw_ui(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),  // Header
            Constraint::Min(12),    // Chart
            Constraint::Length(14), // Predictions
            Constraint::Length(3),  // Footer
        ])
        .split(frame.size());

    draw_header(frame, chunks[0], app);

    match (&app.report, &app.error) {
        (Some(report), _) => {
            draw_chart(frame, chunks[1], report);
            draw_predictions(frame, chunks[2], report);
        }
        (None, Some(error)) => draw_error(frame, chunks[1], error),
        (None, None) => {}
    }

    draw_footer(frame, chunks[3], app);
}

fn draw_header(frame: &mut Frame, area: Rect, app: &App) {
    let session = app.session();
    let model: &dyn RegressionModel = session.model();

    let mut lines = vec![
        Line::from(vec![
            Span::styled("Dataset: ", Style::default().fg(Color::Gray)),
            Span::raw(format!(
                "{} observations, {} days through {}",
                session.history().len(),
                session.daily().len(),
                session.last_timestamp().format("%Y-%m-%d %H:%M")
            )),
            Span::styled("    Model: ", Style::default().fg(Color::Gray)),
            Span::raw(model.name().to_string()),
        ]),
        Line::from(vec![
            Span::styled("Prediction Horizon (days): ", Style::default().fg(Color::Gray)),
            Span::styled(
                format!("{}", app.horizon.days()),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!("  [{}-{}]", Horizon::MIN, Horizon::MAX)),
        ]),
    ];

    if let Some(report) = &app.report {
        lines.push(Line::from(format!(
            "Average daily % change in nasdaq_index: {:.2}%    sp500_index: {:.2}%",
            report.projection.nasdaq_trend() * 100.0,
            report.projection.sp500_trend() * 100.0
        )));
    }

    let header = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Stock Price Prediction "),
    );
    frame.render_widget(header, area);
}

fn draw_chart(frame: &mut Frame, area: Rect, report: &ForecastReport) {
    let points = ForecastPoints::new(&report.history, &report.predictions);
    frame.render_widget(create_forecast_chart(&points), area);
}

fn draw_predictions(frame: &mut Frame, area: Rect, report: &ForecastReport) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(46), Constraint::Length(32)])
        .split(area);

    let rows: Vec<Row> = report
        .predictions
        .rows()
        .iter()
        .map(|p| {
            Row::new(vec![
                Cell::from(p.timestamp.format(EXPORT_TIMESTAMP_FORMAT).to_string()),
                Cell::from(format!("{:>12.4}", p.predicted_stock_price)),
            ])
        })
        .collect();

    let table = Table::new(rows, [Constraint::Length(21), Constraint::Length(22)])
        .header(
            Row::new(vec!["timestamp", "predicted_stock_price"])
                .style(Style::default().add_modifier(Modifier::BOLD)),
        )
        .block(Block::default().borders(Borders::ALL).title(format!(
            " Predicted Stock Prices for the Next {} Days ",
            report.horizon.days()
        )));
    frame.render_widget(table, chunks[0]);

    let summary = report.predictions.summary();
    let text = vec![
        Line::from(format!("count  {}", summary.count)),
        Line::from(format!("mean   {:.4}", summary.mean)),
        Line::from(format!("std    {:.4}", summary.std_dev)),
        Line::from(format!("min    {:.4}", summary.min)),
        Line::from(format!("max    {:.4}", summary.max)),
    ];
    let stats = Paragraph::new(text).block(Block::default().borders(Borders::ALL).title(" Summary "));
    frame.render_widget(stats, chunks[1]);
}

fn draw_error(frame: &mut Frame, area: Rect, error: &str) {
    let paragraph = Paragraph::new(error.to_string())
        .style(Style::default().fg(Color::Red))
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title(" Error "));
    frame.render_widget(paragraph, area);
}

fn draw_footer(frame: &mut Frame, area: Rect, app: &App) {
    let text = match &app.status_message {
        Some((message, _)) => message.clone(),
        None => format!(
            "[←/→] horizon ±1  [↑/↓] ±10  [e] export to {}  [q] quit",
            app.export_path.display()
        ),
    };

    let footer = Paragraph::new(text)
        .style(Style::default().fg(Color::White))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, area);
}
