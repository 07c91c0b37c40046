//! Prediction result view with a bar chart of the two pressures.

use std::path::PathBuf;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph},
    Frame,
};

use crate::adapters::chart::Y_MAX;
use crate::domain::BloodPressurePrediction;
use crate::tui::styles::Theme;

/// What the result screen shows.
#[derive(Debug, Clone, Default)]
pub enum ResultState {
    #[default]
    Empty,
    Ready {
        prediction: BloodPressurePrediction,
        /// Where the exported chart was written
        chart_path: Option<PathBuf>,
        /// Export failure, shown without discarding the prediction
        chart_error: Option<String>,
    },
    Error {
        message: String,
    },
}

/// Bar length on the fixed 0-200 axis, in whole mmHg.
fn bar_value(value: f64) -> u64 {
    if value.is_finite() {
        value.clamp(0.0, Y_MAX).round() as u64
    } else {
        0
    }
}

/// Render the prediction result
pub fn render_result(f: &mut Frame, area: Rect, state: &ResultState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Content
            Constraint::Length(3), // Footer
        ])
        .split(area);

    render_result_header(f, chunks[0]);
    match state {
        ResultState::Empty => {
            render_message(f, chunks[1], "No prediction yet", Theme::text_muted())
        }
        ResultState::Ready {
            prediction,
            chart_path,
            chart_error,
        } => render_prediction(
            f,
            chunks[1],
            prediction,
            chart_path.as_ref(),
            chart_error.as_deref(),
        ),
        ResultState::Error { message } => render_message(f, chunks[1], message, Theme::danger()),
    }
    render_result_footer(f, chunks[2]);
}

fn render_result_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(" ", Theme::text()),
        Span::styled("Predicted Blood Pressure", Theme::title()),
        Span::styled(" │ mmHg", Theme::text_secondary()),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Theme::border()),
    );

    f.render_widget(header, area);
}

fn render_message(f: &mut Frame, area: Rect, message: &str, style: ratatui::style::Style) {
    let content = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(message, style)),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Theme::border()),
    );

    f.render_widget(content, area);
}

fn render_prediction(
    f: &mut Frame,
    area: Rect,
    prediction: &BloodPressurePrediction,
    chart_path: Option<&PathBuf>,
    chart_error: Option<&str>,
) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .margin(1)
        .split(area);

    let mut lines = vec![
        Line::from(vec![
            Span::styled("Predicted Systolic Blood Pressure: ", Theme::text_secondary()),
            Span::styled(format!("{:.2} mmHg", prediction.systolic), Theme::title()),
        ]),
        Line::from(vec![
            Span::styled("Predicted Diastolic Blood Pressure: ", Theme::text_secondary()),
            Span::styled(format!("{:.2} mmHg", prediction.diastolic), Theme::title()),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            prediction.category.to_string(),
            Theme::category(prediction.category),
        )),
        Line::from(Span::styled(
            prediction.category.description(),
            Theme::text_secondary(),
        )),
        Line::from(""),
    ];

    match (chart_path, chart_error) {
        (_, Some(err)) => lines.push(Line::from(Span::styled(
            format!("Chart export failed: {err}"),
            Theme::danger(),
        ))),
        (Some(path), None) => lines.push(Line::from(vec![
            Span::styled("Chart saved to ", Theme::text_muted()),
            Span::styled(path.display().to_string(), Theme::text()),
        ])),
        (None, None) => {}
    }

    let summary = Paragraph::new(lines).block(
        Block::default()
            .title(Span::styled(" Result ", Theme::subtitle()))
            .borders(Borders::ALL)
            .border_style(Theme::border_focused()),
    );
    f.render_widget(summary, chunks[0]);

    let bars = [
        Bar::default()
            .value(bar_value(prediction.systolic))
            .text_value(format!("{:.1}", prediction.systolic))
            .label(Line::from("Systolic BP"))
            .style(Theme::systolic_bar()),
        Bar::default()
            .value(bar_value(prediction.diastolic))
            .text_value(format!("{:.1}", prediction.diastolic))
            .label(Line::from("Diastolic BP"))
            .style(Theme::diastolic_bar()),
    ];

    let chart = BarChart::default()
        .block(
            Block::default()
                .title(Span::styled(" Blood Pressure (mmHg) ", Theme::subtitle()))
                .borders(Borders::ALL)
                .border_style(Theme::border()),
        )
        .data(BarGroup::default().bars(&bars))
        .bar_width(12)
        .bar_gap(4)
        .max(Y_MAX as u64);
    f.render_widget(chart, chunks[1]);
}

fn render_result_footer(f: &mut Frame, area: Rect) {
    let content = Line::from(vec![
        Span::styled("[Enter] ", Theme::key_hint()),
        Span::styled("Back to Form ", Theme::key_desc()),
        Span::styled("[N] ", Theme::key_hint()),
        Span::styled("New Prediction ", Theme::key_desc()),
        Span::styled("[Esc] ", Theme::key_hint()),
        Span::styled("Quit", Theme::key_desc()),
    ]);

    let footer = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(Theme::border()),
    );

    f.render_widget(footer, area);
}
