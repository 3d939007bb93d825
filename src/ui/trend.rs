use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::Rect,
    style::{Modifier, Style},
    symbols,
    text::Span,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame, Terminal,
};
use rust_decimal::prelude::ToPrimitive;
use std::io;

use crate::report::TrendPoint;
use crate::ui::theme;
use crate::ui::util::format_amount;

const DAY_SECS: f64 = 86_400.0;

/// Plot-ready form of a trend: `(unix seconds, amount)` pairs plus axis bounds.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct TrendChart {
    pub points: Vec<(f64, f64)>,
    pub x_bounds: [f64; 2],
    pub y_bounds: [f64; 2],
    pub x_labels: Vec<String>,
    pub y_labels: Vec<String>,
}

impl TrendChart {
    pub(crate) fn from_points(trend: &[TrendPoint]) -> Option<Self> {
        let first = trend.first()?;
        let last = trend.last()?;

        let points: Vec<(f64, f64)> = trend
            .iter()
            .map(|p| {
                (
                    p.timestamp.timestamp() as f64,
                    p.amount.to_f64().unwrap_or(0.0),
                )
            })
            .collect();

        let mut x_bounds = [points[0].0, points[points.len() - 1].0];
        if x_bounds[1] - x_bounds[0] < DAY_SECS {
            x_bounds = [x_bounds[0] - DAY_SECS / 2.0, x_bounds[0] + DAY_SECS / 2.0];
        }

        let max = trend.iter().map(|p| p.amount).max().unwrap_or_default();
        let top = max.to_f64().unwrap_or(0.0).max(1.0) * 1.1;

        Some(Self {
            points,
            x_bounds,
            y_bounds: [0.0, top],
            x_labels: vec![
                first.timestamp.format("%Y-%m-%d").to_string(),
                last.timestamp.format("%Y-%m-%d").to_string(),
            ],
            y_labels: vec![format_amount(Default::default()), format_amount(max)],
        })
    }
}

/// Full-screen line chart of deposits over time. Returns on any key press.
pub(crate) fn render_trend(trend: &[TrendPoint]) -> Result<()> {
    let Some(chart) = TrendChart::from_points(trend) else {
        println!("No deposits to plot yet.");
        return Ok(());
    };

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = show_until_key(&mut terminal, &chart);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn show_until_key(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    chart: &TrendChart,
) -> Result<()> {
    loop {
        terminal.draw(|f| {
            let area = f.area();
            draw(f, area, chart);
        })?;
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                return Ok(());
            }
        }
    }
}

fn draw(f: &mut Frame, area: Rect, chart: &TrendChart) {
    let title_style = Style::default()
        .fg(theme::TEXT_DIM)
        .add_modifier(Modifier::BOLD);

    let dataset = Dataset::default()
        .name("Ahorros")
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(theme::ACCENT))
        .data(&chart.points);

    let widget = Chart::new(vec![dataset])
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme::OVERLAY))
                .title(Span::styled(" Savings Trend (press any key) ", title_style)),
        )
        .x_axis(
            Axis::default()
                .title(Span::styled("Date", theme::dim_style()))
                .style(theme::dim_style())
                .bounds(chart.x_bounds)
                .labels(chart.x_labels.clone()),
        )
        .y_axis(
            Axis::default()
                .title(Span::styled("Amount", theme::dim_style()))
                .style(theme::dim_style())
                .bounds(chart.y_bounds)
                .labels(chart.y_labels.clone()),
        );

    f.render_widget(widget, area);
}
