// UI rendering logic
//
// In ratatui the whole UI is rebuilt on every frame. Layout:
//
//   Title bar (3 lines fixed)
//   Amount input (3 lines fixed)
//   Main content (fills remaining space): metric columns | reference data
//   System logs (5 lines fixed)
//   Status bar (3 lines fixed)

use super::app::{App, View};
use crate::config::VERSION;
use crate::format::format_number;
use crate::logging::LogLevel;
use crate::metrics::Metric;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Metric panel sections, split over two columns
const LEFT_SECTIONS: &[(&str, &[Metric])] = &[
    (
        "Gold",
        &[Metric::GoldWeight, Metric::GoldVolume, Metric::GoldDiameter],
    ),
    (
        "Coins",
        &[Metric::CoinWeight, Metric::CoinHeight, Metric::CoinArea],
    ),
    ("Diamond", &[Metric::DiamondCarats]),
];

const RIGHT_SECTIONS: &[(&str, &[Metric])] = &[
    ("Household", &[Metric::SavingsRatio, Metric::IncomeMonths]),
    (
        "Cost of living",
        &[
            Metric::ColZurich,
            Metric::ColNewYork,
            Metric::ColLondon,
            Metric::ColLisbon,
            Metric::ColBangkok,
        ],
    ),
    ("Everyday", &[Metric::UnitCount]),
];

/// Reference panel rows: store key -> row label. Populated once at
/// hydration, formatted with max 2 / min 0 fractional digits.
const REFERENCE_ROWS: &[(&str, &str)] = &[
    ("gold_price", "Gold price / g"),
    ("coin_weight", "Coin weight (g)"),
    ("coin_height", "Coin height (cm)"),
    ("coin_diameter", "Coin diameter (cm)"),
    ("diamond_carat", "Diamond price / ct"),
    ("savings_baseline", "Avg. savings"),
    ("annual_income", "Annual income"),
    ("col_zurich", "Monthly costs, Zurich"),
    ("col_new_york", "Monthly costs, New York"),
    ("col_london", "Monthly costs, London"),
    ("col_lisbon", "Monthly costs, Lisbon"),
    ("col_bangkok", "Monthly costs, Bangkok"),
    ("unit_price", "Coffee price"),
];

/// Main UI render function - called on every frame
pub fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title bar
            Constraint::Length(3), // Amount input
            Constraint::Min(10),   // Main content - takes remaining space
            Constraint::Length(5), // System logs - fixed height
            Constraint::Length(3), // Status bar
        ])
        .split(f.area());

    render_title(f, chunks[0]);
    render_input(f, chunks[1], app);

    match app.view {
        View::Main => render_main(f, chunks[2], app),
        View::Help => render_help(f, chunks[2], app),
    }

    render_logs(f, chunks[3], app);
    render_status(f, chunks[4], app);
}

fn render_title(f: &mut Frame, area: Rect) {
    let title = Line::from(vec![
        Span::styled(
            " MoneyLens ",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("v{} ", VERSION), Style::default().fg(Color::DarkGray)),
        Span::styled(
            "- what an amount of money amounts to",
            Style::default().fg(Color::Gray),
        ),
    ]);

    let paragraph = Paragraph::new(title)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(paragraph, area);
}

fn render_input(f: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![
        Span::styled(
            app.input_echo(),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        // Block cursor at the end of the field
        Span::styled("▏", Style::default().fg(Color::Yellow)),
    ];

    if app.debouncer.is_pending() {
        spans.push(Span::styled(
            "  recalculating…",
            Style::default().fg(Color::DarkGray),
        ));
    }

    let paragraph = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Amount (type digits) "),
    );
    f.render_widget(paragraph, area);
}

/// The Main view: two metric columns plus the reference panel
fn render_main(f: &mut Frame, area: Rect, app: &App) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(34),
            Constraint::Percentage(33),
            Constraint::Percentage(33),
        ])
        .split(area);

    render_metric_column(f, columns[0], app, " Equivalents ", LEFT_SECTIONS);
    render_metric_column(f, columns[1], app, " Ratios ", RIGHT_SECTIONS);
    render_reference(f, columns[2], app);
}

fn render_metric_column(
    f: &mut Frame,
    area: Rect,
    app: &App,
    title: &str,
    sections: &[(&str, &[Metric])],
) {
    let mut lines = Vec::new();

    for (i, (header, metrics)) in sections.iter().enumerate() {
        if i > 0 {
            lines.push(Line::default());
        }
        lines.push(Line::from(Span::styled(
            *header,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )));
        for &metric in *metrics {
            lines.push(metric_line(app, metric));
        }
    }

    let paragraph =
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(paragraph, area);
}

/// One metric row: label, animated value, unit
fn metric_line(app: &App, metric: Metric) -> Line<'static> {
    let (value, decimals) = match app.animator.display(metric) {
        Some(display) => display,
        // Unseeded key: skipped silently
        None => return Line::default(),
    };

    let text = format_number(value, decimals, decimals);
    let value_style = if value.is_finite() {
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD)
    } else {
        // Degenerate result (empty store, zero constant): shown, not hidden
        Style::default().fg(Color::Red)
    };

    Line::from(vec![
        Span::styled(
            format!("  {:<21}", metric.label()),
            Style::default().fg(Color::Gray),
        ),
        Span::styled(format!("{:>12}", text), value_style),
        Span::styled(
            format!(" {}", metric.unit()),
            Style::default().fg(Color::DarkGray),
        ),
    ])
}

/// Static reference panel, hydrated once from the data store
fn render_reference(f: &mut Frame, area: Rect, app: &App) {
    let mut lines = Vec::new();

    for (key, label) in REFERENCE_ROWS {
        let value = match app.store.lookup(key) {
            Some(value) => format_number(value, 2, 0),
            None => "—".to_string(),
        };
        lines.push(Line::from(vec![
            Span::styled(format!("  {:<24}", label), Style::default().fg(Color::Gray)),
            Span::styled(format!("{:>9}", value), Style::default().fg(Color::White)),
        ]));
    }

    let title = if app.hydrated {
        " Reference data "
    } else {
        " Reference data (loading…) "
    };

    let paragraph =
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(paragraph, area);
}

fn render_help(f: &mut Frame, area: Rect, app: &App) {
    let key_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);

    let data_source = if app.store.is_empty() && !app.hydrated {
        "loading…".to_string()
    } else if app.hydrated {
        format!("{} constants loaded", app.store.len())
    } else {
        "not available".to_string()
    };

    let lines = vec![
        Line::from(Span::styled(
            "Keybindings",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::default(),
        Line::from(vec![
            Span::styled("  0-9        ", key_style),
            Span::raw("type an amount"),
        ]),
        Line::from(vec![
            Span::styled("  Backspace  ", key_style),
            Span::raw("delete the last digit"),
        ]),
        Line::from(vec![
            Span::styled("  Esc        ", key_style),
            Span::raw("clear the amount (or close this help)"),
        ]),
        Line::from(vec![
            Span::styled("  y          ", key_style),
            Span::raw("copy the current metrics to the clipboard"),
        ]),
        Line::from(vec![
            Span::styled("  ?          ", key_style),
            Span::raw("toggle this help"),
        ]),
        Line::from(vec![
            Span::styled("  q          ", key_style),
            Span::raw("quit"),
        ]),
        Line::default(),
        Line::from(Span::styled(
            "Data",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::default(),
        Line::from(format!("  Reference data: {}", data_source)),
        Line::from("  Metrics recompute 300 ms after the last keystroke and"),
        Line::from("  animate toward their new values over 600 ms."),
    ];

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Help (Esc to close) "),
    );
    f.render_widget(paragraph, area);
}

/// Recent log entries, colored by level
fn render_logs(f: &mut Frame, area: Rect, app: &App) {
    let visible = area.height.saturating_sub(2) as usize;
    let lines: Vec<Line> = app
        .log_buffer
        .recent(visible)
        .into_iter()
        .map(|entry| {
            let level_color = match entry.level {
                LogLevel::Error => Color::Red,
                LogLevel::Warn => Color::Yellow,
                LogLevel::Info => Color::Green,
                LogLevel::Debug | LogLevel::Trace => Color::DarkGray,
            };
            Line::from(vec![
                Span::styled(
                    entry.timestamp.format("%H:%M:%S ").to_string(),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(
                    format!("{:<6}", entry.level.as_str()),
                    Style::default().fg(level_color),
                ),
                Span::raw(entry.message),
            ])
        })
        .collect();

    let paragraph =
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Logs "));
    f.render_widget(paragraph, area);
}

fn render_status(f: &mut Frame, area: Rect, app: &App) {
    let line = if let Some(toast) = app.toast() {
        Line::from(Span::styled(
            format!(" {} ", toast),
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ))
    } else {
        Line::from(vec![
            Span::styled(" q ", Style::default().fg(Color::Yellow)),
            Span::raw("quit  "),
            Span::styled("? ", Style::default().fg(Color::Yellow)),
            Span::raw("help  "),
            Span::styled("y ", Style::default().fg(Color::Yellow)),
            Span::raw("copy  "),
            Span::styled("esc ", Style::default().fg(Color::Yellow)),
            Span::raw("clear  "),
            Span::styled(
                format!("│ up {}", app.uptime()),
                Style::default().fg(Color::DarkGray),
            ),
            Span::styled(
                if app.animator.is_animating() {
                    "  ↻"
                } else {
                    ""
                },
                Style::default().fg(Color::DarkGray),
            ),
        ])
    };

    let paragraph = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
    f.render_widget(paragraph, area);
}
