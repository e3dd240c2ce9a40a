//! Header widget showing time, mode, views and system summary.

use chrono::Local;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::fmt::format_uptime;
use crate::tui::state::{AppState, InputMode, View};
use crate::tui::style::Styles;

/// Renders the header bar.
pub fn render_header(frame: &mut Frame, area: Rect, state: &AppState) {
    let chunks = Layout::horizontal([
        Constraint::Length(20), // Time
        Constraint::Length(9),  // Mode
        Constraint::Length(30), // Views
        Constraint::Min(24),    // Uptime and load
        Constraint::Length(40), // Filter/Status
    ])
    .split(area);

    // Time
    let time_str = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    frame.render_widget(Paragraph::new(time_str).style(Styles::header()), chunks[0]);

    // Mode
    let mode_str = if state.paused { " PAUSED " } else { " LIVE " };
    frame.render_widget(Paragraph::new(mode_str).style(Styles::header()), chunks[1]);

    // Views
    let tabs: Vec<Span> = View::all()
        .iter()
        .enumerate()
        .flat_map(|(i, view)| {
            let style = if *view == state.view {
                Styles::tab_active()
            } else {
                Styles::tab_inactive()
            };
            vec![
                Span::styled(format!(" {}:", i + 1), Styles::dim()),
                Span::styled(format!("{} ", view.name()), style),
            ]
        })
        .collect();
    frame.render_widget(
        Paragraph::new(Line::from(tabs)).style(Styles::header()),
        chunks[2],
    );

    // Uptime and load
    let metrics = state.metrics.as_ref();
    let uptime = format_uptime(metrics.and_then(|m| m.uptime_secs));
    let load = metrics
        .and_then(|m| m.load)
        .map(|l| format!("{:.2} {:.2} {:.2}", l.one, l.five, l.fifteen))
        .unwrap_or_else(|| "-".to_string());
    frame.render_widget(
        Paragraph::new(format!("up {}  load {}", uptime, load)).style(Styles::header()),
        chunks[3],
    );

    // Filter input or status message
    let (right_content, right_style) = if state.input_mode == InputMode::Filter {
        (
            format!("Filter: {}█", state.filter_input),
            Styles::filter_input(),
        )
    } else if let Some(msg) = state.status() {
        (msg.to_string(), Styles::warning())
    } else if let Some(filter) = &state.table.filter {
        (format!("/{}", filter), Styles::header())
    } else {
        (String::new(), Styles::header())
    };
    frame.render_widget(
        Paragraph::new(right_content).style(right_style),
        chunks[4],
    );
}

/// Renders the one-line key hint bar at the bottom.
pub fn render_footer(frame: &mut Frame, area: Rect, state: &AppState) {
    let hints: &[(&str, &str)] = match state.view {
        View::Processes => &[
            ("q", "quit"),
            ("v", "view"),
            ("p/m/c/i", "sort"),
            ("k", "kill"),
            ("/", "filter"),
            ("space", "pause"),
            ("?", "help"),
        ],
        View::Performance => &[
            ("q", "quit"),
            ("v", "view"),
            ("space", "pause"),
            ("?", "help"),
        ],
    };
    let spans: Vec<Span> = hints
        .iter()
        .flat_map(|(key, what)| {
            vec![
                Span::styled(format!(" {}", key), Styles::help_key()),
                Span::styled(format!(" {} ", what), Styles::help()),
            ]
        })
        .collect();
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
