//! Process table widget.

use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::text::Span;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Row, Table};

use crate::fmt::{FmtStyle, format_kb_rate};
use crate::model::ProcessMetrics;
use crate::ranking::SortKey;
use crate::tui::state::AppState;
use crate::tui::style::Styles;

const HEADERS: [&str; 7] = ["PID", "NAME", "CPU%", "MEM(KB)", "READ/s", "WRITE/s", "STATE"];

const WIDTHS: [Constraint; 7] = [
    Constraint::Length(8),
    Constraint::Min(16),
    Constraint::Length(7),
    Constraint::Length(11),
    Constraint::Length(10),
    Constraint::Length(10),
    Constraint::Length(6),
];

/// Columns highlighted for each sort key.
fn sorted_columns(key: SortKey) -> &'static [usize] {
    match key {
        SortKey::Pid => &[0],
        SortKey::Cpu => &[2],
        SortKey::Memory => &[3],
        SortKey::Io => &[4, 5],
    }
}

/// Cell text of one process row, in [`HEADERS`] order.
pub fn process_cells(p: &ProcessMetrics) -> [String; 7] {
    [
        p.pid.to_string(),
        p.name.clone(),
        format!("{:.1}", p.cpu_usage_percent),
        p.rss_kb.to_string(),
        format_kb_rate(p.io_read_rate, FmtStyle::Compact),
        format_kb_rate(p.io_write_rate, FmtStyle::Compact),
        p.state.to_string(),
    ]
}

/// Renders the process table.
pub fn render_processes(frame: &mut Frame, area: Rect, state: &mut AppState) {
    let table = &state.table;

    // Borders and header row take three lines
    state.page_size = area.height.saturating_sub(3).max(1) as usize;

    if state.metrics.is_none() {
        frame.render_widget(
            Paragraph::new("Collecting first sample...")
                .style(Styles::dim())
                .block(Block::default().borders(Borders::ALL).title(" Processes ")),
            area,
        );
        return;
    }

    // Sync ratatui TableState for auto-scrolling
    state
        .table_state
        .select((!table.rows.is_empty()).then_some(table.selected));

    let marked = sorted_columns(table.sort_key);
    let headers: Vec<Span> = HEADERS
        .iter()
        .enumerate()
        .map(|(i, h)| {
            if marked.contains(&i) {
                let arrow = if table.sort_key == SortKey::Pid { "▲" } else { "▼" };
                Span::styled(format!("{}{}", h, arrow), Styles::sorted_column())
            } else {
                Span::styled(*h, Styles::table_header())
            }
        })
        .collect();
    let header = Row::new(headers).style(Styles::table_header()).height(1);

    let rows: Vec<Row> = table
        .rows
        .iter()
        .map(|p| {
            let cells = process_cells(p);
            let [pid, name, cpu, mem, read, write, st] = cells;
            Row::new(vec![
                Span::raw(pid),
                Span::raw(name),
                Span::styled(cpu, Styles::for_percent(p.cpu_usage_percent)),
                Span::styled(mem, Styles::mem()),
                Span::styled(read, Styles::disk()),
                Span::styled(write, Styles::disk()),
                Span::styled(st, Styles::for_state(p.state)),
            ])
            .height(1)
        })
        .collect();

    let title = match &table.filter {
        Some(filter) => format!(
            " Processes (filter: {}) [{}/{}] sort: {} ",
            filter,
            table.rows.len(),
            table.total(),
            table.sort_key.label()
        ),
        None => format!(
            " Processes [{}] sort: {} ",
            table.total(),
            table.sort_key.label()
        ),
    };

    let widget = Table::new(rows, WIDTHS)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(title))
        .row_highlight_style(Styles::selected());

    // Clear the area before rendering to avoid artifacts
    frame.render_widget(Clear, area);
    frame.render_stateful_widget(widget, area, &mut state.table_state);
}
