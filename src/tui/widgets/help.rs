//! Help popup widget.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

/// Renders the help popup centered on screen with scroll support.
pub fn render_help(frame: &mut Frame, area: Rect, scroll: &mut usize) {
    // 60% width, 80% height, clamped to 40-80 x 10-30 and to the screen
    let popup_width = (area.width * 60 / 100).clamp(40, 80).min(area.width);
    let popup_height = (area.height * 80 / 100).clamp(10, 30).min(area.height);

    let popup_x = area.x + (area.width.saturating_sub(popup_width)) / 2;
    let popup_y = area.y + (area.height.saturating_sub(popup_height)) / 2;
    let popup_area = Rect::new(popup_x, popup_y, popup_width, popup_height);

    frame.render_widget(Clear, popup_area);

    let content = help_lines();
    let content_lines = content.len();

    let block = Block::default()
        .title(" procmon help ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let chunks = Layout::vertical([
        Constraint::Min(1),    // Content
        Constraint::Length(1), // Footer
    ])
    .split(inner);

    let visible_height = chunks[0].height as usize;
    let max_scroll = content_lines.saturating_sub(visible_height);
    if *scroll > max_scroll {
        *scroll = max_scroll;
    }

    let paragraph = Paragraph::new(content)
        .wrap(Wrap { trim: false })
        .scroll((*scroll as u16, 0))
        .style(Style::default().fg(Color::White));
    frame.render_widget(paragraph, chunks[0]);

    let scroll_info = if max_scroll > 0 {
        format!(" [{}/{}]", *scroll + 1, max_scroll + 1)
    } else {
        String::new()
    };
    let footer = Paragraph::new(Line::from(vec![
        Span::styled("Press ", Style::default().fg(Color::DarkGray)),
        Span::styled("?", Style::default().fg(Color::Yellow)),
        Span::styled(" or ", Style::default().fg(Color::DarkGray)),
        Span::styled("Esc", Style::default().fg(Color::Yellow)),
        Span::styled(" to close, ", Style::default().fg(Color::DarkGray)),
        Span::styled("↑↓", Style::default().fg(Color::Yellow)),
        Span::styled(" to scroll", Style::default().fg(Color::DarkGray)),
        Span::styled(scroll_info, Style::default().fg(Color::DarkGray)),
    ]));
    frame.render_widget(footer, chunks[1]);
}

fn section(title: &'static str) -> Line<'static> {
    Line::from(Span::styled(title, Style::default().fg(Color::Yellow)))
}

fn binding(keys: &'static str, what: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:<14}", keys), Style::default().fg(Color::Cyan)),
        Span::raw(what),
    ])
}

fn help_lines() -> Vec<Line<'static>> {
    vec![
        section("Keys"),
        Line::from(""),
        binding("q, Ctrl-C", "Quit"),
        binding("v, Tab", "Switch between Processes and Performance"),
        binding("↑ ↓", "Move selection"),
        binding("PgUp PgDn", "Move selection by a page"),
        binding("Home End", "First / last process"),
        binding("p m c i", "Sort by PID, memory, CPU, I/O"),
        binding("k", "Terminate selected process (asks first)"),
        binding("/", "Filter by name, Enter keeps, Esc clears"),
        binding("space", "Pause / resume sampling"),
        binding("?", "Toggle this help"),
        Line::from(""),
        section("Process columns"),
        Line::from(""),
        Line::from("PID      - Process ID"),
        Line::from("NAME     - Executable name"),
        Line::from("CPU%     - Share of all CPU time over the last interval"),
        Line::from("MEM(KB)  - Resident set size"),
        Line::from("READ/s   - Bytes read per second, in KB"),
        Line::from("WRITE/s  - Bytes written per second, in KB"),
        Line::from("STATE    - R=Running, S=Sleeping, D=Disk wait,"),
        Line::from("           Z=Zombie, T=Stopped, I=Idle"),
        Line::from(""),
        section("Rates"),
        Line::from(""),
        Line::from("Rates come from the difference between two consecutive samples"),
        Line::from("divided by the measured time between them. The first sample and"),
        Line::from("processes seen for the first time show 0. Counters that went"),
        Line::from("backwards (reset) also show 0 for that interval."),
    ]
}
