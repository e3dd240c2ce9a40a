//! Terminate confirmation popup widget.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::fmt::truncate;

/// Renders a centered popup asking whether to send SIGTERM to `pid`.
pub fn render_kill_confirm(frame: &mut Frame, area: Rect, pid: u32, name: &str) {
    let popup_width = (area.width * 50 / 100).clamp(40, 60).min(area.width);
    let popup_height = area.height.clamp(7, 9).min(area.height);

    let popup_x = area.x + (area.width.saturating_sub(popup_width)) / 2;
    let popup_y = area.y + (area.height.saturating_sub(popup_height)) / 2;
    let popup_area = Rect::new(popup_x, popup_y, popup_width, popup_height);

    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(" Terminate process ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let name_width = (inner.width as usize).saturating_sub(16).max(4);
    let content = vec![
        Line::from(vec![
            Span::styled("Send SIGTERM to ", Style::default().fg(Color::White)),
            Span::styled(pid.to_string(), Style::default().fg(Color::Yellow)),
        ]),
        Line::from(Span::styled(
            truncate(name, name_width),
            Style::default().fg(Color::Cyan),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("y", Style::default().fg(Color::Yellow)),
            Span::styled(" or ", Style::default().fg(Color::DarkGray)),
            Span::styled("Enter", Style::default().fg(Color::Yellow)),
            Span::styled(" → terminate", Style::default().fg(Color::DarkGray)),
        ]),
        Line::from(vec![
            Span::styled("n", Style::default().fg(Color::Yellow)),
            Span::styled(" or ", Style::default().fg(Color::DarkGray)),
            Span::styled("Esc", Style::default().fg(Color::Yellow)),
            Span::styled(" → cancel", Style::default().fg(Color::DarkGray)),
        ]),
    ];

    let paragraph = Paragraph::new(content)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::White));
    frame.render_widget(paragraph, inner);
}
