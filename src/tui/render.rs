//! Main rendering logic for TUI.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};

use super::state::{AppState, PopupState, View};
use super::widgets::{
    render_footer, render_header, render_help, render_kill_confirm, render_performance,
    render_processes,
};

/// Main render function.
pub fn render(frame: &mut Frame, state: &mut AppState) {
    let area = frame.area();

    // Main layout: header, content, footer
    let chunks = Layout::vertical([
        Constraint::Length(1), // Header
        Constraint::Min(3),    // Content area
        Constraint::Length(1), // Key hints
    ])
    .split(area);

    render_header(frame, chunks[0], state);

    match state.view {
        View::Processes => render_processes(frame, chunks[1], state),
        View::Performance => render_performance(frame, chunks[1], state),
    }

    render_footer(frame, chunks[2], state);

    // Popups are rendered last to overlay everything
    match &mut state.popup {
        PopupState::None => {}
        PopupState::Help { scroll } => render_help(frame, area, scroll),
        PopupState::KillConfirm { pid, name } => render_kill_confirm(frame, area, *pid, name),
    }
}
