//! Input handling and keybindings.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::ranking::SortKey;

use super::navigable::{Motion, Navigable};
use super::state::{AppState, InputMode, PopupState, View};

/// Result of handling a key event.
#[derive(Debug, PartialEq, Eq)]
pub enum KeyAction {
    /// No action, continue.
    None,
    /// Quit the application.
    Quit,
    /// Send SIGTERM to the given pid.
    Kill(u32),
}

/// Handles key input and updates state.
pub fn handle_key(state: &mut AppState, key: KeyEvent) -> KeyAction {
    if is_ctrl_c(&key) {
        return KeyAction::Quit;
    }
    match state.popup {
        PopupState::Help { .. } => return handle_help(state, key),
        PopupState::KillConfirm { .. } => return handle_kill_confirm(state, key),
        PopupState::None => {}
    }
    match state.input_mode {
        InputMode::Normal => handle_normal_mode(state, key),
        InputMode::Filter => handle_filter_mode(state, key),
    }
}

fn is_ctrl_c(key: &KeyEvent) -> bool {
    key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
}

fn handle_help(state: &mut AppState, key: KeyEvent) -> KeyAction {
    let PopupState::Help { scroll } = &mut state.popup else {
        return KeyAction::None;
    };
    match key.code {
        KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') => state.popup = PopupState::None,
        KeyCode::Up => *scroll = scroll.saturating_sub(1),
        // Clamped during render
        KeyCode::Down => *scroll = scroll.saturating_add(1),
        KeyCode::PageUp => *scroll = scroll.saturating_sub(10),
        KeyCode::PageDown => *scroll = scroll.saturating_add(10),
        KeyCode::Home => *scroll = 0,
        _ => {}
    }
    KeyAction::None
}

fn handle_kill_confirm(state: &mut AppState, key: KeyEvent) -> KeyAction {
    let PopupState::KillConfirm { pid, .. } = state.popup else {
        return KeyAction::None;
    };
    match key.code {
        KeyCode::Enter | KeyCode::Char('y') | KeyCode::Char('Y') => {
            state.popup = PopupState::None;
            KeyAction::Kill(pid)
        }
        KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') => {
            state.popup = PopupState::None;
            KeyAction::None
        }
        _ => KeyAction::None,
    }
}

/// Handles keys in normal mode.
fn handle_normal_mode(state: &mut AppState, key: KeyEvent) -> KeyAction {
    let page = state.page_size.max(1);
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => return KeyAction::Quit,

        KeyCode::Tab | KeyCode::Char('v') => state.switch_view(),

        KeyCode::Up => navigate(state, Motion::Up),
        KeyCode::Down => navigate(state, Motion::Down),
        KeyCode::PageUp => navigate(state, Motion::PageUp(page)),
        KeyCode::PageDown => navigate(state, Motion::PageDown(page)),
        KeyCode::Home => navigate(state, Motion::Home),
        KeyCode::End => navigate(state, Motion::End),

        KeyCode::Char('p') => state.table.set_sort(SortKey::Pid),
        KeyCode::Char('m') => state.table.set_sort(SortKey::Memory),
        KeyCode::Char('c') => state.table.set_sort(SortKey::Cpu),
        KeyCode::Char('i') => state.table.set_sort(SortKey::Io),

        KeyCode::Char('k') => open_kill_confirm(state),

        KeyCode::Char('/') => {
            state.view = View::Processes;
            state.input_mode = InputMode::Filter;
            state.filter_input = state.table.filter.clone().unwrap_or_default();
        }
        KeyCode::Esc if state.table.filter.is_some() => {
            state.filter_input.clear();
            state.table.set_filter(None);
        }

        KeyCode::Char(' ') => {
            state.paused = !state.paused;
            state.set_status(if state.paused { "Paused" } else { "Resumed" });
        }

        KeyCode::Char('?') | KeyCode::Char('h') => state.popup = PopupState::Help { scroll: 0 },

        _ => {}
    }
    KeyAction::None
}

fn navigate(state: &mut AppState, motion: Motion) {
    if state.view != View::Processes {
        return;
    }
    state.table.apply_motion(motion);
    state.table.resolve_selection();
}

fn open_kill_confirm(state: &mut AppState) {
    if state.view != View::Processes {
        state.set_status("Switch to the Processes view to pick a process");
        return;
    }
    match state.table.selected_row() {
        Some(row) => {
            state.popup = PopupState::KillConfirm {
                pid: row.pid,
                name: row.name.clone(),
            }
        }
        None => state.set_status("No process selected"),
    }
}

fn handle_filter_mode(state: &mut AppState, key: KeyEvent) -> KeyAction {
    match key.code {
        KeyCode::Esc => {
            state.input_mode = InputMode::Normal;
            state.filter_input.clear();
            state.table.set_filter(None);
        }
        KeyCode::Enter => {
            // Already applied while typing
            state.input_mode = InputMode::Normal;
        }
        KeyCode::Backspace => {
            state.filter_input.pop();
            apply_filter_input(state);
        }
        KeyCode::Char(c) => {
            state.filter_input.push(c);
            apply_filter_input(state);
        }
        _ => {}
    }
    KeyAction::None
}

fn apply_filter_input(state: &mut AppState) {
    let filter = state.filter_input.clone();
    state.table.set_filter(Some(filter));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Metrics, ProcessMetrics};
    use crossterm::event::{KeyEvent, KeyEventKind, KeyEventState};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent {
            modifiers: KeyModifiers::CONTROL,
            ..key(KeyCode::Char(c))
        }
    }

    fn state_with(processes: &[(u32, &str, u64)]) -> AppState {
        let mut state = AppState::new(View::Processes, SortKey::Pid);
        let metrics = Metrics {
            processes: processes
                .iter()
                .map(|&(pid, name, rss_kb)| ProcessMetrics {
                    pid,
                    name: name.to_string(),
                    rss_kb,
                    ..Default::default()
                })
                .collect(),
            ..Default::default()
        };
        state.apply_metrics(metrics, None);
        state
    }

    fn typed(state: &mut AppState, text: &str) {
        for c in text.chars() {
            handle_key(state, key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn quit_on_q_and_ctrl_c() {
        let mut state = AppState::default();
        assert_eq!(handle_key(&mut state, key(KeyCode::Char('q'))), KeyAction::Quit);
        assert_eq!(handle_key(&mut state, ctrl('c')), KeyAction::Quit);
    }

    #[test]
    fn ctrl_c_quits_even_inside_popup() {
        let mut state = AppState::default();
        state.popup = PopupState::Help { scroll: 0 };
        assert_eq!(handle_key(&mut state, ctrl('c')), KeyAction::Quit);
    }

    #[test]
    fn tab_and_v_switch_views() {
        let mut state = AppState::default();
        handle_key(&mut state, key(KeyCode::Tab));
        assert_eq!(state.view, View::Performance);
        handle_key(&mut state, key(KeyCode::Char('v')));
        assert_eq!(state.view, View::Processes);
    }

    #[test]
    fn sort_keys_reorder_and_keep_selection() {
        let mut state = state_with(&[(1, "init", 10), (2, "big", 500), (3, "mid", 100)]);
        handle_key(&mut state, key(KeyCode::Down));
        assert_eq!(state.table.selected_pid(), Some(2));

        handle_key(&mut state, key(KeyCode::Char('m')));
        assert_eq!(state.table.sort_key, SortKey::Memory);
        assert_eq!(state.table.selected, 0);
        assert_eq!(state.table.selected_pid(), Some(2));

        handle_key(&mut state, key(KeyCode::Char('c')));
        assert_eq!(state.table.sort_key, SortKey::Cpu);
        handle_key(&mut state, key(KeyCode::Char('i')));
        assert_eq!(state.table.sort_key, SortKey::Io);
        handle_key(&mut state, key(KeyCode::Char('p')));
        assert_eq!(state.table.sort_key, SortKey::Pid);
    }

    #[test]
    fn navigation_is_clamped() {
        let mut state = state_with(&[(1, "a", 0), (2, "b", 0), (3, "c", 0)]);
        handle_key(&mut state, key(KeyCode::End));
        assert_eq!(state.table.selected, 2);
        handle_key(&mut state, key(KeyCode::Down));
        assert_eq!(state.table.selected, 2);
        handle_key(&mut state, key(KeyCode::PageUp));
        assert_eq!(state.table.selected, 0);
        handle_key(&mut state, key(KeyCode::Up));
        assert_eq!(state.table.selected, 0);
    }

    #[test]
    fn kill_requires_confirmation() {
        let mut state = state_with(&[(10, "sleep", 0), (20, "yes", 0)]);
        handle_key(&mut state, key(KeyCode::Down));

        assert_eq!(handle_key(&mut state, key(KeyCode::Char('k'))), KeyAction::None);
        assert_eq!(
            state.popup,
            PopupState::KillConfirm {
                pid: 20,
                name: "yes".to_string()
            }
        );

        // q inside the popup does not quit
        assert_eq!(handle_key(&mut state, key(KeyCode::Char('q'))), KeyAction::None);
        assert_eq!(handle_key(&mut state, key(KeyCode::Char('y'))), KeyAction::Kill(20));
        assert_eq!(state.popup, PopupState::None);
    }

    #[test]
    fn kill_confirm_cancels_on_esc_and_n() {
        let mut state = state_with(&[(10, "sleep", 0)]);
        for cancel in [KeyCode::Esc, KeyCode::Char('n')] {
            handle_key(&mut state, key(KeyCode::Char('k')));
            assert!(state.popup.is_open());
            assert_eq!(handle_key(&mut state, key(cancel)), KeyAction::None);
            assert!(!state.popup.is_open());
        }
        handle_key(&mut state, key(KeyCode::Char('k')));
        assert_eq!(handle_key(&mut state, key(KeyCode::Enter)), KeyAction::Kill(10));
    }

    #[test]
    fn kill_without_selection_sets_status() {
        let mut state = state_with(&[]);
        handle_key(&mut state, key(KeyCode::Char('k')));
        assert!(!state.popup.is_open());
        assert_eq!(state.status(), Some("No process selected"));

        let mut state = state_with(&[(1, "init", 0)]);
        state.view = View::Performance;
        handle_key(&mut state, key(KeyCode::Char('k')));
        assert!(!state.popup.is_open());
    }

    #[test]
    fn filter_applies_while_typing() {
        let mut state = state_with(&[(1, "systemd", 0), (2, "bash", 0), (3, "sshd", 0)]);
        handle_key(&mut state, key(KeyCode::Char('/')));
        assert_eq!(state.input_mode, InputMode::Filter);

        // Keys that are commands in normal mode are plain text here
        typed(&mut state, "shd");
        assert_eq!(state.table.rows.len(), 1);
        handle_key(&mut state, key(KeyCode::Backspace));
        assert_eq!(state.table.rows.len(), 2);

        handle_key(&mut state, key(KeyCode::Enter));
        assert_eq!(state.input_mode, InputMode::Normal);
        assert_eq!(state.table.filter.as_deref(), Some("sh"));
    }

    #[test]
    fn filter_esc_clears() {
        let mut state = state_with(&[(1, "systemd", 0), (2, "bash", 0)]);
        handle_key(&mut state, key(KeyCode::Char('/')));
        typed(&mut state, "bash");
        assert_eq!(state.table.rows.len(), 1);

        handle_key(&mut state, key(KeyCode::Esc));
        assert_eq!(state.input_mode, InputMode::Normal);
        assert!(state.table.filter.is_none());
        assert!(state.filter_input.is_empty());
        assert_eq!(state.table.rows.len(), 2);
    }

    #[test]
    fn space_toggles_pause() {
        let mut state = AppState::default();
        handle_key(&mut state, key(KeyCode::Char(' ')));
        assert!(state.paused);
        handle_key(&mut state, key(KeyCode::Char(' ')));
        assert!(!state.paused);
    }

    #[test]
    fn help_toggles_and_scrolls() {
        let mut state = AppState::default();
        handle_key(&mut state, key(KeyCode::Char('?')));
        assert_eq!(state.popup, PopupState::Help { scroll: 0 });

        handle_key(&mut state, key(KeyCode::Down));
        handle_key(&mut state, key(KeyCode::Down));
        handle_key(&mut state, key(KeyCode::Up));
        assert_eq!(state.popup, PopupState::Help { scroll: 1 });

        handle_key(&mut state, key(KeyCode::Char('?')));
        assert_eq!(state.popup, PopupState::None);
    }
}
