//! Main TUI application.

use std::io;
use std::time::{Duration, Instant};

use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing::{debug, info, warn};

use crate::provider::MetricsProvider;

use super::event::{Event, EventHandler};
use super::input::{KeyAction, handle_key};
use super::render::render;
use super::state::AppState;

/// Main TUI application.
pub struct App {
    provider: Box<dyn MetricsProvider>,
    state: AppState,
    should_quit: bool,
}

impl App {
    /// Creates a new App with the given provider and initial UI state.
    pub fn new(provider: Box<dyn MetricsProvider>, state: AppState) -> Self {
        Self {
            provider,
            state,
            should_quit: false,
        }
    }

    /// Runs the TUI application until the user quits.
    pub fn run(mut self, tick_rate: Duration) -> io::Result<()> {
        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        info!(interval_ms = tick_rate.as_millis() as u64, "tui started");
        let result = self.event_loop(&mut terminal, tick_rate);

        // Restore terminal even when the loop failed
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        info!("tui stopped");
        result
    }

    fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
        tick_rate: Duration,
    ) -> io::Result<()> {
        let mut events = EventHandler::new(tick_rate);

        // Initial sample; every rate is zero until the second tick
        self.advance();

        loop {
            self.state.expire_status(Instant::now());
            terminal.draw(|frame| render(frame, &mut self.state))?;

            match events.next()? {
                Event::Tick => {
                    if !self.state.paused {
                        self.advance();
                    }
                }
                Event::Key(key) => match handle_key(&mut self.state, key) {
                    KeyAction::Quit => self.should_quit = true,
                    KeyAction::Kill(pid) => self.terminate(pid),
                    KeyAction::None => {}
                },
                Event::Resize(width, height) => {
                    debug!(width, height, "terminal resized");
                }
            }

            if self.should_quit {
                return Ok(());
            }
        }
    }

    /// Runs one sampling tick and hands the result to the UI state.
    fn advance(&mut self) {
        let metrics = self.provider.advance().clone();
        let timing = self.provider.collector_timing().cloned();
        self.state.apply_metrics(metrics, timing);
    }

    /// Sends SIGTERM and returns at once; the next tick shows the outcome.
    fn terminate(&mut self, pid: u32) {
        match send_sigterm(pid) {
            Ok(()) => {
                info!(pid, "sent SIGTERM");
                self.state.set_status(format!("Sent SIGTERM to {}", pid));
            }
            Err(e) => {
                warn!(pid, error = %e, "failed to send SIGTERM");
                self.state
                    .set_status(format!("Failed to terminate {}: {}", pid, e));
            }
        }
    }
}

/// Delivers SIGTERM to `pid` without waiting for it to exit.
pub fn send_sigterm(pid: u32) -> io::Result<()> {
    let pid = libc::pid_t::try_from(pid)
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "pid out of range"))?;
    // pid 0 and negative pids address process groups
    if pid <= 0 {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "refusing to signal a process group",
        ));
    }
    // SAFETY: kill(2) has no memory-safety preconditions.
    let rc = unsafe { libc::kill(pid, libc::SIGTERM) };
    if rc == 0 {
        Ok(())
    } else {
        Err(io::Error::last_os_error())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_send_sigterm_rejects_group_pids() {
        let err = send_sigterm(0).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
        let err = send_sigterm(u32::MAX).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_send_sigterm_to_child() {
        let mut child = std::process::Command::new("sleep")
            .arg("30")
            .spawn()
            .unwrap();
        send_sigterm(child.id()).unwrap();
        let status = child.wait().unwrap();
        assert!(!status.success());
    }
}
