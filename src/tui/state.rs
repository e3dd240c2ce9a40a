//! Application state management.

use std::time::Instant;

use ratatui::widgets::TableState as RatatuiTableState;

use crate::collector::CollectorTiming;
use crate::model::Metrics;
use crate::ranking::SortKey;

pub use super::table::ProcessTable;

/// How long a status message stays in the header.
pub const STATUS_TTL_SECS: u64 = 5;

/// Top-level views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum View {
    #[default]
    Processes,
    Performance,
}

impl View {
    pub fn all() -> &'static [View] {
        &[View::Processes, View::Performance]
    }

    /// Returns the display name of the view.
    pub fn name(&self) -> &'static str {
        match self {
            View::Processes => "Processes",
            View::Performance => "Performance",
        }
    }

    /// Returns the next view.
    pub fn next(&self) -> View {
        match self {
            View::Processes => View::Performance,
            View::Performance => View::Processes,
        }
    }
}

impl std::str::FromStr for View {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "processes" | "proc" => Ok(View::Processes),
            "performance" | "perf" => Ok(View::Performance),
            other => Err(format!(
                "unknown view '{}', expected processes or performance",
                other
            )),
        }
    }
}

/// Input mode for the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    Filter,
}

/// Active popup state. Only one popup can be open at a time.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PopupState {
    #[default]
    None,
    /// Help popup with scroll offset.
    Help { scroll: usize },
    /// Terminate confirmation for one process.
    KillConfirm { pid: u32, name: String },
}

impl PopupState {
    /// Returns true if any popup is open (excluding None).
    pub fn is_open(&self) -> bool {
        !matches!(self, Self::None)
    }
}

/// Main application state.
#[derive(Debug, Default)]
pub struct AppState {
    /// Current active view.
    pub view: View,
    /// Input mode.
    pub input_mode: InputMode,
    /// Filter input buffer.
    pub filter_input: String,
    /// Process table state.
    pub table: ProcessTable,
    /// Metrics of the last tick.
    pub metrics: Option<Metrics>,
    /// Sampling is suspended while paused; the last metrics stay on screen.
    pub paused: bool,
    /// Active popup state. Only one popup can be open at a time.
    pub popup: PopupState,
    /// Temporary status message shown in the header, with the time it was set.
    pub status_message: Option<(String, Instant)>,
    /// Collector timing of the last tick.
    pub timing: Option<CollectorTiming>,
    /// Whether the accelerator adapter is enabled at all.
    pub gpu_enabled: bool,
    /// Ratatui table state for the process list (enables auto-scrolling).
    pub table_state: RatatuiTableState,
    /// Rows that fit the process table, updated on every draw.
    pub page_size: usize,
}

impl AppState {
    pub fn new(view: View, sort_key: SortKey) -> Self {
        Self {
            view,
            table: ProcessTable::new(sort_key),
            page_size: 10,
            ..Default::default()
        }
    }

    /// Takes over the metrics of a new tick.
    pub fn apply_metrics(&mut self, metrics: Metrics, timing: Option<CollectorTiming>) {
        self.table.update(&metrics.processes);
        self.metrics = Some(metrics);
        self.timing = timing;
    }

    pub fn switch_view(&mut self) {
        self.view = self.view.next();
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some((message.into(), Instant::now()));
    }

    /// Drops the status message once it is older than [`STATUS_TTL_SECS`].
    pub fn expire_status(&mut self, now: Instant) {
        let expired = self
            .status_message
            .as_ref()
            .is_some_and(|(_, at)| now.saturating_duration_since(*at).as_secs() >= STATUS_TTL_SECS);
        if expired {
            self.status_message = None;
        }
    }

    pub fn status(&self) -> Option<&str> {
        self.status_message.as_ref().map(|(m, _)| m.as_str())
    }
}
