//! Terminal user interface.
//!
//! Two views over the same per-tick [`Metrics`](crate::model::Metrics): a
//! sortable, filterable process table and a performance overview with CPU,
//! memory, GPU, disk and network panels. The loop is single-threaded; see
//! [`event`] for how ticks and key presses share it.

mod app;
pub mod event;
mod input;
mod navigable;
mod render;
mod state;
mod style;
mod table;
mod widgets;

pub use app::{App, send_sigterm};
pub use state::{AppState, InputMode, PopupState, View};
pub use table::ProcessTable;
