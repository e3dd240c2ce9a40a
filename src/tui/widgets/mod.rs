//! TUI widgets for procmon.

mod header;
mod help;
mod kill_confirm;
mod performance;
mod processes;

pub use header::{render_footer, render_header};
pub use help::render_help;
pub use kill_confirm::render_kill_confirm;
pub use performance::render_performance;
pub use processes::render_processes;
