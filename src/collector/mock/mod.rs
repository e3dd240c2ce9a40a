//! Mock data sources for tests.

mod command;
mod filesystem;
pub mod scenarios;

pub use command::MockCommandRunner;
pub use filesystem::MockFs;
