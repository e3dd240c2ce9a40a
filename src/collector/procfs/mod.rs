//! Readers for the Linux `/proc` filesystem.

pub mod parser;
mod process;
mod system;

pub use process::{CollectError, ProcessCollector};
pub use system::{SystemCollector, is_physical_disk};
