//! procmon - interactive terminal process and hardware monitor.
//!
//! This library provides:
//! - metric source adapters for `/proc` and `nvidia-smi` ([`collector`])
//! - the sampling and delta engine turning counters into rates ([`rates`])
//! - process ordering ([`ranking`])
//! - the TUI and the headless JSON-lines mode used by the `procmon` binary

pub mod batch;
pub mod collector;
pub mod fmt;
pub mod model;
pub mod provider;
pub mod ranking;
pub mod rates;
pub mod tui;
