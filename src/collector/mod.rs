//! Metric source adapters for Linux.
//!
//! Every adapter reads raw cumulative counters and hands them back untouched;
//! turning counters into rates is the job of [`crate::rates`].
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                            Collector                             │
//! │  ┌──────────────────┐  ┌──────────────────┐  ┌────────────────┐  │
//! │  │ ProcessCollector │  │ SystemCollector  │  │  GpuCollector  │  │
//! │  │ - /proc/[pid]/*  │  │ - /proc/stat     │  │  - nvidia-smi  │  │
//! │  └────────┬─────────┘  │ - /proc/meminfo  │  └───────┬────────┘  │
//! │           │            │ - /proc/diskstats│          │           │
//! │           │            │ - /proc/net/dev  │          │           │
//! │           │            └────────┬─────────┘          │           │
//! │    ┌──────▼──────────────────────▼─────┐     ┌───────▼────────┐  │
//! │    │        FileSystem (trait)         │     │ CommandRunner  │  │
//! │    └──────┬─────────────────────┬──────┘     └───┬────────┬───┘  │
//! └───────────┼─────────────────────┼────────────────┼────────┼──────┘
//!      ┌──────▼──────┐       ┌──────▼──────┐   ┌─────▼──┐ ┌───▼────┐
//!      │   RealFs    │       │   MockFs    │   │ System │ │  Mock  │
//!      └─────────────┘       └─────────────┘   └────────┘ └────────┘
//! ```
//!
//! # Usage
//!
//! ```
//! use std::time::Duration;
//! use procmon::collector::{Collector, GpuCollector};
//! use procmon::collector::mock::{MockCommandRunner, MockFs};
//!
//! let gpu = GpuCollector::new(MockCommandRunner::new(), Duration::from_millis(500));
//! let mut collector = Collector::new(MockFs::typical_system(), "/proc", gpu);
//! let sample = collector.collect();
//! assert!(!sample.processes.is_empty());
//! assert!(sample.gpus.is_empty());
//! ```

#[allow(clippy::module_inception)]
mod collector;
pub mod gpu;
pub mod mock;
pub mod procfs;
pub mod traits;

pub use collector::{Collector, CollectorTiming};
pub use gpu::GpuCollector;
pub use procfs::{CollectError, ProcessCollector, SystemCollector};
pub use traits::{CommandRunner, FileSystem, RealFs, SystemCommandRunner};
