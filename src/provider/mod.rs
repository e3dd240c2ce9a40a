//! Provider abstraction for metrics sources.
//!
//! This module defines the `MetricsProvider` trait that lets the TUI and the
//! batch printer drive sampling without knowing where samples come from.

mod live;

pub use live::LiveProvider;

use crate::collector::CollectorTiming;
use crate::model::Metrics;

/// Source of per-tick [`Metrics`].
///
/// The trait is object-safe and designed to be used with `Box<dyn MetricsProvider>`.
pub trait MetricsProvider {
    /// Returns the metrics of the last tick, if any tick has run yet.
    fn current(&self) -> Option<&Metrics>;

    /// Runs one sampling tick and returns its metrics.
    ///
    /// Never fails: sources that cannot be read show up as empty or zeroed
    /// families in the result.
    fn advance(&mut self) -> &Metrics;

    /// Returns timing information from the last collection, if known.
    fn collector_timing(&self) -> Option<&CollectorTiming> {
        None
    }
}
