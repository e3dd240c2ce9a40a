//! Live data provider for real-time system monitoring.

use crate::collector::traits::{CommandRunner, FileSystem};
use crate::collector::{Collector, CollectorTiming};
use crate::model::Metrics;
use crate::rates::RateEngine;

use super::MetricsProvider;
use tracing::trace;

/// Provider for real-time system data collection.
///
/// Each `advance` collects a raw sample and feeds it to the rate engine,
/// keeping only the resulting metrics.
pub struct LiveProvider<F: FileSystem + Clone, R: CommandRunner> {
    collector: Collector<F, R>,
    engine: RateEngine,
    current: Option<Metrics>,
}

impl<F: FileSystem + Clone, R: CommandRunner> LiveProvider<F, R> {
    pub fn new(collector: Collector<F, R>) -> Self {
        Self {
            collector,
            engine: RateEngine::new(),
            current: None,
        }
    }
}

impl<F: FileSystem + Clone, R: CommandRunner> MetricsProvider for LiveProvider<F, R> {
    fn current(&self) -> Option<&Metrics> {
        self.current.as_ref()
    }

    fn advance(&mut self) -> &Metrics {
        let sample = self.collector.collect();
        trace!(
            processes = sample.processes.len(),
            disks = sample.disks.len(),
            networks = sample.networks.len(),
            gpus = sample.gpus.len(),
            "collected sample"
        );
        self.current.insert(self.engine.update(sample))
    }

    fn collector_timing(&self) -> Option<&CollectorTiming> {
        self.collector.last_timing()
    }
}
