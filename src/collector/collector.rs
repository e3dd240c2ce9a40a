//! Main collector that combines process, system and GPU collectors.
//!
//! The `Collector` struct runs every source once per tick and assembles the
//! results into a single [`RawSample`]. It never fails: an unreadable source
//! leaves its family empty and the rest of the sample intact.

use std::time::{Duration, Instant};

use tracing::debug;

use crate::collector::gpu::GpuCollector;
use crate::collector::procfs::{ProcessCollector, SystemCollector};
use crate::collector::traits::{CommandRunner, FileSystem};
use crate::model::RawSample;

/// Timing information for each collector phase.
#[derive(Debug, Clone, Default)]
pub struct CollectorTiming {
    /// Total sample collection time.
    pub total: Duration,
    pub processes: Duration,
    pub cpu: Duration,
    pub memory: Duration,
    /// Load average and uptime.
    pub load: Duration,
    pub disks: Duration,
    pub networks: Duration,
    pub gpus: Duration,
}

/// Main collector that gathers all metric families.
pub struct Collector<F: FileSystem + Clone, R: CommandRunner> {
    process_collector: ProcessCollector<F>,
    system_collector: SystemCollector<F>,
    gpu_collector: GpuCollector<R>,
    /// Timing information from the last `collect` call.
    last_timing: Option<CollectorTiming>,
}

/// Runs `f`, stores its duration in `slot` and returns its result.
fn timed<T>(slot: &mut Duration, f: impl FnOnce() -> T) -> T {
    let start = Instant::now();
    let out = f();
    *slot = start.elapsed();
    out
}

impl<F: FileSystem + Clone, R: CommandRunner> Collector<F, R> {
    /// Creates a new collector.
    ///
    /// # Arguments
    /// * `fs` - Filesystem implementation (real or mock)
    /// * `proc_path` - Base path to proc filesystem (usually "/proc")
    /// * `gpu_collector` - Accelerator source, possibly disabled
    pub fn new(fs: F, proc_path: impl Into<String>, gpu_collector: GpuCollector<R>) -> Self {
        let proc_path = proc_path.into();
        Self {
            process_collector: ProcessCollector::new(fs.clone(), &proc_path),
            system_collector: SystemCollector::new(fs, &proc_path),
            gpu_collector,
            last_timing: None,
        }
    }

    /// Returns timing information from the last `collect` call.
    pub fn last_timing(&self) -> Option<&CollectorTiming> {
        self.last_timing.as_ref()
    }

    pub fn gpu_enabled(&self) -> bool {
        self.gpu_collector.is_enabled()
    }

    /// Collects one complete raw sample.
    ///
    /// Sources are queried sequentially. `collected_at` is stamped right
    /// after `/proc/stat` is read, before the external GPU query.
    pub fn collect(&mut self) -> RawSample {
        let total_start = Instant::now();
        let mut timing = CollectorTiming::default();
        let system = &self.system_collector;

        let processes = timed(&mut timing.processes, || {
            self.process_collector.collect_all_processes()
        })
        .unwrap_or_else(|e| {
            debug!(error = %e, "process list unavailable");
            Vec::new()
        });

        let (cpu, cores) = match timed(&mut timing.cpu, || system.collect_cpu()) {
            Ok((cpu, cores)) => (Some(cpu), cores),
            Err(e) => {
                debug!(error = %e, "cpu times unavailable");
                (None, Vec::new())
            }
        };
        let collected_at = Instant::now();

        let memory = timed(&mut timing.memory, || system.collect_memory())
            .inspect_err(|e| debug!(error = %e, "meminfo unavailable"))
            .ok();

        let (load, uptime_secs) = timed(&mut timing.load, || {
            (system.collect_loadavg().ok(), system.collect_uptime().ok())
        });

        let disks = timed(&mut timing.disks, || system.collect_disks()).unwrap_or_else(|e| {
            debug!(error = %e, "diskstats unavailable");
            Vec::new()
        });

        let networks =
            timed(&mut timing.networks, || system.collect_networks()).unwrap_or_else(|e| {
                debug!(error = %e, "net/dev unavailable");
                Vec::new()
            });

        let gpus = timed(&mut timing.gpus, || self.gpu_collector.collect());

        timing.total = total_start.elapsed();
        self.last_timing = Some(timing);

        RawSample {
            collected_at,
            processes,
            cpu,
            cores,
            memory,
            load,
            uptime_secs,
            disks,
            networks,
            gpus,
        }
    }
}
