//! Rate computation from consecutive raw samples.
//!
//! This module is the single place where cumulative counters become
//! per-second rates and percentages. [`RateEngine`] owns every piece of
//! previous-sample state; nothing here is global, so independent engines
//! never observe each other.

use std::collections::HashMap;
use std::hash::Hash;
use std::time::Instant;

use tracing::trace;

use crate::model::{
    CoreUsage, CpuMetrics, DiskMetrics, MemoryMetrics, Metrics, NetworkMetrics, ProcessMetrics,
    RawSample, SystemCpuTimes,
};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Size of a `/proc/diskstats` sector, independent of the device's real sector size.
pub const SECTOR_SIZE: f64 = 512.0;

/// Bytes per KiB. All byte rates are reported in KiB/s.
pub const KIB: f64 = 1024.0;

// ---------------------------------------------------------------------------
// Delta helpers
// ---------------------------------------------------------------------------

/// Compute u64 delta, returning `None` on counter regression (reset or wrap).
pub fn du64(curr: u64, prev: u64) -> Option<u64> {
    curr.checked_sub(prev)
}

/// Converts a counter delta into a per-second rate.
///
/// Yields 0 for a missing delta (new entity or regression) and for a
/// non-positive interval, so the result is always finite and non-negative.
pub fn rate(delta: Option<u64>, factor: f64, elapsed_secs: f64) -> f64 {
    match delta {
        Some(d) if elapsed_secs > 0.0 => d as f64 * factor / elapsed_secs,
        _ => 0.0,
    }
}

/// Busy share of a CPU tick interval: `100 * (total - idle) / total`.
///
/// Returns 0 when the total delta is not positive or either counter went
/// backwards.
pub fn busy_percent(total_delta: Option<u64>, idle_delta: Option<u64>) -> f64 {
    let (Some(total), Some(idle)) = (total_delta, idle_delta) else {
        return 0.0;
    };
    if total == 0 {
        return 0.0;
    }
    let busy = total.saturating_sub(idle);
    (busy as f64 / total as f64 * 100.0).clamp(0.0, 100.0)
}

// ---------------------------------------------------------------------------
// DeltaTracker
// ---------------------------------------------------------------------------

/// Remembers the last counters of each entity between two ticks.
///
/// `N` is the number of counters tracked per entity. A tick is processed in
/// two steps: [`DeltaTracker::delta`] for every current entity, then
/// [`DeltaTracker::commit`] with the current counters. Entities missing from
/// the committed map are forgotten.
#[derive(Debug)]
pub struct DeltaTracker<K, const N: usize> {
    prev: HashMap<K, [u64; N]>,
}

impl<K, const N: usize> Default for DeltaTracker<K, N> {
    fn default() -> Self {
        Self {
            prev: HashMap::new(),
        }
    }
}

impl<K: Eq + Hash, const N: usize> DeltaTracker<K, N> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Component-wise deltas against the previous tick.
    ///
    /// Returns `None` for an entity seen for the first time. Inside the array
    /// a component is `None` when that counter regressed.
    pub fn delta(&self, key: &K, curr: &[u64; N]) -> Option<[Option<u64>; N]> {
        let prev = self.prev.get(key)?;
        Some(std::array::from_fn(|i| du64(curr[i], prev[i])))
    }

    /// Replaces the remembered counters with those of the current tick.
    pub fn commit(&mut self, current: HashMap<K, [u64; N]>) {
        self.prev = current;
    }
}

/// Splits a per-entity delta into its components, treating "first seen" as
/// "no delta" for every component.
fn components<const N: usize>(delta: Option<[Option<u64>; N]>) -> [Option<u64>; N] {
    delta.unwrap_or([None; N])
}

// ---------------------------------------------------------------------------
// RateEngine
// ---------------------------------------------------------------------------

/// Turns a stream of [`RawSample`]s into [`Metrics`].
#[derive(Debug, Default)]
pub struct RateEngine {
    prev_at: Option<Instant>,
    prev_cpu: Option<SystemCpuTimes>,
    /// core id -> [total, idle]
    cores: DeltaTracker<u32, 2>,
    /// pid -> [utime + stime, read bytes, write bytes]
    processes: DeltaTracker<u32, 3>,
    /// device -> [sectors read, sectors written]
    disks: DeltaTracker<String, 2>,
    /// interface -> [rx bytes, tx bytes]
    networks: DeltaTracker<String, 2>,
}

impl RateEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consumes the next sample and returns metrics relative to the previous one.
    ///
    /// Previous-sample state is replaced only after every rate of this tick
    /// has been computed.
    pub fn update(&mut self, sample: RawSample) -> Metrics {
        let elapsed_secs = self
            .prev_at
            .and_then(|prev| sample.collected_at.checked_duration_since(prev))
            .map(|d| d.as_secs_f64())
            .unwrap_or(0.0);
        if self.prev_at.is_some() && elapsed_secs <= 0.0 {
            trace!("non-positive sampling interval, rates forced to zero");
        }

        let (cpu, system_delta) = self.update_cpu(&sample);
        let processes = self.update_processes(&sample, system_delta, elapsed_secs);
        let disks = self.update_disks(&sample, elapsed_secs);
        let networks = self.update_networks(&sample, elapsed_secs);

        self.prev_at = Some(sample.collected_at);

        Metrics {
            elapsed_secs,
            cpu,
            memory: sample
                .memory
                .as_ref()
                .map(MemoryMetrics::from_snapshot)
                .unwrap_or_default(),
            load: sample.load,
            uptime_secs: sample.uptime_secs,
            processes,
            disks,
            networks,
            gpus: sample.gpus,
        }
    }

    /// Returns CPU metrics and the system-wide total tick delta.
    fn update_cpu(&mut self, sample: &RawSample) -> (CpuMetrics, Option<u64>) {
        let (total_delta, idle_delta) = match (self.prev_cpu, sample.cpu) {
            (Some(prev), Some(curr)) => (
                du64(curr.total_ticks, prev.total_ticks),
                du64(curr.idle_ticks, prev.idle_ticks),
            ),
            _ => (None, None),
        };
        if self.prev_cpu.is_some() && sample.cpu.is_some() && total_delta.is_none() {
            trace!("cpu tick counter regressed");
        }
        self.prev_cpu = sample.cpu;

        let mut next = HashMap::with_capacity(sample.cores.len());
        let per_core = sample
            .cores
            .iter()
            .map(|core| {
                let curr = [core.times.total_ticks, core.times.idle_ticks];
                let [total, idle] = components(self.cores.delta(&core.core, &curr));
                next.insert(core.core, curr);
                CoreUsage {
                    core: core.core,
                    usage_percent: busy_percent(total, idle),
                }
            })
            .collect();
        self.cores.commit(next);

        let cpu = CpuMetrics {
            usage_percent: busy_percent(total_delta, idle_delta),
            per_core,
        };
        (cpu, total_delta)
    }

    fn update_processes(
        &mut self,
        sample: &RawSample,
        system_delta: Option<u64>,
        elapsed_secs: f64,
    ) -> Vec<ProcessMetrics> {
        let mut next = HashMap::with_capacity(sample.processes.len());

        let metrics = sample
            .processes
            .iter()
            .map(|p| {
                let curr = [p.cpu_ticks(), p.read_bytes, p.write_bytes];
                let [ticks, read, write] = components(self.processes.delta(&p.pid, &curr));
                next.insert(p.pid, curr);

                let cpu_usage_percent = match (ticks, system_delta) {
                    (Some(t), Some(total)) if total > 0 => {
                        (t as f64 / total as f64 * 100.0).clamp(0.0, 100.0)
                    }
                    _ => 0.0,
                };

                ProcessMetrics {
                    pid: p.pid,
                    ppid: p.ppid,
                    name: p.name.clone(),
                    state: p.state,
                    rss_kb: p.rss_kb,
                    threads: p.threads,
                    cpu_usage_percent,
                    io_read_rate: rate(read, 1.0 / KIB, elapsed_secs),
                    io_write_rate: rate(write, 1.0 / KIB, elapsed_secs),
                }
            })
            .collect();

        self.processes.commit(next);
        metrics
    }

    fn update_disks(&mut self, sample: &RawSample, elapsed_secs: f64) -> Vec<DiskMetrics> {
        let mut next = HashMap::with_capacity(sample.disks.len());

        let metrics = sample
            .disks
            .iter()
            .map(|d| {
                let curr = [d.sectors_read, d.sectors_written];
                let [read, write] = components(self.disks.delta(&d.name, &curr));
                next.insert(d.name.clone(), curr);
                DiskMetrics {
                    name: d.name.clone(),
                    read_rate: rate(read, SECTOR_SIZE / KIB, elapsed_secs),
                    write_rate: rate(write, SECTOR_SIZE / KIB, elapsed_secs),
                }
            })
            .collect();

        self.disks.commit(next);
        metrics
    }

    fn update_networks(&mut self, sample: &RawSample, elapsed_secs: f64) -> Vec<NetworkMetrics> {
        let mut next = HashMap::with_capacity(sample.networks.len());

        let metrics = sample
            .networks
            .iter()
            .map(|n| {
                let curr = [n.rx_bytes, n.tx_bytes];
                let [rx, tx] = components(self.networks.delta(&n.name, &curr));
                next.insert(n.name.clone(), curr);
                NetworkMetrics {
                    name: n.name.clone(),
                    rx_rate: rate(rx, 1.0 / KIB, elapsed_secs),
                    tx_rate: rate(tx, 1.0 / KIB, elapsed_secs),
                }
            })
            .collect();

        self.networks.commit(next);
        metrics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        CoreCpuTimes, DiskCounters, GpuSnapshot, MemorySnapshot, NetworkCounters, ProcessSnapshot,
    };
    use std::time::Duration;

    fn cpu(total: u64, idle: u64) -> SystemCpuTimes {
        SystemCpuTimes {
            total_ticks: total,
            idle_ticks: idle,
        }
    }

    fn snap(pid: u32, ticks: u64, read: u64, write: u64) -> ProcessSnapshot {
        ProcessSnapshot {
            pid,
            name: format!("p{}", pid),
            state: 'S',
            utime: ticks,
            read_bytes: read,
            write_bytes: write,
            ..Default::default()
        }
    }

    fn disk(name: &str, read: u64, written: u64) -> DiskCounters {
        DiskCounters {
            name: name.to_string(),
            sectors_read: read,
            sectors_written: written,
        }
    }

    fn net(name: &str, rx: u64, tx: u64) -> NetworkCounters {
        NetworkCounters {
            name: name.to_string(),
            rx_bytes: rx,
            tx_bytes: tx,
        }
    }

    fn sample_at(at: Instant) -> RawSample {
        RawSample::empty(at)
    }

    #[test]
    fn test_du64() {
        assert_eq!(du64(10, 3), Some(7));
        assert_eq!(du64(3, 3), Some(0));
        assert_eq!(du64(3, 10), None);
    }

    #[test]
    fn test_rate_guards() {
        assert_eq!(rate(Some(2048), 1.0 / KIB, 2.0), 1.0);
        assert_eq!(rate(None, 1.0, 1.0), 0.0);
        assert_eq!(rate(Some(100), 1.0, 0.0), 0.0);
        assert_eq!(rate(Some(100), 1.0, -1.0), 0.0);
    }

    #[test]
    fn test_busy_percent() {
        assert_eq!(busy_percent(Some(500), Some(100)), 80.0);
        assert_eq!(busy_percent(Some(0), Some(0)), 0.0);
        assert_eq!(busy_percent(None, Some(1)), 0.0);
        // idle moving more than total is clamped, never negative
        assert_eq!(busy_percent(Some(10), Some(20)), 0.0);
    }

    #[test]
    fn test_delta_tracker_lifecycle() {
        let mut t: DeltaTracker<&str, 2> = DeltaTracker::new();
        assert!(t.delta(&"a", &[1, 1]).is_none());

        t.commit(HashMap::from([("a", [10, 20]), ("b", [5, 5])]));
        assert_eq!(t.delta(&"a", &[15, 18]), Some([Some(5), None]));
        assert_eq!(t.delta(&"b", &[5, 9]), Some([Some(0), Some(4)]));

        t.commit(HashMap::from([("a", [15, 18])]));
        assert!(t.delta(&"b", &[6, 6]).is_none());
    }

    #[test]
    fn test_system_cpu_percent() {
        let t0 = Instant::now();
        let mut engine = RateEngine::new();

        let mut s1 = sample_at(t0);
        s1.cpu = Some(cpu(1000, 800));
        let first = engine.update(s1);
        assert_eq!(first.cpu.usage_percent, 0.0);
        assert_eq!(first.elapsed_secs, 0.0);

        let mut s2 = sample_at(t0 + Duration::from_secs(1));
        s2.cpu = Some(cpu(1500, 900));
        let second = engine.update(s2);
        assert!((second.cpu.usage_percent - 80.0).abs() < 1e-9);
        assert!((second.elapsed_secs - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_system_cpu_zero_total_delta() {
        let t0 = Instant::now();
        let mut engine = RateEngine::new();

        let mut s1 = sample_at(t0);
        s1.cpu = Some(cpu(1000, 800));
        engine.update(s1);

        let mut s2 = sample_at(t0 + Duration::from_secs(1));
        s2.cpu = Some(cpu(1000, 800));
        let m = engine.update(s2);
        assert_eq!(m.cpu.usage_percent, 0.0);
        assert!(!m.cpu.usage_percent.is_nan());
    }

    #[test]
    fn test_system_cpu_counter_reset() {
        let t0 = Instant::now();
        let mut engine = RateEngine::new();

        let mut s1 = sample_at(t0);
        s1.cpu = Some(cpu(100_000, 80_000));
        engine.update(s1);

        let mut s2 = sample_at(t0 + Duration::from_secs(1));
        s2.cpu = Some(cpu(500, 400));
        assert_eq!(engine.update(s2).cpu.usage_percent, 0.0);

        // After the reset the new baseline is used.
        let mut s3 = sample_at(t0 + Duration::from_secs(2));
        s3.cpu = Some(cpu(1000, 650));
        assert!((engine.update(s3).cpu.usage_percent - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_per_core_usage() {
        let t0 = Instant::now();
        let mut engine = RateEngine::new();

        let mut s1 = sample_at(t0);
        s1.cpu = Some(cpu(200, 100));
        s1.cores = vec![
            CoreCpuTimes { core: 0, times: cpu(100, 50) },
            CoreCpuTimes { core: 1, times: cpu(100, 50) },
        ];
        let first = engine.update(s1);
        assert_eq!(first.cpu.per_core.len(), 2);
        assert!(first.cpu.per_core.iter().all(|c| c.usage_percent == 0.0));

        let mut s2 = sample_at(t0 + Duration::from_secs(1));
        s2.cpu = Some(cpu(400, 200));
        s2.cores = vec![
            CoreCpuTimes { core: 0, times: cpu(200, 50) },
            CoreCpuTimes { core: 1, times: cpu(200, 150) },
        ];
        let m = engine.update(s2);
        assert_eq!(m.cpu.per_core[0].usage_percent, 100.0);
        assert_eq!(m.cpu.per_core[1].usage_percent, 0.0);
        assert_eq!(m.cpu.usage_percent, 50.0);
    }

    #[test]
    fn test_process_io_rate_formula() {
        let t0 = Instant::now();
        let mut engine = RateEngine::new();

        let mut s1 = sample_at(t0);
        s1.processes = vec![snap(10, 0, 1_000, 5_000)];
        engine.update(s1);

        let mut s2 = sample_at(t0 + Duration::from_secs(2));
        s2.processes = vec![snap(10, 0, 1_000 + 4096, 5_000 + 10_240)];
        let m = engine.update(s2);

        let p = &m.processes[0];
        assert!((p.io_read_rate - 2.0).abs() < 1e-9);
        assert!((p.io_write_rate - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_process_cpu_share_of_system_delta() {
        let t0 = Instant::now();
        let mut engine = RateEngine::new();

        let mut s1 = sample_at(t0);
        s1.cpu = Some(cpu(10_000, 8_000));
        s1.processes = vec![snap(1, 100, 0, 0), snap(2, 50, 0, 0)];
        engine.update(s1);

        let mut s2 = sample_at(t0 + Duration::from_secs(1));
        s2.cpu = Some(cpu(10_400, 8_100));
        s2.processes = vec![snap(1, 200, 0, 0), snap(2, 50, 0, 0)];
        let m = engine.update(s2);

        assert!((m.processes[0].cpu_usage_percent - 25.0).abs() < 1e-9);
        assert_eq!(m.processes[1].cpu_usage_percent, 0.0);
    }

    #[test]
    fn test_process_cpu_without_system_cpu_is_zero() {
        let t0 = Instant::now();
        let mut engine = RateEngine::new();

        let mut s1 = sample_at(t0);
        s1.processes = vec![snap(1, 100, 0, 0)];
        engine.update(s1);

        let mut s2 = sample_at(t0 + Duration::from_secs(1));
        s2.processes = vec![snap(1, 900, 0, 0)];
        assert_eq!(engine.update(s2).processes[0].cpu_usage_percent, 0.0);
    }

    #[test]
    fn test_process_cpu_clamped_to_100() {
        let t0 = Instant::now();
        let mut engine = RateEngine::new();

        let mut s1 = sample_at(t0);
        s1.cpu = Some(cpu(1000, 0));
        s1.processes = vec![snap(1, 0, 0, 0)];
        engine.update(s1);

        // Process ticks and system ticks are read at slightly different
        // instants and can disagree.
        let mut s2 = sample_at(t0 + Duration::from_secs(1));
        s2.cpu = Some(cpu(1100, 0));
        s2.processes = vec![snap(1, 150, 0, 0)];
        assert_eq!(engine.update(s2).processes[0].cpu_usage_percent, 100.0);
    }

    #[test]
    fn test_new_process_has_zero_rates() {
        let t0 = Instant::now();
        let mut engine = RateEngine::new();

        let mut s1 = sample_at(t0);
        s1.cpu = Some(cpu(1000, 500));
        s1.processes = vec![snap(1, 10, 10, 10)];
        engine.update(s1);

        let mut s2 = sample_at(t0 + Duration::from_secs(1));
        s2.cpu = Some(cpu(2000, 1000));
        s2.processes = vec![snap(1, 20, 20, 20), snap(99, 500, u64::MAX / 2, 123_456_789)];
        let m = engine.update(s2);

        let newcomer = m.processes.iter().find(|p| p.pid == 99).unwrap();
        assert_eq!(newcomer.cpu_usage_percent, 0.0);
        assert_eq!(newcomer.io_read_rate, 0.0);
        assert_eq!(newcomer.io_write_rate, 0.0);
    }

    #[test]
    fn test_process_counter_regression_clamps_component() {
        let t0 = Instant::now();
        let mut engine = RateEngine::new();

        let mut s1 = sample_at(t0);
        s1.processes = vec![snap(5, 0, 10_000, 10_000)];
        engine.update(s1);

        let mut s2 = sample_at(t0 + Duration::from_secs(1));
        s2.processes = vec![snap(5, 0, 0, 10_000 + 1024)];
        let p = engine.update(s2).processes.remove(0);
        assert_eq!(p.io_read_rate, 0.0);
        assert!((p.io_write_rate - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_vanished_process_is_forgotten() {
        let t0 = Instant::now();
        let mut engine = RateEngine::new();

        let mut s1 = sample_at(t0);
        s1.processes = vec![snap(7, 0, 1000, 0)];
        engine.update(s1);

        let s2 = sample_at(t0 + Duration::from_secs(1));
        assert!(engine.update(s2).processes.is_empty());
        assert!(engine.processes.delta(&7, &[0, 1000, 0]).is_none());

        // A recycled pid starts from scratch instead of diffing a ghost.
        let mut s3 = sample_at(t0 + Duration::from_secs(2));
        s3.processes = vec![snap(7, 0, 5000, 0)];
        assert_eq!(engine.update(s3).processes[0].io_read_rate, 0.0);
    }

    #[test]
    fn test_disk_rate_formula() {
        let t0 = Instant::now();
        let mut engine = RateEngine::new();

        let mut s1 = sample_at(t0);
        s1.disks = vec![disk("sda", 1000, 0)];
        engine.update(s1);

        let mut s2 = sample_at(t0 + Duration::from_secs(2));
        s2.disks = vec![disk("sda", 1200, 0)];
        let m = engine.update(s2);

        assert!((m.disks[0].read_rate - 50.0).abs() < 1e-9);
        assert_eq!(m.disks[0].write_rate, 0.0);
    }

    #[test]
    fn test_disk_appears_and_disappears() {
        let t0 = Instant::now();
        let mut engine = RateEngine::new();

        let mut s1 = sample_at(t0);
        s1.disks = vec![disk("sda", 100, 100)];
        engine.update(s1);

        let mut s2 = sample_at(t0 + Duration::from_secs(1));
        s2.disks = vec![disk("sdb", 5000, 5000)];
        let m = engine.update(s2);
        assert_eq!(m.disks.len(), 1);
        assert_eq!(m.disks[0].name, "sdb");
        assert_eq!(m.disks[0].read_rate, 0.0);
        assert!(engine.disks.delta(&"sda".to_string(), &[100, 100]).is_none());
    }

    #[test]
    fn test_network_rates_and_reset() {
        let t0 = Instant::now();
        let mut engine = RateEngine::new();

        let mut s1 = sample_at(t0);
        s1.networks = vec![net("eth0", 10_240, 20_480)];
        engine.update(s1);

        let mut s2 = sample_at(t0 + Duration::from_millis(500));
        s2.networks = vec![net("eth0", 10_240 + 1024, 0)];
        let m = engine.update(s2);
        assert!((m.networks[0].rx_rate - 2.0).abs() < 1e-9);
        assert_eq!(m.networks[0].tx_rate, 0.0);
    }

    #[test]
    fn test_rates_never_negative_for_increasing_counters() {
        let t0 = Instant::now();
        let mut engine = RateEngine::new();
        let steps = [(0u64, 0u64), (512, 3), (512, 9), (100_000, 10), (100_001, 4_000_000)];

        for (i, (rx, tx)) in steps.iter().enumerate() {
            let mut s = sample_at(t0 + Duration::from_millis(250 * i as u64));
            s.networks = vec![net("lo", *rx, *tx)];
            let m = engine.update(s);
            let n = &m.networks[0];
            if i > 0 {
                let (prx, ptx) = steps[i - 1];
                let dt = 0.25;
                assert!((n.rx_rate - (rx - prx) as f64 / KIB / dt).abs() < 1e-6);
                assert!((n.tx_rate - (tx - ptx) as f64 / KIB / dt).abs() < 1e-6);
            }
            assert!(n.rx_rate >= 0.0 && n.tx_rate >= 0.0);
        }
    }

    #[test]
    fn test_zero_elapsed_gives_zero_rates() {
        let t0 = Instant::now();
        let mut engine = RateEngine::new();

        let mut s1 = sample_at(t0);
        s1.disks = vec![disk("sda", 0, 0)];
        engine.update(s1);

        let mut s2 = sample_at(t0);
        s2.disks = vec![disk("sda", 1000, 1000)];
        let m = engine.update(s2);
        assert_eq!(m.elapsed_secs, 0.0);
        assert_eq!(m.disks[0].read_rate, 0.0);
        assert!(m.disks[0].read_rate.is_finite());
    }

    #[test]
    fn test_backwards_clock_gives_zero_rates() {
        let t0 = Instant::now() + Duration::from_secs(10);
        let mut engine = RateEngine::new();

        let mut s1 = sample_at(t0);
        s1.networks = vec![net("eth0", 0, 0)];
        engine.update(s1);

        let mut s2 = sample_at(t0 - Duration::from_secs(1));
        s2.networks = vec![net("eth0", 4096, 4096)];
        let m = engine.update(s2);
        assert_eq!(m.networks[0].rx_rate, 0.0);
    }

    #[test]
    fn test_memory_and_passthrough_families() {
        let mut engine = RateEngine::new();
        let mut s = sample_at(Instant::now());
        s.memory = Some(MemorySnapshot {
            total_kb: 1000,
            available_kb: 400,
            ..Default::default()
        });
        s.uptime_secs = Some(42.0);
        let m = engine.update(s);

        assert!((m.memory.usage_percent - 60.0).abs() < 1e-9);
        assert_eq!(m.memory.used_kb, 600);
        assert_eq!(m.uptime_secs, Some(42.0));
    }

    #[test]
    fn test_gpu_absence_does_not_affect_other_families() {
        let t0 = Instant::now();
        let build = |at: Instant, gpus: Vec<GpuSnapshot>, rx: u64| {
            let mut s = sample_at(at);
            s.cpu = Some(cpu(1000 + rx, 500));
            s.networks = vec![net("eth0", rx, 0)];
            s.gpus = gpus;
            s
        };
        let gpu = GpuSnapshot {
            index: 0,
            name: "T4".into(),
            utilization_percent: 50.0,
            memory_used_mb: 1,
            memory_total_mb: 2,
        };

        let mut with_gpu = RateEngine::new();
        with_gpu.update(build(t0, vec![gpu.clone()], 0));
        let a = with_gpu.update(build(t0 + Duration::from_secs(1), vec![gpu], 2048));

        let mut without_gpu = RateEngine::new();
        without_gpu.update(build(t0, vec![], 0));
        let b = without_gpu.update(build(t0 + Duration::from_secs(1), vec![], 2048));

        assert_eq!(a.gpus.len(), 1);
        assert!(b.gpus.is_empty());
        assert_eq!(a.cpu, b.cpu);
        assert_eq!(a.networks, b.networks);
    }

    #[test]
    fn test_absent_cpu_family_resets_tracking() {
        let t0 = Instant::now();
        let mut engine = RateEngine::new();

        let mut s1 = sample_at(t0);
        s1.cpu = Some(cpu(1000, 500));
        s1.cores = vec![CoreCpuTimes { core: 0, times: cpu(1000, 500) }];
        engine.update(s1);

        let s2 = sample_at(t0 + Duration::from_secs(1));
        let m = engine.update(s2);
        assert_eq!(m.cpu, CpuMetrics::default());
        assert!(engine.cores.delta(&0, &[1000, 500]).is_none());

        let mut s3 = sample_at(t0 + Duration::from_secs(2));
        s3.cpu = Some(cpu(3000, 600));
        assert_eq!(engine.update(s3).cpu.usage_percent, 0.0);
    }

    #[test]
    fn test_independent_engines() {
        let t0 = Instant::now();
        let mut a = RateEngine::new();
        let mut b = RateEngine::new();

        let mut s = sample_at(t0);
        s.disks = vec![disk("sda", 0, 0)];
        a.update(s);

        let mut s = sample_at(t0 + Duration::from_secs(1));
        s.disks = vec![disk("sda", 2048, 0)];
        assert_eq!(b.update(s.clone()).disks[0].read_rate, 0.0);
        assert!(a.update(s).disks[0].read_rate > 0.0);
    }
}
