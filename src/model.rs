//! Data model shared by the collector, the rate engine and the UI.
//!
//! Raw types carry cumulative kernel counters exactly as read. Derived types
//! carry per-second rates and percentages computed from two consecutive raw
//! samples.

use serde::Serialize;
use std::time::Instant;

// ============ Raw sample ============

/// One process as seen in a single sample.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProcessSnapshot {
    pub pid: u32,
    pub ppid: u32,
    pub name: String,
    /// First character of the kernel state (`R`, `S`, `D`, `Z`, ...).
    pub state: char,
    /// Resident set size in KiB. Zero for kernel threads.
    pub rss_kb: u64,
    /// Cumulative user-mode CPU time in clock ticks.
    pub utime: u64,
    /// Cumulative kernel-mode CPU time in clock ticks.
    pub stime: u64,
    /// Cumulative bytes read (`rchar`). Zero when io is unreadable.
    pub read_bytes: u64,
    /// Cumulative bytes written (`wchar`).
    pub write_bytes: u64,
    pub threads: u32,
}

impl ProcessSnapshot {
    pub fn cpu_ticks(&self) -> u64 {
        self.utime.saturating_add(self.stime)
    }
}

/// Aggregated CPU time counters in clock ticks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SystemCpuTimes {
    /// user + nice + system + idle + iowait + irq + softirq + steal
    pub total_ticks: u64,
    /// idle + iowait
    pub idle_ticks: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CoreCpuTimes {
    pub core: u32,
    pub times: SystemCpuTimes,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemorySnapshot {
    pub total_kb: u64,
    pub free_kb: u64,
    pub available_kb: u64,
    pub swap_total_kb: u64,
    pub swap_free_kb: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct LoadAverage {
    pub one: f64,
    pub five: f64,
    pub fifteen: f64,
    pub running: u32,
    pub total: u32,
}

/// Cumulative sector counters of one whole physical disk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiskCounters {
    pub name: String,
    pub sectors_read: u64,
    pub sectors_written: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NetworkCounters {
    pub name: String,
    pub rx_bytes: u64,
    pub tx_bytes: u64,
}

/// Point-in-time GPU reading. Not a counter, passed through as is.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GpuSnapshot {
    pub index: u32,
    pub name: String,
    pub utilization_percent: f64,
    pub memory_used_mb: u64,
    pub memory_total_mb: u64,
}

/// Everything gathered in one collection pass.
///
/// Families whose source was unreadable are `None` or empty.
#[derive(Debug, Clone)]
pub struct RawSample {
    pub collected_at: Instant,
    /// Ascending by pid.
    pub processes: Vec<ProcessSnapshot>,
    pub cpu: Option<SystemCpuTimes>,
    pub cores: Vec<CoreCpuTimes>,
    pub memory: Option<MemorySnapshot>,
    pub load: Option<LoadAverage>,
    pub uptime_secs: Option<f64>,
    pub disks: Vec<DiskCounters>,
    pub networks: Vec<NetworkCounters>,
    pub gpus: Vec<GpuSnapshot>,
}

impl RawSample {
    /// An empty sample stamped with `collected_at`.
    pub fn empty(collected_at: Instant) -> Self {
        Self {
            collected_at,
            processes: Vec::new(),
            cpu: None,
            cores: Vec::new(),
            memory: None,
            load: None,
            uptime_secs: None,
            disks: Vec::new(),
            networks: Vec::new(),
            gpus: Vec::new(),
        }
    }
}

// ============ Derived metrics ============

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProcessMetrics {
    pub pid: u32,
    pub ppid: u32,
    pub name: String,
    pub state: char,
    pub rss_kb: u64,
    pub threads: u32,
    /// Share of total machine CPU time, 0..=100.
    pub cpu_usage_percent: f64,
    /// KiB per second.
    pub io_read_rate: f64,
    /// KiB per second.
    pub io_write_rate: f64,
}

impl ProcessMetrics {
    /// Combined read and write throughput.
    pub fn io_rate(&self) -> f64 {
        self.io_read_rate + self.io_write_rate
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct CoreUsage {
    pub core: u32,
    pub usage_percent: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CpuMetrics {
    pub usage_percent: f64,
    pub per_core: Vec<CoreUsage>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct MemoryMetrics {
    pub total_kb: u64,
    pub available_kb: u64,
    pub used_kb: u64,
    pub usage_percent: f64,
    pub swap_total_kb: u64,
    pub swap_used_kb: u64,
}

impl MemoryMetrics {
    pub fn from_snapshot(mem: &MemorySnapshot) -> Self {
        let used_kb = mem.total_kb.saturating_sub(mem.available_kb);
        let usage_percent = if mem.total_kb == 0 {
            0.0
        } else {
            (used_kb as f64 / mem.total_kb as f64 * 100.0).clamp(0.0, 100.0)
        };
        Self {
            total_kb: mem.total_kb,
            available_kb: mem.available_kb,
            used_kb,
            usage_percent,
            swap_total_kb: mem.swap_total_kb,
            swap_used_kb: mem.swap_total_kb.saturating_sub(mem.swap_free_kb),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DiskMetrics {
    pub name: String,
    /// KiB per second.
    pub read_rate: f64,
    /// KiB per second.
    pub write_rate: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NetworkMetrics {
    pub name: String,
    /// KiB per second.
    pub rx_rate: f64,
    /// KiB per second.
    pub tx_rate: f64,
}

/// Result of comparing a sample with the one before it.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Metrics {
    /// Seconds between the two samples; zero for the first sample.
    pub elapsed_secs: f64,
    pub cpu: CpuMetrics,
    pub memory: MemoryMetrics,
    pub load: Option<LoadAverage>,
    pub uptime_secs: Option<f64>,
    pub processes: Vec<ProcessMetrics>,
    pub disks: Vec<DiskMetrics>,
    pub networks: Vec<NetworkMetrics>,
    pub gpus: Vec<GpuSnapshot>,
}
