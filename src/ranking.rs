//! Process ordering.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::model::ProcessMetrics;

/// Column the process list is ordered by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortKey {
    /// Ascending pid.
    Pid,
    /// Descending resident memory.
    Memory,
    /// Descending CPU usage.
    #[default]
    Cpu,
    /// Descending read + write throughput.
    Io,
}

impl SortKey {
    pub const ALL: [SortKey; 4] = [SortKey::Pid, SortKey::Memory, SortKey::Cpu, SortKey::Io];

    /// Short label for the table header and status line.
    pub fn label(self) -> &'static str {
        match self {
            SortKey::Pid => "PID",
            SortKey::Memory => "MEM",
            SortKey::Cpu => "CPU",
            SortKey::Io => "I/O",
        }
    }

    /// Compares two processes under this key. Equal elements return `Equal`
    /// so the stable sort keeps their enumeration order.
    pub fn compare(self, a: &ProcessMetrics, b: &ProcessMetrics) -> Ordering {
        match self {
            SortKey::Pid => a.pid.cmp(&b.pid),
            SortKey::Memory => b.rss_kb.cmp(&a.rss_kb),
            SortKey::Cpu => b.cpu_usage_percent.total_cmp(&a.cpu_usage_percent),
            SortKey::Io => b.io_rate().total_cmp(&a.io_rate()),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SortKey::Pid => "pid",
            SortKey::Memory => "memory",
            SortKey::Cpu => "cpu",
            SortKey::Io => "io",
        };
        f.write_str(name)
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pid" => Ok(SortKey::Pid),
            "memory" | "mem" => Ok(SortKey::Memory),
            "cpu" => Ok(SortKey::Cpu),
            "io" => Ok(SortKey::Io),
            other => Err(format!(
                "unknown sort key '{}', expected pid, memory, cpu or io",
                other
            )),
        }
    }
}

/// Orders `processes` in place by `key`.
///
/// The sort is stable: rows that compare equal keep the order they arrived
/// in, which is ascending pid straight from the collector.
pub fn sort_processes(processes: &mut [ProcessMetrics], key: SortKey) {
    processes.sort_by(|a, b| key.compare(a, b));
}
