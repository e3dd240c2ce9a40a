//! System collector for gathering global system counters from `/proc/`.

use crate::collector::procfs::parser::{
    CpuStat, parse_diskstats, parse_global_stat, parse_loadavg, parse_meminfo, parse_net_dev,
    parse_uptime,
};
use crate::collector::procfs::process::CollectError;
use crate::collector::traits::FileSystem;
use crate::model::{
    CoreCpuTimes, DiskCounters, LoadAverage, MemorySnapshot, NetworkCounters, SystemCpuTimes,
};
use std::path::Path;

/// Device name prefixes of whole physical block devices.
const DISK_PREFIXES: &[&str] = &["sd", "hd", "vd", "xvd", "nvme", "mmcblk"];

/// Returns true for whole physical disks, false for partitions and virtual devices.
///
/// `sda`, `nvme0n1` and `mmcblk0` pass; `sda1`, `nvme0n1p2`, `mmcblk0p1`,
/// `mmcblk0boot0`, `loop0` and `dm-0` do not.
pub fn is_physical_disk(name: &str) -> bool {
    let Some(prefix) = DISK_PREFIXES.iter().find(|p| name.starts_with(*p)) else {
        return false;
    };
    let rest = &name[prefix.len()..];
    if rest.is_empty() {
        return false;
    }

    match *prefix {
        // nvme0n1 vs nvme0n1p1
        "nvme" => !rest.contains('p'),
        // mmcblk0 vs mmcblk0p1, mmcblk0boot0, mmcblk0rpmb
        "mmcblk" => rest.bytes().all(|b| b.is_ascii_digit()),
        // sda vs sda1
        _ => !rest.ends_with(|c: char| c.is_ascii_digit()),
    }
}

impl From<&CpuStat> for SystemCpuTimes {
    fn from(cpu: &CpuStat) -> Self {
        let idle = cpu.idle.saturating_add(cpu.iowait);
        let total = [
            cpu.user,
            cpu.nice,
            cpu.system,
            cpu.idle,
            cpu.iowait,
            cpu.irq,
            cpu.softirq,
            cpu.steal,
        ]
        .iter()
        .fold(0u64, |acc, v| acc.saturating_add(*v));

        SystemCpuTimes {
            total_ticks: total,
            idle_ticks: idle,
        }
    }
}

/// Collects system-wide metrics from `/proc/`.
pub struct SystemCollector<F: FileSystem> {
    fs: F,
    proc_path: String,
}

impl<F: FileSystem> SystemCollector<F> {
    /// Creates a new system collector.
    ///
    /// # Arguments
    /// * `fs` - Filesystem implementation (real or mock)
    /// * `proc_path` - Base path to proc filesystem (usually "/proc")
    pub fn new(fs: F, proc_path: impl Into<String>) -> Self {
        Self {
            fs,
            proc_path: proc_path.into(),
        }
    }

    fn read(&self, file: &str) -> Result<String, CollectError> {
        let path = format!("{}/{}", self.proc_path, file);
        Ok(self.fs.read_to_string(Path::new(&path))?)
    }

    /// Collects aggregate and per-core CPU ticks from `/proc/stat`.
    pub fn collect_cpu(&self) -> Result<(SystemCpuTimes, Vec<CoreCpuTimes>), CollectError> {
        let content = self.read("stat")?;
        let stat = parse_global_stat(&content).map_err(|e| CollectError::Parse(e.message))?;

        let total = stat
            .aggregate()
            .map(SystemCpuTimes::from)
            .ok_or_else(|| CollectError::Parse("missing aggregate cpu line".to_string()))?;

        let mut cores: Vec<CoreCpuTimes> = stat
            .cpus
            .iter()
            .filter_map(|cpu| {
                cpu.cpu_id.map(|core| CoreCpuTimes {
                    core,
                    times: SystemCpuTimes::from(cpu),
                })
            })
            .collect();
        cores.sort_by_key(|c| c.core);

        Ok((total, cores))
    }

    /// Collects memory totals from `/proc/meminfo`.
    pub fn collect_memory(&self) -> Result<MemorySnapshot, CollectError> {
        let content = self.read("meminfo")?;
        let info = parse_meminfo(&content).map_err(|e| CollectError::Parse(e.message))?;

        let available = info.mem_available.unwrap_or_else(|| {
            info.mem_free
                .saturating_add(info.buffers)
                .saturating_add(info.cached)
        });

        Ok(MemorySnapshot {
            total_kb: info.mem_total,
            free_kb: info.mem_free,
            available_kb: available.min(info.mem_total),
            swap_total_kb: info.swap_total,
            swap_free_kb: info.swap_free,
        })
    }

    /// Collects load average from `/proc/loadavg`.
    pub fn collect_loadavg(&self) -> Result<LoadAverage, CollectError> {
        let content = self.read("loadavg")?;
        let info = parse_loadavg(&content).map_err(|e| CollectError::Parse(e.message))?;

        Ok(LoadAverage {
            one: info.load1,
            five: info.load5,
            fifteen: info.load15,
            running: info.running,
            total: info.total,
        })
    }

    /// Collects seconds since boot from `/proc/uptime`.
    pub fn collect_uptime(&self) -> Result<f64, CollectError> {
        let content = self.read("uptime")?;
        parse_uptime(&content).map_err(|e| CollectError::Parse(e.message))
    }

    /// Collects sector counters of physical disks from `/proc/diskstats`.
    pub fn collect_disks(&self) -> Result<Vec<DiskCounters>, CollectError> {
        let content = self.read("diskstats")?;
        let disks = parse_diskstats(&content).map_err(|e| CollectError::Parse(e.message))?;

        Ok(disks
            .into_iter()
            .filter(|d| is_physical_disk(&d.device))
            .map(|d| DiskCounters {
                name: d.device,
                sectors_read: d.read_sectors,
                sectors_written: d.write_sectors,
            })
            .collect())
    }

    /// Collects byte counters per interface from `/proc/net/dev`.
    pub fn collect_networks(&self) -> Result<Vec<NetworkCounters>, CollectError> {
        let content = self.read("net/dev")?;
        let devices = parse_net_dev(&content).map_err(|e| CollectError::Parse(e.message))?;

        Ok(devices
            .into_iter()
            .map(|d| NetworkCounters {
                name: d.interface,
                rx_bytes: d.rx_bytes,
                tx_bytes: d.tx_bytes,
            })
            .collect())
    }
}
