//! Process collector for gathering per-process counters from `/proc/[pid]/`.

use crate::collector::procfs::parser::{parse_proc_io, parse_proc_stat, parse_proc_status};
use crate::collector::traits::FileSystem;
use crate::model::ProcessSnapshot;
use std::path::Path;
use tracing::{debug, trace};

/// Error type for collection failures.
#[derive(Debug)]
pub enum CollectError {
    /// Process disappeared during collection.
    ProcessGone(u32),
    /// I/O error reading a source file.
    Io(std::io::Error),
    /// Parse error in a source file.
    Parse(String),
}

impl std::fmt::Display for CollectError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CollectError::ProcessGone(pid) => write!(f, "process {} disappeared", pid),
            CollectError::Io(e) => write!(f, "I/O error: {}", e),
            CollectError::Parse(msg) => write!(f, "parse error: {}", msg),
        }
    }
}

impl std::error::Error for CollectError {}

impl From<std::io::Error> for CollectError {
    fn from(e: std::io::Error) -> Self {
        CollectError::Io(e)
    }
}

/// Collects process information from `/proc/[pid]/` files.
pub struct ProcessCollector<F: FileSystem> {
    fs: F,
    proc_path: String,
}

impl<F: FileSystem> ProcessCollector<F> {
    /// Creates a new process collector.
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

    /// Collects a single process.
    ///
    /// `stat` and `status` are required; `io` is optional because it is only
    /// readable for the caller's own processes without privileges.
    pub fn collect_process(&self, pid: u32) -> Result<ProcessSnapshot, CollectError> {
        let proc_dir = format!("{}/{}", self.proc_path, pid);

        let stat_content = self
            .fs
            .read_to_string(Path::new(&format!("{}/stat", proc_dir)))
            .map_err(|_| CollectError::ProcessGone(pid))?;
        let stat = parse_proc_stat(&stat_content).map_err(|e| CollectError::Parse(e.message))?;

        let status_content = self
            .fs
            .read_to_string(Path::new(&format!("{}/status", proc_dir)))
            .map_err(|_| CollectError::ProcessGone(pid))?;
        let status =
            parse_proc_status(&status_content).map_err(|e| CollectError::Parse(e.message))?;

        let io = self
            .fs
            .read_to_string(Path::new(&format!("{}/io", proc_dir)))
            .ok()
            .and_then(|content| parse_proc_io(&content).ok())
            .unwrap_or_default();

        let name = if status.name.is_empty() {
            stat.comm
        } else {
            status.name
        };

        Ok(ProcessSnapshot {
            pid,
            ppid: if status.ppid != 0 { status.ppid } else { stat.ppid },
            name,
            state: status.state.chars().next().unwrap_or(stat.state),
            rss_kb: status.vm_rss,
            utime: stat.utime,
            stime: stat.stime,
            read_bytes: io.rchar,
            write_bytes: io.wchar,
            threads: if status.threads != 0 {
                status.threads
            } else {
                stat.num_threads
            },
        })
    }

    /// Lists numeric entries of the proc directory in ascending order.
    pub fn list_pids(&self) -> Result<Vec<u32>, CollectError> {
        let entries = self.fs.read_dir(Path::new(&self.proc_path))?;

        let mut pids: Vec<u32> = entries
            .iter()
            .filter_map(|path| path.file_name()?.to_str()?.parse().ok())
            .collect();
        pids.sort_unstable();
        Ok(pids)
    }

    /// Collects every live process, skipping ones that vanish or are malformed.
    pub fn collect_all_processes(&self) -> Result<Vec<ProcessSnapshot>, CollectError> {
        let pids = self.list_pids()?;
        let mut processes = Vec::with_capacity(pids.len());

        for pid in pids {
            match self.collect_process(pid) {
                Ok(snapshot) => processes.push(snapshot),
                Err(CollectError::ProcessGone(pid)) => {
                    trace!(pid, "process exited during collection");
                }
                Err(e) => {
                    debug!(pid, error = %e, "skipping process");
                }
            }
        }

        Ok(processes)
    }
}
