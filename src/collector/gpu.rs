//! NVIDIA accelerator collector backed by `nvidia-smi`.
//!
//! Absence of a GPU, of the driver or of the tool itself is the common case;
//! every failure collapses into an empty list.

use crate::collector::traits::CommandRunner;
use crate::model::GpuSnapshot;
use std::time::Duration;
use tracing::{debug, trace};

pub const NVIDIA_SMI: &str = "nvidia-smi";

const QUERY_ARGS: &[&str] = &[
    "--query-gpu=index,name,utilization.gpu,memory.used,memory.total",
    "--format=csv,noheader,nounits",
];

/// Parses one `nvidia-smi` CSV line: `index, name, util, mem_used, mem_total`.
///
/// The name is everything between the first and the last three columns, so a
/// product name containing a comma still parses. Returns `None` when any
/// numeric column is missing or reads as `[N/A]`.
pub fn parse_gpu_line(line: &str) -> Option<GpuSnapshot> {
    let parts: Vec<&str> = line.split(',').map(str::trim).collect();
    if parts.len() < 5 {
        return None;
    }
    let n = parts.len();

    let index = parts[0].parse().ok()?;
    let utilization_percent: f64 = parts[n - 3].parse().ok()?;
    let memory_used_mb = parts[n - 2].parse().ok()?;
    let memory_total_mb = parts[n - 1].parse().ok()?;
    let name = parts[1..n - 3].join(", ");

    if !utilization_percent.is_finite() {
        return None;
    }

    Some(GpuSnapshot {
        index,
        name,
        utilization_percent: utilization_percent.clamp(0.0, 100.0),
        memory_used_mb,
        memory_total_mb,
    })
}

/// Parses the full `nvidia-smi` output, dropping unparseable lines.
pub fn parse_gpu_output(output: &str) -> Vec<GpuSnapshot> {
    output
        .lines()
        .filter(|l| !l.trim().is_empty())
        .filter_map(|line| {
            let gpu = parse_gpu_line(line);
            if gpu.is_none() {
                trace!(line, "ignoring malformed nvidia-smi line");
            }
            gpu
        })
        .collect()
}

/// Queries GPUs through a [`CommandRunner`].
pub struct GpuCollector<R: CommandRunner> {
    runner: R,
    timeout: Duration,
    enabled: bool,
}

impl<R: CommandRunner> GpuCollector<R> {
    pub fn new(runner: R, timeout: Duration) -> Self {
        Self {
            runner,
            timeout,
            enabled: true,
        }
    }

    /// A collector that never runs the external tool.
    pub fn disabled(runner: R) -> Self {
        Self {
            runner,
            timeout: Duration::ZERO,
            enabled: false,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Runs the query. Never fails; problems yield an empty list.
    pub fn collect(&self) -> Vec<GpuSnapshot> {
        if !self.enabled {
            return Vec::new();
        }

        match self.runner.run(NVIDIA_SMI, QUERY_ARGS, self.timeout) {
            Ok(output) => parse_gpu_output(&output),
            Err(e) => {
                debug!(error = %e, "GPU query unavailable");
                Vec::new()
            }
        }
    }
}
