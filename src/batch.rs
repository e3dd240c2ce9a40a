//! Headless mode: one JSON object per tick on a writer.

use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use chrono::{Local, SecondsFormat};
use serde::Serialize;
use tracing::debug;

use crate::model::Metrics;
use crate::provider::MetricsProvider;
use crate::ranking::{SortKey, sort_processes};

/// Longest single sleep between stop-flag checks.
const STOP_POLL: Duration = Duration::from_millis(100);

#[derive(Debug, Clone)]
pub struct BatchOptions {
    pub interval: Duration,
    /// Number of ticks to print; 0 runs until stopped.
    pub iterations: u64,
    pub sort: SortKey,
}

/// One output line.
#[derive(Serialize)]
struct Record<'a> {
    sample: u64,
    timestamp: String,
    #[serde(flatten)]
    metrics: &'a Metrics,
}

/// Prints ticks until `iterations` is reached or `stop` is set.
///
/// Returns the number of lines written.
pub fn run<W: Write>(
    provider: &mut dyn MetricsProvider,
    out: &mut W,
    opts: &BatchOptions,
    stop: &AtomicBool,
) -> io::Result<u64> {
    let mut written = 0u64;
    while !stop.load(Ordering::SeqCst) {
        let started = Instant::now();

        let mut metrics = provider.advance().clone();
        sort_processes(&mut metrics.processes, opts.sort);
        let record = Record {
            sample: written,
            timestamp: Local::now().to_rfc3339_opts(SecondsFormat::Millis, false),
            metrics: &metrics,
        };
        serde_json::to_writer(&mut *out, &record)?;
        out.write_all(b"\n")?;
        out.flush()?;
        written += 1;
        debug!(sample = written, processes = metrics.processes.len(), "printed sample");

        if opts.iterations != 0 && written >= opts.iterations {
            break;
        }
        sleep_until(started + opts.interval, stop);
    }
    Ok(written)
}

/// Sleeps until `deadline` in short slices so a stop request is noticed.
fn sleep_until(deadline: Instant, stop: &AtomicBool) {
    loop {
        let left = deadline.saturating_duration_since(Instant::now());
        if left.is_zero() || stop.load(Ordering::SeqCst) {
            return;
        }
        thread::sleep(left.min(STOP_POLL));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::mock::{MockCommandRunner, MockFs};
    use crate::collector::{Collector, GpuCollector};
    use crate::provider::LiveProvider;

    fn provider() -> LiveProvider<MockFs, MockCommandRunner> {
        let gpu = GpuCollector::new(MockCommandRunner::new(), Duration::from_millis(10));
        LiveProvider::new(Collector::new(MockFs::typical_system(), "/proc", gpu))
    }

    fn opts(iterations: u64, sort: SortKey) -> BatchOptions {
        BatchOptions {
            interval: Duration::ZERO,
            iterations,
            sort,
        }
    }

    fn lines(buf: &[u8]) -> Vec<serde_json::Value> {
        String::from_utf8_lossy(buf)
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    #[test]
    fn test_prints_requested_iterations() {
        let mut p = provider();
        let mut buf = Vec::new();
        let stop = AtomicBool::new(false);

        let n = run(&mut p, &mut buf, &opts(3, SortKey::Cpu), &stop).unwrap();
        assert_eq!(n, 3);

        let records = lines(&buf);
        assert_eq!(records.len(), 3);
        assert_eq!(records[0]["sample"], 0);
        assert_eq!(records[2]["sample"], 2);
        assert!(records[0]["timestamp"].is_string());
    }

    #[test]
    fn test_first_line_has_zero_rates() {
        let mut p = provider();
        let mut buf = Vec::new();
        run(&mut p, &mut buf, &opts(1, SortKey::Pid), &AtomicBool::new(false)).unwrap();

        let first = &lines(&buf)[0];
        assert_eq!(first["elapsed_secs"], 0.0);
        assert_eq!(first["cpu"]["usage_percent"], 0.0);
        for p in first["processes"].as_array().unwrap() {
            assert_eq!(p["cpu_usage_percent"], 0.0);
            assert_eq!(p["io_read_rate"], 0.0);
        }
        assert_eq!(first["gpus"].as_array().unwrap().len(), 0);
    }

    #[test]
    fn test_processes_sorted_by_option() {
        let mut p = provider();
        let mut buf = Vec::new();
        run(&mut p, &mut buf, &opts(1, SortKey::Memory), &AtomicBool::new(false)).unwrap();

        let first = &lines(&buf)[0];
        let rss: Vec<u64> = first["processes"]
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["rss_kb"].as_u64().unwrap())
            .collect();
        let mut sorted = rss.clone();
        sorted.sort_by(|a, b| b.cmp(a));
        assert_eq!(rss, sorted);
        assert_eq!(first["processes"][0]["pid"], 200);
    }

    #[test]
    fn test_stop_flag_prevents_output() {
        let mut p = provider();
        let mut buf = Vec::new();
        let stop = AtomicBool::new(true);
        let n = run(&mut p, &mut buf, &opts(0, SortKey::Cpu), &stop).unwrap();
        assert_eq!(n, 0);
        assert!(buf.is_empty());
    }

    #[test]
    fn test_sleep_until_returns_on_stop() {
        let stop = AtomicBool::new(true);
        let started = Instant::now();
        sleep_until(started + Duration::from_secs(30), &stop);
        assert!(started.elapsed() < Duration::from_secs(1));
    }
}
