//! procmon - interactive terminal process and hardware monitor.
//!
//! Usage:
//!   procmon                 # TUI, 1 second interval
//!   procmon 2               # TUI, 2 second interval
//!   procmon --sort mem      # start sorted by resident memory
//!   procmon -b -n 5         # print 5 JSON lines and exit
//!   procmon -b 10 > out.jsonl

use tikv_jemallocator::Jemalloc;
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

use std::fs::OpenOptions;
use std::io;
use std::process;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use clap::Parser;
use tracing::{Level, error, info, warn};
use tracing_subscriber::EnvFilter;

use procmon::batch::{self, BatchOptions};
#[cfg(target_os = "linux")]
use procmon::collector::{RealFs, SystemCommandRunner};
#[cfg(not(target_os = "linux"))]
use procmon::collector::mock::{MockCommandRunner, MockFs};
use procmon::collector::{Collector, GpuCollector};
use procmon::provider::{LiveProvider, MetricsProvider};
use procmon::ranking::SortKey;
use procmon::tui::{App, AppState, View};

/// Interactive terminal process and hardware monitor.
#[derive(Parser)]
#[command(name = "procmon", about = "Process and hardware monitor", version)]
struct Args {
    /// Update interval in seconds.
    #[arg(value_name = "INTERVAL", default_value_t = 1)]
    interval: u64,

    /// Path to /proc filesystem (for testing/mocking).
    #[arg(long, default_value = "/proc")]
    proc_path: String,

    /// Initial sort order: pid, memory, cpu or io.
    #[arg(long, default_value = "cpu")]
    sort: SortKey,

    /// Initial view: processes or performance.
    #[arg(long, default_value = "processes")]
    view: View,

    /// Do not query nvidia-smi.
    #[arg(long)]
    no_gpu: bool,

    /// Time limit for one nvidia-smi call, in milliseconds.
    #[arg(long, default_value_t = 500)]
    gpu_timeout_ms: u64,

    /// Print one JSON object per sample to stdout instead of the TUI.
    #[arg(short, long)]
    batch: bool,

    /// Number of samples to print in batch mode (0 = until Ctrl-C).
    #[arg(short = 'n', long, default_value_t = 0)]
    iterations: u64,

    /// Increase logging verbosity (-v for debug, -vv for trace). Default is info level.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Quiet mode - only log errors.
    #[arg(short, long)]
    quiet: bool,

    /// Write logs to this file. The TUI discards logs without it.
    #[arg(long, value_name = "PATH")]
    log_file: Option<String>,
}

fn main() {
    let args = Args::parse();

    if args.interval == 0 {
        eprintln!("Error: interval must be at least 1 second");
        process::exit(1);
    }

    if let Err(e) = init_logging(&args) {
        eprintln!("Error: cannot open log file: {}", e);
        process::exit(1);
    }

    let gpu_enabled = !args.no_gpu;
    let mut provider = build_provider(&args);
    let interval = Duration::from_secs(args.interval);

    let result = if args.batch {
        run_batch(&args, provider.as_mut(), interval)
    } else {
        let state = AppState {
            gpu_enabled,
            ..AppState::new(args.view, args.sort)
        };
        App::new(provider, state).run(interval)
    };

    if let Err(e) = result {
        error!(error = %e, "procmon failed");
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Initializes the tracing subscriber with the appropriate log level.
///
/// The TUI owns the terminal, so it only ever logs to `--log-file`.
/// Batch mode logs to stderr and keeps stdout for data.
fn init_logging(args: &Args) -> io::Result<()> {
    let level = if args.quiet {
        Level::ERROR
    } else {
        match args.verbose {
            0 => Level::INFO,
            1 => Level::DEBUG,
            _ => Level::TRACE,
        }
    };

    let mut filter = EnvFilter::from_default_env();
    if let Ok(directive) = format!("procmon={}", level).parse() {
        filter = filter.add_directive(directive);
    }

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    match &args.log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).init();
        }
        None if args.batch => builder.with_writer(io::stderr).init(),
        None => builder.with_writer(io::sink).init(),
    }
    Ok(())
}

#[cfg(target_os = "linux")]
fn build_provider(args: &Args) -> Box<dyn MetricsProvider> {
    let runner = SystemCommandRunner::new();
    let gpu = if args.no_gpu {
        GpuCollector::disabled(runner)
    } else {
        GpuCollector::new(runner, Duration::from_millis(args.gpu_timeout_ms))
    };
    let collector = Collector::new(RealFs::new(), &args.proc_path, gpu);
    info!(
        proc_path = %args.proc_path,
        gpu = collector.gpu_enabled(),
        "live provider ready"
    );
    Box::new(LiveProvider::new(collector))
}

#[cfg(not(target_os = "linux"))]
fn build_provider(args: &Args) -> Box<dyn MetricsProvider> {
    warn!("not running on Linux, showing a simulated system");
    let gpu = GpuCollector::disabled(MockCommandRunner::new());
    let collector = Collector::new(MockFs::typical_system(), &args.proc_path, gpu);
    Box::new(LiveProvider::new(collector))
}

fn run_batch(args: &Args, provider: &mut dyn MetricsProvider, interval: Duration) -> io::Result<()> {
    let stop = Arc::new(AtomicBool::new(false));
    let handler_stop = Arc::clone(&stop);
    if let Err(e) = ctrlc::set_handler(move || handler_stop.store(true, Ordering::SeqCst)) {
        warn!(error = %e, "cannot install Ctrl-C handler");
    }

    let opts = BatchOptions {
        interval,
        iterations: args.iterations,
        sort: args.sort,
    };
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let written = batch::run(provider, &mut out, &opts, &stop)?;
    info!(samples = written, "batch finished");
    Ok(())
}
