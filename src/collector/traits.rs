//! Abstractions over the data sources the collector reads from.
//!
//! The `FileSystem` trait lets the collector work against the real `/proc`
//! filesystem on Linux or an in-memory mock in tests. `CommandRunner` does the
//! same for external utilities such as `nvidia-smi`.

use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

/// Abstraction for filesystem operations.
pub trait FileSystem: Send + Sync {
    /// Reads the entire contents of a file as a string.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Checks if a path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Lists entries in a directory.
    fn read_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>>;
}

/// Real filesystem implementation that delegates to `std::fs`.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealFs;

impl RealFs {
    pub fn new() -> Self {
        Self
    }
}

impl FileSystem for RealFs {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn read_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>> {
        let entries = std::fs::read_dir(path)?;
        let mut paths = Vec::new();
        for entry in entries {
            paths.push(entry?.path());
        }
        Ok(paths)
    }
}

/// Runs an external program and captures its standard output.
pub trait CommandRunner: Send + Sync {
    /// Executes `program` with `args`, waiting at most `timeout`.
    ///
    /// Returns the captured stdout on a successful exit. A missing program,
    /// a non-zero exit status or an expired timeout are all reported as errors.
    fn run(&self, program: &str, args: &[&str], timeout: Duration) -> io::Result<String>;
}

/// Spawns real child processes.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemCommandRunner;

impl SystemCommandRunner {
    pub fn new() -> Self {
        Self
    }
}

const POLL_STEP: Duration = Duration::from_millis(5);

impl CommandRunner for SystemCommandRunner {
    fn run(&self, program: &str, args: &[&str], timeout: Duration) -> io::Result<String> {
        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()?;

        // The child blocks once the pipe buffer fills, so stdout is drained concurrently.
        let mut reader = child.stdout.take().map(|mut stdout| {
            thread::spawn(move || {
                let mut out = String::new();
                stdout.read_to_string(&mut out).map(|_| out)
            })
        });

        let start = Instant::now();
        loop {
            match child.try_wait()? {
                Some(status) => {
                    let out = match reader.take() {
                        Some(handle) => handle
                            .join()
                            .map_err(|_| io::Error::other("stdout reader panicked"))??,
                        None => String::new(),
                    };
                    if !status.success() {
                        return Err(io::Error::other(format!(
                            "{} exited with {}",
                            program, status
                        )));
                    }
                    return Ok(out);
                }
                None if start.elapsed() >= timeout => {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(io::Error::new(
                        io::ErrorKind::TimedOut,
                        format!("{} did not finish within {:?}", program, timeout),
                    ));
                }
                None => thread::sleep(POLL_STEP),
            }
        }
    }
}
