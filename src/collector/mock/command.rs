//! Scripted command runner for testing collectors that shell out.

use crate::collector::traits::CommandRunner;
use std::collections::HashMap;
use std::io;
use std::sync::Mutex;
use std::time::Duration;

#[derive(Debug, Clone)]
enum Reply {
    Output(String),
    Fail(io::ErrorKind),
}

/// Returns canned replies keyed by program name.
///
/// Programs with no registered reply behave as if not installed.
#[derive(Debug, Default)]
pub struct MockCommandRunner {
    replies: HashMap<String, Reply>,
    calls: Mutex<Vec<String>>,
}

impl MockCommandRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers stdout for `program`.
    pub fn with_output(mut self, program: &str, stdout: impl Into<String>) -> Self {
        self.replies
            .insert(program.to_string(), Reply::Output(stdout.into()));
        self
    }

    /// Makes `program` fail with the given error kind (e.g. `TimedOut`).
    pub fn with_failure(mut self, program: &str, kind: io::ErrorKind) -> Self {
        self.replies.insert(program.to_string(), Reply::Fail(kind));
        self
    }

    /// Number of times any program was invoked.
    pub fn call_count(&self) -> usize {
        self.calls.lock().map(|c| c.len()).unwrap_or(0)
    }
}

impl CommandRunner for MockCommandRunner {
    fn run(&self, program: &str, _args: &[&str], _timeout: Duration) -> io::Result<String> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(program.to_string());
        }
        match self.replies.get(program) {
            Some(Reply::Output(out)) => Ok(out.clone()),
            Some(Reply::Fail(kind)) => Err(io::Error::new(*kind, format!("{} failed", program))),
            None => Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{}: command not found", program),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_runner_replies() {
        let runner = MockCommandRunner::new()
            .with_output("nvidia-smi", "0, GPU, 1, 2, 3\n")
            .with_failure("slow", io::ErrorKind::TimedOut);

        let t = Duration::from_millis(10);
        assert!(runner.run("nvidia-smi", &[], t).unwrap().starts_with("0,"));
        assert_eq!(
            runner.run("slow", &[], t).unwrap_err().kind(),
            io::ErrorKind::TimedOut
        );
        assert_eq!(
            runner.run("other", &[], t).unwrap_err().kind(),
            io::ErrorKind::NotFound
        );
        assert_eq!(runner.call_count(), 3);
    }
}
