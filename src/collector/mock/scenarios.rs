//! Pre-built mock filesystem scenarios for testing.
//!
//! These scenarios provide realistic `/proc` filesystem states
//! for testing various system conditions.

use super::filesystem::MockFs;

/// Builds a `/proc/[pid]/stat` line with the given counters.
///
/// Fields not under test are filled with plausible constants.
pub fn stat_line(pid: u32, comm: &str, state: char, ppid: u32, utime: u64, stime: u64) -> String {
    format!(
        "{pid} ({comm}) {state} {ppid} {pid} {pid} 0 -1 4194304 100 0 0 0 {utime} {stime} 0 0 20 0 1 0 10000 10000000 250 18446744073709551615 0 0 0 0 0 0 0 0 0 0 0 0 17 0 0 0 0 0 0"
    )
}

/// Builds a `/proc/[pid]/status` file.
pub fn status_file(pid: u32, name: &str, state: &str, ppid: u32, rss_kb: u64) -> String {
    let rss = if rss_kb > 0 {
        format!("VmRSS:\t{:>8} kB\n", rss_kb)
    } else {
        String::new()
    };
    format!(
        "Name:\t{name}\nState:\t{state}\nPid:\t{pid}\nPPid:\t{ppid}\nUid:\t1000\t1000\t1000\t1000\n{rss}Threads:\t1\n"
    )
}

/// Builds a `/proc/[pid]/io` file.
pub fn io_file(rchar: u64, wchar: u64) -> String {
    format!(
        "rchar: {rchar}\nwchar: {wchar}\nsyscr: 10\nsyscw: 5\nread_bytes: 0\nwrite_bytes: 0\ncancelled_write_bytes: 0\n"
    )
}

impl MockFs {
    /// Creates a typical system with a few processes.
    ///
    /// Includes: init (PID 1), a bash shell, a database server, a kernel
    /// thread (no RSS, unreadable io) and a zombie.
    pub fn typical_system() -> Self {
        let mut fs = Self::new();

        fs.add_file("/proc/uptime", "12345.67 98765.43\n");
        fs.add_file("/proc/loadavg", "0.15 0.10 0.05 1/150 1234\n");
        fs.add_file(
            "/proc/meminfo",
            "\
MemTotal:       16384000 kB
MemFree:         8192000 kB
MemAvailable:   12000000 kB
Buffers:          512000 kB
Cached:          2048000 kB
SwapCached:            0 kB
SwapTotal:       4096000 kB
SwapFree:        4096000 kB
",
        );
        fs.set_cpu_stat(&[10000, 500, 3000, 80000, 1000, 200, 100, 0], 4);

        fs.add_file(
            "/proc/diskstats",
            "\
   7       0 loop0 100 0 200 10 0 0 0 0 0 10 10 0 0 0 0
   8       0 sda 12345 100 987654 5000 6789 50 456789 3000 0 4000 8000 0 0 0 0
   8       1 sda1 10000 80 800000 4000 5000 40 400000 2500 0 3500 6500 0 0 0 0
 259       0 nvme0n1 50000 200 2000000 10000 30000 150 1500000 8000 5 15000 18000 0 0 0 0
 259       1 nvme0n1p1 40000 100 1000000 9000 20000 100 1000000 7000 0 14000 16000 0 0 0 0
 253       0 dm-0 100 0 200 10 0 0 0 0 0 10 10 0 0 0 0
",
        );

        fs.add_file(
            "/proc/net/dev",
            "\
Inter-|   Receive                                                |  Transmit
 face |bytes    packets errs drop fifo frame compressed multicast|bytes    packets errs drop fifo colls carrier compressed
    lo: 12345678     9876    0    0    0     0          0         0 12345678     9876    0    0    0     0       0          0
  eth0: 987654321   654321    5   10    0     0          0       100 123456789   456789    2    5    0     0       0          0
",
        );

        fs.add_sample_process(1, "systemd", "S (sleeping)", 0, 150, 80, 12000, 1_000_000, 500_000);
        fs.add_sample_process(100, "bash", "S (sleeping)", 1, 20, 10, 5000, 20_000, 4_000);
        fs.add_sample_process(200, "postgres", "R (running)", 1, 5000, 1200, 256000, 50_000_000, 80_000_000);

        // Kernel thread: no VmRSS line, io unreadable.
        fs.add_process(
            2,
            &stat_line(2, "kthreadd", 'S', 0, 0, 3),
            "Name:\tkthreadd\nState:\tS (sleeping)\nPid:\t2\nPPid:\t0\nThreads:\t1\n",
            "",
        );

        fs.add_process(
            300,
            &stat_line(300, "defunct", 'Z', 100, 1, 1),
            &status_file(300, "defunct", "Z (zombie)", 100, 0),
            "",
        );

        fs
    }

    /// Creates a system with only the global files and no processes.
    pub fn empty_system() -> Self {
        let mut fs = Self::new();
        fs.add_dir("/proc");
        fs.add_file("/proc/uptime", "10.00 20.00\n");
        fs.add_file("/proc/loadavg", "0.00 0.00 0.00 1/10 1\n");
        fs.add_file("/proc/meminfo", "MemTotal: 1024000 kB\nMemFree: 512000 kB\nMemAvailable: 768000 kB\n");
        fs.set_cpu_stat(&[100, 0, 100, 800, 0, 0, 0, 0], 1);
        fs
    }

    /// Adds a process whose status carries a full set of fields.
    #[allow(clippy::too_many_arguments)]
    pub fn add_sample_process(
        &mut self,
        pid: u32,
        name: &str,
        state: &str,
        ppid: u32,
        utime: u64,
        stime: u64,
        rss_kb: u64,
        rchar: u64,
        wchar: u64,
    ) {
        let state_char = state.chars().next().unwrap_or('S');
        self.add_process(
            pid,
            &stat_line(pid, name, state_char, ppid, utime, stime),
            &status_file(pid, name, state, ppid, rss_kb),
            &io_file(rchar, wchar),
        );
    }

    /// Writes `/proc/stat` with an aggregate line and `cores` identical
    /// per-core lines, each carrying `aggregate / cores`.
    ///
    /// `times` is `[user, nice, system, idle, iowait, irq, softirq, steal]`.
    pub fn set_cpu_stat(&mut self, times: &[u64; 8], cores: u32) {
        let join = |vals: &[u64]| {
            vals.iter()
                .map(|v| v.to_string())
                .collect::<Vec<_>>()
                .join(" ")
        };
        let mut content = format!("cpu  {} 0 0\n", join(times));
        let per_core: Vec<u64> = times.iter().map(|v| v / u64::from(cores.max(1))).collect();
        for core in 0..cores {
            content.push_str(&format!("cpu{} {} 0 0\n", core, join(&per_core)));
        }
        content.push_str("intr 1000000 50 0 0\nctxt 500000\nbtime 1700000000\n");
        self.add_file("/proc/stat", content);
    }
}
