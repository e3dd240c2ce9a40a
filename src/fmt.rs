//! Shared formatting helpers for the TUI and batch output.
//!
//! All pure formatting functions (no ratatui styles, no UI layout) live here.
//! Functions that differ between compact table columns and the roomier
//! performance view are parameterized via [`FmtStyle`].

/// Controls compact (table columns) vs verbose (performance view) output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FmtStyle {
    /// Compact: no spaces, short suffixes ("1.5G", "3m5s")
    Compact,
    /// Detail: spaces, full suffixes ("1.5 GiB", "3m 5s")
    Detail,
}

// ---------------------------------------------------------------------------
// Style-parameterized functions
// ---------------------------------------------------------------------------

/// Format a KiB count as human-readable size.
///
/// Compact: `"1.5G"`, `"100.3M"`, `"512K"`
/// Detail:  `"1.5 GiB"`, `"100.3 MiB"`, `"512 KiB"`
pub fn format_kb(kb: u64, style: FmtStyle) -> String {
    let (t, g, m, k) = match style {
        FmtStyle::Compact => ("T", "G", "M", "K"),
        FmtStyle::Detail => (" TiB", " GiB", " MiB", " KiB"),
    };
    let f = kb as f64;
    if kb >= 1024 * 1024 * 1024 {
        format!("{:.1}{}", f / (1024.0 * 1024.0 * 1024.0), t)
    } else if kb >= 1024 * 1024 {
        format!("{:.1}{}", f / (1024.0 * 1024.0), g)
    } else if kb >= 1024 {
        format!("{:.1}{}", f / 1024.0, m)
    } else {
        format!("{}{}", kb, k)
    }
}

/// Format a KiB-per-second rate as human-readable.
///
/// Compact: `"0"`, `"12.5K/s"`, `"3.1M/s"`
/// Detail:  `"0 KiB/s"`, `"12.5 KiB/s"`, `"3.1 MiB/s"`
pub fn format_kb_rate(rate: f64, style: FmtStyle) -> String {
    let (g, m, k) = match style {
        FmtStyle::Compact => ("G/s", "M/s", "K/s"),
        FmtStyle::Detail => (" GiB/s", " MiB/s", " KiB/s"),
    };
    if !rate.is_finite() || rate < 0.05 {
        return match style {
            FmtStyle::Compact => "0".to_string(),
            FmtStyle::Detail => format!("0{}", k),
        };
    }
    if rate >= 1024.0 * 1024.0 {
        format!("{:.1}{}", rate / (1024.0 * 1024.0), g)
    } else if rate >= 1024.0 {
        format!("{:.1}{}", rate / 1024.0, m)
    } else {
        format!("{:.1}{}", rate, k)
    }
}

/// Format duration in seconds as human-readable.
///
/// Compact: `"3m5s"`
/// Detail:  `"3m 5s"`, `"2d 4h"`
pub fn format_duration(secs: u64, style: FmtStyle) -> String {
    let sep = match style {
        FmtStyle::Compact => "",
        FmtStyle::Detail => " ",
    };
    if secs < 60 {
        format!("{}s", secs)
    } else if secs < 3600 {
        format!("{}m{}{}s", secs / 60, sep, secs % 60)
    } else if secs < 86400 {
        format!("{}h{}{}m", secs / 3600, sep, (secs % 3600) / 60)
    } else {
        format!("{}d{}{}h", secs / 86400, sep, (secs % 86400) / 3600)
    }
}

// ---------------------------------------------------------------------------
// Style-independent functions
// ---------------------------------------------------------------------------

/// Format a percentage with one decimal: `"42.0%"`.
pub fn format_percent(pct: f64) -> String {
    if pct.is_finite() {
        format!("{:.1}%", pct)
    } else {
        "-".to_string()
    }
}

/// Format uptime in seconds, or `"-"` when unknown.
pub fn format_uptime(secs: Option<f64>) -> String {
    match secs {
        Some(s) if s.is_finite() && s >= 0.0 => format_duration(s as u64, FmtStyle::Detail),
        _ => "-".to_string(),
    }
}

/// Format a `used / total` pair in KiB: `"3.0 GiB / 16.0 GiB"`.
pub fn format_used_total(used_kb: u64, total_kb: u64) -> String {
    format!(
        "{} / {}",
        format_kb(used_kb, FmtStyle::Detail),
        format_kb(total_kb, FmtStyle::Detail)
    )
}

// ---------------------------------------------------------------------------
// Text normalization
// ---------------------------------------------------------------------------

/// Truncate string to at most `max_chars` characters, marking the cut with `…`.
pub fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max_chars.saturating_sub(1)).collect();
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_kb() {
        assert_eq!(format_kb(512, FmtStyle::Compact), "512K");
        assert_eq!(format_kb(1536, FmtStyle::Compact), "1.5M");
        assert_eq!(format_kb(16384000, FmtStyle::Detail), "15.6 GiB");
        assert_eq!(format_kb(0, FmtStyle::Detail), "0 KiB");
    }

    #[test]
    fn test_format_kb_rate() {
        assert_eq!(format_kb_rate(0.0, FmtStyle::Compact), "0");
        assert_eq!(format_kb_rate(0.0, FmtStyle::Detail), "0 KiB/s");
        assert_eq!(format_kb_rate(50.0, FmtStyle::Compact), "50.0K/s");
        assert_eq!(format_kb_rate(2048.0, FmtStyle::Detail), "2.0 MiB/s");
        assert_eq!(format_kb_rate(f64::NAN, FmtStyle::Compact), "0");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(5, FmtStyle::Compact), "5s");
        assert_eq!(format_duration(185, FmtStyle::Compact), "3m5s");
        assert_eq!(format_duration(185, FmtStyle::Detail), "3m 5s");
        assert_eq!(format_duration(90000, FmtStyle::Detail), "1d 1h");
    }

    #[test]
    fn test_format_percent_and_uptime() {
        assert_eq!(format_percent(80.0), "80.0%");
        assert_eq!(format_percent(f64::NAN), "-");
        assert_eq!(format_uptime(Some(12345.67)), "3h 25m");
        assert_eq!(format_uptime(None), "-");
    }

    #[test]
    fn test_format_used_total() {
        assert_eq!(format_used_total(1024, 2048), "1.0 MiB / 2.0 MiB");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a-very-long-name", 6), "a-ver…");
        assert_eq!(truncate("ядро-потока", 4), "ядр…");
    }
}
