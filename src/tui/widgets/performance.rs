//! Performance view: CPU, memory, GPU, disk and network panels.

use std::time::Duration;

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Gauge, LineGauge, Paragraph, Row, Table};

use crate::collector::CollectorTiming;
use crate::fmt::{FmtStyle, format_kb_rate, truncate};
use crate::model::{CpuMetrics, GpuSnapshot, Metrics};
use crate::tui::state::AppState;
use crate::tui::style::Styles;

/// Per-core gauges are laid out in this many columns.
const CORE_COLUMNS: usize = 2;
/// Rows of per-core gauges shown before the rest is summarized.
const MAX_CORE_ROWS: usize = 8;

/// Renders the performance view.
pub fn render_performance(frame: &mut Frame, area: Rect, state: &AppState) {
    let Some(metrics) = state.metrics.as_ref() else {
        frame.render_widget(
            Paragraph::new("Collecting first sample...").style(Styles::dim()),
            area,
        );
        return;
    };

    let core_rows = core_rows(metrics.cpu.per_core.len());
    let gpu_rows = metrics.gpus.len().max(1) as u16;

    let chunks = Layout::vertical([
        Constraint::Length(3 + core_rows),
        Constraint::Length(4),
        Constraint::Length(2 + gpu_rows),
        Constraint::Min(3),
        Constraint::Length(1),
    ])
    .split(area);

    render_cpu(frame, chunks[0], &metrics.cpu);
    render_memory(frame, chunks[1], metrics);
    render_gpus(frame, chunks[2], &metrics.gpus, state.gpu_enabled);

    let io = Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[3]);
    render_disks(frame, io[0], metrics);
    render_networks(frame, io[1], metrics);

    let footer = timing_line(state.timing.as_ref(), metrics.elapsed_secs);
    frame.render_widget(Paragraph::new(footer).style(Styles::dim()), chunks[4]);
}

fn core_rows(cores: usize) -> u16 {
    cores.div_ceil(CORE_COLUMNS).min(MAX_CORE_ROWS) as u16
}

fn ratio(pct: f64) -> f64 {
    if pct.is_finite() {
        (pct / 100.0).clamp(0.0, 1.0)
    } else {
        0.0
    }
}

fn section_block(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(format!(" {} ", title), Styles::section_header()))
}

fn render_cpu(frame: &mut Frame, area: Rect, cpu: &CpuMetrics) {
    let block = section_block("CPU");
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.height == 0 {
        return;
    }

    let gauge = Gauge::default()
        .gauge_style(Styles::cpu())
        .ratio(ratio(cpu.usage_percent))
        .label(format!("total {:.1}%", cpu.usage_percent));
    frame.render_widget(gauge, Rect { height: 1, ..inner });

    let grid = Rect {
        y: inner.y + 1,
        height: inner.height.saturating_sub(1),
        ..inner
    };
    let columns = Layout::horizontal([Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)]).split(grid);
    let shown = (MAX_CORE_ROWS * CORE_COLUMNS).min(cpu.per_core.len());
    for (i, core) in cpu.per_core.iter().take(shown).enumerate() {
        let column = columns[i % CORE_COLUMNS];
        let row = (i / CORE_COLUMNS) as u16;
        if row >= column.height {
            break;
        }
        let cell = Rect {
            y: column.y + row,
            height: 1,
            width: column.width.saturating_sub(1),
            ..column
        };
        let gauge = LineGauge::default()
            .filled_style(Styles::cpu())
            .ratio(ratio(core.usage_percent))
            .label(format!("cpu{:<3} {:>5.1}%", core.core, core.usage_percent));
        frame.render_widget(gauge, cell);
    }
}

fn render_memory(frame: &mut Frame, area: Rect, metrics: &Metrics) {
    let block = section_block("Memory");
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.height < 2 {
        return;
    }

    let mem = &metrics.memory;
    let rows = Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).split(inner);

    let gauge = Gauge::default()
        .gauge_style(Styles::mem())
        .ratio(ratio(mem.usage_percent))
        .label(format!(
            "RAM  {} / {} KB ({:.1}%)",
            mem.used_kb, mem.total_kb, mem.usage_percent
        ));
    frame.render_widget(gauge, rows[0]);

    let swap_pct = if mem.swap_total_kb == 0 {
        0.0
    } else {
        mem.swap_used_kb as f64 / mem.swap_total_kb as f64 * 100.0
    };
    let gauge = Gauge::default()
        .gauge_style(Styles::swap())
        .ratio(ratio(swap_pct))
        .label(format!(
            "Swap {} / {} KB",
            mem.swap_used_kb, mem.swap_total_kb
        ));
    frame.render_widget(gauge, rows[1]);
}

/// Text shown in the GPU panel when there is nothing to draw.
pub fn gpu_placeholder(gpu_enabled: bool) -> &'static str {
    if gpu_enabled {
        "No NVIDIA GPU detected."
    } else {
        "GPU monitoring disabled."
    }
}

fn render_gpus(frame: &mut Frame, area: Rect, gpus: &[GpuSnapshot], gpu_enabled: bool) {
    let block = section_block("GPU");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if gpus.is_empty() {
        frame.render_widget(
            Paragraph::new(gpu_placeholder(gpu_enabled)).style(Styles::dim()),
            inner,
        );
        return;
    }

    for (row, gpu) in gpus.iter().enumerate() {
        let row = row as u16;
        if row >= inner.height {
            break;
        }
        let line = Rect {
            y: inner.y + row,
            height: 1,
            ..inner
        };
        let label = format!(
            "{} {}  {:.0}%  {} / {} MB",
            gpu.index,
            truncate(&gpu.name, 24),
            gpu.utilization_percent,
            gpu.memory_used_mb,
            gpu.memory_total_mb
        );
        let gauge = LineGauge::default()
            .filled_style(Styles::gpu())
            .ratio(ratio(gpu.utilization_percent))
            .label(label);
        frame.render_widget(gauge, line);
    }
}

fn rate_table<'a>(
    title: &'a str,
    headers: [&'a str; 3],
    rows: Vec<[String; 3]>,
    style: Style,
) -> Table<'a> {
    let header = Row::new(headers.to_vec()).style(Styles::table_header());
    let body: Vec<Row> = rows
        .into_iter()
        .map(|[name, a, b]| {
            Row::new(vec![
                Span::raw(name),
                Span::styled(a, style),
                Span::styled(b, style),
            ])
        })
        .collect();
    Table::new(
        body,
        [
            Constraint::Min(10),
            Constraint::Length(14),
            Constraint::Length(14),
        ],
    )
    .header(header)
    .block(section_block(title))
}

fn render_disks(frame: &mut Frame, area: Rect, metrics: &Metrics) {
    let rows = metrics
        .disks
        .iter()
        .map(|d| {
            [
                d.name.clone(),
                format_kb_rate(d.read_rate, FmtStyle::Detail),
                format_kb_rate(d.write_rate, FmtStyle::Detail),
            ]
        })
        .collect();
    frame.render_widget(
        rate_table("Disks", ["DEVICE", "R/s", "W/s"], rows, Styles::disk()),
        area,
    );
}

fn render_networks(frame: &mut Frame, area: Rect, metrics: &Metrics) {
    let rows = metrics
        .networks
        .iter()
        .map(|n| {
            [
                n.name.clone(),
                format_kb_rate(n.rx_rate, FmtStyle::Detail),
                format_kb_rate(n.tx_rate, FmtStyle::Detail),
            ]
        })
        .collect();
    frame.render_widget(
        rate_table("Network", ["INTERFACE", "RX/s", "TX/s"], rows, Styles::net()),
        area,
    );
}

fn ms(d: Duration) -> f64 {
    d.as_secs_f64() * 1000.0
}

/// Footer line with the sampling interval and collector phase timings.
pub fn timing_line(timing: Option<&CollectorTiming>, elapsed_secs: f64) -> Line<'static> {
    let mut text = format!("interval {:.2}s", elapsed_secs);
    if let Some(t) = timing {
        text.push_str(&format!(
            "  collect {:.1}ms (proc {:.1} cpu {:.1} mem {:.1} load {:.1} disk {:.1} net {:.1} gpu {:.1})",
            ms(t.total),
            ms(t.processes),
            ms(t.cpu),
            ms(t.memory),
            ms(t.load),
            ms(t.disks),
            ms(t.networks),
            ms(t.gpus)
        ));
    }
    Line::from(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CoreUsage, DiskMetrics};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn screen(state: &AppState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal
            .draw(|frame| render_performance(frame, frame.area(), state))
            .unwrap();
        let buffer = terminal.backend().buffer().clone();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    fn metrics() -> Metrics {
        Metrics {
            cpu: CpuMetrics {
                usage_percent: 80.0,
                per_core: (0..4)
                    .map(|core| CoreUsage {
                        core,
                        usage_percent: 20.0 * core as f64,
                    })
                    .collect(),
            },
            disks: vec![DiskMetrics {
                name: "nvme0n1".to_string(),
                read_rate: 50.0,
                write_rate: 0.0,
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_core_rows() {
        assert_eq!(core_rows(0), 0);
        assert_eq!(core_rows(3), 2);
        assert_eq!(core_rows(64), MAX_CORE_ROWS as u16);
    }

    #[test]
    fn test_ratio_is_clamped() {
        assert_eq!(ratio(150.0), 1.0);
        assert_eq!(ratio(-3.0), 0.0);
        assert_eq!(ratio(f64::NAN), 0.0);
        assert_eq!(ratio(50.0), 0.5);
    }

    #[test]
    fn test_renders_panels() {
        let state = AppState {
            metrics: Some(metrics()),
            gpu_enabled: true,
            ..Default::default()
        };
        let text = screen(&state);
        assert!(text.contains("total 80.0%"));
        assert!(text.contains("cpu3"));
        assert!(text.contains("nvme0n1"));
        assert!(text.contains("50.0 KiB/s"));
        assert!(text.contains("No NVIDIA GPU detected."));
    }

    #[test]
    fn test_renders_gpu_rows() {
        let mut m = metrics();
        m.gpus = vec![GpuSnapshot {
            index: 0,
            name: "NVIDIA A100".to_string(),
            utilization_percent: 35.0,
            memory_used_mb: 1024,
            memory_total_mb: 40960,
        }];
        let state = AppState {
            metrics: Some(m),
            gpu_enabled: true,
            ..Default::default()
        };
        let text = screen(&state);
        assert!(text.contains("NVIDIA A100"));
        assert!(text.contains("1024 / 40960 MB"));
    }

    #[test]
    fn test_disabled_gpu_placeholder() {
        assert_eq!(gpu_placeholder(false), "GPU monitoring disabled.");
    }

    #[test]
    fn test_timing_line() {
        let timing = CollectorTiming {
            total: Duration::from_micros(2500),
            ..Default::default()
        };
        let line = timing_line(Some(&timing), 1.0);
        let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert!(text.starts_with("interval 1.00s"));
        assert!(text.contains("collect 2.5ms"));
    }
}
