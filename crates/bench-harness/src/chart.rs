// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Text bar charts of per-model averages.
//!
//! ```text
//! Average Latency per Model (seconds)
//!   synthetic/small   [##############################..........]   0.0021
//!   synthetic/tiny    [########################################]   0.0028
//! ```

use crate::{report, HarnessError, ResultTable, SummaryStats};
use std::path::{Path, PathBuf};

const BAR_WIDTH: usize = 40;

/// File name of the latency chart.
pub const LATENCY_CHART: &str = "latency_comparison.txt";
/// File name of the memory chart.
pub const MEMORY_CHART: &str = "memory_usage.txt";

/// Renders a horizontal bar chart. Bars are scaled to the largest value.
pub fn render_bar_chart(title: &str, unit: &str, bars: &[(String, f64)]) -> String {
    let mut out = format!("{title} ({unit})\n");
    if bars.is_empty() {
        out.push_str("  (no data)\n");
        return out;
    }

    let label_width = bars.iter().map(|(l, _)| l.chars().count()).max().unwrap_or(0);
    let max = bars.iter().map(|(_, v)| *v).fold(0.0_f64, f64::max);

    for (label, value) in bars {
        out.push_str(&format!(
            "  {label:<label_width$}  {}  {value:>10.4}\n",
            bar(*value, max)
        ));
    }
    out
}

/// One bar, `[###....]`, filled in proportion to `value / max`.
fn bar(value: f64, max: f64) -> String {
    let ratio = if max > 0.0 { (value / max).clamp(0.0, 1.0) } else { 0.0 };
    let filled = ((ratio * BAR_WIDTH as f64).round() as usize).min(BAR_WIDTH);
    format!("[{}{}]", "#".repeat(filled), ".".repeat(BAR_WIDTH - filled))
}

/// Builds the latency and peak-RAM charts as `(file name, content)` pairs.
pub fn charts(summary: &SummaryStats) -> [(&'static str, String); 2] {
    let latency: Vec<(String, f64)> = summary
        .iter()
        .map(|(m, s)| (m.to_string(), s.mean_latency_sec))
        .collect();
    let memory: Vec<(String, f64)> = summary
        .iter()
        .map(|(m, s)| (m.to_string(), s.mean_peak_ram_mb))
        .collect();

    [
        (
            LATENCY_CHART,
            render_bar_chart("Average Latency per Model", "seconds", &latency),
        ),
        (
            MEMORY_CHART,
            render_bar_chart("Average Peak RAM Usage per Model", "MB", &memory),
        ),
    ]
}

/// Writes both charts for `table` into `dir`, creating it if needed.
pub fn write_charts(table: &ResultTable, dir: &Path) -> Result<Vec<PathBuf>, HarnessError> {
    std::fs::create_dir_all(dir).map_err(|e| HarnessError::Io {
        path: dir.display().to_string(),
        source: e,
    })?;

    let summary = report::summarize(table);
    let mut written = Vec::new();
    for (name, content) in charts(&summary) {
        let path = dir.join(name);
        std::fs::write(&path, content).map_err(|e| HarnessError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        written.push(path);
    }

    tracing::info!("wrote {} charts to {}", written.len(), dir.display());
    Ok(written)
}
