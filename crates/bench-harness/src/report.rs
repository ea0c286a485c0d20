// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Persisting the result table and summarising it per model.

use crate::record::COLUMNS;
use crate::{BenchmarkRecord, HarnessError, ResultTable};
use std::collections::BTreeMap;
use std::path::Path;

/// Writes `table` as CSV to `destination`, replacing any existing file.
///
/// The whole file is encoded in memory first and written with a single call,
/// so an encoding error leaves the destination untouched. The header is
/// always present, even for an empty table.
pub fn persist(table: &ResultTable, destination: &Path) -> Result<(), HarnessError> {
    let path = destination.display().to_string();
    let csv_err = |source| HarnessError::Csv {
        path: path.clone(),
        source,
    };

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    writer.write_record(COLUMNS).map_err(csv_err)?;
    for row in table.rows() {
        writer.serialize(row).map_err(csv_err)?;
    }
    let bytes = writer.into_inner().map_err(|e| HarnessError::Io {
        path: path.clone(),
        source: e.into_error(),
    })?;

    if let Some(parent) = destination.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| HarnessError::Io {
            path: parent.display().to_string(),
            source: e,
        })?;
    }

    std::fs::write(destination, bytes).map_err(|e| HarnessError::Io {
        path: path.clone(),
        source: e,
    })?;

    tracing::info!("wrote {} rows to {path}", table.len());
    Ok(())
}

/// Reads a results table previously written by [`persist`].
///
/// Any column subset that includes `model`, `latency_sec` and `peak_ram_mb`
/// is accepted, in any order. Missing columns read as zero.
pub fn load(source: &Path) -> Result<ResultTable, HarnessError> {
    let path = source.display().to_string();
    let csv_err = |source| HarnessError::Csv {
        path: path.clone(),
        source,
    };

    let mut reader = csv::Reader::from_path(source).map_err(csv_err)?;
    let rows = reader
        .deserialize::<BenchmarkRecord>()
        .collect::<Result<Vec<_>, _>>()
        .map_err(csv_err)?;

    tracing::debug!("loaded {} rows from {path}", rows.len());
    Ok(ResultTable::from_rows(rows))
}

/// Per-model averages.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct ModelSummary {
    /// Number of rows for the model.
    pub runs: usize,
    pub mean_latency_sec: f64,
    pub mean_throughput_tps: f64,
    pub mean_peak_ram_mb: f64,
}

/// Per-model averages of a result table.
///
/// Iteration is sorted by model identity; callers must not rely on it
/// matching sweep order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SummaryStats {
    models: BTreeMap<String, ModelSummary>,
}

impl SummaryStats {
    pub fn get(&self, model: &str) -> Option<&ModelSummary> {
        self.models.get(model)
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ModelSummary)> {
        self.models.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Renders a fixed-width table for terminal output.
    pub fn render(&self) -> String {
        let mut out = format!(
            "  {:<32} {:>6} {:>12} {:>14} {:>14}\n",
            "Model", "Runs", "Latency (s)", "Throughput", "Peak RAM (MB)",
        );
        out.push_str(&format!("  {}\n", "-".repeat(82)));
        for (model, s) in self.iter() {
            out.push_str(&format!(
                "  {:<32} {:>6} {:>12.4} {:>10.1} t/s {:>14.1}\n",
                truncate(model, 32),
                s.runs,
                s.mean_latency_sec,
                s.mean_throughput_tps,
                s.mean_peak_ram_mb,
            ));
        }
        out
    }
}

/// Groups rows by model and averages latency, throughput, and peak RAM.
pub fn summarize(table: &ResultTable) -> SummaryStats {
    #[derive(Default)]
    struct Acc {
        runs: usize,
        latency: f64,
        throughput: f64,
        peak_ram: f64,
    }

    let mut groups: BTreeMap<&str, Acc> = BTreeMap::new();
    for row in table.rows() {
        let acc = groups.entry(row.model.as_str()).or_default();
        acc.runs += 1;
        acc.latency += row.latency_sec;
        acc.throughput += row.throughput_tps;
        acc.peak_ram += row.peak_ram_mb;
    }

    let models = groups
        .into_iter()
        .map(|(model, acc)| {
            let n = acc.runs as f64;
            let summary = ModelSummary {
                runs: acc.runs,
                mean_latency_sec: acc.latency / n,
                mean_throughput_tps: acc.throughput / n,
                mean_peak_ram_mb: acc.peak_ram / n,
            };
            (model.to_string(), summary)
        })
        .collect();

    SummaryStats { models }
}

/// Truncates a string with ellipsis.
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len - 3).collect();
        format!("{kept}...")
    }
}
