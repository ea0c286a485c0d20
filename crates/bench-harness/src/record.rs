// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Per-run records and the append-only result table.

use crate::QualityMetrics;
use inference_runner::RunResult;
use resource_monitor::MonitoredResult;
use std::collections::HashSet;

/// Column order of the persisted results table.
pub const COLUMNS: [&str; 9] = [
    "model",
    "prompt",
    "latency_sec",
    "throughput_tps",
    "tokens_generated",
    "peak_ram_mb",
    "peak_gpu_mb",
    "output_length",
    "vocab_diversity",
];

/// One (model, prompt) measurement.
///
/// Field order matches [`COLUMNS`]; `wall_time_sec` is kept in memory only.
/// Only `model`, `latency_sec` and `peak_ram_mb` are required when reading a
/// table back; the remaining columns default to zero or empty.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BenchmarkRecord {
    pub model: String,
    #[serde(default)]
    pub prompt: String,
    /// Backend-reported generation latency.
    pub latency_sec: f64,
    /// `tokens_generated / latency_sec`, or `0.0` when latency is not positive.
    #[serde(default)]
    pub throughput_tps: f64,
    #[serde(default)]
    pub tokens_generated: usize,
    pub peak_ram_mb: f64,
    #[serde(default)]
    pub peak_gpu_mb: f64,
    #[serde(default)]
    pub output_length: usize,
    #[serde(default)]
    pub vocab_diversity: f64,
    /// Monitor-measured wall time around the call, sampling included.
    #[serde(skip)]
    pub wall_time_sec: f64,
}

impl BenchmarkRecord {
    /// Flattens a monitored run and its quality score into one record.
    pub fn new(
        model: &str,
        prompt: &str,
        monitored: &MonitoredResult<RunResult>,
        quality: QualityMetrics,
    ) -> Self {
        let run = &monitored.result;
        Self {
            model: model.to_string(),
            prompt: prompt.to_string(),
            latency_sec: run.latency_seconds,
            throughput_tps: throughput_tps(run.tokens_generated, run.latency_seconds),
            tokens_generated: run.tokens_generated,
            peak_ram_mb: monitored.peak_ram_mb,
            peak_gpu_mb: monitored.peak_accelerator_mb,
            output_length: quality.output_length,
            vocab_diversity: quality.vocab_diversity,
            wall_time_sec: monitored.wall_time_seconds,
        }
    }
}

/// Tokens per second, defined as `0.0` for non-positive latency.
pub fn throughput_tps(tokens_generated: usize, latency_sec: f64) -> f64 {
    if latency_sec > 0.0 {
        tokens_generated as f64 / latency_sec
    } else {
        0.0
    }
}

/// Ordered sweep results, one row per (model, prompt).
///
/// Rows are only ever appended, in model-major, prompt-minor order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultTable {
    rows: Vec<BenchmarkRecord>,
}

impl ResultTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a table from rows already in sweep order.
    pub fn from_rows(rows: Vec<BenchmarkRecord>) -> Self {
        Self { rows }
    }

    pub(crate) fn push(&mut self, record: BenchmarkRecord) {
        self.rows.push(record);
    }

    pub fn rows(&self) -> &[BenchmarkRecord] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Distinct model identities in first-seen order.
    pub fn models(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        let mut ordered = Vec::new();
        for row in &self.rows {
            if seen.insert(row.model.as_str()) {
                ordered.push(row.model.as_str());
            }
        }
        ordered
    }
}
