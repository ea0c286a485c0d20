// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # bench-harness
//!
//! Benchmarks causal-LM inference across a set of models and a fixed prompt
//! corpus.
//!
//! The harness takes:
//! - A [`BenchConfig`] naming the corpus, the models, and the output paths.
//! - A [`RunnerFactory`](inference_runner::RunnerFactory) that loads models.
//! - A [`ResourceMonitor`](resource_monitor::ResourceMonitor) bound to the
//!   accelerator capability detected at start-up.
//!
//! And produces a [`ResultTable`] with one [`BenchmarkRecord`] per
//! (model, prompt), merging latency, throughput, peak memory, and lexical
//! quality. [`report`] persists the table as CSV and summarises it per model;
//! [`chart`] renders the summaries as text bar charts.
//!
//! # Pipeline
//! ```text
//! BenchConfig ─► PromptCorpus ─► BenchmarkOrchestrator ─► ResultTable
//!                                  │  monitor(runner.run)      │
//!                                  │  quality::score           ├─► report::persist (CSV)
//!                                  └───────────────────────────┴─► report::summarize
//! ```

pub mod chart;
mod config;
mod error;
mod orchestrator;
pub mod quality;
mod record;
pub mod report;

pub use config::{BenchConfig, DatasetConfig, ModelConfig, OutputConfig};
pub use error::HarnessError;
pub use orchestrator::{run_benchmark, BenchmarkOrchestrator, NoopObserver, SweepObserver};
pub use quality::QualityMetrics;
pub use record::{throughput_tps, BenchmarkRecord, ResultTable, COLUMNS};
pub use report::{ModelSummary, SummaryStats};
