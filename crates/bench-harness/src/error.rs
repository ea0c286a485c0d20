// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for the benchmark harness.

/// Errors that abort a sweep or a report.
#[derive(Debug, thiserror::Error)]
pub enum HarnessError {
    /// The configuration document is unreadable or invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// The prompt corpus could not be loaded.
    #[error("corpus error: {0}")]
    Corpus(#[from] prompt_corpus::CorpusError),

    /// Process memory could not be sampled.
    #[error("monitor error: {0}")]
    Monitor(#[from] resource_monitor::MonitorError),

    /// Model loading or generation failed.
    #[error("inference error: {0}")]
    Runner(#[from] inference_runner::RunnerError),

    /// The results table could not be encoded or decoded.
    #[error("results table '{path}': {source}")]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },

    /// Filesystem failure while writing an artifact.
    #[error("I/O error on '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
