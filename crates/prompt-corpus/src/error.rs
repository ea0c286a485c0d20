// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for corpus loading.

/// Errors raised while loading a prompt corpus. All of them are fatal.
#[derive(Debug, thiserror::Error)]
pub enum CorpusError {
    /// The corpus file does not exist.
    #[error("dataset file not found: {path}")]
    NotFound { path: String },

    /// The corpus file exists but could not be read.
    #[error("failed to read {path}: {source}")]
    ReadError {
        path: String,
        source: std::io::Error,
    },

    /// A non-blank line is not a valid JSON record.
    #[error("{path}:{line}: malformed record: {source}")]
    Parse {
        path: String,
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    /// A record has no `prompt` field.
    #[error("{path}:{line}: record has no 'prompt' field")]
    MissingPrompt { path: String, line: usize },
}
