// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Cheap lexical statistics over generated text.
//!
//! Tokens are whitespace-separated runs, taken verbatim: no case folding and
//! no punctuation stripping, so `"The"` and `"the."` are distinct.

use std::collections::HashSet;

/// Lexical statistics for one generated text.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct QualityMetrics {
    /// Number of whitespace-separated tokens.
    pub output_length: usize,
    /// Distinct tokens over total tokens; `0.0` for empty text.
    pub vocab_diversity: f64,
}

/// Scores `text`.
pub fn score(text: &str) -> QualityMetrics {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    let total = tokens.len();
    if total == 0 {
        return QualityMetrics {
            output_length: 0,
            vocab_diversity: 0.0,
        };
    }

    let unique: HashSet<&str> = tokens.iter().copied().collect();
    QualityMetrics {
        output_length: total,
        vocab_diversity: unique.len() as f64 / total as f64,
    }
}
