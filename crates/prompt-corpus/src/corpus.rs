// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! JSON Lines prompt corpus.
//!
//! One record per line, each carrying a string `prompt` field. Other fields
//! are ignored:
//! ```text
//! {"id": "q1", "prompt": "Explain the CAP theorem."}
//!
//! {"id": "q2", "prompt": "Summarise the plot of Hamlet."}
//! ```
//! Blank lines are skipped. Anything else that fails to parse aborts the load.

use crate::CorpusError;
use std::path::Path;

#[derive(serde::Deserialize)]
struct RawRecord {
    prompt: Option<String>,
}

/// An ordered, immutable sequence of prompts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromptCorpus {
    prompts: Vec<String>,
}

impl PromptCorpus {
    /// Loads a corpus from a JSONL file.
    pub fn load(path: &Path) -> Result<Self, CorpusError> {
        if !path.exists() {
            return Err(CorpusError::NotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| CorpusError::ReadError {
            path: path.display().to_string(),
            source: e,
        })?;

        let corpus = Self::parse(&content, path)?;
        tracing::info!("loaded {} prompts from {}", corpus.len(), path.display());
        Ok(corpus)
    }

    /// Parses JSONL content. `source_path` is only used in error messages.
    pub fn parse(content: &str, source_path: &Path) -> Result<Self, CorpusError> {
        let mut prompts = Vec::new();

        for (i, line) in content.lines().enumerate() {
            let line_no = i + 1;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let record: RawRecord =
                serde_json::from_str(line).map_err(|e| CorpusError::Parse {
                    path: source_path.display().to_string(),
                    line: line_no,
                    source: e,
                })?;

            let prompt = record.prompt.ok_or_else(|| CorpusError::MissingPrompt {
                path: source_path.display().to_string(),
                line: line_no,
            })?;
            prompts.push(prompt);
        }

        Ok(Self { prompts })
    }

    /// Returns the prompts in file order.
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    /// Consumes the corpus, returning the prompts in file order.
    pub fn into_prompts(self) -> Vec<String> {
        self.prompts
    }

    /// Number of prompts.
    pub fn len(&self) -> usize {
        self.prompts.len()
    }

    /// Returns `true` if the corpus holds no prompts.
    pub fn is_empty(&self) -> bool {
        self.prompts.is_empty()
    }

    /// Iterates over the prompts in file order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.prompts.iter().map(String::as_str)
    }
}
