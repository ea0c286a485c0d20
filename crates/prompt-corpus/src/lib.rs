// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # prompt-corpus
//!
//! Loads the fixed prompt corpus every model is benchmarked against.
//!
//! # Example
//! ```no_run
//! use prompt_corpus::PromptCorpus;
//! use std::path::Path;
//!
//! let corpus = PromptCorpus::load(Path::new("data/prompts.jsonl"))?;
//! for prompt in corpus.iter() {
//!     println!("{prompt}");
//! }
//! # Ok::<(), prompt_corpus::CorpusError>(())
//! ```

mod corpus;
mod error;

pub use corpus::PromptCorpus;
pub use error::CorpusError;

/// Loads the prompts of a JSONL corpus in file order.
///
/// This is a convenience wrapper around [`PromptCorpus::load()`].
pub fn load_prompts(path: &std::path::Path) -> Result<Vec<String>, CorpusError> {
    PromptCorpus::load(path).map(PromptCorpus::into_prompts)
}
