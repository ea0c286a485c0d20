// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The backend capability: construct from a model identity, then generate.

use crate::{Device, RunnerError};

/// Output of one generation call.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct RunResult {
    /// Decoded output text.
    pub text: String,
    /// Time the backend spent generating, in seconds.
    pub latency_seconds: f64,
    /// Output length minus prompt length, in the model's own tokens.
    pub tokens_generated: usize,
}

/// A loaded model that turns a prompt into text.
///
/// `run` blocks until generation finishes and decodes greedily.
pub trait Runner {
    /// Identity of the loaded model.
    fn model_id(&self) -> &str;

    /// Generates at most `max_new_tokens` tokens for `prompt`.
    fn run(&mut self, prompt: &str, max_new_tokens: usize) -> Result<RunResult, RunnerError>;
}

/// Builds a [`Runner`] for a model identity.
///
/// Construction may be expensive (weights, tokenizer). Callers construct one
/// runner per model and drop it before moving on.
pub trait RunnerFactory {
    /// Loads `model_id` onto `device`.
    fn create(&self, model_id: &str, device: Device) -> Result<Box<dyn Runner>, RunnerError>;
}

impl<F: RunnerFactory + ?Sized> RunnerFactory for &F {
    fn create(&self, model_id: &str, device: Device) -> Result<Box<dyn Runner>, RunnerError> {
        (**self).create(model_id, device)
    }
}
