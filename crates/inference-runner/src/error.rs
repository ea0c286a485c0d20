// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for inference backends.

/// Errors raised while constructing a runner or generating text.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// No backend knows how to load this model identity.
    #[error("model '{model}' not found: {detail}")]
    ModelNotFound { model: String, detail: String },

    /// The backend recognised the model but could not load it.
    #[error("failed to load model '{model}': {detail}")]
    LoadFailed { model: String, detail: String },

    /// The device hint could not be parsed.
    #[error("unknown device '{0}'; expected 'auto', 'cpu', 'cuda', 'cuda:N', or 'metal'")]
    UnknownDevice(String),

    /// Generation failed for one prompt.
    #[error("generation failed for model '{model}': {detail}")]
    GenerationFailed { model: String, detail: String },
}
