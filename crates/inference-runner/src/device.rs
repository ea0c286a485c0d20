// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Device placement hints.

use crate::RunnerError;
use std::fmt;

/// Where a backend should place the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Device {
    /// Host CPU.
    Cpu,
    /// CUDA device by ordinal.
    Cuda(usize),
    /// Apple Metal.
    Metal,
}

impl Device {
    /// Resolves a configuration hint.
    ///
    /// `"auto"` takes the placement of the detected accelerator, if it has
    /// one, and falls back to the CPU otherwise. Matching is case-insensitive.
    pub fn resolve(hint: &str, detected: Option<Device>) -> Result<Self, RunnerError> {
        let normalised = hint.trim().to_lowercase();
        match normalised.as_str() {
            "auto" => Ok(detected.unwrap_or(Self::Cpu)),
            "cpu" => Ok(Self::Cpu),
            "cuda" | "gpu" => Ok(Self::Cuda(0)),
            "metal" | "mps" => Ok(Self::Metal),
            other => other
                .strip_prefix("cuda:")
                .and_then(|n| n.parse::<usize>().ok())
                .map(Self::Cuda)
                .ok_or_else(|| RunnerError::UnknownDevice(hint.to_string())),
        }
    }

    /// Returns `true` for any accelerator placement.
    pub fn is_accelerator(&self) -> bool {
        !matches!(self, Self::Cpu)
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cpu => write!(f, "cpu"),
            Self::Cuda(i) => write!(f, "cuda:{i}"),
            Self::Metal => write!(f, "metal"),
        }
    }
}
