// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Benchmark configuration loaded from TOML files or constructed programmatically.
//!
//! # TOML Format
//! ```toml
//! device = "auto"
//!
//! [dataset]
//! path = "data/prompts.jsonl"
//!
//! [[models]]
//! name = "synthetic/tiny"
//! max_tokens = 32
//!
//! [[models]]
//! name = "synthetic/small"
//! max_tokens = 64
//!
//! [output]
//! results_file = "results/results.csv"
//! plots_dir = "results/plots"
//! ```

use crate::HarnessError;
use inference_runner::Device;
use resource_monitor::Accelerator;
use std::path::{Path, PathBuf};

/// Top-level benchmark configuration.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BenchConfig {
    /// Placement hint: `"auto"`, `"cpu"`, `"cuda"`, `"cuda:N"`, `"metal"`.
    #[serde(default = "default_device")]
    pub device: String,
    /// Prompt corpus.
    pub dataset: DatasetConfig,
    /// Models to benchmark, in sweep order.
    pub models: Vec<ModelConfig>,
    /// Where results go.
    pub output: OutputConfig,
}

/// Location of the prompt corpus.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DatasetConfig {
    /// Path to a JSONL file with one `{"prompt": ...}` record per line.
    pub path: PathBuf,
}

/// One model under test.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ModelConfig {
    /// Model identity handed to the backend.
    pub name: String,
    /// Generation budget per prompt (new tokens). Must be positive.
    pub max_tokens: usize,
}

/// Output artifacts.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct OutputConfig {
    /// CSV results table, overwritten on every sweep.
    pub results_file: PathBuf,
    /// Directory for text charts; none are written when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plots_dir: Option<PathBuf>,
}

fn default_device() -> String {
    "auto".to_string()
}

impl BenchConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, HarnessError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            HarnessError::Config(format!("cannot read config '{}': {e}", path.display()))
        })?;
        Self::from_toml(&content)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, HarnessError> {
        toml::from_str(toml_str)
            .map_err(|e| HarnessError::Config(format!("TOML parse error: {e}")))
    }

    /// Serialises configuration to TOML.
    pub fn to_toml(&self) -> Result<String, HarnessError> {
        toml::to_string_pretty(self)
            .map_err(|e| HarnessError::Config(format!("TOML serialise error: {e}")))
    }

    /// Checks everything that can be checked before touching the corpus.
    pub fn validate(&self) -> Result<(), HarnessError> {
        if self.models.is_empty() {
            return Err(HarnessError::Config("no models configured".into()));
        }
        for (i, model) in self.models.iter().enumerate() {
            if model.name.trim().is_empty() {
                return Err(HarnessError::Config(format!("models[{i}] has an empty name")));
            }
            if model.max_tokens == 0 {
                return Err(HarnessError::Config(format!(
                    "model '{}': max_tokens must be greater than 0",
                    model.name
                )));
            }
        }
        if self.output.results_file.as_os_str().is_empty() {
            return Err(HarnessError::Config("output.results_file is empty".into()));
        }
        Device::resolve(&self.device, None)
            .map_err(|e| HarnessError::Config(e.to_string()))?;
        Ok(())
    }

    /// Resolves the device hint against the detected accelerator.
    pub fn resolve_device(&self, accelerator: &Accelerator) -> Result<Device, HarnessError> {
        Ok(Device::resolve(&self.device, placement_for(accelerator))?)
    }
}

/// Placement a backend can use for the detected accelerator.
///
/// A DRM-only device has no backend placement, so `"auto"` stays on the CPU
/// there even though its memory is still sampled.
fn placement_for(accelerator: &Accelerator) -> Option<Device> {
    match accelerator {
        Accelerator::NvidiaSmi { device_index } => Some(Device::Cuda(*device_index as usize)),
        Accelerator::Fixed(_) => Some(Device::Cuda(0)),
        Accelerator::DrmSysfs { path } => {
            tracing::debug!(
                "no backend placement for {}, auto resolves to cpu",
                path.display()
            );
            None
        }
        Accelerator::Unavailable => None,
    }
}
