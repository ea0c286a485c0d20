// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Accelerator (GPU) memory instrumentation.
//!
//! Availability is decided once, at process start, by [`Accelerator::detect`].
//! The resulting value is a capability: it is handed to the
//! [`ResourceMonitor`](crate::ResourceMonitor) and never re-probed.
//!
//! # Probes
//! 1. **NVIDIA**: `nvidia-smi --query-gpu=memory.used` on device 0 (MiB).
//! 2. **DRM sysfs**: `/sys/class/drm/card0/device/mem_info_vram_used`
//!    (bytes), exposed by the `amdgpu` kernel driver.
//!
//! When neither probe answers, the capability is [`Accelerator::Unavailable`]
//! and every reading is `0.0`. That is a valid state, not an error.

use crate::MonitorError;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Default DRM sysfs counter for VRAM in use.
const DRM_VRAM_USED_PATH: &str = "/sys/class/drm/card0/device/mem_info_vram_used";

const NVIDIA_SMI: &str = "nvidia-smi";

/// Accelerator memory instrumentation available to this process.
#[derive(Debug, Clone, PartialEq)]
pub enum Accelerator {
    /// No instrumentation could be initialised; readings are always `0.0`.
    Unavailable,
    /// NVIDIA GPU queried through `nvidia-smi`.
    NvidiaSmi { device_index: u32 },
    /// A DRM device exposing a VRAM counter in sysfs.
    DrmSysfs { path: PathBuf },
    /// A constant reading in megabytes. Used to fake a device in tests.
    Fixed(f64),
}

impl Accelerator {
    /// Probes for accelerator instrumentation.
    ///
    /// Never fails: any probe error simply means that probe is skipped.
    pub fn detect() -> Self {
        if query_nvidia_smi(0).is_ok() {
            tracing::info!("accelerator instrumentation: nvidia-smi (device 0)");
            return Self::NvidiaSmi { device_index: 0 };
        }

        if let Some(drm) = Self::probe_drm(Path::new(DRM_VRAM_USED_PATH)) {
            tracing::info!("accelerator instrumentation: {}", drm.name());
            return drm;
        }

        tracing::info!("no accelerator instrumentation found; GPU readings will be 0");
        Self::Unavailable
    }

    /// Returns a DRM capability if `path` holds a readable VRAM counter.
    pub(crate) fn probe_drm(path: &Path) -> Option<Self> {
        match read_drm_vram_mb(path) {
            Ok(_) => Some(Self::DrmSysfs {
                path: path.to_path_buf(),
            }),
            Err(e) => {
                tracing::debug!("DRM probe skipped: {e}");
                None
            }
        }
    }

    /// Returns `true` unless this is [`Accelerator::Unavailable`].
    pub fn is_available(&self) -> bool {
        !matches!(self, Self::Unavailable)
    }

    /// Returns accelerator memory in use, in megabytes.
    ///
    /// A read that fails after successful detection degrades to `0.0`.
    pub fn used_mb(&self) -> f64 {
        let reading = match self {
            Self::Unavailable => return 0.0,
            Self::Fixed(mb) => return *mb,
            Self::NvidiaSmi { device_index } => query_nvidia_smi(*device_index),
            Self::DrmSysfs { path } => read_drm_vram_mb(path),
        };

        reading.unwrap_or_else(|e| {
            tracing::warn!("accelerator reading failed, using 0: {e}");
            0.0
        })
    }

    /// Short human-readable description of the capability.
    pub fn name(&self) -> String {
        match self {
            Self::Unavailable => "none".to_string(),
            Self::NvidiaSmi { device_index } => format!("nvidia-smi (device {device_index})"),
            Self::DrmSysfs { path } => format!("drm sysfs ({})", path.display()),
            Self::Fixed(mb) => format!("fixed ({mb:.1} MB)"),
        }
    }
}

/// Runs `nvidia-smi` for one device and returns used memory in MB.
fn query_nvidia_smi(device_index: u32) -> Result<f64, MonitorError> {
    let id_arg = format!("--id={device_index}");
    let output = Command::new(NVIDIA_SMI)
        .args([
            "--query-gpu=memory.used",
            "--format=csv,noheader,nounits",
            id_arg.as_str(),
        ])
        .output()
        .map_err(|e| MonitorError::CommandFailed {
            command: NVIDIA_SMI.to_string(),
            detail: e.to_string(),
        })?;

    if !output.status.success() {
        return Err(MonitorError::CommandFailed {
            command: NVIDIA_SMI.to_string(),
            detail: format!("exited with {}", output.status),
        });
    }

    parse_nvidia_smi_used(&String::from_utf8_lossy(&output.stdout))
}

/// Parses the first line of `nvidia-smi --query-gpu=memory.used` (MiB).
pub(crate) fn parse_nvidia_smi_used(stdout: &str) -> Result<f64, MonitorError> {
    let line = stdout.lines().next().unwrap_or("").trim();
    line.parse::<f64>().map_err(|_| MonitorError::ParseError {
        path: NVIDIA_SMI.to_string(),
        detail: format!("expected MiB value, got '{line}'"),
    })
}

/// Reads a DRM VRAM counter (bytes) and converts it to MB.
fn read_drm_vram_mb(path: &Path) -> Result<f64, MonitorError> {
    let content = read_sysfs_file(path)?;
    let bytes = content.parse::<u64>().map_err(|_| MonitorError::ParseError {
        path: path.display().to_string(),
        detail: format!("expected integer byte count, got '{content}'"),
    })?;
    Ok(bytes as f64 / (1024.0 * 1024.0))
}

/// Reads a sysfs file and returns its trimmed content.
fn read_sysfs_file(path: &Path) -> Result<String, MonitorError> {
    if !path.exists() {
        return Err(MonitorError::NotAvailable {
            path: path.display().to_string(),
        });
    }
    std::fs::read_to_string(path)
        .map(|s| s.trim().to_string())
        .map_err(|e| MonitorError::ReadError {
            path: path.display().to_string(),
            source: e,
        })
}
