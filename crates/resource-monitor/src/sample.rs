// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Point-in-time memory readings.

/// One reading of process RAM and accelerator memory, both in megabytes.
///
/// `accelerator_mb` is `0.0` when no accelerator instrumentation exists.
#[derive(Debug, Clone, Copy, Default, PartialEq, serde::Serialize)]
pub struct ResourceSample {
    /// Resident memory of the current process.
    pub ram_mb: f64,
    /// Accelerator memory in use.
    pub accelerator_mb: f64,
}

impl ResourceSample {
    /// Field-wise maximum of two samples.
    pub fn max(self, other: Self) -> Self {
        Self {
            ram_mb: self.ram_mb.max(other.ram_mb),
            accelerator_mb: self.accelerator_mb.max(other.accelerator_mb),
        }
    }

    /// Returns a summary string suitable for logging.
    pub fn summary(&self) -> String {
        format!(
            "RAM {:.1} MB, GPU {:.1} MB",
            self.ram_mb, self.accelerator_mb
        )
    }
}
