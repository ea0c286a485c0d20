// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Resident memory of the current process.
//!
//! [`ProcessMemory`] refreshes only the current PID through `sysinfo`, so a
//! reading costs a single `/proc/<pid>` scan on Linux rather than a walk of
//! the whole process table.

use crate::MonitorError;
use sysinfo::{Pid, ProcessRefreshKind, ProcessesToUpdate, System};

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// A source of resident-memory readings, in megabytes.
///
/// The production implementation is [`ProcessMemory`]; tests substitute
/// scripted readings.
pub trait MemoryProbe {
    /// Returns the current resident set size in megabytes.
    fn resident_mb(&mut self) -> Result<f64, MonitorError>;
}

/// Reads the resident set size of the running process.
pub struct ProcessMemory {
    system: System,
    pid: Pid,
}

impl ProcessMemory {
    /// Binds a reader to the current process.
    pub fn current() -> Result<Self, MonitorError> {
        let pid = sysinfo::get_current_pid().map_err(|e| MonitorError::ProcessUnavailable {
            detail: e.to_string(),
        })?;
        Ok(Self {
            system: System::new(),
            pid,
        })
    }

    /// Returns the PID this reader is bound to.
    pub fn pid(&self) -> u32 {
        self.pid.as_u32()
    }
}

impl MemoryProbe for ProcessMemory {
    fn resident_mb(&mut self) -> Result<f64, MonitorError> {
        self.system.refresh_processes_specifics(
            ProcessesToUpdate::Some(&[self.pid]),
            true,
            ProcessRefreshKind::new().with_memory(),
        );

        let bytes = self
            .system
            .process(self.pid)
            .map(|p| p.memory())
            .ok_or_else(|| MonitorError::ProcessUnavailable {
                detail: format!("pid {} not found after refresh", self.pid),
            })?;

        Ok(bytes as f64 / BYTES_PER_MB)
    }
}
