// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for resource monitoring.

/// Errors that can occur when sampling process or accelerator memory.
#[derive(Debug, thiserror::Error)]
pub enum MonitorError {
    /// Failed to read a sysfs counter.
    #[error("failed to read {path}: {source}")]
    ReadError {
        path: String,
        source: std::io::Error,
    },

    /// Failed to parse a numeric value from a counter or tool output.
    #[error("failed to parse value from {path}: {detail}")]
    ParseError { path: String, detail: String },

    /// The expected sysfs counter does not exist.
    #[error("counter not found: {path}")]
    NotAvailable { path: String },

    /// An instrumentation command could not be run or exited unsuccessfully.
    #[error("command '{command}' failed: {detail}")]
    CommandFailed { command: String, detail: String },

    /// The current process could not be inspected. This is fatal: resident
    /// memory is the one reading the monitor cannot do without.
    #[error("cannot read memory of the current process: {detail}")]
    ProcessUnavailable { detail: String },
}
