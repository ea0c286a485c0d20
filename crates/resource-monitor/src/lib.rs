// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # resource-monitor
//!
//! Measures wall time and memory footprint around an arbitrary, opaque call
//! such as one inference request.
//!
//! # Monitored Metrics
//! - **Resident memory** of the current process (via `sysinfo`).
//! - **Accelerator memory** in use, when instrumentation exists.
//! - **Wall time** on a monotonic clock.
//!
//! # Graceful Degradation
//! Accelerator instrumentation is probed once at start-up. If no probe
//! answers (no GPU, no driver, running in a container), every accelerator
//! reading is `0.0` for the life of the process. Only the resident-memory
//! reading is required; losing it is a hard error.
//!
//! # Example
//! ```no_run
//! use resource_monitor::{Accelerator, MonitorError, ResourceMonitor};
//!
//! let mut monitor = ResourceMonitor::new(Accelerator::detect())?;
//! let out = monitor.monitor(|| Ok::<_, MonitorError>(2 + 2))?;
//! println!("{} in {:.3}s, peak {:.1} MB", out.result, out.wall_time_seconds, out.peak_ram_mb);
//! # Ok::<(), MonitorError>(())
//! ```

mod accelerator;
mod error;
mod memory;
mod monitor;
mod sample;

pub use accelerator::Accelerator;
pub use error::MonitorError;
pub use memory::{MemoryProbe, ProcessMemory};
pub use monitor::{MonitoredResult, ResourceMonitor};
pub use sample::ResourceSample;
