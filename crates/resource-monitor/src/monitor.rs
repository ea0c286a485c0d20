// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Wall time and peak memory around an opaque call.
//!
//! ```text
//! sample() ──► start clock ──► operation() ──► stop clock ──► sample()
//!    before                                                     after
//! ```
//!
//! Peak usage is `max(before, after)`. Only two points are sampled, so a
//! transient spike strictly inside the call that falls back before it returns
//! is not seen.

use crate::{Accelerator, MemoryProbe, MonitorError, ProcessMemory, ResourceSample};
use std::time::Instant;

/// The value returned by a monitored operation together with its measurements.
#[derive(Debug, Clone)]
pub struct MonitoredResult<T> {
    /// Whatever the operation returned.
    pub result: T,
    /// `max(before.ram_mb, after.ram_mb)`.
    pub peak_ram_mb: f64,
    /// `max(before.accelerator_mb, after.accelerator_mb)`.
    pub peak_accelerator_mb: f64,
    /// Monotonic wall-clock duration of the call, in seconds.
    pub wall_time_seconds: f64,
    /// Reading taken before the call.
    pub before: ResourceSample,
    /// Reading taken after the call.
    pub after: ResourceSample,
}

/// Samples memory before and after an arbitrary operation.
pub struct ResourceMonitor<P = ProcessMemory> {
    memory: P,
    accelerator: Accelerator,
}

impl ResourceMonitor<ProcessMemory> {
    /// Creates a monitor for the current process.
    ///
    /// Fails only if the current process cannot be inspected at all.
    pub fn new(accelerator: Accelerator) -> Result<Self, MonitorError> {
        Ok(Self::with_probe(ProcessMemory::current()?, accelerator))
    }
}

impl<P: MemoryProbe> ResourceMonitor<P> {
    /// Creates a monitor with an explicit memory probe.
    pub fn with_probe(memory: P, accelerator: Accelerator) -> Self {
        Self {
            memory,
            accelerator,
        }
    }

    /// Returns the accelerator capability this monitor was built with.
    pub fn accelerator(&self) -> &Accelerator {
        &self.accelerator
    }

    /// Takes one reading of RAM and accelerator memory.
    pub fn sample(&mut self) -> Result<ResourceSample, MonitorError> {
        Ok(ResourceSample {
            ram_mb: self.memory.resident_mb()?,
            accelerator_mb: self.accelerator.used_mb(),
        })
    }

    /// Invokes `operation` once and measures around it.
    ///
    /// The operation is neither retried nor interrupted. Its error is
    /// returned as-is and no after-sample is taken. The only error the monitor
    /// itself contributes is a failed RAM reading, converted through
    /// `E: From<MonitorError>`.
    pub fn monitor<T, E, F>(&mut self, operation: F) -> Result<MonitoredResult<T>, E>
    where
        F: FnOnce() -> Result<T, E>,
        E: From<MonitorError>,
    {
        let before = self.sample()?;

        let start = Instant::now();
        let result = operation()?;
        let wall_time = start.elapsed();

        let after = self.sample()?;
        let peak = before.max(after);

        tracing::debug!(
            "monitored call: {:.3}s, before [{}], after [{}]",
            wall_time.as_secs_f64(),
            before.summary(),
            after.summary(),
        );

        Ok(MonitoredResult {
            result,
            peak_ram_mb: peak.ram_mb,
            peak_accelerator_mb: peak.accelerator_mb,
            wall_time_seconds: wall_time.as_secs_f64(),
            before,
            after,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::time::Duration;

    /// Replays a fixed sequence of RAM readings.
    struct Scripted(VecDeque<f64>);

    impl Scripted {
        fn new(readings: &[f64]) -> Self {
            Self(readings.iter().copied().collect())
        }
    }

    impl MemoryProbe for Scripted {
        fn resident_mb(&mut self) -> Result<f64, MonitorError> {
            self.0.pop_front().ok_or_else(|| MonitorError::ProcessUnavailable {
                detail: "script exhausted".into(),
            })
        }
    }

    #[derive(Debug, PartialEq)]
    enum OpError {
        Failed(&'static str),
        Monitor(String),
    }

    impl From<MonitorError> for OpError {
        fn from(e: MonitorError) -> Self {
            OpError::Monitor(e.to_string())
        }
    }

    #[test]
    fn test_peak_is_max_of_two_samples() {
        let mut m = ResourceMonitor::with_probe(Scripted::new(&[100.0, 140.0]), Accelerator::Unavailable);
        let out = m.monitor(|| Ok::<_, OpError>(7)).unwrap();
        assert_eq!(out.result, 7);
        assert_eq!(out.peak_ram_mb, 140.0);
        assert_eq!(out.before.ram_mb, 100.0);
        assert_eq!(out.after.ram_mb, 140.0);

        let mut m = ResourceMonitor::with_probe(Scripted::new(&[200.0, 150.0]), Accelerator::Unavailable);
        let out = m.monitor(|| Ok::<_, OpError>(())).unwrap();
        assert_eq!(out.peak_ram_mb, 200.0);
    }

    #[test]
    fn test_no_accelerator_reads_zero() {
        let mut m = ResourceMonitor::with_probe(Scripted::new(&[1.0, 1.0]), Accelerator::Unavailable);
        let out = m.monitor(|| Ok::<_, OpError>(())).unwrap();
        assert_eq!(out.peak_accelerator_mb, 0.0);
    }

    #[test]
    fn test_fake_accelerator() {
        let mut m = ResourceMonitor::with_probe(Scripted::new(&[1.0, 1.0]), Accelerator::Fixed(2048.0));
        let out = m.monitor(|| Ok::<_, OpError>(())).unwrap();
        assert_eq!(out.peak_accelerator_mb, 2048.0);
        assert_eq!(m.accelerator(), &Accelerator::Fixed(2048.0));
    }

    #[test]
    fn test_wall_time_covers_call() {
        let mut m = ResourceMonitor::with_probe(Scripted::new(&[1.0, 1.0]), Accelerator::Unavailable);
        let out = m
            .monitor(|| {
                std::thread::sleep(Duration::from_millis(20));
                Ok::<_, OpError>(())
            })
            .unwrap();
        assert!(out.wall_time_seconds >= 0.020);
    }

    #[test]
    fn test_operation_error_propagates_unchanged() {
        let mut m = ResourceMonitor::with_probe(Scripted::new(&[1.0]), Accelerator::Unavailable);
        let mut calls = 0;
        let err = m
            .monitor(|| {
                calls += 1;
                Err::<(), _>(OpError::Failed("generation failed"))
            })
            .unwrap_err();
        assert_eq!(err, OpError::Failed("generation failed"));
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_ram_failure_is_fatal() {
        let mut m = ResourceMonitor::with_probe(Scripted::new(&[]), Accelerator::Unavailable);
        let mut called = false;
        let err = m
            .monitor(|| {
                called = true;
                Ok::<_, OpError>(())
            })
            .unwrap_err();
        assert!(matches!(err, OpError::Monitor(_)));
        assert!(!called);
    }

    #[test]
    fn test_real_process_monitor() {
        let mut m = ResourceMonitor::new(Accelerator::Unavailable).unwrap();
        let out = m.monitor(|| Ok::<_, MonitorError>(vec![0u8; 1024])).unwrap();
        assert!(out.peak_ram_mb > 0.0);
        assert!(out.wall_time_seconds >= 0.0);
        assert_eq!(out.result.len(), 1024);
    }
}
