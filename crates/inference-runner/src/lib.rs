// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # inference-runner
//!
//! The pluggable inference backend seen by the benchmark harness.
//!
//! A backend is two things:
//! - a [`RunnerFactory`] that loads a model identity onto a [`Device`], and
//! - the resulting [`Runner`], which turns one prompt into a [`RunResult`].
//!
//! The harness only ever talks to these traits, so measurement and
//! aggregation are backend-agnostic. [`SyntheticFactory`] is the built-in
//! backend: deterministic, weightless, and suitable for exercising the whole
//! pipeline without model files.

mod device;
mod error;
mod runner;
mod synthetic;

pub use device::Device;
pub use error::RunnerError;
pub use runner::{RunResult, Runner, RunnerFactory};
pub use synthetic::{SyntheticFactory, SyntheticRunner, SYNTHETIC_PREFIX};
