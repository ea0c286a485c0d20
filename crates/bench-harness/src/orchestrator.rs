// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The model × prompt sweep.
//!
//! ```text
//! for model in models:                    (config order)
//!     runner = factory.create(model)      (fresh per model)
//!     for prompt in prompts:              (corpus order)
//!         monitored = monitor(runner.run(prompt, max_tokens))
//!         table.push(record(monitored, score(monitored.text)))
//! ```
//!
//! Everything runs on the calling thread, one call at a time. The monitor
//! samples whole-process memory, so concurrent calls would blur which call a
//! peak belongs to. Any error ends the sweep immediately and the rows gathered
//! so far are dropped.

use crate::{quality, BenchConfig, BenchmarkRecord, HarnessError, ModelConfig, ResultTable};
use inference_runner::{Device, Runner, RunnerFactory};
use prompt_corpus::PromptCorpus;
use resource_monitor::{MemoryProbe, ProcessMemory, ResourceMonitor};

/// Progress callbacks invoked during a sweep.
pub trait SweepObserver {
    /// Called before the runner for `model` is constructed.
    fn on_model_start(&mut self, _model: &ModelConfig, _num_prompts: usize) {}

    /// Called after each row is recorded; `index` is the prompt position.
    fn on_prompt_done(&mut self, _index: usize, _record: &BenchmarkRecord) {}

    /// Called after the last prompt of `model`.
    fn on_model_done(&mut self, _model: &ModelConfig) {}
}

/// Observer that ignores every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl SweepObserver for NoopObserver {}

/// Drives the sweep and accumulates the result table.
pub struct BenchmarkOrchestrator<F, P = ProcessMemory> {
    factory: F,
    monitor: ResourceMonitor<P>,
    device: Device,
}

impl<F: RunnerFactory, P: MemoryProbe> BenchmarkOrchestrator<F, P> {
    /// Creates an orchestrator. Runners are placed on `device`.
    pub fn new(factory: F, monitor: ResourceMonitor<P>, device: Device) -> Self {
        Self {
            factory,
            monitor,
            device,
        }
    }

    /// Returns the device runners are placed on.
    pub fn device(&self) -> Device {
        self.device
    }

    /// Runs every model over every prompt.
    pub fn run(
        &mut self,
        models: &[ModelConfig],
        prompts: &[String],
    ) -> Result<ResultTable, HarnessError> {
        self.run_with_observer(models, prompts, &mut NoopObserver)
    }

    /// Like [`run`](Self::run), reporting progress to `observer`.
    pub fn run_with_observer(
        &mut self,
        models: &[ModelConfig],
        prompts: &[String],
        observer: &mut dyn SweepObserver,
    ) -> Result<ResultTable, HarnessError> {
        let mut table = ResultTable::new();

        for model in models {
            tracing::info!(
                "benchmarking '{}' on {}: {} prompts, max_tokens={}",
                model.name,
                self.device,
                prompts.len(),
                model.max_tokens,
            );
            observer.on_model_start(model, prompts.len());

            let mut runner = self.factory.create(&model.name, self.device)?;

            for (index, prompt) in prompts.iter().enumerate() {
                let record = self.measure(runner.as_mut(), model, prompt)?;
                tracing::debug!(
                    "{} #{index}: {:.3}s, {} tokens, {:.1} tok/s, peak {:.1} MB",
                    model.name,
                    record.latency_sec,
                    record.tokens_generated,
                    record.throughput_tps,
                    record.peak_ram_mb,
                );
                observer.on_prompt_done(index, &record);
                table.push(record);
            }

            // Release the model before the next one loads.
            drop(runner);
            observer.on_model_done(model);
        }

        tracing::info!("sweep complete: {} rows", table.len());
        Ok(table)
    }

    fn measure(
        &mut self,
        runner: &mut dyn Runner,
        model: &ModelConfig,
        prompt: &str,
    ) -> Result<BenchmarkRecord, HarnessError> {
        let monitored = self
            .monitor
            .monitor(|| runner.run(prompt, model.max_tokens).map_err(HarnessError::from))?;
        let quality = quality::score(&monitored.result.text);
        Ok(BenchmarkRecord::new(&model.name, prompt, &monitored, quality))
    }
}

/// Validates `config`, loads the corpus, and runs the full sweep.
///
/// Configuration and corpus errors surface before any runner is built.
pub fn run_benchmark<F, P>(
    config: &BenchConfig,
    factory: F,
    monitor: ResourceMonitor<P>,
    observer: &mut dyn SweepObserver,
) -> Result<ResultTable, HarnessError>
where
    F: RunnerFactory,
    P: MemoryProbe,
{
    config.validate()?;
    let prompts = PromptCorpus::load(&config.dataset.path)?.into_prompts();
    let device = config.resolve_device(monitor.accelerator())?;

    BenchmarkOrchestrator::new(factory, monitor, device).run_with_observer(
        &config.models,
        &prompts,
        observer,
    )
}
