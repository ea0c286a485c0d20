// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Integration tests: end-to-end benchmark sweep.
//!
//! These tests drive the orchestrator with stub backends and a scripted
//! memory probe, then push the results through persistence and summary,
//! proving the four crates compose and the sweep keeps its ordering and
//! fail-fast guarantees.

use bench_harness::{
    report, run_benchmark, BenchConfig, BenchmarkOrchestrator, BenchmarkRecord, DatasetConfig,
    HarnessError, ModelConfig, NoopObserver, OutputConfig, SweepObserver,
};
use inference_runner::{Device, RunResult, Runner, RunnerError, RunnerFactory, SyntheticFactory};
use prompt_corpus::CorpusError;
use resource_monitor::{Accelerator, MemoryProbe, MonitorError, ResourceMonitor};
use std::cell::{Cell, RefCell};
use std::path::{Path, PathBuf};

// ── Helpers ────────────────────────────────────────────────────

/// Constant RAM reading.
struct FlatMemory(f64);

impl MemoryProbe for FlatMemory {
    fn resident_mb(&mut self) -> Result<f64, MonitorError> {
        Ok(self.0)
    }
}

/// Returns the same result for every prompt, echoing the prompt as text.
struct StubRunner {
    id: String,
    latency: f64,
    tokens: usize,
    fail_on: Option<String>,
}

impl Runner for StubRunner {
    fn model_id(&self) -> &str {
        &self.id
    }

    fn run(&mut self, prompt: &str, _max_new_tokens: usize) -> Result<RunResult, RunnerError> {
        if self.fail_on.as_deref() == Some(prompt) {
            return Err(RunnerError::GenerationFailed {
                model: self.id.clone(),
                detail: "stub failure".into(),
            });
        }
        Ok(RunResult {
            text: format!("{prompt} reply"),
            latency_seconds: self.latency,
            tokens_generated: self.tokens,
        })
    }
}

/// Counts constructions and can refuse specific models.
#[derive(Default)]
struct StubFactory {
    latency: f64,
    tokens: usize,
    fail_on_prompt: Option<String>,
    unloadable: Option<String>,
    created: RefCell<Vec<String>>,
}

impl StubFactory {
    fn new(latency: f64, tokens: usize) -> Self {
        Self {
            latency,
            tokens,
            ..Default::default()
        }
    }
}

impl RunnerFactory for StubFactory {
    fn create(&self, model_id: &str, _device: Device) -> Result<Box<dyn Runner>, RunnerError> {
        if self.unloadable.as_deref() == Some(model_id) {
            return Err(RunnerError::LoadFailed {
                model: model_id.into(),
                detail: "stub refuses".into(),
            });
        }
        self.created.borrow_mut().push(model_id.to_string());
        Ok(Box::new(StubRunner {
            id: model_id.to_string(),
            latency: self.latency,
            tokens: self.tokens,
            fail_on: self.fail_on_prompt.clone(),
        }))
    }
}

fn monitor() -> ResourceMonitor<FlatMemory> {
    ResourceMonitor::with_probe(FlatMemory(256.0), Accelerator::Unavailable)
}

fn models(names: &[&str]) -> Vec<ModelConfig> {
    names
        .iter()
        .map(|n| ModelConfig {
            name: n.to_string(),
            max_tokens: 16,
        })
        .collect()
}

fn prompts(items: &[&str]) -> Vec<String> {
    items.iter().map(|p| p.to_string()).collect()
}

fn config(dataset: &Path, results: &Path, names: &[&str]) -> BenchConfig {
    BenchConfig {
        device: "auto".into(),
        dataset: DatasetConfig {
            path: dataset.to_path_buf(),
        },
        models: models(names),
        output: OutputConfig {
            results_file: results.to_path_buf(),
            plots_dir: None,
        },
    }
}

fn write_corpus(dir: &Path) -> PathBuf {
    let path = dir.join("prompts.jsonl");
    std::fs::write(
        &path,
        "{\"prompt\": \"What is Rust?\"}\n\n{\"prompt\": \"Define latency.\"}\n",
    )
    .unwrap();
    path
}

// ── Sweep Tests ────────────────────────────────────────────────

#[test]
fn test_sweep_order_model_major() {
    let factory = StubFactory::new(1.0, 4);
    let mut orch = BenchmarkOrchestrator::new(&factory, monitor(), Device::Cpu);
    let table = orch
        .run(&models(&["m1", "m2"]), &prompts(&["p1", "p2", "p3"]))
        .unwrap();

    assert_eq!(table.len(), 6);
    let order: Vec<(&str, &str)> = table
        .rows()
        .iter()
        .map(|r| (r.model.as_str(), r.prompt.as_str()))
        .collect();
    assert_eq!(
        order,
        vec![
            ("m1", "p1"),
            ("m1", "p2"),
            ("m1", "p3"),
            ("m2", "p1"),
            ("m2", "p2"),
            ("m2", "p3"),
        ]
    );
    assert_eq!(*factory.created.borrow(), vec!["m1", "m2"]);
}

#[test]
fn test_throughput_from_stub() {
    let factory = StubFactory::new(2.0, 10);
    let mut orch = BenchmarkOrchestrator::new(&factory, monitor(), Device::Cpu);
    let table = orch.run(&models(&["m"]), &prompts(&["p"])).unwrap();
    assert_eq!(table.rows()[0].throughput_tps, 5.0);
}

#[test]
fn test_zero_latency_throughput() {
    let factory = StubFactory::new(0.0, 10);
    let mut orch = BenchmarkOrchestrator::new(&factory, monitor(), Device::Cpu);
    let table = orch.run(&models(&["m"]), &prompts(&["p"])).unwrap();
    let row = &table.rows()[0];
    assert_eq!(row.throughput_tps, 0.0);
    assert_eq!(row.tokens_generated, 10);
}

#[test]
fn test_record_fields_merged() {
    let factory = StubFactory::new(0.5, 3);
    let monitor = ResourceMonitor::with_probe(FlatMemory(512.0), Accelerator::Fixed(1024.0));
    let mut orch = BenchmarkOrchestrator::new(&factory, monitor, Device::Cuda(0));
    let table = orch.run(&models(&["m"]), &prompts(&["hello"])).unwrap();

    let row = &table.rows()[0];
    assert_eq!(row.peak_ram_mb, 512.0);
    assert_eq!(row.peak_gpu_mb, 1024.0);
    // "hello reply"
    assert_eq!(row.output_length, 2);
    assert_eq!(row.vocab_diversity, 1.0);
    assert!(row.wall_time_sec >= 0.0);
}

#[test]
fn test_generation_failure_aborts_sweep() {
    let factory = StubFactory {
        fail_on_prompt: Some("p2".into()),
        ..StubFactory::new(1.0, 1)
    };
    let mut orch = BenchmarkOrchestrator::new(&factory, monitor(), Device::Cpu);
    let err = orch
        .run(&models(&["m1", "m2"]), &prompts(&["p1", "p2", "p3"]))
        .unwrap_err();

    assert!(matches!(
        err,
        HarnessError::Runner(RunnerError::GenerationFailed { .. })
    ));
    // The second model is never constructed.
    assert_eq!(*factory.created.borrow(), vec!["m1"]);
}

#[test]
fn test_model_load_failure_mid_sweep() {
    let factory = StubFactory {
        unloadable: Some("m2".into()),
        ..StubFactory::new(1.0, 1)
    };
    let mut orch = BenchmarkOrchestrator::new(&factory, monitor(), Device::Cpu);
    let err = orch
        .run(&models(&["m1", "m2", "m3"]), &prompts(&["p"]))
        .unwrap_err();
    assert!(matches!(err, HarnessError::Runner(RunnerError::LoadFailed { .. })));
    assert_eq!(*factory.created.borrow(), vec!["m1"]);
}

#[test]
fn test_empty_corpus_yields_empty_table() {
    let factory = StubFactory::new(1.0, 1);
    let mut orch = BenchmarkOrchestrator::new(&factory, monitor(), Device::Cpu);
    let table = orch.run(&models(&["m1", "m2"]), &[]).unwrap();
    assert!(table.is_empty());
}

#[test]
fn test_observer_sees_progress() {
    #[derive(Default)]
    struct Recorder {
        events: Vec<String>,
    }

    impl SweepObserver for Recorder {
        fn on_model_start(&mut self, model: &ModelConfig, n: usize) {
            self.events.push(format!("start {} {n}", model.name));
        }
        fn on_prompt_done(&mut self, index: usize, record: &BenchmarkRecord) {
            self.events.push(format!("done {} {index}", record.model));
        }
        fn on_model_done(&mut self, model: &ModelConfig) {
            self.events.push(format!("end {}", model.name));
        }
    }

    let factory = StubFactory::new(1.0, 1);
    let mut orch = BenchmarkOrchestrator::new(&factory, monitor(), Device::Cpu);
    let mut recorder = Recorder::default();
    orch.run_with_observer(&models(&["a"]), &prompts(&["x", "y"]), &mut recorder)
        .unwrap();

    assert_eq!(
        recorder.events,
        vec!["start a 2", "done a 0", "done a 1", "end a"]
    );
}

// ── Full Pipeline Tests ────────────────────────────────────────

#[test]
fn test_missing_corpus_fails_before_any_model() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = config(
        &dir.path().join("missing.jsonl"),
        &dir.path().join("results.csv"),
        &["m1"],
    );
    let factory = StubFactory::new(1.0, 1);

    let err = run_benchmark(&cfg, &factory, monitor(), &mut NoopObserver).unwrap_err();
    assert!(matches!(err, HarnessError::Corpus(CorpusError::NotFound { .. })));
    assert!(factory.created.borrow().is_empty());
}

#[test]
fn test_invalid_config_fails_before_corpus() {
    let dir = tempfile::tempdir().unwrap();
    let mut cfg = config(
        &dir.path().join("missing.jsonl"),
        &dir.path().join("results.csv"),
        &["m1"],
    );
    cfg.models[0].max_tokens = 0;

    let err = run_benchmark(&cfg, StubFactory::new(1.0, 1), monitor(), &mut NoopObserver)
        .unwrap_err();
    assert!(matches!(err, HarnessError::Config(_)));
}

#[test]
fn test_auto_device_follows_accelerator() {
    struct DeviceSpy(Cell<Option<Device>>);

    impl RunnerFactory for DeviceSpy {
        fn create(&self, model_id: &str, device: Device) -> Result<Box<dyn Runner>, RunnerError> {
            self.0.set(Some(device));
            SyntheticFactory.create(model_id, device)
        }
    }

    let dir = tempfile::tempdir().unwrap();
    let corpus = write_corpus(dir.path());
    let cfg = config(&corpus, &dir.path().join("r.csv"), &["synthetic/a"]);

    let spy = DeviceSpy(Cell::new(None));
    let gpu = ResourceMonitor::with_probe(FlatMemory(1.0), Accelerator::Fixed(10.0));
    run_benchmark(&cfg, &spy, gpu, &mut NoopObserver).unwrap();
    assert_eq!(spy.0.get(), Some(Device::Cuda(0)));

    run_benchmark(&cfg, &spy, monitor(), &mut NoopObserver).unwrap();
    assert_eq!(spy.0.get(), Some(Device::Cpu));
}

#[test]
fn test_synthetic_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let corpus = write_corpus(dir.path());
    let results = dir.path().join("out/results.csv");
    let cfg = config(&corpus, &results, &["synthetic/tiny", "synthetic/small"]);

    let monitor = ResourceMonitor::new(Accelerator::Unavailable).unwrap();
    let table = run_benchmark(&cfg, SyntheticFactory, monitor, &mut NoopObserver).unwrap();
    assert_eq!(table.len(), 4);
    assert_eq!(table.models(), vec!["synthetic/tiny", "synthetic/small"]);

    for row in table.rows() {
        assert!(row.peak_ram_mb > 0.0);
        assert_eq!(row.peak_gpu_mb, 0.0);
        assert!(row.tokens_generated <= 16);
        assert!((0.0..=1.0).contains(&row.vocab_diversity));
        assert!(row.latency_sec >= 0.0);
    }

    report::persist(&table, &results).unwrap();
    let back = report::load(&results).unwrap();
    assert_eq!(back.len(), 4);
    assert_eq!(back.rows()[2].prompt, "What is Rust?");
    assert_eq!(back.rows()[2].model, "synthetic/small");

    let summary = report::summarize(&back);
    assert_eq!(summary.len(), 2);
    assert_eq!(summary.get("synthetic/tiny").unwrap().runs, 2);
}

#[test]
fn test_unknown_model_with_synthetic_backend() {
    let dir = tempfile::tempdir().unwrap();
    let corpus = write_corpus(dir.path());
    let cfg = config(&corpus, &dir.path().join("r.csv"), &["gpt2"]);

    let err = run_benchmark(&cfg, SyntheticFactory, monitor(), &mut NoopObserver).unwrap_err();
    assert!(matches!(
        err,
        HarnessError::Runner(RunnerError::ModelNotFound { .. })
    ));
}
