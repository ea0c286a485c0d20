// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `infer-bench run` command: sweep models × prompts and persist results.
//!
//! Prints a progress bar per model, then the per-model summary table. Any
//! error aborts the sweep; the results file is only written once every model
//! has finished.

use bench_harness::{
    chart, report, run_benchmark, BenchConfig, BenchmarkRecord, ModelConfig, SweepObserver,
};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use inference_runner::SyntheticFactory;
use resource_monitor::{Accelerator, ResourceMonitor};
use std::path::PathBuf;

pub fn execute(config_path: PathBuf) -> anyhow::Result<()> {
    super::banner("infer-bench · Benchmark Sweep");

    // ── Configuration ──────────────────────────────────────────
    let config = BenchConfig::from_file(&config_path)?;

    println!("  Config:   {}", config_path.display());
    println!("   Dataset: {}", config.dataset.path.display());
    println!("   Device:  {}", config.device);
    println!(
        "   Models:  {:?}",
        config.models.iter().map(|m| m.name.as_str()).collect::<Vec<_>>(),
    );
    println!("   Output:  {}", config.output.results_file.display());

    // ── Instrumentation ────────────────────────────────────────
    let accelerator = Accelerator::detect();
    println!("   GPU mem: {}", accelerator.name());
    println!();

    let monitor = ResourceMonitor::new(accelerator)?;

    // ── Sweep ──────────────────────────────────────────────────
    let mut progress = Progress::default();
    let table = run_benchmark(&config, SyntheticFactory, monitor, &mut progress)?;

    report::persist(&table, &config.output.results_file)?;

    println!();
    println!("  Benchmark completed successfully.");
    println!(
        "  {} rows written to {}",
        table.len(),
        config.output.results_file.display(),
    );
    println!();

    // ── Summary ────────────────────────────────────────────────
    let summary = report::summarize(&table);
    println!("  Summary (average per model):");
    print!("{}", summary.render());
    println!();

    if let Some(dir) = &config.output.plots_dir {
        for path in chart::write_charts(&table, dir)? {
            println!("  Chart: {}", path.display());
        }
        println!();
    }

    Ok(())
}

/// Per-model progress bar, redrawn after every prompt.
struct Progress {
    target: fn() -> ProgressDrawTarget,
    bar: Option<ProgressBar>,
}

impl Default for Progress {
    fn default() -> Self {
        Self {
            target: ProgressDrawTarget::stderr,
            bar: None,
        }
    }
}

impl SweepObserver for Progress {
    fn on_model_start(&mut self, model: &ModelConfig, num_prompts: usize) {
        println!("  Benchmarking model: {}", model.name);
        let bar = ProgressBar::with_draw_target(Some(num_prompts as u64), (self.target)());
        bar.set_style(bar_style());
        bar.set_message(model.name.clone());
        self.bar = Some(bar);
    }

    fn on_prompt_done(&mut self, _index: usize, _record: &BenchmarkRecord) {
        if let Some(bar) = &self.bar {
            bar.inc(1);
        }
    }

    fn on_model_done(&mut self, _model: &ModelConfig) {
        if let Some(bar) = &self.bar {
            bar.finish();
        }
    }
}

fn bar_style() -> ProgressStyle {
    ProgressStyle::with_template("   [{elapsed_precise}] [{bar:30.cyan/blue}] {pos}/{len} {msg}")
        .map(|style| style.progress_chars("#>-"))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
}
