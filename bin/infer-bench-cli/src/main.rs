// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # infer-bench
//!
//! Command-line interface for the inference benchmark harness.
//!
//! ## Usage
//! ```bash
//! # Sweep every configured model over the prompt corpus
//! infer-bench run --config configs/bench.toml
//!
//! # Re-summarise a results table and draw charts
//! infer-bench report --results results/results.csv --plots-dir results/plots
//! ```

mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "infer-bench",
    about = "Latency, memory, and output-quality benchmarks for causal LM inference",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging (repeat for more: -v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Benchmark every configured model over the prompt corpus.
    Run {
        /// Path to the benchmark configuration file (TOML).
        #[arg(short, long)]
        config: std::path::PathBuf,
    },

    /// Summarise a persisted results table.
    Report {
        /// Path to a results CSV written by `run`.
        #[arg(short, long)]
        results: std::path::PathBuf,

        /// Also write chart files into this directory.
        #[arg(long)]
        plots_dir: Option<std::path::PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing/logging based on verbosity.
    commands::init_tracing(cli.verbose);

    match cli.command {
        Commands::Run { config } => commands::run::execute(config),
        Commands::Report { results, plots_dir } => commands::report::execute(results, plots_dir),
    }
}
