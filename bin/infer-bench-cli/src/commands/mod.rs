// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Subcommand implementations and shared CLI plumbing.

pub mod report;
pub mod run;

use tracing_subscriber::EnvFilter;

/// Installs the global tracing subscriber.
///
/// Verbosity maps to `warn`, `info`, `debug`, `trace`; `RUST_LOG` wins when
/// set. Logs go to stderr so the tables on stdout stay clean.
pub fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Prints a boxed command banner.
pub(crate) fn banner(title: &str) {
    println!("╔══════════════════════════════════════════════════════╗");
    println!("║ {:^52} ║", title);
    println!("╚══════════════════════════════════════════════════════╝");
    println!();
}

/// Prints per-model summary charts.
pub(crate) fn print_charts(summary: &bench_harness::SummaryStats) {
    for (_, chart) in bench_harness::chart::charts(summary) {
        for line in chart.lines() {
            println!("  {line}");
        }
        println!();
    }
}
