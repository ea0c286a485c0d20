// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `infer-bench report` command: summarise a persisted results table.
//!
//! Reads only the CSV artifact, so it works on results from any earlier
//! sweep, including ones with no rows.

use bench_harness::{chart, report};
use std::path::PathBuf;

pub fn execute(results: PathBuf, plots_dir: Option<PathBuf>) -> anyhow::Result<()> {
    super::banner("infer-bench · Results Report");

    let table = report::load(&results)?;
    let models = table.models();

    println!("  Results: {}", results.display());
    println!("  Rows:    {}", table.len());
    println!("  Models:  {}", models.len());
    println!();

    let summary = report::summarize(&table);
    println!("  Summary (average per model):");
    print!("{}", summary.render());
    println!();

    super::print_charts(&summary);

    if let Some(dir) = plots_dir {
        for path in chart::write_charts(&table, &dir)? {
            println!("  Chart: {}", path.display());
        }
        println!();
    }

    Ok(())
}
