// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Argument surface for the `ward` binary. Out of scope as a behavioral
//! contract (§6) — only that a config path and a `--dry-run` switch exist.

use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "ward", version, about = "Process-and-service supervisor")]
pub struct Cli {
    /// Path to the supervisor's TOML configuration.
    #[arg(long, default_value = "./supervisor.toml")]
    pub config: PathBuf,

    /// Construct the graph and print the health snapshot shape, then exit
    /// 0 without starting anything. Useful for CI validation of a graph edit.
    #[arg(long)]
    pub dry_run: bool,
}
