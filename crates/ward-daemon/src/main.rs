// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Binary entry point (§6 "Binary entry point"). Parses arguments, loads
//! configuration, installs logging, builds the demo graph, and either
//! prints the dry-run snapshot or runs the supervisor to completion.

use clap::Parser;
use tracing::Instrument;
use ward_daemon::{build_supervisor, dry_run_snapshot, load_config, Cli};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli.config)?;

    if cli.dry_run {
        let snapshot = dry_run_snapshot(&config)?;
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
        return Ok(());
    }

    ward_daemon::logging::install(&config.log_filter);

    let supervisor = build_supervisor(&config)?;
    let run_id = supervisor.run_id();
    let span = tracing::info_span!("execute", %run_id);

    let reason = async {
        tracing::info!("supervisor.starting");
        supervisor.execute().await
    }
    .instrument(span)
    .await;

    tracing::info!(%reason, clean = reason.is_clean(), "supervisor.stopped");

    if reason.is_clean() {
        Ok(())
    } else {
        std::process::exit(1);
    }
}
