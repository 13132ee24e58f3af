// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Structured logging setup (§4.9). `RUST_LOG` always wins over the
//! config file's `log_filter`, matching `tracing_subscriber`'s own
//! `EnvFilter::from_default_env` precedence.

use tracing_subscriber::EnvFilter;

pub fn install(log_filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_filter));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(true).init();
}
