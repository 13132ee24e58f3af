// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Typed, once-validated configuration for the supervisor binary.

use crate::error::ConfigError;
use crate::node_id::NodeId;
use crate::secret::Secret;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Per-node overrides. Everything here is optional; a node falls back to
/// its built-in defaults when a field is absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NodeOverride {
    /// Alternate executable path for a process node.
    #[serde(default)]
    pub exe_path: Option<PathBuf>,
    /// API key or other credential a node may require to function.
    #[serde(default)]
    pub api_key: Secret<String>,
    /// Skip starting this node entirely; its dependents stay in
    /// `WAIT_PARENTS` forever, which is only sensible for leaf nodes.
    #[serde(default)]
    pub disabled: bool,
}

/// Top-level configuration loaded once at startup and never mutated.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SupervisorConfig {
    /// Directive passed to the tracing `EnvFilter`; `RUST_LOG` still wins
    /// if set, matching `tracing_subscriber`'s own precedence.
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
    #[serde(default)]
    pub nodes: HashMap<NodeId, NodeOverride>,
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl SupervisorConfig {
    /// Load and validate a TOML config file. Missing file is not an error
    /// at this layer — callers that want a default-on-missing-file policy
    /// handle `ConfigError::Read` themselves.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: path.display().to_string(), source })?;
        Self::load_from_str(&text, path)
    }

    pub fn load_from_str(text: &str, path: &Path) -> Result<Self, ConfigError> {
        let mut config: SupervisorConfig = toml::from_str(text)
            .map_err(|source| ConfigError::Parse { path: path.display().to_string(), source })?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Overlay `WARD_<NODE_ID>_API_KEY` environment variables onto the
    /// parsed config, the same "env wins over file" convention the
    /// logging filter follows (`RUST_LOG` over `log_filter`). Lets a
    /// deployment keep credentials out of the TOML file entirely rather
    /// than requiring every secret to round-trip through it.
    fn apply_env_overrides(&mut self) {
        for id in NodeId::ALL {
            if let Ok(key) = std::env::var(format!("WARD_{}_API_KEY", id.as_str())) {
                self.nodes.entry(id).or_default().api_key = Secret::Provided(key);
            }
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.log_filter.trim().is_empty() {
            return Err(ConfigError::Invalid("log_filter must not be blank".to_string()));
        }
        Ok(())
    }

    pub fn node(&self, id: NodeId) -> NodeOverride {
        self.nodes.get(&id).cloned().unwrap_or_default()
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
