// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! A typed stand-in for configuration that may legitimately be absent,
//! so a node that needs it fails at construction instead of at first use.

use serde::{Deserialize, Serialize};

/// Either a provided value, or an explicit marker that none was configured.
/// Deliberately distinct from `Option<T>` at call sites: reaching for
/// `.require()` documents that absence is a configuration error, not a
/// normal branch to handle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Option<T>", into = "Option<T>")]
pub enum Secret<T> {
    Provided(T),
    NotProvided,
}

impl<T> From<Option<T>> for Secret<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Secret::Provided(v),
            None => Secret::NotProvided,
        }
    }
}

impl<T> From<Secret<T>> for Option<T> {
    fn from(value: Secret<T>) -> Self {
        match value {
            Secret::Provided(v) => Some(v),
            Secret::NotProvided => None,
        }
    }
}

impl<T> Default for Secret<T> {
    fn default() -> Self {
        Secret::NotProvided
    }
}

impl<T> Secret<T> {
    pub fn is_provided(&self) -> bool {
        matches!(self, Secret::Provided(_))
    }

    /// Return the value, or a descriptive error naming the missing field.
    pub fn require(self, field: &str) -> Result<T, crate::error::ConfigError> {
        match self {
            Secret::Provided(v) => Ok(v),
            Secret::NotProvided => Err(crate::error::ConfigError::MissingSecret { field: field.to_string() }),
        }
    }
}

#[cfg(test)]
#[path = "secret_tests.rs"]
mod tests;
