// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Mutator definitions

use crate::exec::Timeout;
use serde::{Deserialize, Serialize};

/// Serializes the whole event as JSON. Used when a handler names no mutator.
pub const JSON_MUTATOR: &str = "json";

/// Passes only the check output through, as raw bytes
pub const ONLY_CHECK_OUTPUT_MUTATOR: &str = "only_check_output";

pub const BUILTIN_MUTATORS: [&str; 2] = [JSON_MUTATOR, ONLY_CHECK_OUTPUT_MUTATOR];

/// A command that rewrites the event JSON on stdin into a handler payload on stdout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MutatorDef {
    #[serde(default)]
    pub name: String,
    pub command: String,
    #[serde(default)]
    pub timeout: Timeout,
}

impl MutatorDef {
    pub fn new(name: impl Into<String>, command: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            command: command.into(),
            timeout: Timeout::Never,
        }
    }

    pub fn is_builtin_name(name: &str) -> bool {
        BUILTIN_MUTATORS.contains(&name)
    }
}

#[cfg(test)]
#[path = "mutator_tests.rs"]
mod tests;
