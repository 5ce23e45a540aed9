// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Events routed through the handler pipeline

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single observation to be routed through handlers.
///
/// Only the check's handler list, name, output and status are interpreted by
/// the pipeline. Every other field is carried through untouched so mutators
/// see the event exactly as it was received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub check: Check,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Check result embedded in an event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Check {
    #[serde(default)]
    pub name: String,
    /// Handler-name references, in the order they were configured
    #[serde(default)]
    pub handlers: Vec<String>,
    #[serde(default)]
    pub output: String,
    #[serde(default)]
    pub status: i32,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Event {
    /// Create an event for a check with the given handler references
    pub fn new(check_name: impl Into<String>, handlers: Vec<String>) -> Self {
        Self {
            check: Check {
                name: check_name.into(),
                handlers,
                output: String::new(),
                status: 0,
                extra: Map::new(),
            },
            extra: Map::new(),
        }
    }

    /// Builder-style setter for the check output
    pub fn with_output(mut self, output: impl Into<String>) -> Self {
        self.check.output = output.into();
        self
    }

    /// Builder-style setter for the check status
    pub fn with_status(mut self, status: i32) -> Self {
        self.check.status = status;
        self
    }

    /// Name of the entity that produced the event, when present
    pub fn entity_name(&self) -> Option<&str> {
        self.extra
            .get("entity")
            .and_then(|entity| entity.get("name"))
            .and_then(Value::as_str)
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
