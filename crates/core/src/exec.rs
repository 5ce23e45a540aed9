// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Process execution requests and results

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::time::Duration;

/// How long a process may run before it is killed.
///
/// On the wire this is a whole number of seconds where `0` means no limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Timeout {
    #[default]
    Never,
    After(Duration),
}

impl Timeout {
    pub fn from_secs(secs: u64) -> Self {
        if secs == 0 {
            Timeout::Never
        } else {
            Timeout::After(Duration::from_secs(secs))
        }
    }

    pub fn as_secs(&self) -> u64 {
        match self {
            Timeout::Never => 0,
            Timeout::After(d) => d.as_secs(),
        }
    }

    pub fn duration(&self) -> Option<Duration> {
        match self {
            Timeout::Never => None,
            Timeout::After(d) => Some(*d),
        }
    }
}

impl Serialize for Timeout {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(self.as_secs())
    }
}

impl<'de> Deserialize<'de> for Timeout {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        u64::deserialize(deserializer).map(Timeout::from_secs)
    }
}

/// A command to run with a payload on its standard input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionRequest {
    pub command: String,
    pub timeout: Timeout,
    pub input: Vec<u8>,
}

impl ExecutionRequest {
    pub fn new(command: impl Into<String>, timeout: Timeout, input: Vec<u8>) -> Self {
        Self {
            command: command.into(),
            timeout,
            input,
        }
    }
}

/// Outcome of a process that ran to completion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionResult {
    /// Exit code, or -1 when the process was terminated by a signal
    pub status: i32,
    /// Standard output followed by standard error
    pub output: Vec<u8>,
}

impl ExecutionResult {
    pub fn success(&self) -> bool {
        self.status == 0
    }

    pub fn output_lossy(&self) -> String {
        String::from_utf8_lossy(&self.output).into_owned()
    }
}

#[cfg(test)]
#[path = "exec_tests.rs"]
mod tests;
