// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon settings from the `[pipelined]` table

use serde::Deserialize;
use std::path::PathBuf;

/// Worker pool and logging settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Number of events processed concurrently
    #[serde(default = "default_workers")]
    pub workers: usize,
    /// Events queued before senders wait
    #[serde(default = "default_buffer")]
    pub buffer: usize,
    /// Log to this file instead of stderr
    #[serde(default)]
    pub log_file: Option<PathBuf>,
}

fn default_workers() -> usize {
    4
}

fn default_buffer() -> usize {
    100
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            workers: default_workers(),
            buffer: default_buffer(),
            log_file: None,
        }
    }
}
