// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Process execution adapters

mod shell;

pub use shell::ShellExecutor;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeExecutor, FakeOutcome};

use async_trait::async_trait;
use pipelined_core::{ExecutionRequest, ExecutionResult};
use std::time::Duration;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

/// Errors from running a command
#[derive(Debug, Error)]
pub enum ExecError {
    #[error("failed to start {command:?}: {source}")]
    Spawn {
        command: String,
        source: std::io::Error,
    },
    #[error("failed to collect output of {command:?}: {source}")]
    Io {
        command: String,
        source: std::io::Error,
    },
    #[error("{command:?} timed out after {}s", after.as_secs_f64())]
    Timeout { command: String, after: Duration },
    #[error("{command:?} was cancelled")]
    Cancelled { command: String },
}

impl ExecError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, ExecError::Timeout { .. })
    }
}

/// Runs commands with an input payload and a bounded lifetime
#[async_trait]
pub trait Executor: Clone + Send + Sync + 'static {
    /// Run a command to completion.
    ///
    /// Returns once the process exits, its timeout elapses, or `cancel` fires.
    /// In the last two cases the process has been killed.
    async fn execute(
        &self,
        request: ExecutionRequest,
        cancel: &CancellationToken,
    ) -> Result<ExecutionResult, ExecError>;
}
