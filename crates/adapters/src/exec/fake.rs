// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake executor for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{ExecError, Executor};
use async_trait::async_trait;
use pipelined_core::{ExecutionRequest, ExecutionResult};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio_util::sync::CancellationToken;

/// Scripted outcome for a command
#[derive(Debug, Clone)]
pub enum FakeOutcome {
    /// Exit with this status and output
    Exit { status: i32, output: Vec<u8> },
    /// Fail as if the timeout elapsed
    Timeout,
    /// Fail as if the process could not be started
    SpawnFailure,
    /// Block until cancelled
    Hang,
}

/// Fake executor for testing.
///
/// Commands without a scripted outcome exit 0 and echo their input.
#[derive(Clone, Default)]
pub struct FakeExecutor {
    outcomes: Arc<Mutex<HashMap<String, FakeOutcome>>>,
    calls: Arc<Mutex<Vec<ExecutionRequest>>>,
}

impl FakeExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the outcome of a command
    pub fn set_outcome(&self, command: &str, outcome: FakeOutcome) {
        self.outcomes
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(command.to_string(), outcome);
    }

    /// Get all recorded requests
    pub fn calls(&self) -> Vec<ExecutionRequest> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Commands that were run, in order
    pub fn commands(&self) -> Vec<String> {
        self.calls().into_iter().map(|r| r.command).collect()
    }
}

#[async_trait]
impl Executor for FakeExecutor {
    async fn execute(
        &self,
        request: ExecutionRequest,
        cancel: &CancellationToken,
    ) -> Result<ExecutionResult, ExecError> {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(request.clone());

        let outcome = self
            .outcomes
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(&request.command)
            .cloned();

        match outcome {
            None => Ok(ExecutionResult {
                status: 0,
                output: request.input,
            }),
            Some(FakeOutcome::Exit { status, output }) => Ok(ExecutionResult { status, output }),
            Some(FakeOutcome::Timeout) => Err(ExecError::Timeout {
                command: request.command,
                after: request.timeout.duration().unwrap_or_default(),
            }),
            Some(FakeOutcome::SpawnFailure) => Err(ExecError::Spawn {
                command: request.command,
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "fake spawn failure"),
            }),
            Some(FakeOutcome::Hang) => {
                cancel.cancelled().await;
                Err(ExecError::Cancelled {
                    command: request.command,
                })
            }
        }
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
