// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake mutator for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{MutateError, Mutator};
use async_trait::async_trait;
use pipelined_core::{Event, Handler};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use tokio_util::sync::CancellationToken;

/// Recorded mutation
#[derive(Debug, Clone)]
pub struct MutateCall {
    pub handler: String,
    pub check: String,
}

/// Fake mutator that serializes events as JSON unless told to fail
#[derive(Clone, Default)]
pub struct FakeMutator {
    failing: Arc<Mutex<HashSet<String>>>,
    calls: Arc<Mutex<Vec<MutateCall>>>,
}

impl FakeMutator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make mutation fail for the named handler
    pub fn fail_for(&self, handler: &str) {
        self.failing
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(handler.to_string());
    }

    /// Get all recorded mutations
    pub fn calls(&self) -> Vec<MutateCall> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

#[async_trait]
impl Mutator for FakeMutator {
    async fn mutate(
        &self,
        handler: &Handler,
        event: &Event,
        _cancel: &CancellationToken,
    ) -> Result<Vec<u8>, MutateError> {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(MutateCall {
                handler: handler.name.clone(),
                check: event.check.name.clone(),
            });

        let failing = self
            .failing
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .contains(&handler.name);
        if failing {
            return Err(MutateError::Failed {
                mutator: handler.mutator.clone().unwrap_or_else(|| "fake".to_string()),
                status: 1,
                output: "fake mutation failure".to_string(),
            });
        }

        Ok(serde_json::to_vec(event)?)
    }
}
