// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Event mutation adapters

mod registry;

pub use registry::MutatorRegistry;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeMutator, MutateCall};

use crate::exec::ExecError;
use crate::store::StoreError;
use async_trait::async_trait;
use pipelined_core::{Event, Handler};
use thiserror::Error;
use tokio_util::sync::CancellationToken;

/// Errors from mutating an event for a handler
#[derive(Debug, Error)]
pub enum MutateError {
    #[error("mutator not found: {0}")]
    NotFound(String),
    #[error("failed to encode event: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("mutator {mutator}: lookup failed: {source}")]
    Store {
        mutator: String,
        source: StoreError,
    },
    #[error("mutator {mutator}: {source}")]
    Exec { mutator: String, source: ExecError },
    #[error("mutator {mutator} exited with status {status}: {output}")]
    Failed {
        mutator: String,
        status: i32,
        output: String,
    },
}

/// Turns an event into the payload a particular handler receives
#[async_trait]
pub trait Mutator: Clone + Send + Sync + 'static {
    async fn mutate(
        &self,
        handler: &Handler,
        event: &Event,
        cancel: &CancellationToken,
    ) -> Result<Vec<u8>, MutateError>;
}
