// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Handler and mutator definition storage

mod memory;

pub use memory::MemoryStore;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeHandlerStore;

use async_trait::async_trait;
use pipelined_core::{Handler, MutatorDef};
use thiserror::Error;

/// Errors from definition lookups
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Read access to stored definitions.
///
/// A name with no definition is `Ok(None)`, not an error.
#[async_trait]
pub trait HandlerStore: Clone + Send + Sync + 'static {
    async fn get_handler(&self, name: &str) -> Result<Option<Handler>, StoreError>;

    async fn get_mutator(&self, name: &str) -> Result<Option<MutatorDef>, StoreError>;
}
