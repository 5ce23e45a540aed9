// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory definition store

use super::{HandlerStore, StoreError};
use async_trait::async_trait;
use pipelined_core::{Handler, MutatorDef};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

#[derive(Debug, Default)]
struct Definitions {
    handlers: HashMap<String, Handler>,
    mutators: HashMap<String, MutatorDef>,
}

/// Definitions held in memory, shared by every clone.
///
/// [`MemoryStore::replace`] swaps the whole set at once, so a lookup never
/// observes a mix of old and new definitions.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<Definitions>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_definitions(
        handlers: impl IntoIterator<Item = Handler>,
        mutators: impl IntoIterator<Item = MutatorDef>,
    ) -> Self {
        let store = Self::new();
        store.replace(handlers, mutators);
        store
    }

    /// Replace every definition
    pub fn replace(
        &self,
        handlers: impl IntoIterator<Item = Handler>,
        mutators: impl IntoIterator<Item = MutatorDef>,
    ) {
        let definitions = Definitions {
            handlers: handlers.into_iter().map(|h| (h.name.clone(), h)).collect(),
            mutators: mutators.into_iter().map(|m| (m.name.clone(), m)).collect(),
        };
        *self.inner.write().unwrap_or_else(|e| e.into_inner()) = definitions;
    }

    pub fn handler_count(&self) -> usize {
        self.inner
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .handlers
            .len()
    }

    pub fn mutator_count(&self) -> usize {
        self.inner
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .mutators
            .len()
    }
}

#[async_trait]
impl HandlerStore for MemoryStore {
    async fn get_handler(&self, name: &str) -> Result<Option<Handler>, StoreError> {
        let definitions = self.inner.read().unwrap_or_else(|e| e.into_inner());
        Ok(definitions.handlers.get(name).cloned())
    }

    async fn get_mutator(&self, name: &str) -> Result<Option<MutatorDef>, StoreError> {
        let definitions = self.inner.read().unwrap_or_else(|e| e.into_inner());
        Ok(definitions.mutators.get(name).cloned())
    }
}

#[cfg(test)]
#[path = "memory_tests.rs"]
mod tests;
