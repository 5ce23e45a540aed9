// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake definition store for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{HandlerStore, StoreError};
use async_trait::async_trait;
use pipelined_core::{Handler, MutatorDef};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct FakeState {
    handlers: HashMap<String, Handler>,
    mutators: HashMap<String, MutatorDef>,
    failing: HashSet<String>,
    lookups: Vec<String>,
}

/// Fake store that records lookups and can fail on demand
#[derive(Clone, Default)]
pub struct FakeHandlerStore {
    state: Arc<Mutex<FakeState>>,
}

impl FakeHandlerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding the given handlers
    pub fn with_handlers(handlers: impl IntoIterator<Item = Handler>) -> Self {
        let store = Self::new();
        for handler in handlers {
            store.add_handler(handler);
        }
        store
    }

    pub fn add_handler(&self, handler: Handler) {
        self.lock().handlers.insert(handler.name.clone(), handler);
    }

    pub fn add_mutator(&self, mutator: MutatorDef) {
        self.lock().mutators.insert(mutator.name.clone(), mutator);
    }

    /// Make lookups of `name` fail with a storage error
    pub fn fail_lookup(&self, name: &str) {
        self.lock().failing.insert(name.to_string());
    }

    /// Names looked up so far, handlers and mutators alike
    pub fn lookups(&self) -> Vec<String> {
        self.lock().lookups.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FakeState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn lookup(&self, name: &str) -> Result<(), StoreError> {
        let mut state = self.lock();
        state.lookups.push(name.to_string());
        if state.failing.contains(name) {
            return Err(StoreError::Unavailable(format!("fake failure for {}", name)));
        }
        Ok(())
    }
}

#[async_trait]
impl HandlerStore for FakeHandlerStore {
    async fn get_handler(&self, name: &str) -> Result<Option<Handler>, StoreError> {
        self.lookup(name)?;
        Ok(self.lock().handlers.get(name).cloned())
    }

    async fn get_mutator(&self, name: &str) -> Result<Option<MutatorDef>, StoreError> {
        self.lookup(name)?;
        Ok(self.lock().mutators.get(name).cloned())
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
