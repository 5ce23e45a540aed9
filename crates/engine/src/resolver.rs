// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Handler set expansion
//!
//! Expands handler-name references into a flat map of leaf handlers.
//! - Nested sets are expanded recursively, each level one deeper than its parent
//! - The first occurrence of a name wins across the whole expansion
//! - Missing or unreadable handlers are logged and skipped
//! - A set whose members sit deeper than [`MAX_HANDLER_SET_DEPTH`] is dropped

use crate::error::ResolveError;
use indexmap::IndexMap;
use pipelined_adapters::HandlerStore;
use pipelined_core::{Handler, HandlerKind};
use std::future::Future;
use std::pin::Pin;

/// Deepest level at which handler references are still expanded.
/// The event's own handler list is level 1.
pub const MAX_HANDLER_SET_DEPTH: usize = 3;

/// Leaf handlers keyed by name, in the order they were first reached
pub type ResolvedHandlers = IndexMap<String, Handler>;

type ExpandFuture<'a> =
    Pin<Box<dyn Future<Output = Result<ResolvedHandlers, ResolveError>> + Send + 'a>>;

/// Expands handler references using definitions from a store
#[derive(Clone)]
pub struct HandlerResolver<S> {
    store: S,
}

impl<S: HandlerStore> HandlerResolver<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Expand `names` as if they were found at nesting level `depth`.
    ///
    /// Fails only when `depth` itself is too deep. Problems inside nested
    /// sets drop that set and nothing else.
    pub async fn expand(
        &self,
        names: &[String],
        depth: usize,
    ) -> Result<ResolvedHandlers, ResolveError> {
        let mut path = Vec::new();
        self.expand_level(names, depth, &mut path).await
    }

    fn expand_level<'a>(
        &'a self,
        names: &'a [String],
        depth: usize,
        path: &'a mut Vec<String>,
    ) -> ExpandFuture<'a> {
        Box::pin(async move {
            if depth > MAX_HANDLER_SET_DEPTH {
                return Err(ResolveError::TooDeep {
                    depth,
                    max: MAX_HANDLER_SET_DEPTH,
                });
            }

            let mut expanded = ResolvedHandlers::new();

            for name in names {
                let handler = match self.store.get_handler(name).await {
                    Ok(Some(handler)) => handler,
                    Ok(None) => {
                        tracing::warn!(handler = %name, depth, "failed to retrieve handler: not found");
                        continue;
                    }
                    Err(e) => {
                        tracing::warn!(handler = %name, depth, error = %e, "failed to retrieve handler");
                        continue;
                    }
                };

                let members = match &handler.kind {
                    HandlerKind::Set { handlers } => Some(handlers.clone()),
                    _ => None,
                };
                let Some(members) = members else {
                    expanded.entry(handler.name.clone()).or_insert(handler);
                    continue;
                };

                if path.contains(&handler.name) {
                    tracing::warn!(set = %handler.name, path = ?path, "handler set references itself");
                    continue;
                }

                path.push(handler.name.clone());
                let result = self.expand_level(&members, depth + 1, path).await;
                path.pop();

                match result {
                    Ok(nested) => {
                        for (nested_name, nested_handler) in nested {
                            expanded.entry(nested_name).or_insert(nested_handler);
                        }
                    }
                    Err(e) => {
                        tracing::warn!(set = %handler.name, error = %e, "failed to expand handler set");
                    }
                }
            }

            Ok(expanded)
        })
    }
}

#[cfg(test)]
#[path = "resolver_tests.rs"]
mod tests;
