// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-event pipeline: resolve handlers, mutate, dispatch
//!
//! Failures are best-effort except for one case. Lookup misses, set expansion
//! errors, mutation failures and dispatch failures are logged and the event
//! carries on. A resolved handler that is not a pipe aborts the event.

use crate::dispatcher::Dispatcher;
use crate::error::PipelineError;
use crate::resolver::HandlerResolver;
use pipelined_adapters::{Executor, HandlerStore, Mutator};
use pipelined_core::{Event, HandlerKind};
use tokio_util::sync::CancellationToken;
use tracing::Instrument;

/// What happened to one event's handlers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventSummary {
    /// Leaf handlers after expansion
    pub resolved: usize,
    /// Handlers whose command ran to completion, whatever its exit status
    pub dispatched: usize,
    /// Handlers whose command could not run or was killed
    pub failed: usize,
    /// Handlers skipped because mutation failed
    pub skipped: usize,
}

/// Routes events through their handlers
#[derive(Clone)]
pub struct Pipeline<S, M, X> {
    resolver: HandlerResolver<S>,
    mutator: M,
    dispatcher: Dispatcher<X>,
}

impl<S, M, X> Pipeline<S, M, X>
where
    S: HandlerStore,
    M: Mutator,
    X: Executor,
{
    pub fn new(store: S, mutator: M, executor: X) -> Self {
        Self {
            resolver: HandlerResolver::new(store),
            mutator,
            dispatcher: Dispatcher::new(executor),
        }
    }

    /// Process one event.
    ///
    /// Handlers run one at a time in resolution order. Cancelling `cancel`
    /// kills the running handler and leaves the rest undispatched.
    pub async fn handle_event(
        &self,
        event: &Event,
        cancel: &CancellationToken,
    ) -> Result<EventSummary, PipelineError> {
        let span = tracing::info_span!(
            "event",
            check = %event.check.name,
            entity = event.entity_name().unwrap_or_default()
        );
        self.handle_event_inner(event, cancel).instrument(span).await
    }

    async fn handle_event_inner(
        &self,
        event: &Event,
        cancel: &CancellationToken,
    ) -> Result<EventSummary, PipelineError> {
        let handlers = match self.resolver.expand(&event.check.handlers, 1).await {
            Ok(handlers) => handlers,
            Err(e) => {
                tracing::warn!(error = %e, "failed to expand handlers");
                Default::default()
            }
        };

        let mut summary = EventSummary {
            resolved: handlers.len(),
            ..EventSummary::default()
        };

        for (name, handler) in &handlers {
            if cancel.is_cancelled() {
                let attempted = summary.dispatched + summary.failed + summary.skipped;
                tracing::warn!(
                    remaining = summary.resolved - attempted,
                    "cancelled before all handlers were dispatched"
                );
                break;
            }

            let payload = match self.mutator.mutate(handler, event, cancel).await {
                Ok(payload) => payload,
                Err(e) => {
                    tracing::warn!(handler = %name, error = %e, "failed to mutate event");
                    summary.skipped += 1;
                    continue;
                }
            };

            match &handler.kind {
                HandlerKind::Pipe(_) => {
                    match self.dispatcher.dispatch(handler, payload, cancel).await {
                        Ok(_) => summary.dispatched += 1,
                        Err(_) => summary.failed += 1,
                    }
                }
                kind => {
                    tracing::error!(
                        handler = %name,
                        handler_type = %kind.handler_type(),
                        "unknown handler type, abandoning event"
                    );
                    return Err(PipelineError::UnknownHandlerType {
                        handler: name.clone(),
                        handler_type: kind.handler_type(),
                    });
                }
            }
        }

        tracing::debug!(
            resolved = summary.resolved,
            dispatched = summary.dispatched,
            failed = summary.failed,
            skipped = summary.skipped,
            "event processed"
        );

        Ok(summary)
    }
}

#[cfg(test)]
#[path = "pipeline_tests.rs"]
mod tests;
