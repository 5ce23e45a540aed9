// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced adapter wrappers for consistent observability

use crate::exec::{ExecError, Executor};
use crate::store::{HandlerStore, StoreError};
use async_trait::async_trait;
use pipelined_core::{ExecutionRequest, ExecutionResult, Handler, MutatorDef};
use tokio_util::sync::CancellationToken;
use tracing::Instrument;

/// Wrapper that adds tracing to any HandlerStore
#[derive(Clone)]
pub struct TracedHandlerStore<S> {
    inner: S,
}

impl<S> TracedHandlerStore<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<S: HandlerStore> HandlerStore for TracedHandlerStore<S> {
    async fn get_handler(&self, name: &str) -> Result<Option<Handler>, StoreError> {
        let result = self.inner.get_handler(name).await;
        match &result {
            Ok(Some(handler)) => {
                tracing::trace!(name, handler_type = %handler.handler_type(), "handler found")
            }
            Ok(None) => tracing::debug!(name, "handler not found"),
            Err(e) => tracing::error!(name, error = %e, "handler lookup failed"),
        }
        result
    }

    async fn get_mutator(&self, name: &str) -> Result<Option<MutatorDef>, StoreError> {
        let result = self.inner.get_mutator(name).await;
        match &result {
            Ok(found) => tracing::trace!(name, found = found.is_some(), "mutator lookup"),
            Err(e) => tracing::error!(name, error = %e, "mutator lookup failed"),
        }
        result
    }
}

/// Wrapper that adds tracing to any Executor
#[derive(Clone)]
pub struct TracedExecutor<X> {
    inner: X,
}

impl<X> TracedExecutor<X> {
    pub fn new(inner: X) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<X: Executor> Executor for TracedExecutor<X> {
    async fn execute(
        &self,
        request: ExecutionRequest,
        cancel: &CancellationToken,
    ) -> Result<ExecutionResult, ExecError> {
        let span = tracing::info_span!(
            "exec",
            command = %request.command,
            timeout_secs = request.timeout.as_secs()
        );

        async {
            tracing::debug!(input_len = request.input.len(), "starting");

            let start = std::time::Instant::now();
            let result = self.inner.execute(request, cancel).await;
            let elapsed = start.elapsed();

            match &result {
                Ok(r) => tracing::debug!(
                    status = r.status,
                    output_len = r.output.len(),
                    elapsed_ms = elapsed.as_millis() as u64,
                    "exited"
                ),
                // Timeouts and cancellations are expected outcomes
                Err(e @ (ExecError::Timeout { .. } | ExecError::Cancelled { .. })) => {
                    tracing::warn!(elapsed_ms = elapsed.as_millis() as u64, error = %e, "killed")
                }
                Err(e) => tracing::error!(
                    elapsed_ms = elapsed.as_millis() as u64,
                    error = %e,
                    "failed"
                ),
            }

            result
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
