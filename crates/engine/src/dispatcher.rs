// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Handler dispatch

use pipelined_adapters::{ExecError, Executor};
use pipelined_core::{
    ExecutionRequest, ExecutionResult, Handler, HandlerKind, HandlerType, PipeHandler,
};
use thiserror::Error;
use tokio_util::sync::CancellationToken;

/// Errors from dispatching a handler
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("handler {handler}: unsupported handler type {handler_type}")]
    UnsupportedHandlerType {
        handler: String,
        handler_type: HandlerType,
    },
    #[error("handler {handler}: {source}")]
    Failed { handler: String, source: ExecError },
}

/// Runs a resolved handler's delivery strategy against a payload
#[derive(Clone)]
pub struct Dispatcher<X> {
    executor: X,
}

impl<X: Executor> Dispatcher<X> {
    pub fn new(executor: X) -> Self {
        Self { executor }
    }

    /// Deliver `payload` through `handler`.
    ///
    /// Outcomes are logged here; callers decide whether an error matters.
    pub async fn dispatch(
        &self,
        handler: &Handler,
        payload: Vec<u8>,
        cancel: &CancellationToken,
    ) -> Result<ExecutionResult, DispatchError> {
        match &handler.kind {
            HandlerKind::Pipe(pipe) => self.pipe(&handler.name, pipe, payload, cancel).await,
            kind => Err(DispatchError::UnsupportedHandlerType {
                handler: handler.name.clone(),
                handler_type: kind.handler_type(),
            }),
        }
    }

    async fn pipe(
        &self,
        name: &str,
        pipe: &PipeHandler,
        payload: Vec<u8>,
        cancel: &CancellationToken,
    ) -> Result<ExecutionResult, DispatchError> {
        let request = ExecutionRequest::new(pipe.command.clone(), pipe.timeout, payload);

        match self.executor.execute(request, cancel).await {
            Ok(result) => {
                if result.success() {
                    tracing::info!(
                        handler = %name,
                        status = result.status,
                        output = %result.output_lossy(),
                        "executed pipe handler"
                    );
                } else {
                    tracing::warn!(
                        handler = %name,
                        status = result.status,
                        output = %result.output_lossy(),
                        "pipe handler exited with non-zero status"
                    );
                }
                Ok(result)
            }
            Err(source) => {
                tracing::error!(handler = %name, error = %source, "failed to execute pipe handler");
                Err(DispatchError::Failed {
                    handler: name.to_string(),
                    source,
                })
            }
        }
    }
}

#[cfg(test)]
#[path = "dispatcher_tests.rs"]
mod tests;
