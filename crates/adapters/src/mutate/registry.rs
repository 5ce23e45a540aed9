// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Built-in and command mutators

use super::{MutateError, Mutator};
use crate::exec::Executor;
use crate::store::HandlerStore;
use async_trait::async_trait;
use pipelined_core::{
    Event, ExecutionRequest, Handler, JSON_MUTATOR, ONLY_CHECK_OUTPUT_MUTATOR,
};
use tokio_util::sync::CancellationToken;

/// Resolves a handler's mutator by name.
///
/// `json` (also used when no mutator is named) and `only_check_output` are
/// built in. Any other name is looked up in the store and run as a command
/// with the event JSON on stdin; its output becomes the payload.
#[derive(Clone)]
pub struct MutatorRegistry<S, X> {
    store: S,
    executor: X,
}

impl<S, X> MutatorRegistry<S, X>
where
    S: HandlerStore,
    X: Executor,
{
    pub fn new(store: S, executor: X) -> Self {
        Self { store, executor }
    }

    async fn run_command(
        &self,
        name: &str,
        event: &Event,
        cancel: &CancellationToken,
    ) -> Result<Vec<u8>, MutateError> {
        let def = self
            .store
            .get_mutator(name)
            .await
            .map_err(|source| MutateError::Store {
                mutator: name.to_string(),
                source,
            })?
            .ok_or_else(|| MutateError::NotFound(name.to_string()))?;

        let input = serde_json::to_vec(event)?;
        let request = ExecutionRequest::new(def.command, def.timeout, input);
        let result = self
            .executor
            .execute(request, cancel)
            .await
            .map_err(|source| MutateError::Exec {
                mutator: name.to_string(),
                source,
            })?;

        if !result.success() {
            return Err(MutateError::Failed {
                mutator: name.to_string(),
                status: result.status,
                output: result.output_lossy(),
            });
        }

        Ok(result.output)
    }
}

#[async_trait]
impl<S, X> Mutator for MutatorRegistry<S, X>
where
    S: HandlerStore,
    X: Executor,
{
    async fn mutate(
        &self,
        handler: &Handler,
        event: &Event,
        cancel: &CancellationToken,
    ) -> Result<Vec<u8>, MutateError> {
        match handler.mutator.as_deref() {
            None | Some(JSON_MUTATOR) => Ok(serde_json::to_vec(event)?),
            Some(ONLY_CHECK_OUTPUT_MUTATOR) => Ok(event.check.output.clone().into_bytes()),
            Some(name) => self.run_command(name, event, cancel).await,
        }
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
