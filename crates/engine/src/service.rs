// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Worker pool feeding queued events through a [`Pipeline`]

use crate::pipeline::Pipeline;
use pipelined_adapters::{Executor, HandlerStore, Mutator};
use pipelined_core::Event;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::Instrument;

/// Sizing for the worker pool
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Number of events processed concurrently
    pub workers: usize,
    /// Events queued before `send` waits
    pub buffer: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            workers: 4,
            buffer: 100,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ServiceError {
    #[error("pipeline service is stopped")]
    Stopped,
}

/// Enqueues events for a running service
///
/// Holds no strong reference to the queue, so outstanding senders never keep
/// a stopped or draining service alive.
#[derive(Clone)]
pub struct EventSender {
    tx: mpsc::WeakSender<Event>,
}

impl EventSender {
    /// Queue an event, waiting while the buffer is full
    pub async fn send(&self, event: Event) -> Result<(), ServiceError> {
        let tx = self.tx.upgrade().ok_or(ServiceError::Stopped)?;
        tx.send(event).await.map_err(|_| ServiceError::Stopped)
    }
}

/// Running pipeline service
pub struct Pipelined {
    tx: mpsc::Sender<Event>,
    cancel: CancellationToken,
    workers: JoinSet<()>,
}

impl Pipelined {
    /// Spawn the workers. Must be called from within a tokio runtime.
    pub fn start<S, M, X>(pipeline: Pipeline<S, M, X>, config: ServiceConfig) -> Self
    where
        S: HandlerStore,
        M: Mutator,
        X: Executor,
    {
        let workers_count = config.workers.max(1);
        let (tx, rx) = mpsc::channel(config.buffer.max(1));
        let queue = Arc::new(Mutex::new(rx));
        let pipeline = Arc::new(pipeline);
        let cancel = CancellationToken::new();

        let mut workers = JoinSet::new();
        for id in 0..workers_count {
            let span = tracing::info_span!("worker", id);
            workers.spawn(
                run_worker(Arc::clone(&pipeline), Arc::clone(&queue), cancel.clone())
                    .instrument(span),
            );
        }

        tracing::info!(
            workers = workers_count,
            buffer = config.buffer.max(1),
            "pipeline service started"
        );

        Self {
            tx,
            cancel,
            workers,
        }
    }

    pub fn sender(&self) -> EventSender {
        EventSender {
            tx: self.tx.downgrade(),
        }
    }

    /// Stop taking events, kill in-flight handlers, and wait for the workers
    pub async fn stop(self) {
        tracing::info!("stopping pipeline service");
        self.cancel.cancel();
        self.join().await;
    }

    /// Close the queue and wait until every queued event has been processed
    pub async fn drain(self) {
        tracing::info!("draining pipeline service");
        self.join().await;
    }

    async fn join(self) {
        let Self {
            tx, mut workers, ..
        } = self;
        drop(tx);

        while let Some(joined) = workers.join_next().await {
            if let Err(e) = joined {
                tracing::error!(error = %e, "worker task failed");
            }
        }
        tracing::info!("pipeline service stopped");
    }
}

async fn run_worker<S, M, X>(
    pipeline: Arc<Pipeline<S, M, X>>,
    queue: Arc<Mutex<mpsc::Receiver<Event>>>,
    cancel: CancellationToken,
) where
    S: HandlerStore,
    M: Mutator,
    X: Executor,
{
    loop {
        let next = {
            let mut queue = queue.lock().await;
            tokio::select! {
                biased;
                _ = cancel.cancelled() => None,
                event = queue.recv() => event,
            }
        };
        let Some(event) = next else {
            break;
        };

        if let Err(e) = pipeline.handle_event(&event, &cancel).await {
            tracing::error!(check = %event.check.name, error = %e, "failed to handle event");
        }
    }
    tracing::debug!("worker exiting");
}

#[cfg(test)]
#[path = "service_tests.rs"]
mod tests;
