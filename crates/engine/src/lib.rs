// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Event handler pipeline: resolution, mutation, and dispatch

mod dispatcher;
mod error;
mod pipeline;
mod resolver;
mod service;

#[cfg(test)]
mod test_support;

pub use dispatcher::{DispatchError, Dispatcher};
pub use error::{PipelineError, ResolveError};
pub use pipeline::{EventSummary, Pipeline};
pub use resolver::{HandlerResolver, ResolvedHandlers, MAX_HANDLER_SET_DEPTH};
pub use service::{EventSender, Pipelined, ServiceConfig, ServiceError};
