// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for handler resolution and event processing

use pipelined_core::HandlerType;
use thiserror::Error;

/// Errors from expanding handler references
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResolveError {
    #[error("handler sets cannot be nested deeper than {max} levels (reached level {depth})")]
    TooDeep { depth: usize, max: usize },
}

/// Errors that abort processing of an event
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PipelineError {
    #[error("unknown handler type {handler_type} for handler {handler}")]
    UnknownHandlerType {
        handler: String,
        handler_type: HandlerType,
    },
}
