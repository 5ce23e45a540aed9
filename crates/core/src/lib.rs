// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! pipelined-core: domain types for the event handler pipeline
//!
//! This crate provides:
//! - Events and the check results they carry
//! - Handler definitions (pipe, set, and socket strategies)
//! - Mutator definitions
//! - Execution requests and results exchanged with the process runner

pub mod event;
pub mod exec;
pub mod handler;
pub mod mutator;

pub use event::{Check, Event};
pub use exec::{ExecutionRequest, ExecutionResult, Timeout};
pub use handler::{
    DefinitionError, Handler, HandlerKind, HandlerType, PipeHandler, SocketHandler,
};
pub use mutator::{MutatorDef, BUILTIN_MUTATORS, JSON_MUTATOR, ONLY_CHECK_OUTPUT_MUTATOR};
