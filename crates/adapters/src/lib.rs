// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
// Enable coverage(off) attribute for excluding test infrastructure
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Adapters for external I/O: definition storage, mutation, process execution

pub mod exec;
pub mod mutate;
pub mod store;
pub mod traced;

pub use exec::{ExecError, Executor, ShellExecutor};
pub use mutate::{MutateError, Mutator, MutatorRegistry};
pub use store::{HandlerStore, MemoryStore, StoreError};
pub use traced::{TracedExecutor, TracedHandlerStore};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
pub use exec::{FakeExecutor, FakeOutcome};
#[cfg(any(test, feature = "test-support"))]
pub use mutate::{FakeMutator, MutateCall};
#[cfg(any(test, feature = "test-support"))]
pub use store::FakeHandlerStore;
