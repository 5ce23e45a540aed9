// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Handler, mutator, and daemon configuration loading

mod parser;
mod settings;
mod validator;

pub use parser::{load_config, parse_config, Config, ParseError};
pub use settings::Settings;
pub use validator::{find_set_cycle, unresolved_references, UnresolvedReference};
