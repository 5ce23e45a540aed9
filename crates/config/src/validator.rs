// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Semantic checks over parsed definitions.
//!
//! Set cycles make a configuration invalid. Dangling references are reported
//! but tolerated: the pipeline skips names it cannot resolve.

use crate::Config;
use indexmap::IndexMap;
use pipelined_core::{Handler, MutatorDef};
use std::collections::HashSet;

/// A name referenced somewhere that has no definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedReference {
    pub kind: &'static str,
    pub name: String,
    pub referenced_in: String,
}

/// Find a handler set that reaches itself, returning the cycle path
pub fn find_set_cycle(handlers: &IndexMap<String, Handler>) -> Option<Vec<String>> {
    let mut done = HashSet::new();
    for name in handlers.keys() {
        let mut path = Vec::new();
        if let Some(cycle) = visit(name, handlers, &mut path, &mut done) {
            return Some(cycle);
        }
    }
    None
}

fn visit(
    name: &str,
    handlers: &IndexMap<String, Handler>,
    path: &mut Vec<String>,
    done: &mut HashSet<String>,
) -> Option<Vec<String>> {
    if let Some(start) = path.iter().position(|n| n == name) {
        let mut cycle = path[start..].to_vec();
        cycle.push(name.to_string());
        return Some(cycle);
    }
    if done.contains(name) {
        return None;
    }

    let handler = handlers.get(name)?;
    path.push(name.to_string());
    for member in handler.members() {
        if let Some(cycle) = visit(member, handlers, path, done) {
            return Some(cycle);
        }
    }
    path.pop();
    done.insert(name.to_string());
    None
}

/// List set members and mutators that are referenced but not defined
pub fn unresolved_references(config: &Config) -> Vec<UnresolvedReference> {
    let mut unresolved = Vec::new();

    for (name, handler) in &config.handlers {
        for member in handler.members() {
            if !config.handlers.contains_key(member) {
                unresolved.push(UnresolvedReference {
                    kind: "handler",
                    name: member.clone(),
                    referenced_in: name.clone(),
                });
            }
        }

        if let Some(mutator) = &handler.mutator {
            if !MutatorDef::is_builtin_name(mutator) && !config.mutators.contains_key(mutator) {
                unresolved.push(UnresolvedReference {
                    kind: "mutator",
                    name: mutator.clone(),
                    referenced_in: name.clone(),
                });
            }
        }
    }

    unresolved
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
