// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Configuration TOML parsing

use crate::validator::{find_set_cycle, unresolved_references};
use crate::Settings;
use indexmap::IndexMap;
use pipelined_core::{Handler, MutatorDef};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while loading a configuration
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid format: {0}")]
    InvalidFormat(String),
    #[error("handler.{key}: name {name:?} does not match its table key")]
    NameMismatch { key: String, name: String },
    #[error("mutator.{0}: name is reserved for a built-in mutator")]
    ReservedMutator(String),
    #[error("handler set cycle: {}", .0.join(" -> "))]
    SetCycle(Vec<String>),
}

/// A parsed and validated configuration
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub settings: Settings,
    pub handlers: IndexMap<String, Handler>,
    pub mutators: IndexMap<String, MutatorDef>,
}

/// Read and parse a configuration file
pub fn load_config(path: &Path) -> Result<Config, ParseError> {
    let content = std::fs::read_to_string(path).map_err(|source| ParseError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(&content)
}

/// Parse a configuration from TOML content
pub fn parse_config(content: &str) -> Result<Config, ParseError> {
    let raw: toml::Value = toml::from_str(content)?;
    let table = raw
        .as_table()
        .ok_or_else(|| ParseError::InvalidFormat("root must be a table".to_string()))?;

    if let Some(key) = table
        .keys()
        .find(|k| !matches!(k.as_str(), "pipelined" | "handler" | "mutator"))
    {
        return Err(ParseError::InvalidFormat(format!(
            "unknown top-level table: {}",
            key
        )));
    }

    let mut config = Config::default();

    if let Some(value) = table.get("pipelined") {
        config.settings = parse_settings(value)?;
    }

    if let Some(value) = table.get("handler") {
        let handlers = value
            .as_table()
            .ok_or_else(|| ParseError::InvalidFormat("handler must be a table".to_string()))?;
        for (key, value) in handlers {
            let handler = parse_handler(key, value)?;
            config.handlers.insert(key.clone(), handler);
        }
    }

    if let Some(value) = table.get("mutator") {
        let mutators = value
            .as_table()
            .ok_or_else(|| ParseError::InvalidFormat("mutator must be a table".to_string()))?;
        for (key, value) in mutators {
            let mutator = parse_mutator(key, value)?;
            config.mutators.insert(key.clone(), mutator);
        }
    }

    if let Some(cycle) = find_set_cycle(&config.handlers) {
        return Err(ParseError::SetCycle(cycle));
    }

    for unresolved in unresolved_references(&config) {
        tracing::warn!(
            kind = unresolved.kind,
            name = %unresolved.name,
            referenced_in = %unresolved.referenced_in,
            "reference to undefined name"
        );
    }

    Ok(config)
}

fn parse_settings(value: &toml::Value) -> Result<Settings, ParseError> {
    let settings: Settings = value
        .clone()
        .try_into()
        .map_err(|e| ParseError::InvalidFormat(format!("pipelined: {}", e)))?;

    if settings.workers == 0 {
        return Err(ParseError::InvalidFormat(
            "pipelined.workers must be at least 1".to_string(),
        ));
    }
    if settings.buffer == 0 {
        return Err(ParseError::InvalidFormat(
            "pipelined.buffer must be at least 1".to_string(),
        ));
    }

    Ok(settings)
}

fn parse_handler(key: &str, value: &toml::Value) -> Result<Handler, ParseError> {
    if !value.is_table() {
        return Err(ParseError::InvalidFormat(format!(
            "handler.{} must be a table",
            key
        )));
    }

    let mut handler: Handler = value
        .clone()
        .try_into()
        .map_err(|e| ParseError::InvalidFormat(format!("handler.{}: {}", key, e)))?;

    if handler.name.is_empty() {
        handler.name = key.to_string();
    } else if handler.name != key {
        return Err(ParseError::NameMismatch {
            key: key.to_string(),
            name: handler.name,
        });
    }

    Ok(handler)
}

fn parse_mutator(key: &str, value: &toml::Value) -> Result<MutatorDef, ParseError> {
    if MutatorDef::is_builtin_name(key) {
        return Err(ParseError::ReservedMutator(key.to_string()));
    }

    let mut mutator: MutatorDef = value
        .clone()
        .try_into()
        .map_err(|e| ParseError::InvalidFormat(format!("mutator.{}: {}", key, e)))?;

    if mutator.command.trim().is_empty() {
        return Err(ParseError::InvalidFormat(format!(
            "mutator.{}: command must not be empty",
            key
        )));
    }

    if mutator.name.is_empty() {
        mutator.name = key.to_string();
    } else if mutator.name != key {
        return Err(ParseError::InvalidFormat(format!(
            "mutator.{}: name {:?} does not match its table key",
            key, mutator.name
        )));
    }

    Ok(mutator)
}

#[cfg(test)]
#[path = "parser_tests.rs"]
mod tests;
