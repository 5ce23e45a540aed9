// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Handler definitions
//!
//! A handler is either a leaf that delivers an event (a pipe command or a
//! socket relay) or a set that names other handlers to be expanded in place.

use crate::exec::Timeout;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors in a handler definition
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DefinitionError {
    #[error("handler {handler}: unknown handler type {kind:?}")]
    UnknownType { handler: String, kind: String },
    #[error("handler {handler}: missing required field {field}")]
    MissingField { handler: String, field: &'static str },
    #[error("handler {handler}: field {field} is not valid for {kind} handlers")]
    UnexpectedField {
        handler: String,
        field: &'static str,
        kind: HandlerType,
    },
}

/// Strategy tag of a handler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HandlerType {
    Pipe,
    Set,
    Tcp,
    Udp,
}

impl HandlerType {
    pub fn as_str(&self) -> &'static str {
        match self {
            HandlerType::Pipe => "pipe",
            HandlerType::Set => "set",
            HandlerType::Tcp => "tcp",
            HandlerType::Udp => "udp",
        }
    }

    fn parse(handler: &str, kind: &str) -> Result<Self, DefinitionError> {
        match kind {
            "pipe" => Ok(HandlerType::Pipe),
            "set" => Ok(HandlerType::Set),
            "tcp" => Ok(HandlerType::Tcp),
            "udp" => Ok(HandlerType::Udp),
            other => Err(DefinitionError::UnknownType {
                handler: handler.to_string(),
                kind: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for HandlerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Runs a command with the event payload on stdin
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipeHandler {
    pub command: String,
    #[serde(default)]
    pub timeout: Timeout,
}

/// Relays the event payload to a network socket
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocketHandler {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub timeout: Timeout,
}

/// Delivery strategy of a handler, each with its own configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerKind {
    Pipe(PipeHandler),
    Set { handlers: Vec<String> },
    Tcp(SocketHandler),
    Udp(SocketHandler),
}

impl HandlerKind {
    pub fn handler_type(&self) -> HandlerType {
        match self {
            HandlerKind::Pipe(_) => HandlerType::Pipe,
            HandlerKind::Set { .. } => HandlerType::Set,
            HandlerKind::Tcp(_) => HandlerType::Tcp,
            HandlerKind::Udp(_) => HandlerType::Udp,
        }
    }
}

/// A named handler definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "HandlerWire", into = "HandlerWire")]
pub struct Handler {
    pub name: String,
    pub kind: HandlerKind,
    /// Mutator applied to the event before dispatch
    pub mutator: Option<String>,
}

impl Handler {
    /// A pipe handler with no timeout
    pub fn pipe(name: impl Into<String>, command: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: HandlerKind::Pipe(PipeHandler {
                command: command.into(),
                timeout: Timeout::Never,
            }),
            mutator: None,
        }
    }

    /// A handler set naming other handlers
    pub fn set<I, S>(name: impl Into<String>, handlers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            kind: HandlerKind::Set {
                handlers: handlers.into_iter().map(Into::into).collect(),
            },
            mutator: None,
        }
    }

    pub fn tcp(name: impl Into<String>, host: impl Into<String>, port: u16) -> Self {
        Self {
            name: name.into(),
            kind: HandlerKind::Tcp(SocketHandler {
                host: host.into(),
                port,
                timeout: Timeout::Never,
            }),
            mutator: None,
        }
    }

    pub fn with_mutator(mut self, mutator: impl Into<String>) -> Self {
        self.mutator = Some(mutator.into());
        self
    }

    /// Set the timeout of a pipe or socket handler. No effect on sets.
    pub fn with_timeout(mut self, timeout: Timeout) -> Self {
        match &mut self.kind {
            HandlerKind::Pipe(pipe) => pipe.timeout = timeout,
            HandlerKind::Tcp(socket) | HandlerKind::Udp(socket) => socket.timeout = timeout,
            HandlerKind::Set { .. } => {}
        }
        self
    }

    pub fn handler_type(&self) -> HandlerType {
        self.kind.handler_type()
    }

    /// Names referenced by a handler set, empty for leaf handlers
    pub fn members(&self) -> &[String] {
        match &self.kind {
            HandlerKind::Set { handlers } => handlers,
            _ => &[],
        }
    }
}

/// Flat wire shape shared by the JSON and TOML encodings
#[derive(Serialize, Deserialize)]
struct HandlerWire {
    #[serde(default)]
    name: String,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    handlers: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pipe: Option<PipeHandler>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    socket: Option<SocketHandler>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    mutator: Option<String>,
}

impl TryFrom<HandlerWire> for Handler {
    type Error = DefinitionError;

    fn try_from(wire: HandlerWire) -> Result<Self, Self::Error> {
        let handler_type = HandlerType::parse(&wire.name, &wire.kind)?;
        let unexpected = |field| DefinitionError::UnexpectedField {
            handler: wire.name.clone(),
            field,
            kind: handler_type,
        };
        let missing = |field| DefinitionError::MissingField {
            handler: wire.name.clone(),
            field,
        };

        let kind = match handler_type {
            HandlerType::Pipe => {
                if wire.handlers.is_some() {
                    return Err(unexpected("handlers"));
                }
                if wire.socket.is_some() {
                    return Err(unexpected("socket"));
                }
                let pipe = wire.pipe.ok_or_else(|| missing("pipe"))?;
                if pipe.command.trim().is_empty() {
                    return Err(missing("pipe.command"));
                }
                HandlerKind::Pipe(pipe)
            }
            HandlerType::Set => {
                if wire.pipe.is_some() {
                    return Err(unexpected("pipe"));
                }
                if wire.socket.is_some() {
                    return Err(unexpected("socket"));
                }
                let handlers = wire.handlers.ok_or_else(|| missing("handlers"))?;
                HandlerKind::Set { handlers }
            }
            HandlerType::Tcp | HandlerType::Udp => {
                if wire.pipe.is_some() {
                    return Err(unexpected("pipe"));
                }
                if wire.handlers.is_some() {
                    return Err(unexpected("handlers"));
                }
                let socket = wire.socket.ok_or_else(|| missing("socket"))?;
                if socket.host.trim().is_empty() {
                    return Err(missing("socket.host"));
                }
                if handler_type == HandlerType::Tcp {
                    HandlerKind::Tcp(socket)
                } else {
                    HandlerKind::Udp(socket)
                }
            }
        };

        Ok(Handler {
            name: wire.name,
            kind,
            mutator: wire.mutator,
        })
    }
}

impl From<Handler> for HandlerWire {
    fn from(handler: Handler) -> Self {
        let kind = handler.handler_type().as_str().to_string();
        let mut wire = HandlerWire {
            name: handler.name,
            kind,
            handlers: None,
            pipe: None,
            socket: None,
            mutator: handler.mutator,
        };
        match handler.kind {
            HandlerKind::Pipe(pipe) => wire.pipe = Some(pipe),
            HandlerKind::Set { handlers } => wire.handlers = Some(handlers),
            HandlerKind::Tcp(socket) | HandlerKind::Udp(socket) => wire.socket = Some(socket),
        }
        wire
    }
}

#[cfg(test)]
#[path = "handler_tests.rs"]
mod tests;
