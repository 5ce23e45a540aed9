// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon lifecycle: startup, configuration reload, shutdown

use std::path::{Path, PathBuf};

use pipelined_adapters::{
    MemoryStore, MutatorRegistry, ShellExecutor, TracedExecutor, TracedHandlerStore,
};
use pipelined_config::{load_config, Config, ParseError, Settings};
use pipelined_engine::{EventSender, Pipeline, Pipelined, ServiceConfig};
use thiserror::Error;
use tracing::{info, warn};

/// Definition store as wired in the daemon
pub type DaemonStore = TracedHandlerStore<MemoryStore>;

/// Executor as wired in the daemon
pub type DaemonExecutor = TracedExecutor<ShellExecutor>;

/// Pipeline with concrete adapter types (wrapped with tracing)
pub type DaemonPipeline =
    Pipeline<DaemonStore, MutatorRegistry<DaemonStore, DaemonExecutor>, DaemonExecutor>;

#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error(transparent)]
    Config(#[from] ParseError),
    #[error("invalid log file path: {}", .0.display())]
    InvalidLogPath(PathBuf),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Command-line overrides for the `[pipelined]` settings
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub workers: Option<usize>,
    pub log_file: Option<PathBuf>,
}

/// Load the configuration file and apply command-line overrides
pub fn load(path: &Path, overrides: &Overrides) -> Result<Config, LifecycleError> {
    let mut config = load_config(path)?;
    apply_overrides(&mut config.settings, overrides);
    Ok(config)
}

fn apply_overrides(settings: &mut Settings, overrides: &Overrides) {
    if let Some(workers) = overrides.workers {
        settings.workers = workers;
    }
    if let Some(log_file) = &overrides.log_file {
        settings.log_file = Some(log_file.clone());
    }
}

/// Daemon state during operation
pub struct Daemon {
    config_path: PathBuf,
    store: MemoryStore,
    service: Pipelined,
}

impl Daemon {
    /// Wire the adapters and start the worker pool.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(config_path: &Path, config: Config) -> Self {
        let Config {
            settings,
            handlers,
            mutators,
        } = config;

        let store = MemoryStore::with_definitions(handlers.into_values(), mutators.into_values());
        info!(
            handlers = store.handler_count(),
            mutators = store.mutator_count(),
            "loaded definitions"
        );

        let traced_store = TracedHandlerStore::new(store.clone());
        let executor = TracedExecutor::new(ShellExecutor::new());
        let mutator = MutatorRegistry::new(traced_store.clone(), executor.clone());
        let pipeline: DaemonPipeline = Pipeline::new(traced_store, mutator, executor);

        let service = Pipelined::start(
            pipeline,
            ServiceConfig {
                workers: settings.workers,
                buffer: settings.buffer,
            },
        );

        Self {
            config_path: config_path.to_path_buf(),
            store,
            service,
        }
    }

    pub fn sender(&self) -> EventSender {
        self.service.sender()
    }

    /// Re-read the configuration file and swap in its definitions.
    ///
    /// On error the current definitions stay in place. Worker and buffer
    /// sizes only take effect on restart.
    pub fn reload(&self) -> Result<(), LifecycleError> {
        let Config {
            handlers, mutators, ..
        } = load_config(&self.config_path)?;

        let (handler_count, mutator_count) = (handlers.len(), mutators.len());
        self.store.replace(handlers.into_values(), mutators.into_values());
        info!(
            handlers = handler_count,
            mutators = mutator_count,
            "configuration reloaded"
        );
        Ok(())
    }

    /// Stop immediately, killing in-flight handlers
    pub async fn shutdown(self) {
        self.service.stop().await;
    }

    /// Finish every queued event, then stop
    pub async fn drain(self) {
        self.service.drain().await;
    }
}

/// Reload, keeping the old definitions on failure
pub fn reload_or_keep(daemon: &Daemon) {
    if let Err(e) = daemon.reload() {
        warn!(error = %e, "failed to reload configuration, keeping current definitions");
    }
}

pub fn setup_logging(
    settings: &Settings,
) -> Result<Option<tracing_appender::non_blocking::WorkerGuard>, LifecycleError> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let Some(log_path) = &settings.log_file else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
        return Ok(None);
    };

    let file_name = log_path
        .file_name()
        .ok_or_else(|| LifecycleError::InvalidLogPath(log_path.clone()))?;
    let dir = match log_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)?;

    let file_appender = tracing_appender::rolling::never(dir, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .init();

    Ok(Some(guard))
}

#[cfg(test)]
#[path = "lifecycle_tests.rs"]
mod tests;
