// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Pipelined daemon (pipelined)
//!
//! Reads events as newline-delimited JSON on stdin and routes each one
//! through its check's handlers.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod input;
mod lifecycle;

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tokio::io::BufReader;
use tokio::signal::unix::{signal, SignalKind};
use tracing::{error, info};

use crate::lifecycle::{Daemon, Overrides};

#[derive(Parser, Debug)]
#[command(name = "pipelined", version, about = "Route events through their handlers")]
struct Args {
    /// Configuration file with handler and mutator definitions
    #[arg(short, long)]
    config: PathBuf,

    /// Number of events processed concurrently
    #[arg(short, long, value_parser = parse_workers)]
    workers: Option<usize>,

    /// Write logs to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn parse_workers(value: &str) -> Result<usize, String> {
    match value.parse::<usize>() {
        Ok(0) => Err("must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(e.to_string()),
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to start runtime")?;
    let result = runtime.block_on(run(args));

    // Stdin reads block a runtime thread and cannot be interrupted
    runtime.shutdown_background();
    result
}

async fn run(args: Args) -> anyhow::Result<()> {
    let overrides = Overrides {
        workers: args.workers,
        log_file: args.log_file,
    };
    let config = lifecycle::load(&args.config, &overrides)
        .with_context(|| format!("failed to load {}", args.config.display()))?;

    let _log_guard = lifecycle::setup_logging(&config.settings)?;

    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sighup = signal(SignalKind::hangup())?;

    let daemon = Daemon::start(&args.config, config);
    let mut reader = tokio::spawn(input::read_events(
        BufReader::new(tokio::io::stdin()),
        daemon.sender(),
    ));

    info!(config = %args.config.display(), "pipelined ready");

    loop {
        tokio::select! {
            read = &mut reader => {
                match read {
                    Ok(Ok(queued)) => info!(queued, "end of input, draining"),
                    Ok(Err(e)) => error!(error = %e, "failed to read events, draining"),
                    Err(e) => error!(error = %e, "event reader failed, draining"),
                }
                daemon.drain().await;
                break;
            }

            _ = sighup.recv() => {
                info!("Received SIGHUP, reloading configuration");
                lifecycle::reload_or_keep(&daemon);
            }

            _ = sigterm.recv() => {
                info!("Received SIGTERM, shutting down...");
                reader.abort();
                daemon.shutdown().await;
                break;
            }

            _ = sigint.recv() => {
                info!("Received SIGINT, shutting down...");
                reader.abort();
                daemon.shutdown().await;
                break;
            }
        }
    }

    info!("pipelined stopped");
    Ok(())
}
