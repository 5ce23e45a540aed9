// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shell command executor

use super::{ExecError, Executor};
use async_trait::async_trait;
use nix::errno::Errno;
use nix::sys::signal::{killpg, Signal};
use nix::unistd::Pid;
use pipelined_core::{ExecutionRequest, ExecutionResult};
use std::process::{ExitStatus, Stdio};
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWriteExt};
use tokio::process::Command;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Runs commands through `sh -c`, each in its own process group
#[derive(Clone, Default)]
pub struct ShellExecutor;

impl ShellExecutor {
    pub fn new() -> Self {
        Self
    }
}

/// Pipe readers outlive the shell only if something outside its group holds
/// the pipe open; give up on them after this long
const OUTPUT_DRAIN_GRACE: Duration = Duration::from_secs(1);

enum Finished {
    Exited(std::io::Result<ExitStatus>),
    TimedOut(Duration),
    Cancelled,
}

type PipeReader = JoinHandle<std::io::Result<Vec<u8>>>;

#[async_trait]
impl Executor for ShellExecutor {
    async fn execute(
        &self,
        request: ExecutionRequest,
        cancel: &CancellationToken,
    ) -> Result<ExecutionResult, ExecError> {
        let ExecutionRequest {
            command,
            timeout,
            input,
        } = request;

        let mut child = Command::new("sh")
            .arg("-c")
            .arg(&command)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .process_group(0)
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| ExecError::Spawn {
                command: command.clone(),
                source,
            })?;

        // Owns the group from here on; dropping it kills everything left in it
        let group = ProcessGroup::new(child.id());

        let feed = child.stdin.take().map(|mut stdin| {
            tokio::spawn(async move {
                // Commands are free to exit without reading their input
                if let Err(e) = stdin.write_all(&input).await {
                    tracing::debug!(error = %e, "stdin closed before payload was written");
                }
            })
        });
        let stdout = child.stdout.take().map(|pipe| tokio::spawn(read_pipe(pipe)));
        let stderr = child.stderr.take().map(|pipe| tokio::spawn(read_pipe(pipe)));

        let deadline = async {
            match timeout.duration() {
                Some(limit) => {
                    tokio::time::sleep(limit).await;
                    limit
                }
                None => std::future::pending().await,
            }
        };

        // Only the shell itself is awaited; background children may still
        // hold the output pipes open
        let finished = tokio::select! {
            status = child.wait() => Finished::Exited(status),
            limit = deadline => Finished::TimedOut(limit),
            _ = cancel.cancelled() => Finished::Cancelled,
        };

        drop(group);
        if let Some(feed) = feed {
            feed.abort();
        }

        match finished {
            Finished::Exited(Ok(status)) => {
                let mut output = collect(stdout, &command).await;
                output.extend_from_slice(&collect(stderr, &command).await);
                Ok(ExecutionResult {
                    status: status.code().unwrap_or(-1),
                    output,
                })
            }
            finished => {
                for reader in [&stdout, &stderr].into_iter().flatten() {
                    reader.abort();
                }
                match finished {
                    Finished::Exited(Err(source)) => Err(ExecError::Io { command, source }),
                    Finished::TimedOut(after) => Err(ExecError::Timeout { command, after }),
                    _ => Err(ExecError::Cancelled { command }),
                }
            }
        }
    }
}

async fn read_pipe<R: AsyncRead + Unpin>(mut pipe: R) -> std::io::Result<Vec<u8>> {
    let mut buf = Vec::new();
    pipe.read_to_end(&mut buf).await?;
    Ok(buf)
}

/// Wait for a pipe reader once the process group is gone
async fn collect(reader: Option<PipeReader>, command: &str) -> Vec<u8> {
    let Some(mut reader) = reader else {
        return Vec::new();
    };
    match tokio::time::timeout(OUTPUT_DRAIN_GRACE, &mut reader).await {
        Ok(Ok(Ok(bytes))) => bytes,
        Ok(Ok(Err(e))) => {
            tracing::warn!(command, error = %e, "failed to read command output");
            Vec::new()
        }
        Ok(Err(e)) => {
            tracing::warn!(command, error = %e, "output reader failed");
            Vec::new()
        }
        Err(_) => {
            reader.abort();
            tracing::warn!(command, "command output still open after exit, discarding");
            Vec::new()
        }
    }
}

/// Process group of a spawned command, killed when dropped
struct ProcessGroup {
    pgid: Option<Pid>,
}

impl ProcessGroup {
    fn new(pid: Option<u32>) -> Self {
        Self {
            pgid: pid.and_then(|pid| i32::try_from(pid).ok()).map(Pid::from_raw),
        }
    }
}

impl Drop for ProcessGroup {
    fn drop(&mut self) {
        let Some(pgid) = self.pgid.take() else {
            return;
        };
        match killpg(pgid, Signal::SIGKILL) {
            Ok(()) => tracing::debug!(pgid = pgid.as_raw(), "killed process group"),
            // Every member already exited
            Err(Errno::ESRCH) => {}
            Err(e) => tracing::warn!(pgid = pgid.as_raw(), error = %e, "failed to kill process group"),
        }
    }
}

#[cfg(test)]
#[path = "shell_tests.rs"]
mod tests;
