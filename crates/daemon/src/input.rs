// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Newline-delimited JSON event input

use pipelined_core::Event;
use pipelined_engine::EventSender;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

/// Parse one input line. Blank lines carry no event.
pub fn parse_line(line: impl AsRef<[u8]>) -> Result<Option<Event>, serde_json::Error> {
    let line = line.as_ref().trim_ascii();
    if line.is_empty() {
        return Ok(None);
    }
    serde_json::from_slice(line).map(Some)
}

/// Queue every event read from `input` until EOF.
///
/// Malformed lines, including ones that are not valid UTF-8, are logged and
/// skipped. Returns the number of events queued, stopping early if the
/// service shuts down.
pub async fn read_events<R>(mut input: R, sender: EventSender) -> std::io::Result<usize>
where
    R: AsyncBufRead + Unpin,
{
    let mut line = Vec::new();
    let mut queued = 0;
    let mut line_no = 0;

    loop {
        line.clear();
        if input.read_until(b'\n', &mut line).await? == 0 {
            break;
        }
        line_no += 1;
        let event = match parse_line(&line) {
            Ok(Some(event)) => event,
            Ok(None) => continue,
            Err(e) => {
                tracing::warn!(line = line_no, error = %e, "skipping malformed event");
                continue;
            }
        };

        tracing::debug!(line = line_no, check = %event.check.name, "queueing event");
        if let Err(e) = sender.send(event).await {
            tracing::warn!(error = %e, "event input closed early");
            break;
        }
        queued += 1;
    }

    Ok(queued)
}

#[cfg(test)]
#[path = "input_tests.rs"]
mod tests;
