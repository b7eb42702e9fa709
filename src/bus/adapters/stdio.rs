//! Line-delimited JSON bridge between byte streams and a [`ChannelBus`].
//!
//! Each input line is a `{"topic": "...", "payload": {...}}` object; each
//! published response is written back in the same shape.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use super::channel::ChannelBus;
use crate::bus::domain::OutboundMessage;

#[derive(Debug, Deserialize)]
struct InboundLine {
    topic: String,
    payload: Value,
}

#[derive(Debug, Serialize)]
struct OutboundLine<'a> {
    topic: &'a str,
    payload: Value,
}

/// Counts of lines read by [`pump_lines`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PumpSummary {
    /// Lines queued on the bus.
    pub submitted: usize,
    /// Lines skipped because they were not valid envelopes.
    pub skipped: usize,
}

/// Reads envelopes from `reader` until end of input and queues each on
/// `bus`. Blank lines are ignored.
///
/// # Errors
///
/// Returns the I/O error that stopped reading.
pub async fn pump_lines<R>(reader: R, bus: &ChannelBus) -> std::io::Result<PumpSummary>
where
    R: AsyncBufRead + Unpin,
{
    let mut summary = PumpSummary::default();
    let mut lines = reader.lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let envelope = match serde_json::from_str::<InboundLine>(&line) {
            Ok(envelope) => envelope,
            Err(err) => {
                warn!(error = %err, "skipping malformed input line");
                summary.skipped += 1;
                continue;
            }
        };
        let payload = serde_json::to_vec(&envelope.payload).map_err(std::io::Error::other)?;
        match bus.submit(envelope.topic, payload) {
            Ok(message_id) => {
                debug!(message_id = %message_id, "input line queued");
                summary.submitted += 1;
            }
            Err(err) => {
                warn!(error = %err, "bus closed; stopping input");
                break;
            }
        }
    }
    Ok(summary)
}

/// Writes every outbound message to `writer`, one JSON line each, until the
/// channel closes. Returns the number of lines written.
///
/// # Errors
///
/// Returns the I/O error that stopped writing.
pub async fn drain_responses<W>(
    mut outbound: mpsc::UnboundedReceiver<OutboundMessage>,
    mut writer: W,
) -> std::io::Result<usize>
where
    W: AsyncWrite + Unpin,
{
    let mut written = 0;
    while let Some(message) = outbound.recv().await {
        let payload = serde_json::from_slice(&message.payload).map_err(std::io::Error::other)?;
        let line = OutboundLine {
            topic: &message.topic,
            payload,
        };
        let mut bytes = serde_json::to_vec(&line).map_err(std::io::Error::other)?;
        bytes.push(b'\n');
        writer.write_all(&bytes).await?;
        writer.flush().await?;
        written += 1;
    }
    Ok(written)
}
