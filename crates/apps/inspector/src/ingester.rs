//! One matcher connection: HTTP event stream -> SSE frames -> domain events.
//!
//! Malformed or invalid messages are logged and dropped; the connection only
//! ends when the transport does. There is no reconnect.

use std::fmt;

use bytes::Bytes;
use futures_util::{pin_mut, Stream, StreamExt};
use parking_lot::Mutex;
use streaming::{decode_message, DomainEvent, IngestMetrics, SseDecoder};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::session::ConnectionId;

/// What an ingester hands to the store task.
#[derive(Debug)]
pub enum Inbound {
    Event {
        connection: ConnectionId,
        event: DomainEvent,
    },
    /// Acknowledged once everything queued before it has been applied.
    Flush(tokio::sync::oneshot::Sender<()>),
}

#[derive(Debug)]
pub enum IngestError {
    Request(reqwest::Error),
    Status(reqwest::StatusCode),
    Stream(Box<dyn std::error::Error + Send + Sync>),
}

impl fmt::Display for IngestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IngestError::Request(e) => write!(f, "request failed: {e}"),
            IngestError::Status(s) => write!(f, "unexpected status {s}"),
            IngestError::Stream(e) => write!(f, "stream error: {e}"),
        }
    }
}

impl std::error::Error for IngestError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            IngestError::Request(e) => Some(e),
            IngestError::Status(_) => None,
            IngestError::Stream(e) => Some(e.as_ref()),
        }
    }
}

/// Open the event stream at `endpoint`.
pub async fn open(
    http: &reqwest::Client,
    endpoint: &str,
) -> Result<impl Stream<Item = Result<Bytes, reqwest::Error>>, IngestError> {
    let resp = http
        .get(endpoint)
        .header(reqwest::header::ACCEPT, "text/event-stream")
        .send()
        .await
        .map_err(IngestError::Request)?;
    if !resp.status().is_success() {
        return Err(IngestError::Status(resp.status()));
    }
    Ok(resp.bytes_stream())
}

/// Drive one byte stream to completion, forwarding decoded events.
///
/// Returns `Ok` when the stream ends or the store has gone away.
pub async fn pump<S, E>(
    stream: S,
    connection: ConnectionId,
    tx: &mpsc::UnboundedSender<Inbound>,
    metrics: &Mutex<IngestMetrics>,
) -> Result<(), IngestError>
where
    S: Stream<Item = Result<Bytes, E>>,
    E: std::error::Error + Send + Sync + 'static,
{
    pin_mut!(stream);
    let mut decoder = SseDecoder::new();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| IngestError::Stream(Box::new(e)))?;
        for frame in decoder.push(&chunk) {
            if !frame.is_message() {
                debug!(%connection, event = ?frame.event, "skipping named event");
                continue;
            }

            let outcome = decode_message(&frame.data);
            metrics.lock().record(frame.data.len(), &outcome);

            match outcome {
                Ok(Some(event)) => {
                    debug!(%connection, kind = %event.event_type(), id = event.id, "event");
                    if tx.send(Inbound::Event { connection, event }).is_err() {
                        info!(%connection, "store closed; stopping");
                        return Ok(());
                    }
                }
                Ok(None) => debug!(%connection, "ignoring message with unknown discriminant"),
                Err(err) => warn!(%connection, "dropping message: {err}"),
            }
        }
    }
    Ok(())
}

/// Connection task body: open, pump, log how it ended.
pub async fn run(
    http: reqwest::Client,
    endpoint: String,
    connection: ConnectionId,
    tx: mpsc::UnboundedSender<Inbound>,
    metrics: std::sync::Arc<Mutex<IngestMetrics>>,
) {
    info!(%connection, %endpoint, "connecting");
    let result = match open(&http, &endpoint).await {
        Ok(stream) => pump(stream, connection, &tx, &metrics).await,
        Err(err) => Err(err),
    };
    match result {
        Ok(()) => info!(%connection, %endpoint, "event stream ended"),
        Err(err) => warn!(%connection, %endpoint, "connection lost: {err}"),
    }
}
