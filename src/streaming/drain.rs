//! Inbound message consumption on a dedicated task.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::Instrument;

use super::{
    error::StreamError,
    traits::{Frame, FrameSource, recv_within},
};
use crate::control::ControlEvent;

/// Record an informational text message from the peer.
pub fn log_text(text: &str) {
    match ControlEvent::parse(text) {
        Some(event) => tracing::info!(?event, "control event"),
        None => tracing::info!(text, "text message"),
    }
}

/// Counts gathered by a drain before its source failed.
#[derive(Debug)]
pub struct DrainReport {
    /// Text messages received.
    pub text_received: u64,
    /// Binary messages received (and discarded).
    pub binary_received: u64,
    /// The receive error that ended the drain.
    pub error: StreamError,
}

/// Reads a stream's receive half until it fails, logging text and dropping binary
/// payloads.
///
/// Ending the drain does not close the stream: the send half is owned elsewhere and
/// keeps working until its own failure.
#[derive(Debug)]
pub struct InboundDrain<R> {
    source: R,
    read_timeout: Option<Duration>,
}

impl<R: FrameSource> InboundDrain<R> {
    /// Create a drain over `source`.
    pub const fn new(source: R) -> Self {
        Self {
            source,
            read_timeout: None,
        }
    }

    /// Fail the drain when the peer is silent for longer than `timeout`.
    pub fn with_read_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.read_timeout = timeout;
        self
    }

    /// Consume messages until the first receive error. No read is attempted after it.
    pub async fn run(mut self) -> DrainReport {
        let mut text_received = 0;
        let mut binary_received = 0;

        let error = loop {
            match recv_within(&mut self.source, self.read_timeout).await {
                Ok(Frame::Text(text)) => {
                    text_received += 1;
                    log_text(&text);
                }
                Ok(Frame::Binary(data)) => {
                    binary_received += 1;
                    tracing::trace!(len = data.len(), "binary message ignored");
                }
                Ok(Frame::Close(signal)) => {
                    break StreamError::PeerClosed {
                        code: Some(signal.code),
                    };
                }
                Err(error) => break error,
            }
        };

        tracing::debug!(text_received, binary_received, %error, "inbound drain ended");
        DrainReport {
            text_received,
            binary_received,
            error,
        }
    }
}

impl<R: FrameSource + 'static> InboundDrain<R> {
    /// Run the drain on its own task, inside the caller's span.
    pub fn spawn(self) -> DrainHandle {
        DrainHandle {
            handle: tokio::spawn(self.run().in_current_span()),
        }
    }
}

/// Owner of a spawned drain. Dropping it aborts the task.
#[derive(Debug)]
pub struct DrainHandle {
    handle: JoinHandle<DrainReport>,
}

impl DrainHandle {
    /// Whether the drain has already ended.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait for the drain to end on its own.
    pub async fn join(mut self) -> Option<DrainReport> {
        (&mut self.handle).await.ok()
    }

    /// Collect the report if the drain already ended, otherwise abort it.
    pub async fn stop(mut self) -> Option<DrainReport> {
        if self.handle.is_finished() {
            (&mut self.handle).await.ok()
        } else {
            self.handle.abort();
            // Wait for the cancelled task to drop its receive half.
            let _ = (&mut self.handle).await;
            None
        }
    }
}

impl Drop for DrainHandle {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
