//! Core traits for message-oriented duplex streams.

use std::future::Future;
use std::time::Duration;

use super::error::{StreamError, StreamResult};

/// Close code for a normal, intentional closure.
pub const CLOSE_NORMAL: u16 = 1000;

/// A protocol-level request to end the session gracefully.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloseSignal {
    /// Numeric close code.
    pub code: u16,
    /// Optional human readable reason.
    pub reason: String,
}

impl CloseSignal {
    /// Normal closure with an empty reason.
    pub fn normal() -> Self {
        Self {
            code: CLOSE_NORMAL,
            reason: String::new(),
        }
    }
}

/// One discrete message on a duplex stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    /// UTF-8 payload. Informational only, never interpreted as a command.
    Text(String),
    /// Raw sample or control payload.
    Binary(Vec<u8>),
    /// Outbound close signal. Sources report an inbound close as
    /// [`StreamError::PeerClosed`] instead of yielding this variant.
    Close(CloseSignal),
}

impl Frame {
    /// Short name of the message kind, for logging.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Binary(_) => "binary",
            Self::Close(_) => "close",
        }
    }

    /// Payload size in bytes.
    pub fn len(&self) -> usize {
        match self {
            Self::Text(text) => text.len(),
            Self::Binary(data) => data.len(),
            Self::Close(signal) => signal.reason.len(),
        }
    }

    /// Whether the payload is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The receive half of a duplex stream.
///
/// Only one task may read from a source at a time; ownership enforces this.
pub trait FrameSource: Send {
    /// Wait for the next text or binary message.
    ///
    /// Returns [`StreamError::PeerClosed`] once the peer has closed the stream and
    /// [`StreamError::Read`] on any transport fault. After an error no further calls
    /// should be made.
    fn recv(&mut self) -> impl Future<Output = StreamResult<Frame>> + Send;
}

/// The send half of a duplex stream.
///
/// Exactly one sink exists per stream, so writes are serialized by whichever task
/// owns it.
pub trait FrameSink: Send {
    /// Send one message, waiting as long as the transport applies backpressure.
    fn send(&mut self, frame: Frame) -> impl Future<Output = StreamResult<()>> + Send;
}

/// A bidirectional stream that can be split into independently owned halves.
pub trait Duplex: Send + 'static {
    /// Send half.
    type Sink: FrameSink + 'static;
    /// Receive half.
    type Source: FrameSource + 'static;

    /// Separate the two directions.
    fn split(self) -> (Self::Sink, Self::Source);
}

/// Receive with an optional deadline. `None` waits forever.
pub async fn recv_within<S: FrameSource>(
    source: &mut S,
    limit: Option<Duration>,
) -> StreamResult<Frame> {
    match limit {
        Some(duration) => tokio::time::timeout(duration, source.recv())
            .await
            .map_err(|_| StreamError::timeout("read", duration))?,
        None => source.recv().await,
    }
}

/// Send with an optional deadline. `None` waits forever.
pub async fn send_within<S: FrameSink>(
    sink: &mut S,
    frame: Frame,
    limit: Option<Duration>,
) -> StreamResult<()> {
    match limit {
        Some(duration) => tokio::time::timeout(duration, sink.send(frame))
            .await
            .map_err(|_| StreamError::timeout("write", duration))?,
        None => sink.send(frame).await,
    }
}
