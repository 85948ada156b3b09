//! Error types for streaming operations.

use std::time::Duration;

/// Boxed transport error.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Which half of a duplex stream an error came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// The receive half.
    Read,
    /// The send half.
    Write,
}

/// Streaming-specific error types.
#[derive(Debug, thiserror::Error)]
pub enum StreamError {
    /// The transport handshake could not be completed; no stream exists.
    #[error("Transport upgrade failed: {0}")]
    Upgrade(String),

    /// Receiving a message failed.
    #[error("Read failed: {source}")]
    Read {
        /// Transport error.
        source: BoxError,
    },

    /// Sending a message failed.
    #[error("Write failed: {source}")]
    Write {
        /// Transport error.
        source: BoxError,
    },

    /// The peer closed its side of the stream.
    #[error("Peer closed the stream{}", close_suffix(code))]
    PeerClosed {
        /// Close code sent by the peer, if any.
        code: Option<u16>,
    },

    /// A write was attempted on a stream that is already closed.
    #[error("Stream already closed")]
    Closed,

    /// A bounded read or write did not finish in time.
    #[error("Operation '{operation}' timed out after {}ms", duration.as_millis())]
    Timeout {
        /// `"read"` or `"write"`.
        operation: &'static str,
        /// The bound that was exceeded.
        duration: Duration,
    },
}

impl StreamError {
    /// Wrap a transport error raised while receiving.
    pub fn read(source: impl Into<BoxError>) -> Self {
        Self::Read {
            source: source.into(),
        }
    }

    /// Wrap a transport error raised while sending.
    pub fn write(source: impl Into<BoxError>) -> Self {
        Self::Write {
            source: source.into(),
        }
    }

    /// Create a timeout error.
    pub const fn timeout(operation: &'static str, duration: Duration) -> Self {
        Self::Timeout {
            operation,
            duration,
        }
    }

    /// The stream half this error belongs to, if it belongs to one.
    pub fn direction(&self) -> Option<Direction> {
        match self {
            Self::Read { .. } | Self::PeerClosed { .. } => Some(Direction::Read),
            Self::Write { .. } | Self::Closed => Some(Direction::Write),
            Self::Timeout { operation, .. } if *operation == "read" => Some(Direction::Read),
            Self::Timeout { .. } => Some(Direction::Write),
            Self::Upgrade(_) => None,
        }
    }

    /// Check if this is a graceful close rather than a transport fault.
    pub const fn is_peer_close(&self) -> bool {
        matches!(self, Self::PeerClosed { .. })
    }
}

fn close_suffix(code: &Option<u16>) -> String {
    code.map(|code| format!(" (code {code})")).unwrap_or_default()
}

/// Result type for streaming operations
pub type StreamResult<T> = Result<T, StreamError>;
