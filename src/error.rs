//! Error types and result utilities for the server process.
//!
//! Session-level failures live in [`crate::streaming::StreamError`] and never leave
//! the session that produced them. The errors here are the ones the process itself
//! can observe: bad configuration and a listener that cannot be bound or served.

use thiserror::Error;

use crate::streaming::StreamError;

/// Convenience type alias for results that may contain an [`AudioWsError`].
pub type Result<T> = std::result::Result<T, AudioWsError>;

/// Errors that can stop the server process.
#[derive(Error, Debug)]
pub enum AudioWsError {
    /// A configuration value is out of range.
    ///
    /// Contains the name of the offending field and the reason it was rejected.
    #[error("Invalid configuration for '{field}': {reason}")]
    InvalidConfig {
        /// Name of the rejected field.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },

    /// The listen address could not be bound. This is the only fatal startup failure.
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        /// The address that was requested.
        addr: String,
        /// The underlying socket error.
        source: std::io::Error,
    },

    /// The accept loop stopped with an I/O error.
    #[error("Server stopped: {0}")]
    Serve(#[source] std::io::Error),

    /// A stream error surfaced outside of a session.
    #[error(transparent)]
    Stream(#[from] StreamError),
}

impl AudioWsError {
    /// Create an invalid configuration error.
    pub fn invalid_config(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field,
            reason: reason.into(),
        }
    }
}
