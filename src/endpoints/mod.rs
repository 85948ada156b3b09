//! Request-handling units bound to one duplex stream.
//!
//! The four variants share one skeleton on purpose, so they can be read side by side:
//!
//! | Variant | Reader | Writer | Ends on |
//! |---|---|---|---|
//! | [`echo`] | one task reads, echoes binary payloads | same task | first read or write error |
//! | [`sync_reply`] | one task reads, answers binary with a tone chunk | same task | first read or write error |
//! | [`async_timed`] | spawned [`InboundDrain`](crate::streaming::InboundDrain) | [`FramePump`](crate::streaming::FramePump) on a fixed cadence | writer failure only |
//! | [`capture`] | one task reads up to a limit, answers binary with silence | same task | read error or limit |
//!
//! Every session moves through [`EndpointState::Upgrading`],
//! [`EndpointState::Streaming`] and [`EndpointState::Closed`]. Failures stay inside the
//! session: they are logged, the stream and any task or ticker are released, and
//! nothing propagates to other sessions.

pub mod async_timed;
pub mod capture;
pub mod echo;
pub mod sync_reply;

#[cfg(test)]
mod tests;

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tracing::Instrument;

use crate::config::ServerConfig;
use crate::streaming::{
    Duplex, Frame, FrameSink, FrameSource, StreamError, StreamResult, recv_within, send_within,
};

/// The streaming strategy served on a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    /// Binary messages are written back unchanged.
    PassthroughEcho,
    /// Each binary message is answered with one generated tone chunk.
    SynchronizedReply,
    /// Tone chunks are written on a fixed cadence while inbound messages are drained
    /// concurrently.
    AsynchronousTimed,
    /// Up to a fixed number of messages are read, binary ones answered with silence,
    /// then the session is closed.
    BoundedCapture,
}

impl Variant {
    /// Path to variant table served by the HTTP front end.
    pub const ROUTES: [(&'static str, Variant); 5] = [
        ("/echo", Variant::PassthroughEcho),
        ("/syncecho", Variant::PassthroughEcho),
        ("/syncsin", Variant::SynchronizedReply),
        ("/asyncsin", Variant::AsynchronousTimed),
        ("/record", Variant::BoundedCapture),
    ];

    /// Look up the variant served on `path`.
    pub fn from_path(path: &str) -> Option<Self> {
        Self::ROUTES
            .iter()
            .find(|(route, _)| *route == path)
            .map(|(_, variant)| *variant)
    }

    /// Short name used in logs.
    pub const fn name(self) -> &'static str {
        match self {
            Self::PassthroughEcho => "echo",
            Self::SynchronizedReply => "syncsin",
            Self::AsynchronousTimed => "asyncsin",
            Self::BoundedCapture => "record",
        }
    }

    /// Run this variant on an established stream until it terminates.
    pub async fn run<D: Duplex>(self, duplex: D, config: &ServerConfig) -> SessionOutcome {
        match self {
            Self::PassthroughEcho => echo::run(duplex, config).await,
            Self::SynchronizedReply => sync_reply::run(duplex, config).await,
            Self::AsynchronousTimed => async_timed::run(duplex, config).await,
            Self::BoundedCapture => capture::run(duplex, config).await,
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Lifecycle of one endpoint invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointState {
    /// Waiting for the transport handshake.
    Upgrading,
    /// Handshake done, frames flowing.
    Streaming,
    /// Terminal. The stream and every task bound to it are released.
    Closed,
}

impl EndpointState {
    /// Whether moving from `self` to `next` is allowed.
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Upgrading, Self::Streaming)
                | (Self::Upgrading, Self::Closed)
                | (Self::Streaming, Self::Closed)
        )
    }
}

/// Message and frame counts for one session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    /// Text and binary messages received.
    pub messages_received: u64,
    /// Text messages received.
    pub text_received: u64,
    /// Binary messages received.
    pub binary_received: u64,
    /// Binary frames written successfully.
    pub frames_sent: u64,
}

/// Why a session ended.
#[derive(Debug)]
pub enum SessionEnd {
    /// Receiving failed: peer closed, bad frame or read timeout.
    ReadFailed(StreamError),
    /// Sending failed: peer gone, stream closed or write timeout.
    WriteFailed(StreamError),
    /// The bounded-capture limit was reached. Not an error.
    CaptureLimitReached,
}

impl SessionEnd {
    /// The error behind this ending, if any.
    pub const fn error(&self) -> Option<&StreamError> {
        match self {
            Self::ReadFailed(error) | Self::WriteFailed(error) => Some(error),
            Self::CaptureLimitReached => None,
        }
    }
}

impl fmt::Display for SessionEnd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReadFailed(error) => write!(f, "read: {error}"),
            Self::WriteFailed(error) => write!(f, "write: {error}"),
            Self::CaptureLimitReached => f.write_str("capture limit reached"),
        }
    }
}

/// Result of running a variant to completion.
#[derive(Debug)]
pub struct SessionOutcome {
    /// Termination cause.
    pub end: SessionEnd,
    /// Counts gathered while streaming.
    pub stats: SessionStats,
}

static NEXT_SESSION_ID: AtomicU64 = AtomicU64::new(1);

/// Tracks one endpoint invocation through its states.
#[derive(Debug, Clone)]
pub struct Session {
    id: u64,
    variant: Variant,
    state: EndpointState,
}

impl Session {
    /// A new session in [`EndpointState::Upgrading`] with a process-unique id.
    pub fn new(variant: Variant) -> Self {
        Self {
            id: NEXT_SESSION_ID.fetch_add(1, Ordering::Relaxed),
            variant,
            state: EndpointState::Upgrading,
        }
    }

    /// Process-unique id.
    pub const fn id(&self) -> u64 {
        self.id
    }

    /// Variant served by this session.
    pub const fn variant(&self) -> Variant {
        self.variant
    }

    /// Current state.
    pub const fn state(&self) -> EndpointState {
        self.state
    }

    /// Span that every log line of this session is recorded in.
    pub fn span(&self) -> tracing::Span {
        tracing::info_span!("session", id = self.id, endpoint = self.variant.name())
    }

    fn transition(&mut self, next: EndpointState) {
        debug_assert!(
            self.state.can_transition_to(next),
            "invalid transition {:?} -> {:?}",
            self.state,
            next
        );
        tracing::debug!(from = ?self.state, to = ?next, "session state");
        self.state = next;
    }

    /// The handshake failed; no stream was created.
    pub fn upgrade_failed(mut self, error: &StreamError) -> Self {
        let span = self.span();
        let _entered = span.enter();
        tracing::warn!(%error, "upgrade failed");
        self.transition(EndpointState::Closed);
        self
    }

    /// Stream on `duplex` until the variant terminates, then close.
    pub async fn stream<D: Duplex>(
        mut self,
        duplex: D,
        config: &ServerConfig,
    ) -> (Self, SessionOutcome) {
        let span = self.span();
        async move {
            self.transition(EndpointState::Streaming);
            let outcome = self.variant.run(duplex, config).await;
            self.transition(EndpointState::Closed);

            tracing::info!(
                end = %outcome.end,
                messages_received = outcome.stats.messages_received,
                frames_sent = outcome.stats.frames_sent,
                "session closed"
            );
            (self, outcome)
        }
        .instrument(span)
        .await
    }
}

/// An inbound message that is not a close.
pub(crate) enum Inbound {
    Text(String),
    Binary(Vec<u8>),
}

/// Receive the next message, counting it. Inbound close frames become
/// [`StreamError::PeerClosed`].
pub(crate) async fn receive<S: FrameSource>(
    source: &mut S,
    stats: &mut SessionStats,
    limit: Option<Duration>,
) -> StreamResult<Inbound> {
    let inbound = match recv_within(source, limit).await? {
        Frame::Text(text) => {
            stats.text_received += 1;
            Inbound::Text(text)
        }
        Frame::Binary(data) => {
            stats.binary_received += 1;
            Inbound::Binary(data)
        }
        Frame::Close(signal) => {
            return Err(StreamError::PeerClosed {
                code: Some(signal.code),
            });
        }
    };
    stats.messages_received += 1;
    Ok(inbound)
}

/// Write one binary frame, counting it on success.
pub(crate) async fn reply<S: FrameSink>(
    sink: &mut S,
    payload: Vec<u8>,
    stats: &mut SessionStats,
    limit: Option<Duration>,
) -> StreamResult<()> {
    send_within(sink, Frame::Binary(payload), limit).await?;
    stats.frames_sent += 1;
    Ok(())
}
