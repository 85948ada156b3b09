//! Client side of a lockstep voice session.
//!
//! A telephony bridge forwards caller audio one frame at a time and waits for the
//! server's answer before sending the next, so the exchange never runs ahead of the
//! server. Keypad digits travel as [`ControlEvent::Dtmf`] text messages.

use futures::{Stream, StreamExt};

use crate::control::ControlEvent;
use crate::streaming::{Duplex, Frame, FrameSink, FrameSource, StreamError, StreamResult};

/// Something the caller side produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeerEvent {
    /// One frame of caller audio.
    Voice(Vec<u8>),
    /// A keypad digit.
    Dtmf(char),
}

/// Why a peer run ended.
#[derive(Debug)]
pub enum PeerEnd {
    /// The event stream ran out.
    Finished,
    /// Writing a voice frame failed.
    WriteFailed(StreamError),
    /// Waiting for a reply failed, including the server closing the stream.
    ReadFailed(StreamError),
}

/// Counts from a finished peer run.
#[derive(Debug)]
pub struct PeerReport {
    /// Voice frames written.
    pub frames_sent: u64,
    /// Binary replies handed to playback.
    pub replies_received: u64,
    /// Termination cause.
    pub end: PeerEnd,
}

/// Drives one session from the caller side.
pub struct LockstepPeer<D, P> {
    duplex: D,
    channel: String,
    playback: P,
}

impl<D, P> LockstepPeer<D, P>
where
    D: Duplex,
    P: FnMut(&[u8]) + Send,
{
    /// Create a peer announcing itself as `channel` and handing binary replies to
    /// `playback`.
    pub fn new(duplex: D, channel: impl Into<String>, playback: P) -> Self {
        Self {
            duplex,
            channel: channel.into(),
            playback,
        }
    }

    /// Send the hello event, then exchange frames until `events` ends or the stream
    /// fails.
    ///
    /// # Errors
    ///
    /// Returns the write error if the hello event cannot be sent. Every later
    /// failure ends the run normally and is reported in [`PeerReport::end`].
    pub async fn run<E>(self, mut events: E) -> StreamResult<PeerReport>
    where
        E: Stream<Item = PeerEvent> + Unpin,
    {
        let Self {
            duplex,
            channel,
            mut playback,
        } = self;
        let (mut sink, mut source) = duplex.split();

        let hello = ControlEvent::hello(channel);
        sink.send(Frame::Text(encode(&hello)?)).await?;

        let mut frames_sent = 0;
        let mut replies_received = 0;
        let end = loop {
            let Some(event) = events.next().await else {
                break PeerEnd::Finished;
            };

            match event {
                PeerEvent::Dtmf(digit) => {
                    let event = ControlEvent::dtmf(digit);
                    let sent = match encode(&event) {
                        Ok(json) => sink.send(Frame::Text(json)).await,
                        Err(error) => Err(error),
                    };
                    if let Err(error) = sent {
                        tracing::warn!(%digit, %error, "dtmf event");
                    }
                }
                PeerEvent::Voice(data) => {
                    if let Err(error) = sink.send(Frame::Binary(data)).await {
                        break PeerEnd::WriteFailed(error);
                    }
                    frames_sent += 1;

                    match source.recv().await {
                        Ok(Frame::Binary(reply)) => {
                            replies_received += 1;
                            playback(&reply);
                        }
                        Ok(Frame::Text(text)) => tracing::debug!(text, "text reply ignored"),
                        Ok(Frame::Close(signal)) => {
                            break PeerEnd::ReadFailed(StreamError::PeerClosed {
                                code: Some(signal.code),
                            });
                        }
                        Err(error) => break PeerEnd::ReadFailed(error),
                    }
                }
            }
        };

        tracing::debug!(frames_sent, replies_received, ?end, "peer finished");
        Ok(PeerReport {
            frames_sent,
            replies_received,
            end,
        })
    }
}

fn encode(event: &ControlEvent) -> StreamResult<String> {
    event.to_json().map_err(StreamError::write)
}
