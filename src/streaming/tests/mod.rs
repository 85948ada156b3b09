//! Tests for streaming functionality.
//!
//! These run against the in-memory transport. Timing tests use a paused clock, so a
//! 20 ms cadence is observed exactly.

use super::{Duplex, Frame, FrameSource, MemoryDuplex, StreamError};

mod error_tests;

/// Read frames from `source` until it reports an error, returning both.
pub(crate) async fn read_until_error<S: FrameSource>(source: &mut S) -> (Vec<Frame>, StreamError) {
    let mut frames = Vec::new();
    loop {
        match source.recv().await {
            Ok(frame) => frames.push(frame),
            Err(error) => return (frames, error),
        }
    }
}

/// A connected pair where the test keeps both halves of the peer end.
pub(crate) fn peer_pair(
    capacity: usize,
) -> (
    MemoryDuplex,
    <MemoryDuplex as Duplex>::Sink,
    <MemoryDuplex as Duplex>::Source,
) {
    let (local, peer) = MemoryDuplex::pair_with_capacity(capacity);
    let (peer_sink, peer_source) = peer.split();
    (local, peer_sink, peer_source)
}
