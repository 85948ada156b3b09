//! Tests for the endpoint variants, driven through the in-memory transport.

use super::*;
use crate::streaming::{Duplex, Frame, FrameSink, FrameSource, MemoryDuplex, StreamError};

mod capture_tests;
mod session_tests;

/// Collect frames from `source` until the first error.
pub(crate) async fn read_until_error<S: FrameSource>(source: &mut S) -> (Vec<Frame>, StreamError) {
    let mut frames = Vec::new();
    loop {
        match source.recv().await {
            Ok(frame) => frames.push(frame),
            Err(error) => return (frames, error),
        }
    }
}

/// Run `variant` on one end of a fresh pair and hand back the other end's halves.
pub(crate) fn start(
    variant: Variant,
    config: ServerConfig,
) -> (
    tokio::task::JoinHandle<SessionOutcome>,
    <MemoryDuplex as Duplex>::Sink,
    <MemoryDuplex as Duplex>::Source,
    crate::streaming::WriteProbe,
) {
    let (server, client) = MemoryDuplex::pair();
    let probe = server.probe();
    let task = tokio::spawn(async move { variant.run(server, &config).await });
    let (client_sink, client_source) = client.split();
    (task, client_sink, client_source, probe)
}

/// Unwrap a binary frame.
pub(crate) fn binary(frame: Frame) -> Vec<u8> {
    match frame {
        Frame::Binary(data) => data,
        other => panic!("expected binary frame, got {other:?}"),
    }
}
