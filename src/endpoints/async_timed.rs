//! Asynchronous timed streaming: a cadence-driven writer beside an independent reader.

use super::{SessionEnd, SessionOutcome, SessionStats};
use crate::config::ServerConfig;
use crate::generation::ToneGenerator;
use crate::streaming::{Duplex, FramePump, InboundDrain};

/// Stream the configured tone every `config.cadence` while a separate task drains
/// whatever the peer sends.
///
/// Failure handling is asymmetric. The drain ending (peer stopped sending, bad
/// frame, read timeout) is logged and the writer keeps going; only a failed write
/// ends the session. When the session ends the drain task is aborted if it is still
/// running, and its counts are only reported if it had already finished.
pub async fn run<D: Duplex>(duplex: D, config: &ServerConfig) -> SessionOutcome {
    let (mut sink, source) = duplex.split();

    let drain = InboundDrain::new(source)
        .with_read_timeout(config.read_timeout)
        .spawn();

    let mut pump = FramePump::new(
        ToneGenerator::from_config(&config.tone),
        config.chunk_len,
        config.cadence,
    )
    .with_write_timeout(config.write_timeout);
    let stopped = pump.run(&mut sink).await;
    tracing::info!(error = %stopped.error, frames_sent = stopped.frames_sent, "write");

    let mut stats = SessionStats {
        frames_sent: stopped.frames_sent,
        ..SessionStats::default()
    };
    if let Some(report) = drain.stop().await {
        tracing::info!(error = %report.error, "reader had already ended");
        stats.text_received = report.text_received;
        stats.binary_received = report.binary_received;
        stats.messages_received = report.text_received + report.binary_received;
    }

    SessionOutcome {
        end: SessionEnd::WriteFailed(stopped.error),
        stats,
    }
}
