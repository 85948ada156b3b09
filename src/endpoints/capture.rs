//! Bounded capture: read a fixed number of messages, then close.

use super::{Inbound, SessionEnd, SessionOutcome, SessionStats, receive, reply};
use crate::config::ServerConfig;
use crate::generation::{ChunkGenerator, Silence};
use crate::streaming::{CloseSignal, Duplex, Frame, log_text, send_within};

/// Read up to `config.capture_limit` messages, answering each binary one with a
/// chunk of silence.
///
/// A failed silence reply is logged and reading continues. A read error ends the
/// session at once. Reaching the limit sends a normal close signal, then waits
/// `config.close_grace` so the peer can see the close before the stream is dropped.
pub async fn run<D: Duplex>(duplex: D, config: &ServerConfig) -> SessionOutcome {
    let (mut sink, mut source) = duplex.split();
    let mut stats = SessionStats::default();
    let mut silence = Silence;

    for _ in 0..config.capture_limit {
        match receive(&mut source, &mut stats, config.read_timeout).await {
            Ok(Inbound::Text(text)) => log_text(&text),
            Ok(Inbound::Binary(_)) => {
                let chunk = silence.next_chunk(config.chunk_len);
                if let Err(error) = reply(&mut sink, chunk, &mut stats, config.write_timeout).await {
                    tracing::warn!(%error, "silence reply");
                }
            }
            Err(error) => {
                tracing::info!(%error, "read");
                return SessionOutcome {
                    end: SessionEnd::ReadFailed(error),
                    stats,
                };
            }
        }
    }

    tracing::info!(messages = stats.messages_received, "record done");
    let close = Frame::Close(CloseSignal::normal());
    if let Err(error) = send_within(&mut sink, close, config.write_timeout).await {
        tracing::warn!(%error, "close signal");
    }
    tokio::time::sleep(config.close_grace).await;

    SessionOutcome {
        end: SessionEnd::CaptureLimitReached,
        stats,
    }
}
