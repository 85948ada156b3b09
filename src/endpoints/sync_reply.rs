//! Synchronized reply: one tone chunk per binary message, in lockstep.

use super::{Inbound, SessionEnd, SessionOutcome, SessionStats, receive, reply};
use crate::config::ServerConfig;
use crate::generation::{ChunkGenerator, ToneGenerator};
use crate::streaming::{Duplex, log_text};

/// Answer every binary message with the next chunk of the configured tone.
///
/// The received payload is ignored; only its arrival matters. The generator belongs
/// to this session alone, so the tone stays phase-continuous across replies. Ends on
/// the first read or write error.
pub async fn run<D: Duplex>(duplex: D, config: &ServerConfig) -> SessionOutcome {
    let (mut sink, mut source) = duplex.split();
    let mut stats = SessionStats::default();
    let mut generator = ToneGenerator::from_config(&config.tone);

    let end = loop {
        match receive(&mut source, &mut stats, config.read_timeout).await {
            Ok(Inbound::Text(text)) => log_text(&text),
            Ok(Inbound::Binary(_)) => {
                let chunk = generator.next_chunk(config.chunk_len);
                if let Err(error) = reply(&mut sink, chunk, &mut stats, config.write_timeout).await {
                    tracing::info!(%error, "write");
                    break SessionEnd::WriteFailed(error);
                }
            }
            Err(error) => {
                tracing::info!(%error, "read");
                break SessionEnd::ReadFailed(error);
            }
        }
    };

    SessionOutcome { end, stats }
}
