//! Passthrough echo: binary messages come straight back.

use super::{Inbound, SessionEnd, SessionOutcome, SessionStats, receive, reply};
use crate::config::ServerConfig;
use crate::streaming::{Duplex, log_text};

/// Echo every binary payload unchanged on the task that read it.
///
/// Ends on the first read or write error.
pub async fn run<D: Duplex>(duplex: D, config: &ServerConfig) -> SessionOutcome {
    let (mut sink, mut source) = duplex.split();
    let mut stats = SessionStats::default();

    let end = loop {
        match receive(&mut source, &mut stats, config.read_timeout).await {
            Ok(Inbound::Text(text)) => log_text(&text),
            Ok(Inbound::Binary(payload)) => {
                if let Err(error) = reply(&mut sink, payload, &mut stats, config.write_timeout).await
                {
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
