//! audiows - WebSocket audio streaming server
//!
//! Serves the echo, tone and capture endpoints on one listener.

use std::time::Duration;

use anyhow::Result;
use audio_ws::{AmplitudeScale, DEFAULT_BIND_ADDR, ServerConfig, ToneConfig, serve};
use clap::Parser;

#[derive(Parser)]
#[command(name = "audiows")]
#[command(about = "WebSocket audio streaming server")]
#[command(version)]
struct Cli {
    /// HTTP service address
    #[arg(long, default_value = DEFAULT_BIND_ADDR)]
    addr: String,

    /// Tone frequency in Hz
    #[arg(long, default_value_t = 1000.0)]
    frequency: f64,

    /// Tone amplitude as a fraction of the full 16-bit range
    #[arg(long, default_value_t = 0.125)]
    amplitude: f64,

    /// Interval between pushed frames, in milliseconds
    #[arg(long, default_value_t = 20)]
    cadence_ms: u64,

    /// Fail a read after this many milliseconds of peer silence
    #[arg(long)]
    read_timeout_ms: Option<u64>,

    /// Fail a write that takes longer than this many milliseconds
    #[arg(long)]
    write_timeout_ms: Option<u64>,
}

impl Cli {
    fn into_config(self) -> ServerConfig {
        let tone = ToneConfig {
            frequency: self.frequency,
            amplitude: AmplitudeScale::new(self.amplitude),
            ..ToneConfig::telephony()
        };
        ServerConfig::with_addr(self.addr)
            .with_tone(tone)
            .with_cadence(Duration::from_millis(self.cadence_ms))
            .with_timeouts(
                self.read_timeout_ms.map(Duration::from_millis),
                self.write_timeout_ms.map(Duration::from_millis),
            )
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = Cli::parse().into_config();
    if config.tone.amplitude.wraps() {
        tracing::warn!(
            amplitude = config.tone.amplitude.fraction(),
            "tone amplitude exceeds the 16-bit range and will wrap"
        );
    }

    serve(config).await?;
    Ok(())
}
