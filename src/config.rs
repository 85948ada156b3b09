//! Runtime configuration for the server and its endpoints.

use std::time::Duration;

use crate::error::{AudioWsError, Result};
use crate::generation::AmplitudeScale;

/// Default listen address.
pub const DEFAULT_BIND_ADDR: &str = "localhost:8080";

/// Parameters of the synthetic tone streamed by the generator-backed endpoints.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneConfig {
    /// Samples per second.
    pub sample_rate: f64,
    /// Tone frequency in Hz.
    pub frequency: f64,
    /// Peak amplitude as a fraction of the full 16-bit range.
    pub amplitude: AmplitudeScale,
}

impl Default for ToneConfig {
    fn default() -> Self {
        Self::telephony()
    }
}

impl ToneConfig {
    /// 1 kHz test tone at 8 kHz, 1/8 of full scale.
    pub const fn telephony() -> Self {
        Self {
            sample_rate: 8000.0,
            frequency: 1000.0,
            amplitude: AmplitudeScale::EIGHTH,
        }
    }

    /// Same tone at 1/4 of full scale.
    pub const fn telephony_loud() -> Self {
        Self {
            amplitude: AmplitudeScale::QUARTER,
            ..Self::telephony()
        }
    }

    /// Check the tone parameters.
    pub fn validate(&self) -> Result<()> {
        if !(self.sample_rate.is_finite() && self.sample_rate > 0.0) {
            return Err(AudioWsError::invalid_config(
                "sample_rate",
                format!("must be a positive number, got {}", self.sample_rate),
            ));
        }
        if !(self.frequency.is_finite() && self.frequency >= 0.0) {
            return Err(AudioWsError::invalid_config(
                "frequency",
                format!("must be a non-negative number, got {}", self.frequency),
            ));
        }
        if !(self.amplitude.fraction().is_finite() && self.amplitude.fraction() >= 0.0) {
            return Err(AudioWsError::invalid_config(
                "amplitude",
                format!(
                    "must be a non-negative fraction, got {}",
                    self.amplitude.fraction()
                ),
            ));
        }
        Ok(())
    }
}

/// Configuration shared by every session the server accepts.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    /// Address the listener binds to (host:port).
    pub bind_addr: String,
    /// Tone emitted by the synchronized-reply and asynchronous-timed endpoints.
    pub tone: ToneConfig,
    /// Samples per outbound frame.
    pub chunk_len: usize,
    /// Interval between frames of the asynchronous-timed endpoint.
    pub cadence: Duration,
    /// Number of messages the bounded-capture endpoint reads before closing.
    pub capture_limit: usize,
    /// Pause after the bounded-capture close signal before the stream is released.
    pub close_grace: Duration,
    /// Upper bound on a single receive. `None` waits forever.
    pub read_timeout: Option<Duration>,
    /// Upper bound on a single send. `None` waits forever.
    pub write_timeout: Option<Duration>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            tone: ToneConfig::default(),
            chunk_len: 160,
            cadence: Duration::from_millis(20),
            capture_limit: 50,
            close_grace: Duration::from_secs(1),
            read_timeout: None,
            write_timeout: None,
        }
    }
}

impl ServerConfig {
    /// Default configuration listening on `addr`.
    pub fn with_addr(addr: impl Into<String>) -> Self {
        Self {
            bind_addr: addr.into(),
            ..Default::default()
        }
    }

    /// Replace the tone parameters.
    pub fn with_tone(mut self, tone: ToneConfig) -> Self {
        self.tone = tone;
        self
    }

    /// Replace the frame cadence.
    pub fn with_cadence(mut self, cadence: Duration) -> Self {
        self.cadence = cadence;
        self
    }

    /// Bound every receive and send. Slow peers then end their session instead of
    /// blocking it.
    pub fn with_timeouts(mut self, read: Option<Duration>, write: Option<Duration>) -> Self {
        self.read_timeout = read;
        self.write_timeout = write;
        self
    }

    /// Duration of audio carried by one frame.
    pub fn frame_duration(&self) -> Duration {
        Duration::from_secs_f64(self.chunk_len as f64 / self.tone.sample_rate)
    }

    /// Check every field, returning the first invalid one.
    pub fn validate(&self) -> Result<()> {
        self.tone.validate()?;
        if self.bind_addr.trim().is_empty() {
            return Err(AudioWsError::invalid_config("bind_addr", "must not be empty"));
        }
        if self.chunk_len == 0 {
            return Err(AudioWsError::invalid_config("chunk_len", "must be non-zero"));
        }
        if self.cadence.is_zero() {
            return Err(AudioWsError::invalid_config("cadence", "must be non-zero"));
        }
        if self.capture_limit == 0 {
            return Err(AudioWsError::invalid_config(
                "capture_limit",
                "must be non-zero",
            ));
        }
        if let Some(timeout) = self.read_timeout.filter(|t| t.is_zero()) {
            return Err(AudioWsError::invalid_config(
                "read_timeout",
                format!("must be non-zero, got {timeout:?}"),
            ));
        }
        if let Some(timeout) = self.write_timeout.filter(|t| t.is_zero()) {
            return Err(AudioWsError::invalid_config(
                "write_timeout",
                format!("must be non-zero, got {timeout:?}"),
            ));
        }
        Ok(())
    }
}
