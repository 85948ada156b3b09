//! Fixed-cadence frame emission.
//!
//! A [`FramePump`] owns its generator outright. Each tick it produces one chunk and
//! writes it as a binary frame; the first failed write ends the loop. Nothing checks
//! for overruns: generation plus write must finish well inside one cadence period,
//! otherwise ticks are skipped and delivery stops being isochronous.

use std::time::Duration;

use tokio::time::{Instant, MissedTickBehavior, interval_at};

use super::{
    error::StreamError,
    traits::{Frame, FrameSink, send_within},
};
use crate::generation::ChunkGenerator;

/// Why and when a pump stopped.
#[derive(Debug)]
pub struct PumpStopped {
    /// Frames written before the failure.
    pub frames_sent: u64,
    /// The write failure that ended the loop.
    pub error: StreamError,
}

/// Writes generator output to a sink on a fixed cadence.
#[derive(Debug)]
pub struct FramePump<G> {
    generator: G,
    chunk_len: usize,
    cadence: Duration,
    write_timeout: Option<Duration>,
}

impl<G: ChunkGenerator> FramePump<G> {
    /// Create a pump emitting `chunk_len` samples every `cadence`.
    ///
    /// # Panics
    ///
    /// [`FramePump::run`] panics if `cadence` is zero.
    pub const fn new(generator: G, chunk_len: usize, cadence: Duration) -> Self {
        Self {
            generator,
            chunk_len,
            cadence,
            write_timeout: None,
        }
    }

    /// Fail a write that takes longer than `timeout`.
    pub fn with_write_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.write_timeout = timeout;
        self
    }

    /// Access the generator, e.g. to inspect its position.
    pub const fn generator(&self) -> &G {
        &self.generator
    }

    /// Run until a write fails.
    ///
    /// The first frame goes out one full period after the call. The ticker lives in
    /// this function's scope and is released on return.
    pub async fn run<S: FrameSink>(&mut self, sink: &mut S) -> PumpStopped {
        let mut ticker = interval_at(Instant::now() + self.cadence, self.cadence);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        let mut frames_sent = 0;
        loop {
            ticker.tick().await;

            let chunk = self.generator.next_chunk(self.chunk_len);
            if let Err(error) = send_within(sink, Frame::Binary(chunk), self.write_timeout).await {
                tracing::debug!(frames_sent, %error, "frame pump stopped");
                return PumpStopped { frames_sent, error };
            }
            frames_sent += 1;
        }
    }
}
