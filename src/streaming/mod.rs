//! Duplex message streams and the two halves of a live audio session.
//!
//! This module provides:
//! - A transport-neutral [`Frame`] and the [`FrameSource`] / [`FrameSink`] / [`Duplex`]
//!   traits every transport implements
//! - [`FramePump`], which writes generated audio on a fixed cadence
//! - [`InboundDrain`], which consumes peer messages on its own task
//! - WebSocket and in-memory transports
//!
//! # Example
//!
//! ```rust,ignore
//! use audio_ws::generation::ToneGenerator;
//! use audio_ws::streaming::*;
//!
//! async fn stream_tone<D: Duplex>(duplex: D) -> PumpStopped {
//!     let (mut sink, source) = duplex.split();
//!     let _drain = InboundDrain::new(source).spawn();
//!
//!     let tone = ToneGenerator::new(8000.0, 1000.0, AmplitudeScale::EIGHTH);
//!     FramePump::new(tone, 160, Duration::from_millis(20))
//!         .run(&mut sink)
//!         .await
//! }
//! ```

pub mod drain;
pub mod error;
pub mod pump;
pub mod traits;
pub mod transports;

#[cfg(test)]
mod tests;

pub use drain::{DrainHandle, DrainReport, InboundDrain, log_text};
pub use error::{Direction, StreamError, StreamResult};
pub use pump::{FramePump, PumpStopped};
pub use traits::{
    CLOSE_NORMAL, CloseSignal, Duplex, Frame, FrameSink, FrameSource, recv_within, send_within,
};
pub use transports::{MemoryDuplex, WriteProbe};
