// Correctness and logic
#![warn(clippy::unit_cmp)] // Detects comparing unit types
#![warn(clippy::match_same_arms)]
// Duplicate match arms

// Performance-focused
#![warn(clippy::inefficient_to_string)] // `format!("{}", x)` vs `x.to_string()`
#![warn(clippy::map_clone)] // Cloning inside `map()` unnecessarily
#![warn(clippy::unnecessary_to_owned)] // Detects redundant `.to_owned()` or `.clone()`
#![warn(clippy::needless_collect)] // Avoids `.collect().iter()` chains

// Style and idiomatic Rust
#![warn(clippy::redundant_clone)] // Detects unnecessary `.clone()`
#![warn(clippy::needless_return)] // Avoids `return` at the end of functions
#![warn(clippy::let_unit_value)] // Avoids binding `()` to variables
#![warn(clippy::manual_map)] // Use `.map()` instead of manual `match`
#![cfg_attr(not(test), warn(clippy::unwrap_used))] // Avoids using `unwrap()`

// Maintainability
#![warn(clippy::missing_panics_doc)] // Docs for functions that might panic
#![warn(clippy::missing_const_for_fn)] // Suggests making eligible functions `const`
#![deny(missing_docs)] // Documentation is a must for release

//! # audio_ws
//!
//! Full-duplex WebSocket endpoints that stream 16-bit little-endian PCM audio.
//!
//! ## Overview
//!
//! Each path of the server upgrades to a WebSocket and runs one streaming strategy
//! on it until the connection fails:
//!
//! | Path | Behaviour |
//! |---|---|
//! | `/echo`, `/syncecho` | binary messages are written back unchanged |
//! | `/syncsin` | every binary message is answered with the next 20 ms of a 1 kHz tone |
//! | `/asyncsin` | the tone is pushed every 20 ms while inbound messages are drained on their own task |
//! | `/record` | 50 messages are read, binary ones answered with silence, then the stream is closed |
//!
//! Text messages are informational. JSON [`ControlEvent`]s such as
//! `{"Event":"DTMF","Digit":"5"}` are decoded for logging and otherwise ignored.
//!
//! ## Running the server
//!
//! ```rust,no_run
//! use audio_ws::{ServerConfig, serve};
//!
//! # async fn run() -> audio_ws::Result<()> {
//! serve(ServerConfig::with_addr("0.0.0.0:8080")).await
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Failures inside a session are [`StreamError`]s. They end that session only and are
//! logged through `tracing`. The process-level [`AudioWsError`] covers configuration
//! and listener failures:
//!
//! ```rust
//! use audio_ws::{AudioWsError, ServerConfig};
//!
//! let config = ServerConfig {
//!     chunk_len: 0,
//!     ..ServerConfig::default()
//! };
//!
//! match config.validate() {
//!     Err(AudioWsError::InvalidConfig { field, .. }) => assert_eq!(field, "chunk_len"),
//!     other => panic!("unexpected: {other:?}"),
//! }
//! ```
//!
//! ## Driving endpoints without a network
//!
//! Every endpoint is generic over [`streaming::Duplex`], so it can run on the
//! in-memory transport:
//!
//! ```rust
//! use audio_ws::endpoints::Variant;
//! use audio_ws::streaming::{Duplex, Frame, FrameSink, FrameSource, MemoryDuplex};
//! use audio_ws::ServerConfig;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let (server, client) = MemoryDuplex::pair();
//! let session = tokio::spawn(async move {
//!     Variant::PassthroughEcho.run(server, &ServerConfig::default()).await
//! });
//!
//! let (mut tx, mut rx) = client.split();
//! tx.send(Frame::Binary(vec![1, 2, 3, 4])).await.unwrap();
//! assert_eq!(rx.recv().await.unwrap(), Frame::Binary(vec![1, 2, 3, 4]));
//!
//! drop(tx);
//! let outcome = session.await.unwrap();
//! assert_eq!(outcome.stats.frames_sent, 1);
//! # }
//! ```

pub mod config;
pub mod control;
pub mod endpoints;
mod error;
pub mod generation;
pub mod peer;
pub mod server;
pub mod streaming;

pub use crate::config::{DEFAULT_BIND_ADDR, ServerConfig, ToneConfig};
pub use crate::control::ControlEvent;
pub use crate::endpoints::{EndpointState, SessionEnd, SessionOutcome, SessionStats, Variant};
pub use crate::error::{AudioWsError, Result};
pub use crate::generation::{AmplitudeScale, ChunkGenerator, Silence, ToneGenerator};
pub use crate::peer::{LockstepPeer, PeerEnd, PeerEvent, PeerReport};
pub use crate::server::{router, serve};
pub use crate::streaming::{StreamError, StreamResult};
