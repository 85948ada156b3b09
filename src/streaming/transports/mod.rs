//! [`Duplex`](super::Duplex) implementations.

pub mod memory;
pub mod websocket;

pub use memory::{MemoryDuplex, MemorySink, MemorySource, WriteProbe};
pub use websocket::{WebSocketSink, WebSocketSource};
