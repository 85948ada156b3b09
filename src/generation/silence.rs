//! The degenerate generator: zeros.

use super::{BYTES_PER_SAMPLE, ChunkGenerator};

/// Generator that always produces silence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Silence;

impl ChunkGenerator for Silence {
    fn next_chunk(&mut self, len: usize) -> Vec<u8> {
        silence(len)
    }
}

/// `len` samples of silence, i.e. `2 * len` zero bytes.
pub fn silence(len: usize) -> Vec<u8> {
    vec![0; len * BYTES_PER_SAMPLE]
}
