//! Chunked 16-bit PCM sample generation.
//!
//! Generators hand out one frame's worth of little-endian `i16` samples per call.
//! Two implementations exist:
//!
//! - [`ToneGenerator`]: a single sine tone whose phase carries over from one chunk to
//!   the next, so consecutive chunks join without a discontinuity.
//! - [`Silence`]: zeros, with no state at all.

pub mod silence;
pub mod tone;

pub use silence::{Silence, silence};
pub use tone::{AmplitudeScale, ToneGenerator};

/// Size of one encoded sample in bytes.
pub const BYTES_PER_SAMPLE: usize = 2;

/// Produces successive chunks of encoded PCM samples.
pub trait ChunkGenerator: Send {
    /// Return the next `len` samples as `len * BYTES_PER_SAMPLE` bytes.
    ///
    /// Every call returns a newly allocated buffer; `len == 0` yields an empty one.
    fn next_chunk(&mut self, len: usize) -> Vec<u8>;
}

impl<G: ChunkGenerator + ?Sized> ChunkGenerator for Box<G> {
    fn next_chunk(&mut self, len: usize) -> Vec<u8> {
        (**self).next_chunk(len)
    }
}

/// Decode a little-endian sample buffer back into `i16` values.
///
/// A trailing odd byte is ignored.
pub fn decode_samples(bytes: &[u8]) -> Vec<i16> {
    bytes
        .chunks_exact(BYTES_PER_SAMPLE)
        .map(|pair| i16::from_le_bytes([pair[0], pair[1]]))
        .collect()
}
