//! Phase-continuous single tone generator.

use std::f64::consts::TAU;

use super::{BYTES_PER_SAMPLE, ChunkGenerator};
use crate::config::ToneConfig;

/// Peak amplitude expressed as a fraction of the full 16-bit range (2^16).
///
/// The encoder does not clamp. Any fraction above one half puts the peak past
/// `i16::MAX`, and those samples wrap around silently. See [`AmplitudeScale::wraps`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmplitudeScale(f64);

impl AmplitudeScale {
    /// The span the fraction is taken of.
    pub const FULL_RANGE: f64 = 65536.0;

    /// One eighth of the range, a peak of 8192.
    pub const EIGHTH: Self = Self(0.125);

    /// One quarter of the range, a peak of 16384.
    pub const QUARTER: Self = Self(0.25);

    /// Scale from a fraction of [`Self::FULL_RANGE`].
    pub const fn new(fraction: f64) -> Self {
        Self(fraction)
    }

    /// The fraction this scale was built from.
    pub const fn fraction(self) -> f64 {
        self.0
    }

    /// Factor the unit sine is multiplied by.
    pub fn multiplier(self) -> f64 {
        Self::FULL_RANGE * self.0
    }

    /// Whether the peak exceeds `i16::MAX`, in which case samples near the crest wrap.
    pub fn wraps(self) -> bool {
        self.multiplier() > i16::MAX as f64
    }
}

impl Default for AmplitudeScale {
    fn default() -> Self {
        Self::EIGHTH
    }
}

/// Sine generator whose sample index survives across calls.
///
/// Sample `i` is `sin(TAU / (sample_rate / frequency) * i) * multiplier`, truncated
/// toward zero and wrapped into `i16`. Because the value depends only on the absolute
/// index, splitting a run of samples into chunks of any size yields identical bytes.
#[derive(Debug, Clone)]
pub struct ToneGenerator {
    sample_rate: f64,
    frequency: f64,
    amplitude: AmplitudeScale,
    cursor: u64,
}

impl ToneGenerator {
    /// Create a generator positioned at sample 0.
    pub const fn new(sample_rate: f64, frequency: f64, amplitude: AmplitudeScale) -> Self {
        Self {
            sample_rate,
            frequency,
            amplitude,
            cursor: 0,
        }
    }

    /// Create a generator from tone settings.
    pub const fn from_config(config: &ToneConfig) -> Self {
        Self::new(config.sample_rate, config.frequency, config.amplitude)
    }

    /// Index of the next sample to be emitted.
    pub const fn cursor(&self) -> u64 {
        self.cursor
    }

    /// Amplitude this generator was built with.
    pub const fn amplitude(&self) -> AmplitudeScale {
        self.amplitude
    }

    /// Radians advanced per sample.
    fn phase_step(&self) -> f64 {
        TAU / (self.sample_rate / self.frequency)
    }

    /// Scaled sine value at `index` before integer conversion.
    pub fn raw_sample(&self, index: u64) -> f64 {
        (self.phase_step() * index as f64).sin() * self.amplitude.multiplier()
    }

    /// Encoded sample value at `index`. Does not move the cursor.
    pub fn sample_at(&self, index: u64) -> i16 {
        // Truncate toward zero, then keep the low 16 bits.
        self.raw_sample(index) as i64 as i16
    }
}

impl ChunkGenerator for ToneGenerator {
    fn next_chunk(&mut self, len: usize) -> Vec<u8> {
        let start = self.cursor;
        let end = start + len as u64;

        let mut buf = Vec::with_capacity(len * BYTES_PER_SAMPLE);
        for index in start..end {
            buf.extend_from_slice(&self.sample_at(index).to_le_bytes());
        }

        self.cursor = end;
        buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::decode_samples;
    use approx_eq::assert_approx_eq;

    fn telephony() -> ToneGenerator {
        ToneGenerator::new(8000.0, 1000.0, AmplitudeScale::EIGHTH)
    }

    #[test]
    fn test_first_chunk_matches_truncated_sine() {
        let mut generator = telephony();
        let chunk = generator.next_chunk(160);
        assert_eq!(chunk.len(), 320);

        let samples = decode_samples(&chunk);
        for (k, &sample) in samples.iter().enumerate() {
            let expected = ((std::f64::consts::TAU / 8.0 * k as f64).sin() * 8192.0) as i64 as i16;
            assert_eq!(sample, expected, "sample {k}");
        }

        // One period is eight samples at 1 kHz / 8 kHz.
        assert_eq!(
            &samples[..8],
            &[0, 5792, 8192, 5792, 0, -5792, -8192, -5792]
        );
        assert_eq!(generator.cursor(), 160);
    }

    #[test]
    fn test_phase_continuity_across_call_patterns() {
        let mut whole = telephony();
        let mut single_steps = telephony();
        let mut uneven = telephony();

        let expected = whole.next_chunk(503);

        let mut stepped = Vec::new();
        for _ in 0..503 {
            stepped.extend(single_steps.next_chunk(1));
        }
        assert_eq!(stepped, expected);

        let mut pieces = Vec::new();
        for len in [160, 0, 3, 97, 1, 242] {
            pieces.extend(uneven.next_chunk(len));
        }
        assert_eq!(pieces, expected);
        assert_eq!(uneven.cursor(), 503);
    }

    #[test]
    fn test_chunk_length_invariant() {
        let mut generator = telephony();
        for len in [0, 1, 2, 159, 160, 161, 8000] {
            assert_eq!(generator.next_chunk(len).len(), 2 * len);
        }
    }

    #[test]
    fn test_zero_length_does_not_advance() {
        let mut generator = telephony();
        generator.next_chunk(10);
        assert!(generator.next_chunk(0).is_empty());
        assert_eq!(generator.cursor(), 10);
    }

    #[test]
    fn test_fresh_generator_starts_at_zero() {
        let mut used = telephony();
        used.next_chunk(1000);

        let mut fresh = telephony();
        assert_eq!(fresh.cursor(), 0);
        assert_eq!(fresh.next_chunk(8), telephony().next_chunk(8));
    }

    #[test]
    fn test_amplitude_ratio() {
        let eighth = ToneGenerator::new(8000.0, 440.0, AmplitudeScale::EIGHTH);
        let quarter = ToneGenerator::new(8000.0, 440.0, AmplitudeScale::QUARTER);

        for index in 0..400 {
            let low = eighth.raw_sample(index);
            let high = quarter.raw_sample(index);
            if low.abs() > 1.0 {
                assert_approx_eq!(high / low, 2.0, 1e-9);
            }

            let low = eighth.sample_at(index) as f64;
            let high = quarter.sample_at(index) as f64;
            if low.abs() > 1000.0 {
                assert_approx_eq!(high / low, 2.0, 5e-3);
            }
        }
    }

    #[test]
    fn test_full_range_wraps_instead_of_clamping() {
        let scale = AmplitudeScale::new(1.0);
        assert!(scale.wraps());
        assert!(!AmplitudeScale::QUARTER.wraps());
        assert!(!AmplitudeScale::EIGHTH.wraps());

        let generator = ToneGenerator::new(8000.0, 1000.0, scale);
        // Peak is exactly 65536, whose low 16 bits are zero.
        assert_eq!(generator.sample_at(2), 0);
        // 0.7071 * 65536 = 46340.95 -> 46340 - 65536
        assert_eq!(generator.sample_at(1), (46340i64 - 65536) as i16);
    }

    #[test]
    fn test_from_config() {
        let generator = ToneGenerator::from_config(&ToneConfig::telephony_loud());
        assert_eq!(generator.amplitude(), AmplitudeScale::QUARTER);
        assert_eq!(generator.sample_at(2), 16384);
    }

    #[test]
    fn test_zero_frequency_is_silent() {
        let mut generator = ToneGenerator::new(8000.0, 0.0, AmplitudeScale::EIGHTH);
        assert!(generator.next_chunk(32).iter().all(|&b| b == 0));
    }
}
