//! Synthetic audio generation for testing.
//!
//! Generates test signals and provides [`SynthSource`], a device-free
//! [`BlockSource`] implementation used by tests and the demo.

use std::f32::consts::PI;

use super::capture::{BlockSource, CaptureError, SampleFormat};

/// Generate a sine wave.
///
/// # Arguments
/// * `frequency` - Frequency in Hz
/// * `sample_rate` - Sample rate in Hz
/// * `duration` - Duration in seconds
/// * `amplitude` - Amplitude (0.0 to 1.0)
pub fn generate_sine(frequency: f32, sample_rate: u32, duration: f32, amplitude: f32) -> Vec<f32> {
    let num_samples = (duration * sample_rate as f32) as usize;
    (0..num_samples)
        .map(|i| {
            let t = i as f32 / sample_rate as f32;
            amplitude * (2.0 * PI * frequency * t).sin()
        })
        .collect()
}

/// Generate white noise.
///
/// Uses a simple linear congruential generator for reproducibility.
pub fn generate_white_noise(
    sample_rate: u32,
    duration: f32,
    amplitude: f32,
    seed: u64,
) -> Vec<f32> {
    let num_samples = (duration * sample_rate as f32) as usize;

    // Simple LCG for reproducible "random" noise
    let mut state = seed;
    let a: u64 = 6364136223846793005;
    let c: u64 = 1442695040888963407;

    (0..num_samples)
        .map(|_| {
            state = state.wrapping_mul(a).wrapping_add(c);
            let normalized = (state as f32 / u64::MAX as f32) * 2.0 - 1.0;
            amplitude * normalized
        })
        .collect()
}

/// A [`BlockSource`] backed by a mono sample buffer.
///
/// Re-interleaves the samples into the requested channel count and sample
/// format so the full decode → down-mix path is exercised without a device.
/// Reading past the end of the buffer returns [`CaptureError::EndOfStream`].
pub struct SynthSource {
    samples: Vec<f32>,
    position: usize,
    channels: usize,
    format: SampleFormat,
}

impl SynthSource {
    /// Wrap a mono sample buffer as a float32 source.
    pub fn new(samples: Vec<f32>, channels: usize) -> Self {
        Self::with_format(samples, channels, SampleFormat::Float32)
    }

    /// Wrap a mono sample buffer with an explicit output format.
    pub fn with_format(samples: Vec<f32>, channels: usize, format: SampleFormat) -> Self {
        assert!(channels > 0, "channel count must be nonzero");
        Self {
            samples,
            position: 0,
            channels,
            format,
        }
    }

    /// Frames remaining before the source is exhausted.
    pub fn remaining_frames(&self) -> usize {
        self.samples.len() - self.position
    }
}

impl BlockSource for SynthSource {
    fn channels(&self) -> usize {
        self.channels
    }

    fn sample_format(&self) -> SampleFormat {
        self.format
    }

    fn read_block(&mut self, num_frames: usize) -> Result<Vec<u8>, CaptureError> {
        if self.remaining_frames() < num_frames {
            return Err(CaptureError::EndOfStream);
        }

        let frames = &self.samples[self.position..self.position + num_frames];
        self.position += num_frames;

        let mut bytes = Vec::with_capacity(num_frames * self.channels * self.format.sample_bytes());
        for &sample in frames {
            for _ in 0..self.channels {
                match self.format {
                    SampleFormat::Float32 => bytes.extend_from_slice(&sample.to_le_bytes()),
                    SampleFormat::Int16 => {
                        let quantized = (sample.clamp(-1.0, 1.0) * 32767.0) as i16;
                        bytes.extend_from_slice(&quantized.to_le_bytes());
                    }
                }
            }
        }
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::capture::{decode_block, downmix};

    #[test]
    fn test_generate_sine() {
        let samples = generate_sine(440.0, 44100, 1.0, 0.5);
        assert_eq!(samples.len(), 44100);

        // Check amplitude
        let max = samples.iter().cloned().fold(0.0f32, f32::max);
        assert!((max - 0.5).abs() < 0.01);
    }

    #[test]
    fn test_generate_white_noise() {
        let samples = generate_white_noise(44100, 1.0, 1.0, 12345);
        assert_eq!(samples.len(), 44100);

        // Should have both positive and negative values
        let has_positive = samples.iter().any(|&s| s > 0.0);
        let has_negative = samples.iter().any(|&s| s < 0.0);
        assert!(has_positive && has_negative);
    }

    #[test]
    fn test_synth_source_round_trip() {
        let samples = vec![0.0, 0.25, -0.5, 1.0];
        let mut source = SynthSource::new(samples.clone(), 2);

        let bytes = source.read_block(4).unwrap();
        let decoded = decode_block(&bytes, source.sample_format()).unwrap();
        let mono = downmix(&decoded, source.channels());

        assert_eq!(mono, samples);
        assert!(matches!(
            source.read_block(1),
            Err(CaptureError::EndOfStream)
        ));
    }

    #[test]
    fn test_synth_source_int16() {
        let samples = vec![0.5f32; 8];
        let mut source = SynthSource::with_format(samples, 1, SampleFormat::Int16);

        let bytes = source.read_block(8).unwrap();
        let decoded = decode_block(&bytes, SampleFormat::Int16).unwrap();
        for s in decoded {
            assert!((s - 0.5).abs() < 1e-3);
        }
    }
}
