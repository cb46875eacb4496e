//! Raw capture-block decoding and down-mixing.
//!
//! Opening and reading the capture device belongs to the host application;
//! this module owns everything after a raw interleaved block arrives:
//! sample-format decoding, int16 normalization, and channel down-mixing.

use thiserror::Error;

/// Errors that can occur at the capture boundary.
#[derive(Error, Debug)]
pub enum CaptureError {
    #[error("Capture stream ended")]
    EndOfStream,

    #[error("Truncated block: {len} bytes is not a whole number of {format:?} frames")]
    TruncatedBlock { len: usize, format: SampleFormat },

    #[error("No capture device available")]
    NoDevice,
}

/// Sample format of a raw capture block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleFormat {
    /// 32-bit little-endian IEEE float, already in -1.0..1.0.
    Float32,
    /// 16-bit little-endian signed integer.
    Int16,
}

impl SampleFormat {
    /// Size of one sample in bytes.
    pub fn sample_bytes(&self) -> usize {
        match self {
            SampleFormat::Float32 => 4,
            SampleFormat::Int16 => 2,
        }
    }
}

/// Blocking source of raw interleaved audio blocks.
///
/// Implemented by the host's device wrapper (loopback or input capture) and
/// by [`super::synth::SynthSource`] for device-free operation. `read_block`
/// must block until `num_frames` frames are available and return them as one
/// contiguous interleaved byte block.
pub trait BlockSource {
    /// Number of interleaved channels per frame.
    fn channels(&self) -> usize;

    /// Sample format of the returned bytes.
    fn sample_format(&self) -> SampleFormat;

    /// Read exactly `num_frames` frames, blocking until available.
    fn read_block(&mut self, num_frames: usize) -> Result<Vec<u8>, CaptureError>;
}

/// Decode a raw interleaved block into f32 samples.
///
/// Int16 samples are normalized by 1/32768 into the -1.0..1.0 range.
pub fn decode_block(bytes: &[u8], format: SampleFormat) -> Result<Vec<f32>, CaptureError> {
    let stride = format.sample_bytes();
    if bytes.len() % stride != 0 {
        return Err(CaptureError::TruncatedBlock {
            len: bytes.len(),
            format,
        });
    }

    let samples = match format {
        SampleFormat::Float32 => bytes
            .chunks_exact(4)
            .map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
            .collect(),
        SampleFormat::Int16 => bytes
            .chunks_exact(2)
            .map(|b| i16::from_le_bytes([b[0], b[1]]) as f32 / 32768.0)
            .collect(),
    };

    Ok(samples)
}

/// Down-mix interleaved samples to mono by averaging channels.
///
/// A channel count of 0 or 1 returns the input unchanged. A trailing
/// incomplete frame is dropped.
pub fn downmix(samples: &[f32], channels: usize) -> Vec<f32> {
    if channels <= 1 {
        return samples.to_vec();
    }

    samples
        .chunks_exact(channels)
        .map(|frame| frame.iter().sum::<f32>() / channels as f32)
        .collect()
}
