//! Audio block decoding and spectrum extraction.
//!
//! This module provides:
//! - Raw capture-block decoding (float32/int16) and channel down-mixing
//! - FFT spectrum extraction via RustFFT, grouped into visualization bars
//! - Exponential moving-average smoothing of bar values across frames
//! - Synthetic test signals and a device-free [`BlockSource`] implementation

pub mod capture;
pub mod fft;
pub mod smooth;
pub mod synth;

// Re-export commonly used types
pub use capture::{decode_block, downmix, BlockSource, CaptureError, SampleFormat};
pub use fft::{average_energy, SpectrumAnalyzer};
pub use smooth::BarSmoother;
pub use synth::{generate_sine, generate_white_noise, SynthSource};
