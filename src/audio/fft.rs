//! FFT spectrum extraction using RustFFT.
//!
//! Converts time-domain sample blocks into per-band magnitude bars for the
//! mesh simulation.

use rustfft::{num_complex::Complex, FftPlanner};

/// Spectrum extractor for fixed-size audio blocks.
///
/// Removes DC offset, applies a Hann window, and groups the half-spectrum
/// magnitudes into a configurable number of linearly spaced bars.
pub struct SpectrumAnalyzer {
    planner: FftPlanner<f32>,
    block_size: usize,
    window: Vec<f32>,
}

impl SpectrumAnalyzer {
    /// Create a new analyzer for blocks of `block_size` samples.
    ///
    /// Typical block sizes: 1024, 2048. Any nonzero length is accepted;
    /// RustFFT handles non-power-of-two sizes via mixed-radix plans.
    pub fn new(block_size: usize) -> Self {
        assert!(block_size > 0, "block size must be nonzero");

        // Symmetric Hann window (reduces spectral leakage)
        let window: Vec<f32> = (0..block_size)
            .map(|i| {
                let t = i as f32 / (block_size - 1).max(1) as f32;
                0.5 * (1.0 - (2.0 * std::f32::consts::PI * t).cos())
            })
            .collect();

        Self {
            planner: FftPlanner::new(),
            block_size,
            window,
        }
    }

    /// Block size being analyzed.
    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// Number of magnitude bins in the half spectrum (block size / 2 + 1).
    pub fn num_bins(&self) -> usize {
        self.block_size / 2 + 1
    }

    /// Compute `num_bars` average-magnitude bars from one sample block.
    ///
    /// The magnitude bins are partitioned into `num_bars` contiguous groups
    /// with linearly spaced boundaries; each bar is the arithmetic mean of
    /// its group. Groups can only be empty when `num_bars > num_bins`, in
    /// which case the bar is 0.
    ///
    /// # Panics
    ///
    /// Panics if `samples.len() < block_size` or `num_bars == 0`.
    pub fn bars(&mut self, samples: &[f32], num_bars: usize) -> Vec<f32> {
        assert!(
            samples.len() >= self.block_size,
            "Not enough samples: need {} but got {}",
            self.block_size,
            samples.len()
        );
        assert!(num_bars > 0, "bar count must be nonzero");

        let block = &samples[..self.block_size];

        // Remove DC offset before windowing
        let mean = block.iter().sum::<f32>() / self.block_size as f32;

        let mut buffer: Vec<Complex<f32>> = block
            .iter()
            .zip(&self.window)
            .map(|(s, w)| Complex::new((s - mean) * w, 0.0))
            .collect();

        let fft = self.planner.plan_fft_forward(self.block_size);
        fft.process(&mut buffer);

        // Half spectrum: bins 0..=block_size/2
        let magnitudes: Vec<f32> = buffer[..self.num_bins()].iter().map(|c| c.norm()).collect();

        group_bars(&magnitudes, num_bars)
    }
}

/// Partition magnitude bins into `num_bars` linearly spaced groups and
/// average each group.
fn group_bars(magnitudes: &[f32], num_bars: usize) -> Vec<f32> {
    let num_bins = magnitudes.len();
    let boundary = |i: usize| ((i * num_bins) as f32 / num_bars as f32).round() as usize;

    (0..num_bars)
        .map(|i| {
            let lo = boundary(i);
            let hi = boundary(i + 1);
            if hi > lo {
                magnitudes[lo..hi].iter().sum::<f32>() / (hi - lo) as f32
            } else {
                0.0
            }
        })
        .collect()
}

/// Mean absolute bar magnitude, used to drive the hotspot population.
pub fn average_energy(bars: &[f32]) -> f32 {
    if bars.is_empty() {
        return 0.0;
    }
    bars.iter().map(|b| b.abs()).sum::<f32>() / bars.len() as f32
}
