//! Exponential moving-average smoothing for bar values.

/// Smooths successive bar frames with an exponential moving average.
///
/// Output for frame `t` is `interp * new + (1 - interp) * previous`. An
/// `interp` of 1.0 disables smoothing entirely.
pub struct BarSmoother {
    interp: f32,
    last: Vec<f32>,
}

impl BarSmoother {
    /// Create a smoother with the given interpolation factor.
    ///
    /// # Panics
    ///
    /// Panics unless `interp` is in (0, 1].
    pub fn new(interp: f32) -> Self {
        assert!(
            interp > 0.0 && interp <= 1.0,
            "interp must be in (0, 1], got {}",
            interp
        );
        Self {
            interp,
            last: Vec::new(),
        }
    }

    /// Blend `bars` against the retained previous frame, returning the
    /// smoothed values and keeping them as the new state.
    ///
    /// The first frame (and any frame after a bar-count change) passes
    /// through unchanged.
    pub fn apply(&mut self, bars: &[f32]) -> Vec<f32> {
        if self.interp >= 1.0 || self.last.len() != bars.len() {
            self.last = bars.to_vec();
            return bars.to_vec();
        }

        for (last, &new) in self.last.iter_mut().zip(bars) {
            *last = self.interp * new + (1.0 - self.interp) * *last;
        }
        self.last.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_at_one() {
        let mut smoother = BarSmoother::new(1.0);
        smoother.apply(&[1.0, 2.0]);
        let out = smoother.apply(&[3.0, 4.0]);
        assert_eq!(out, vec![3.0, 4.0]);
    }

    #[test]
    fn test_first_frame_passthrough() {
        let mut smoother = BarSmoother::new(0.5);
        let out = smoother.apply(&[2.0, 4.0]);
        assert_eq!(out, vec![2.0, 4.0]);
    }

    #[test]
    fn test_blend() {
        let mut smoother = BarSmoother::new(0.5);
        smoother.apply(&[0.0, 0.0]);
        let out = smoother.apply(&[1.0, 2.0]);
        assert_eq!(out, vec![0.5, 1.0]);
    }

    #[test]
    fn test_converges_to_constant_input() {
        let mut smoother = BarSmoother::new(0.5);
        let mut out = smoother.apply(&[0.0]);
        for _ in 0..50 {
            out = smoother.apply(&[1.0]);
        }
        assert!((out[0] - 1.0).abs() < 1e-3);
    }

    #[test]
    fn test_length_change_resets() {
        let mut smoother = BarSmoother::new(0.5);
        smoother.apply(&[1.0, 1.0]);
        let out = smoother.apply(&[4.0, 4.0, 4.0]);
        assert_eq!(out, vec![4.0, 4.0, 4.0]);
    }

    #[test]
    #[should_panic]
    fn test_zero_interp_rejected() {
        BarSmoother::new(0.0);
    }
}
