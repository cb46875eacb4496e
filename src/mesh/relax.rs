//! Damped spring relaxation over the mesh.
//!
//! Each frame every vertex is pulled toward a spectrum-derived target height
//! and toward the average height of its triangulation neighbors. Two update
//! rules are supported, matching the two formulations this visualizer family
//! uses; they are deliberately kept as distinct modes rather than unified.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::topology::GridTopology;

/// Hard bound on vertex height magnitude. Heights outside this range are
/// clamped and counted as divergence.
pub const HEIGHT_LIMIT: f32 = 10.0;

/// Consecutive clamped frames before the engine logs a divergence warning.
const DIVERGENCE_FRAMES: u32 = 30;

/// Errors produced by the mesh simulation.
#[derive(Error, Debug)]
pub enum MeshError {
    #[error("Unstable relaxation coefficients: {reason}")]
    UnstableParams { reason: String },
}

/// Which relaxation formula advances the mesh.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum RelaxMode {
    /// Velocity integration with damping:
    /// `v = damp * (v + force); h += v`.
    Damped { damp: f32 },
    /// Direct height blending:
    /// `h = visc * h + spring_k * (target - h) + neighbor_k * (avg - h)`.
    Viscous { visc: f32 },
}

/// Spring coefficients for the relaxation update.
///
/// The spring term must dominate the neighbor coupling and the decay factor
/// must stay below 1; values at or above 1 put the update into positive
/// feedback. [`SpringParams::validate`] enforces the envelope.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpringParams {
    /// Pull toward the spectrum target.
    pub spring_k: f32,
    /// Pull toward the neighbor average.
    pub neighbor_k: f32,
    pub mode: RelaxMode,
}

impl SpringParams {
    /// Velocity-damped defaults.
    pub fn damped() -> Self {
        Self {
            spring_k: 0.12,
            neighbor_k: 0.18,
            mode: RelaxMode::Damped { damp: 0.88 },
        }
    }

    /// Viscous-blend defaults.
    pub fn viscous() -> Self {
        Self {
            spring_k: 0.18,
            neighbor_k: 0.14,
            mode: RelaxMode::Viscous { visc: 0.82 },
        }
    }

    /// Check the stability envelope.
    pub fn validate(&self) -> Result<(), MeshError> {
        let fail = |reason: String| Err(MeshError::UnstableParams { reason });

        if self.spring_k < 0.0 || self.neighbor_k < 0.0 {
            return fail(format!(
                "spring_k {} and neighbor_k {} must be non-negative",
                self.spring_k, self.neighbor_k
            ));
        }
        if self.spring_k + self.neighbor_k >= 1.0 {
            return fail(format!(
                "spring_k + neighbor_k must stay below 1, got {}",
                self.spring_k + self.neighbor_k
            ));
        }
        let decay = match self.mode {
            RelaxMode::Damped { damp } => damp,
            RelaxMode::Viscous { visc } => visc,
        };
        if !(0.0..1.0).contains(&decay) {
            return fail(format!("damp/visc must be in [0, 1), got {}", decay));
        }
        Ok(())
    }
}

impl Default for SpringParams {
    fn default() -> Self {
        Self::damped()
    }
}

/// Advances mesh heights each frame. Owns the only long-lived simulation
/// state: per-vertex heights and velocities.
pub struct RelaxationEngine {
    params: SpringParams,
    heights: Vec<f32>,
    velocities: Vec<f32>,
    /// Previous-frame heights; neighbor averages read these so the update
    /// order over vertices does not matter.
    prev: Vec<f32>,
    clamped_frames: u32,
    warned: bool,
}

impl RelaxationEngine {
    /// Create an engine for `point_count` vertices at rest.
    pub fn new(point_count: usize, params: SpringParams) -> Result<Self, MeshError> {
        params.validate()?;
        Ok(Self {
            params,
            heights: vec![0.0; point_count],
            velocities: vec![0.0; point_count],
            prev: vec![0.0; point_count],
            clamped_frames: 0,
            warned: false,
        })
    }

    /// Current vertex heights.
    pub fn heights(&self) -> &[f32] {
        &self.heights
    }

    /// Coefficients in use.
    pub fn params(&self) -> &SpringParams {
        &self.params
    }

    /// Advance one frame toward `targets`.
    ///
    /// # Panics
    ///
    /// Panics if `targets` length differs from the vertex count or the
    /// topology does not match the engine size.
    pub fn step(&mut self, topology: &GridTopology, targets: &[f32]) {
        assert_eq!(targets.len(), self.heights.len(), "target length mismatch");
        assert_eq!(
            topology.point_count(),
            self.heights.len(),
            "topology size mismatch"
        );

        self.prev.copy_from_slice(&self.heights);
        let mut clamped = false;

        for i in 0..self.heights.len() {
            let h = self.prev[i];
            let neighbors = topology.neighbors(i);
            let neighbor_avg = if neighbors.is_empty() {
                0.0
            } else {
                neighbors.iter().map(|&j| self.prev[j as usize]).sum::<f32>()
                    / neighbors.len() as f32
            };

            let spring = self.params.spring_k * (targets[i] - h);
            let coupling = self.params.neighbor_k * (neighbor_avg - h);

            let mut next = match self.params.mode {
                RelaxMode::Damped { damp } => {
                    self.velocities[i] = damp * (self.velocities[i] + spring + coupling);
                    h + self.velocities[i]
                }
                RelaxMode::Viscous { visc } => visc * h + spring + coupling,
            };

            if next.abs() > HEIGHT_LIMIT {
                next = next.clamp(-HEIGHT_LIMIT, HEIGHT_LIMIT);
                self.velocities[i] = 0.0;
                clamped = true;
            }
            self.heights[i] = next;
        }

        self.track_divergence(clamped);
    }

    /// Log once per divergence episode instead of crashing; persistent
    /// clamping means the coefficients are a configuration error.
    fn track_divergence(&mut self, clamped: bool) {
        if !clamped {
            self.clamped_frames = 0;
            self.warned = false;
            return;
        }
        self.clamped_frames += 1;
        if self.clamped_frames >= DIVERGENCE_FRAMES && !self.warned {
            log::warn!(
                "mesh heights clamped for {} consecutive frames; coefficients {:?} are diverging",
                self.clamped_frames,
                self.params
            );
            self.warned = true;
        }
    }
}
