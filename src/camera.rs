//! Orbit camera matrix computation.
//!
//! Mouse/scroll dispatch stays in the host's window loop; this struct only
//! turns already-dispatched orbit/zoom deltas into the projection and view
//! matrices the renderer consumes.

use glam::{Mat4, Vec3};

const DIST_RANGE: (f32, f32) = (1.5, 8.0);
const ELEV_RANGE: (f32, f32) = (0.2, 3.0);
const FOV_Y_DEG: f32 = 45.0;
const Z_NEAR: f32 = 0.1;
const Z_FAR: f32 = 100.0;

/// Camera orbiting the mesh origin.
#[derive(Debug, Clone, Copy)]
pub struct OrbitCamera {
    pub angle: f32,
    pub dist: f32,
    pub elev: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            angle: 0.0,
            dist: 3.5,
            elev: 1.2,
        }
    }
}

impl OrbitCamera {
    /// Apply a mouse-drag delta in pixels.
    pub fn orbit(&mut self, dx: f32, dy: f32) {
        self.angle += dx * 0.01;
        self.elev = (self.elev - dy * 0.01).clamp(ELEV_RANGE.0, ELEV_RANGE.1);
    }

    /// Apply scroll steps; positive zooms in.
    pub fn zoom(&mut self, steps: f32) {
        self.dist = (self.dist - steps * 0.2).clamp(DIST_RANGE.0, DIST_RANGE.1);
    }

    /// Eye position on the orbit.
    pub fn eye(&self) -> Vec3 {
        Vec3::new(
            self.angle.sin() * self.dist,
            self.elev,
            self.angle.cos() * self.dist,
        )
    }

    /// Projection and view matrices for the given aspect ratio.
    pub fn matrices(&self, aspect: f32) -> (Mat4, Mat4) {
        let proj = Mat4::perspective_rh(FOV_Y_DEG.to_radians(), aspect, Z_NEAR, Z_FAR);
        let view = Mat4::look_at_rh(self.eye(), Vec3::ZERO, Vec3::Y);
        (proj, view)
    }
}
