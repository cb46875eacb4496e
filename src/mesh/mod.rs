//! Mesh topology and spring-mesh simulation.
//!
//! This module provides:
//! - Triangulated grid topology with a flat CSR neighbor table
//! - The damped-spring relaxation engine driving per-vertex heights
//! - The moving hotspot field that spatially maps spectrum bins

pub mod hotspot;
pub mod relax;
pub mod topology;

// Re-export commonly used types
pub use hotspot::{Hotspot, HotspotField};
pub use relax::{MeshError, RelaxMode, RelaxationEngine, SpringParams, HEIGHT_LIMIT};
pub use topology::GridTopology;
