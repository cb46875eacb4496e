//! Dust Visualizer Core
//!
//! Core library for an audio-reactive 3D spring-mesh visualizer.
//!
//! # Features
//!
//! - FFT spectrum extraction via RustFFT (Hann window, linear band grouping)
//! - Triangulated grid mesh with per-vertex neighbor coupling
//! - Damped spring relaxation driving mesh heights from spectrum energy
//! - Moving hotspot field that maps spectrum bins onto the mesh spatially
//! - Height-keyed color mapping and render-ready vertex assembly
//!
//! Audio capture and rendering are left to the host application: the host
//! feeds raw interleaved sample blocks in through [`audio::BlockSource`] and
//! uploads the heights, vertices, and camera matrices this crate computes.

pub mod audio;
pub mod camera;
pub mod color;
pub mod mesh;
pub mod sim;

// Re-export commonly used types
pub use audio::{
    decode_block, downmix, BarSmoother, BlockSource, CaptureError, SampleFormat, SpectrumAnalyzer,
    SynthSource,
};
pub use camera::OrbitCamera;
pub use color::{height_color, mesh_vertices, MeshVertex};
pub use mesh::{GridTopology, HotspotField, RelaxMode, RelaxationEngine, SpringParams};
pub use sim::{MappingMode, SimConfig, SimError, Simulation};
