//! Frame-loop simulation state and configuration.
//!
//! [`Simulation`] owns every stage of the per-frame pipeline (spectrum
//! extraction, smoothing, hotspot field, target derivation, relaxation) and
//! threads them explicitly; the host's frame loop owns only the window and
//! the capture device.

use serde::{Deserialize, Serialize};

use crate::audio::{
    average_energy, decode_block, downmix, BarSmoother, BlockSource, CaptureError,
    SpectrumAnalyzer,
};
use crate::color::{mesh_vertices, MeshVertex};
use crate::mesh::{GridTopology, HotspotField, MeshError, RelaxationEngine, SpringParams};

/// Errors surfaced by the simulation.
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    #[error("Capture error: {0}")]
    Capture(#[from] CaptureError),
    #[error("Mesh error: {0}")]
    Mesh(#[from] MeshError),
    #[error("Direct mapping needs one bar per mesh point: {num_bars} bars for {points} points")]
    BarCountMismatch { num_bars: usize, points: usize },
    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),
}

/// How spectrum bars become per-vertex target heights.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MappingMode {
    /// Vertex `i` follows bar `i` directly. Requires one bar per vertex.
    Direct { scale: f32 },
    /// Each vertex picks its bar by proximity to the nearest hotspot,
    /// producing moving blobs of excitation instead of a fixed layout.
    Hotspot { distance_scale: f32, scale: f32 },
}

impl MappingMode {
    /// Direct mapping with the standard height scale.
    pub fn direct() -> Self {
        MappingMode::Direct { scale: 2.0 }
    }

    /// Hotspot mapping with the standard gradient sharpness and scale.
    pub fn hotspot() -> Self {
        MappingMode::Hotspot {
            distance_scale: 0.5,
            scale: 8.0,
        }
    }
}

/// Tuning surface for the whole pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimConfig {
    /// Mesh resolution per side.
    pub grid_n: usize,
    pub sample_rate: u32,
    /// Samples per captured block (one block per frame).
    pub block_size: usize,
    pub num_bars: usize,
    /// Bar smoothing factor in (0, 1]; 1 disables smoothing.
    pub interp: f32,
    pub max_hotspots: usize,
    pub hotspot_seed: u32,
    pub mapping: MappingMode,
    pub spring: SpringParams,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            grid_n: 32,
            sample_rate: 44100,
            block_size: 2048,
            num_bars: 60,
            interp: 0.5,
            max_hotspots: 8,
            hotspot_seed: 1,
            mapping: MappingMode::hotspot(),
            spring: SpringParams::default(),
        }
    }
}

impl SimConfig {
    /// Direct-mode preset: one bar per mesh vertex.
    pub fn direct(grid_n: usize) -> Self {
        Self {
            grid_n,
            num_bars: grid_n * grid_n,
            mapping: MappingMode::direct(),
            ..Self::default()
        }
    }

    /// Parse a configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, SimError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize the configuration to pretty JSON.
    pub fn to_json(&self) -> Result<String, SimError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// All per-frame state of the visualizer core.
pub struct Simulation {
    config: SimConfig,
    topology: GridTopology,
    analyzer: SpectrumAnalyzer,
    smoother: BarSmoother,
    field: HotspotField,
    engine: RelaxationEngine,
    targets: Vec<f32>,
}

impl Simulation {
    /// Build the full pipeline from a validated configuration.
    pub fn new(config: SimConfig) -> Result<Self, SimError> {
        let points = config.grid_n * config.grid_n;
        if matches!(config.mapping, MappingMode::Direct { .. }) && config.num_bars != points {
            return Err(SimError::BarCountMismatch {
                num_bars: config.num_bars,
                points,
            });
        }

        let topology = GridTopology::new(config.grid_n);
        let engine = RelaxationEngine::new(points, config.spring)?;

        log::info!(
            "simulation: {n}x{n} mesh, {bars} bars, block {block} @ {rate} Hz, {mapping:?}",
            n = config.grid_n,
            bars = config.num_bars,
            block = config.block_size,
            rate = config.sample_rate,
            mapping = config.mapping,
        );

        Ok(Self {
            analyzer: SpectrumAnalyzer::new(config.block_size),
            smoother: BarSmoother::new(config.interp),
            field: HotspotField::new(config.max_hotspots, config.hotspot_seed),
            targets: vec![0.0; points],
            config,
            topology,
            engine,
        })
    }

    /// Advance one frame from an already down-mixed mono block, returning
    /// the new vertex heights.
    pub fn step_block(&mut self, mono: &[f32]) -> &[f32] {
        let bars = self.analyzer.bars(mono, self.config.num_bars);
        let bars = self.smoother.apply(&bars);

        match self.config.mapping {
            MappingMode::Direct { scale } => {
                for (target, &bar) in self.targets.iter_mut().zip(&bars) {
                    *target = bar * scale;
                }
            }
            MappingMode::Hotspot {
                distance_scale,
                scale,
            } => {
                self.field.update(average_energy(&bars));
                let last_bar = self.config.num_bars - 1;
                for (target, &point) in self.targets.iter_mut().zip(self.topology.points2d()) {
                    let min_dist = self.field.nearest_distance(point);
                    let rel = (1.0 - (min_dist * distance_scale) / 2.0).clamp(0.0, 1.0);
                    let bin = (rel * last_bar as f32).round() as usize;
                    *target = bars[bin] * scale;
                }
            }
        }

        self.engine.step(&self.topology, &self.targets);
        self.engine.heights()
    }

    /// Advance one frame by blocking on the capture source for a fresh
    /// block, then running the full pipeline on it.
    pub fn frame(&mut self, source: &mut dyn BlockSource) -> Result<&[f32], SimError> {
        let bytes = source.read_block(self.config.block_size)?;
        let samples = decode_block(&bytes, source.sample_format())?;
        let mono = downmix(&samples, source.channels());
        Ok(self.step_block(&mono))
    }

    /// Current vertex heights.
    pub fn heights(&self) -> &[f32] {
        self.engine.heights()
    }

    /// Static mesh topology.
    pub fn topology(&self) -> &GridTopology {
        &self.topology
    }

    /// Active hotspot count.
    pub fn hotspot_count(&self) -> usize {
        self.field.count()
    }

    /// Configuration in use.
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Assemble the render-ready vertex buffer for the current heights.
    pub fn vertices(&self) -> Vec<MeshVertex> {
        mesh_vertices(&self.topology, self.heights())
    }
}
