//! Example: drive the mesh simulation from synthetic audio.
//!
//! Builds the default hotspot-mode simulation, feeds it a rising tone, and
//! prints how the mesh responds. No capture device or window required.
//!
//! Run with:
//!     cargo run --example mesh_synthetic

use anyhow::Result;
use dust_visualizer::audio::{generate_sine, SynthSource};
use dust_visualizer::camera::OrbitCamera;
use dust_visualizer::sim::{SimConfig, Simulation};

fn main() -> Result<()> {
    env_logger::init();

    println!("Dust Visualizer - Synthetic Audio Example");
    println!("=========================================\n");

    let config = SimConfig::default();
    println!("Config:\n{}\n", config.to_json()?);

    let sample_rate = config.sample_rate;
    let block_size = config.block_size;
    let mut sim = Simulation::new(config)?;

    // Rising tone: one second per octave from 110 Hz.
    let duration = 4.0;
    let mut samples = Vec::new();
    for octave in 0..duration as u32 {
        let freq = 110.0 * (1 << octave) as f32;
        samples.extend(generate_sine(freq, sample_rate, 1.0, 0.8));
    }
    let mut source = SynthSource::new(samples, 2);

    let total_frames = (duration * sample_rate as f32 / block_size as f32) as usize;
    println!("Simulating {} frames...", total_frames);

    let camera = OrbitCamera::default();
    let (proj, view) = camera.matrices(16.0 / 9.0);

    for frame_idx in 0..total_frames {
        let heights = sim.frame(&mut source)?;

        let peak = heights.iter().cloned().fold(0.0f32, f32::max);
        let mean = heights.iter().sum::<f32>() / heights.len() as f32;

        // Roughly one report per second of audio
        if frame_idx % (sample_rate as usize / block_size) == 0 {
            println!(
                "  t={:4.1}s  hotspots={}  peak={:.3}  mean={:.3}",
                frame_idx as f32 * block_size as f32 / sample_rate as f32,
                sim.hotspot_count(),
                peak,
                mean
            );
        }
    }

    let vertices = sim.vertices();
    println!("\nFinal frame: {} vertices ready for upload", vertices.len());
    println!("  proj row 0: {:?}", proj.row(0));
    println!("  view row 0: {:?}", view.row(0));

    Ok(())
}
