//! Integration tests for mesh topology, relaxation, and the full simulation.

use dust_visualizer::audio::{generate_sine, SynthSource};
use dust_visualizer::mesh::{
    GridTopology, HotspotField, RelaxMode, RelaxationEngine, SpringParams, HEIGHT_LIMIT,
};
use dust_visualizer::sim::{MappingMode, SimConfig, SimError, Simulation};

fn direct_config(grid_n: usize) -> SimConfig {
    SimConfig {
        block_size: 1024,
        ..SimConfig::direct(grid_n)
    }
}

#[test]
fn test_neighbor_symmetry_across_sizes() {
    for n in [2, 3, 8, 32] {
        let topo = GridTopology::new(n);
        for i in 0..topo.point_count() {
            let neighbors = topo.neighbors(i);
            assert!(!neighbors.contains(&(i as u32)));
            for &j in neighbors {
                assert!(
                    topo.neighbors(j as usize).contains(&(i as u32)),
                    "edge {}->{} not symmetric at n={}",
                    i,
                    j,
                    n
                );
            }
        }
    }
}

#[test]
fn test_interior_vertex_degree() {
    // Interior lattice vertices touch 4 axis neighbors plus the diagonals the
    // triangulation picked; degree is between 4 and 8 whatever the diagonals.
    let n = 8;
    let topo = GridTopology::new(n);
    for row in 1..n - 1 {
        for col in 1..n - 1 {
            let degree = topo.neighbors(row * n + col).len();
            assert!(
                (4..=8).contains(&degree),
                "interior degree {} at ({}, {})",
                degree,
                row,
                col
            );
        }
    }
}

#[test]
fn test_relaxation_stability_default_coefficients() {
    let topo = GridTopology::new(8);
    let targets = vec![0.5; topo.point_count()];

    let mut engine = RelaxationEngine::new(topo.point_count(), SpringParams::damped()).unwrap();
    for _ in 0..1000 {
        engine.step(&topo, &targets);
    }
    for &h in engine.heights() {
        assert!(h.abs() < HEIGHT_LIMIT);
        assert!((h - 0.5).abs() < 1e-3, "did not converge: {}", h);
    }
}

#[test]
fn test_viscous_mode_stays_bounded() {
    let topo = GridTopology::new(8);
    let targets = vec![0.5; topo.point_count()];

    let mut engine = RelaxationEngine::new(topo.point_count(), SpringParams::viscous()).unwrap();
    for _ in 0..1000 {
        engine.step(&topo, &targets);
    }
    for &h in engine.heights() {
        assert!(h.abs() < HEIGHT_LIMIT);
        assert!(h > 0.0);
    }
}

#[test]
fn test_unstable_params_rejected_at_construction() {
    let params = SpringParams {
        spring_k: 0.12,
        neighbor_k: 0.18,
        mode: RelaxMode::Damped { damp: 1.05 },
    };
    assert!(RelaxationEngine::new(16, params).is_err());
}

#[test]
fn test_hotspot_count_endpoints() {
    let field = HotspotField::new(8, 99);
    assert_eq!(field.target_count(0.0), 1);
    assert_eq!(field.target_count(7.0 / 16.0), 8);
}

#[test]
fn test_hotspot_reflection_at_wall() {
    let mut field = HotspotField::new(8, 3);
    // Run long enough that some hotspot visits a boundary; positions must
    // never escape and the field never empties.
    for i in 0..5000 {
        field.update(if i % 2 == 0 { 0.5 } else { 0.0 });
        assert!(field.count() >= 1 && field.count() <= 8);
        for h in field.hotspots() {
            assert!(h.pos[0].abs() <= 1.0 && h.pos[1].abs() <= 1.0);
        }
    }
}

#[test]
fn test_end_to_end_silence_stays_at_rest() {
    let mut sim = Simulation::new(direct_config(4)).unwrap();
    let mut source = SynthSource::new(vec![0.0; 1024 * 50], 2);

    for _ in 0..50 {
        let heights = sim.frame(&mut source).unwrap();
        assert!(heights.iter().all(|&h| h == 0.0));
    }
}

#[test]
fn test_end_to_end_uniform_bars_lift_uniformly() {
    // From rest, a uniform target must move every vertex by the same
    // positive amount on the first step.
    let topo = GridTopology::new(4);
    let mut engine = RelaxationEngine::new(
        topo.point_count(),
        SpringParams {
            spring_k: 0.12,
            neighbor_k: 0.18,
            mode: RelaxMode::Damped { damp: 0.88 },
        },
    )
    .unwrap();

    let targets = vec![1.0; topo.point_count()];
    engine.step(&topo, &targets);

    let first = engine.heights()[0];
    assert!(first > 0.0);
    for &h in engine.heights() {
        assert!((h - first).abs() < 1e-6, "asymmetric step: {} vs {}", h, first);
    }
}

#[test]
fn test_end_to_end_sine_excites_mesh() {
    let mut sim = Simulation::new(direct_config(4)).unwrap();
    let samples = generate_sine(1000.0, 44100, 2.0, 1.0);
    let mut source = SynthSource::new(samples, 1);

    let mut peak = 0.0f32;
    for _ in 0..40 {
        let heights = sim.frame(&mut source).unwrap();
        peak = peak.max(heights.iter().cloned().fold(0.0, f32::max));
    }
    assert!(peak > 0.0, "sine input should excite the mesh");
    assert!(peak <= HEIGHT_LIMIT);
}

#[test]
fn test_end_to_end_hotspot_mode() {
    let config = SimConfig {
        grid_n: 8,
        num_bars: 60,
        block_size: 1024,
        mapping: MappingMode::hotspot(),
        ..SimConfig::default()
    };
    let mut sim = Simulation::new(config).unwrap();
    let samples = generate_sine(500.0, 44100, 2.0, 1.0);
    let mut source = SynthSource::new(samples, 2);

    for _ in 0..40 {
        sim.frame(&mut source).unwrap();
        let count = sim.hotspot_count();
        assert!((1..=8).contains(&count));
    }

    let vertices = sim.vertices();
    assert_eq!(vertices.len(), 64);
    // Heights flow into the vertex buffer.
    for (v, &h) in vertices.iter().zip(sim.heights()) {
        assert_eq!(v.position[1], h);
    }
}

#[test]
fn test_exhausted_source_surfaces_capture_error() {
    let mut sim = Simulation::new(direct_config(4)).unwrap();
    let mut source = SynthSource::new(vec![0.0; 512], 1);

    assert!(matches!(
        sim.frame(&mut source),
        Err(SimError::Capture(_))
    ));
}
