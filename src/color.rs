//! Height-keyed color mapping and render vertex assembly.

use crate::mesh::GridTopology;

/// Vertex data uploaded to the host renderer.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
}

/// Map a vertex height to its render color.
///
/// Blue at rest, shifting warm as excitation grows.
pub fn height_color(height: f32) -> [f32; 3] {
    let c = (height * 2.0).clamp(0.0, 1.0);
    [0.2 + c, 0.5 * c, 1.0 - c]
}

/// Assemble the per-vertex upload buffer: lattice positions displaced to the
/// current heights, colored by height.
///
/// # Panics
///
/// Panics if `heights` length differs from the topology's point count.
pub fn mesh_vertices(topology: &GridTopology, heights: &[f32]) -> Vec<MeshVertex> {
    assert_eq!(heights.len(), topology.point_count(), "height length mismatch");

    topology
        .positions()
        .iter()
        .zip(heights)
        .map(|(pos, &h)| MeshVertex {
            position: [pos[0], h, pos[2]],
            color: height_color(h),
        })
        .collect()
}
