//! Grid mesh topology: lattice, Delaunay triangulation, neighbor table.
//!
//! Built once at startup and immutable afterwards. Point `i = row*n + col`
//! sits on a regular `n × n` lattice spanning `[-1, 1]²`; triangles come from
//! a Delaunay triangulation of the 2D projections; the neighbor table stores
//! triangulation-adjacent vertices in a flat CSR layout for cache-friendly
//! access in the relaxation loop.

use delaunator::{triangulate, Point};

/// Static topology of the visualization mesh.
pub struct GridTopology {
    n: usize,
    /// 3D rest positions (x, 0, z), row-major.
    positions: Vec<[f32; 3]>,
    /// 2D lattice projections (x, z), row-major.
    points2d: Vec<[f32; 2]>,
    /// Triangle index triples covering the lattice.
    triangles: Vec<[u32; 3]>,
    /// CSR neighbor table: neighbors of `i` are
    /// `neighbor_data[neighbor_offsets[i]..neighbor_offsets[i + 1]]`.
    neighbor_offsets: Vec<u32>,
    neighbor_data: Vec<u32>,
}

impl GridTopology {
    /// Build the topology for an `n × n` grid.
    ///
    /// Deterministic given `n`, up to the triangulation library's
    /// tie-breaking on the lattice's cocircular quads.
    ///
    /// # Panics
    ///
    /// Panics if `n < 2`.
    pub fn new(n: usize) -> Self {
        assert!(n >= 2, "grid resolution must be at least 2, got {}", n);

        let mut positions = Vec::with_capacity(n * n);
        let mut points2d = Vec::with_capacity(n * n);
        for row in 0..n {
            for col in 0..n {
                let x = -1.0 + 2.0 * col as f32 / (n - 1) as f32;
                let z = -1.0 + 2.0 * row as f32 / (n - 1) as f32;
                positions.push([x, 0.0, z]);
                points2d.push([x, z]);
            }
        }

        let sites: Vec<Point> = points2d
            .iter()
            .map(|p| Point {
                x: p[0] as f64,
                y: p[1] as f64,
            })
            .collect();
        let triangulation = triangulate(&sites);

        let triangles: Vec<[u32; 3]> = triangulation
            .triangles
            .chunks_exact(3)
            .map(|t| [t[0] as u32, t[1] as u32, t[2] as u32])
            .collect();

        let (neighbor_offsets, neighbor_data) = build_adjacency(n * n, &triangles);

        Self {
            n,
            positions,
            points2d,
            triangles,
            neighbor_offsets,
            neighbor_data,
        }
    }

    /// Grid resolution per side.
    pub fn n(&self) -> usize {
        self.n
    }

    /// Total number of mesh points (`n * n`).
    pub fn point_count(&self) -> usize {
        self.n * self.n
    }

    /// 3D rest positions, row-major.
    pub fn positions(&self) -> &[[f32; 3]] {
        &self.positions
    }

    /// 2D lattice projections, row-major.
    pub fn points2d(&self) -> &[[f32; 2]] {
        &self.points2d
    }

    /// Triangle index triples.
    pub fn triangles(&self) -> &[[u32; 3]] {
        &self.triangles
    }

    /// Triangulation-adjacent vertices of point `i`.
    pub fn neighbors(&self, i: usize) -> &[u32] {
        let lo = self.neighbor_offsets[i] as usize;
        let hi = self.neighbor_offsets[i + 1] as usize;
        &self.neighbor_data[lo..hi]
    }
}

/// Derive the CSR neighbor table from triangle edges.
///
/// Every edge contributes both directions; duplicates across shared
/// triangles are dropped.
fn build_adjacency(point_count: usize, triangles: &[[u32; 3]]) -> (Vec<u32>, Vec<u32>) {
    let mut sets: Vec<Vec<u32>> = vec![Vec::new(); point_count];
    for tri in triangles {
        for i in 0..3 {
            let a = tri[i];
            let b = tri[(i + 1) % 3];
            if !sets[a as usize].contains(&b) {
                sets[a as usize].push(b);
            }
            if !sets[b as usize].contains(&a) {
                sets[b as usize].push(a);
            }
        }
    }

    let mut offsets = Vec::with_capacity(point_count + 1);
    let mut data = Vec::new();
    offsets.push(0);
    for set in sets {
        data.extend_from_slice(&set);
        offsets.push(data.len() as u32);
    }
    (offsets, data)
}
