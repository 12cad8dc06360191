//! Indexed triangle mesh buffers
//!
//! Triangles use clockwise front faces (left-handed, Y up), matching the
//! engine that consumes the buffers. Face normals are therefore
//! `(c - a) × (b - a)` for a triangle `[a, b, c]`.

use std::collections::HashMap;

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use super::vertex::MeshVertex;

/// Quantization used to weld duplicated vertices for topology checks
const WELD_SCALE: f32 = 1.0e4;

/// Output of the wall builder, owned by the caller
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WallMesh {
    pub positions: Vec<Vec3>,
    /// Triangle list, three entries per triangle
    pub indices: Vec<u32>,
    pub normals: Vec<Vec3>,
    pub uvs: Vec<Vec2>,
}

impl WallMesh {
    /// Assemble a mesh and derive its vertex normals
    pub fn from_parts(positions: Vec<Vec3>, indices: Vec<u32>, uvs: Vec<Vec2>) -> Self {
        let normals = compute_normals(&positions, &indices);
        Self {
            positions,
            indices,
            normals,
            uvs,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Iterate triangles as index triples
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }

    /// Interleave the buffers for a single vertex buffer upload
    pub fn interleaved(&self) -> Vec<MeshVertex> {
        self.positions
            .iter()
            .zip(&self.normals)
            .zip(&self.uvs)
            .map(|((p, n), uv)| MeshVertex::new(p.to_array(), n.to_array(), uv.to_array()))
            .collect()
    }

    /// Index buffer as raw bytes
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    /// Check the buffer invariants: indices in range, one normal and uv per vertex
    pub fn is_consistent(&self) -> bool {
        let n = self.positions.len();
        self.indices.len() % 3 == 0
            && self.indices.iter().all(|&i| (i as usize) < n)
            && self.normals.len() == n
            && self.uvs.len() == n
    }

    /// How many triangles use each undirected edge, keyed by welded vertex
    ///
    /// Vertices at the same position count as one, so texture seams made of
    /// duplicated vertices do not show up as open edges.
    pub fn edge_use_counts(&self) -> HashMap<(u32, u32), u32> {
        let welded = weld(&self.positions);
        let mut counts = HashMap::new();
        for [a, b, c] in self.triangles() {
            let (a, b, c) = (welded[a as usize], welded[b as usize], welded[c as usize]);
            for (u, v) in [(a, b), (b, c), (c, a)] {
                let key = if u < v { (u, v) } else { (v, u) };
                *counts.entry(key).or_insert(0) += 1;
            }
        }
        counts
    }

    /// Edges used by exactly one triangle
    pub fn boundary_edge_count(&self) -> usize {
        self.edge_use_counts().values().filter(|&&c| c == 1).count()
    }

    /// Every edge shared by exactly two triangles
    pub fn is_watertight(&self) -> bool {
        let counts = self.edge_use_counts();
        !counts.is_empty() && counts.values().all(|&c| c == 2)
    }

    /// Enclosed volume; positive when faces point outward
    pub fn signed_volume(&self) -> f32 {
        let sum: f32 = self
            .triangles()
            .map(|[a, b, c]| {
                let (a, b, c) = (
                    self.positions[a as usize],
                    self.positions[b as usize],
                    self.positions[c as usize],
                );
                a.dot(b.cross(c))
            })
            .sum();
        -sum / 6.0
    }
}

/// Per-vertex normals from accumulated unit face normals
pub fn compute_normals(positions: &[Vec3], indices: &[u32]) -> Vec<Vec3> {
    let mut normals = vec![Vec3::ZERO; positions.len()];

    for tri in indices.chunks_exact(3) {
        let (ia, ib, ic) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
        let (a, b, c) = (positions[ia], positions[ib], positions[ic]);
        let face = (c - a).cross(b - a).normalize_or_zero();
        normals[ia] += face;
        normals[ib] += face;
        normals[ic] += face;
    }

    normals.iter_mut().for_each(|n| *n = n.normalize_or_zero());
    normals
}

/// Map every vertex to the first vertex sharing its (quantized) position
fn weld(positions: &[Vec3]) -> Vec<u32> {
    let mut first_at: HashMap<(i64, i64, i64), u32> = HashMap::new();
    positions
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let key = (
                (p.x * WELD_SCALE).round() as i64,
                (p.y * WELD_SCALE).round() as i64,
                (p.z * WELD_SCALE).round() as i64,
            );
            *first_at.entry(key).or_insert(i as u32)
        })
        .collect()
}
