//! Interleaved vertex type for handing meshes to the renderer

use bytemuck::{Pod, Zeroable};

/// Position, normal and texture coordinate of one mesh vertex
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

impl MeshVertex {
    pub const fn new(position: [f32; 3], normal: [f32; 3], uv: [f32; 2]) -> Self {
        Self {
            position,
            normal,
            uv,
        }
    }

    /// Byte stride between consecutive vertices
    pub const fn stride() -> usize {
        std::mem::size_of::<MeshVertex>()
    }
}
