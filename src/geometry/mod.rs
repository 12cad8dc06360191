//! Geometry module
//!
//! Pure functions and plain data: no scene graph, no renderer.
//! - `wall`: corner polyline → wall solid
//! - `mesh`: indexed mesh buffers, normals, diagnostics
//! - `vertex`: interleaved GPU vertex layout
//! - `volume`: colliders and trigger boxes

pub mod mesh;
pub mod vertex;
pub mod volume;
pub mod wall;

pub use mesh::WallMesh;
pub use vertex::MeshVertex;
pub use volume::{Aabb, Collider, ColliderShape, WorldVolume};
pub use wall::{Wall, WallSpec, Winding, build_wall_mesh};
