//! Procedural wall solids
//!
//! A wall follows a polyline of floor-plan corners (x/z plane). The corners
//! themselves form the inner face; the outer face is offset by the wall
//! thickness to the right of the walking direction, with mitered joints so
//! neighbouring segments meet without gaps. Corners must be given
//! counter-clockwise (x right, z up) for the thickness to land outside a
//! room, see [`Winding`].
//!
//! Vertex layout of the result, `N` = corner count:
//! `[inner bottom | inner top | outer bottom | outer top]` (4N), followed by
//! four end-cap duplicates for open walls.

use std::f32::consts::PI;

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use super::mesh::WallMesh;
use crate::error::{Error, Result};
use crate::{ground_point, sign};

/// Order of the corner list as authored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Winding {
    /// Corners are clockwise and get reversed before meshing
    #[default]
    Left,
    /// Corners are already counter-clockwise
    Right,
}

/// Parsed corner polyline with its winding applied
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wall {
    pub corners: Vec<Vec2>,
}

impl Wall {
    /// Parse flat `[x1, z1, x2, z2, ...]` corner data
    pub fn from_flat(data: &[f32], winding: Winding) -> Result<Self> {
        if data.len() % 2 != 0 {
            return Err(Error::OddCoordinateCount { len: data.len() });
        }
        let corners = data
            .chunks_exact(2)
            .map(|pair| Vec2::new(pair[0], pair[1]))
            .collect();
        Ok(Self::new(corners, winding))
    }

    pub fn new(mut corners: Vec<Vec2>, winding: Winding) -> Self {
        if winding == Winding::Left {
            corners.reverse();
        }
        Self { corners }
    }

    /// Attach dimensions, validating the result
    pub fn spec(self, height: f32, thickness: f32, closed: bool) -> Result<WallSpec> {
        WallSpec::new(self.corners, height, thickness, closed)
    }
}

/// Everything needed to mesh one wall
///
/// Deserializing goes through the same checks as [`WallSpec::new`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawWallSpec")]
pub struct WallSpec {
    corners: Vec<Vec2>,
    height: f32,
    thickness: f32,
    closed: bool,
}

/// Unchecked wire form of [`WallSpec`]
#[derive(Deserialize)]
struct RawWallSpec {
    corners: Vec<Vec2>,
    height: f32,
    thickness: f32,
    closed: bool,
}

impl TryFrom<RawWallSpec> for WallSpec {
    type Error = Error;

    fn try_from(raw: RawWallSpec) -> Result<Self> {
        WallSpec::new(raw.corners, raw.height, raw.thickness, raw.closed)
    }
}

impl WallSpec {
    /// Validate and build a spec from counter-clockwise corners
    ///
    /// Zero-length segments would feed NaN into the miter math, so coincident
    /// neighbours (including last → first on closed walls) are rejected.
    pub fn new(corners: Vec<Vec2>, height: f32, thickness: f32, closed: bool) -> Result<Self> {
        check_dimension("height", height)?;
        check_dimension("thickness", thickness)?;

        // A closed ring needs a real polygon, two corners fold onto themselves
        let min_corners = if closed { 3 } else { 2 };
        if corners.len() < min_corners {
            return Err(Error::TooFewCorners {
                count: corners.len(),
            });
        }
        if let Some(index) = corners.iter().position(|c| !c.is_finite()) {
            return Err(Error::NonFiniteCorner { index });
        }

        let n = corners.len();
        let segments = if closed { n } else { n - 1 };
        for i in 0..segments {
            if corners[i] == corners[(i + 1) % n] {
                return Err(Error::CoincidentCorners { index: i });
            }
        }

        Ok(Self {
            corners,
            height,
            thickness,
            closed,
        })
    }

    pub fn corners(&self) -> &[Vec2] {
        &self.corners
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn thickness(&self) -> f32 {
        self.thickness
    }

    pub fn closed(&self) -> bool {
        self.closed
    }

    pub fn build(&self) -> WallMesh {
        build_wall_mesh(self)
    }
}

fn check_dimension(name: &'static str, value: f32) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidDimension { name, value })
    }
}

/// Offset corners of the outer face
pub fn outer_corners(corners: &[Vec2], thickness: f32, closed: bool) -> Vec<Vec2> {
    let n = corners.len();

    (0..n)
        .map(|i| {
            let current = corners[i];
            let next = corners[(i + 1) % n];
            let prev = corners[(n + i - 1) % n];

            let mut curr_dir = next - current;
            let mut prev_dir = current - prev;

            // Open ends keep a plain perpendicular offset
            if !closed && i == 0 {
                prev_dir = curr_dir;
            }
            if !closed && i == n - 1 {
                curr_dir = prev_dir;
            }

            let prev_dir = prev_dir.normalize();
            let curr_dir = curr_dir.normalize();

            let angle_between = prev_dir.dot(curr_dir).clamp(-1.0, 1.0).acos();
            let normal = Vec2::new(prev_dir.y, -prev_dir.x).normalize();

            // Vertical component of (prev, 0) × (curr, 0) lifted to x/z
            let turn = prev_dir.y * curr_dir.x - prev_dir.x * curr_dir.y;

            let tan_half = ((PI - angle_between) / 2.0).tan();
            let c_side = if tan_half == 0.0 {
                0.0
            } else {
                thickness / tan_half
            };
            let extension = prev_dir * (-sign(turn) * c_side);

            current + normal * thickness + extension
        })
        .collect()
}

/// Accumulated `u` per corner in wall-height units
fn accumulated_u(corners: &[Vec2], height: f32) -> Vec<f32> {
    let mut u = 0.0;
    let mut out = Vec::with_capacity(corners.len());
    out.push(u);
    for pair in corners.windows(2) {
        u += (pair[1] - pair[0]).length() / height;
        out.push(u);
    }
    out
}

/// Bottom ring then top ring texture coordinates
fn ring_uvs(u: &[f32]) -> impl Iterator<Item = Vec2> + '_ {
    let bottom = u.iter().map(|&u| Vec2::new(u, 0.0));
    let top = u.iter().map(|&u| Vec2::new(u, 1.0));
    bottom.chain(top)
}

/// Triangulate the quads between two rings of `count` vertices
fn push_strip(
    indices: &mut Vec<u32>,
    count: usize,
    closed: bool,
    clockwise: bool,
    side_one: usize,
    side_two: usize,
) {
    let one = |i: usize| (side_one + i % count) as u32;
    let two = |i: usize| (side_two + i % count) as u32;
    let plates = if closed { count } else { count - 1 };

    for i in 0..plates {
        if clockwise {
            indices.extend_from_slice(&[one(i), two(i), one(i + 1)]);
            indices.extend_from_slice(&[two(i), two(i + 1), one(i + 1)]);
        } else {
            indices.extend_from_slice(&[one(i), one(i + 1), two(i)]);
            indices.extend_from_slice(&[two(i), one(i + 1), two(i + 1)]);
        }
    }
}

/// Build the wall solid described by `spec`
pub fn build_wall_mesh(spec: &WallSpec) -> WallMesh {
    let corners = spec.corners();
    let n = corners.len();
    let height = spec.height();
    let thickness = spec.thickness();
    let closed = spec.closed();

    let outer = outer_corners(corners, thickness, closed);

    let inner_bottom = 0;
    let inner_top = n;
    let outer_bottom = 2 * n;
    let outer_top = 3 * n;

    let mut positions: Vec<Vec3> = Vec::with_capacity(4 * n + 4);
    positions.extend(corners.iter().map(|&c| ground_point(c, 0.0)));
    positions.extend(corners.iter().map(|&c| ground_point(c, height)));
    positions.extend(outer.iter().map(|&c| ground_point(c, 0.0)));
    positions.extend(outer.iter().map(|&c| ground_point(c, height)));

    let plates = if closed { n } else { n - 1 };
    let mut indices = Vec::with_capacity(4 * plates * 6 + 12);
    push_strip(&mut indices, n, closed, true, inner_bottom, inner_top);
    push_strip(&mut indices, n, closed, false, outer_bottom, outer_top);
    push_strip(&mut indices, n, closed, true, inner_top, outer_top);
    push_strip(&mut indices, n, closed, false, inner_bottom, outer_bottom);

    let inner_u = accumulated_u(corners, height);
    let outer_u = accumulated_u(&outer, height);

    let mut uvs: Vec<Vec2> = Vec::with_capacity(4 * n + 4);
    uvs.extend(ring_uvs(&inner_u));
    uvs.extend(ring_uvs(&outer_u));

    if !closed {
        // Duplicated outer corners keep the end textures from smearing
        let relative_thickness = thickness / height;
        let mut push_vertex = |corner: Vec2, y: f32, uv: Vec2| {
            positions.push(ground_point(corner, y));
            uvs.push(uv);
            (positions.len() - 1) as u32
        };

        let start_u = -relative_thickness;
        let start_top = push_vertex(outer[0], height, Vec2::new(start_u, 1.0));
        let start_bottom = push_vertex(outer[0], 0.0, Vec2::new(start_u, 0.0));

        let end_u = inner_u[n - 1] + relative_thickness;
        let end_top = push_vertex(outer[n - 1], height, Vec2::new(end_u, 1.0));
        let end_bottom = push_vertex(outer[n - 1], 0.0, Vec2::new(end_u, 0.0));

        let first_bottom = inner_bottom as u32;
        let first_top = inner_top as u32;
        let last_bottom = (inner_bottom + n - 1) as u32;
        let last_top = (inner_top + n - 1) as u32;

        indices.extend_from_slice(&[first_bottom, start_bottom, start_top]);
        indices.extend_from_slice(&[first_bottom, start_top, first_top]);
        indices.extend_from_slice(&[last_bottom, last_top, end_bottom]);
        indices.extend_from_slice(&[end_bottom, last_top, end_top]);
    }

    log::debug!(
        "Wall mesh: {} corners, closed={}, {} vertices, {} triangles",
        n,
        closed,
        positions.len(),
        indices.len() / 3
    );

    WallMesh::from_parts(positions, indices, uvs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::f32::consts::SQRT_2;

    fn square(closed: bool) -> WallSpec {
        let corners = vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(10.0, 10.0),
            Vec2::new(0.0, 10.0),
        ];
        WallSpec::new(corners, 3.0, 0.5, closed).unwrap()
    }

    #[test]
    fn test_closed_room_scenario() {
        let mesh = square(true).build();
        assert_eq!(mesh.vertex_count(), 16);
        assert_eq!(mesh.normals.len(), 16);
        assert_eq!(mesh.uvs.len(), 16);
        assert_eq!(mesh.triangle_count(), 4 * 4 * 2);
        assert!(mesh.is_consistent());
        assert!(mesh.is_watertight());
        assert_eq!(mesh.boundary_edge_count(), 0);
        // (11 × 11 − 10 × 10) × 3
        assert!((mesh.signed_volume() - 63.0).abs() < 1e-3);
    }

    #[test]
    fn test_convex_miter_distance() {
        let spec = square(true);
        let outer = outer_corners(spec.corners(), spec.thickness(), true);
        let inner = spec.corners()[1];
        assert!((outer[1].distance(inner) - 0.5 * SQRT_2).abs() < 1e-5);
        // Along the external bisector
        let bisector = Vec2::new(1.0, -1.0).normalize();
        assert!((outer[1] - inner).normalize().dot(bisector) > 0.9999);
    }

    #[test]
    fn test_concave_corner_pulls_back() {
        // L-shaped room, corner (5, 5) turns right
        let corners = vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(10.0, 5.0),
            Vec2::new(5.0, 5.0),
            Vec2::new(5.0, 10.0),
            Vec2::new(0.0, 10.0),
        ];
        let spec = WallSpec::new(corners, 3.0, 0.5, true).unwrap();
        let outer = outer_corners(spec.corners(), 0.5, true);
        assert!(outer[3].distance(Vec2::new(5.5, 5.5)) < 1e-5);

        let mesh = spec.build();
        assert!(mesh.is_watertight());
        assert!(mesh.signed_volume() > 0.0);
    }

    #[test]
    fn test_open_wall_end_caps() {
        let spec = WallSpec::new(vec![Vec2::ZERO, Vec2::new(10.0, 0.0)], 3.0, 0.5, false).unwrap();
        let mesh = spec.build();
        assert_eq!(mesh.vertex_count(), 4 * 2 + 4);
        assert_eq!(mesh.triangle_count(), 4 * 2 + 4);
        // End caps seal the solid once duplicates are welded
        assert_eq!(mesh.boundary_edge_count(), 0);
        assert!((mesh.signed_volume() - 15.0).abs() < 1e-3);
        // Straight wall: perpendicular offset only
        assert!(mesh.positions[4].distance(Vec3::new(0.0, 0.0, -0.5)) < 1e-5);
    }

    #[test]
    fn test_open_wall_boundary_only_at_ends() {
        let corners = vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(4.0, 0.0),
            Vec2::new(6.0, 3.0),
            Vec2::new(9.0, 3.0),
        ];
        let n = corners.len() as u32;
        let mesh = WallSpec::new(corners, 2.0, 0.3, false).unwrap().build();

        // Without welding, only edges touching an end corner or a cap vertex are open
        let is_end = |i: u32| i >= 4 * n || i % n == 0 || i % n == n - 1;
        let mut counts = std::collections::HashMap::new();
        for [a, b, c] in mesh.triangles() {
            for (u, v) in [(a, b), (b, c), (c, a)] {
                *counts.entry((u.min(v), u.max(v))).or_insert(0) += 1;
            }
        }
        let open: Vec<_> = counts.iter().filter(|(_, c)| **c == 1).map(|(e, _)| *e).collect();
        assert!(!open.is_empty());
        assert!(open.iter().all(|&(u, v)| is_end(u) && is_end(v)));
    }

    #[test]
    fn test_open_loop_matches_closed_volume() {
        // Seam in the middle of the bottom edge so the ends meet straight
        let open = WallSpec::new(
            vec![
                Vec2::new(5.0, 0.0),
                Vec2::new(10.0, 0.0),
                Vec2::new(10.0, 10.0),
                Vec2::new(0.0, 10.0),
                Vec2::new(0.0, 0.0),
                Vec2::new(5.0, 0.0),
            ],
            3.0,
            0.5,
            false,
        )
        .unwrap()
        .build();
        let closed = WallSpec::new(
            vec![
                Vec2::new(5.0, 0.0),
                Vec2::new(10.0, 0.0),
                Vec2::new(10.0, 10.0),
                Vec2::new(0.0, 10.0),
                Vec2::new(0.0, 0.0),
            ],
            3.0,
            0.5,
            true,
        )
        .unwrap()
        .build();

        assert!((open.signed_volume() - closed.signed_volume()).abs() < 1e-3);
        assert_eq!(open.vertex_count(), closed.vertex_count() + 4 + 4);
        assert_eq!(open.triangle_count(), closed.triangle_count() + 4);
    }

    #[test]
    fn test_uv_accumulates_in_height_units() {
        let mesh = square(false).build();
        let n = 4;
        // Inner bottom ring
        assert_eq!(mesh.uvs[0], Vec2::new(0.0, 0.0));
        assert!((mesh.uvs[1].x - 10.0 / 3.0).abs() < 1e-5);
        assert!((mesh.uvs[3].x - 30.0 / 3.0).abs() < 1e-5);
        // Inner top ring mirrors it at v = 1
        assert_eq!(mesh.uvs[n + 3], Vec2::new(mesh.uvs[3].x, 1.0));
        // Outer ring accumulates its own (longer) lengths
        assert!(mesh.uvs[2 * n + 3].x > mesh.uvs[3].x);
        // End-cap duplicates nudge u by thickness / height
        let rel = 0.5 / 3.0;
        assert!((mesh.uvs[4 * n].x + rel).abs() < 1e-5);
        assert!((mesh.uvs[4 * n + 2].x - (10.0 + rel)).abs() < 1e-5);
    }

    #[test]
    fn test_winding_picks_offset_side() {
        let data = [0.0, 0.0, 10.0, 0.0, 10.0, 10.0, 0.0, 10.0];

        let right = Wall::from_flat(&data, Winding::Right).unwrap();
        let mesh = right.spec(3.0, 0.5, true).unwrap().build();
        assert!((mesh.signed_volume() - 63.0).abs() < 1e-3);

        // Reversed corners put the thickness inside the room
        let left = Wall::from_flat(&data, Winding::Left).unwrap();
        assert_eq!(left.corners[0], Vec2::new(0.0, 10.0));
        let mesh = left.spec(3.0, 0.5, true).unwrap().build();
        assert!((mesh.signed_volume() - 57.0).abs() < 1e-3);
    }

    #[test]
    fn test_rejects_malformed_corner_data() {
        assert!(matches!(
            Wall::from_flat(&[0.0, 1.0, 2.0], Winding::Right),
            Err(Error::OddCoordinateCount { len: 3 })
        ));
        let one = Wall::from_flat(&[0.0, 1.0], Winding::Right).unwrap();
        assert!(matches!(
            one.spec(3.0, 0.5, false),
            Err(Error::TooFewCorners { count: 1 })
        ));
    }

    #[test]
    fn test_rejects_degenerate_geometry() {
        let dup = vec![Vec2::ZERO, Vec2::ZERO, Vec2::X];
        assert!(matches!(
            WallSpec::new(dup, 3.0, 0.5, false),
            Err(Error::CoincidentCorners { index: 0 })
        ));

        // Closing segment is checked too
        let looped = vec![Vec2::ZERO, Vec2::X, Vec2::ZERO];
        assert!(WallSpec::new(looped.clone(), 3.0, 0.5, false).is_ok());
        assert!(matches!(
            WallSpec::new(looped, 3.0, 0.5, true),
            Err(Error::CoincidentCorners { index: 2 })
        ));

        assert!(matches!(
            WallSpec::new(vec![Vec2::ZERO, Vec2::X], 0.0, 0.5, false),
            Err(Error::InvalidDimension { name: "height", .. })
        ));
        assert!(matches!(
            WallSpec::new(vec![Vec2::ZERO, Vec2::X], 3.0, -1.0, false),
            Err(Error::InvalidDimension { name: "thickness", .. })
        ));
        assert!(matches!(
            WallSpec::new(vec![Vec2::ZERO, Vec2::new(f32::NAN, 0.0)], 3.0, 0.5, false),
            Err(Error::NonFiniteCorner { index: 1 })
        ));
    }

    #[test]
    fn test_closed_wall_needs_three_corners() {
        let pair = vec![Vec2::ZERO, Vec2::new(4.0, 0.0)];
        assert!(WallSpec::new(pair.clone(), 3.0, 0.5, false).is_ok());
        assert!(matches!(
            WallSpec::new(pair, 3.0, 0.5, true),
            Err(Error::TooFewCorners { count: 2 })
        ));
    }

    #[test]
    fn test_deserialize_validates() {
        let empty = r#"{"corners":[],"height":3.0,"thickness":0.5,"closed":false}"#;
        assert!(serde_json::from_str::<WallSpec>(empty).is_err());
        let single = r#"{"corners":[[0.0,0.0]],"height":3.0,"thickness":0.5,"closed":false}"#;
        assert!(serde_json::from_str::<WallSpec>(single).is_err());
        let flat = r#"{"corners":[[0.0,0.0],[4.0,0.0]],"height":0.0,"thickness":0.5,"closed":false}"#;
        assert!(serde_json::from_str::<WallSpec>(flat).is_err());

        let spec = square(true);
        let json = serde_json::to_string(&spec).unwrap();
        assert_eq!(serde_json::from_str::<WallSpec>(&json).unwrap(), spec);
    }

    /// Counter-clockwise regular polygon
    fn polygon(sides: usize, radius: f32, phase: f32) -> Vec<Vec2> {
        (0..sides)
            .map(|i| {
                let theta = phase + i as f32 / sides as f32 * std::f32::consts::TAU;
                Vec2::new(radius * theta.cos(), radius * theta.sin())
            })
            .collect()
    }

    proptest! {
        #[test]
        fn prop_closed_polygon_is_watertight(
            sides in 3usize..12,
            radius in 2.0f32..20.0,
            phase in 0.0f32..6.0,
            height in 0.5f32..6.0,
            thickness in 0.05f32..0.5,
        ) {
            let corners = polygon(sides, radius, phase);
            let mesh = WallSpec::new(corners, height, thickness, true).unwrap().build();

            prop_assert_eq!(mesh.vertex_count(), 4 * sides);
            prop_assert!(mesh.is_consistent());
            prop_assert!(mesh.is_watertight());
            prop_assert!(mesh.signed_volume() > 0.0);
            for n in &mesh.normals {
                prop_assert!((n.length() - 1.0).abs() < 1e-3);
            }
        }

        #[test]
        fn prop_open_polyline_is_sealed(
            steps in prop::collection::vec((1.0f32..5.0, -4.0f32..4.0), 1..8),
            height in 0.5f32..6.0,
            thickness in 0.05f32..0.5,
        ) {
            let mut corners = vec![Vec2::ZERO];
            for (dx, dz) in &steps {
                let last = corners[corners.len() - 1];
                corners.push(last + Vec2::new(*dx, *dz));
            }
            let n = corners.len();
            let mesh = WallSpec::new(corners, height, thickness, false).unwrap().build();

            prop_assert_eq!(mesh.vertex_count(), 4 * n + 4);
            prop_assert_eq!(mesh.triangle_count(), 8 * (n - 1) + 4);
            prop_assert!(mesh.is_consistent());
            prop_assert_eq!(mesh.boundary_edge_count(), 0);
            for n in &mesh.normals {
                prop_assert!((n.length() - 1.0).abs() < 1e-3);
            }
        }
    }
}
