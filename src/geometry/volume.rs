//! Collision volumes and room triggers
//!
//! Pickups overlap-test against the player with world-space bounds: boxes
//! are turned into axis-aligned boxes after rotation (the same coarse test a
//! scene engine runs on bounding boxes), spheres stay spheres.

use glam::{Mat3, Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Axis-aligned box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self {
            min: min.min(max),
            max: min.max(max),
        }
    }

    /// Box of the given full size centred on `center`
    pub fn from_center_size(center: Vec3, size: Vec3) -> Self {
        let half = size.abs() / 2.0;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) / 2.0
    }

    pub fn half_extents(&self) -> Vec3 {
        (self.max - self.min) / 2.0
    }

    /// Point containment, boundary inclusive
    pub fn contains_point(&self, point: Vec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }

    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.cmple(other.max).all() && other.min.cmple(self.max).all()
    }

    pub fn closest_point(&self, point: Vec3) -> Vec3 {
        point.clamp(self.min, self.max)
    }

    pub fn translated(&self, offset: Vec3) -> Self {
        Self {
            min: self.min + offset,
            max: self.max + offset,
        }
    }
}

/// Local collider geometry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ColliderShape {
    Sphere { radius: f32 },
    Box { half_extents: Vec3 },
}

/// Collider attached to an entity, offset in its local space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Collider {
    pub shape: ColliderShape,
    pub offset: Vec3,
}

/// Collider resolved to world space
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WorldVolume {
    Sphere { center: Vec3, radius: f32 },
    Box(Aabb),
}

impl Collider {
    pub fn sphere(diameter: f32) -> Self {
        Self {
            shape: ColliderShape::Sphere {
                radius: diameter / 2.0,
            },
            offset: Vec3::ZERO,
        }
    }

    pub fn cuboid(width: f32, height: f32, depth: f32) -> Self {
        Self {
            shape: ColliderShape::Box {
                half_extents: Vec3::new(width, height, depth) / 2.0,
            },
            offset: Vec3::ZERO,
        }
    }

    pub fn cube(size: f32) -> Self {
        Self::cuboid(size, size, size)
    }

    /// Bounding box of a cylinder lying on its side (axis along X)
    pub fn lying_cylinder(diameter: f32, height: f32) -> Self {
        Self::cuboid(height, diameter, diameter)
    }

    pub fn with_offset(mut self, offset: Vec3) -> Self {
        self.offset = offset;
        self
    }

    /// Resolve against an entity pose
    pub fn world_volume(&self, position: Vec3, rotation: Quat, scale: Vec3) -> WorldVolume {
        let center = position + rotation * (self.offset * scale);
        match self.shape {
            ColliderShape::Sphere { radius } => WorldVolume::Sphere {
                center,
                radius: radius * scale.abs().max_element(),
            },
            ColliderShape::Box { half_extents } => {
                let half = half_extents * scale.abs();
                let m = Mat3::from_quat(rotation);
                let abs = Mat3::from_cols(m.x_axis.abs(), m.y_axis.abs(), m.z_axis.abs());
                let world_half = abs * half;
                WorldVolume::Box(Aabb {
                    min: center - world_half,
                    max: center + world_half,
                })
            }
        }
    }
}

impl WorldVolume {
    pub fn center(&self) -> Vec3 {
        match self {
            WorldVolume::Sphere { center, .. } => *center,
            WorldVolume::Box(aabb) => aabb.center(),
        }
    }

    /// Overlap test, touching counts as overlapping
    pub fn intersects(&self, other: &WorldVolume) -> bool {
        match (self, other) {
            (WorldVolume::Box(a), WorldVolume::Box(b)) => a.intersects(b),
            (
                WorldVolume::Sphere { center: a, radius: ra },
                WorldVolume::Sphere { center: b, radius: rb },
            ) => a.distance_squared(*b) <= (ra + rb) * (ra + rb),
            (WorldVolume::Sphere { center, radius }, WorldVolume::Box(aabb))
            | (WorldVolume::Box(aabb), WorldVolume::Sphere { center, radius }) => {
                aabb.closest_point(*center).distance_squared(*center) <= radius * radius
            }
        }
    }

    pub fn contains_point(&self, point: Vec3) -> bool {
        match self {
            WorldVolume::Sphere { center, radius } => {
                center.distance_squared(point) <= radius * radius
            }
            WorldVolume::Box(aabb) => aabb.contains_point(point),
        }
    }
}
