//! Rooms: walls, pickups and the trigger box that marks the player as inside
//!
//! Wall meshes stay in room-local coordinates (the renderer places them at
//! `origin`). Pickup positions are given room-local and stored in world
//! space, since they collide against the player directly.

use glam::Vec3;

use super::collectable::{Collectable, CollectableId, EntityIds};
use super::ghost::Ghost;
use crate::error::Result;
use crate::geometry::{Aabb, Wall, WallMesh, WallSpec, Winding};
use crate::materials::MaterialKey;
use crate::settings::WallSettings;

#[derive(Debug, Clone)]
pub struct RoomWall {
    pub mesh: WallMesh,
    pub material: MaterialKey,
}

#[derive(Debug, Clone)]
pub struct Room {
    pub name: String,
    pub origin: Vec3,
    pub walls: Vec<RoomWall>,
    pub collectables: Vec<Collectable>,
    /// World-space trigger; rooms without one are never entered
    pub trigger: Option<Aabb>,
}

impl Room {
    pub fn new(name: &str, origin: Vec3) -> Self {
        Self {
            name: name.to_string(),
            origin,
            walls: Vec::new(),
            collectables: Vec::new(),
            trigger: None,
        }
    }

    /// Trigger box given by room-local centre and full size
    pub fn with_trigger(mut self, center: Vec3, size: Vec3) -> Self {
        self.trigger = Some(Aabb::from_center_size(self.origin + center, size));
        self
    }

    pub fn contains_point(&self, point: Vec3) -> bool {
        self.trigger.is_some_and(|t| t.contains_point(point))
    }

    /// Build a wall from a validated spec
    pub fn add_wall_spec(&mut self, spec: &WallSpec, material: MaterialKey) -> &WallMesh {
        let mesh = spec.build();
        log::debug!(
            "Room {}: wall with {} vertices, {} triangles",
            self.name,
            mesh.vertex_count(),
            mesh.triangle_count()
        );
        self.walls.push(RoomWall { mesh, material });
        &self.walls[self.walls.len() - 1].mesh
    }

    /// Build a wall from flat `[x1, z1, x2, z2, ...]` corner data
    pub fn add_wall(
        &mut self,
        corners: &[f32],
        winding: Winding,
        dims: &WallSettings,
        closed: bool,
        material: MaterialKey,
    ) -> Result<&WallMesh> {
        let spec = Wall::from_flat(corners, winding)?.spec(dims.height, dims.thickness, closed)?;
        Ok(self.add_wall_spec(&spec, material))
    }

    pub fn add_coin(&mut self, ids: &mut EntityIds, local: Vec3) -> CollectableId {
        self.push(Collectable::coin(ids.next_id(), self.origin + local, 1.0))
    }

    pub fn add_cross(&mut self, ids: &mut EntityIds, local: Vec3) -> CollectableId {
        self.push(Collectable::cross(ids.next_id(), self.origin + local))
    }

    /// Ghost patrolling `track` (room-local waypoints)
    pub fn add_ghost(
        &mut self,
        ids: &mut EntityIds,
        size: f32,
        track: &[Vec3],
        speed: f32,
        rotation: Option<Vec3>,
    ) -> Result<CollectableId> {
        let track = track.iter().map(|p| self.origin + *p).collect();
        let ghost = Ghost::new(size, track, speed, rotation)?;
        Ok(self.push(Collectable::ghost(ids.next_id(), ghost)))
    }

    pub fn add_resource(&mut self, ids: &mut EntityIds, name: &str, local: Vec3) -> CollectableId {
        self.push(Collectable::resource(ids.next_id(), name, self.origin + local))
    }

    fn push(&mut self, collectable: Collectable) -> CollectableId {
        let id = collectable.id();
        self.collectables.push(collectable);
        id
    }

    pub fn collectable(&self, id: CollectableId) -> Option<&Collectable> {
        self.collectables.iter().find(|c| c.id() == id)
    }

    pub fn collectable_mut(&mut self, id: CollectableId) -> Option<&mut Collectable> {
        self.collectables.iter_mut().find(|c| c.id() == id)
    }

    pub fn reset_collectables(&mut self) {
        self.collectables.iter_mut().for_each(Collectable::reset);
    }
}
