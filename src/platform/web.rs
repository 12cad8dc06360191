//! JavaScript bindings
//!
//! The page owns the camera, renderer and timers. It pushes the camera pose
//! in, calls `tick` every frame and `poll_rooms` on its room timer, then
//! drains events and pickup poses back out.

use glam::Vec3;
use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::geometry::MeshVertex;
use crate::level::demo_level;
use crate::settings::Settings;
use crate::sim::{CollectableKind, World};

use super::events_json;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).expect("Failed to init logger");
    log::info!("Hamburger FPS starting...");
}

fn to_js(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Pickup pose handed to the renderer
#[derive(Serialize)]
struct PickupView<'a> {
    id: u32,
    kind: &'a str,
    position: [f32; 3],
    rotation: [f32; 3],
    scale: [f32; 3],
    visible: bool,
}

#[wasm_bindgen]
pub struct WebSession {
    world: World,
}

#[wasm_bindgen]
impl WebSession {
    /// Build the level with stored settings
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<WebSession, JsValue> {
        let settings = Settings::load();
        let world = demo_level(&settings).map_err(to_js)?;
        Ok(Self { world })
    }

    pub fn set_player_position(&mut self, x: f32, y: f32, z: f32) {
        self.world.player.set_position(Vec3::new(x, y, z));
    }

    pub fn set_player_rotation(&mut self, pitch: f32, yaw: f32) {
        self.world.player.camera.rotation = Vec3::new(pitch, yaw, 0.0);
    }

    pub fn tick(&mut self) {
        self.world.tick();
    }

    /// Returns true when the player entered another room
    pub fn poll_rooms(&mut self) -> bool {
        self.world.poll_room_transition()
    }

    pub fn restart(&mut self) {
        self.world.restart();
    }

    pub fn score(&self) -> u32 {
        self.world.player.score()
    }

    pub fn is_killed(&self) -> bool {
        self.world.player.is_killed()
    }

    pub fn room_poll_interval_ms(&self) -> u32 {
        self.world.settings.room_poll_interval_ms
    }

    pub fn current_room(&self) -> Option<String> {
        self.world.current_room().map(|r| r.name.clone())
    }

    pub fn drain_events_json(&mut self) -> Result<String, JsValue> {
        events_json(&self.world.drain_events()).map_err(to_js)
    }

    pub fn room_count(&self) -> usize {
        self.world.rooms.len()
    }

    pub fn wall_count(&self, room: usize) -> usize {
        self.world.rooms.get(room).map_or(0, |r| r.walls.len())
    }

    /// Interleaved position/normal/uv floats, `MeshVertex` layout
    pub fn wall_vertices(&self, room: usize, wall: usize) -> Vec<f32> {
        self.world
            .rooms
            .get(room)
            .and_then(|r| r.walls.get(wall))
            .map(|w| bytemuck::cast_slice::<MeshVertex, f32>(&w.mesh.interleaved()).to_vec())
            .unwrap_or_default()
    }

    pub fn wall_indices(&self, room: usize, wall: usize) -> Vec<u32> {
        self.world
            .rooms
            .get(room)
            .and_then(|r| r.walls.get(wall))
            .map(|w| w.mesh.indices.clone())
            .unwrap_or_default()
    }

    /// Poses of every pickup in the current room
    pub fn pickups_json(&self) -> Result<String, JsValue> {
        let anchor = &self.world.player.camera;
        let views: Vec<PickupView> = self
            .world
            .current_room()
            .map(|r| r.collectables.as_slice())
            .unwrap_or_default()
            .iter()
            .map(|c| PickupView {
                id: c.id().0,
                kind: match c.kind {
                    CollectableKind::Coin { .. } => "coin",
                    CollectableKind::Cross => "cross",
                    CollectableKind::Ghost(_) => "ghost",
                    CollectableKind::Resource { .. } => "resource",
                },
                position: c.transform.world_position(anchor).to_array(),
                rotation: c.transform.rotation.to_array(),
                scale: c.transform.scale.to_array(),
                visible: c.transform.visible,
            })
            .collect();
        serde_json::to_string(&views).map_err(to_js)
    }

    /// Persist the current tuning
    pub fn save_settings(&self) {
        self.world.settings.save();
    }
}
