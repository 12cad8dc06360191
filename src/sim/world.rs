//! Per-frame world driver
//!
//! Owns the rooms and the player. The host calls [`World::tick`] once per
//! rendered frame and [`World::poll_room_transition`] from a slower timer.

use std::collections::HashSet;

use super::collectable::{Collectable, CollectableId, EntityIds};
use super::events::GameEvent;
use super::player::Player;
use super::room::Room;
use crate::materials::{MaterialCache, MaterialKey};
use crate::settings::Settings;

#[derive(Debug, Clone)]
pub struct World {
    pub settings: Settings,
    pub rooms: Vec<Room>,
    pub player: Player,
    pub materials: MaterialCache,
    pub ids: EntityIds,
    current_room: Option<usize>,
    /// Frames since start
    pub time_ticks: u64,
}

impl World {
    pub fn new(settings: Settings) -> Self {
        let player = Player::new(&settings);
        Self {
            settings,
            rooms: Vec::new(),
            player,
            materials: MaterialCache::standard(),
            ids: EntityIds::default(),
            current_room: None,
            time_ticks: 0,
        }
    }

    pub fn add_room(&mut self, room: Room) -> usize {
        log::debug!("Adding room {} at {}", room.name, room.origin);
        self.rooms.push(room);
        self.rooms.len() - 1
    }

    pub fn current_room(&self) -> Option<&Room> {
        self.current_room.map(|i| &self.rooms[i])
    }

    pub fn room(&self, name: &str) -> Option<&Room> {
        self.rooms.iter().find(|r| r.name == name)
    }

    pub fn collectable(&self, id: CollectableId) -> Option<&Collectable> {
        self.rooms.iter().find_map(|r| r.collectable(id))
    }

    pub fn collectable_mut(&mut self, id: CollectableId) -> Option<&mut Collectable> {
        self.rooms.iter_mut().find_map(|r| r.collectable_mut(id))
    }

    /// Advance one frame: collect then animate every pickup of the current room
    pub fn tick(&mut self) {
        self.time_ticks += 1;

        if let Some(index) = self.current_room {
            let room = &mut self.rooms[index];
            for collectable in room.collectables.iter_mut() {
                collectable.try_collect(&mut self.player, &self.settings.score);
                collectable.update_animation(&self.settings.animation);
            }
        }

        // Crosses spent on ghosts may live in any room
        for id in self.player.inventory.drain_consumed() {
            match self.collectable_mut(id) {
                Some(cross) => cross.finish(),
                None => log::warn!("Consumed cross {:?} not found", id),
            }
        }
    }

    /// Make the first other room whose trigger holds the player current.
    /// Returns whether the room changed.
    pub fn poll_room_transition(&mut self) -> bool {
        let position = self.player.position();
        let entered = self
            .rooms
            .iter()
            .enumerate()
            .find(|(i, room)| Some(*i) != self.current_room && room.contains_point(position))
            .map(|(i, _)| i);

        let Some(index) = entered else {
            return false;
        };

        let previous = self.current_room().map(|r| r.name.clone());
        let room = self.rooms[index].name.clone();
        log::info!("Entered room {} (from {:?})", room, previous);
        self.current_room = Some(index);
        self.player.notify(GameEvent::RoomChanged { room, previous });
        true
    }

    /// Start over: fresh player at the spawn point, every pickup back in place
    pub fn restart(&mut self) {
        log::info!("Restarting");
        self.player.reset();
        self.player.set_position(self.settings.player.spawn_point);
        self.rooms.iter_mut().for_each(Room::reset_collectables);
        self.current_room = None;
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.player.drain_events()
    }

    /// Material keys used in the level but absent from the cache
    pub fn missing_materials(&self) -> Vec<MaterialKey> {
        let mut seen = HashSet::new();
        self.rooms
            .iter()
            .flat_map(|r| {
                r.walls
                    .iter()
                    .map(|w| &w.material)
                    .chain(r.collectables.iter().map(|c| &c.material))
            })
            .filter(|key| !self.materials.contains(key) && seen.insert(*key))
            .cloned()
            .collect()
    }
}
