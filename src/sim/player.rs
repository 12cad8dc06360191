//! The player: camera pose, score, death latch and held items

use glam::Vec3;

use super::collectable::CollectableId;
use super::events::{EventQueue, GameEvent, SoundEffect};
use super::transform::Transform;
use crate::geometry::{Collider, WorldVolume};
use crate::settings::Settings;

/// Items the player carries
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Inventory {
    /// At most one cross at a time
    pub cross: Option<CollectableId>,
    /// Crosses spent on ghosts, waiting to be hidden by the world
    consumed: Vec<CollectableId>,
}

impl Inventory {
    pub fn holds_cross(&self) -> bool {
        self.cross.is_some()
    }

    /// Spend the held cross, if any
    pub fn consume_cross(&mut self) -> Option<CollectableId> {
        let id = self.cross.take()?;
        self.consumed.push(id);
        Some(id)
    }

    pub fn drain_consumed(&mut self) -> Vec<CollectableId> {
        std::mem::take(&mut self.consumed)
    }
}

#[derive(Debug, Clone)]
pub struct Player {
    /// First-person camera; the collider sits at its origin
    pub camera: Transform,
    pub collider: Collider,
    pub inventory: Inventory,
    score: u32,
    is_killed: bool,
    has_won: bool,
    win_score: u32,
    events: EventQueue,
}

impl Player {
    pub fn new(settings: &Settings) -> Self {
        Self {
            camera: Transform::at(settings.player.spawn_point),
            collider: Collider::sphere(settings.player.collider_diameter),
            inventory: Inventory::default(),
            score: 0,
            is_killed: false,
            has_won: false,
            win_score: settings.score.win,
            events: EventQueue::new(),
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn is_killed(&self) -> bool {
        self.is_killed
    }

    pub fn has_won(&self) -> bool {
        self.has_won
    }

    pub fn position(&self) -> Vec3 {
        self.camera.position
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.camera.position = position;
    }

    pub fn collider_volume(&self) -> WorldVolume {
        self.collider
            .world_volume(self.camera.position, self.camera.quat(), self.camera.scale)
    }

    /// Add points and announce the new total; the first time the total
    /// reaches the winning score a single `Won` follows
    pub fn add_score(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
        self.events.push(GameEvent::ScoreChanged(self.score));

        if !self.has_won && self.score >= self.win_score {
            self.has_won = true;
            log::info!("Winning score reached: {}", self.score);
            self.events.push(GameEvent::Won);
        }
    }

    /// Mark the player dead; later calls do nothing
    pub fn kill(&mut self, reason: &str) {
        if self.is_killed {
            return;
        }
        self.is_killed = true;
        log::info!("Player killed: {}", reason);
        self.events.push(GameEvent::Killed(reason.to_string()));
        self.events.push(GameEvent::Sound(SoundEffect::Death));
    }

    pub fn show_message(&mut self, text: impl Into<String>) {
        self.events.push(GameEvent::Message(text.into()));
    }

    pub fn play(&mut self, sound: SoundEffect) {
        self.events.push(GameEvent::Sound(sound));
    }

    pub fn notify(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub fn events(&self) -> &EventQueue {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.events.drain()
    }

    /// Score 0, alive, empty hands, win latch cleared
    pub fn reset(&mut self) {
        self.score = 0;
        self.is_killed = false;
        self.has_won = false;
        self.inventory = Inventory::default();
    }
}
