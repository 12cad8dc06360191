//! Notifications from the simulation to the UI layer
//!
//! The simulation never calls into the UI. It pushes events into a queue
//! that the host drains once per frame.

use serde::{Deserialize, Serialize};

/// Audio cues, resolved to files by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundEffect {
    Pickup,
    Blessing,
    Banish,
    Death,
}

/// Events emitted by the simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "detail")]
pub enum GameEvent {
    /// New total score
    ScoreChanged(u32),
    /// Player died, with the reason shown to them
    Killed(String),
    /// Short on-screen message
    Message(String),
    /// Winning score reached (once per run)
    Won,
    Sound(SoundEffect),
    RoomChanged {
        room: String,
        previous: Option<String>,
    },
}

/// FIFO of pending events
#[derive(Debug, Clone, Default)]
pub struct EventQueue {
    events: Vec<GameEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: GameEvent) {
        log::debug!("event: {:?}", event);
        self.events.push(event);
    }

    /// Take every pending event, oldest first
    pub fn drain(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn iter(&self) -> impl Iterator<Item = &GameEvent> {
        self.events.iter()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}
