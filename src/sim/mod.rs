//! Gameplay simulation
//!
//! Frame-driven and single-threaded. Nothing here touches the renderer or
//! the browser:
//! - Pickups run a small state machine (collect, animate, reset)
//! - The player records score and death, and queues events for the UI
//! - The world advances the current room once per frame

pub mod collectable;
pub mod events;
pub mod ghost;
pub mod player;
pub mod room;
pub mod transform;
pub mod world;

pub use collectable::{Collectable, CollectableId, CollectableKind, DEFAULT_GHOST_SIZE, EntityIds};
pub use events::{EventQueue, GameEvent, SoundEffect};
pub use ghost::{Ghost, GhostPath};
pub use player::{Inventory, Player};
pub use room::{Room, RoomWall};
pub use transform::{Parent, Transform};
pub use world::World;
