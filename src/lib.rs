//! Hamburger FPS - first-person exploration game core
//!
//! Core modules:
//! - `geometry`: Wall mesh builder, mesh buffers, colliders and trigger volumes
//! - `sim`: Pickups, player, rooms and the per-frame world driver
//! - `materials`: Shared material descriptors keyed by pickup/wall kind
//! - `level`: Built-in room layout
//! - `platform`: Browser bindings
//! - `settings`: Data-driven tuning

pub mod error;
pub mod geometry;
pub mod level;
pub mod materials;
pub mod platform;
pub mod settings;
pub mod sim;

pub use error::{Error, Result};
pub use settings::Settings;

use glam::{Vec2, Vec3};

/// Game configuration constants
pub mod consts {
    /// Default wall height (world units)
    pub const WALL_HEIGHT: f32 = 3.5;
    /// Default wall thickness (a fifth of the height)
    pub const WALL_THICKNESS: f32 = WALL_HEIGHT / 5.0;

    /// Score rewards
    pub const COIN_SCORE: u32 = 100;
    pub const CROSS_SCORE: u32 = 250;
    pub const GHOST_BOUNTY: u32 = 2500;
    pub const RESOURCE_SCORE: u32 = 22;
    /// Score at which the run counts as won
    pub const WIN_SCORE: u32 = 9999;

    /// Idle spin per tick (radians)
    pub const SPIN_STEP: f32 = 0.04;
    /// Scale multiplier per tick while a pickup flies away
    pub const SHRINK_FACTOR: f32 = 0.8;
    /// Distance moved along the knockback direction per tick
    pub const KNOCKBACK_STEP: f32 = 0.3;
    /// Vertical component of the knockback direction
    pub const KNOCKBACK_LIFT: f32 = 0.3;
    /// Below this scale the fly-away animation is done
    pub const MIN_SCALE: f32 = 0.05;

    /// Player collision sphere diameter
    pub const PLAYER_COLLIDER_DIAMETER: f32 = 2.5;
    /// Room trigger polling period for the external timer (ms)
    pub const ROOM_POLL_INTERVAL_MS: u32 = 250;
}

/// Sign with `sign(0) == 0`, unlike [`f32::signum`]
#[inline]
pub fn sign(value: f32) -> f32 {
    if value > 0.0 {
        1.0
    } else if value < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Lift a floor-plan point onto the ground plane (`y` becomes `z`)
#[inline]
pub fn ground_point(corner: Vec2, height: f32) -> Vec3 {
    Vec3::new(corner.x, height, corner.y)
}

/// Euler rotation (pitch, yaw, 0) that makes +Z face from `from` towards `to`
pub fn look_rotation(from: Vec3, to: Vec3) -> Vec3 {
    let dir = to - from;
    let horizontal = Vec2::new(dir.x, dir.z).length();
    let yaw = dir.x.atan2(dir.z);
    let pitch = -dir.y.atan2(horizontal);
    Vec3::new(pitch, yaw, 0.0)
}
