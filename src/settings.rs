//! Game tuning
//!
//! Wall defaults, score rewards and animation constants. Persisted in
//! LocalStorage on the web build; natively the defaults are used.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::Result;

/// Wall construction defaults
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WallSettings {
    pub height: f32,
    pub thickness: f32,
}

impl Default for WallSettings {
    fn default() -> Self {
        Self {
            height: WALL_HEIGHT,
            thickness: WALL_THICKNESS,
        }
    }
}

/// Points awarded per pickup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreSettings {
    pub coin: u32,
    pub cross: u32,
    pub ghost_bounty: u32,
    pub resource: u32,
    /// Reaching this score fires the win notification (once)
    pub win: u32,
}

impl Default for ScoreSettings {
    fn default() -> Self {
        Self {
            coin: COIN_SCORE,
            cross: CROSS_SCORE,
            ghost_bounty: GHOST_BOUNTY,
            resource: RESOURCE_SCORE,
            win: WIN_SCORE,
        }
    }
}

/// Per-tick animation steps
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationSettings {
    /// Idle spin around Y (radians per tick)
    pub spin_step: f32,
    /// Scale multiplier while flying away
    pub shrink_factor: f32,
    /// Distance per tick along the knockback direction
    pub knockback_step: f32,
    /// Vertical part of the knockback direction
    pub knockback_lift: f32,
    /// Scale at which the fly-away finishes
    pub min_scale: f32,
}

impl Default for AnimationSettings {
    fn default() -> Self {
        Self {
            spin_step: SPIN_STEP,
            shrink_factor: SHRINK_FACTOR,
            knockback_step: KNOCKBACK_STEP,
            knockback_lift: KNOCKBACK_LIFT,
            min_scale: MIN_SCALE,
        }
    }
}

/// Player body
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerSettings {
    pub collider_diameter: f32,
    pub spawn_point: Vec3,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            collider_diameter: PLAYER_COLLIDER_DIAMETER,
            spawn_point: Vec3::new(0.0, 1.6, 32.0),
        }
    }
}

/// All tunables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub wall: WallSettings,
    pub score: ScoreSettings,
    pub animation: AnimationSettings,
    pub player: PlayerSettings,
    /// Period of the room trigger poll (ms), driven by the host timer
    pub room_poll_interval_ms: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            wall: WallSettings::default(),
            score: ScoreSettings::default(),
            animation: AnimationSettings::default(),
            player: PlayerSettings::default(),
            room_poll_interval_ms: ROOM_POLL_INTERVAL_MS,
        }
    }
}

impl Settings {
    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "hamburger_fps_settings";

    /// Parse settings; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Built-in tuning
    pub fn standard() -> Self {
        Self::default()
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(err) => log::warn!("Ignoring stored settings: {}", err),
                }
            }
        }

        log::info!("Using default settings");
        Self::standard()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = self.to_json() {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::standard()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}
