//! Entity poses
//!
//! A minimal stand-in for a scene node: pose, optional attachment to the
//! player, and the enabled/visible flags the renderer reads.

use glam::{EulerRot, Quat, Vec3};
use serde::{Deserialize, Serialize};

/// What a transform is positioned relative to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Parent {
    #[default]
    World,
    /// Attached to the player's collider; follows the camera
    Player,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    /// Euler angles in radians (pitch, yaw, roll)
    pub rotation: Vec3,
    pub scale: Vec3,
    pub parent: Parent,
    pub enabled: bool,
    pub visible: bool,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
            parent: Parent::World,
            enabled: true,
            visible: true,
        }
    }
}

impl Transform {
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }

    /// Rotation as a quaternion, yaw applied first then pitch then roll
    pub fn quat(&self) -> Quat {
        Quat::from_euler(EulerRot::YXZ, self.rotation.y, self.rotation.x, self.rotation.z)
    }

    /// World-space position given the pose of the player anchor
    pub fn world_position(&self, anchor: &Transform) -> Vec3 {
        match self.parent {
            Parent::World => self.position,
            Parent::Player => anchor.position + anchor.quat() * (self.position * anchor.scale),
        }
    }

    /// Hidden and excluded from collision
    pub fn hide(&mut self) {
        self.visible = false;
        self.enabled = false;
    }
}
