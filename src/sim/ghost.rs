//! Ghost patrol path
//!
//! A ghost walks a closed loop of waypoints in fixed steps. Each segment is
//! split into `ceil(length / speed)` steps; at the end of a segment the
//! ghost turns to face the next waypoint.

use glam::Vec3;

use super::transform::Transform;
use crate::error::{Error, Result};
use crate::look_rotation;

#[derive(Debug, Clone, PartialEq)]
pub struct GhostPath {
    track: Vec<Vec3>,
    speed: f32,
    path_index: usize,
    current_step: u32,
    step_count: u32,
}

impl GhostPath {
    /// Loop through `track` (at least two waypoints) moving `speed` units per tick
    pub fn new(track: Vec<Vec3>, speed: f32) -> Result<Self> {
        if track.len() < 2 {
            return Err(Error::InvalidPath {
                reason: format!("needs at least 2 waypoints, got {}", track.len()),
            });
        }
        if !(speed.is_finite() && speed > 0.0) {
            return Err(Error::InvalidPath {
                reason: format!("speed must be positive, got {}", speed),
            });
        }
        if track.iter().any(|p| !p.is_finite()) {
            return Err(Error::InvalidPath {
                reason: "waypoints must be finite".to_string(),
            });
        }

        let mut path = Self {
            track,
            speed,
            path_index: 0,
            current_step: 0,
            step_count: 1,
        };
        path.update_motion_points();
        Ok(path)
    }

    pub fn track(&self) -> &[Vec3] {
        &self.track
    }

    pub fn start(&self) -> Vec3 {
        self.track[0]
    }

    pub fn from(&self) -> Vec3 {
        self.track[self.path_index]
    }

    pub fn to(&self) -> Vec3 {
        self.track[(self.path_index + 1) % self.track.len()]
    }

    pub fn path_index(&self) -> usize {
        self.path_index
    }

    pub fn current_step(&self) -> u32 {
        self.current_step
    }

    pub fn step_count(&self) -> u32 {
        self.step_count
    }

    fn update_motion_points(&mut self) {
        let length = self.from().distance(self.to());
        // Repeated waypoints get a single step instead of a division by zero
        self.step_count = ((length / self.speed).ceil() as u32).max(1);
    }

    /// Move one step; returns the new position and whether a new segment began
    pub fn advance(&mut self) -> (Vec3, bool) {
        self.current_step = (self.current_step + 1) % self.step_count;
        let turned = self.current_step == 0;
        if turned {
            self.path_index = (self.path_index + 1) % self.track.len();
            self.update_motion_points();
        }

        let t = self.current_step as f32 / self.step_count as f32;
        (self.from().lerp(self.to(), t), turned)
    }

    pub fn reset(&mut self) {
        self.path_index = 0;
        self.current_step = 0;
        self.update_motion_points();
    }
}

/// Ghost-specific state
#[derive(Debug, Clone, PartialEq)]
pub struct Ghost {
    pub size: f32,
    pub path: GhostPath,
    /// Fixed facing; `None` turns the ghost towards each new waypoint
    pub initial_rotation: Option<Vec3>,
    /// Banished with a cross, flying away
    pub evicted: bool,
}

impl Ghost {
    pub fn new(
        size: f32,
        track: Vec<Vec3>,
        speed: f32,
        initial_rotation: Option<Vec3>,
    ) -> Result<Self> {
        if !(size.is_finite() && size > 0.0) {
            return Err(Error::InvalidDimension {
                name: "ghost size",
                value: size,
            });
        }
        Ok(Self {
            size,
            path: GhostPath::new(track, speed)?,
            // A zero rotation means no fixed facing
            initial_rotation: initial_rotation.filter(|r| *r != Vec3::ZERO),
            evicted: false,
        })
    }

    /// Pose at spawn
    pub fn spawn_transform(&self) -> Transform {
        Transform::at(self.path.start())
            .with_rotation(self.initial_rotation.unwrap_or(Vec3::ZERO))
    }

    /// Patrol one tick
    pub fn step(&mut self, transform: &mut Transform) {
        let (position, turned) = self.path.advance();
        if turned && self.initial_rotation.is_none() {
            transform.rotation = look_rotation(self.path.from(), self.path.to());
        }
        transform.position = position;
    }

    pub fn reset(&mut self) {
        self.evicted = false;
        self.path.reset();
    }
}
