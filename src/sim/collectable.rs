//! Pickups and their collection state machine
//!
//! Every pickup moves through the same lifecycle:
//!
//! ```text
//! Active --try_collect--> Collected --animation ends--> Finished
//!    ^                                                      |
//!    +------------------------- reset ----------------------+
//! ```
//!
//! The variants differ in what collecting does and in how they animate.
//! Illegal transitions (collecting twice, animating a finished pickup) are
//! silent no-ops.

use std::f32::consts::FRAC_PI_6;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::events::SoundEffect;
use super::ghost::Ghost;
use super::player::Player;
use super::transform::{Parent, Transform};
use crate::geometry::{Collider, WorldVolume};
use crate::materials::MaterialKey;
use crate::settings::{AnimationSettings, ScoreSettings};

/// Where a held cross sits relative to the player collider
const HELD_CROSS_OFFSET: Vec3 = Vec3::new(0.5, -0.2, 1.5);
const HELD_CROSS_ROTATION: Vec3 = Vec3::new(FRAC_PI_6, -FRAC_PI_6, 0.0);
const HELD_CROSS_SCALE: f32 = 0.5;

/// Ghost side length when none is given
pub const DEFAULT_GHOST_SIZE: f32 = 1.5;
const RESOURCE_SIZE: f32 = 1.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CollectableId(pub u32);

/// Hands out unique pickup ids across every room
#[derive(Debug, Clone, Default)]
pub struct EntityIds {
    next: u32,
}

impl EntityIds {
    pub fn next_id(&mut self) -> CollectableId {
        let id = CollectableId(self.next);
        self.next += 1;
        id
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CollectableKind {
    Coin { size: f32 },
    Cross,
    Ghost(Ghost),
    Resource { name: String },
}

#[derive(Debug, Clone)]
pub struct Collectable {
    id: CollectableId,
    pub kind: CollectableKind,
    pub transform: Transform,
    pub material: MaterialKey,
    collider: Collider,
    /// Pose restored by `reset`
    spawn: Transform,
    is_collected: bool,
    animation_finished: bool,
    /// Unit vector from the player collider towards the pickup at contact
    collision_vector: Option<Vec3>,
    position_before_collected: Option<Vec3>,
}

impl Collectable {
    fn new(
        id: CollectableId,
        kind: CollectableKind,
        spawn: Transform,
        collider: Collider,
        material: MaterialKey,
    ) -> Self {
        Self {
            id,
            kind,
            transform: spawn,
            material,
            collider,
            spawn,
            is_collected: false,
            animation_finished: false,
            collision_vector: None,
            position_before_collected: None,
        }
    }

    /// Coin of diameter `size`, standing upright
    pub fn coin(id: CollectableId, position: Vec3, size: f32) -> Self {
        Self::new(
            id,
            CollectableKind::Coin { size },
            Transform::at(position),
            Collider::lying_cylinder(size, size / 5.0),
            MaterialKey::Coin,
        )
    }

    pub fn cross(id: CollectableId, position: Vec3) -> Self {
        Self::new(
            id,
            CollectableKind::Cross,
            Transform::at(position),
            Collider::cuboid(0.2, 2.0, 0.2),
            MaterialKey::Cross,
        )
    }

    /// Ghost spawning at the first waypoint of its patrol
    pub fn ghost(id: CollectableId, ghost: Ghost) -> Self {
        let spawn = ghost.spawn_transform();
        let collider = Collider::cube(ghost.size);
        Self::new(id, CollectableKind::Ghost(ghost), spawn, collider, MaterialKey::Ghost)
    }

    pub fn resource(id: CollectableId, name: &str, position: Vec3) -> Self {
        Self::new(
            id,
            CollectableKind::Resource {
                name: name.to_string(),
            },
            Transform::at(position),
            Collider::cube(RESOURCE_SIZE),
            MaterialKey::Resource(name.to_string()),
        )
    }

    pub fn id(&self) -> CollectableId {
        self.id
    }

    pub fn is_collected(&self) -> bool {
        self.is_collected
    }

    pub fn animation_finished(&self) -> bool {
        self.animation_finished
    }

    pub fn collision_vector(&self) -> Option<Vec3> {
        self.collision_vector
    }

    pub fn position_before_collected(&self) -> Option<Vec3> {
        self.position_before_collected
    }

    pub fn spawn(&self) -> &Transform {
        &self.spawn
    }

    /// Collider in world space; `anchor` is the player camera
    pub fn collider_volume(&self, anchor: &Transform) -> WorldVolume {
        let (rotation, scale) = match self.transform.parent {
            Parent::World => (self.transform.quat(), self.transform.scale),
            Parent::Player => (
                anchor.quat() * self.transform.quat(),
                anchor.scale * self.transform.scale,
            ),
        };
        self.collider
            .world_volume(self.transform.world_position(anchor), rotation, scale)
    }

    /// Variant precondition for collecting
    pub fn can_collect(&self, player: &Player) -> bool {
        match self.kind {
            CollectableKind::Cross => !player.inventory.holds_cross(),
            _ => true,
        }
    }

    /// Collect on contact with the player. Returns whether it happened.
    pub fn try_collect(&mut self, player: &mut Player, rewards: &ScoreSettings) -> bool {
        if self.is_collected || !self.can_collect(player) {
            return false;
        }

        let mine = self.collider_volume(&player.camera);
        let theirs = player.collider_volume();
        if !mine.intersects(&theirs) {
            return false;
        }

        self.is_collected = true;
        self.collision_vector = Some((mine.center() - theirs.center()).normalize_or_zero());
        self.position_before_collected = Some(self.transform.position);
        log::debug!("Collected {:?} ({:?})", self.id, self.material);
        self.on_collect(player, rewards);
        true
    }

    /// Variant reaction to being collected
    pub fn on_collect(&mut self, player: &mut Player, rewards: &ScoreSettings) {
        match &mut self.kind {
            CollectableKind::Coin { .. } => {
                player.add_score(rewards.coin);
                player.play(SoundEffect::Pickup);
            }
            CollectableKind::Cross => {
                player.inventory.cross = Some(self.id);
                self.transform.parent = Parent::Player;
                self.transform.position = HELD_CROSS_OFFSET;
                self.transform.rotation = HELD_CROSS_ROTATION;
                self.transform.scale *= HELD_CROSS_SCALE;
                player.add_score(rewards.cross);
                player.show_message("Blessed!");
                player.play(SoundEffect::Blessing);
            }
            CollectableKind::Ghost(ghost) => {
                if player.inventory.consume_cross().is_some() {
                    ghost.evicted = true;
                    player.add_score(rewards.ghost_bounty);
                    player.show_message("Ghostbuster!");
                    player.play(SoundEffect::Banish);
                } else {
                    player.kill("killed by ghost");
                }
            }
            CollectableKind::Resource { name } => {
                player.add_score(rewards.resource);
                player.show_message(format!("{}!", name));
                player.play(SoundEffect::Pickup);
            }
        }
    }

    /// Advance one tick of idle or post-collection animation
    pub fn update_animation(&mut self, anim: &AnimationSettings) {
        if self.animation_finished {
            return;
        }

        if !self.is_collected {
            match &mut self.kind {
                CollectableKind::Ghost(ghost) => ghost.step(&mut self.transform),
                _ => self.transform.rotation.y += anim.spin_step,
            }
            return;
        }

        let flies_away = match &self.kind {
            CollectableKind::Coin { .. } => true,
            CollectableKind::Ghost(ghost) => ghost.evicted,
            CollectableKind::Cross | CollectableKind::Resource { .. } => false,
        };
        if flies_away {
            self.fly_away(anim);
        } else if matches!(self.kind, CollectableKind::Resource { .. }) {
            self.finish();
        }
    }

    fn fly_away(&mut self, anim: &AnimationSettings) {
        self.transform.scale *= anim.shrink_factor;

        let cv = self.collision_vector.unwrap_or(Vec3::ZERO);
        let direction = Vec3::new(cv.x, anim.knockback_lift, cv.z);
        self.transform.position += direction * anim.knockback_step;

        if self.transform.scale.x < anim.min_scale {
            self.finish();
        }
    }

    /// End the animation and run the variant's completion
    pub fn finish(&mut self) {
        self.animation_finished = true;
        self.on_animation_finished();
    }

    fn on_animation_finished(&mut self) {
        match self.kind {
            CollectableKind::Coin { .. } | CollectableKind::Cross | CollectableKind::Ghost(_) => {
                self.transform.hide()
            }
            // Stays on display once picked up
            CollectableKind::Resource { .. } => {}
        }
    }

    /// Back to the freshly spawned state
    pub fn reset(&mut self) {
        self.is_collected = false;
        self.animation_finished = false;
        self.collision_vector = None;
        self.reset_internal();
        self.position_before_collected = None;
    }

    fn reset_internal(&mut self) {
        self.transform = self.spawn;
        match &mut self.kind {
            CollectableKind::Coin { .. } | CollectableKind::Resource { .. } => {
                if let Some(position) = self.position_before_collected {
                    self.transform.position = position;
                }
            }
            CollectableKind::Ghost(ghost) => ghost.reset(),
            CollectableKind::Cross => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::GameEvent;

    fn setup() -> (Player, Settings) {
        let settings = Settings::standard();
        let mut player = Player::new(&settings);
        player.set_position(Vec3::new(0.0, 1.0, 0.0));
        (player, settings)
    }

    fn ghost_at(id: u32, position: Vec3) -> Collectable {
        let track = vec![position, position + Vec3::new(4.0, 0.0, 0.0)];
        let ghost = Ghost::new(DEFAULT_GHOST_SIZE, track, 0.1, None).unwrap();
        Collectable::ghost(CollectableId(id), ghost)
    }

    fn snapshot(c: &Collectable) -> (bool, bool, Option<Vec3>, Option<Vec3>, Transform) {
        (
            c.is_collected(),
            c.animation_finished(),
            c.collision_vector(),
            c.position_before_collected(),
            c.transform,
        )
    }

    #[test]
    fn test_coin_collect_and_fly_away() {
        let (mut player, settings) = setup();
        let mut coin = Collectable::coin(CollectableId(0), Vec3::new(0.0, 1.0, 1.0), 1.0);

        assert!(coin.try_collect(&mut player, &settings.score));
        assert_eq!(player.score(), 100);
        let cv = coin.collision_vector().unwrap();
        assert!((cv.length() - 1.0).abs() < 1e-5);
        assert!(cv.z > 0.99);
        assert_eq!(coin.position_before_collected(), Some(Vec3::new(0.0, 1.0, 1.0)));

        // Second collect is a no-op
        assert!(!coin.try_collect(&mut player, &settings.score));
        assert_eq!(player.score(), 100);

        coin.update_animation(&settings.animation);
        assert!((coin.transform.scale.x - 0.8).abs() < 1e-6);
        assert!((coin.transform.position.y - 1.09).abs() < 1e-5);
        assert!((coin.transform.position.z - 1.3).abs() < 1e-5);

        // 0.8^14 < 0.05 <= 0.8^13
        for _ in 0..12 {
            coin.update_animation(&settings.animation);
        }
        assert!(!coin.animation_finished());
        coin.update_animation(&settings.animation);
        assert!(coin.animation_finished());
        assert!(!coin.transform.visible);
        assert!(!coin.transform.enabled);

        let frozen = coin.transform;
        coin.update_animation(&settings.animation);
        assert_eq!(coin.transform, frozen);
    }

    /// One of each variant, placed at `position`
    fn every_variant(position: Vec3) -> Vec<Collectable> {
        vec![
            Collectable::coin(CollectableId(0), position, 1.0),
            Collectable::cross(CollectableId(1), position),
            ghost_at(2, position),
            Collectable::resource(CollectableId(3), "Fire", position),
        ]
    }

    #[test]
    fn test_no_overlap_no_collect() {
        let (mut player, settings) = setup();
        for mut c in every_variant(Vec3::new(0.0, 1.0, 5.0)) {
            assert!(!c.try_collect(&mut player, &settings.score), "{:?}", c.kind);
            assert!(!c.is_collected());
            assert_eq!(c.collision_vector(), None);
        }
        assert!(player.events().is_empty());
        assert!(!player.is_killed());
    }

    #[test]
    fn test_collect_only_once() {
        for mut c in every_variant(Vec3::new(0.0, 1.0, 1.0)) {
            let (mut player, settings) = setup();
            if matches!(c.kind, CollectableKind::Ghost(_)) {
                player.inventory.cross = Some(CollectableId(9));
            }
            assert!(c.try_collect(&mut player, &settings.score), "{:?}", c.kind);
            let score = player.score();
            let events = player.events().len();

            assert!(!c.try_collect(&mut player, &settings.score), "{:?}", c.kind);
            assert_eq!(player.score(), score);
            assert_eq!(player.events().len(), events);
        }
    }

    #[test]
    fn test_active_pickups_spin() {
        let (_, settings) = setup();
        let mut coin = Collectable::coin(CollectableId(0), Vec3::ZERO, 1.0);
        coin.update_animation(&settings.animation);
        coin.update_animation(&settings.animation);
        assert!((coin.transform.rotation.y - 0.08).abs() < 1e-6);
    }

    #[test]
    fn test_cross_is_carried() {
        let (mut player, settings) = setup();
        let mut cross = Collectable::cross(CollectableId(4), Vec3::new(0.5, 1.0, 0.0));

        assert!(cross.try_collect(&mut player, &settings.score));
        assert_eq!(player.inventory.cross, Some(CollectableId(4)));
        assert_eq!(player.score(), 250);
        assert_eq!(cross.transform.parent, Parent::Player);
        assert_eq!(cross.transform.scale, Vec3::splat(0.5));
        assert!(player.events().iter().any(|e| *e == GameEvent::Message("Blessed!".into())));

        // Held crosses do not animate
        let held = cross.transform;
        cross.update_animation(&settings.animation);
        assert_eq!(cross.transform, held);
        assert!(!cross.animation_finished());
    }

    #[test]
    fn test_second_cross_refused_while_holding() {
        let (mut player, settings) = setup();
        player.inventory.cross = Some(CollectableId(99));
        let mut cross = Collectable::cross(CollectableId(5), Vec3::new(0.5, 1.0, 0.0));
        assert!(!cross.can_collect(&player));
        assert!(!cross.try_collect(&mut player, &settings.score));
        assert_eq!(player.score(), 0);
    }

    #[test]
    fn test_ghost_kills_unarmed_player() {
        let (mut player, settings) = setup();
        let mut ghost = ghost_at(1, Vec3::new(0.0, 1.0, 1.0));

        assert!(ghost.try_collect(&mut player, &settings.score));
        assert!(player.is_killed());
        assert_eq!(player.score(), 0);

        // Lethal ghost never finishes
        for _ in 0..50 {
            ghost.update_animation(&settings.animation);
        }
        assert!(!ghost.animation_finished());
        assert!(ghost.transform.visible);
    }

    #[test]
    fn test_ghost_evicted_by_cross() {
        let (mut player, settings) = setup();
        player.inventory.cross = Some(CollectableId(9));
        let mut ghost = ghost_at(1, Vec3::new(0.0, 1.0, 1.0));

        assert!(ghost.try_collect(&mut player, &settings.score));
        assert!(!player.is_killed());
        assert_eq!(player.score(), 2500);
        assert!(!player.inventory.holds_cross());
        assert_eq!(player.inventory.drain_consumed(), vec![CollectableId(9)]);
        assert!(matches!(&ghost.kind, CollectableKind::Ghost(g) if g.evicted));

        for _ in 0..14 {
            ghost.update_animation(&settings.animation);
        }
        assert!(ghost.animation_finished());
        assert!(!ghost.transform.visible);
    }

    #[test]
    fn test_ghost_patrols_while_active() {
        let (_, settings) = setup();
        let mut ghost = ghost_at(1, Vec3::new(10.0, 1.0, 10.0));
        ghost.update_animation(&settings.animation);
        assert!((ghost.transform.position.x - 10.1).abs() < 1e-4);
    }

    #[test]
    fn test_resource_stays_visible() {
        let (mut player, settings) = setup();
        let mut gold = Collectable::resource(CollectableId(2), "Gold", Vec3::new(0.0, 1.0, 1.0));
        assert!(gold.try_collect(&mut player, &settings.score));
        assert_eq!(player.score(), 22);
        assert!(player.events().iter().any(|e| *e == GameEvent::Message("Gold!".into())));

        gold.update_animation(&settings.animation);
        assert!(gold.animation_finished());
        assert!(gold.transform.visible);
        assert_eq!(gold.material, MaterialKey::Resource("Gold".into()));
    }

    #[test]
    fn test_reset_is_idempotent() {
        let (mut player, settings) = setup();
        let mut pickups = vec![
            Collectable::coin(CollectableId(0), Vec3::new(0.0, 1.0, 1.0), 1.0),
            Collectable::cross(CollectableId(1), Vec3::new(0.5, 1.0, 0.0)),
            ghost_at(2, Vec3::new(0.0, 1.0, -1.0)),
            Collectable::resource(CollectableId(3), "Air", Vec3::new(-1.0, 1.0, 0.0)),
        ];
        for c in pickups.iter_mut() {
            c.try_collect(&mut player, &settings.score);
            for _ in 0..5 {
                c.update_animation(&settings.animation);
            }
        }

        for c in pickups.iter_mut() {
            c.reset();
            let once = snapshot(c);
            c.reset();
            assert_eq!(snapshot(c), once);

            assert!(!c.is_collected());
            assert!(!c.animation_finished());
            assert_eq!(c.collision_vector(), None);
            assert_eq!(c.position_before_collected(), None);
            assert_eq!(c.transform, *c.spawn());
        }
        assert!(matches!(
            &pickups[2].kind,
            CollectableKind::Ghost(g) if !g.evicted && g.path.path_index() == 0
        ));
    }

    #[test]
    fn test_reset_restores_spent_cross() {
        let (mut player, settings) = setup();
        let mut cross = Collectable::cross(CollectableId(1), Vec3::new(0.5, 1.0, 0.0));
        cross.try_collect(&mut player, &settings.score);
        cross.finish();
        assert!(!cross.transform.visible);

        cross.reset();
        assert_eq!(cross.transform.parent, Parent::World);
        assert_eq!(cross.transform.scale, Vec3::ONE);
        assert!(cross.transform.visible && cross.transform.enabled);
    }
}
