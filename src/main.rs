//! Hamburger FPS entry point
//!
//! The web build starts from `platform::web`. Natively there is no window:
//! the player is walked along a scripted route through the built-in level
//! and every event is logged.

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use glam::Vec3;

    use hamburger_fps::level::demo_level;
    use hamburger_fps::platform::events_json;
    use hamburger_fps::sim::World;
    use hamburger_fps::{Result, Settings};

    /// Frame length assumed by the script (ms)
    const FRAME_MS: u32 = 16;
    /// Distance walked per frame
    const WALK_STEP: f32 = 0.15;
    const MAX_TICKS: u64 = 20_000;

    /// Vault coins, the cross, the resource gallery, then the ghost
    fn route() -> Vec<Vec3> {
        vec![
            Vec3::new(0.0, 1.6, 0.0),
            Vec3::new(0.0, 1.6, 32.0),
            Vec3::new(-8.0, 1.0, 40.0),
            Vec3::new(2.0, 1.0, 40.0),
            Vec3::new(4.0, 1.6, 58.0),
            Vec3::new(11.0, 0.5, 64.0),
            Vec3::new(7.0, 0.5, 67.0),
            Vec3::new(8.0, 1.5, 65.5),
            Vec3::new(-17.5, 0.0, 61.0),
            Vec3::new(-25.5, -2.5, 62.0),
        ]
    }

    pub fn run() -> Result<()> {
        let settings = Settings::load();
        let mut world = demo_level(&settings)?;
        let poll_every = (settings.room_poll_interval_ms / FRAME_MS).max(1) as u64;

        'walk: for target in route() {
            loop {
                let position = world.player.position();
                let to_target = target - position;
                if to_target.length() <= WALK_STEP {
                    world.player.set_position(target);
                    break;
                }
                world.player.set_position(position + to_target.normalize() * WALK_STEP);

                if world.time_ticks % poll_every == 0 {
                    world.poll_room_transition();
                }
                world.tick();
                report(&mut world)?;

                if world.player.is_killed() || world.time_ticks >= MAX_TICKS {
                    break 'walk;
                }
            }
        }

        log::info!(
            "Run over after {} ticks: score {}, killed: {}, won: {}",
            world.time_ticks,
            world.player.score(),
            world.player.is_killed(),
            world.player.has_won()
        );
        Ok(())
    }

    fn report(world: &mut World) -> Result<()> {
        let events = world.drain_events();
        if !events.is_empty() {
            log::info!("tick {}: {}", world.time_ticks, events_json(&events)?);
        }
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Hamburger FPS (native) starting...");

    if let Err(err) = headless::run() {
        log::error!("{}", err);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::start, this is just to satisfy the compiler
}
