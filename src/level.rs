//! Built-in level
//!
//! Four rooms: the home room, a small vault holding coins and the only
//! cross, a stone corridor a ghost patrols, and the resource gallery.

use glam::Vec3;

use crate::error::Result;
use crate::geometry::Winding;
use crate::materials::{Material, MaterialKey, Procedural, TextureSource};
use crate::settings::{Settings, WallSettings};
use crate::sim::{DEFAULT_GHOST_SIZE, Room, World};

/// Clearance between touching walls
const GAP: f32 = 0.001;

/// Build the level with walls sized from `settings`
pub fn demo_level(settings: &Settings) -> Result<World> {
    let mut world = World::new(settings.clone());
    register_materials(&mut world);

    let home = home_room(&settings.wall)?;
    world.add_room(home);
    let vault = vault_room(&mut world)?;
    world.add_room(vault);
    let corridor = corridor_room(&mut world)?;
    world.add_room(corridor);
    let gallery = resource_room(&mut world);
    world.add_room(gallery);

    log::info!(
        "Level ready: {} rooms, {} pickups",
        world.rooms.len(),
        world.rooms.iter().map(|r| r.collectables.len()).sum::<usize>()
    );
    Ok(world)
}

fn register_materials(world: &mut World) {
    let cache = &mut world.materials;
    cache.register(MaterialKey::Wall("papers".into()), Material::image("images/papers3.jpg"));
    cache.register(MaterialKey::Wall("brick".into()), Material::image("images/brick3.jpg"));
    cache.register(
        MaterialKey::Wall("red-brick".into()),
        Material::image("images/brick2.jpg").with_uv_offset(0.0, 0.09),
    );
    cache.register(MaterialKey::Wall("black".into()), Material::colored([0.0, 0.0, 0.0]));
    cache.register(MaterialKey::Wall("stone".into()), Material::image("images/stone_wall.jpg"));

    cache.register(MaterialKey::Resource("Gold".into()), Material::image("images/gold2.jpg"));
    for (name, kind, size) in [
        ("Wood", Procedural::Wood, 256),
        ("Fire", Procedural::Fire, 64),
        ("Air", Procedural::Cloud, 64),
    ] {
        cache.register(
            MaterialKey::Resource(name.into()),
            Material::textured(TextureSource::Procedural { kind, size, tint: None }),
        );
    }
}

fn home_room(dims: &WallSettings) -> Result<Room> {
    let t = dims.thickness;
    let mut room = Room::new("home-room", Vec3::ZERO)
        .with_trigger(Vec3::new(0.0, 2.5, 0.0), Vec3::new(10.0, 5.0, 8.0));

    #[rustfmt::skip]
    let inner = [
        -1.5, 3.0,
        -3.0, 3.0,
        -4.0, 2.0,
        -4.0, -4.0,
        4.0, -4.0,
        4.0, 2.0,
        3.0, 3.0,
        1.5, 3.0,
    ];
    room.add_wall(&inner, Winding::Right, dims, false, MaterialKey::Wall("papers".into()))?;

    #[rustfmt::skip]
    let outer = [
        -1.5, 4.0 + t + GAP,
        -1.5, 3.0 + t + GAP,
        -5.0, 3.0 + t + GAP,
        -5.0, -5.0 + t - GAP,
        5.0, -5.0 + t - GAP,
        5.0, 3.0 + t + GAP,
        1.5, 3.0 + t + GAP,
        1.5, 4.0 + t + GAP,
    ];
    room.add_wall(&outer, Winding::Right, dims, false, MaterialKey::Wall("brick".into()))?;
    Ok(room)
}

fn vault_room(world: &mut World) -> Result<Room> {
    let dims = world.settings.wall;
    let t = dims.thickness;
    let mut room = Room::new("404-room", Vec3::new(13.0, 0.0, 60.0))
        .with_trigger(Vec3::new(-4.5, 0.0, 5.001), Vec3::new(12.0, 5.0, 10.0));

    #[rustfmt::skip]
    let inner = [
        -3.0, 0.0,
        -3.0, 2.0,
        -9.0, 2.0,
        -9.0, 9.0,
        0.0, 9.0,
        0.0, 0.0,
    ];
    room.add_wall(&inner, Winding::Right, &dims, true, MaterialKey::Wall("red-brick".into()))?;

    #[rustfmt::skip]
    let outer = [
        -4.0, t,
        -4.0, 2.0,
        -10.0, 2.0,
        -10.0, 9.5,
        1.0, 9.5,
        1.0, t,
    ];
    room.add_wall(&outer, Winding::Left, &dims, false, MaterialKey::Wall("black".into()))?;

    let coin_y = 0.5;
    for x in [-2.0, -4.0, -6.0] {
        for z in [7.0, 4.0] {
            room.add_coin(&mut world.ids, Vec3::new(x, coin_y, z));
        }
    }
    room.add_cross(&mut world.ids, Vec3::new(-5.0, 1.5, 5.5));
    Ok(room)
}

fn corridor_room(world: &mut World) -> Result<Room> {
    let base = world.settings.wall;
    let dims = WallSettings {
        height: 2.0 * base.height,
        ..base
    };
    let t = dims.thickness;
    let mut room = Room::new("footer-room", Vec3::new(-20.0, 0.0, 60.0))
        .with_trigger(Vec3::new(-8.5, 0.0, 20.5), Vec3::new(23.0, 6.0, 40.0));

    #[rustfmt::skip]
    let walls = [
        -2.0, 0.0,
        -10.0, 0.0,
        -10.0, 30.0,
        -20.0, 30.0,
        -20.0, 40.0,
        2.0 + t, 40.0,
        2.0 + t, 30.0,
        2.0 + t, 0.0,
    ];
    room.add_wall(&walls, Winding::Right, &dims, false, MaterialKey::Wall("stone".into()))?;

    // Lower floor, one wall height down
    let coin_y = 0.5 - base.height;
    for x in [-7.0, -4.0] {
        for z in (0..36).step_by(4) {
            room.add_coin(&mut world.ids, Vec3::new(x, coin_y, z as f32));
        }
    }

    let ghost_y = 1.0 - base.height;
    let patrol = [
        Vec3::new(-5.5, ghost_y, 2.0),
        Vec3::new(-5.5, ghost_y, 30.0),
        Vec3::new(-1.0, ghost_y, 30.0),
        Vec3::new(-1.0, ghost_y, 2.0),
    ];
    room.add_ghost(&mut world.ids, DEFAULT_GHOST_SIZE, &patrol, 0.05, None)?;
    Ok(room)
}

fn resource_room(world: &mut World) -> Room {
    let mut room = Room::new("resource-room", Vec3::new(0.0, 0.0, 40.0))
        .with_trigger(Vec3::new(-2.5, 2.0, 4.0), Vec3::new(26.0, 5.0, 8.0));

    let sample = Vec3::new(-10.0, 1.0, 0.0);
    for (name, dx) in [("Gold", 12.0), ("Wood", 8.0), ("Fire", 4.0), ("Air", 0.0)] {
        room.add_resource(&mut world.ids, name, sample + Vec3::new(dx, 0.0, 0.0));
    }
    room.add_coin(&mut world.ids, Vec3::new(-18.0, 0.5, 5.8));
    room
}
