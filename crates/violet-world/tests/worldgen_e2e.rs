use std::sync::Arc;

use violet_tiles::TileRegistry;
use violet_tiles::types::{AIR, CHEST, CRYSTAL, LAVA, STONE};
use violet_world::generation::GenStage;
use violet_world::{Preset, TILE_SIZE, World, WorldGenConfig};

fn registry() -> Arc<TileRegistry> {
    Arc::new(TileRegistry::builtin().expect("builtin tiles"))
}

fn full(seed: u64) -> World {
    World::generate(&WorldGenConfig::with_preset(Preset::Full), registry(), seed)
}

#[test]
fn spawn_area_is_flat_and_open() {
    for seed in [1u64, 42, 1234] {
        let world = full(seed);
        let h = world.heights.at(100);
        assert_eq!(h, world.heights.at(120), "seed {seed}");
        assert_eq!(world.tilemap.get_tile(100, h - 1), AIR, "seed {seed}");
        assert!(world.tilemap.is_solid_at(100, h), "seed {seed}");
        assert_eq!(world.spawn.surface_row, h);
        assert_eq!(world.spawn.feet.y, (h as u32 * TILE_SIZE) as f32);
    }
}

#[test]
fn same_seed_same_world() {
    let a = full(77);
    let b = full(77);
    assert_eq!(a.tilemap.codes(), b.tilemap.codes());
    assert_eq!(a.heights.as_slice(), b.heights.as_slice());
    assert_eq!(a.biomes, b.biomes);
    assert_eq!(a.chamber, b.chamber);

    let c = full(78);
    assert_ne!(a.tilemap.codes(), c.tilemap.codes());
}

#[test]
fn chamber_geometry_matches_anchor() {
    let world = full(9);
    let map = &world.tilemap;
    let a = world.chamber;
    let ts = TILE_SIZE as f32;
    assert_eq!(a.feet.x, a.column as f32 * ts + ts * 0.5);
    assert_eq!(a.feet.y, a.floor_row as f32 * ts);
    assert_eq!(a.x1 - a.x0 + 1, 48);

    for x in a.x0..=a.x1 {
        assert_eq!(map.get_tile(x, a.floor_row), STONE, "floor at {x}");
        assert_eq!(map.get_tile(x, a.floor_row + 1), STONE, "floor at {x}");
    }
    let surface = world.heights.at(a.column);
    for y in (surface - 2)..=(a.floor_row + 1) {
        assert_eq!(map.get_tile(a.x0, y), STONE);
        assert_eq!(map.get_tile(a.x1, y), STONE);
    }
    for off in [3, 9, 15, 21] {
        for x in [a.column - off, a.column + off] {
            assert_eq!(map.get_tile(x, a.floor_row - 1), STONE);
            assert_eq!(map.get_tile(x, a.floor_row - 3), CRYSTAL);
        }
    }
    // Slime spawn columns stand in open air on the floor.
    for i in 0..7 {
        let x = a.column + (i - 3) * 6;
        for y in (a.floor_row - 4)..a.floor_row {
            assert_eq!(map.get_tile(x, y), AIR, "spawn column {x} row {y}");
        }
    }
    let flat = world.heights.spread(a.x0 - 3, a.x1 + 3);
    assert_eq!(flat, Some(0));
}

#[test]
fn path_chests_rest_on_ground() {
    for preset in [Preset::Full, Preset::Embedded] {
        let cfg = WorldGenConfig::with_preset(preset);
        for seed in 0u64..120 {
            let world = World::generate(&cfg, registry(), seed);
            assert_eq!(world.report.structures.path_chests, 4, "{preset:?} seed {seed}");
            let map = &world.tilemap;
            let mut resting = 0;
            for x in (world.spawn.column as i32)..world.chamber.x0 {
                for y in 0..map.rows() as i32 - 1 {
                    if map.get_tile(x, y) == CHEST && map.is_solid_at(x, y + 1) {
                        resting += 1;
                    }
                }
            }
            assert!(resting >= 4, "{preset:?} seed {seed}: {resting} chests on ground");
        }
    }
}

#[test]
fn lava_band_survives_carving() {
    let world = full(11);
    let map = &world.tilemap;
    let rows = map.rows() as i32;
    for y in (rows - 8)..rows {
        for x in 0..map.cols() as i32 {
            assert_eq!(map.get_tile(x, y), LAVA, "({x}, {y})");
        }
    }
}

#[test]
fn embedded_preset_skips_dungeons() {
    let world = World::generate(&WorldGenConfig::with_preset(Preset::Embedded), registry(), 2);
    assert_eq!(world.tilemap.cols(), 200);
    assert_eq!(world.tilemap.rows(), 100);
    assert_eq!(world.report.dungeons, 0);
    assert!(world.report.stage_time(GenStage::Dungeons).is_none());
    assert!(world.report.stage_time(GenStage::Chamber).is_some());
    let h = world.heights.at(50);
    assert_eq!(world.tilemap.get_tile(50, h - 1), AIR);
}

#[test]
fn biome_lookup_falls_back_to_plains() {
    let world = full(6);
    assert_eq!(world.biome_at(-1), violet_world::Biome::Plains);
    assert_eq!(world.biome_at(10_000), violet_world::Biome::Plains);
    assert_eq!(world.biome_at_pixel(35.0 * 16.0), world.biome_at(35));
}
