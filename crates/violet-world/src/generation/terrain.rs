use violet_tiles::types::{
    AIR, COAL_ORE, CRYSTAL, DARK_STONE, DIRT, GOLD_ORE, GRASS, IRON_ORE, LAVA, MOSSY_STONE, SAND,
    STONE, TileId, WATER, is_stone_variant,
};

use super::GenCtx;
use super::biome::{Biome, UndergroundBiome};

/// Surface tile, soil band and tinted stone for every column.
pub(super) fn fill_columns(ctx: &mut GenCtx<'_>) {
    let t = &ctx.cfg.terrain;
    let rows = ctx.rows();
    for x in 0..ctx.cols() {
        let surface = ctx.heights.at(x);
        let biome = ctx.biome(x);
        let top = match biome {
            Biome::Desert => SAND,
            Biome::Swamp => DIRT,
            Biome::Mountains if ctx.rng.chance(t.mountain_stone_surface_chance) => STONE,
            _ => GRASS,
        };
        ctx.map.set_tile(x, surface, top);

        let (soil, soil_tile) = match biome {
            Biome::Mountains => (ctx.rng.span(t.mountain_soil_depth), DIRT),
            Biome::Desert => (ctx.rng.span(t.desert_sand_depth), SAND),
            _ => (ctx.rng.span(t.soil_depth), DIRT),
        };
        for y in (surface + 1)..rows {
            let depth = y - surface;
            if depth < soil {
                ctx.map.set_tile(x, y, soil_tile);
                continue;
            }
            let f = t.underground_frequency;
            let n = ctx.noise.sample_2d(x as f32 * f, y as f32 * f);
            let zone = UndergroundBiome::classify(n, y as f32 / rows as f32);
            ctx.underground.set(x as usize, y as usize, zone);
            let code = match zone {
                UndergroundBiome::Crystal if ctx.rng.chance(t.crystal_chance) => CRYSTAL,
                UndergroundBiome::Mushroom => MOSSY_STONE,
                UndergroundBiome::Lava => DARK_STONE,
                _ => STONE,
            };
            ctx.map.set_tile(x, y, code);
        }
    }
}

fn ore_multiplier(ctx: &GenCtx<'_>, biome: Biome) -> f32 {
    let m = &ctx.cfg.terrain.ore_multipliers;
    match biome {
        Biome::Plains => m.plains,
        Biome::Forest => m.forest,
        Biome::Mountains => m.mountains,
        Biome::Desert => m.desert,
        Biome::Swamp => m.swamp,
    }
}

/// One roll per stone cell picks at most one ore, gold before iron before
/// coal. Runs after filling so veins never cross unfilled columns.
pub(super) fn seed_ores(ctx: &mut GenCtx<'_>) {
    let rows = ctx.rows();
    let bottom = rows - ctx.cfg.caves.floor_guard;
    for x in 0..ctx.cols() {
        let surface = ctx.heights.at(x);
        let mult = ore_multiplier(ctx, ctx.biome(x));
        let column_depth = (rows - surface).max(1) as f32;
        for y in (surface + 1)..bottom {
            if !is_stone_variant(ctx.map.get_tile(x, y)) {
                continue;
            }
            let depth = y - surface;
            let df = depth as f32 / column_depth;
            let t = &ctx.cfg.terrain;
            let gold = if depth > t.gold_min_depth {
                t.gold_chance * (1.0 + df) * mult
            } else {
                0.0
            };
            let iron = if depth > t.iron_min_depth {
                t.iron_chance * (1.0 + df * 0.5) * mult
            } else {
                0.0
            };
            let coal = t.coal_chance * (1.0 + df) * mult;
            if let Some(ore) = pick_ore(ctx.rng.unit(), gold, iron, coal) {
                stamp_vein(ctx, x, y, ore);
            }
        }
    }
}

/// Maps one roll onto stacked ore bands, gold first.
fn pick_ore(roll: f32, gold: f32, iron: f32, coal: f32) -> Option<TileId> {
    if roll < gold {
        Some(GOLD_ORE)
    } else if roll < gold + iron {
        Some(IRON_ORE)
    } else if roll < gold + iron + coal {
        Some(COAL_ORE)
    } else {
        None
    }
}

fn stamp_vein(ctx: &mut GenCtx<'_>, x: i32, y: i32, ore: TileId) {
    let size = ctx.rng.span(ctx.cfg.terrain.vein_size);
    let bottom = ctx.rows() - ctx.cfg.caves.floor_guard;
    for _ in 0..size {
        let ox = x + ctx.rng.range(-1, 1);
        let oy = y + ctx.rng.range(-1, 1);
        if oy >= bottom {
            continue;
        }
        if is_stone_variant(ctx.map.get_tile(ox, oy)) {
            ctx.map.set_tile(ox, oy, ore);
        }
    }
}

/// Lava band along the bottom and shallow water pockets under swamps.
pub(super) fn pour_liquids(ctx: &mut GenCtx<'_>) {
    let rows = ctx.rows();
    let lava_top = rows - ctx.cfg.terrain.lava_rows as i32;
    for y in lava_top.max(0)..rows {
        for x in 0..ctx.cols() {
            ctx.map.set_tile(x, y, LAVA);
        }
    }

    let bottom = rows - ctx.cfg.caves.floor_guard;
    for x in 0..ctx.cols() {
        if ctx.biome(x) != Biome::Swamp {
            continue;
        }
        let level = ctx.heights.at(x) + 2;
        for y in level..(level + ctx.cfg.terrain.swamp_water_rows).min(bottom) {
            if matches!(ctx.map.get_tile(x, y), AIR | DIRT) {
                ctx.map.set_tile(x, y, WATER);
            }
        }
    }
}
