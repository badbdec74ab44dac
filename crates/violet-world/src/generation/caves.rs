use std::f32::consts::TAU;

use violet_tiles::types::{AIR, CHEST, MUSHROOM, STONE, WATER};

use super::GenCtx;
use super::biome::UndergroundBiome;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CaveStats {
    pub worms: usize,
    pub caverns: usize,
    pub lakes: usize,
    pub tunnels: usize,
    /// Instances dropped because their depth range was empty.
    pub skipped: usize,
    pub mushrooms: usize,
}

/// Drunkard's-walk caves, caverns, lakes and the tunnels between caverns.
pub(super) fn carve_caves(ctx: &mut GenCtx<'_>) -> CaveStats {
    let mut stats = CaveStats::default();
    let count = ctx.size.cols / ctx.size.cave_spacing.max(1);
    let mut caverns: Vec<(i32, i32)> = Vec::new();
    for _ in 0..count {
        let cx = ctx.rng.below(ctx.cols());
        let min_row = ctx.heights.at(cx) + ctx.cfg.caves.min_depth;
        let max_row = ctx.rows() - ctx.cfg.caves.bottom_margin;
        if max_row <= min_row {
            log::debug!("cave at column {} skipped: no room below surface", cx);
            stats.skipped += 1;
            continue;
        }
        let cy = min_row + ctx.rng.below(max_row - min_row);
        if ctx.rng.chance(ctx.cfg.caves.cavern_chance) {
            carve_cavern(ctx, cx, cy);
            caverns.push((cx, cy));
            stats.caverns += 1;
        } else if ctx.rng.chance(ctx.cfg.caves.lake_chance) {
            carve_lake(ctx, cx, cy);
            stats.lakes += 1;
        } else {
            carve_worm(ctx, cx, cy);
            stats.worms += 1;
        }
    }
    stats.tunnels = connect_caverns(ctx, &caverns);
    stats.mushrooms = grow_mushrooms(ctx);
    stats
}

fn carve_disk(ctx: &mut GenCtx<'_>, cx: i32, cy: i32, r: i32) {
    for dx in -r..=r {
        for dy in -r..=r {
            if dx * dx + dy * dy <= r * r {
                ctx.carve(cx + dx, cy + dy);
            }
        }
    }
}

fn carve_worm(ctx: &mut GenCtx<'_>, start_x: i32, start_y: i32) {
    let c = &ctx.cfg.caves;
    let (turn, r_min, r_span) = (c.worm_turn, c.worm_radius_min, c.worm_radius_span);
    let life = ctx.rng.span(c.worm_life);
    let mut x = start_x as f32;
    let mut y = start_y as f32;
    let mut angle = ctx.rng.unit() * TAU;
    for _ in 0..life {
        angle += (ctx.rng.unit() - 0.5) * turn;
        x += angle.cos();
        y += angle.sin();
        let radius = (r_min + ctx.rng.unit() * r_span) as i32;
        carve_disk(ctx, x.floor() as i32, y.floor() as i32, radius);
    }
}

fn carve_cavern(ctx: &mut GenCtx<'_>, cx: i32, cy: i32) {
    let radius = ctx.rng.span(ctx.cfg.caves.cavern_radius).max(1);
    let r2 = (radius * radius) as f32;
    let mut opened = Vec::new();
    for dx in -radius..=radius {
        for dy in -radius..=radius {
            let d = (dx * dx) as f32 + (dy * dy) as f32 * 0.8;
            let (x, y) = (cx + dx, cy + dy);
            if d <= r2 && !ctx.map.is_air(x, y) && ctx.carve(x, y) {
                opened.push((x, y));
            }
        }
    }

    let bottom = ctx.rows() - ctx.cfg.caves.floor_guard;
    for _ in 0..radius {
        let spike = ctx.rng.range(2, 5);
        let sx = cx + ctx.rng.below(radius * 2) - radius;
        let sy = cy - radius + ctx.rng.below(radius / 2);
        for y in (sy..sy + spike).filter(|&y| y < bottom) {
            ctx.map.set_tile(sx, y, STONE);
        }
        let gx = cx + ctx.rng.below(radius * 2) - radius;
        let gy = cy + radius - ctx.rng.below(radius / 2);
        for y in (gy - spike + 1..=gy).filter(|&y| y < bottom) {
            ctx.map.set_tile(gx, y, STONE);
        }
    }

    // Only cells this cavern opened; older caves keep their own air.
    let chest_chance = ctx.cfg.caves.cavern_chest_chance;
    for (x, y) in opened {
        if ctx.map.is_air(x, y)
            && ctx.map.in_bounds(x, y + 1)
            && ctx.map.is_solid_at(x, y + 1)
            && ctx.rng.chance(chest_chance)
        {
            ctx.map.set_tile(x, y, CHEST);
        }
    }
}

fn carve_lake(ctx: &mut GenCtx<'_>, cx: i32, cy: i32) {
    let radius = ctx.rng.span(ctx.cfg.caves.lake_radius).max(2);
    let half = radius / 2;
    let ellipse = |dx: i32, dy: i32| {
        (dx * dx) as f32 / (radius * radius) as f32 + (dy * dy) as f32 / (half * half) as f32
    };
    for dx in -radius..=radius {
        for dy in -half..=half {
            if ellipse(dx, dy) <= 1.0 {
                ctx.carve(cx + dx, cy + dy);
            }
        }
    }
    for dx in (-radius + 1)..radius {
        for dy in 0..=half {
            let (x, y) = (cx + dx, cy + dy);
            if ellipse(dx, dy) <= 0.9 && ctx.map.is_air(x, y) && ctx.carve(x, y) {
                ctx.map.set_tile(x, y, WATER);
            }
        }
    }
}

/// Joins cavern pairs closer than the threshold, each behind a coin flip.
fn connect_caverns(ctx: &mut GenCtx<'_>, centres: &[(i32, i32)]) -> usize {
    let t = &ctx.cfg.tunnels;
    let (max_distance, chance, radius) = (t.max_distance, t.chance, t.radius);
    let mut tunnels = 0;
    for (i, &a) in centres.iter().enumerate() {
        for &b in &centres[i + 1..] {
            let dx = (b.0 - a.0) as f32;
            let dy = (b.1 - a.1) as f32;
            let dist = (dx * dx + dy * dy).sqrt();
            if dist >= max_distance || !ctx.rng.chance(chance) {
                continue;
            }
            let steps = dist.ceil().max(1.0) as i32;
            for s in 0..=steps {
                let t = s as f32 / steps as f32;
                let x = a.0 as f32 + dx * t;
                let y = a.1 as f32 + dy * t;
                carve_disk(ctx, x.round() as i32, y.round() as i32, radius);
            }
            tunnels += 1;
        }
    }
    tunnels
}

fn grow_mushrooms(ctx: &mut GenCtx<'_>) -> usize {
    let chance = ctx.cfg.caves.mushroom_chance;
    let mut grown = 0;
    for x in 0..ctx.cols() {
        let surface = ctx.heights.at(x);
        for y in (surface + 1)..ctx.rows() {
            if ctx.underground.get(x, y) == UndergroundBiome::Mushroom
                && ctx.map.get_tile(x, y) == AIR
                && ctx.map.is_solid_at(x, y + 1)
                && ctx.rng.chance(chance)
            {
                ctx.map.set_tile(x, y, MUSHROOM);
                grown += 1;
            }
        }
    }
    grown
}
