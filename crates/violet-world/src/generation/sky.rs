use violet_tiles::types::{CHEST, CRYSTAL, DIRT, SKY_GRASS, VINE};

use super::GenCtx;
use super::structures::stamp_tree;

/// Floating islands high above the terrain. Returns how many were placed.
pub(super) fn place_islands(ctx: &mut GenCtx<'_>) -> usize {
    let attempts = ctx.rng.span(ctx.cfg.sky.islands);
    let mut placed = 0;
    for _ in 0..attempts {
        let s = &ctx.cfg.sky;
        let (margin, clearance) = (s.edge_margin, s.clearance);
        let width = ctx.rng.span(s.width).max(1);
        let thickness = ctx.rng.span(s.thickness).max(1);
        let row = ctx.rng.span(s.row);
        let span = ctx.cols() - 2 * margin - width;
        if span <= 0 {
            log::debug!("sky island of width {} does not fit", width);
            continue;
        }
        let col = margin + ctx.rng.below(span);
        let ground = ctx.heights.top_in(col, col + width - 1).unwrap_or(0);
        if ground - (row + thickness) < clearance {
            log::debug!("sky island at column {} skipped: too close to terrain", col);
            continue;
        }
        stamp_island(ctx, col, row, width, thickness);
        placed += 1;
    }
    placed
}

// Depth of the island cross-section `ix` columns from its left edge.
fn island_depth(ix: i32, width: i32, thickness: i32) -> i32 {
    let from_centre = (ix as f32 - width as f32 / 2.0).abs();
    let d = thickness - (from_centre * thickness as f32 / width as f32 * 1.5) as i32;
    d.max(1)
}

fn stamp_island(ctx: &mut GenCtx<'_>, col: i32, row: i32, width: i32, thickness: i32) {
    let s = &ctx.cfg.sky;
    let (vine_chance, vine_max, crystal_chance, tree_chance) =
        (s.vine_chance, s.vine_max, s.crystal_chance, s.tree_chance);
    for ix in 0..width {
        let depth = island_depth(ix, width, thickness);
        let x = col + ix;
        for iy in 0..depth {
            let code = if iy == 0 { SKY_GRASS } else { DIRT };
            ctx.map.set_tile(x, row + iy, code);
        }
        if ctx.rng.chance(vine_chance) {
            let len = ctx.rng.range(1, vine_max);
            for v in 0..len {
                ctx.map.set_if_air(x, row + depth + v, VINE);
            }
        }
    }

    let centre = col + width / 2;
    if ctx.rng.chance(tree_chance) {
        stamp_tree(ctx, centre, row);
    } else {
        ctx.map.set_tile(centre, row - 1, CHEST);
    }
    if ctx.rng.chance(crystal_chance) {
        let cx = centre + ctx.rng.range(-2, 2);
        let cy = row - ctx.rng.range(2, 4);
        ctx.map.set_if_air(cx, cy, CRYSTAL);
    }
}
