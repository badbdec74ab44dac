use violet_tiles::types::{AIR, CHEST, PLANKS};

use super::GenCtx;
use super::chamber::ChamberPlan;

/// Buried plank rooms with a chest each. Returns how many were dug.
pub(super) fn dig(ctx: &mut GenCtx<'_>, plan: &ChamberPlan) -> usize {
    let count = 3 + ctx.rng.below(3);
    let cols = ctx.cols();
    let mut dug = 0;
    for _ in 0..count {
        let w = ctx.rng.range(10, 17);
        let h = ctx.rng.range(6, 9);
        let mut dx = 100 + ctx.rng.below((cols - 200).max(1));
        if dx >= cols {
            dx = cols - 50;
        }
        let dy = ctx.heights.at(dx) + 40 + ctx.rng.below(60);
        if dy >= ctx.rows() - 20 {
            continue;
        }
        if (dx..dx + w).any(|x| plan.in_window(x)) {
            log::debug!("dungeon at column {} skipped: overlaps chamber", dx);
            continue;
        }
        dig_room(ctx, dx, dy, w, h);
        dug += 1;
    }
    dug
}

fn dig_room(ctx: &mut GenCtx<'_>, x: i32, y: i32, w: i32, h: i32) {
    let bottom = ctx.rows() - ctx.cfg.caves.floor_guard;
    for rx in 0..w {
        for ry in 0..h {
            let (nx, ny) = (x + rx, y + ry);
            if ny >= bottom {
                continue;
            }
            let wall = rx == 0 || rx == w - 1 || ry == 0 || ry == h - 1;
            ctx.map.set_tile(nx, ny, if wall { PLANKS } else { AIR });
        }
    }
    let door = x + w / 2;
    ctx.map.set_tile(door, y, AIR);
    ctx.map.set_tile(door + 1, y, AIR);

    let chest_x = x + 2 + ctx.rng.below(w - 4);
    if y + h - 2 < bottom {
        ctx.map.set_tile(chest_x, y + h - 2, CHEST);
    }
}
