use violet_geom::Vec2;
use violet_tiles::types::{AIR, CRYSTAL, STONE};

use super::GenCtx;
use crate::TILE_SIZE;
use crate::worldgen::{Chamber, WorldSize};

/// Column layout of the monster arena, fixed before heights are built so
/// the surrounding window can be flattened first.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ChamberPlan {
    pub centre: i32,
    /// Left wall column.
    pub x0: i32,
    /// Right wall column.
    pub x1: i32,
    pub ramp: i32,
    pub half: i32,
}

impl ChamberPlan {
    /// Clamps the target column so walls and ramps stay inside the map.
    pub fn resolve(size: &WorldSize, cfg: &Chamber) -> Self {
        let half = (cfg.width / 2).max(2);
        let ramp = cfg.ramp.max(0);
        let cols = size.cols as i32;
        let lo = half + ramp + 1;
        let hi = (cols - half - ramp - 2).max(lo);
        let centre = (size.chamber_column as i32).clamp(lo, hi);
        Self {
            centre,
            x0: centre - half,
            x1: centre + half - 1,
            ramp,
            half,
        }
    }

    /// Inclusive columns covered by walls, pocket and ramps.
    pub fn flat_window(&self) -> (usize, usize) {
        let start = (self.x0 - self.ramp).max(0) as usize;
        let end = (self.x1 + self.ramp).max(0) as usize;
        (start, end)
    }

    pub fn in_window(&self, x: i32) -> bool {
        x >= self.x0 - self.ramp && x <= self.x1 + self.ramp
    }

    /// Pillar columns, paired left and right of the centre.
    pub fn pillar_columns(&self, spacing: i32) -> Vec<i32> {
        let spacing = spacing.max(1);
        let mut out = Vec::new();
        let mut off = spacing / 2;
        while off < self.half - 1 {
            out.push(self.centre - off);
            out.push(self.centre + off);
            off += spacing;
        }
        out
    }
}

/// Where the arena ended up. Written once per world.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ChamberAnchor {
    pub column: i32,
    pub floor_row: i32,
    pub x0: i32,
    pub x1: i32,
    /// Feet position of an actor standing on the centre of the floor.
    pub feet: Vec2,
}

pub(super) fn carve(ctx: &mut GenCtx<'_>, plan: &ChamberPlan) -> ChamberAnchor {
    let c = ctx.cfg.chamber.clone();
    let surface = ctx.heights.at(plan.centre);
    let lowest = ctx.rows() - ctx.cfg.caves.floor_guard - 3;
    let floor = (surface + c.depth).min(lowest);
    let wall_top = surface - c.wall_rise;

    ctx.map.fill_rect(plan.x0 + 1, floor - c.height, plan.x1 - 1, floor - 1, AIR);
    ctx.map.fill_rect(plan.x0, floor, plan.x1, floor + 1, STONE);
    ctx.map.fill_rect(plan.x0, wall_top, plan.x0, floor + 1, STONE);
    ctx.map.fill_rect(plan.x1, wall_top, plan.x1, floor + 1, STONE);

    let pillars = plan.pillar_columns(c.pillar_spacing);
    for &px in &pillars {
        ctx.map.fill_rect(px, floor - c.pillar_height, px, floor - 1, STONE);
        ctx.map.set_tile(px, floor - c.pillar_height - 1, CRYSTAL);
    }

    if plan.ramp > 0 {
        for i in 0..plan.ramp {
            let rise = c.wall_rise * (i + 1) / plan.ramp;
            if rise == 0 {
                continue;
            }
            let left = plan.x0 - plan.ramp + i;
            let right = plan.x1 + plan.ramp - i;
            ctx.map.fill_rect(left, surface - rise, left, surface - 1, STONE);
            ctx.map.fill_rect(right, surface - rise, right, surface - 1, STONE);
        }
    }

    let ts = TILE_SIZE as f32;
    let anchor = ChamberAnchor {
        column: plan.centre,
        floor_row: floor,
        x0: plan.x0,
        x1: plan.x1,
        feet: Vec2::new(plan.centre as f32 * ts + ts * 0.5, floor as f32 * ts),
    };
    log::info!(
        "mountain chamber at columns {}..={} floor row {} ({} pillars)",
        plan.x0,
        plan.x1,
        floor,
        pillars.len()
    );
    anchor
}
