use violet_tiles::types::{AIR, CHEST, FLOWER, GRASS, LEAVES, LOG, SAND, STONE};

use super::GenCtx;
use super::biome::Biome;
use super::buildings::BuildingKind;
use super::chamber::ChamberPlan;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StructureStats {
    pub trees: usize,
    pub cacti: usize,
    pub rocks: usize,
    pub flowers: usize,
    /// Kind and left column of every stamped building.
    pub buildings: Vec<(BuildingKind, i32)>,
    pub path_chests: usize,
}

// Decorations keep this many columns away from the chamber and buildings.
const MARGIN: i32 = 3;

pub(super) fn decorate(ctx: &mut GenCtx<'_>, plan: &ChamberPlan) -> StructureStats {
    let mut stats = StructureStats::default();
    let spawn = ctx.size.spawn_column as i32;

    let cottage_x = spawn + ctx.cfg.buildings.spawn_offset;
    let cottage_floor = ctx.heights.at(cottage_x);
    BuildingKind::Cottage.stamp(ctx, cottage_x, cottage_floor);
    stats.buildings.push((BuildingKind::Cottage, cottage_x));

    let keep_clear = ctx.cfg.structures.spawn_keep_clear;
    let blocked = |stats: &StructureStats, x: i32| {
        (x - spawn).abs() <= keep_clear
            || (x >= plan.x0 - plan.ramp - MARGIN && x <= plan.x1 + plan.ramp + MARGIN)
            || stats
                .buildings
                .iter()
                .any(|&(k, bx)| x >= bx - MARGIN && x < bx + k.width() + MARGIN)
    };

    let mut last_building = cottage_x;
    let mut x = 5;
    while x < ctx.cols() - 5 {
        if blocked(&stats, x) {
            x += 1;
            continue;
        }
        let y = ctx.heights.at(x);
        let biome = ctx.biome(x);
        let above_clear = ctx.map.is_air(x, y - 1);

        if let Some(kind) = try_building(ctx, &stats, x, last_building, &blocked) {
            let floor = ctx.heights.top_in(x, x + kind.width() - 1).unwrap_or(y);
            kind.stamp(ctx, x, floor);
            stats.buildings.push((kind, x));
            last_building = x;
            x += kind.width() + MARGIN;
            continue;
        }

        let surface = ctx.map.get_tile(x, y);
        let s = &ctx.cfg.structures;
        let tree_chance = match biome {
            Biome::Plains => s.tree_plains,
            Biome::Forest => s.tree_forest,
            Biome::Mountains => s.tree_mountains,
            _ => 0.0,
        };
        let (flower_chance, cactus_chance, rock_chance) =
            (s.flower_chance, s.cactus_chance, s.rock_chance);

        if surface == GRASS {
            if ctx.rng.chance(tree_chance) && above_clear {
                stamp_tree(ctx, x, y);
                stats.trees += 1;
                x += 4;
                continue;
            } else if ctx.rng.chance(flower_chance) && above_clear {
                ctx.map.set_tile(x, y - 1, FLOWER);
                stats.flowers += 1;
            }
        }
        if surface == SAND && ctx.rng.chance(cactus_chance) && above_clear {
            stamp_cactus(ctx, x, y);
            stats.cacti += 1;
            x += 3;
            continue;
        }
        if biome == Biome::Mountains && ctx.rng.chance(rock_chance) {
            stamp_rocks(ctx, x, y);
            stats.rocks += 1;
        }
        x += 1;
    }

    stats.path_chests = place_path_chests(ctx, plan);
    stats
}

fn try_building(
    ctx: &mut GenCtx<'_>,
    stats: &StructureStats,
    x: i32,
    last: i32,
    blocked: &impl Fn(&StructureStats, i32) -> bool,
) -> Option<BuildingKind> {
    let b = &ctx.cfg.buildings;
    let (chance, min_spacing, max_spread) = (b.chance, b.min_spacing, b.max_spread);
    if (x - last).abs() < min_spacing || !ctx.rng.chance(chance) {
        return None;
    }
    let kind = BuildingKind::for_biome(ctx.biome(x));
    let end = x + kind.width() - 1;
    if end >= ctx.cols() - 5 || (x..=end).any(|c| blocked(stats, c)) {
        return None;
    }
    match ctx.heights.spread(x, end) {
        Some(spread) if spread <= max_spread => Some(kind),
        _ => None,
    }
}

/// Trunk rising from row `root_y - 1` with a rounded leaf crown.
pub(super) fn stamp_tree(ctx: &mut GenCtx<'_>, x: i32, root_y: i32) {
    let height = ctx.rng.span(ctx.cfg.structures.trunk);
    for h in 1..=height {
        ctx.map.set_tile(x, root_y - h, LOG);
    }
    let top = root_y - height;
    for ly in (top - 3)..=(top + 1) {
        let radius = (3 - (ly - top + 1).abs()).max(1);
        for lx in (x - radius)..=(x + radius) {
            let dist = (lx - x).abs() as f32 + (ly - top).abs() as f32 * 0.5;
            if dist <= radius as f32 + 0.5 {
                ctx.map.set_if_air(lx, ly, LEAVES);
            }
        }
    }
}

fn stamp_cactus(ctx: &mut GenCtx<'_>, x: i32, root_y: i32) {
    let height = ctx.rng.range(2, 4);
    for h in 1..=height {
        ctx.map.set_tile(x, root_y - h, LOG);
    }
    if height > 2 && ctx.rng.chance(0.5) {
        let arm = root_y - height / 2;
        ctx.map.set_tile(x - 1, arm, LOG);
        ctx.map.set_tile(x + 1, arm, LOG);
    }
}

fn stamp_rocks(ctx: &mut GenCtx<'_>, x: i32, root_y: i32) {
    let size = ctx.rng.range(2, 4);
    for rx in (-size / 2)..=(size / 2) {
        for ry in 0..(size - rx.abs()) {
            ctx.map.set_if_air(x + rx, root_y - 1 - ry, STONE);
        }
    }
}

/// Healing chests on the walk from spawn to the chamber, one tile above
/// solid ground.
fn place_path_chests(ctx: &mut GenCtx<'_>, plan: &ChamberPlan) -> usize {
    let a = ctx.size.spawn_column as i32;
    let b = plan.flat_window().0 as i32;
    let n = ctx.cfg.path_chests.count as i32;
    let search = ctx.cfg.path_chests.search.max(0);
    if b <= a || n == 0 {
        return 0;
    }
    let offsets: Vec<i32> = std::iter::once(0)
        .chain((1..=search).flat_map(|d| [d, -d]))
        .collect();

    let mut placed = 0;
    for i in 0..n {
        let target = a + (i + 1) * (b - a) / (n + 1);
        let spot = offsets
            .iter()
            .map(|o| target + o)
            .find_map(|x| chest_row(ctx, x).map(|y| (x, y)));
        let (x, y) = match spot {
            Some(spot) => spot,
            None => {
                // Nothing to stand on nearby: put the ground back.
                let ground = ctx.heights.at(target);
                if !ctx.map.is_solid_at(target, ground) {
                    ctx.map.set_tile(target, ground, STONE);
                }
                log::debug!("path chest near column {} needed its ground restored", target);
                (target, ground - 1)
            }
        };
        ctx.map.set_tile(x, y, CHEST);
        placed += 1;
    }
    placed
}

/// Row for a chest in column `x`: on the first solid tile at or below the
/// surface row, when the cell above it is open air. Carving may have
/// hollowed out the surface itself.
fn chest_row(ctx: &GenCtx<'_>, x: i32) -> Option<i32> {
    if !ctx.map.in_bounds(x, 0) {
        return None;
    }
    let surface = ctx.heights.at(x);
    let bottom = ctx.rows() - ctx.cfg.caves.floor_guard;
    let ground = (surface..=bottom.max(surface)).find(|&y| ctx.map.is_solid_at(x, y))?;
    (ctx.map.get_tile(x, ground - 1) == AIR).then_some(ground - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::testing::flat_ctx;
    use crate::worldgen::WorldGenConfig;

    const SURFACE: i32 = 30;

    fn quiet_cfg() -> WorldGenConfig {
        let mut cfg = WorldGenConfig::default();
        cfg.buildings.chance = 0.0;
        cfg.path_chests.count = 0;
        cfg.structures.tree_forest = 0.0;
        cfg.structures.flower_chance = 0.0;
        cfg
    }

    fn forest(cfg: &WorldGenConfig) -> (GenCtx<'_>, ChamberPlan) {
        let mut ctx = flat_ctx(cfg, 200, 60, SURFACE);
        ctx.map.fill_rect(0, SURFACE, 199, SURFACE, GRASS);
        ctx.biomes = vec![Biome::Forest; 200];
        let plan = ChamberPlan::resolve(&ctx.size, &cfg.chamber);
        (ctx, plan)
    }

    #[test]
    fn decorations_need_open_air_above() {
        let mut cfg = quiet_cfg();
        cfg.structures.flower_chance = 1.0;
        let (mut ctx, plan) = forest(&cfg);
        ctx.map.set_tile(60, SURFACE - 1, STONE);
        ctx.map.set_tile(61, SURFACE - 1, STONE);
        let stats = decorate(&mut ctx, &plan);

        assert!(stats.flowers > 0);
        assert_eq!(ctx.map.get_tile(59, SURFACE - 1), FLOWER);
        assert_eq!(ctx.map.get_tile(60, SURFACE - 1), STONE);
        assert_eq!(ctx.map.get_tile(61, SURFACE - 1), STONE);
        assert_eq!(ctx.map.get_tile(62, SURFACE - 1), FLOWER);
    }

    #[test]
    fn trees_skip_covered_ground() {
        let mut cfg = quiet_cfg();
        cfg.structures.tree_forest = 1.0;
        let (mut ctx, plan) = forest(&cfg);
        // Trees every fourth column from 43 would root at 59.
        ctx.map.set_tile(59, SURFACE - 1, STONE);
        ctx.map.set_tile(60, SURFACE - 1, STONE);
        let stats = decorate(&mut ctx, &plan);

        assert!(stats.trees > 0);
        assert_eq!(ctx.map.get_tile(55, SURFACE - 1), LOG);
        assert_eq!(ctx.map.get_tile(59, SURFACE - 1), STONE);
        assert_eq!(ctx.map.get_tile(60, SURFACE - 1), STONE);
        assert_eq!(ctx.map.get_tile(61, SURFACE - 1), LOG);
        for x in 0..200 {
            if ctx.map.get_tile(x, SURFACE - 1) == LOG {
                assert!(!plan.in_window(x), "tree at {x} inside the chamber window");
            }
        }
    }

    #[test]
    fn buildings_keep_their_spacing() {
        let mut cfg = quiet_cfg();
        cfg.buildings.chance = 1.0;
        let (mut ctx, plan) = forest(&cfg);
        let stats = decorate(&mut ctx, &plan);

        let mut xs: Vec<i32> = stats.buildings.iter().map(|&(_, x)| x).collect();
        assert!(xs.len() >= 3, "{:?}", stats.buildings);
        assert_eq!(stats.buildings[0].0, BuildingKind::Cottage);
        xs.sort_unstable();
        for pair in xs.windows(2) {
            assert!(pair[1] - pair[0] >= cfg.buildings.min_spacing, "{xs:?}");
        }
        for &(kind, x) in &stats.buildings {
            assert!((x..x + kind.width()).all(|c| !plan.in_window(c)), "{kind:?} at {x}");
        }
    }

    #[test]
    fn path_chests_find_ground_under_carved_surface() {
        let mut cfg = quiet_cfg();
        cfg.path_chests.count = 4;
        let (mut ctx, plan) = forest(&cfg);
        let a = ctx.size.spawn_column as i32;
        let b = plan.flat_window().0 as i32;
        let target = a + (b - a) / 5;
        // A cave opened the surface and the rows below around the first
        // target, wider than the search reach.
        ctx.map.fill_rect(target - 5, SURFACE, target + 5, SURFACE + 6, AIR);
        // Open sky over the second target, down to the bottom guard.
        let second = a + 2 * (b - a) / 5;
        ctx.map.fill_rect(second - 4, 0, second + 4, 59, AIR);

        assert_eq!(place_path_chests(&mut ctx, &plan), 4);
        assert_eq!(ctx.map.get_tile(target, SURFACE + 6), CHEST);
        assert!(ctx.map.is_solid_at(target, SURFACE + 7));
        assert_eq!(ctx.map.get_tile(second, SURFACE - 1), CHEST);
        assert!(ctx.map.is_solid_at(second, SURFACE));
        assert_eq!(ctx.map.count(CHEST), 4);
    }
}
