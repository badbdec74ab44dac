mod biome;
mod buildings;
mod caves;
mod chamber;
mod dungeons;
mod height;
mod sky;
mod structures;
mod terrain;

use std::sync::Arc;
use std::time::{Duration, Instant};

use violet_geom::Vec2;
use violet_tiles::TileRegistry;
use violet_tiles::types::CHEST;

use crate::noise::NoiseField;
use crate::rng::GenRng;
use crate::tilemap::Tilemap;
use crate::world::{SpawnPoint, World};
use crate::worldgen::{WorldGenConfig, WorldSize};
use crate::TILE_SIZE;

pub use self::biome::{Biome, UndergroundBiome, UndergroundMap, classify_columns};
pub use self::buildings::BuildingKind;
pub use self::caves::CaveStats;
pub use self::chamber::{ChamberAnchor, ChamberPlan};
pub use self::height::{FlatWindow, HeightField, HeightFieldBuilder};
pub use self::structures::StructureStats;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum GenStage {
    Biomes,
    Height,
    Terrain,
    Caves,
    SkyIslands,
    Dungeons,
    Chamber,
    Structures,
}

/// What one generation run did and how long each stage took.
#[derive(Clone, Debug, Default)]
pub struct GenerationReport {
    pub seed: u64,
    pub stage_times: Vec<(GenStage, Duration)>,
    pub caves: CaveStats,
    pub sky_islands: usize,
    pub dungeons: usize,
    pub structures: StructureStats,
    pub chests: usize,
}

impl GenerationReport {
    fn new(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    fn timed<T>(&mut self, stage: GenStage, f: impl FnOnce() -> T) -> T {
        let start = Instant::now();
        let out = f();
        let took = start.elapsed();
        log::debug!("worldgen stage {:?} took {:?}", stage, took);
        self.stage_times.push((stage, took));
        out
    }

    pub fn stage_time(&self, stage: GenStage) -> Option<Duration> {
        self.stage_times
            .iter()
            .find(|(s, _)| *s == stage)
            .map(|(_, d)| *d)
    }

    pub fn total_time(&self) -> Duration {
        self.stage_times.iter().map(|(_, d)| *d).sum()
    }

    fn log_summary(&self, size: &WorldSize) {
        log::info!(
            "generated {}x{} world seed={} in {:?}: caves={} caverns={} lakes={} tunnels={} skipped={} islands={} dungeons={} trees={} buildings={} chests={}",
            size.cols,
            size.rows,
            self.seed,
            self.total_time(),
            self.caves.worms,
            self.caves.caverns,
            self.caves.lakes,
            self.caves.tunnels,
            self.caves.skipped,
            self.sky_islands,
            self.dungeons,
            self.structures.trees,
            self.structures.buildings.len(),
            self.chests,
        );
    }
}

/// Mutable state shared by the fill, carve and place stages.
pub(crate) struct GenCtx<'a> {
    pub cfg: &'a WorldGenConfig,
    pub size: WorldSize,
    pub noise: NoiseField,
    pub rng: GenRng,
    pub map: Tilemap,
    pub biomes: Vec<Biome>,
    pub heights: HeightField,
    pub underground: UndergroundMap,
    // Inclusive (x0, y0, x1, y1) rectangles carving may not touch.
    carve_guards: Vec<(i32, i32, i32, i32)>,
}

impl GenCtx<'_> {
    #[inline]
    pub fn cols(&self) -> i32 {
        self.size.cols as i32
    }

    #[inline]
    pub fn rows(&self) -> i32 {
        self.size.rows as i32
    }

    #[inline]
    pub fn biome(&self, x: i32) -> Biome {
        if x < 0 {
            return Biome::Plains;
        }
        self.biomes.get(x as usize).copied().unwrap_or(Biome::Plains)
    }

    /// Clears one cell for an organic carve. Cells on the world edge, in
    /// the bottom guard rows, or under a carve guard are left alone.
    pub fn carve(&mut self, x: i32, y: i32) -> bool {
        let bottom = self.rows() - self.cfg.caves.floor_guard;
        if x <= 0 || x >= self.cols() - 1 || y <= 0 || y >= bottom {
            return false;
        }
        if self
            .carve_guards
            .iter()
            .any(|&(x0, y0, x1, y1)| x >= x0 && x <= x1 && y >= y0 && y <= y1)
        {
            return false;
        }
        self.map.set_tile(x, y, violet_tiles::types::AIR)
    }

    fn guard_spawn_crust(&mut self) {
        let (start, end) = self.size.spawn_window;
        let crust = self.cfg.caves.spawn_crust;
        let deepest = (start as i32..=end as i32)
            .filter_map(|x| self.heights.get(x))
            .max();
        if let Some(deepest) = deepest {
            self.carve_guards.push((start as i32, 0, end as i32, deepest + crust - 1));
        }
    }
}

/// Runs the whole pipeline for `seed`. Deterministic in `(cfg, seed)`.
pub fn generate_world(cfg: &WorldGenConfig, registry: Arc<TileRegistry>, seed: u64) -> World {
    let size = cfg.size();
    let noise = NoiseField::for_world(seed);
    let mut report = GenerationReport::new(seed);

    let biomes = report.timed(GenStage::Biomes, || {
        classify_columns(&noise, &cfg.biomes, size.cols)
    });
    let plan = ChamberPlan::resolve(&size, &cfg.chamber);
    let heights = report.timed(GenStage::Height, || {
        HeightFieldBuilder::new(&noise, &cfg.height, size.rows)
            .build(&biomes, &[size.spawn_window, plan.flat_window()])
    });

    let mut ctx = GenCtx {
        cfg,
        size,
        noise,
        rng: GenRng::from_seed(seed),
        map: Tilemap::new(size.cols, size.rows, TILE_SIZE, registry),
        biomes,
        heights,
        underground: UndergroundMap::new(size.cols, size.rows),
        carve_guards: Vec::new(),
    };
    ctx.guard_spawn_crust();

    report.timed(GenStage::Terrain, || {
        terrain::fill_columns(&mut ctx);
        terrain::seed_ores(&mut ctx);
        terrain::pour_liquids(&mut ctx);
    });
    report.caves = report.timed(GenStage::Caves, || caves::carve_caves(&mut ctx));
    report.sky_islands = report.timed(GenStage::SkyIslands, || sky::place_islands(&mut ctx));
    if size.dungeons {
        report.dungeons = report.timed(GenStage::Dungeons, || dungeons::dig(&mut ctx, &plan));
    }
    let chamber = report.timed(GenStage::Chamber, || chamber::carve(&mut ctx, &plan));
    report.structures =
        report.timed(GenStage::Structures, || structures::decorate(&mut ctx, &plan));
    report.chests = ctx.map.count(CHEST);
    report.log_summary(&size);

    let spawn = spawn_point(&ctx);
    World {
        seed,
        size,
        tilemap: ctx.map,
        biomes: ctx.biomes,
        heights: ctx.heights,
        underground: ctx.underground,
        chamber,
        spawn,
        report,
    }
}

fn spawn_point(ctx: &GenCtx<'_>) -> SpawnPoint {
    let column = ctx.size.spawn_column;
    let surface_row = ctx.heights.at(column as i32);
    let ts = TILE_SIZE as f32;
    SpawnPoint {
        column,
        surface_row,
        feet: Vec2::new(column as f32 * ts + ts * 0.5, surface_row as f32 * ts),
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use violet_tiles::types::STONE;

    use super::*;

    /// Context over a flat world: surface row `surface` in every column and
    /// stone from there down. Spawn sits at a tenth of the width and the
    /// chamber at seventeen twentieths.
    pub(crate) fn flat_ctx(
        cfg: &WorldGenConfig,
        cols: usize,
        rows: usize,
        surface: i32,
    ) -> GenCtx<'_> {
        let size = WorldSize {
            cols,
            rows,
            spawn_column: cols / 10,
            spawn_window: (cols / 20, cols * 3 / 20),
            chamber_column: cols * 17 / 20,
            cave_spacing: 15,
            dungeons: true,
        };
        let registry = Arc::new(TileRegistry::builtin().expect("builtin tiles"));
        let mut map = Tilemap::new(cols, rows, TILE_SIZE, registry);
        map.fill_rect(0, surface, cols as i32 - 1, rows as i32 - 1, STONE);
        GenCtx {
            cfg,
            size,
            noise: NoiseField::for_world(7),
            rng: GenRng::from_seed(7),
            map,
            biomes: vec![Biome::Plains; cols],
            heights: HeightField::from_rows(vec![surface; cols]),
            underground: UndergroundMap::new(cols, rows),
            carve_guards: Vec::new(),
        }
    }
}
