use std::sync::Arc;

use violet_geom::Vec2;
use violet_tiles::TileRegistry;

use crate::generation::{
    Biome, ChamberAnchor, GenerationReport, HeightField, UndergroundMap, generate_world,
};
use crate::tilemap::Tilemap;
use crate::worldgen::{WorldGenConfig, WorldSize};

/// Where the player starts: the spawn column and the feet position on its
/// surface.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SpawnPoint {
    pub column: usize,
    pub surface_row: i32,
    pub feet: Vec2,
}

/// A finished world. Immutable apart from the grid, which gameplay mutates
/// through chest and break operations.
#[derive(Clone, Debug)]
pub struct World {
    pub seed: u64,
    pub size: WorldSize,
    pub tilemap: Tilemap,
    pub biomes: Vec<Biome>,
    pub heights: HeightField,
    pub underground: UndergroundMap,
    pub chamber: ChamberAnchor,
    pub spawn: SpawnPoint,
    pub report: GenerationReport,
}

impl World {
    pub fn generate(cfg: &WorldGenConfig, registry: Arc<TileRegistry>, seed: u64) -> Self {
        generate_world(cfg, registry, seed)
    }

    /// Biome of column `x`; Plains outside the map.
    pub fn biome_at(&self, x: i32) -> Biome {
        if x < 0 {
            return Biome::Plains;
        }
        self.biomes.get(x as usize).copied().unwrap_or(Biome::Plains)
    }

    pub fn biome_at_pixel(&self, px: f32) -> Biome {
        let col = (px / self.tilemap.tile_size() as f32).floor() as i32;
        self.biome_at(col)
    }

    #[inline]
    pub fn surface_row(&self, x: i32) -> Option<i32> {
        self.heights.get(x)
    }
}
