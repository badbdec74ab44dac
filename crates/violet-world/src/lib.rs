//! Procedural 2D world: noise, config, the tile grid and the generation
//! pipeline that fills it.
#![forbid(unsafe_code)]

pub mod generation;
pub mod noise;
pub mod rng;
pub mod tilemap;
pub mod world;
pub mod worldgen;

/// Edge length of one tile in world pixels.
pub const TILE_SIZE: u32 = 16;

pub use generation::{
    Biome, BuildingKind, ChamberAnchor, GenStage, GenerationReport, HeightField, UndergroundBiome,
};
pub use tilemap::Tilemap;
pub use world::{SpawnPoint, World};
pub use worldgen::{Preset, WorldGenConfig, WorldSize};
