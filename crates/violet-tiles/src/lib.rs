//! Tile codes, the tile-type table and per-tile resource caching.
#![forbid(unsafe_code)]

pub mod atlas;
pub mod cache;
pub mod config;
pub mod registry;
pub mod types;

pub use atlas::{AtlasLayout, AtlasRect};
pub use cache::TileCache;
pub use registry::TileRegistry;
pub use types::{TileId, TileSpecial, TileType};
