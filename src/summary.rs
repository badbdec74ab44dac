use std::collections::BTreeMap;

use serde::Serialize;
use violet_world::World;

/// Serializable digest of a generated world, written by `generate --report`.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct WorldSummary {
    /// Decimal string; TOML integers stop at `i64::MAX`.
    pub seed: String,
    pub cols: usize,
    pub rows: usize,
    /// Milliseconds per generation stage, in run order.
    pub stage_ms: Vec<(String, f64)>,
    pub spawn: Anchor,
    pub chamber: Anchor,
    pub stats: Stats,
    /// Number of columns per biome.
    pub biomes: BTreeMap<String, usize>,
    /// Number of cells per tile name, air excluded.
    pub tiles: BTreeMap<String, usize>,
    pub buildings: Vec<Building>,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct Anchor {
    pub column: i32,
    pub row: i32,
}

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct Stats {
    pub caves: usize,
    pub caverns: usize,
    pub lakes: usize,
    pub tunnels: usize,
    pub skipped_caves: usize,
    pub mushrooms: usize,
    pub sky_islands: usize,
    pub dungeons: usize,
    pub trees: usize,
    pub cacti: usize,
    pub rocks: usize,
    pub flowers: usize,
    pub path_chests: usize,
    pub chests: usize,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct Building {
    pub kind: String,
    pub column: i32,
}

impl WorldSummary {
    pub fn of(world: &World) -> Self {
        let r = &world.report;
        let mut biomes = BTreeMap::new();
        for b in &world.biomes {
            *biomes.entry(b.name().to_string()).or_insert(0) += 1;
        }
        let registry = world.tilemap.registry();
        let mut tiles = BTreeMap::new();
        for &code in world.tilemap.codes() {
            if code == violet_tiles::types::AIR {
                continue;
            }
            let name = registry
                .get(code)
                .map(|t| t.name.clone())
                .unwrap_or_else(|| format!("unknown_{code}"));
            *tiles.entry(name).or_insert(0) += 1;
        }
        Self {
            seed: world.seed.to_string(),
            cols: world.size.cols,
            rows: world.size.rows,
            stage_ms: r
                .stage_times
                .iter()
                .map(|(stage, d)| (format!("{stage:?}"), d.as_secs_f64() * 1000.0))
                .collect(),
            spawn: Anchor {
                column: world.spawn.column as i32,
                row: world.spawn.surface_row,
            },
            chamber: Anchor {
                column: world.chamber.column,
                row: world.chamber.floor_row,
            },
            stats: Stats {
                caves: r.caves.worms,
                caverns: r.caves.caverns,
                lakes: r.caves.lakes,
                tunnels: r.caves.tunnels,
                skipped_caves: r.caves.skipped,
                mushrooms: r.caves.mushrooms,
                sky_islands: r.sky_islands,
                dungeons: r.dungeons,
                trees: r.structures.trees,
                cacti: r.structures.cacti,
                rocks: r.structures.rocks,
                flowers: r.structures.flowers,
                path_chests: r.structures.path_chests,
                chests: r.chests,
            },
            biomes,
            tiles,
            buildings: r
                .structures
                .buildings
                .iter()
                .map(|(kind, column)| Building {
                    kind: kind.to_string(),
                    column: *column,
                })
                .collect(),
        }
    }

    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}
