use serde::Deserialize;
use std::error::Error;
use std::fs;
use std::path::Path;

/// Fixed dimensions and anchor columns of a world preset.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WorldSize {
    pub cols: usize,
    pub rows: usize,
    pub spawn_column: usize,
    /// Inclusive column range flattened around the spawn.
    pub spawn_window: (usize, usize),
    pub chamber_column: usize,
    /// One cave instance per this many columns.
    pub cave_spacing: usize,
    pub dungeons: bool,
}

pub const FULL_SIZE: WorldSize = WorldSize {
    cols: 400,
    rows: 150,
    spawn_column: 100,
    spawn_window: (80, 140),
    chamber_column: 300,
    cave_spacing: 15,
    dungeons: true,
};

pub const EMBEDDED_SIZE: WorldSize = WorldSize {
    cols: 200,
    rows: 100,
    spawn_column: 50,
    spawn_window: (30, 80),
    chamber_column: 160,
    cave_spacing: 25,
    dungeons: false,
};

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    Full,
    Embedded,
}

impl Preset {
    pub fn size(self) -> WorldSize {
        match self {
            Preset::Full => FULL_SIZE,
            Preset::Embedded => EMBEDDED_SIZE,
        }
    }
}

#[derive(Clone, Debug, Deserialize, Default)]
pub struct WorldGenConfig {
    #[serde(default)]
    pub world: WorldSection,
    #[serde(default)]
    pub biomes: Biomes,
    #[serde(default)]
    pub height: Height,
    #[serde(default)]
    pub terrain: Terrain,
    #[serde(default)]
    pub caves: Caves,
    #[serde(default)]
    pub tunnels: Tunnels,
    #[serde(default)]
    pub sky: Sky,
    #[serde(default)]
    pub chamber: Chamber,
    #[serde(default)]
    pub structures: Structures,
    #[serde(default)]
    pub buildings: Buildings,
    #[serde(default)]
    pub path_chests: PathChests,
}

impl WorldGenConfig {
    pub fn with_preset(preset: Preset) -> Self {
        let mut cfg = Self::default();
        cfg.world.preset = preset;
        cfg
    }

    #[inline]
    pub fn size(&self) -> WorldSize {
        self.world.preset.size()
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct WorldSection {
    #[serde(default = "default_preset")]
    pub preset: Preset,
    #[serde(default)]
    pub seed: Option<u64>,
}
fn default_preset() -> Preset {
    Preset::Full
}
impl Default for WorldSection {
    fn default() -> Self {
        Self {
            preset: default_preset(),
            seed: None,
        }
    }
}

/// Breakpoints on the low-frequency biome noise, in ascending order.
#[derive(Clone, Debug, Deserialize)]
pub struct Biomes {
    #[serde(default = "default_biome_frequency")]
    pub frequency: f32,
    #[serde(default = "default_plains_max")]
    pub plains_max: f32,
    #[serde(default = "default_forest_max")]
    pub forest_max: f32,
    #[serde(default = "default_mountains_max")]
    pub mountains_max: f32,
    #[serde(default = "default_desert_max")]
    pub desert_max: f32,
}
fn default_biome_frequency() -> f32 {
    0.003
}
fn default_plains_max() -> f32 {
    -0.35
}
fn default_forest_max() -> f32 {
    -0.1
}
fn default_mountains_max() -> f32 {
    0.15
}
fn default_desert_max() -> f32 {
    0.4
}
impl Default for Biomes {
    fn default() -> Self {
        Self {
            frequency: default_biome_frequency(),
            plains_max: default_plains_max(),
            forest_max: default_forest_max(),
            mountains_max: default_mountains_max(),
            desert_max: default_desert_max(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Height {
    #[serde(default = "default_height_base")]
    pub base: f32,
    #[serde(default = "default_transition_width")]
    pub transition_width: usize,
    #[serde(default = "default_slope_cap")]
    pub slope_cap: i32,
    /// Weights for the current column and up to three preceding columns.
    #[serde(default = "default_smoothing_weights")]
    pub smoothing_weights: Vec<f32>,
    #[serde(default = "default_top_margin")]
    pub top_margin: i32,
    #[serde(default = "default_bottom_margin")]
    pub bottom_margin: i32,
    #[serde(default = "default_dune_amplitude")]
    pub dune_amplitude: f32,
    #[serde(default = "default_dune_period")]
    pub dune_period: f32,
}
fn default_height_base() -> f32 {
    60.0
}
fn default_transition_width() -> usize {
    30
}
fn default_slope_cap() -> i32 {
    2
}
fn default_smoothing_weights() -> Vec<f32> {
    vec![4.0, 3.0, 2.0, 1.0]
}
fn default_top_margin() -> i32 {
    15
}
fn default_bottom_margin() -> i32 {
    30
}
fn default_dune_amplitude() -> f32 {
    2.0
}
fn default_dune_period() -> f32 {
    24.0
}
impl Default for Height {
    fn default() -> Self {
        Self {
            base: default_height_base(),
            transition_width: default_transition_width(),
            slope_cap: default_slope_cap(),
            smoothing_weights: default_smoothing_weights(),
            top_margin: default_top_margin(),
            bottom_margin: default_bottom_margin(),
            dune_amplitude: default_dune_amplitude(),
            dune_period: default_dune_period(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct OreMultipliers {
    pub plains: f32,
    pub forest: f32,
    pub mountains: f32,
    pub desert: f32,
    pub swamp: f32,
}
impl Default for OreMultipliers {
    fn default() -> Self {
        Self {
            plains: 1.0,
            forest: 1.0,
            mountains: 1.5,
            desert: 0.8,
            swamp: 0.9,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Terrain {
    pub soil_depth: (i32, i32),
    pub mountain_soil_depth: (i32, i32),
    pub desert_sand_depth: (i32, i32),
    pub mountain_stone_surface_chance: f32,
    pub underground_frequency: f32,
    pub crystal_chance: f32,
    pub coal_chance: f32,
    pub iron_chance: f32,
    pub gold_chance: f32,
    pub iron_min_depth: i32,
    pub gold_min_depth: i32,
    pub vein_size: (i32, i32),
    pub ore_multipliers: OreMultipliers,
    pub lava_rows: usize,
    pub swamp_water_rows: i32,
}
impl Default for Terrain {
    fn default() -> Self {
        Self {
            soil_depth: (8, 13),
            mountain_soil_depth: (2, 4),
            desert_sand_depth: (12, 16),
            mountain_stone_surface_chance: 0.3,
            underground_frequency: 0.02,
            crystal_chance: 0.1,
            coal_chance: 0.015,
            iron_chance: 0.008,
            gold_chance: 0.003,
            iron_min_depth: 30,
            gold_min_depth: 60,
            vein_size: (3, 7),
            ore_multipliers: OreMultipliers::default(),
            lava_rows: 8,
            swamp_water_rows: 5,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Caves {
    /// Minimum rows below the surface for a cave centre.
    pub min_depth: i32,
    pub bottom_margin: i32,
    /// Rows above the world bottom that carving never reaches.
    pub floor_guard: i32,
    pub cavern_chance: f32,
    pub lake_chance: f32,
    pub worm_life: (i32, i32),
    pub worm_turn: f32,
    pub worm_radius_min: f32,
    pub worm_radius_span: f32,
    pub cavern_radius: (i32, i32),
    pub cavern_chest_chance: f32,
    pub lake_radius: (i32, i32),
    pub spawn_crust: i32,
    pub mushroom_chance: f32,
}
impl Default for Caves {
    fn default() -> Self {
        Self {
            min_depth: 20,
            bottom_margin: 20,
            floor_guard: 10,
            cavern_chance: 0.25,
            lake_chance: 0.1,
            worm_life: (80, 199),
            worm_turn: 0.25,
            worm_radius_min: 2.0,
            worm_radius_span: 1.5,
            cavern_radius: (8, 19),
            cavern_chest_chance: 0.03,
            lake_radius: (6, 13),
            spawn_crust: 3,
            mushroom_chance: 0.08,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Tunnels {
    pub max_distance: f32,
    pub chance: f32,
    pub radius: i32,
}
impl Default for Tunnels {
    fn default() -> Self {
        Self {
            max_distance: 60.0,
            chance: 0.5,
            radius: 2,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Sky {
    pub islands: (i32, i32),
    pub width: (i32, i32),
    pub thickness: (i32, i32),
    pub row: (i32, i32),
    pub edge_margin: i32,
    pub clearance: i32,
    pub vine_chance: f32,
    pub vine_max: i32,
    pub crystal_chance: f32,
    pub tree_chance: f32,
}
impl Default for Sky {
    fn default() -> Self {
        Self {
            islands: (3, 5),
            width: (15, 34),
            thickness: (4, 7),
            row: (10, 39),
            edge_margin: 50,
            clearance: 8,
            vine_chance: 0.15,
            vine_max: 3,
            crystal_chance: 0.3,
            tree_chance: 0.5,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Chamber {
    pub width: i32,
    pub height: i32,
    /// Floor row offset below the flattened surface.
    pub depth: i32,
    pub ramp: i32,
    pub wall_rise: i32,
    pub pillar_spacing: i32,
    pub pillar_height: i32,
}
impl Default for Chamber {
    fn default() -> Self {
        Self {
            width: 48,
            height: 12,
            depth: 8,
            ramp: 3,
            wall_rise: 2,
            pillar_spacing: 6,
            pillar_height: 2,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Structures {
    pub tree_plains: f32,
    pub tree_forest: f32,
    pub tree_mountains: f32,
    pub flower_chance: f32,
    pub cactus_chance: f32,
    pub rock_chance: f32,
    pub trunk: (i32, i32),
    pub spawn_keep_clear: i32,
}
impl Default for Structures {
    fn default() -> Self {
        Self {
            tree_plains: 0.02,
            tree_forest: 0.12,
            tree_mountains: 0.005,
            flower_chance: 0.05,
            cactus_chance: 0.025,
            rock_chance: 0.03,
            trunk: (5, 9),
            spawn_keep_clear: 4,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Buildings {
    pub chance: f32,
    pub min_spacing: i32,
    pub max_spread: i32,
    /// Column offset of the spawn cottage from the spawn column.
    pub spawn_offset: i32,
}
impl Default for Buildings {
    fn default() -> Self {
        Self {
            chance: 0.01,
            min_spacing: 40,
            max_spread: 1,
            spawn_offset: 6,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct PathChests {
    pub count: usize,
    pub search: i32,
}
impl Default for PathChests {
    fn default() -> Self {
        Self {
            count: 4,
            search: 3,
        }
    }
}

pub fn load_config_from_path(path: &Path) -> Result<WorldGenConfig, Box<dyn Error>> {
    let s = fs::read_to_string(path)?;
    let cfg: WorldGenConfig = toml::from_str(&s)?;
    Ok(cfg)
}
