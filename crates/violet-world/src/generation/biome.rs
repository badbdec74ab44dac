use std::fmt;

use crate::noise::NoiseField;
use crate::worldgen::Biomes;

/// Surface biome of a world column, ordered by the noise breakpoints.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(test, derive(proptest_derive::Arbitrary))]
pub enum Biome {
    Plains,
    Forest,
    Mountains,
    Desert,
    Swamp,
}

impl Biome {
    pub const ALL: [Biome; 5] = [
        Biome::Plains,
        Biome::Forest,
        Biome::Mountains,
        Biome::Desert,
        Biome::Swamp,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Biome::Plains => "Plains",
            Biome::Forest => "Forest",
            Biome::Mountains => "Mountains",
            Biome::Desert => "Desert",
            Biome::Swamp => "Swamp",
        }
    }

    pub fn from_noise(v: f32, cfg: &Biomes) -> Biome {
        if v < cfg.plains_max {
            Biome::Plains
        } else if v < cfg.forest_max {
            Biome::Forest
        } else if v < cfg.mountains_max {
            Biome::Mountains
        } else if v < cfg.desert_max {
            Biome::Desert
        } else {
            Biome::Swamp
        }
    }
}

impl fmt::Display for Biome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Stone-layer material zone.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum UndergroundBiome {
    #[default]
    Normal,
    Crystal,
    Mushroom,
    Lava,
}

impl UndergroundBiome {
    pub fn classify(noise: f32, depth_ratio: f32) -> UndergroundBiome {
        if depth_ratio > 0.8 && noise > 0.2 {
            UndergroundBiome::Lava
        } else if depth_ratio > 0.4 && depth_ratio < 0.7 && noise > 0.3 {
            UndergroundBiome::Crystal
        } else if noise < -0.3 && depth_ratio > 0.3 {
            UndergroundBiome::Mushroom
        } else {
            UndergroundBiome::Normal
        }
    }
}

/// Underground classification for every cell; `Normal` outside stone.
#[derive(Clone, Debug)]
pub struct UndergroundMap {
    cols: usize,
    rows: usize,
    cells: Vec<UndergroundBiome>,
}

impl UndergroundMap {
    pub fn new(cols: usize, rows: usize) -> Self {
        Self {
            cols,
            rows,
            cells: vec![UndergroundBiome::Normal; cols * rows],
        }
    }

    pub fn get(&self, x: i32, y: i32) -> UndergroundBiome {
        if x < 0 || y < 0 || x as usize >= self.cols || y as usize >= self.rows {
            return UndergroundBiome::Normal;
        }
        self.cells[y as usize * self.cols + x as usize]
    }

    pub(crate) fn set(&mut self, x: usize, y: usize, zone: UndergroundBiome) {
        if x < self.cols && y < self.rows {
            self.cells[y * self.cols + x] = zone;
        }
    }

    pub fn count(&self, zone: UndergroundBiome) -> usize {
        self.cells.iter().filter(|&&z| z == zone).count()
    }
}

/// One biome per column from low-frequency 1D noise.
pub fn classify_columns(noise: &NoiseField, cfg: &Biomes, cols: usize) -> Vec<Biome> {
    (0..cols)
        .map(|x| Biome::from_noise(noise.sample_1d(x as f32 * cfg.frequency), cfg))
        .collect()
}
