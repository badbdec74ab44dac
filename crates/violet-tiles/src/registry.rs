use hashbrown::HashMap;
use std::error::Error;
use std::fs;
use std::path::Path;

use crate::config::TilesConfig;
use crate::types::{AIR, TileId, TileSpecial, TileType};

const BUILTIN_TILES: &str = include_str!("../../../assets/tiles.toml");

/// Tile-type table: the single answer to "is this code solid".
///
/// Solidity is a function of the code alone. Air is never solid, declared
/// tiles use their `solid` flag, and undeclared non-zero codes are solid.
#[derive(Clone, Debug)]
pub struct TileRegistry {
    pub tiles: Vec<TileType>,
    pub by_name: HashMap<String, TileId>,
    by_code: HashMap<TileId, usize>,
    solid: Vec<bool>,
}

impl TileRegistry {
    /// Table compiled into the binary from `assets/tiles.toml`.
    pub fn builtin() -> Result<Self, Box<dyn Error>> {
        Self::from_toml_str(BUILTIN_TILES)
    }

    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, Box<dyn Error>> {
        let text = fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, Box<dyn Error>> {
        let cfg: TilesConfig = toml::from_str(text)?;
        Self::from_config(cfg)
    }

    pub fn from_config(cfg: TilesConfig) -> Result<Self, Box<dyn Error>> {
        let mut reg = TileRegistry {
            tiles: Vec::with_capacity(cfg.tiles.len()),
            by_name: HashMap::new(),
            by_code: HashMap::new(),
            solid: Vec::new(),
        };
        for def in cfg.tiles {
            if def.code == AIR {
                return Err(format!("tile '{}' uses reserved code 0", def.name).into());
            }
            if reg.by_code.contains_key(&def.code) {
                return Err(format!("duplicate tile code {} ('{}')", def.code, def.name).into());
            }
            if reg.by_name.contains_key(&def.name) {
                return Err(format!("duplicate tile name '{}'", def.name).into());
            }
            let ty = TileType {
                code: def.code,
                solid: def.solid.unwrap_or(true),
                special: def.special.unwrap_or_default(),
                breakable: def.breakable.unwrap_or(false),
                glyph: def.glyph,
                name: def.name,
            };
            reg.by_code.insert(ty.code, reg.tiles.len());
            reg.by_name.insert(ty.name.clone(), ty.code);
            reg.tiles.push(ty);
        }
        reg.rebuild_solidity();
        Ok(reg)
    }

    fn rebuild_solidity(&mut self) {
        let max = self.tiles.iter().map(|t| t.code as usize).max().unwrap_or(0);
        let mut solid = vec![true; max + 1];
        solid[AIR as usize] = false;
        for t in &self.tiles {
            solid[t.code as usize] = t.solid;
        }
        self.solid = solid;
    }

    #[inline]
    pub fn get(&self, code: TileId) -> Option<&TileType> {
        self.by_code.get(&code).map(|&i| &self.tiles[i])
    }

    pub fn id_by_name(&self, name: &str) -> Option<TileId> {
        self.by_name.get(name).copied()
    }

    #[inline]
    pub fn is_solid(&self, code: TileId) -> bool {
        self.solid.get(code as usize).copied().unwrap_or(true)
    }

    #[inline]
    pub fn special(&self, code: TileId) -> TileSpecial {
        self.get(code).map(|t| t.special).unwrap_or_default()
    }

    #[inline]
    pub fn is_breakable(&self, code: TileId) -> bool {
        self.get(code).is_some_and(|t| t.breakable)
    }

    pub fn glyph(&self, code: TileId) -> Option<char> {
        if code == AIR {
            return Some(' ');
        }
        self.get(code).and_then(|t| t.glyph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::*;

    #[test]
    fn builtin_table_matches_cosmetic_set() {
        let reg = TileRegistry::builtin().expect("builtin tiles");
        for code in [AIR, LOG, LEAVES, CHEST, WATER, LAVA, FLOWER, VINE, MUSHROOM] {
            assert!(!reg.is_solid(code), "code {code} should be passable");
        }
        for code in [GRASS, DIRT, STONE, SAND, PLANKS, CRYSTAL, DARK_STONE, GOLD_ORE] {
            assert!(reg.is_solid(code), "code {code} should be solid");
        }
        assert_eq!(reg.special(CHEST), TileSpecial::Chest);
        assert_eq!(reg.special(STONE), TileSpecial::None);
        assert!(reg.is_breakable(SAND));
        assert!(!reg.is_breakable(PLANKS));
    }

    #[test]
    fn undeclared_codes_are_solid() {
        let reg = TileRegistry::builtin().expect("builtin tiles");
        assert!(reg.get(1).is_none());
        assert!(reg.is_solid(1));
        assert!(reg.is_solid(u16::MAX));
    }

    #[test]
    fn rejects_duplicates_and_air() {
        let dup = r#"
            [[tiles]]
            name = "a"
            code = 5
            [[tiles]]
            name = "b"
            code = 5
        "#;
        assert!(TileRegistry::from_toml_str(dup).is_err());
        let air = r#"
            [[tiles]]
            name = "nothing"
            code = 0
        "#;
        assert!(TileRegistry::from_toml_str(air).is_err());
    }
}
