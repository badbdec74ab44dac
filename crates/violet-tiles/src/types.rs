use serde::Deserialize;

/// Integer tile code stored in the world grid. `0` is air.
pub type TileId = u16;

pub const AIR: TileId = 0;
pub const COAL_ORE: TileId = 128;
pub const GOLD_ORE: TileId = 133;
pub const IRON_ORE: TileId = 135;
pub const LOG: TileId = 220;
pub const PLANKS: TileId = 244;
pub const LAVA: TileId = 294;
pub const WATER: TileId = 295;
pub const LEAVES: TileId = 296;
pub const MUSHROOM: TileId = 297;
pub const CRYSTAL: TileId = 298;
pub const FLOWER: TileId = 299;
pub const VINE: TileId = 300;
pub const GRASS: TileId = 552;
pub const SKY_GRASS: TileId = 554;
pub const DIRT: TileId = 575;
pub const SAND: TileId = 576;
pub const STONE: TileId = 578;
pub const MOSSY_STONE: TileId = 579;
pub const DARK_STONE: TileId = 580;
pub const FURNACE: TileId = 597;
pub const CHEST: TileId = 600;

/// Stone variants that ore veins may replace.
#[inline]
pub fn is_stone_variant(code: TileId) -> bool {
    matches!(code, STONE | DARK_STONE | MOSSY_STONE)
}

/// Gameplay behavior attached to a tile type beyond solidity.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TileSpecial {
    #[default]
    None,
    Chest,
    Lava,
    Water,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TileType {
    pub code: TileId,
    pub name: String,
    pub solid: bool,
    pub special: TileSpecial,
    pub breakable: bool,
    pub glyph: Option<char>,
}
