use serde::Deserialize;

use crate::types::{TileId, TileSpecial};

// Top-level tiles config file
#[derive(Deserialize, Debug, Clone)]
pub struct TilesConfig {
    pub tiles: Vec<TileDef>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct TileDef {
    pub name: String,
    pub code: TileId,
    #[serde(default)]
    pub solid: Option<bool>,
    #[serde(default)]
    pub special: Option<TileSpecial>,
    #[serde(default)]
    pub breakable: Option<bool>,
    #[serde(default)]
    pub glyph: Option<char>,
}
