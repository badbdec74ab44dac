use crate::types::{AIR, TileId};

/// Cell layout of the tile atlas image: code `n` lives in cell `n - 1`,
/// row-major, `columns` cells per row.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct AtlasLayout {
    pub columns: u32,
    pub tile_size: u32,
}

/// Source rectangle in atlas pixels.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct AtlasRect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl Default for AtlasLayout {
    fn default() -> Self {
        Self {
            columns: 24,
            tile_size: 16,
        }
    }
}

impl AtlasLayout {
    pub fn source_rect(&self, code: TileId) -> Option<AtlasRect> {
        if code == AIR || self.columns == 0 {
            return None;
        }
        let index = u32::from(code) - 1;
        Some(AtlasRect {
            x: (index % self.columns) * self.tile_size,
            y: (index / self.columns) * self.tile_size,
            w: self.tile_size,
            h: self.tile_size,
        })
    }
}
