use std::sync::Arc;

use violet_tiles::types::AIR;
use violet_tiles::{TileId, TileRegistry, TileSpecial};

/// The finished world grid plus the tile table that classifies it.
///
/// Dimensions are fixed at construction. Reads outside the grid return air;
/// writes outside the grid are ignored.
#[derive(Clone, Debug)]
pub struct Tilemap {
    cols: usize,
    rows: usize,
    tile_size: u32,
    grid: Vec<TileId>,
    registry: Arc<TileRegistry>,
}

impl Tilemap {
    pub fn new(cols: usize, rows: usize, tile_size: u32, registry: Arc<TileRegistry>) -> Self {
        Self {
            cols,
            rows,
            tile_size,
            grid: vec![AIR; cols * rows],
            registry,
        }
    }

    /// Build from a row-major code array. Returns `None` on a size mismatch.
    pub fn from_codes(
        cols: usize,
        rows: usize,
        tile_size: u32,
        registry: Arc<TileRegistry>,
        codes: Vec<TileId>,
    ) -> Option<Self> {
        if codes.len() != cols * rows {
            return None;
        }
        Some(Self {
            cols,
            rows,
            tile_size,
            grid: codes,
            registry,
        })
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn tile_size(&self) -> u32 {
        self.tile_size
    }

    #[inline]
    pub fn pixel_width(&self) -> f32 {
        (self.cols as u32 * self.tile_size) as f32
    }

    #[inline]
    pub fn pixel_height(&self) -> f32 {
        (self.rows as u32 * self.tile_size) as f32
    }

    #[inline]
    pub fn registry(&self) -> &TileRegistry {
        &self.registry
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.cols || y >= self.rows {
            return None;
        }
        Some(y * self.cols + x)
    }

    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        self.index(x, y).is_some()
    }

    #[inline]
    pub fn get_tile(&self, x: i32, y: i32) -> TileId {
        self.index(x, y).map(|i| self.grid[i]).unwrap_or(AIR)
    }

    #[inline]
    pub fn is_solid(&self, code: TileId) -> bool {
        self.registry.is_solid(code)
    }

    #[inline]
    pub fn is_solid_at(&self, x: i32, y: i32) -> bool {
        self.is_solid(self.get_tile(x, y))
    }

    #[inline]
    pub fn is_air(&self, x: i32, y: i32) -> bool {
        self.get_tile(x, y) == AIR
    }

    /// Row-major view of one grid row, for renderers.
    pub fn row(&self, y: usize) -> Option<&[TileId]> {
        if y >= self.rows {
            return None;
        }
        Some(&self.grid[y * self.cols..(y + 1) * self.cols])
    }

    pub fn count(&self, code: TileId) -> usize {
        self.grid.iter().filter(|&&c| c == code).count()
    }

    pub fn codes(&self) -> &[TileId] {
        &self.grid
    }

    /// Removes a chest at `(x, y)`. Returns whether one was there.
    pub fn take_chest(&mut self, x: i32, y: i32) -> bool {
        match self.index(x, y) {
            Some(i) if self.registry.special(self.grid[i]) == TileSpecial::Chest => {
                self.grid[i] = AIR;
                true
            }
            _ => false,
        }
    }

    /// Clears a breakable tile to air and returns its former code.
    pub fn break_tile(&mut self, x: i32, y: i32) -> Option<TileId> {
        let i = self.index(x, y)?;
        let code = self.grid[i];
        if self.registry.is_breakable(code) {
            self.grid[i] = AIR;
            Some(code)
        } else {
            None
        }
    }

    // Generation-time writes.

    #[inline]
    pub(crate) fn set_tile(&mut self, x: i32, y: i32, code: TileId) -> bool {
        match self.index(x, y) {
            Some(i) => {
                self.grid[i] = code;
                true
            }
            None => false,
        }
    }

    /// Writes `code` only where the cell is currently air.
    #[inline]
    pub(crate) fn set_if_air(&mut self, x: i32, y: i32, code: TileId) -> bool {
        match self.index(x, y) {
            Some(i) if self.grid[i] == AIR => {
                self.grid[i] = code;
                true
            }
            _ => false,
        }
    }

    pub(crate) fn fill_rect(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, code: TileId) {
        for y in y0..=y1 {
            for x in x0..=x1 {
                self.set_tile(x, y, code);
            }
        }
    }
}
