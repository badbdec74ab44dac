use hashbrown::HashMap;

use crate::types::TileId;

/// Read-through cache of per-tile resources (sprites, glyphs, ...).
///
/// The first lookup of a code runs the loader and stores its result,
/// including a miss, so a missing asset warns once and then stays a no-op.
pub struct TileCache<T> {
    map: HashMap<TileId, Option<T>>,
    misses: usize,
}

impl<T> Default for TileCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TileCache<T> {
    pub fn new() -> Self {
        Self {
            map: HashMap::new(),
            misses: 0,
        }
    }

    pub fn get_or_load<F>(&mut self, code: TileId, load: F) -> Option<&T>
    where
        F: FnOnce(TileId) -> Option<T>,
    {
        let misses = &mut self.misses;
        self.map
            .entry(code)
            .or_insert_with(|| {
                let loaded = load(code);
                if loaded.is_none() {
                    *misses += 1;
                    log::warn!("no resource for tile code {}; drawing nothing", code);
                }
                loaded
            })
            .as_ref()
    }

    #[inline]
    pub fn get(&self, code: TileId) -> Option<&T> {
        self.map.get(&code).and_then(|v| v.as_ref())
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Codes whose loader returned nothing.
    pub fn misses(&self) -> usize {
        self.misses
    }

    pub fn clear(&mut self) {
        self.map.clear();
        self.misses = 0;
    }
}
