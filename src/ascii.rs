use violet_geom::Vec2;
use violet_tiles::TileCache;
use violet_tiles::types::AIR;
use violet_world::Tilemap;

use crate::session::Session;

const UNKNOWN_GLYPH: char = '?';
const PLAYER_GLYPH: char = '@';
const SLIME_GLYPH: char = 's';

/// A window of tiles, in tile coordinates.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Viewport {
    pub col: i32,
    pub row: i32,
    pub cols: usize,
    pub rows: usize,
}

impl Viewport {
    pub fn whole(map: &Tilemap) -> Self {
        Self {
            col: 0,
            row: 0,
            cols: map.cols(),
            rows: map.rows(),
        }
    }

    /// Centres on a pixel position and clamps to the map edges, the way the
    /// camera follows the player.
    pub fn centred_on(target: Vec2, cols: usize, rows: usize, map: &Tilemap) -> Self {
        let ts = map.tile_size() as f32;
        let cols = cols.min(map.cols());
        let rows = rows.min(map.rows());
        let cx = (target.x / ts).floor() as i32 - cols as i32 / 2;
        let cy = (target.y / ts).floor() as i32 - rows as i32 / 2;
        Self {
            col: cx.clamp(0, (map.cols() - cols) as i32),
            row: cy.clamp(0, (map.rows() - rows) as i32),
            cols,
            rows,
        }
    }

    fn cell_of(&self, p: Vec2, ts: f32) -> Option<(usize, usize)> {
        let col = (p.x / ts).floor() as i32 - self.col;
        // Feet sit on the boundary of the tile below; draw one cell up.
        let row = ((p.y - 1.0) / ts).floor() as i32 - self.row;
        if col < 0 || row < 0 || col as usize >= self.cols || row as usize >= self.rows {
            return None;
        }
        Some((col as usize, row as usize))
    }
}

/// Text renderer for the grid. Glyphs come from the tile table through a
/// read-through cache, so a code without a glyph warns once.
#[derive(Default)]
pub struct AsciiRenderer {
    glyphs: TileCache<char>,
}

impl AsciiRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cached_glyphs(&self) -> usize {
        self.glyphs.len()
    }

    /// Renders `view` with `actors` (feet position and glyph) drawn on top in
    /// order.
    pub fn render(&mut self, map: &Tilemap, view: Viewport, actors: &[(Vec2, char)]) -> String {
        let mut cells = vec![vec![' '; view.cols]; view.rows];
        for (r, line) in cells.iter_mut().enumerate() {
            for (c, cell) in line.iter_mut().enumerate() {
                let code = map.get_tile(view.col + c as i32, view.row + r as i32);
                if code == AIR {
                    continue;
                }
                let registry = map.registry();
                *cell = self
                    .glyphs
                    .get_or_load(code, |code| registry.glyph(code))
                    .copied()
                    .unwrap_or(UNKNOWN_GLYPH);
            }
        }

        let ts = map.tile_size() as f32;
        for &(pos, glyph) in actors {
            if let Some((c, r)) = view.cell_of(pos, ts) {
                cells[r][c] = glyph;
            }
        }

        let mut out = String::with_capacity((view.cols + 1) * view.rows);
        for line in cells {
            out.extend(line);
            out.push('\n');
        }
        out
    }

    /// The session's world around the player, with slimes and the player on
    /// top.
    pub fn render_session(&mut self, session: &Session, cols: usize, rows: usize) -> String {
        let map = &session.world.tilemap;
        let view = Viewport::centred_on(session.player.body.pos, cols, rows, map);
        let mut actors: Vec<(Vec2, char)> = session
            .monsters
            .iter()
            .filter(|m| !m.is_dead())
            .map(|m| (m.body.pos, SLIME_GLYPH))
            .collect();
        actors.push((session.player.body.pos, PLAYER_GLYPH));
        self.render(map, view, &actors)
    }
}
