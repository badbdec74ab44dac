use violet_world::Tilemap;

use crate::body::Body;

/// Read-only solidity view consulted by collision.
pub trait SolidGrid {
    fn tile_size(&self) -> f32;
    /// Out-of-range cells are never solid.
    fn solid_at(&self, col: i32, row: i32) -> bool;
    fn pixel_size(&self) -> (f32, f32);
}

impl SolidGrid for Tilemap {
    #[inline]
    fn tile_size(&self) -> f32 {
        Tilemap::tile_size(self) as f32
    }

    #[inline]
    fn solid_at(&self, col: i32, row: i32) -> bool {
        self.is_solid_at(col, row)
    }

    fn pixel_size(&self) -> (f32, f32) {
        (self.pixel_width(), self.pixel_height())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VerticalContact {
    None,
    Ceiling,
    Floor,
}

/// Axis-separated body-vs-grid resolution. Callers move along X and call
/// [`resolve_x`](Self::resolve_x) before integrating Y, so inside corners
/// never tunnel.
pub struct CollisionResolver<'a, G: SolidGrid + ?Sized> {
    grid: &'a G,
    ts: f32,
}

impl<'a, G: SolidGrid + ?Sized> CollisionResolver<'a, G> {
    pub fn new(grid: &'a G) -> Self {
        Self {
            grid,
            ts: grid.tile_size(),
        }
    }

    #[inline]
    fn cell(&self, v: f32) -> i32 {
        (v / self.ts).floor() as i32
    }

    /// Checks the leading edge column at the top, middle and bottom rows of
    /// the hitbox. On a hit snaps to the tile boundary and zeroes `vel.x`.
    pub fn resolve_x(&self, body: &mut Body) -> bool {
        let hw = body.half_width();
        let vx = body.vel.x;
        if vx == 0.0 {
            return false;
        }
        let top = self.cell(body.pos.y - body.height);
        let bottom = self.cell(body.pos.y - 1.0);
        let mid = (top + bottom).div_euclid(2);
        let blocked = |col: i32| [top, mid, bottom].iter().any(|&r| self.grid.solid_at(col, r));

        if vx < 0.0 {
            let left = self.cell(body.pos.x - hw);
            if blocked(left) {
                body.pos.x = (left + 1) as f32 * self.ts + hw;
                body.vel.x = 0.0;
                return true;
            }
        } else {
            let right = self.cell(body.pos.x + hw);
            if blocked(right) {
                body.pos.x = right as f32 * self.ts - hw;
                body.vel.x = 0.0;
                return true;
            }
        }
        false
    }

    /// Ceiling check while rising, floor check otherwise, including a
    /// two-pixel snap onto ground just below the feet. Sets `grounded`.
    pub fn resolve_y(&self, body: &mut Body) -> VerticalContact {
        body.grounded = false;
        let hw = body.half_width();
        // 1px inset so a body flush against a wall does not catch on it
        let left = self.cell(body.pos.x - hw + 1.0);
        let right = self.cell(body.pos.x + hw - 1.0);
        let solid_row = |row: i32| self.grid.solid_at(left, row) || self.grid.solid_at(right, row);

        if body.vel.y < 0.0 {
            let top = self.cell(body.pos.y - body.height);
            if solid_row(top) {
                body.pos.y = (top + 1) as f32 * self.ts + body.height;
                body.vel.y = 0.0;
                return VerticalContact::Ceiling;
            }
            return VerticalContact::None;
        }

        let bottom = self.cell(body.pos.y);
        if solid_row(bottom) {
            self.land(body, bottom);
            return VerticalContact::Floor;
        }
        let below = self.cell(body.pos.y + 2.0);
        if solid_row(below) && body.pos.y > below as f32 * self.ts - 2.0 {
            self.land(body, below);
            return VerticalContact::Floor;
        }
        VerticalContact::None
    }

    fn land(&self, body: &mut Body, row: i32) {
        body.pos.y = row as f32 * self.ts;
        body.vel.y = 0.0;
        body.grounded = true;
    }

    /// Keeps the body horizontally inside the map and stops it on the
    /// bottom edge.
    pub fn clamp_to_bounds(&self, body: &mut Body) {
        let (w, h) = self.grid.pixel_size();
        let hw = body.half_width();
        body.pos.x = body.pos.x.clamp(hw, (w - hw).max(hw));
        if body.pos.y > h {
            body.pos.y = h;
            body.vel.y = 0.0;
            body.grounded = true;
        }
    }
}
