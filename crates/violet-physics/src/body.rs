use violet_geom::{Rect, Vec2};

/// Axis-aligned physics body anchored at its feet: `pos.x` is the
/// horizontal centre, `pos.y` the bottom edge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Body {
    pub pos: Vec2,
    pub vel: Vec2,
    pub width: f32,
    pub height: f32,
    pub grounded: bool,
}

impl Body {
    pub fn new(feet: Vec2, width: f32, height: f32) -> Self {
        Self {
            pos: feet,
            vel: Vec2::ZERO,
            width,
            height,
            grounded: false,
        }
    }

    #[inline]
    pub fn half_width(&self) -> f32 {
        self.width * 0.5
    }

    #[inline]
    pub fn hitbox(&self) -> Rect {
        Rect::from_feet(self.pos, self.width, self.height)
    }

    /// Places the body at `feet` and clears its motion.
    pub fn teleport(&mut self, feet: Vec2) {
        self.pos = feet;
        self.vel = Vec2::ZERO;
        self.grounded = false;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }
}
