use std::fmt;

use violet_geom::{Rect, Vec2};

use crate::body::{Body, Facing};
use crate::collision::{CollisionResolver, SolidGrid, VerticalContact};
use crate::constants::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(test, derive(proptest_derive::Arbitrary))]
pub enum SlimeVariant {
    Green,
    Blue,
    Red,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SlimeStats {
    pub health: i32,
    pub damage: i32,
    pub speed: f32,
    pub jump: f32,
}

impl SlimeVariant {
    pub fn stats(self) -> SlimeStats {
        match self {
            SlimeVariant::Green => SlimeStats {
                health: 20,
                damage: 10,
                speed: 2.0,
                jump: -6.0,
            },
            SlimeVariant::Blue => SlimeStats {
                health: 15,
                damage: 8,
                speed: 3.5,
                jump: -7.0,
            },
            SlimeVariant::Red => SlimeStats {
                health: 40,
                damage: 15,
                speed: 1.5,
                jump: -5.0,
            },
        }
    }
}

impl fmt::Display for SlimeVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SlimeVariant::Green => "green slime",
            SlimeVariant::Blue => "blue slime",
            SlimeVariant::Red => "red slime",
        };
        f.write_str(s)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum MonsterState {
    #[default]
    Idle,
    Jump,
    Fall,
    /// Held for the single tick after touching ground.
    Land,
}

#[derive(Clone, Debug)]
pub struct Monster {
    pub variant: SlimeVariant,
    pub state: MonsterState,
    pub body: Body,
    pub facing: Facing,
    pub health: i32,
    pub max_health: i32,
    pub damage: i32,
    speed: f32,
    jump_strength: f32,
    jump_timer: u32,
    invincible: u32,
    knockback_vx: f32,
}

impl Monster {
    pub fn slime(feet: Vec2, variant: SlimeVariant) -> Self {
        let s = variant.stats();
        Self {
            variant,
            state: MonsterState::Idle,
            body: Body::new(feet, MONSTER_WIDTH, MONSTER_HEIGHT),
            facing: Facing::Right,
            health: s.health,
            max_health: s.health,
            damage: s.damage,
            speed: s.speed,
            jump_strength: s.jump,
            jump_timer: 0,
            invincible: 0,
            knockback_vx: 0.0,
        }
    }

    #[inline]
    pub fn is_dead(&self) -> bool {
        self.health <= 0
    }

    #[inline]
    pub fn invincible_ticks(&self) -> u32 {
        self.invincible
    }

    #[inline]
    pub fn knockback(&self) -> f32 {
        self.knockback_vx
    }

    /// Combat hitbox; `None` once dead so the monster drops out of every
    /// overlap test.
    pub fn hitbox(&self) -> Option<Rect> {
        if self.is_dead() {
            return None;
        }
        Some(self.body.hitbox())
    }

    /// AI and physics for one tick. `target` is the player's feet. Dead
    /// monsters are left untouched.
    pub fn update<G: SolidGrid + ?Sized>(&mut self, target: Vec2, grid: &G) {
        if self.is_dead() {
            return;
        }
        let active = (self.body.pos.x - target.x).abs() < MONSTER_ACTIVE_RANGE;
        self.invincible = self.invincible.saturating_sub(1);
        if self.state == MonsterState::Land {
            self.state = MonsterState::Idle;
        }

        if self.knockback_vx != 0.0 {
            self.body.vel.x = self.knockback_vx;
            self.knockback_vx *= KNOCKBACK_DECAY;
            if self.knockback_vx.abs() < KNOCKBACK_CUTOFF {
                self.knockback_vx = 0.0;
            }
        } else if active && self.state == MonsterState::Idle {
            self.body.vel.x = 0.0;
            self.jump_timer += 1;
            let dx = target.x - self.body.pos.x;
            let dy = (target.y - PLAYER_HEIGHT * 0.5) - (self.body.pos.y - MONSTER_HEIGHT * 0.5);
            let dist = (dx * dx + dy * dy).sqrt();
            if self.jump_timer > MONSTER_HOP_DELAY && dist < MONSTER_DETECT_RANGE {
                self.hop(dx);
            }
        }

        self.body.vel.y = (self.body.vel.y + MONSTER_GRAVITY).min(MAX_FALL_SPEED);
        let resolver = CollisionResolver::new(grid);
        self.body.pos.x += self.body.vel.x;
        if active {
            resolver.resolve_x(&mut self.body);
        }
        self.body.pos.y += self.body.vel.y;
        let contact = resolver.resolve_y(&mut self.body);
        resolver.clamp_to_bounds(&mut self.body);

        match (self.state, contact) {
            (MonsterState::Jump | MonsterState::Fall, VerticalContact::Floor) => {
                self.state = MonsterState::Land;
            }
            (MonsterState::Jump, _) if self.body.vel.y > 0.0 => self.state = MonsterState::Fall,
            _ => {}
        }
    }

    fn hop(&mut self, dx: f32) {
        self.jump_timer = 0;
        self.state = MonsterState::Jump;
        self.body.vel.y = self.jump_strength;
        self.facing = if dx > 0.0 { Facing::Right } else { Facing::Left };
        self.body.vel.x = self.speed * self.facing.sign();
        log::trace!("{} hops {:?}", self.variant, self.facing);
    }

    /// Applies a hit unless invincible or already dead. Returns the damage
    /// dealt.
    pub fn take_damage(&mut self, amount: i32, knockback_x: f32) -> Option<i32> {
        if self.is_dead() || self.invincible > 0 {
            return None;
        }
        self.health -= amount;
        self.invincible = MONSTER_INVINCIBLE_TICKS;
        self.knockback_vx = knockback_x;
        self.body.vel.y = MONSTER_HURT_POP;
        Some(amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    struct Floor;

    impl SolidGrid for Floor {
        fn tile_size(&self) -> f32 {
            16.0
        }
        fn solid_at(&self, _col: i32, row: i32) -> bool {
            row >= 10
        }
        fn pixel_size(&self) -> (f32, f32) {
            (4096.0, 320.0)
        }
    }

    #[test]
    fn hops_after_delay_and_lands() {
        let mut m = Monster::slime(Vec2::new(400.0, 160.0), SlimeVariant::Green);
        let player = Vec2::new(600.0, 160.0);
        for _ in 0..=MONSTER_HOP_DELAY {
            m.update(player, &Floor);
        }
        assert_eq!(m.state, MonsterState::Jump);
        assert_eq!(m.facing, Facing::Right);
        let mut seen = vec![m.state];
        for _ in 0..200 {
            m.update(player, &Floor);
            if seen.last() != Some(&m.state) {
                seen.push(m.state);
            }
            if m.state == MonsterState::Idle {
                break;
            }
        }
        assert_eq!(
            seen,
            vec![
                MonsterState::Jump,
                MonsterState::Fall,
                MonsterState::Land,
                MonsterState::Idle
            ]
        );
        assert_eq!(m.body.pos.y, 160.0);
    }

    #[test]
    fn knockback_overrides_ai_and_decays() {
        let mut m = Monster::slime(Vec2::new(400.0, 160.0), SlimeVariant::Red);
        m.take_damage(5, 5.0);
        m.update(Vec2::new(410.0, 160.0), &Floor);
        assert_eq!(m.body.vel.x, 5.0);
        assert!((m.knockback() - 4.5).abs() < 1e-6);
        for _ in 0..40 {
            m.update(Vec2::new(410.0, 160.0), &Floor);
        }
        assert_eq!(m.knockback(), 0.0);
    }

    proptest! {
        #[test]
        fn dead_slimes_are_inert(variant in any::<SlimeVariant>(), ticks in 1usize..50) {
            let mut m = Monster::slime(Vec2::new(300.0, 100.0), variant);
            m.health = 0;
            let before = m.body;
            for _ in 0..ticks {
                m.update(Vec2::new(320.0, 100.0), &Floor);
            }
            prop_assert_eq!(m.body, before);
            prop_assert!(m.hitbox().is_none());
            prop_assert_eq!(m.take_damage(10, 1.0), None);
        }
    }
}
