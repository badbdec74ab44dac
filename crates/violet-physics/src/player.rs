use violet_geom::{Rect, Vec2};

use crate::action::{ActionRequest, ActionState};
use crate::body::{Body, Facing};
use crate::collision::{CollisionResolver, SolidGrid};
use crate::constants::*;

/// One tick of controller state. `*_pressed` and `*_released` are edges,
/// `*_held` is the level.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlayerInput {
    pub left: bool,
    pub right: bool,
    pub jump_pressed: bool,
    pub jump_released: bool,
    pub attack_pressed: bool,
    pub protect_pressed: bool,
    pub protect_held: bool,
    pub interact_pressed: bool,
}

/// Animation pose derived from state after a tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Pose {
    Idle,
    Walk,
    Attack,
    Protect,
    Dialogue,
    Jump,
    Fall,
}

#[derive(Clone, Debug)]
pub struct Player {
    pub body: Body,
    pub facing: Facing,
    pub health: i32,
    pub max_health: i32,
    pub action: ActionState,
    invincible: u32,
    coyote: u32,
    jump_buffer: u32,
}

impl Player {
    pub fn new(feet: Vec2) -> Self {
        Self {
            body: Body::new(feet, PLAYER_WIDTH, PLAYER_HEIGHT),
            facing: Facing::Right,
            health: PLAYER_MAX_HEALTH,
            max_health: PLAYER_MAX_HEALTH,
            action: ActionState::Free,
            invincible: 0,
            coyote: 0,
            jump_buffer: 0,
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
    pub fn coyote_ticks(&self) -> u32 {
        self.coyote
    }

    #[inline]
    pub fn jump_buffer_ticks(&self) -> u32 {
        self.jump_buffer
    }

    pub fn request(&mut self, req: ActionRequest) -> bool {
        match self.action.apply(req) {
            Some(next) => {
                self.action = next;
                true
            }
            None => false,
        }
    }

    pub fn begin_dialogue(&mut self) -> bool {
        self.request(ActionRequest::BeginDialogue)
    }

    pub fn end_dialogue(&mut self) -> bool {
        self.request(ActionRequest::EndDialogue)
    }

    /// One fixed-step update: action timers, jump assist, horizontal
    /// acceleration, X collision, gravity, Y collision, bounds.
    pub fn tick<G: SolidGrid + ?Sized>(&mut self, input: &PlayerInput, grid: &G) {
        self.invincible = self.invincible.saturating_sub(1);
        self.action = self.action.tick();
        if self.action.is_protecting() && !input.protect_held {
            self.request(ActionRequest::ReleaseProtect);
        }

        if self.body.grounded {
            self.coyote = COYOTE_TICKS;
        } else {
            self.coyote = self.coyote.saturating_sub(1);
        }
        self.jump_buffer = self.jump_buffer.saturating_sub(1);

        let mut dir = 0.0;
        if !self.action.locks_movement() {
            if input.left {
                dir = -1.0;
                self.facing = Facing::Left;
            }
            if input.right {
                dir = 1.0;
                self.facing = Facing::Right;
            }
            if input.jump_pressed {
                self.jump_buffer = JUMP_BUFFER_TICKS;
            }
            if self.jump_buffer > 0 && self.coyote > 0 {
                self.body.vel.y = JUMP_STRENGTH;
                self.body.grounded = false;
                self.coyote = 0;
                self.jump_buffer = 0;
            }
            if input.jump_released && self.body.vel.y < 0.0 {
                self.body.vel.y *= JUMP_CUT;
            }
            if input.attack_pressed {
                self.request(ActionRequest::Attack);
            } else if input.protect_pressed {
                self.request(ActionRequest::Protect);
            }
        }

        let (accel, friction) = if self.body.grounded {
            (GROUND_ACCEL, GROUND_FRICTION)
        } else {
            (AIR_ACCEL, AIR_FRICTION)
        };
        let vel = &mut self.body.vel;
        if dir != 0.0 {
            vel.x = (vel.x + dir * accel).clamp(-MAX_SPEED_X, MAX_SPEED_X);
        } else {
            vel.x *= friction;
            if vel.x.abs() < ZERO_SNAP {
                vel.x = 0.0;
            }
        }

        let resolver = CollisionResolver::new(grid);
        self.body.pos.x += self.body.vel.x;
        resolver.resolve_x(&mut self.body);

        let grav = if self.body.vel.y > 0.0 {
            GRAVITY * FALL_GRAVITY_MULT
        } else {
            GRAVITY
        };
        self.body.vel.y = (self.body.vel.y + grav).min(MAX_FALL_SPEED);
        self.body.pos.y += self.body.vel.y;
        resolver.resolve_y(&mut self.body);
        resolver.clamp_to_bounds(&mut self.body);
    }

    /// Applies a hit unless invincible. Returns the damage actually taken.
    pub fn take_damage(&mut self, amount: i32, knockback_x: f32) -> Option<i32> {
        if self.invincible > 0 {
            return None;
        }
        let (amount, knockback_x) = if self.action.is_protecting() {
            (amount / PROTECT_DAMAGE_DIV, knockback_x / PROTECT_KNOCKBACK_DIV)
        } else {
            (amount, knockback_x)
        };
        self.health = (self.health - amount).max(0);
        self.invincible = PLAYER_INVINCIBLE_TICKS;
        self.body.vel.x = knockback_x;
        self.body.vel.y = PLAYER_HURT_POP;
        Some(amount)
    }

    /// Restores up to `amount` health. Returns how much was restored.
    pub fn heal(&mut self, amount: i32) -> i32 {
        let before = self.health;
        self.health = (self.health + amount).min(self.max_health);
        self.health - before
    }

    /// Body hitbox used for combat; half as wide while protecting.
    pub fn body_hitbox(&self) -> Rect {
        let w = if self.action.is_protecting() {
            PLAYER_WIDTH / 2.0
        } else {
            PLAYER_WIDTH
        };
        Rect::from_feet(self.body.pos, w, PLAYER_HEIGHT)
    }

    /// The damaging box in front of the player, only while the swing is live.
    pub fn attack_hitbox(&self) -> Option<Rect> {
        if !self.action.attack_live() {
            return None;
        }
        let p = self.body.pos;
        let front = Vec2::new(p.x + ATTACK_REACH * self.facing.sign(), p.y - ATTACK_HEIGHT);
        Some(Rect::from_corners(Vec2::new(p.x, p.y), front))
    }

    pub fn pose(&self) -> Pose {
        match self.action {
            ActionState::Attacking { .. } => Pose::Attack,
            ActionState::Protecting => Pose::Protect,
            ActionState::Dialogue => Pose::Dialogue,
            ActionState::Free => {
                let v = self.body.vel;
                if v.y < -0.5 {
                    Pose::Jump
                } else if !self.body.grounded && v.y > 0.5 {
                    Pose::Fall
                } else if v.x != 0.0 {
                    Pose::Walk
                } else {
                    Pose::Idle
                }
            }
        }
    }
}
