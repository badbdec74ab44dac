//! Tick-based tuning constants. Velocities are pixels per tick, timers are
//! ticks at 60 Hz.

pub const GRAVITY: f32 = 0.5;
pub const JUMP_STRENGTH: f32 = -15.0;
pub const MAX_FALL_SPEED: f32 = 14.0;

pub const GROUND_ACCEL: f32 = 0.8;
pub const AIR_ACCEL: f32 = 0.5;
pub const GROUND_FRICTION: f32 = 0.85;
pub const AIR_FRICTION: f32 = 0.95;
pub const MAX_SPEED_X: f32 = 6.0;
/// Horizontal speeds below this snap to zero when no input is held.
pub const ZERO_SNAP: f32 = 0.1;

/// Upward velocity is multiplied by this when jump is released mid-rise.
pub const JUMP_CUT: f32 = 0.5;
pub const FALL_GRAVITY_MULT: f32 = 1.4;
pub const COYOTE_TICKS: u32 = 6;
pub const JUMP_BUFFER_TICKS: u32 = 8;

pub const PLAYER_WIDTH: f32 = 20.0;
pub const PLAYER_HEIGHT: f32 = 64.0;
pub const PLAYER_MAX_HEALTH: i32 = 100;
pub const PLAYER_INVINCIBLE_TICKS: u32 = 60;
pub const PLAYER_HURT_POP: f32 = -5.0;

// attack: 6 frames of 5 ticks, the hitbox is live on frame 2
pub const ATTACK_FRAMES: u32 = 6;
pub const ATTACK_FRAME_TICKS: u32 = 5;
pub const ATTACK_ACTIVE_FRAME: u32 = 2;
pub const ATTACK_REACH: f32 = 40.0;
pub const ATTACK_HEIGHT: f32 = 60.0;
pub const ATTACK_DAMAGE: i32 = 10;
pub const ATTACK_KNOCKBACK: f32 = 5.0;
pub const CONTACT_KNOCKBACK: f32 = 8.0;
pub const PROTECT_DAMAGE_DIV: i32 = 5;
pub const PROTECT_KNOCKBACK_DIV: f32 = 2.0;

pub const MONSTER_WIDTH: f32 = 32.0;
pub const MONSTER_HEIGHT: f32 = 48.0;
pub const MONSTER_GRAVITY: f32 = 0.25;
pub const MONSTER_INVINCIBLE_TICKS: u32 = 30;
pub const MONSTER_HURT_POP: f32 = -4.0;
pub const MONSTER_HOP_DELAY: u32 = 60;
pub const MONSTER_DETECT_RANGE: f32 = 500.0;
/// Monsters farther than this from the player skip AI and horizontal
/// collision.
pub const MONSTER_ACTIVE_RANGE: f32 = 1500.0;
pub const KNOCKBACK_DECAY: f32 = 0.9;
pub const KNOCKBACK_CUTOFF: f32 = 0.5;

pub const TILE_SIZE: f32 = violet_world::TILE_SIZE as f32;
