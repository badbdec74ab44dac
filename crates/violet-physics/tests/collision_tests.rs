use std::sync::Arc;

use proptest::prelude::*;
use violet_geom::Vec2;
use violet_physics::constants::{GRAVITY, JUMP_CUT, JUMP_STRENGTH};
use violet_physics::{Player, PlayerInput};
use violet_tiles::TileRegistry;
use violet_tiles::types::{AIR, LOG, STONE};
use violet_world::Tilemap;

const COLS: usize = 16;
const ROWS: usize = 12;
const FLOOR_ROW: usize = 8;
const FLOOR_Y: f32 = (FLOOR_ROW * 16) as f32;

// Stone floor on row 8, a stone wall at column 12 and a log (background)
// column at 3.
fn arena() -> Tilemap {
    let reg = Arc::new(TileRegistry::builtin().unwrap());
    let mut codes = vec![AIR; COLS * ROWS];
    for x in 0..COLS {
        codes[FLOOR_ROW * COLS + x] = STONE;
    }
    for y in 0..FLOOR_ROW {
        codes[y * COLS + 12] = STONE;
        codes[y * COLS + 3] = LOG;
    }
    Tilemap::from_codes(COLS, ROWS, 16, reg, codes).unwrap()
}

fn idle() -> PlayerInput {
    PlayerInput::default()
}

proptest! {
    // A falling body that reaches the floor this tick ends exactly on it.
    #[test]
    fn landing_snaps_to_tile_top(vy in 0.0f32..12.0, frac in 0.0f32..1.0, x in 40.0f32..170.0) {
        let map = arena();
        let mut p = Player::new(Vec2::ZERO);
        let step = (vy + GRAVITY * if vy > 0.0 { 1.4 } else { 1.0 }).min(14.0);
        p.body.pos = Vec2::new(x, FLOOR_Y - step * frac);
        p.body.vel.y = vy;
        p.tick(&idle(), &map);
        prop_assert!(p.body.grounded);
        prop_assert_eq!(p.body.vel.y, 0.0);
        prop_assert_eq!(p.body.pos.y, FLOOR_Y);
    }
}

#[test]
fn hovering_just_above_floor_lands_in_one_tick() {
    let map = arena();
    let mut p = Player::new(Vec2::new(100.0, FLOOR_Y - 0.3));
    p.tick(&idle(), &map);
    assert!(p.body.grounded);
    assert_eq!(p.body.pos.y, FLOOR_Y);
}

#[test]
fn wall_blocks_running_player() {
    let map = arena();
    let mut p = Player::new(Vec2::new(170.0, FLOOR_Y));
    let run = PlayerInput {
        right: true,
        ..idle()
    };
    for _ in 0..30 {
        p.tick(&run, &map);
    }
    assert_eq!(p.body.pos.x, 12.0 * 16.0 - 10.0);
    assert!(p.body.grounded);
}

#[test]
fn background_tiles_do_not_block() {
    let map = arena();
    let mut p = Player::new(Vec2::new(80.0, FLOOR_Y));
    let run = PlayerInput {
        left: true,
        ..idle()
    };
    for _ in 0..20 {
        p.tick(&run, &map);
    }
    assert!(p.body.pos.x < 48.0, "stuck at {}", p.body.pos.x);
}

#[test]
fn released_jump_is_cut_short() {
    let map = arena();
    let mut p = Player::new(Vec2::new(100.0, FLOOR_Y));
    p.tick(&idle(), &map);
    p.tick(
        &PlayerInput {
            jump_pressed: true,
            ..idle()
        },
        &map,
    );
    assert_eq!(p.body.vel.y, JUMP_STRENGTH + GRAVITY);
    p.tick(
        &PlayerInput {
            jump_released: true,
            ..idle()
        },
        &map,
    );
    assert_eq!(p.body.vel.y, (JUMP_STRENGTH + GRAVITY) * JUMP_CUT + GRAVITY);
}

#[test]
fn buffered_jump_fires_on_landing() {
    let map = arena();
    let mut p = Player::new(Vec2::new(100.0, FLOOR_Y - 8.0));
    p.tick(
        &PlayerInput {
            jump_pressed: true,
            ..idle()
        },
        &map,
    );
    assert!(p.jump_buffer_ticks() > 0);
    let mut jumped = false;
    for _ in 0..7 {
        p.tick(&idle(), &map);
        jumped |= p.body.vel.y < -10.0;
    }
    assert!(jumped);
}

#[test]
fn coyote_time_allows_late_jump() {
    // No floor under column 0..=2 beyond the ledge: walk off row 8's end.
    let reg = Arc::new(TileRegistry::builtin().unwrap());
    let mut codes = vec![AIR; COLS * ROWS];
    for x in 0..6 {
        codes[FLOOR_ROW * COLS + x] = STONE;
    }
    let map = Tilemap::from_codes(COLS, ROWS, 16, reg, codes).unwrap();
    let mut p = Player::new(Vec2::new(110.0, FLOOR_Y));
    p.body.grounded = true;
    p.tick(&idle(), &map);
    assert!(!p.body.grounded);
    for _ in 0..3 {
        p.tick(&idle(), &map);
    }
    assert!(p.coyote_ticks() > 0);
    p.tick(
        &PlayerInput {
            jump_pressed: true,
            ..idle()
        },
        &map,
    );
    assert!(p.body.vel.y < -10.0);
}
