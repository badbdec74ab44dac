use std::sync::Arc;

use violet::session::{QUEST_KILLS, ROSTER, ROSTER_SPACING};
use violet::{GameEvent, QuestState, Session};
use violet_geom::Vec2;
use violet_physics::{Facing, Monster, PlayerInput, SlimeVariant};
use violet_tiles::TileRegistry;
use violet_tiles::types::{AIR, CHEST, STONE};
use violet_world::{Preset, WorldGenConfig};

fn session(seed: u64) -> Session {
    let reg = Arc::new(TileRegistry::builtin().expect("tiles"));
    Session::new(WorldGenConfig::with_preset(Preset::Embedded), reg, seed)
}

fn idle() -> PlayerInput {
    PlayerInput::default()
}

fn attack() -> PlayerInput {
    PlayerInput {
        attack_pressed: true,
        ..idle()
    }
}

fn interact() -> PlayerInput {
    PlayerInput {
        interact_pressed: true,
        ..idle()
    }
}

// Between the two innermost pillars: player left of the anchor, slime in
// reach of the swing but not touching the player.
fn stage_duel(s: &mut Session) {
    let anchor = s.world.chamber.feet;
    s.player.body.teleport(anchor - Vec2::new(24.0, 0.0));
    s.player.facing = Facing::Right;
    let mut slime = Monster::slime(anchor + Vec2::new(12.0, 0.0), SlimeVariant::Green);
    slime.health = 1;
    s.monsters = vec![slime];
}

fn swing(s: &mut Session) -> Vec<GameEvent> {
    let mut out = s.step(&attack());
    for _ in 0..31 {
        out.extend(s.step(&idle()));
    }
    out
}

#[test]
fn restart_spawns_roster_around_chamber() {
    let s = session(11);
    let anchor = s.world.chamber.feet;
    assert_eq!(s.monsters.len(), ROSTER.len());
    for (i, m) in s.monsters.iter().enumerate() {
        assert_eq!(m.variant, ROSTER[i]);
        assert_eq!(m.body.pos.x, anchor.x + (i as f32 - 3.0) * ROSTER_SPACING);
        assert_eq!(m.body.pos.y, anchor.y);
    }
    assert_eq!(s.player.body.pos, s.world.spawn.feet);
    assert_eq!(s.kills(), 0);
    assert_eq!(s.quest(), QuestState::Hunting);
}

#[test]
fn hud_reflects_fresh_session() {
    let s = session(12);
    let hud = s.hud();
    assert_eq!(hud.health, 100);
    assert_eq!(hud.max_health, 100);
    assert_eq!(hud.kills, 0);
    assert_eq!(hud.quest_target, QUEST_KILLS);
    assert_eq!(hud.biome, s.world.biome_at_pixel(s.world.spawn.feet.x).name());
    assert_eq!(hud.quest, QuestState::Hunting);
}

#[test]
fn live_swing_kills_and_counts() {
    let mut s = session(13);
    stage_duel(&mut s);
    let events = swing(&mut s);
    assert!(
        events.iter().any(|e| matches!(e, GameEvent::MonsterKilled { kills: 1, .. })),
        "{events:?}"
    );
    assert!(!events.iter().any(|e| matches!(e, GameEvent::PlayerHurt { .. })));
    assert_eq!(s.kills(), 1);
    assert!(s.monsters.is_empty());
}

#[test]
fn seven_kills_spawn_and_claim_sacred_chest() {
    let mut s = session(14);
    let mut cleared = 0;
    for _ in 0..QUEST_KILLS {
        stage_duel(&mut s);
        cleared += swing(&mut s)
            .iter()
            .filter(|e| matches!(e, GameEvent::ChamberCleared { .. }))
            .count();
    }
    assert_eq!(s.kills(), QUEST_KILLS);
    assert_eq!(cleared, 1);
    assert_eq!(s.quest(), QuestState::ChestSpawned);
    assert_eq!(s.sacred_chest(), Some(s.world.chamber.feet));

    let events = s.step(&interact());
    assert!(events.contains(&GameEvent::RewardClaimed), "{events:?}");
    assert_eq!(s.quest(), QuestState::Claimed);
    assert_eq!(s.sacred_chest(), None);
}

#[test]
fn sacred_chest_needs_to_be_close() {
    let mut s = session(15);
    for _ in 0..QUEST_KILLS {
        stage_duel(&mut s);
        swing(&mut s);
    }
    let far = s.world.chamber.feet - Vec2::new(400.0, 0.0);
    s.player.body.teleport(far);
    s.monsters.clear();
    let events = s.step(&interact());
    assert!(!events.contains(&GameEvent::RewardClaimed));
    assert_eq!(s.quest(), QuestState::ChestSpawned);
}

#[test]
fn opening_path_chest_heals() {
    let mut s = session(16);
    // Path chests sit on the first ground at or under the surface row.
    // Start past the spawn cottage so its own chest is not picked.
    let map = &s.world.tilemap;
    let (col, row) = (s.world.spawn.column as i32 + 21..s.world.chamber.x0)
        .find_map(|x| {
            let h = s.world.surface_row(x)?;
            (h - 1..h + 20)
                .find(|&y| map.get_tile(x, y) == CHEST && map.is_solid_at(x, y + 1))
                .map(|y| (x, y))
        })
        .expect("a path chest");
    s.monsters.clear();
    s.player.body.teleport(Vec2::new(col as f32 * 16.0 + 8.0, (row + 1) as f32 * 16.0));
    s.player.take_damage(30, 0.0);
    for _ in 0..40 {
        s.step(&idle());
    }
    let events = s.step(&interact());
    assert!(
        events.contains(&GameEvent::ChestOpened {
            col,
            row,
            healed: 20
        }),
        "{events:?}"
    );
    assert_eq!(s.player.health, 90);
    assert_eq!(s.world.tilemap.get_tile(col, row), AIR);
}

#[test]
fn swing_breaks_chamber_wall() {
    let mut s = session(17);
    let c = s.world.chamber;
    s.monsters.clear();
    s.player.body.teleport(Vec2::new(
        c.x0 as f32 * 16.0 + 27.0,
        c.floor_row as f32 * 16.0,
    ));
    s.player.facing = Facing::Left;
    assert_eq!(s.world.tilemap.get_tile(c.x0, c.floor_row - 1), STONE);
    let events = swing(&mut s);
    assert!(events.iter().any(|e| matches!(
        e,
        GameEvent::TileBroken { col, code: STONE, .. } if *col == c.x0
    )));
    assert_eq!(s.world.tilemap.get_tile(c.x0, c.floor_row - 1), AIR);
    // The floor under the player is left alone.
    assert_eq!(s.world.tilemap.get_tile(c.x0 + 1, c.floor_row), STONE);
}

#[test]
fn death_is_reported_once_and_freezes() {
    let mut s = session(18);
    s.player.health = 1;
    let feet = s.player.body.pos;
    s.monsters = vec![Monster::slime(feet, SlimeVariant::Red)];
    let events = s.step(&idle());
    assert!(events.contains(&GameEvent::PlayerDied), "{events:?}");
    assert!(s.is_over());
    let tick = s.tick();
    assert!(s.step(&idle()).is_empty());
    assert_eq!(s.tick(), tick);

    s.restart(19);
    assert!(!s.is_over());
    assert_eq!(s.player.health, 100);
    assert_eq!(s.monsters.len(), ROSTER.len());
}

#[test]
fn walking_into_another_biome_is_reported() {
    let mut s = session(20);
    let start = s.current_biome();
    // Middle of a run of five columns so a nudge cannot cross back.
    let w = &s.world;
    let Some(x) = (2..w.tilemap.cols() as i32 - 2).find(|&x| {
        let b = w.biome_at(x);
        b != start && (x - 2..=x + 2).all(|c| w.biome_at(c) == b)
    }) else {
        return;
    };
    let h = s.world.surface_row(x).expect("column in map");
    s.monsters.clear();
    s.player.body.teleport(Vec2::new(x as f32 * 16.0 + 8.0, h as f32 * 16.0));
    let events = s.step(&idle());
    let biome = s.world.biome_at(x);
    assert!(
        events.contains(&GameEvent::BiomeEntered { biome }),
        "{events:?}"
    );
    assert_eq!(s.current_biome(), biome);
    let again = s.step(&idle());
    assert!(!again.iter().any(|e| matches!(e, GameEvent::BiomeEntered { .. })));
}
