use std::sync::Arc;

use violet_geom::{Rect, Vec2};
use violet_physics::constants::{ATTACK_DAMAGE, ATTACK_KNOCKBACK, CONTACT_KNOCKBACK, TILE_SIZE};
use violet_physics::{Monster, Player, PlayerInput, SlimeVariant};
use violet_tiles::TileRegistry;
use violet_world::{Biome, World, WorldGenConfig};

use crate::event::{GameEvent, log_event};
use crate::hud::HudSnapshot;

/// Slimes spawned into the mountain chamber on every restart, left to right.
pub const ROSTER: [SlimeVariant; 7] = [
    SlimeVariant::Green,
    SlimeVariant::Green,
    SlimeVariant::Green,
    SlimeVariant::Blue,
    SlimeVariant::Blue,
    SlimeVariant::Red,
    SlimeVariant::Red,
];
/// Horizontal gap between roster slimes, in pixels.
pub const ROSTER_SPACING: f32 = 96.0;
pub const QUEST_KILLS: u32 = ROSTER.len() as u32;
pub const CHEST_HEAL: i32 = 20;
/// How close the player's feet must be to claim the sacred chest.
pub const CLAIM_RANGE: f32 = 250.0;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum QuestState {
    #[default]
    Hunting,
    /// All slimes are dead and the sacred chest waits at the chamber anchor.
    ChestSpawned,
    Claimed,
}

/// One play-through: the generated world, the actors in it and the quest.
///
/// The world is owned here rather than shared globally; everything that
/// needs biome-at-column goes through [`Session::world`].
pub struct Session {
    cfg: WorldGenConfig,
    registry: Arc<TileRegistry>,
    pub world: World,
    pub player: Player,
    pub monsters: Vec<Monster>,
    tick: u64,
    kills: u32,
    quest: QuestState,
    biome: Biome,
    over: bool,
}

impl Session {
    pub fn new(cfg: WorldGenConfig, registry: Arc<TileRegistry>, seed: u64) -> Self {
        let world = World::generate(&cfg, Arc::clone(&registry), seed);
        let player = Player::new(world.spawn.feet);
        let biome = world.biome_at_pixel(world.spawn.feet.x);
        let mut s = Self {
            cfg,
            registry,
            world,
            player,
            monsters: Vec::new(),
            tick: 0,
            kills: 0,
            quest: QuestState::Hunting,
            biome,
            over: false,
        };
        s.spawn_roster();
        s
    }

    /// Regenerates the world from `seed` and resets actors and the quest.
    pub fn restart(&mut self, seed: u64) {
        log::info!("restarting session with seed {}", seed);
        self.world = World::generate(&self.cfg, Arc::clone(&self.registry), seed);
        self.player = Player::new(self.world.spawn.feet);
        self.biome = self.world.biome_at_pixel(self.world.spawn.feet.x);
        self.tick = 0;
        self.kills = 0;
        self.quest = QuestState::Hunting;
        self.over = false;
        self.spawn_roster();
    }

    fn spawn_roster(&mut self) {
        let anchor = self.world.chamber.feet;
        self.monsters = ROSTER
            .iter()
            .enumerate()
            .map(|(i, &variant)| {
                let feet = Vec2::new(anchor.x + (i as f32 - 3.0) * ROSTER_SPACING, anchor.y);
                Monster::slime(feet, variant)
            })
            .collect();
        log::debug!(
            "spawned {} slimes around chamber anchor ({:.0},{:.0})",
            self.monsters.len(),
            anchor.x,
            anchor.y
        );
    }

    #[inline]
    pub fn tick(&self) -> u64 {
        self.tick
    }

    #[inline]
    pub fn kills(&self) -> u32 {
        self.kills
    }

    #[inline]
    pub fn quest(&self) -> QuestState {
        self.quest
    }

    /// The player died; [`Session::step`] does nothing until a restart.
    #[inline]
    pub fn is_over(&self) -> bool {
        self.over
    }

    pub fn current_biome(&self) -> Biome {
        self.biome
    }

    /// Feet position of the sacred chest while it is waiting to be claimed.
    pub fn sacred_chest(&self) -> Option<Vec2> {
        match self.quest {
            QuestState::ChestSpawned => Some(self.world.chamber.feet),
            _ => None,
        }
    }

    pub fn hud(&self) -> HudSnapshot {
        HudSnapshot {
            health: self.player.health,
            max_health: self.player.max_health,
            biome: self.biome.name(),
            kills: self.kills,
            quest_target: QUEST_KILLS,
            quest: self.quest,
        }
    }

    /// Advances one fixed tick: player, chests, monsters and combat, tile
    /// breaking, quest, biome tracking.
    pub fn step(&mut self, input: &PlayerInput) -> Vec<GameEvent> {
        if self.over {
            return Vec::new();
        }
        self.tick += 1;
        let mut events = Vec::new();

        self.player.tick(input, &self.world.tilemap);
        if input.interact_pressed {
            self.open_nearby_chest(&mut events);
        }
        self.update_monsters(&mut events);
        self.break_tiles(&mut events);
        self.update_quest(input, &mut events);
        self.track_biome(&mut events);

        if self.player.is_dead() {
            self.over = true;
            events.push(GameEvent::PlayerDied);
        }
        for ev in &events {
            log_event(self.tick, ev);
        }
        events
    }

    // First chest in the 3x3 tiles around the feet, column-major.
    fn open_nearby_chest(&mut self, events: &mut Vec<GameEvent>) {
        let feet = self.player.body.pos;
        let tx = (feet.x / TILE_SIZE).floor() as i32;
        let ty = (feet.y / TILE_SIZE).floor() as i32;
        for dx in -1..=1 {
            for dy in -1..=1 {
                let (col, row) = (tx + dx, ty + dy);
                if self.world.tilemap.take_chest(col, row) {
                    let healed = self.player.heal(CHEST_HEAL);
                    events.push(GameEvent::ChestOpened { col, row, healed });
                    return;
                }
            }
        }
    }

    fn update_monsters(&mut self, events: &mut Vec<GameEvent>) {
        self.monsters.retain(|m| !m.is_dead());
        let player = &mut self.player;
        let map = &self.world.tilemap;
        for m in &mut self.monsters {
            m.update(player.body.pos, map);

            if let (Some(hit), Some(body)) = (player.attack_hitbox(), m.hitbox()) {
                if hit.overlaps(&body) {
                    let knockback = ATTACK_KNOCKBACK * player.facing.sign();
                    if let Some(amount) = m.take_damage(ATTACK_DAMAGE, knockback) {
                        events.push(GameEvent::DamageDealt {
                            variant: m.variant,
                            amount,
                            remaining: m.health.max(0),
                        });
                        if m.is_dead() {
                            self.kills += 1;
                            events.push(GameEvent::MonsterKilled {
                                variant: m.variant,
                                kills: self.kills,
                            });
                        }
                    }
                }
            }

            let Some(body) = m.hitbox() else {
                continue;
            };
            if player.body_hitbox().overlaps(&body) {
                let dir = if m.body.pos.x > player.body.pos.x {
                    -1.0
                } else {
                    1.0
                };
                if let Some(amount) = player.take_damage(m.damage, dir * CONTACT_KNOCKBACK) {
                    events.push(GameEvent::PlayerHurt {
                        amount,
                        health: player.health,
                    });
                }
            }
        }
    }

    fn break_tiles(&mut self, events: &mut Vec<GameEvent>) {
        let Some(hit) = self.player.attack_hitbox() else {
            return;
        };
        let (c0, r0, c1, r1) = covered_tiles(&hit);
        for row in r0..=r1 {
            for col in c0..=c1 {
                if let Some(code) = self.world.tilemap.break_tile(col, row) {
                    events.push(GameEvent::TileBroken { col, row, code });
                }
            }
        }
    }

    fn update_quest(&mut self, input: &PlayerInput, events: &mut Vec<GameEvent>) {
        match self.quest {
            QuestState::Hunting if self.kills >= QUEST_KILLS => {
                self.quest = QuestState::ChestSpawned;
                events.push(GameEvent::ChamberCleared {
                    chest: self.world.chamber.feet,
                });
            }
            QuestState::ChestSpawned if input.interact_pressed => {
                let chest = self.world.chamber.feet;
                if self.player.body.pos.distance(chest) < CLAIM_RANGE {
                    self.quest = QuestState::Claimed;
                    events.push(GameEvent::RewardClaimed);
                }
            }
            _ => {}
        }
    }

    fn track_biome(&mut self, events: &mut Vec<GameEvent>) {
        let here = self.world.biome_at_pixel(self.player.body.pos.x);
        if here != self.biome {
            self.biome = here;
            events.push(GameEvent::BiomeEntered { biome: here });
        }
    }
}

// Inclusive tile range whose cells overlap the interior of `r`.
fn covered_tiles(r: &Rect) -> (i32, i32, i32, i32) {
    let c0 = (r.min.x / TILE_SIZE).floor() as i32;
    let r0 = (r.min.y / TILE_SIZE).floor() as i32;
    let c1 = (r.max.x / TILE_SIZE).ceil() as i32 - 1;
    let r1 = (r.max.y / TILE_SIZE).ceil() as i32 - 1;
    (c0, r0, c1.max(c0), r1.max(r0))
}
