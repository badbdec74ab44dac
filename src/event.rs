use std::fmt;

use violet_geom::Vec2;
use violet_physics::SlimeVariant;
use violet_tiles::TileId;
use violet_world::Biome;

/// Something that happened during one session step. Returned to the caller
/// (audio, HUD, notifications) and logged under the `events` target.
#[derive(Clone, Debug, PartialEq)]
pub enum GameEvent {
    DamageDealt {
        variant: SlimeVariant,
        amount: i32,
        remaining: i32,
    },
    PlayerHurt {
        amount: i32,
        health: i32,
    },
    MonsterKilled {
        variant: SlimeVariant,
        kills: u32,
    },
    ChestOpened {
        col: i32,
        row: i32,
        healed: i32,
    },
    TileBroken {
        col: i32,
        row: i32,
        code: TileId,
    },
    ChamberCleared {
        chest: Vec2,
    },
    RewardClaimed,
    BiomeEntered {
        biome: Biome,
    },
    PlayerDied,
}

impl fmt::Display for GameEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use GameEvent as E;
        match self {
            E::DamageDealt {
                variant,
                amount,
                remaining,
            } => write!(f, "DamageDealt {variant} -{amount} hp={remaining}"),
            E::PlayerHurt { amount, health } => write!(f, "PlayerHurt -{amount} hp={health}"),
            E::MonsterKilled { variant, kills } => {
                write!(f, "MonsterKilled {variant} kills={kills}")
            }
            E::ChestOpened { col, row, healed } => {
                write!(f, "ChestOpened at ({col},{row}) healed={healed}")
            }
            E::TileBroken { col, row, code } => {
                write!(f, "TileBroken at ({col},{row}) code={code}")
            }
            E::ChamberCleared { chest } => write!(
                f,
                "ChamberCleared sacred chest at ({:.0},{:.0})",
                chest.x, chest.y
            ),
            E::RewardClaimed => f.write_str("RewardClaimed"),
            E::BiomeEntered { biome } => write!(f, "BiomeEntered {biome}"),
            E::PlayerDied => f.write_str("PlayerDied"),
        }
    }
}

pub fn log_event(tick: u64, ev: &GameEvent) {
    match ev {
        GameEvent::TileBroken { .. } | GameEvent::DamageDealt { .. } => {
            log::debug!(target: "events", "[tick {}] {}", tick, ev);
        }
        _ => {
            log::info!(target: "events", "[tick {}] {}", tick, ev);
        }
    }
}
