use violet_physics::PlayerInput;

use crate::session::{QuestState, Session};

/// Canned controller input for headless simulation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Script {
    /// Stand still.
    Idle,
    /// Run right, hopping every 45 ticks.
    #[default]
    Walk,
    /// Head for the chamber, swing at anything in reach, then claim the
    /// sacred chest.
    Fight,
}

const HOP_PERIOD: u64 = 45;
const HOP_HOLD: u64 = 10;
const SWING_PERIOD: u64 = 32;
const SWING_RANGE: f32 = 56.0;

impl Script {
    pub fn input(self, session: &Session) -> PlayerInput {
        let tick = session.tick();
        match self {
            Script::Idle => PlayerInput::default(),
            Script::Walk => PlayerInput {
                right: true,
                jump_pressed: tick % HOP_PERIOD == 0,
                jump_released: tick % HOP_PERIOD == HOP_HOLD,
                ..PlayerInput::default()
            },
            Script::Fight => fight(session, tick),
        }
    }
}

fn fight(session: &Session, tick: u64) -> PlayerInput {
    let me = session.player.body.pos;
    let target = session
        .monsters
        .iter()
        .filter(|m| !m.is_dead())
        .map(|m| m.body.pos)
        .min_by(|a, b| me.distance(*a).total_cmp(&me.distance(*b)))
        .unwrap_or(session.world.chamber.feet);
    let dx = target.x - me.x;
    let mut input = PlayerInput {
        jump_pressed: tick % HOP_PERIOD == 0,
        jump_released: tick % HOP_PERIOD == HOP_HOLD,
        ..PlayerInput::default()
    };
    if dx.abs() > SWING_RANGE * 0.5 {
        input.left = dx < 0.0;
        input.right = dx > 0.0;
    }
    if dx.abs() <= SWING_RANGE && tick % SWING_PERIOD == 0 {
        input.attack_pressed = true;
    }
    input.interact_pressed = session.quest() == QuestState::ChestSpawned && tick % 20 == 0;
    input
}
