use std::fmt;

use crate::session::QuestState;

/// What the HUD shows for the current tick.
#[derive(Clone, Debug, PartialEq)]
pub struct HudSnapshot {
    pub health: i32,
    pub max_health: i32,
    pub biome: &'static str,
    pub kills: u32,
    pub quest_target: u32,
    pub quest: QuestState,
}

impl HudSnapshot {
    /// Health as a fraction of max, for bar widths.
    pub fn health_ratio(&self) -> f32 {
        if self.max_health <= 0 {
            return 0.0;
        }
        (self.health.max(0) as f32 / self.max_health as f32).min(1.0)
    }

    pub fn quest_progress(&self) -> (u32, u32) {
        (self.kills.min(self.quest_target), self.quest_target)
    }

    pub fn sacred_chest_label(&self) -> &'static str {
        match self.quest {
            QuestState::Hunting => "hidden",
            QuestState::ChestSpawned => "waiting in the mountain",
            QuestState::Claimed => "claimed",
        }
    }
}

impl fmt::Display for HudSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (done, target) = self.quest_progress();
        write!(
            f,
            "HP {}/{} | {} | slimes {}/{} | sacred chest: {}",
            self.health,
            self.max_health,
            self.biome,
            done,
            target,
            self.sacred_chest_label()
        )
    }
}
