use crate::constants::{ATTACK_ACTIVE_FRAME, ATTACK_FRAME_TICKS, ATTACK_FRAMES};

/// What the player is doing besides moving. Exactly one at a time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ActionState {
    #[default]
    Free,
    /// Ticks elapsed since the swing started.
    Attacking { ticks: u32 },
    Protecting,
    Dialogue,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActionRequest {
    Attack,
    Protect,
    ReleaseProtect,
    BeginDialogue,
    EndDialogue,
}

impl ActionState {
    pub const ATTACK_TICKS: u32 = ATTACK_FRAMES * ATTACK_FRAME_TICKS;

    /// Applies one request. Returns the new state, or `None` when the
    /// request does not apply in the current state.
    pub fn apply(self, req: ActionRequest) -> Option<ActionState> {
        use ActionRequest::*;
        use ActionState::*;
        match (self, req) {
            (Free, Attack) => Some(Attacking { ticks: 0 }),
            (Free, Protect) => Some(Protecting),
            (Free, BeginDialogue) => Some(Dialogue),
            (Protecting, ReleaseProtect) => Some(Free),
            (Dialogue, EndDialogue) => Some(Free),
            _ => None,
        }
    }

    /// Advances timed states by one tick.
    pub fn tick(self) -> ActionState {
        match self {
            ActionState::Attacking { ticks } if ticks + 1 >= Self::ATTACK_TICKS => ActionState::Free,
            ActionState::Attacking { ticks } => ActionState::Attacking { ticks: ticks + 1 },
            other => other,
        }
    }

    /// Movement input is ignored while any action is in progress.
    #[inline]
    pub fn locks_movement(self) -> bool {
        self != ActionState::Free
    }

    #[inline]
    pub fn is_protecting(self) -> bool {
        self == ActionState::Protecting
    }

    /// Animation frame of the swing, if attacking.
    pub fn attack_frame(self) -> Option<u32> {
        match self {
            ActionState::Attacking { ticks } => Some(ticks / ATTACK_FRAME_TICKS),
            _ => None,
        }
    }

    /// True only during the frame whose hitbox deals damage.
    #[inline]
    pub fn attack_live(self) -> bool {
        self.attack_frame() == Some(ATTACK_ACTIVE_FRAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attack_runs_thirty_ticks() {
        let mut s = ActionState::Free.apply(ActionRequest::Attack).unwrap();
        let mut live = Vec::new();
        let mut n = 0;
        while s != ActionState::Free {
            if s.attack_live() {
                live.push(n);
            }
            s = s.tick();
            n += 1;
        }
        assert_eq!(n, 30);
        assert_eq!(live, (10..15).collect::<Vec<_>>());
    }

    #[test]
    fn states_are_exclusive() {
        let p = ActionState::Protecting;
        assert_eq!(p.apply(ActionRequest::Attack), None);
        assert_eq!(p.apply(ActionRequest::BeginDialogue), None);
        assert_eq!(p.apply(ActionRequest::ReleaseProtect), Some(ActionState::Free));
        let a = ActionState::Attacking { ticks: 3 };
        assert_eq!(a.apply(ActionRequest::Protect), None);
        assert_eq!(a.apply(ActionRequest::EndDialogue), None);
        assert_eq!(
            ActionState::Dialogue.apply(ActionRequest::EndDialogue),
            Some(ActionState::Free)
        );
        assert!(a.locks_movement());
        assert!(!ActionState::Free.locks_movement());
    }
}
