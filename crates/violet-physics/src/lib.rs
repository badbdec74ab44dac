//! Platformer physics over the tile grid: bodies, axis-separated
//! collision, the player controller and slimes.
#![forbid(unsafe_code)]

pub mod action;
pub mod body;
pub mod collision;
pub mod constants;
pub mod monster;
pub mod player;

pub use action::{ActionRequest, ActionState};
pub use body::{Body, Facing};
pub use collision::{CollisionResolver, SolidGrid, VerticalContact};
pub use monster::{Monster, MonsterState, SlimeStats, SlimeVariant};
pub use player::{Player, PlayerInput, Pose};
