//! Game layer over the generated world: the play session and its quest,
//! gameplay events, the HUD snapshot, a text viewport and config reloading.
#![forbid(unsafe_code)]

pub mod ascii;
pub mod event;
pub mod hud;
pub mod script;
pub mod session;
pub mod summary;
pub mod watch;

pub use ascii::{AsciiRenderer, Viewport};
pub use event::GameEvent;
pub use hud::HudSnapshot;
pub use script::Script;
pub use session::{QuestState, Session};
pub use summary::WorldSummary;
pub use watch::ConfigWatcher;
