//! Game Module
//!
//! Courtyard-specific systems built on top of the engine: the scene builder
//! and updater, the dialogue and interaction layer, and the balloon
//! mini-game with its HUD.

pub mod balloons;
pub mod cannons;
pub mod config;
pub mod dialogue;
pub mod gate;
pub mod interaction;
pub mod levels;
pub mod patrol;
pub mod render;
pub mod scene;
pub mod scheduler;
pub mod types;
pub mod ui;

pub use balloons::{BalloonGame, ClickResult, LevelPhase};
pub use config::{AppConfig, CastleConfig, VisualConfig};
pub use dialogue::{AdvanceOutcome, DialogueSystem};
pub use interaction::{Interactable, InteractionTag, pick};
pub use levels::{LEVEL_COUNT, LevelSpec, MovementPattern, level_spec};
pub use render::{SHADER_SOURCE, SceneUniforms};
pub use scene::CastleScene;
pub use types::{Mesh, Vertex};
pub use ui::{Hud, HudAction};
