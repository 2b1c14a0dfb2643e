//! Castle Fair Engine Library
//!
//! Reusable infrastructure for the castle fair: orbit camera and picking,
//! pointer tracking, the wgpu forward renderer, and procedural audio.
//! Game-specific systems live in `src/game/` and are mounted below.
//!
//! # Modules
//!
//! - [`render`] - wgpu pipelines, surface and depth management
//! - [`camera`] - spherical orbit camera and cursor picking rays
//! - [`input`] - pointer tracking with click-vs-drag discrimination
//! - [`audio`] - procedurally synthesized sound effects via rodio

pub mod audio;
pub mod camera;
pub mod input;
pub mod render;

// Game-specific modules (located in src/game/ directory)
#[path = "../../src/game/mod.rs"]
pub mod game;

// Re-export the commonly used engine types at crate level
pub use audio::AudioOutput;
pub use camera::{CameraState, OrbitCamera, Ray};
pub use input::PointerState;
pub use render::{MeshBuffers, RenderConfig, RenderInitError, RenderState};
