//! Render Module
//!
//! Core wgpu rendering setup: device acquisition, surface configuration,
//! the scene and overlay pipelines, and per-frame encoding.

pub mod pipeline;

pub use pipeline::{MeshBuffers, RenderConfig, RenderInitError, RenderState};
