//! Render Data Module
//!
//! GPU uniform layouts and the embedded WGSL shader for the courtyard
//! pipeline. Everything here is plain data; the wgpu plumbing lives in the
//! engine's render module.

pub mod shader;
pub mod uniforms;

pub use shader::SHADER_SOURCE;
pub use uniforms::SceneUniforms;
