//! GPU Uniform Buffers
//!
//! Uniform data for the courtyard shader. Layout must stay in sync with the
//! `Uniforms` struct in `shader.rs`.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};
use static_assertions::const_assert_eq;

use crate::game::config::VisualConfig;

/// Scene-wide uniforms shared by the 3D and overlay passes.
#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
pub struct SceneUniforms {
    pub view_proj: [[f32; 4]; 4],
    pub camera_pos: [f32; 3],
    pub time: f32,
    pub sun_dir: [f32; 3],
    pub fog_density: f32,
    pub fog_color: [f32; 3],
    pub ambient: f32,
}

// WGSL uniform blocks require 16-byte alignment
const_assert_eq!(std::mem::size_of::<SceneUniforms>() % 16, 0);

impl Default for SceneUniforms {
    fn default() -> Self {
        Self {
            view_proj: Mat4::IDENTITY.to_cols_array_2d(),
            camera_pos: [0.0, 0.0, 0.0],
            time: 0.0,
            sun_dir: [0.4, 0.8, 0.35],
            fog_density: 0.008,
            fog_color: [0.75, 0.82, 0.92],
            ambient: 0.45,
        }
    }
}

impl SceneUniforms {
    /// Assemble the frame uniforms from camera and atmosphere state.
    pub fn compose(
        view_proj: Mat4,
        camera_pos: Vec3,
        time: f32,
        visuals: &VisualConfig,
    ) -> Self {
        Self {
            view_proj: view_proj.to_cols_array_2d(),
            camera_pos: camera_pos.to_array(),
            time,
            sun_dir: visuals.sun_direction.normalize_or_zero().to_array(),
            fog_density: visuals.fog_density,
            fog_color: visuals.fog_color.to_array(),
            ambient: visuals.ambient_intensity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_size_is_16_byte_multiple() {
        assert_eq!(std::mem::size_of::<SceneUniforms>() % 16, 0);
    }

    #[test]
    fn test_compose_normalizes_sun() {
        let mut visuals = VisualConfig::default();
        visuals.sun_direction = Vec3::new(0.0, 10.0, 0.0);
        let uniforms = SceneUniforms::compose(Mat4::IDENTITY, Vec3::ZERO, 0.0, &visuals);
        assert!((uniforms.sun_dir[1] - 1.0).abs() < 1e-6);
    }
}
