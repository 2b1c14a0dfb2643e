//! Shader Source
//!
//! WGSL shader for the courtyard pipeline. Two entry point pairs share one
//! module: `vs_main`/`fs_main` render the 3D scene with sun lighting and
//! exponential distance fog; `vs_ui`/`fs_ui` pass the overlay mesh through
//! in NDC with vertex colors.

/// Courtyard shader source. The `Uniforms` block must match
/// [`SceneUniforms`](super::uniforms::SceneUniforms).
pub const SHADER_SOURCE: &str = r#"
struct Uniforms {
    view_proj: mat4x4<f32>,
    camera_pos: vec3<f32>,
    time: f32,
    sun_dir: vec3<f32>,
    fog_density: f32,
    fog_color: vec3<f32>,
    ambient: f32,
}

@group(0) @binding(0) var<uniform> uniforms: Uniforms;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
    @location(2) color: vec4<f32>,
}

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) world_pos: vec3<f32>,
    @location(1) normal: vec3<f32>,
    @location(2) color: vec4<f32>,
}

@vertex
fn vs_main(in: VertexInput) -> VertexOutput {
    var out: VertexOutput;
    out.clip_position = uniforms.view_proj * vec4<f32>(in.position, 1.0);
    out.world_pos = in.position;
    out.normal = in.normal;
    out.color = in.color;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let n = normalize(in.normal);
    let sun = normalize(uniforms.sun_dir);

    // Lambert sun with a soft fill so undersides aren't pitch black
    let diffuse = max(dot(n, sun), 0.0);
    let fill = max(dot(n, vec3<f32>(-sun.x, 0.3, -sun.z)), 0.0) * 0.15;
    let light = uniforms.ambient + (1.0 - uniforms.ambient) * diffuse + fill;

    var color = in.color.rgb * light;

    // Exponential distance fog toward the horizon color
    let dist = distance(in.world_pos, uniforms.camera_pos);
    let fog = 1.0 - exp(-uniforms.fog_density * dist);
    color = mix(color, uniforms.fog_color, fog);

    return vec4<f32>(color, in.color.a);
}

// ----------------------------------------------------------------------------
// Overlay pass: geometry already in NDC, colors straight through
// ----------------------------------------------------------------------------

struct UiVertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) color: vec4<f32>,
}

@vertex
fn vs_ui(in: VertexInput) -> UiVertexOutput {
    var out: UiVertexOutput;
    out.clip_position = vec4<f32>(in.position, 1.0);
    out.color = in.color;
    return out;
}

@fragment
fn fs_ui(in: UiVertexOutput) -> @location(0) vec4<f32> {
    return in.color;
}
"#;

#[cfg(test)]
mod tests {
    use super::SHADER_SOURCE;

    /// The embedded WGSL must parse; a typo here only surfaces at runtime
    /// otherwise.
    #[test]
    fn test_shader_parses() {
        let module = naga::front::wgsl::parse_str(SHADER_SOURCE).expect("WGSL parse failed");
        let entry_names: Vec<_> = module
            .entry_points
            .iter()
            .map(|ep| ep.name.as_str())
            .collect();
        for expected in ["vs_main", "fs_main", "vs_ui", "fs_ui"] {
            assert!(
                entry_names.contains(&expected),
                "missing entry point {expected}"
            );
        }
    }

    #[test]
    fn test_uniform_block_matches_rust_layout() {
        // 4x4 matrix + three vec3/f32 groups = 112 bytes
        assert_eq!(
            std::mem::size_of::<crate::game::render::SceneUniforms>(),
            112
        );
    }
}
