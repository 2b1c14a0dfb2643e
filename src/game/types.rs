//! Shared Types Module
//!
//! Vertex and mesh types, procedural hash/noise helpers, and the mesh
//! generation primitives used by the castle scene builder.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

// ============================================================================
// GPU VERTEX TYPES
// ============================================================================

/// Vertex for scene geometry and the 2D overlay
#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub color: [f32; 4],
}

// ============================================================================
// MESH STRUCTURE
// ============================================================================

/// A mesh with vertices and indices
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl Mesh {
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            indices: Vec::new(),
        }
    }

    pub fn merge(&mut self, other: &Mesh) {
        let base_idx = self.vertices.len() as u32;
        self.vertices.extend_from_slice(&other.vertices);
        self.indices.extend(other.indices.iter().map(|i| i + base_idx));
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

impl Default for Mesh {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// PROCEDURAL HASH / NOISE FUNCTIONS
// ============================================================================

/// Hash a single float to [0, 1)
pub fn hash_1d(x: f32) -> f32 {
    let n = (x * 12.9898).sin() * 43758.5453;
    n.fract().abs()
}

/// Hash a 2D coordinate to [0, 1)
pub fn hash_2d(x: f32, y: f32) -> f32 {
    let n = (x * 127.1 + y * 311.7).sin() * 43758.5453;
    n.fract().abs()
}

/// Smoothstep interpolation
pub fn smoothstep(t: f32) -> f32 {
    t * t * (3.0 - 2.0 * t)
}

/// 2D value noise used for ground color variation
pub fn noise_2d(x: f32, y: f32) -> f32 {
    let ix = x.floor();
    let iy = y.floor();
    let fx = x - ix;
    let fy = y - iy;

    let v00 = hash_2d(ix, iy);
    let v10 = hash_2d(ix + 1.0, iy);
    let v01 = hash_2d(ix, iy + 1.0);
    let v11 = hash_2d(ix + 1.0, iy + 1.0);

    let sx = smoothstep(fx);
    let sy = smoothstep(fy);

    let v0 = v00 + sx * (v10 - v00);
    let v1 = v01 + sx * (v11 - v01);

    v0 + sy * (v1 - v0)
}

/// Fractal value noise (a few octaves are enough for grass mottling)
pub fn fbm_noise(x: f32, z: f32, octaves: u32) -> f32 {
    let mut value = 0.0;
    let mut amplitude = 1.0;
    let mut frequency = 1.0;
    let mut max_value = 0.0;

    for _ in 0..octaves {
        value += amplitude * noise_2d(x * frequency, z * frequency);
        max_value += amplitude;
        amplitude *= 0.5;
        frequency *= 2.0;
    }

    value / max_value
}

// ============================================================================
// MESH GENERATION PRIMITIVES
// ============================================================================

/// Generate an axis-aligned box mesh
pub fn generate_box(center: Vec3, half_extents: Vec3, color: [f32; 4]) -> Mesh {
    let mut vertices = Vec::new();
    let mut indices = Vec::new();

    let (hx, hy, hz) = (half_extents.x, half_extents.y, half_extents.z);

    let corners = [
        Vec3::new(-hx, -hy, -hz),
        Vec3::new(hx, -hy, -hz),
        Vec3::new(hx, hy, -hz),
        Vec3::new(-hx, hy, -hz),
        Vec3::new(-hx, -hy, hz),
        Vec3::new(hx, -hy, hz),
        Vec3::new(hx, hy, hz),
        Vec3::new(-hx, hy, hz),
    ];

    let faces = [
        ([0, 1, 2, 3], Vec3::new(0.0, 0.0, -1.0)),
        ([5, 4, 7, 6], Vec3::new(0.0, 0.0, 1.0)),
        ([4, 0, 3, 7], Vec3::new(-1.0, 0.0, 0.0)),
        ([1, 5, 6, 2], Vec3::new(1.0, 0.0, 0.0)),
        ([3, 2, 6, 7], Vec3::new(0.0, 1.0, 0.0)),
        ([4, 5, 1, 0], Vec3::new(0.0, -1.0, 0.0)),
    ];

    for (face_indices, normal) in &faces {
        let base = vertices.len() as u32;
        for &i in face_indices {
            let pos = center + corners[i];
            vertices.push(Vertex {
                position: [pos.x, pos.y, pos.z],
                normal: [normal.x, normal.y, normal.z],
                color,
            });
        }
        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    Mesh { vertices, indices }
}

/// Generate a box oriented along an arbitrary forward/up frame
/// (gate leaf, cannon barrels, swinging limbs)
pub fn generate_oriented_box(
    center: Vec3,
    size: Vec3,
    forward: Vec3,
    up: Vec3,
    color: [f32; 4],
) -> Mesh {
    let right = forward.cross(up).normalize();
    let up = right.cross(forward).normalize();

    let (hx, hy, hz) = (size.x / 2.0, size.y / 2.0, size.z / 2.0);

    let mut vertices = Vec::new();
    let mut indices = Vec::new();

    let transform =
        |local: Vec3| -> Vec3 { center + right * local.x + up * local.y + forward * local.z };

    let corners = [
        Vec3::new(-hx, -hy, -hz),
        Vec3::new(hx, -hy, -hz),
        Vec3::new(hx, hy, -hz),
        Vec3::new(-hx, hy, -hz),
        Vec3::new(-hx, -hy, hz),
        Vec3::new(hx, -hy, hz),
        Vec3::new(hx, hy, hz),
        Vec3::new(-hx, hy, hz),
    ];

    let faces = [
        ([0, 1, 2, 3], -forward),
        ([5, 4, 7, 6], forward),
        ([4, 0, 3, 7], -right),
        ([1, 5, 6, 2], right),
        ([3, 2, 6, 7], up),
        ([4, 5, 1, 0], -up),
    ];

    for (face_indices, normal) in &faces {
        let base = vertices.len() as u32;
        for &i in face_indices {
            let pos = transform(corners[i]);
            vertices.push(Vertex {
                position: [pos.x, pos.y, pos.z],
                normal: [normal.x, normal.y, normal.z],
                color,
            });
        }
        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    Mesh { vertices, indices }
}

/// Generate a sphere mesh (projectiles, character heads)
pub fn generate_sphere(center: Vec3, radius: f32, color: [f32; 4], segments: u32) -> Mesh {
    let mut vertices = Vec::new();
    let mut indices = Vec::new();

    for lat in 0..=segments {
        let theta = (lat as f32) * std::f32::consts::PI / (segments as f32);
        let sin_theta = theta.sin();
        let cos_theta = theta.cos();

        for lon in 0..=segments {
            let phi = (lon as f32) * 2.0 * std::f32::consts::PI / (segments as f32);
            let sin_phi = phi.sin();
            let cos_phi = phi.cos();

            let x = sin_theta * cos_phi;
            let y = cos_theta;
            let z = sin_theta * sin_phi;

            let pos = center + Vec3::new(x, y, z) * radius;
            vertices.push(Vertex {
                position: [pos.x, pos.y, pos.z],
                normal: [x, y, z],
                color,
            });
        }
    }

    for lat in 0..segments {
        for lon in 0..segments {
            let first = lat * (segments + 1) + lon;
            let second = first + segments + 1;

            indices.push(first);
            indices.push(second);
            indices.push(first + 1);

            indices.push(second);
            indices.push(second + 1);
            indices.push(first + 1);
        }
    }

    Mesh { vertices, indices }
}

/// Generate a vertical cylinder with flat caps (towers, horse legs)
pub fn generate_cylinder(
    base_center: Vec3,
    radius: f32,
    height: f32,
    color: [f32; 4],
    segments: u32,
) -> Mesh {
    let mut vertices = Vec::new();
    let mut indices = Vec::new();

    let top_center = base_center + Vec3::Y * height;

    // Side wall: two rings of vertices with outward normals
    for ring in 0..2 {
        let y = base_center.y + height * ring as f32;
        for seg in 0..=segments {
            let phi = (seg as f32) * 2.0 * std::f32::consts::PI / (segments as f32);
            let (sin_phi, cos_phi) = phi.sin_cos();
            vertices.push(Vertex {
                position: [
                    base_center.x + radius * cos_phi,
                    y,
                    base_center.z + radius * sin_phi,
                ],
                normal: [cos_phi, 0.0, sin_phi],
                color,
            });
        }
    }

    for seg in 0..segments {
        let lower = seg;
        let upper = seg + segments + 1;
        indices.extend_from_slice(&[lower, upper, lower + 1, upper, upper + 1, lower + 1]);
    }

    // Caps: center vertex plus a rim fan
    for (cap_center, normal_y) in [(base_center, -1.0_f32), (top_center, 1.0)] {
        let center_idx = vertices.len() as u32;
        vertices.push(Vertex {
            position: [cap_center.x, cap_center.y, cap_center.z],
            normal: [0.0, normal_y, 0.0],
            color,
        });
        for seg in 0..=segments {
            let phi = (seg as f32) * 2.0 * std::f32::consts::PI / (segments as f32);
            let (sin_phi, cos_phi) = phi.sin_cos();
            vertices.push(Vertex {
                position: [
                    cap_center.x + radius * cos_phi,
                    cap_center.y,
                    cap_center.z + radius * sin_phi,
                ],
                normal: [0.0, normal_y, 0.0],
                color,
            });
        }
        for seg in 0..segments {
            let a = center_idx + 1 + seg;
            let b = center_idx + 1 + seg + 1;
            if normal_y < 0.0 {
                indices.extend_from_slice(&[center_idx, a, b]);
            } else {
                indices.extend_from_slice(&[center_idx, b, a]);
            }
        }
    }

    Mesh { vertices, indices }
}

/// Generate a cone (tower roofs)
pub fn generate_cone(
    base_center: Vec3,
    radius: f32,
    height: f32,
    color: [f32; 4],
    segments: u32,
) -> Mesh {
    let mut vertices = Vec::new();
    let mut indices = Vec::new();

    let apex = base_center + Vec3::Y * height;
    let slope = radius / height.max(1e-4);

    for seg in 0..segments {
        let phi0 = (seg as f32) * 2.0 * std::f32::consts::PI / (segments as f32);
        let phi1 = ((seg + 1) as f32) * 2.0 * std::f32::consts::PI / (segments as f32);
        let mid = (phi0 + phi1) * 0.5;

        let p0 = base_center + Vec3::new(radius * phi0.cos(), 0.0, radius * phi0.sin());
        let p1 = base_center + Vec3::new(radius * phi1.cos(), 0.0, radius * phi1.sin());
        let normal = Vec3::new(mid.cos(), slope, mid.sin()).normalize();

        let base = vertices.len() as u32;
        for pos in [p0, apex, p1] {
            vertices.push(Vertex {
                position: [pos.x, pos.y, pos.z],
                normal: [normal.x, normal.y, normal.z],
                color,
            });
        }
        indices.extend_from_slice(&[base, base + 1, base + 2]);
    }

    Mesh { vertices, indices }
}
