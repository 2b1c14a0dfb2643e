//! CastleScene: high-level composition of the courtyard.
//!
//! Owns the static castle geometry, the patrol guards, named characters,
//! horses, rampart cannons, and the gate. Its [`update`](CastleScene::update)
//! method is the single entry point for per-frame scene logic. **No wgpu
//! imports**: this module is GPU-agnostic; the shell uploads the meshes.

use glam::Vec3;
use log::debug;

use crate::game::cannons::{Cannon, CannonBattery};
use crate::game::config::CastleConfig;
use crate::game::gate::Gate;
use crate::game::interaction::{Interactable, InteractionTag};
use crate::game::patrol::{Patrol, horse_bob, limb_swing};
use crate::game::types::{
    Mesh, Vertex, fbm_noise, generate_box, generate_cone, generate_cylinder,
    generate_oriented_box, generate_sphere,
};

/// Seconds a clicked guard keeps waving.
pub const WAVE_DURATION: f32 = 1.6;

const STONE: [f32; 4] = [0.62, 0.6, 0.58, 1.0];
const DARK_STONE: [f32; 4] = [0.45, 0.44, 0.43, 1.0];
const ROOF_RED: [f32; 4] = [0.6, 0.2, 0.15, 1.0];
const WOOD: [f32; 4] = [0.45, 0.3, 0.16, 1.0];
const GUARD_BLUE: [f32; 4] = [0.25, 0.3, 0.55, 1.0];
const SKIN: [f32; 4] = [0.85, 0.68, 0.54, 1.0];
const HORSE_BROWN: [f32; 4] = [0.42, 0.28, 0.16, 1.0];
const IRON: [f32; 4] = [0.25, 0.25, 0.27, 1.0];

/// A patrol guard with limb animation state.
pub struct GuardEntity {
    pub patrol: Patrol,
    /// Phase offset so guards don't march in lockstep.
    swing_phase: f32,
    /// Remaining wave-back time; positive while waving.
    wave_timer: f32,
}

impl GuardEntity {
    pub fn is_waving(&self) -> bool {
        self.wave_timer > 0.0
    }
}

/// A named, clickable character.
pub struct Character {
    pub name: String,
    pub position: Vec3,
    pub color: [f32; 4],
    pub highlighted: bool,
}

/// A stabled horse, bobbing in place.
pub struct Horse {
    pub position: Vec3,
    bob_phase: f32,
}

/// Complete courtyard scene: builder plus per-frame updater.
pub struct CastleScene {
    config: CastleConfig,
    static_mesh: Mesh,
    guards: Vec<GuardEntity>,
    characters: Vec<Character>,
    horses: Vec<Horse>,
    cannons: CannonBattery,
    gate: Gate,
    /// Global animation clock driving limb swing and bobbing.
    time: f32,
}

impl CastleScene {
    /// Build the scene from configuration: static geometry once, entities
    /// placed on their routes and marks.
    pub fn new(config: &CastleConfig) -> Self {
        let static_mesh = build_static_mesh(config);

        let guards = config
            .patrol_routes
            .iter()
            .enumerate()
            .map(|(i, route)| GuardEntity {
                patrol: Patrol::new(route.clone(), config.guard_speed),
                swing_phase: i as f32 * 1.3,
                wave_timer: 0.0,
            })
            .collect();

        let characters = config
            .characters
            .iter()
            .map(|spec| Character {
                name: spec.name.clone(),
                position: spec.position,
                color: spec.color,
                highlighted: false,
            })
            .collect();

        let horses = config
            .horses
            .iter()
            .enumerate()
            .map(|(i, &position)| Horse {
                position,
                bob_phase: i as f32 * 0.9,
            })
            .collect();

        let cannons = CannonBattery::new(
            config
                .cannons
                .iter()
                .map(|spec| Cannon::new(spec.position, spec.direction, spec.interval, spec.phase))
                .collect(),
        );

        Self {
            config: config.clone(),
            static_mesh,
            guards,
            characters,
            horses,
            cannons,
            gate: Gate::new(),
            time: 0.0,
        }
    }

    // -- Per-frame updater ---------------------------------------------------

    /// Advance every dynamic piece of the scene by `delta` seconds.
    /// Returns the number of cannon shots fired this frame.
    pub fn update(&mut self, delta: f32) -> u32 {
        self.time += delta;

        for guard in &mut self.guards {
            // Waving guards stop walking for the duration
            if guard.wave_timer > 0.0 {
                guard.wave_timer -= delta;
            } else {
                guard.patrol.update(delta);
            }
        }

        self.gate.update(delta);
        self.cannons.update(delta)
    }

    // -- Interaction entry points -------------------------------------------

    pub fn toggle_gate(&mut self) {
        self.gate.toggle();
        debug!(
            "gate {}",
            if self.gate.is_opening() { "opening" } else { "closing" }
        );
    }

    pub fn gate(&self) -> &Gate {
        &self.gate
    }

    /// Start the wave-back animation on a guard.
    pub fn wave_guard(&mut self, index: usize) {
        if let Some(guard) = self.guards.get_mut(index) {
            guard.wave_timer = WAVE_DURATION;
        }
    }

    /// Toggle a character's highlight (applied while their dialogue is open).
    pub fn set_highlight(&mut self, name: &str, on: bool) {
        for character in &mut self.characters {
            if character.name == name {
                character.highlighted = on;
            }
        }
    }

    pub fn guards(&self) -> &[GuardEntity] {
        &self.guards
    }

    pub fn characters(&self) -> &[Character] {
        &self.characters
    }

    /// Current clickable hit volumes. Guard volumes track their patrols, so
    /// this is rebuilt per query rather than cached.
    pub fn interactables(&self) -> Vec<Interactable> {
        let mut items = Vec::new();

        for character in &self.characters {
            // Only characters with a script are clickable
            if let Some((name, _)) = crate::game::dialogue::script_for(&character.name) {
                items.push(Interactable {
                    tag: InteractionTag::Character(name),
                    center: character.position + Vec3::Y * 1.2,
                    radius: 1.3,
                });
            }
        }

        for (i, guard) in self.guards.iter().enumerate() {
            items.push(Interactable {
                tag: InteractionTag::Guard(i),
                center: guard.patrol.position + Vec3::Y * 1.1,
                radius: 1.1,
            });
        }

        items.push(Interactable {
            tag: InteractionTag::Gate,
            center: Vec3::new(0.0, self.config.wall_height * 0.4, self.config.wall_offset),
            radius: self.config.gate_width * 0.6,
        });

        items
    }

    // -- Mesh assembly -------------------------------------------------------

    pub fn static_mesh(&self) -> &Mesh {
        &self.static_mesh
    }

    /// Regenerate the animated geometry: guards, characters, horses, cannons,
    /// cannonballs, and the drawbridge.
    pub fn build_dynamic_mesh(&self) -> Mesh {
        let mut mesh = Mesh::new();

        for guard in &self.guards {
            self.add_guard_mesh(&mut mesh, guard);
        }
        for character in &self.characters {
            self.add_character_mesh(&mut mesh, character);
        }
        for horse in &self.horses {
            self.add_horse_mesh(&mut mesh, horse);
        }
        for cannon in self.cannons.cannons() {
            add_cannon_mesh(&mut mesh, cannon);
        }
        for ball in self.cannons.balls() {
            mesh.merge(&generate_sphere(ball.position, 0.28, IRON, 8));
        }
        self.add_drawbridge_mesh(&mut mesh);

        mesh
    }

    fn add_guard_mesh(&self, mesh: &mut Mesh, guard: &GuardEntity) {
        let pos = guard.patrol.position;
        let yaw = guard.patrol.facing;
        let fwd = Vec3::new(yaw.sin(), 0.0, yaw.cos());

        // Torso and head
        mesh.merge(&generate_box(
            pos + Vec3::Y * 1.1,
            Vec3::new(0.28, 0.45, 0.18),
            GUARD_BLUE,
        ));
        mesh.merge(&generate_sphere(pos + Vec3::Y * 1.78, 0.2, SKIN, 8));
        // Helmet brim
        mesh.merge(&generate_box(
            pos + Vec3::Y * 1.95,
            Vec3::new(0.22, 0.05, 0.22),
            DARK_STONE,
        ));

        let swing = limb_swing(self.time, guard.swing_phase);

        // Legs swing in opposite phase while walking
        for (side, phase_sign) in [(-1.0_f32, 1.0_f32), (1.0, -1.0)] {
            let hip = pos + Vec3::new(0.0, 0.65, 0.0) + fwd.cross(Vec3::Y) * (0.14 * side);
            let walk = if guard.is_waving() { 0.0 } else { swing * phase_sign };
            let dir = (fwd * walk.sin() - Vec3::Y * walk.cos()).normalize();
            mesh.merge(&generate_oriented_box(
                hip + dir * 0.33,
                Vec3::new(0.14, 0.14, 0.66),
                dir,
                fwd,
                DARK_STONE,
            ));
        }

        // Arms: the waving guard throws one arm up, otherwise both swing
        for (side, phase_sign) in [(-1.0_f32, -1.0_f32), (1.0, 1.0)] {
            let shoulder = pos + Vec3::new(0.0, 1.5, 0.0) + fwd.cross(Vec3::Y) * (0.36 * side);
            let dir = if guard.is_waving() && side > 0.0 {
                let flutter = (self.time * 10.0).sin() * 0.25;
                (Vec3::Y + fwd.cross(Vec3::Y) * (0.5 + flutter)).normalize()
            } else {
                let arm = if guard.is_waving() { 0.0 } else { swing * phase_sign };
                (fwd * arm.sin() - Vec3::Y * arm.cos()).normalize()
            };
            mesh.merge(&generate_oriented_box(
                shoulder + dir * 0.28,
                Vec3::new(0.12, 0.12, 0.56),
                dir,
                fwd,
                GUARD_BLUE,
            ));
        }
    }

    fn add_character_mesh(&self, mesh: &mut Mesh, character: &Character) {
        let pos = character.position;
        let color = if character.highlighted {
            [
                (character.color[0] * 1.5).min(1.0),
                (character.color[1] * 1.5).min(1.0),
                (character.color[2] * 1.5).min(1.0),
                1.0,
            ]
        } else {
            character.color
        };

        // Robe, head
        mesh.merge(&generate_box(
            pos + Vec3::Y * 0.95,
            Vec3::new(0.34, 0.85, 0.26),
            color,
        ));
        mesh.merge(&generate_sphere(pos + Vec3::Y * 2.0, 0.22, SKIN, 8));

        if character.name == "King" {
            mesh.merge(&generate_box(
                pos + Vec3::Y * 2.28,
                Vec3::new(0.18, 0.08, 0.18),
                [1.0, 0.85, 0.2, 1.0],
            ));
        }

        if character.highlighted {
            // Ground ring marking the active speaker
            mesh.merge(&generate_cylinder(
                pos + Vec3::Y * 0.02,
                0.7,
                0.04,
                [1.0, 0.95, 0.5, 1.0],
                16,
            ));
        }
    }

    fn add_horse_mesh(&self, mesh: &mut Mesh, horse: &Horse) {
        let bob = horse_bob(self.time, horse.bob_phase);
        let pos = horse.position + Vec3::Y * bob;

        mesh.merge(&generate_box(
            pos + Vec3::Y * 1.0,
            Vec3::new(0.7, 0.35, 0.35),
            HORSE_BROWN,
        ));
        // Neck and head reach forward over the rail
        mesh.merge(&generate_oriented_box(
            pos + Vec3::new(0.85, 1.45, 0.0),
            Vec3::new(0.22, 0.22, 0.8),
            Vec3::new(0.6, 0.8, 0.0).normalize(),
            Vec3::X,
            HORSE_BROWN,
        ));
        mesh.merge(&generate_box(
            pos + Vec3::new(1.15, 1.85, 0.0),
            Vec3::new(0.24, 0.14, 0.16),
            HORSE_BROWN,
        ));
        // Legs are static; the bob carries the motion
        for (dx, dz) in [(-0.5, -0.22), (-0.5, 0.22), (0.5, -0.22), (0.5, 0.22)] {
            mesh.merge(&generate_cylinder(
                horse.position + Vec3::new(dx, 0.0, dz),
                0.08,
                0.7 + bob,
                HORSE_BROWN,
                6,
            ));
        }
    }

    fn add_drawbridge_mesh(&self, mesh: &mut Mesh) {
        let wall_z = self.config.wall_offset;
        let width = self.config.gate_width - 0.4;
        let height = self.config.wall_height * 0.75;
        let hinge = Vec3::new(0.0, 0.15, wall_z + self.config.wall_thickness * 0.5);

        // Rotates from upright (closed) to flat outward (open)
        let angle = self.gate.progress() * std::f32::consts::FRAC_PI_2;
        let dir = Vec3::new(0.0, angle.cos(), angle.sin());
        mesh.merge(&generate_oriented_box(
            hinge + dir * (height * 0.5),
            Vec3::new(width, 0.25, height),
            dir,
            Vec3::X,
            WOOD,
        ));
    }
}

// ============================================================================
// STATIC GEOMETRY
// ============================================================================

/// Build the immutable castle geometry: ground, curtain walls with merlons,
/// corner towers, the keep, and the stable.
fn build_static_mesh(config: &CastleConfig) -> Mesh {
    let mut mesh = Mesh::new();

    add_ground(&mut mesh, config.ground_extent);

    let offset = config.wall_offset;
    let height = config.wall_height;
    let thickness = config.wall_thickness;
    let length = offset * 2.0;

    // North, east, west curtain walls
    add_wall(&mut mesh, Vec3::new(0.0, 0.0, -offset), length, height, thickness, false);
    add_wall(&mut mesh, Vec3::new(-offset, 0.0, 0.0), length, height, thickness, true);
    add_wall(&mut mesh, Vec3::new(offset, 0.0, 0.0), length, height, thickness, true);

    // South wall is split around the gate opening
    let gap = config.gate_width;
    let segment = (length - gap) / 2.0;
    for side in [-1.0_f32, 1.0] {
        let center_x = side * (gap / 2.0 + segment / 2.0);
        mesh.merge(&generate_box(
            Vec3::new(center_x, height / 2.0, offset),
            Vec3::new(segment / 2.0, height / 2.0, thickness / 2.0),
            STONE,
        ));
    }
    // Gate arch lintel
    mesh.merge(&generate_box(
        Vec3::new(0.0, height - 0.6, offset),
        Vec3::new(gap / 2.0, 0.6, thickness / 2.0),
        DARK_STONE,
    ));

    // Corner towers with conical roofs
    for (x, z) in [
        (-offset, -offset),
        (offset, -offset),
        (-offset, offset),
        (offset, offset),
    ] {
        let base = Vec3::new(x, 0.0, z);
        mesh.merge(&generate_cylinder(
            base,
            config.tower_radius,
            config.tower_height,
            STONE,
            14,
        ));
        mesh.merge(&generate_cone(
            base + Vec3::Y * config.tower_height,
            config.tower_radius * 1.25,
            3.0,
            ROOF_RED,
            14,
        ));
    }

    // Keep: main block, upper floor, roof
    let keep = config.keep_position;
    mesh.merge(&generate_box(
        keep + Vec3::Y * 3.5,
        Vec3::new(6.0, 3.5, 5.0),
        STONE,
    ));
    mesh.merge(&generate_box(
        keep + Vec3::Y * 8.2,
        Vec3::new(4.2, 1.2, 3.6),
        DARK_STONE,
    ));
    mesh.merge(&generate_cone(keep + Vec3::Y * 9.4, 4.5, 3.2, ROOF_RED, 4));

    // Stable by the horses
    mesh.merge(&generate_box(
        Vec3::new(-13.5, 1.1, 9.0),
        Vec3::new(2.8, 1.1, 2.2),
        WOOD,
    ));

    mesh
}

/// Subdivided ground plane with noise-mottled grass coloring.
fn add_ground(mesh: &mut Mesh, extent: f32) {
    const RESOLUTION: u32 = 24;
    let step = extent * 2.0 / RESOLUTION as f32;
    let base = mesh.vertices.len() as u32;

    for row in 0..=RESOLUTION {
        for col in 0..=RESOLUTION {
            let x = -extent + col as f32 * step;
            let z = -extent + row as f32 * step;
            let mottle = fbm_noise(x * 0.15, z * 0.15, 3);
            let color = [
                0.22 + mottle * 0.1,
                0.46 + mottle * 0.14,
                0.18 + mottle * 0.06,
                1.0,
            ];
            mesh.vertices.push(Vertex {
                position: [x, 0.0, z],
                normal: [0.0, 1.0, 0.0],
                color,
            });
        }
    }

    for row in 0..RESOLUTION {
        for col in 0..RESOLUTION {
            let a = base + row * (RESOLUTION + 1) + col;
            let b = a + RESOLUTION + 1;
            mesh.indices
                .extend_from_slice(&[a, b, a + 1, b, b + 1, a + 1]);
        }
    }
}

/// One curtain wall with merlons along the parapet.
fn add_wall(mesh: &mut Mesh, center: Vec3, length: f32, height: f32, thickness: f32, along_z: bool) {
    let half = if along_z {
        Vec3::new(thickness / 2.0, height / 2.0, length / 2.0)
    } else {
        Vec3::new(length / 2.0, height / 2.0, thickness / 2.0)
    };
    mesh.merge(&generate_box(center + Vec3::Y * (height / 2.0), half, STONE));

    // Merlons every few meters
    let count = (length / 3.0) as i32;
    for i in 0..count {
        let t = (i as f32 + 0.5) / count as f32 - 0.5;
        let merlon_center = if along_z {
            center + Vec3::new(0.0, height + 0.35, t * length)
        } else {
            center + Vec3::new(t * length, height + 0.35, 0.0)
        };
        mesh.merge(&generate_box(
            merlon_center,
            Vec3::new(0.45, 0.35, 0.45),
            DARK_STONE,
        ));
    }
}

/// Cannon carriage, wheels, and barrel.
fn add_cannon_mesh(mesh: &mut Mesh, cannon: &Cannon) {
    let pos = cannon.position;
    let dir = cannon.barrel_dir;

    mesh.merge(&generate_box(pos, Vec3::new(0.5, 0.25, 0.7), WOOD));

    let axle = dir.cross(Vec3::Y).normalize_or_zero();
    for side in [-1.0_f32, 1.0] {
        mesh.merge(&generate_cylinder(
            pos + axle * (0.55 * side) + Vec3::new(0.0, -0.3, 0.0),
            0.3,
            0.12,
            DARK_STONE,
            10,
        ));
    }

    mesh.merge(&generate_oriented_box(
        pos + Vec3::Y * 0.5 + dir * 0.8,
        Vec3::new(0.3, 0.3, 1.6),
        dir,
        Vec3::Y,
        IRON,
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::config::CastleConfig;

    fn scene() -> CastleScene {
        CastleScene::new(&CastleConfig::default())
    }

    #[test]
    fn test_scene_builds_static_geometry() {
        let scene = scene();
        assert!(!scene.static_mesh().is_empty());
    }

    #[test]
    fn test_interactables_cover_characters_guards_gate() {
        let scene = scene();
        let items = scene.interactables();

        assert!(items
            .iter()
            .any(|i| i.tag == InteractionTag::Character("King")));
        assert!(items.iter().any(|i| matches!(i.tag, InteractionTag::Guard(_))));
        assert!(items.iter().any(|i| i.tag == InteractionTag::Gate));
    }

    #[test]
    fn test_unknown_character_name_not_clickable() {
        let mut config = CastleConfig::default();
        config.characters[0].name = "Impostor".into();
        let scene = CastleScene::new(&config);

        let items = scene.interactables();
        assert!(!items
            .iter()
            .any(|i| matches!(i.tag, InteractionTag::Character(n) if n == "Impostor")));
    }

    #[test]
    fn test_update_moves_guards() {
        let mut scene = scene();
        let before = scene.guards()[0].patrol.position;
        scene.update(1.0);
        assert_ne!(scene.guards()[0].patrol.position, before);
    }

    #[test]
    fn test_waving_guard_stands_still() {
        let mut scene = scene();
        scene.wave_guard(0);
        assert!(scene.guards()[0].is_waving());

        let before = scene.guards()[0].patrol.position;
        scene.update(0.5);
        assert_eq!(scene.guards()[0].patrol.position, before);

        // Wave runs out and the patrol resumes
        scene.update(WAVE_DURATION);
        scene.update(0.5);
        assert_ne!(scene.guards()[0].patrol.position, before);
    }

    #[test]
    fn test_gate_toggle_advances_progress() {
        let mut scene = scene();
        assert_eq!(scene.gate().progress(), 0.0);
        scene.toggle_gate();
        scene.update(0.5);
        assert!(scene.gate().progress() > 0.0);
    }

    #[test]
    fn test_cannons_fire_over_time() {
        let mut scene = scene();
        let mut shots = 0;
        for _ in 0..80 {
            shots += scene.update(0.1);
        }
        assert!(shots > 0, "no cannon fired in 8 seconds");
    }

    #[test]
    fn test_highlight_round_trip() {
        let mut scene = scene();
        scene.set_highlight("King", true);
        assert!(scene.characters().iter().any(|c| c.highlighted));
        scene.set_highlight("King", false);
        assert!(!scene.characters().iter().any(|c| c.highlighted));
    }

    #[test]
    fn test_dynamic_mesh_nonempty() {
        let mut scene = scene();
        scene.update(0.1);
        let mesh = scene.build_dynamic_mesh();
        assert!(!mesh.is_empty());
        let max = mesh.indices.iter().copied().max().unwrap() as usize;
        assert!(max < mesh.vertices.len());
    }
}
