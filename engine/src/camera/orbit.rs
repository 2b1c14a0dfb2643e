//! Orbit Camera
//!
//! A spherical-coordinate camera circling a fixed look-at target. Dragging
//! rotates azimuth and polar angle, the wheel zooms multiplicatively, and
//! while idle the azimuth drifts slowly for ambient motion.
//!
//! Controls:
//! - Pointer drag: orbit (polar angle clamped away from the poles)
//! - Wheel: zoom (distance clamped)
//! - `enable`/`disable`: gate all input, e.g. while a modal is open

use glam::{Mat4, Vec3};

// ============================================================================
// CONSTANTS
// ============================================================================

/// Default distance from the target.
const DEFAULT_DISTANCE: f32 = 28.0;
/// Default polar angle in radians (measured from +Y).
const DEFAULT_POLAR: f32 = 1.15;
/// Default azimuth in radians.
const DEFAULT_AZIMUTH: f32 = 0.5;
/// Default vertical field of view in radians.
const DEFAULT_FOV: f32 = 0.9;
/// Near clip plane.
const DEFAULT_NEAR: f32 = 0.1;
/// Far clip plane.
const DEFAULT_FAR: f32 = 500.0;

/// Minimum zoom distance.
pub const MIN_DISTANCE: f32 = 6.0;
/// Maximum zoom distance.
pub const MAX_DISTANCE: f32 = 45.0;

/// Polar angle keeps this margin from both poles to avoid the look-at
/// singularity.
pub const POLAR_MARGIN: f32 = 0.1;

/// Radians per pixel of pointer drag.
const DRAG_SENSITIVITY: f32 = 0.005;
/// Multiplicative zoom factor per wheel tick.
const ZOOM_FACTOR: f32 = 0.1;
/// Idle auto-rotation rate in radians per second.
const AUTO_ROTATE_RATE: f32 = 0.1;

// ============================================================================
// ORBIT CAMERA
// ============================================================================

/// Interaction state of the camera controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraState {
    /// Input ignored entirely.
    Disabled,
    /// Accepting input; azimuth drifts at the ambient rate.
    Idle,
    /// Pointer held; drag deltas rotate the view.
    Dragging,
}

/// Spherical orbit camera around a fixed target point.
#[derive(Debug, Clone)]
pub struct OrbitCamera {
    /// Horizontal angle in radians (unbounded, wraps naturally).
    pub azimuth: f32,
    /// Vertical angle from +Y in radians, clamped to
    /// [`POLAR_MARGIN`, pi - `POLAR_MARGIN`].
    pub polar: f32,
    /// Distance from the target, clamped to [`MIN_DISTANCE`, `MAX_DISTANCE`].
    pub distance: f32,
    /// The point the camera orbits and always looks at.
    pub target: Vec3,
    /// Viewport aspect ratio (width / height).
    pub aspect: f32,
    /// Vertical field of view in radians.
    pub fov: f32,
    pub near: f32,
    pub far: f32,

    state: CameraState,
    last_pointer: [f32; 2],
}

impl OrbitCamera {
    /// Camera at the default overview angle, enabled and idle.
    pub fn new(target: Vec3, aspect: f32) -> Self {
        Self {
            azimuth: DEFAULT_AZIMUTH,
            polar: DEFAULT_POLAR,
            distance: DEFAULT_DISTANCE,
            target,
            aspect,
            fov: DEFAULT_FOV,
            near: DEFAULT_NEAR,
            far: DEFAULT_FAR,
            state: CameraState::Idle,
            last_pointer: [0.0, 0.0],
        }
    }

    pub fn state(&self) -> CameraState {
        self.state
    }

    /// Re-enable input after [`disable`](Self::disable).
    pub fn enable(&mut self) {
        if self.state == CameraState::Disabled {
            self.state = CameraState::Idle;
        }
    }

    /// Ignore all input until enabled again. An in-progress drag is dropped.
    pub fn disable(&mut self) {
        self.state = CameraState::Disabled;
    }

    // ========================================================================
    // INPUT
    // ========================================================================

    /// Pointer pressed at screen position: begins a drag when idle.
    pub fn pointer_pressed(&mut self, x: f32, y: f32) {
        if self.state == CameraState::Idle {
            self.state = CameraState::Dragging;
            self.last_pointer = [x, y];
        }
    }

    /// Pointer released: drag ends.
    pub fn pointer_released(&mut self) {
        if self.state == CameraState::Dragging {
            self.state = CameraState::Idle;
        }
    }

    /// Pointer moved. While dragging, the delta rotates the view; the polar
    /// angle stays clamped away from both poles.
    pub fn pointer_moved(&mut self, x: f32, y: f32) {
        if self.state != CameraState::Dragging {
            return;
        }
        let dx = x - self.last_pointer[0];
        let dy = y - self.last_pointer[1];
        self.last_pointer = [x, y];

        self.azimuth -= dx * DRAG_SENSITIVITY;
        self.polar = (self.polar - dy * DRAG_SENSITIVITY)
            .clamp(POLAR_MARGIN, std::f32::consts::PI - POLAR_MARGIN);
    }

    /// Wheel zoom, multiplicative and clamped. Works in any enabled state,
    /// independent of dragging.
    pub fn zoom(&mut self, delta: f32) {
        if self.state == CameraState::Disabled {
            return;
        }
        self.distance = (self.distance * (1.0 - delta * ZOOM_FACTOR))
            .clamp(MIN_DISTANCE, MAX_DISTANCE);
    }

    /// Per-frame update: ambient azimuth drift while idle.
    pub fn update(&mut self, delta: f32) {
        if self.state == CameraState::Idle {
            self.azimuth += AUTO_ROTATE_RATE * delta;
        }
    }

    /// Update the aspect ratio after a resize. Zero sizes are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    // ========================================================================
    // MATRICES
    // ========================================================================

    /// World-space eye position from the spherical coordinates.
    pub fn eye_position(&self) -> Vec3 {
        let sin_polar = self.polar.sin();
        self.target
            + Vec3::new(
                self.distance * sin_polar * self.azimuth.sin(),
                self.distance * self.polar.cos(),
                self.distance * sin_polar * self.azimuth.cos(),
            )
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye_position(), self.target, Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov, self.aspect, self.near, self.far)
    }

    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

// ============================================================================
// TESTS
// ============================================================================
