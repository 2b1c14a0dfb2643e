//! Camera Module
//!
//! Orbit camera control and cursor picking rays.

pub mod orbit;
pub mod raycast;

pub use orbit::{CameraState, OrbitCamera};
pub use raycast::Ray;
