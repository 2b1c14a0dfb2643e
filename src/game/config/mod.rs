//! Castle Configuration
//!
//! Centralized layout and atmosphere settings for the castle courtyard.
//! `Default` impls carry the shipped scene; an optional JSON file can
//! override any subset of fields at startup.

use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// One rampart cannon emplacement.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CannonSpec {
    /// World position of the carriage
    pub position: Vec3,
    /// Barrel direction (normalized by the battery)
    pub direction: Vec3,
    /// Seconds between shots
    pub interval: f32,
    /// Initial timer offset so walls don't fire in one volley
    pub phase: f32,
}

/// A named, clickable character standing in the courtyard.
///
/// The name keys into the dialogue script table; a name without a script is
/// still rendered but clicking it does nothing.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CharacterSpec {
    pub name: String,
    pub position: Vec3,
    /// Tint for the figure's robe
    pub color: [f32; 4],
}

/// Central configuration for the castle courtyard layout.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct CastleConfig {
    /// Half extent of the grass ground plane (meters)
    pub ground_extent: f32,
    /// Distance from the courtyard center to each curtain wall
    pub wall_offset: f32,
    /// Curtain wall height
    pub wall_height: f32,
    /// Curtain wall thickness
    pub wall_thickness: f32,
    /// Corner tower radius
    pub tower_radius: f32,
    /// Corner tower height (roof cone sits on top)
    pub tower_height: f32,
    /// Keep (central building) position
    pub keep_position: Vec3,
    /// Gate opening width in the south wall
    pub gate_width: f32,
    /// Point the orbit camera looks at
    pub camera_target: Vec3,
    /// Walking speed of patrol guards (m/s)
    pub guard_speed: f32,
    /// One cyclic waypoint route per patrol guard
    pub patrol_routes: Vec<Vec<Vec3>>,
    /// Named characters in the courtyard
    pub characters: Vec<CharacterSpec>,
    /// Horse positions near the stable
    pub horses: Vec<Vec3>,
    /// Rampart cannons
    pub cannons: Vec<CannonSpec>,
}

impl Default for CastleConfig {
    fn default() -> Self {
        Self {
            ground_extent: 60.0,
            wall_offset: 20.0,
            wall_height: 6.0,
            wall_thickness: 1.2,
            tower_radius: 2.6,
            tower_height: 9.0,
            keep_position: Vec3::new(0.0, 0.0, -10.0),
            gate_width: 5.0,
            camera_target: Vec3::new(0.0, 3.0, 0.0),
            guard_speed: 2.2,
            patrol_routes: vec![
                // Courtyard perimeter round
                vec![
                    Vec3::new(-14.0, 0.0, -14.0),
                    Vec3::new(14.0, 0.0, -14.0),
                    Vec3::new(14.0, 0.0, 14.0),
                    Vec3::new(-14.0, 0.0, 14.0),
                ],
                // Short beat in front of the gate
                vec![Vec3::new(-5.0, 0.0, 16.0), Vec3::new(5.0, 0.0, 16.0)],
                // Keep approach
                vec![
                    Vec3::new(-8.0, 0.0, -4.0),
                    Vec3::new(8.0, 0.0, -4.0),
                    Vec3::new(0.0, 0.0, 4.0),
                ],
            ],
            characters: vec![
                CharacterSpec {
                    name: "King".into(),
                    position: Vec3::new(0.0, 0.0, -6.0),
                    color: [0.85, 0.7, 0.2, 1.0],
                },
                CharacterSpec {
                    name: "Queen".into(),
                    position: Vec3::new(3.0, 0.0, -6.5),
                    color: [0.6, 0.2, 0.55, 1.0],
                },
                CharacterSpec {
                    name: "Blacksmith".into(),
                    position: Vec3::new(12.0, 0.0, 6.0),
                    color: [0.35, 0.3, 0.28, 1.0],
                },
            ],
            horses: vec![Vec3::new(-12.0, 0.0, 8.0), Vec3::new(-14.5, 0.0, 10.0)],
            cannons: vec![
                CannonSpec {
                    position: Vec3::new(-16.0, 6.6, 20.0),
                    direction: Vec3::new(-0.3, 0.45, 1.0),
                    interval: 5.0,
                    phase: 0.0,
                },
                CannonSpec {
                    position: Vec3::new(16.0, 6.6, 20.0),
                    direction: Vec3::new(0.3, 0.45, 1.0),
                    interval: 5.0,
                    phase: 2.5,
                },
                CannonSpec {
                    position: Vec3::new(-20.0, 6.6, 0.0),
                    direction: Vec3::new(-1.0, 0.5, 0.1),
                    interval: 7.0,
                    phase: 4.0,
                },
            ],
        }
    }
}

/// Visual atmosphere configuration for the courtyard.
///
/// Bright daylight defaults: the fair is a sunny afternoon scene.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct VisualConfig {
    /// Exponential fog density (higher = thicker haze)
    pub fog_density: f32,
    /// Fog / horizon color (RGB, linear space)
    pub fog_color: Vec3,
    /// Sun direction vector (normalized in the shader)
    pub sun_direction: Vec3,
    /// Ambient light intensity
    pub ambient_intensity: f32,
    /// Zenith sky color for the gradient background
    pub sky_zenith: Vec3,
}

impl Default for VisualConfig {
    fn default() -> Self {
        Self {
            fog_density: 0.008,
            fog_color: Vec3::new(0.75, 0.82, 0.92),
            sun_direction: Vec3::new(0.4, 0.8, 0.35),
            ambient_intensity: 0.45,
            sky_zenith: Vec3::new(0.35, 0.55, 0.85),
        }
    }
}

/// Top-level configuration file shape.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub castle: CastleConfig,
    pub visuals: VisualConfig,
}

/// Configuration loading failures. Only possible when an explicit override
/// path was given; the defaults never fail.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),
}

impl AppConfig {
    /// Load an override file, or the defaults when `path` is `None`.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => {
                let text = std::fs::read_to_string(path)?;
                let config = serde_json::from_str(&text)?;
                log::info!("loaded config override from {}", path.display());
                Ok(config)
            }
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_routes_have_at_least_two_waypoints() {
        let config = CastleConfig::default();
        assert!(!config.patrol_routes.is_empty());
        for route in &config.patrol_routes {
            assert!(route.len() >= 2);
        }
    }

    #[test]
    fn test_default_characters_include_king() {
        let config = CastleConfig::default();
        assert!(config.characters.iter().any(|c| c.name == "King"));
    }

    #[test]
    fn test_partial_override_keeps_defaults() {
        let json = r#"{ "castle": { "wall_height": 9.5 } }"#;
        let config: AppConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.castle.wall_height, 9.5);
        // Untouched fields fall back to defaults
        assert_eq!(config.castle.ground_extent, 60.0);
        assert_eq!(config.visuals.ambient_intensity, 0.45);
    }

    #[test]
    fn test_config_round_trips_through_json() {
        let config = AppConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let back: AppConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.castle.cannons.len(), config.castle.cannons.len());
        assert_eq!(back.castle.patrol_routes, config.castle.patrol_routes);
    }

    #[test]
    fn test_missing_override_file_errors() {
        let result = AppConfig::load(Some(Path::new("/nonexistent/castle.json")));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
