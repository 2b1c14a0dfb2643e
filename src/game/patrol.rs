//! Patrol Movement
//!
//! Waypoint-cycling walkers for the courtyard guards and horses. Movement is
//! purely kinematic: walk toward the current waypoint, switch to the next one
//! (wrapping) once close enough, and always face the direction of travel.

use glam::Vec3;

/// Distance at which a walker counts as "arrived" at its waypoint.
pub const ARRIVAL_THRESHOLD: f32 = 0.15;

/// A walker following a fixed cyclic waypoint route.
#[derive(Debug, Clone)]
pub struct Patrol {
    pub position: Vec3,
    /// Yaw in radians; 0 faces +Z, positive turns toward +X.
    pub facing: f32,
    pub speed: f32,
    waypoints: Vec<Vec3>,
    target: usize,
}

impl Patrol {
    /// Create a patrol starting at the first waypoint, heading for the second.
    ///
    /// A route needs at least two waypoints; with fewer the walker just
    /// stands at its position.
    pub fn new(waypoints: Vec<Vec3>, speed: f32) -> Self {
        let position = waypoints.first().copied().unwrap_or(Vec3::ZERO);
        let target = if waypoints.len() > 1 { 1 } else { 0 };
        Self {
            position,
            facing: 0.0,
            speed,
            waypoints,
            target,
        }
    }

    /// Current target waypoint, if the route is non-empty.
    pub fn target_waypoint(&self) -> Option<Vec3> {
        self.waypoints.get(self.target).copied()
    }

    /// Index of the current target waypoint.
    pub fn target_index(&self) -> usize {
        self.target
    }

    /// Advance the walker by `delta` seconds.
    pub fn update(&mut self, delta: f32) {
        if self.waypoints.len() < 2 {
            return;
        }
        let target = self.waypoints[self.target];
        let to_target = target - self.position;

        if to_target.length() < ARRIVAL_THRESHOLD {
            self.target = (self.target + 1) % self.waypoints.len();
            return;
        }

        let dir = to_target.normalize();
        let step = self.speed * delta;
        // Do not overshoot the waypoint in a single long frame
        if step >= to_target.length() {
            self.position = target;
        } else {
            self.position += dir * step;
        }
        self.facing = dir.x.atan2(dir.z);
    }
}

/// Limb swing angle in radians as a stateless function of elapsed time.
///
/// All walkers share the global clock; `phase` offsets individuals so a line
/// of guards does not march in lockstep.
pub fn limb_swing(time: f32, phase: f32) -> f32 {
    const SWING_FREQUENCY: f32 = 5.0;
    const SWING_AMPLITUDE: f32 = 0.55;
    ((time + phase) * SWING_FREQUENCY).sin() * SWING_AMPLITUDE
}

/// Vertical bob offset for horses, a slower, smaller sine than limb swing.
pub fn horse_bob(time: f32, phase: f32) -> f32 {
    ((time + phase) * 2.2).sin() * 0.08
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square_route() -> Vec<Vec3> {
        vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(10.0, 0.0, 0.0),
            Vec3::new(10.0, 0.0, 10.0),
            Vec3::new(0.0, 0.0, 10.0),
        ]
    }

    #[test]
    fn test_starts_at_first_waypoint() {
        let patrol = Patrol::new(square_route(), 2.0);
        assert_eq!(patrol.position, Vec3::ZERO);
        assert_eq!(patrol.target_index(), 1);
    }

    #[test]
    fn test_moves_toward_target() {
        let mut patrol = Patrol::new(square_route(), 2.0);
        patrol.update(1.0);
        assert!((patrol.position.x - 2.0).abs() < 1e-4);
        assert!(patrol.position.z.abs() < 1e-4);
    }

    #[test]
    fn test_advances_waypoint_on_arrival() {
        let mut patrol = Patrol::new(square_route(), 2.0);
        // Walk for 5 seconds = 10 units: lands exactly on waypoint 1,
        // next update flips the target to waypoint 2
        patrol.update(5.0);
        patrol.update(0.01);
        assert_eq!(patrol.target_index(), 2);
    }

    #[test]
    fn test_route_wraps_around() {
        let mut patrol = Patrol::new(square_route(), 4.0);
        // Plenty of time to complete more than one lap in small steps
        for _ in 0..2000 {
            patrol.update(0.016);
        }
        // Still targeting a valid waypoint after wrapping
        assert!(patrol.target_index() < 4);
        assert!(patrol.position.x >= -0.5 && patrol.position.x <= 10.5);
        assert!(patrol.position.z >= -0.5 && patrol.position.z <= 10.5);
    }

    #[test]
    fn test_facing_follows_travel_direction() {
        let mut patrol = Patrol::new(square_route(), 2.0);
        patrol.update(0.1);
        // Heading along +X: yaw = atan2(1, 0) = pi/2
        assert!((patrol.facing - std::f32::consts::FRAC_PI_2).abs() < 1e-4);
    }

    #[test]
    fn test_single_waypoint_stands_still() {
        let mut patrol = Patrol::new(vec![Vec3::new(3.0, 0.0, 3.0)], 2.0);
        patrol.update(1.0);
        assert_eq!(patrol.position, Vec3::new(3.0, 0.0, 3.0));
    }

    #[test]
    fn test_no_overshoot_on_long_frame() {
        let mut patrol = Patrol::new(square_route(), 2.0);
        patrol.update(100.0);
        assert_eq!(patrol.position, Vec3::new(10.0, 0.0, 0.0));
    }

    #[test]
    fn test_limb_swing_bounded() {
        for i in 0..100 {
            let swing = limb_swing(i as f32 * 0.1, 0.3);
            assert!(swing.abs() <= 0.55 + 1e-6);
        }
    }
}
