//! Wall Cannons
//!
//! Rampart cannons fire on fixed refire intervals, lobbing cosmetic
//! cannonballs over the walls. Projectiles live on a countdown and are
//! retired on expiry; nothing in the scene takes damage.

use glam::Vec3;

/// Downward acceleration applied to cannonballs (m/s^2).
pub const CANNONBALL_GRAVITY: f32 = -9.8;

/// Seconds a cannonball lives before it is retired.
pub const CANNONBALL_LIFETIME: f32 = 3.0;

/// Muzzle speed shared by every wall cannon (m/s).
pub const MUZZLE_SPEED: f32 = 14.0;

/// One rampart cannon emplacement.
#[derive(Debug, Clone)]
pub struct Cannon {
    pub position: Vec3,
    /// Barrel direction, normalized at construction.
    pub barrel_dir: Vec3,
    /// Seconds between shots.
    pub refire_interval: f32,
    /// Accumulated time since the last shot.
    timer: f32,
}

impl Cannon {
    /// Create an emplacement. `phase` offsets the first shot so a wall of
    /// cannons does not fire in one volley.
    pub fn new(position: Vec3, barrel_dir: Vec3, refire_interval: f32, phase: f32) -> Self {
        Self {
            position,
            barrel_dir: barrel_dir.normalize_or_zero(),
            refire_interval,
            timer: phase.clamp(0.0, refire_interval),
        }
    }

    /// Barrel tip in world space.
    pub fn muzzle_position(&self) -> Vec3 {
        self.position + Vec3::Y * 0.6 + self.barrel_dir * 1.6
    }

    /// Seconds until the next shot.
    pub fn time_to_fire(&self) -> f32 {
        (self.refire_interval - self.timer).max(0.0)
    }
}

/// A fired cannonball in flight.
#[derive(Debug, Clone, Copy)]
pub struct Cannonball {
    pub position: Vec3,
    pub velocity: Vec3,
    pub age: f32,
}

impl Cannonball {
    /// True while the ball should stay in the scene.
    pub fn is_alive(&self) -> bool {
        self.age < CANNONBALL_LIFETIME && self.position.y > -2.0
    }
}

/// All wall cannons plus their in-flight projectiles.
///
/// [`update`](CannonBattery::update) is the single per-frame entry point:
/// it advances refire timers, spawns due projectiles, and integrates flight.
pub struct CannonBattery {
    cannons: Vec<Cannon>,
    balls: Vec<Cannonball>,
}

impl CannonBattery {
    pub fn new(cannons: Vec<Cannon>) -> Self {
        Self {
            cannons,
            balls: Vec::new(),
        }
    }

    /// Advance timers and projectiles. Returns the number of shots fired
    /// this frame so the shell can play audio per shot.
    pub fn update(&mut self, delta: f32) -> u32 {
        let mut fired = 0;

        for cannon in &mut self.cannons {
            cannon.timer += delta;
            if cannon.timer >= cannon.refire_interval {
                cannon.timer = 0.0;
                self.balls.push(Cannonball {
                    position: cannon.muzzle_position(),
                    velocity: cannon.barrel_dir * MUZZLE_SPEED,
                    age: 0.0,
                });
                fired += 1;
            }
        }

        for ball in &mut self.balls {
            ball.velocity.y += CANNONBALL_GRAVITY * delta;
            ball.position += ball.velocity * delta;
            ball.age += delta;
        }
        self.balls.retain(|b| b.is_alive());

        fired
    }

    pub fn cannons(&self) -> &[Cannon] {
        &self.cannons
    }

    pub fn balls(&self) -> &[Cannonball] {
        &self.balls
    }

    /// Number of cannonballs currently in flight.
    pub fn active_balls(&self) -> usize {
        self.balls.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single_cannon() -> CannonBattery {
        CannonBattery::new(vec![Cannon::new(
            Vec3::new(0.0, 5.0, 0.0),
            Vec3::new(0.0, 0.4, 1.0),
            4.0,
            0.0,
        )])
    }

    #[test]
    fn test_fires_after_interval() {
        let mut battery = single_cannon();
        assert_eq!(battery.update(3.9), 0);
        assert_eq!(battery.active_balls(), 0);
        assert_eq!(battery.update(0.2), 1);
        assert_eq!(battery.active_balls(), 1);
    }

    #[test]
    fn test_timer_resets_after_shot() {
        let mut battery = single_cannon();
        battery.update(4.1);
        assert_eq!(battery.cannons()[0].time_to_fire(), 4.0);
    }

    #[test]
    fn test_phase_staggers_first_shot() {
        let mut battery = CannonBattery::new(vec![
            Cannon::new(Vec3::ZERO, Vec3::Z, 4.0, 0.0),
            Cannon::new(Vec3::X, Vec3::Z, 4.0, 2.0),
        ]);
        // The phased cannon fires two seconds earlier
        assert_eq!(battery.update(2.1), 1);
        assert_eq!(battery.update(2.0), 1);
    }

    #[test]
    fn test_ball_arcs_downward() {
        let mut battery = single_cannon();
        battery.update(4.1);
        let v0 = battery.balls()[0].velocity.y;
        battery.update(0.5);
        assert!(battery.balls()[0].velocity.y < v0);
    }

    #[test]
    fn test_ball_expires() {
        let mut battery = single_cannon();
        battery.update(4.1);
        assert_eq!(battery.active_balls(), 1);
        // Age past the lifetime in small steps, stopping short of the refire
        for _ in 0..35 {
            battery.update(0.1);
        }
        assert_eq!(battery.active_balls(), 0);
    }
}
