//! Raycast Module
//!
//! Builds picking rays from cursor positions through a look-at camera and
//! intersects them with sphere hit volumes.

use glam::Vec3;

/// A world-space ray with normalized direction.
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    pub origin: Vec3,
    pub dir: Vec3,
}

impl Ray {
    /// Build the ray through a screen pixel for a camera at `eye` looking at
    /// `target`.
    ///
    /// `cursor` is in physical pixels with (0,0) at the top-left; `fov` is
    /// the vertical field of view in radians.
    pub fn through_pixel(
        eye: Vec3,
        target: Vec3,
        cursor: (f32, f32),
        screen: (f32, f32),
        aspect: f32,
        fov: f32,
    ) -> Self {
        // NDC with +Y up
        let ndc_x = (cursor.0 / screen.0) * 2.0 - 1.0;
        let ndc_y = 1.0 - (cursor.1 / screen.1) * 2.0;

        let forward = (target - eye).normalize();
        // Degenerate straight-up/down view: pick an arbitrary horizontal right
        let (right, up) = if forward.y.abs() > 0.999 {
            let right = Vec3::X;
            (right, right.cross(forward).normalize())
        } else {
            let right = forward.cross(Vec3::Y).normalize();
            (right, right.cross(forward).normalize())
        };

        let half_fov = (fov * 0.5).tan();
        let dir = (forward + right * ndc_x * aspect * half_fov + up * ndc_y * half_fov).normalize();

        Self { origin: eye, dir }
    }

    /// Nearest positive intersection distance with a sphere, if any.
    pub fn intersect_sphere(&self, center: Vec3, radius: f32) -> Option<f32> {
        // |origin + t*dir - center|^2 = r^2, with dir normalized:
        // t^2 + 2t(oc.dir) + (oc.oc - r^2) = 0
        let oc = self.origin - center;
        let b = oc.dot(self.dir);
        let c = oc.dot(oc) - radius * radius;
        let discriminant = b * b - c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrt_disc = discriminant.sqrt();
        let t1 = -b - sqrt_disc;
        let t2 = -b + sqrt_disc;

        if t1 > 1e-3 {
            Some(t1)
        } else if t2 > 1e-3 {
            Some(t2)
        } else {
            None
        }
    }

    /// Point at parameter `t` along the ray.
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.dir * t
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_pixel_ray_points_at_target() {
        let eye = Vec3::new(0.0, 10.0, 20.0);
        let target = Vec3::new(0.0, 2.0, 0.0);
        let ray = Ray::through_pixel(
            eye,
            target,
            (640.0, 360.0),
            (1280.0, 720.0),
            1280.0 / 720.0,
            0.9,
        );

        let expected = (target - eye).normalize();
        assert!(ray.dir.dot(expected) > 0.999);
    }

    #[test]
    fn test_ray_direction_normalized() {
        let eye = Vec3::new(5.0, 8.0, 12.0);
        let target = Vec3::ZERO;
        for cursor in [(0.0, 0.0), (1280.0, 0.0), (0.0, 720.0), (900.0, 500.0)] {
            let ray =
                Ray::through_pixel(eye, target, cursor, (1280.0, 720.0), 16.0 / 9.0, 0.9);
            assert!((ray.dir.length() - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_left_pixel_ray_leans_left() {
        let eye = Vec3::new(0.0, 0.0, 10.0);
        let target = Vec3::ZERO;
        // Camera looks down -Z with right axis +X, so a left-of-center
        // pixel leans toward -X
        let ray = Ray::through_pixel(eye, target, (0.0, 360.0), (1280.0, 720.0), 16.0 / 9.0, 0.9);
        assert!(ray.dir.x < 0.0);
    }

    #[test]
    fn test_sphere_hit_straight_on() {
        let ray = Ray {
            origin: Vec3::new(0.0, 0.0, -10.0),
            dir: Vec3::Z,
        };
        let t = ray.intersect_sphere(Vec3::ZERO, 2.0).unwrap();
        assert!((t - 8.0).abs() < 1e-4);
        assert!((ray.at(t) - Vec3::new(0.0, 0.0, -2.0)).length() < 1e-3);
    }

    #[test]
    fn test_sphere_miss() {
        let ray = Ray {
            origin: Vec3::new(0.0, 0.0, -10.0),
            dir: Vec3::Z,
        };
        assert!(ray.intersect_sphere(Vec3::new(5.0, 0.0, 0.0), 2.0).is_none());
    }

    #[test]
    fn test_sphere_behind_ray_ignored() {
        let ray = Ray {
            origin: Vec3::new(0.0, 0.0, 10.0),
            dir: Vec3::Z,
        };
        assert!(ray.intersect_sphere(Vec3::ZERO, 2.0).is_none());
    }

    #[test]
    fn test_inside_sphere_hits_exit() {
        let ray = Ray {
            origin: Vec3::ZERO,
            dir: Vec3::Z,
        };
        let t = ray.intersect_sphere(Vec3::ZERO, 3.0).unwrap();
        assert!((t - 3.0).abs() < 1e-4);
    }
}
