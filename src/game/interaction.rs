//! Interaction Registry
//!
//! Clickable scene objects carry an explicit [`InteractionTag`] variant and a
//! world-space hit sphere. Picking casts the cursor ray against every
//! registered volume and dispatches on the nearest hit's tag.

use glam::Vec3;

use crate::camera::raycast::Ray;

/// What clicking an object does. A fixed, enumerated set of behaviors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InteractionTag {
    /// Opens that character's scripted dialogue.
    Character(&'static str),
    /// Waves back and shows a transient message. Carries the guard's index
    /// in the scene so the wave animation reaches the right one.
    Guard(usize),
    /// Toggles the gate.
    Gate,
}

/// A clickable hit volume registered by the scene builder.
#[derive(Debug, Clone)]
pub struct Interactable {
    pub tag: InteractionTag,
    pub center: Vec3,
    pub radius: f32,
}

/// Find the nearest interactable hit by `ray`, if any.
pub fn pick(ray: &Ray, interactables: &[Interactable]) -> Option<InteractionTag> {
    let mut best: Option<(f32, &Interactable)> = None;

    for item in interactables {
        if let Some(t) = ray.intersect_sphere(item.center, item.radius) {
            match best {
                Some((best_t, _)) if best_t <= t => {}
                _ => best = Some((t, item)),
            }
        }
    }

    best.map(|(_, item)| item.tag.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ray_along_z() -> Ray {
        Ray {
            origin: Vec3::new(0.0, 0.0, -10.0),
            dir: Vec3::Z,
        }
    }

    #[test]
    fn test_pick_hits_sphere_on_ray() {
        let items = vec![Interactable {
            tag: InteractionTag::Gate,
            center: Vec3::ZERO,
            radius: 1.0,
        }];
        assert_eq!(pick(&ray_along_z(), &items), Some(InteractionTag::Gate));
    }

    #[test]
    fn test_pick_misses_offset_sphere() {
        let items = vec![Interactable {
            tag: InteractionTag::Gate,
            center: Vec3::new(5.0, 0.0, 0.0),
            radius: 1.0,
        }];
        assert_eq!(pick(&ray_along_z(), &items), None);
    }

    #[test]
    fn test_pick_prefers_nearest() {
        let items = vec![
            Interactable {
                tag: InteractionTag::Character("King"),
                center: Vec3::new(0.0, 0.0, 5.0),
                radius: 1.0,
            },
            Interactable {
                tag: InteractionTag::Guard(0),
                center: Vec3::new(0.0, 0.0, 0.0),
                radius: 1.0,
            },
        ];
        assert_eq!(pick(&ray_along_z(), &items), Some(InteractionTag::Guard(0)));
    }

    #[test]
    fn test_pick_empty_registry() {
        assert_eq!(pick(&ray_along_z(), &[]), None);
    }
}
