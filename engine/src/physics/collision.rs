//! Collision detection module
//!
//! Narrow-phase contact tests for the sandbox world: sphere-sphere and
//! sphere-box. Boxes are axis-aligned; box-box contacts are not generated
//! because every box in the sandbox is static level geometry.
//!
//! # Example
//!
//! ```ignore
//! use grapple_tok_engine::physics::collision::sphere_aabb_contact;
//! use glam::Vec3;
//!
//! let contact = sphere_aabb_contact(
//!     Vec3::new(0.0, 1.1, 0.0),
//!     0.2,
//!     Vec3::new(-1.0, -1.0, -1.0),
//!     Vec3::new(1.0, 1.0, 1.0),
//! );
//! assert!(contact.is_some());
//! ```

use glam::Vec3;

/// A penetrating contact between two shapes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// World-space contact point (on the surface of the second shape)
    pub point: Vec3,
    /// Unit normal pointing from the second shape toward the first
    pub normal: Vec3,
    /// Penetration depth along `normal` (meters, > 0)
    pub depth: f32,
}

/// Sphere vs sphere. The normal points from `b` toward `a`.
pub fn sphere_sphere_contact(
    center_a: Vec3,
    radius_a: f32,
    center_b: Vec3,
    radius_b: f32,
) -> Option<Contact> {
    let delta = center_a - center_b;
    let dist_sq = delta.length_squared();
    let radius_sum = radius_a + radius_b;
    if dist_sq >= radius_sum * radius_sum {
        return None;
    }

    let dist = dist_sq.sqrt();
    // Coincident centers: pick an arbitrary but stable separation axis
    let normal = if dist > 1e-6 { delta / dist } else { Vec3::Y };
    Some(Contact {
        point: center_b + normal * radius_b,
        normal,
        depth: radius_sum - dist,
    })
}

/// Sphere vs axis-aligned box. The normal points from the box toward the sphere.
///
/// Uses the closest point on the box to the sphere center. When the center
/// is inside the box the nearest face normal is used instead.
pub fn sphere_aabb_contact(
    center: Vec3,
    radius: f32,
    aabb_min: Vec3,
    aabb_max: Vec3,
) -> Option<Contact> {
    let closest = center.clamp(aabb_min, aabb_max);
    let delta = center - closest;
    let dist_sq = delta.length_squared();

    if dist_sq > 1e-12 {
        if dist_sq >= radius * radius {
            return None;
        }
        let dist = dist_sq.sqrt();
        return Some(Contact {
            point: closest,
            normal: delta / dist,
            depth: radius - dist,
        });
    }

    // Center inside the box: push out through the nearest face
    let normal = aabb_surface_normal(center, aabb_min, aabb_max);
    let to_face = if normal.x != 0.0 {
        if normal.x > 0.0 { aabb_max.x - center.x } else { center.x - aabb_min.x }
    } else if normal.y != 0.0 {
        if normal.y > 0.0 { aabb_max.y - center.y } else { center.y - aabb_min.y }
    } else if normal.z > 0.0 {
        aabb_max.z - center.z
    } else {
        center.z - aabb_min.z
    };

    Some(Contact {
        point: center + normal * to_face,
        normal,
        depth: to_face + radius,
    })
}

/// Computes the outward normal of the AABB face nearest to `point`.
///
/// Works for points on or inside the box by comparing coordinates in
/// unit-cube space.
pub fn aabb_surface_normal(point: Vec3, aabb_min: Vec3, aabb_max: Vec3) -> Vec3 {
    let center = (aabb_min + aabb_max) * 0.5;
    let half_extents = ((aabb_max - aabb_min) * 0.5).max(Vec3::splat(1e-6));
    let normalized = (point - center) / half_extents;
    let abs_normalized = normalized.abs();

    // signum(0.0) is 1.0, so a point at the exact center still gets a unit normal
    if abs_normalized.x >= abs_normalized.y && abs_normalized.x >= abs_normalized.z {
        Vec3::new(normalized.x.signum(), 0.0, 0.0)
    } else if abs_normalized.y >= abs_normalized.z {
        Vec3::new(0.0, normalized.y.signum(), 0.0)
    } else {
        Vec3::new(0.0, 0.0, normalized.z.signum())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MIN: Vec3 = Vec3::new(-1.0, -1.0, -1.0);
    const MAX: Vec3 = Vec3::new(1.0, 1.0, 1.0);

    #[test]
    fn test_spheres_apart() {
        assert!(sphere_sphere_contact(Vec3::ZERO, 0.5, Vec3::new(2.0, 0.0, 0.0), 0.5).is_none());
    }

    #[test]
    fn test_spheres_overlap() {
        let contact =
            sphere_sphere_contact(Vec3::ZERO, 0.5, Vec3::new(0.8, 0.0, 0.0), 0.5).unwrap();
        assert_eq!(contact.normal, Vec3::new(-1.0, 0.0, 0.0));
        assert!((contact.depth - 0.2).abs() < 1e-5);
    }

    #[test]
    fn test_sphere_touching_box_face() {
        let contact = sphere_aabb_contact(Vec3::new(0.0, 0.0, 1.15), 0.2, MIN, MAX).unwrap();
        assert_eq!(contact.normal, Vec3::Z);
        assert!((contact.depth - 0.05).abs() < 1e-5);
        assert_eq!(contact.point, Vec3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn test_sphere_clear_of_box() {
        assert!(sphere_aabb_contact(Vec3::new(0.0, 0.0, 1.5), 0.2, MIN, MAX).is_none());
    }

    #[test]
    fn test_sphere_center_inside_box() {
        let contact = sphere_aabb_contact(Vec3::new(0.0, 0.9, 0.0), 0.2, MIN, MAX).unwrap();
        assert_eq!(contact.normal, Vec3::Y);
        assert!((contact.depth - 0.3).abs() < 1e-5);
    }

    #[test]
    fn test_surface_normal_picks_dominant_axis() {
        assert_eq!(aabb_surface_normal(Vec3::new(-1.0, 0.2, 0.1), MIN, MAX), Vec3::NEG_X);
        assert_eq!(aabb_surface_normal(Vec3::new(0.1, 0.2, -1.0), MIN, MAX), Vec3::NEG_Z);
    }
}
