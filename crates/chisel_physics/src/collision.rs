//! Ray intersection tests and raycast layer filtering
//!
//! Intersections report the distance along the ray to the first surface the
//! ray enters. A ray starting inside a closed shape does not hit it.

use bitflags::bitflags;

use crate::shapes::{Aabb, Collider, Plane, Sphere};
use chisel_math::Ray;

bitflags! {
    /// Collision layers for filtering which colliders a raycast can see
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct CollisionLayer: u32 {
        /// Default layer for most objects
        const DEFAULT = 1 << 0;
        /// Static world geometry (floors, walls, tables)
        const STATIC = 1 << 1;
        /// Sculptable voxel volumes
        const VOLUME = 1 << 2;
        /// Only hit by casts that name this layer explicitly
        const IGNORE_RAYCAST = 1 << 3;
        /// All layers
        const ALL = 0xFFFFFFFF;
    }
}

impl CollisionLayer {
    /// Check whether a raycast with this mask can hit a collider on `layer`
    ///
    /// `IGNORE_RAYCAST` colliders are skipped unless the mask is exactly that layer.
    pub fn admits(self, layer: CollisionLayer) -> bool {
        if layer.contains(CollisionLayer::IGNORE_RAYCAST) {
            return self == CollisionLayer::IGNORE_RAYCAST;
        }
        self.intersects(layer)
    }
}

/// Ray vs sphere
pub fn ray_vs_sphere(ray: &Ray, sphere: &Sphere) -> Option<f32> {
    let oc = ray.origin - sphere.center;
    let c = oc.length_squared() - sphere.radius * sphere.radius;
    if c < 0.0 {
        return None;
    }
    let b = oc.dot(ray.direction);
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    let t = -b - disc.sqrt();
    if t < 0.0 {
        None
    } else {
        Some(t)
    }
}

/// Ray vs AABB (slab method)
pub fn ray_vs_aabb(ray: &Ray, aabb: &Aabb) -> Option<f32> {
    let origin = ray.origin.to_array();
    let dir = ray.direction.to_array();
    let min = aabb.min.to_array();
    let max = aabb.max.to_array();

    let mut t_near = f32::NEG_INFINITY;
    let mut t_far = f32::INFINITY;

    for axis in 0..3 {
        if dir[axis] == 0.0 {
            // Parallel to this slab: must already be between its planes
            if origin[axis] < min[axis] || origin[axis] > max[axis] {
                return None;
            }
            continue;
        }
        let inv = 1.0 / dir[axis];
        let t1 = (min[axis] - origin[axis]) * inv;
        let t2 = (max[axis] - origin[axis]) * inv;
        t_near = t_near.max(t1.min(t2));
        t_far = t_far.min(t1.max(t2));
    }

    if t_near > t_far || t_far < 0.0 || t_near < 0.0 {
        None
    } else {
        Some(t_near)
    }
}

/// Ray vs plane (two-sided)
pub fn ray_vs_plane(ray: &Ray, plane: &Plane) -> Option<f32> {
    let denom = plane.normal.dot(ray.direction);
    if denom.abs() < 1e-6 {
        return None;
    }
    let t = -plane.signed_distance(ray.origin) / denom;
    if t < 0.0 {
        None
    } else {
        Some(t)
    }
}

/// Dispatch a ray test on any collider
pub fn ray_vs_collider(ray: &Ray, collider: &Collider) -> Option<f32> {
    match collider {
        Collider::Sphere(s) => ray_vs_sphere(ray, s),
        Collider::Aabb(b) => ray_vs_aabb(ray, b),
        Collider::Plane(p) => ray_vs_plane(ray, p),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chisel_math::Vec3;

    fn ray(origin: Vec3, dir: Vec3) -> Ray {
        Ray::new(origin, dir).unwrap()
    }

    #[test]
    fn test_ray_hits_sphere_front() {
        let sphere = Sphere::new(Vec3::ZERO, 1.0);
        let t = ray_vs_sphere(&ray(Vec3::new(0.0, 0.0, -5.0), Vec3::Z), &sphere).unwrap();
        assert!((t - 4.0).abs() < 0.0001);
    }

    #[test]
    fn test_ray_misses_sphere() {
        let sphere = Sphere::new(Vec3::ZERO, 1.0);
        assert!(ray_vs_sphere(&ray(Vec3::new(0.0, 2.0, -5.0), Vec3::Z), &sphere).is_none());
        // Sphere behind the ray
        assert!(ray_vs_sphere(&ray(Vec3::new(0.0, 0.0, 5.0), Vec3::Z), &sphere).is_none());
    }

    #[test]
    fn test_ray_inside_sphere_no_hit() {
        let sphere = Sphere::new(Vec3::ZERO, 1.0);
        assert!(ray_vs_sphere(&ray(Vec3::ZERO, Vec3::X), &sphere).is_none());
    }

    #[test]
    fn test_ray_hits_aabb() {
        let aabb = Aabb::new(Vec3::splat(-1.0), Vec3::ONE);
        let t = ray_vs_aabb(&ray(Vec3::new(-4.0, 0.5, 0.0), Vec3::X), &aabb).unwrap();
        assert!((t - 3.0).abs() < 0.0001);
    }

    #[test]
    fn test_ray_parallel_outside_aabb_misses() {
        let aabb = Aabb::new(Vec3::splat(-1.0), Vec3::ONE);
        assert!(ray_vs_aabb(&ray(Vec3::new(-4.0, 2.0, 0.0), Vec3::X), &aabb).is_none());
    }

    #[test]
    fn test_ray_inside_aabb_no_hit() {
        let aabb = Aabb::new(Vec3::splat(-1.0), Vec3::ONE);
        assert!(ray_vs_aabb(&ray(Vec3::ZERO, Vec3::Y), &aabb).is_none());
    }

    #[test]
    fn test_ray_hits_plane_from_either_side() {
        let floor = Plane::floor(0.0);
        let down = ray_vs_plane(&ray(Vec3::new(0.0, 3.0, 0.0), -Vec3::Y), &floor).unwrap();
        assert!((down - 3.0).abs() < 0.0001);
        let up = ray_vs_plane(&ray(Vec3::new(0.0, -2.0, 0.0), Vec3::Y), &floor).unwrap();
        assert!((up - 2.0).abs() < 0.0001);
        assert!(ray_vs_plane(&ray(Vec3::new(0.0, 3.0, 0.0), Vec3::X), &floor).is_none());
    }

    #[test]
    fn test_layer_admits() {
        assert!(CollisionLayer::ALL.admits(CollisionLayer::VOLUME));
        assert!(!CollisionLayer::STATIC.admits(CollisionLayer::VOLUME));
        assert!(!CollisionLayer::ALL.admits(CollisionLayer::IGNORE_RAYCAST));
        assert!(CollisionLayer::IGNORE_RAYCAST.admits(CollisionLayer::IGNORE_RAYCAST));
    }
}
