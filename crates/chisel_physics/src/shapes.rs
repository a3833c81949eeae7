//! Collision shapes
//!
//! Lightweight primitives used for raycasting against scene geometry.
//! The sculpting volume is represented by its bounding sphere; floors and
//! props by planes and boxes.

use chisel_math::Vec3;

/// A sphere defined by center and radius
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sphere {
    pub center: Vec3,
    pub radius: f32,
}

impl Sphere {
    /// Create a new sphere at the given center with the given radius
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Check if a point is inside or on the sphere
    pub fn contains(&self, point: Vec3) -> bool {
        (point - self.center).length_squared() <= self.radius * self.radius
    }
}

/// An axis-aligned bounding box
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    /// Minimum corner (all components are minimums)
    pub min: Vec3,
    /// Maximum corner (all components are maximums)
    pub max: Vec3,
}

impl Aabb {
    /// Create a new AABB from min and max corners
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Create an AABB centered at a position with given half-extents
    pub fn from_center_half_extents(center: Vec3, half_extents: Vec3) -> Self {
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    /// Check if a point is inside or on the AABB
    pub fn contains(&self, point: Vec3) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
            && point.z >= self.min.z
            && point.z <= self.max.z
    }
}

/// An infinite plane defined by normal and distance from origin
///
/// The plane equation is: normal · point = distance
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Plane {
    /// Unit normal vector pointing to the positive side
    pub normal: Vec3,
    /// Signed distance from origin along the normal
    pub distance: f32,
}

impl Plane {
    /// Create a plane from a point on the plane and a normal
    ///
    /// The normal will be normalized automatically.
    pub fn from_point_normal(point: Vec3, normal: Vec3) -> Self {
        let n = normal.normalized();
        Self {
            normal: n,
            distance: n.dot(point),
        }
    }

    /// Create a horizontal floor plane at the given Y height
    pub fn floor(y: f32) -> Self {
        Self::from_point_normal(Vec3::new(0.0, y, 0.0), Vec3::Y)
    }

    /// Signed distance from a point to the plane (positive on the normal side)
    pub fn signed_distance(&self, point: Vec3) -> f32 {
        self.normal.dot(point) - self.distance
    }
}

/// Collider enum for storing different collision shape types
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Collider {
    Sphere(Sphere),
    Aabb(Aabb),
    Plane(Plane),
}

impl Collider {
    /// Check if a point is inside or on a closed shape
    ///
    /// Planes enclose nothing.
    pub fn contains(&self, point: Vec3) -> bool {
        match self {
            Collider::Sphere(s) => s.contains(point),
            Collider::Aabb(b) => b.contains(point),
            Collider::Plane(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sphere_contains() {
        let sphere = Sphere::new(Vec3::ZERO, 1.0);
        assert!(sphere.contains(Vec3::ZERO));
        assert!(sphere.contains(Vec3::new(1.0, 0.0, 0.0)));
        assert!(!sphere.contains(Vec3::new(1.1, 0.0, 0.0)));
    }

    #[test]
    fn test_aabb_from_center_half_extents() {
        let aabb = Aabb::from_center_half_extents(Vec3::new(1.0, 2.0, 3.0), Vec3::splat(0.5));
        assert_eq!(aabb.min, Vec3::new(0.5, 1.5, 2.5));
        assert_eq!(aabb.max, Vec3::new(1.5, 2.5, 3.5));
    }

    #[test]
    fn test_aabb_contains() {
        let aabb = Aabb::new(Vec3::ZERO, Vec3::ONE);
        assert!(aabb.contains(Vec3::splat(0.5)));
        assert!(aabb.contains(Vec3::ZERO)); // corner
        assert!(!aabb.contains(Vec3::new(-0.1, 0.5, 0.5)));
    }

    #[test]
    fn test_plane_signed_distance() {
        let floor = Plane::floor(-1.0);
        assert!((floor.signed_distance(Vec3::ZERO) - 1.0).abs() < 0.0001);
        assert!((floor.signed_distance(Vec3::new(4.0, -3.0, 2.0)) + 2.0).abs() < 0.0001);
    }

    #[test]
    fn test_collider_contains() {
        let ball = Collider::Sphere(Sphere::new(Vec3::new(0.0, 1.0, 2.0), 0.5));
        assert!(ball.contains(Vec3::new(0.0, 1.2, 2.3)));
        assert!(!ball.contains(Vec3::new(0.0, 1.0, 1.4)));

        let crate_box = Collider::Aabb(Aabb::from_center_half_extents(Vec3::ZERO, Vec3::splat(0.5)));
        assert!(crate_box.contains(Vec3::new(0.4, -0.4, 0.0)));
        assert!(!crate_box.contains(Vec3::new(0.6, 0.0, 0.0)));

        // Standing on the floor is not being inside it
        assert!(!Collider::Plane(Plane::floor(0.0)).contains(Vec3::ZERO));
    }
}
