//! Rays and ray hits

use crate::Vec3;

/// Directions shorter than this are treated as zero
pub const MIN_DIRECTION_LENGTH: f32 = 1e-6;

/// A half-line with a unit-length direction
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    /// Always unit length
    pub direction: Vec3,
}

impl Ray {
    /// Create a ray, normalizing `direction`
    ///
    /// Returns `None` when the direction is (near) zero length.
    pub fn new(origin: Vec3, direction: Vec3) -> Option<Self> {
        let len = direction.length();
        if !len.is_finite() || len < MIN_DIRECTION_LENGTH {
            return None;
        }
        Some(Self {
            origin,
            direction: direction / len,
        })
    }

    /// Point at distance `t` along the ray
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// The same line traversed in the opposite direction from `origin`
    pub fn reversed_from(&self, origin: Vec3) -> Self {
        Self {
            origin,
            direction: -self.direction,
        }
    }
}

/// A world-space ray intersection
///
/// `target` identifies what was hit; its meaning belongs to whoever ran the cast.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayHit<K> {
    /// Intersection point in world space
    pub point: Vec3,
    /// Distance from the ray origin to `point`
    pub distance: f32,
    /// Opaque identity of the intersected collider
    pub target: K,
}

impl<K> RayHit<K> {
    pub fn new(point: Vec3, distance: f32, target: K) -> Self {
        Self { point, distance, target }
    }
}
