//! Static collider records stored in the collision world

use crate::collision::CollisionLayer;
use crate::shapes::{Aabb, Collider, Plane, Sphere};
use chisel_math::Vec3;
use slotmap::new_key_type;

// Define generational key type for colliders
new_key_type! {
    /// Key to a collider in the collision world
    ///
    /// Uses generational indexing so a key held across frames never aliases a
    /// collider that was removed and replaced in the same slot.
    pub struct ColliderKey;
}

/// A collider placed in the scene
#[derive(Clone, Debug, PartialEq)]
pub struct StaticCollider {
    /// The collision shape (absolute world position)
    pub collider: Collider,
    /// Layer used for raycast filtering
    pub layer: CollisionLayer,
    /// Optional debug name
    pub name: Option<String>,
}

impl StaticCollider {
    /// Create a collider on the default layer
    pub fn new(collider: Collider) -> Self {
        Self {
            collider,
            layer: CollisionLayer::DEFAULT,
            name: None,
        }
    }

    /// Create a floor plane at the given Y height
    pub fn floor(y: f32) -> Self {
        Self::new(Collider::Plane(Plane::floor(y))).with_layer(CollisionLayer::STATIC)
    }

    /// Create a static box
    pub fn aabb(center: Vec3, half_extents: Vec3) -> Self {
        Self::new(Collider::Aabb(Aabb::from_center_half_extents(center, half_extents)))
            .with_layer(CollisionLayer::STATIC)
    }

    /// Create a bounding sphere for a sculptable volume
    pub fn volume_bounds(center: Vec3, radius: f32) -> Self {
        Self::new(Collider::Sphere(Sphere::new(center, radius))).with_layer(CollisionLayer::VOLUME)
    }

    /// Set the collision layer
    pub fn with_layer(mut self, layer: CollisionLayer) -> Self {
        self.layer = layer;
        self
    }

    /// Set a debug name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}
