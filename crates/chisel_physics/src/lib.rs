//! Collision queries for the clay chisel controller
//!
//! This crate provides the raycast side of the host scene:
//! - Collision shapes (spheres, AABBs, planes)
//! - Ray intersection tests
//! - A collision world answering raycasts and point containment queries

pub mod body;
pub mod collision;
pub mod shapes;
pub mod world;

// Re-export commonly used types
pub use body::{ColliderKey, StaticCollider};
pub use collision::{ray_vs_aabb, ray_vs_collider, ray_vs_plane, ray_vs_sphere, CollisionLayer};
pub use shapes::{Aabb, Collider, Plane, Sphere};
pub use world::CollisionWorld;
