//! 3D Mathematics for the clay chisel controller
//!
//! ## Core Types
//!
//! - [`Vec3`] - 3D vector with x, y, z components
//! - [`Ray`] - origin plus unit direction
//! - [`RayHit`] - a world-space hit tagged with an opaque collider identity

mod vec3;
pub mod ray;

pub use vec3::{lerp, Vec3};
pub use ray::{Ray, RayHit};
