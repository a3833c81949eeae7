//! Clay chisel - VR clay sculpting input
//!
//! The root package wires the chisel crates into a runnable session:
//! layered configuration, raw input mapping, the sculpting scene and the
//! per-frame session system.

pub mod config;
pub mod input;
pub mod scene;
pub mod systems;
