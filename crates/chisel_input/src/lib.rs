//! Clay chisel input handling
//!
//! This crate turns tracked hand positions into sculpting edits:
//! PRISM-filtered controllers, dual-raycast voxel targeting, and the
//! chisel/rotate/reset actions.

mod chisel_controller;
pub mod events;
pub mod motion_scaler;
pub mod presenter;
pub mod targeter;

pub use chisel_controller::{ChiselController, ChiselSettings, ChiselStroke};
pub use events::{ChiselEvent, EventBus, EventMask, InputQueue};
pub use motion_scaler::{HandMotion, HandPair, MotionScaler, MotionState, PrismCurve};
pub use presenter::{PointerMaterial, PointerPresenter, PointerView};
pub use targeter::{RaycastScene, TargetOutcome, VoxelTargeter, DEFAULT_BACK_CAST_DISTANCE};
