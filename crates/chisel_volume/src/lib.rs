//! Voxel volume contract for clay sculpting
//!
//! ## Core Types
//!
//! - [`Cell`] - integer voxel coordinate, with a "no target" sentinel
//! - [`Volume`] - the density-field collaborator the input controller drives
//! - [`DensityVolume`] - a dense in-memory grid implementing [`Volume`]

mod cell;
mod density;
mod error;
mod volume;

pub use cell::Cell;
pub use density::{DensityVolume, DEFAULT_FILL_THRESHOLD};
pub use error::VolumeError;
pub use volume::Volume;
