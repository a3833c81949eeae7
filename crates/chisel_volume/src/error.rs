//! Volume construction errors

use std::fmt;

/// Error type for building a volume
#[derive(Debug, Clone, PartialEq)]
pub enum VolumeError {
    /// One of the grid dimensions is zero (or the cell count overflows)
    InvalidDimensions([usize; 3]),
    /// Cell size is zero, negative or not finite
    InvalidCellSize(f32),
}

impl fmt::Display for VolumeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VolumeError::InvalidDimensions(d) => {
                write!(f, "Invalid volume dimensions: {}x{}x{}", d[0], d[1], d[2])
            }
            VolumeError::InvalidCellSize(s) => write!(f, "Invalid volume cell size: {}", s),
        }
    }
}

impl std::error::Error for VolumeError {}
