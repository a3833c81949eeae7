//! Scene error types

use std::fmt;

use chisel_physics::ColliderKey;
use chisel_volume::VolumeError;

/// Error type for scene construction and maintenance
#[derive(Debug)]
pub enum SceneError {
    /// A volume could not be built
    Volume(VolumeError),
    /// The key does not name a volume in this scene
    UnknownVolume(ColliderKey),
}

impl fmt::Display for SceneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SceneError::Volume(err) => write!(f, "Scene volume error: {}", err),
            SceneError::UnknownVolume(key) => write!(f, "Unknown volume: {:?}", key),
        }
    }
}

impl std::error::Error for SceneError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SceneError::Volume(err) => Some(err),
            SceneError::UnknownVolume(_) => None,
        }
    }
}

impl From<VolumeError> for SceneError {
    fn from(err: VolumeError) -> Self {
        SceneError::Volume(err)
    }
}
