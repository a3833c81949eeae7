//! SceneBuilder - Declarative scene construction
//!
//! Provides a fluent API for building sculpting scenes.

use chisel_math::Vec3;
use chisel_physics::{ColliderKey, StaticCollider};
use chisel_volume::DensityVolume;

use super::{SceneError, SculptScene};
use crate::config::AppConfig;

/// Builder for constructing sculpting scenes
///
/// # Example
/// ```ignore
/// let scene = SceneBuilder::new()
///     .add_floor(0.0)
///     .add_table(Vec3::new(0.0, 0.4, 0.5), Vec3::new(0.4, 0.4, 0.3))
///     .add_volume(blank, "pot")
///     .build();
/// ```
pub struct SceneBuilder {
    scene: SculptScene,
    volumes: Vec<ColliderKey>,
}

impl SceneBuilder {
    /// Create a new scene builder
    pub fn new() -> Self {
        Self {
            scene: SculptScene::new(),
            volumes: Vec::new(),
        }
    }

    /// Build the scene described by the `volume` and `scene` config sections
    pub fn from_config(config: &AppConfig) -> Result<Self, SceneError> {
        let blank = config.volume.to_volume()?;
        Ok(Self::new()
            .add_floor(config.scene.floor_y)
            .add_volume(blank, "pot"))
    }

    /// Add a floor at the given Y position
    pub fn add_floor(mut self, y: f32) -> Self {
        self.scene.add_floor(y);
        self
    }

    /// Add a static box, e.g. the table the wheel stands on
    pub fn add_table(mut self, center: Vec3, half_extents: Vec3) -> Self {
        self.scene
            .add_obstacle(StaticCollider::aabb(center, half_extents).with_name("table"));
        self
    }

    /// Add a sculptable volume
    pub fn add_volume(mut self, volume: DensityVolume, name: &str) -> Self {
        let key = self.scene.add_volume(volume, name);
        self.volumes.push(key);
        self
    }

    /// Add arbitrary static geometry
    pub fn add_obstacle(mut self, collider: StaticCollider) -> Self {
        self.scene.add_obstacle(collider);
        self
    }

    /// Keys of the volumes added so far, in order
    pub fn volume_keys(&self) -> &[ColliderKey] {
        &self.volumes
    }

    /// Build the scene
    pub fn build(self) -> SculptScene {
        log::info!(
            "Built scene with {} colliders, {} volumes",
            self.scene.world().len(),
            self.volumes.len()
        );
        self.scene
    }
}

impl Default for SceneBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chisel_input::RaycastScene;

    #[test]
    fn test_empty_scene() {
        let scene = SceneBuilder::new().build();
        assert!(scene.world().is_empty());
        assert_eq!(scene.volume_count(), 0);
    }

    #[test]
    fn test_scene_with_floor_and_table() {
        let scene = SceneBuilder::new()
            .add_floor(0.0)
            .add_table(Vec3::new(0.0, 0.4, 0.5), Vec3::new(0.4, 0.4, 0.3))
            .build();
        assert_eq!(scene.world().len(), 2);
        assert_eq!(scene.volume_count(), 0);
    }

    #[test]
    fn test_scene_with_volume() {
        let volume = DensityVolume::new([4, 4, 4], 0.1, Vec3::ZERO).unwrap();
        let builder = SceneBuilder::new().add_floor(0.0).add_volume(volume, "pot");
        let key = builder.volume_keys()[0];
        let scene = builder.build();
        assert!(scene.is_volume(key));
        assert_eq!(scene.name_of(key), Some("pot"));
    }

    #[test]
    fn test_from_default_config() {
        let scene = SceneBuilder::from_config(&AppConfig::default()).unwrap().build();
        assert_eq!(scene.world().len(), 2);
        assert_eq!(scene.volume_count(), 1);
        let key = scene.first_volume().unwrap();
        assert!(scene.get_volume(key).unwrap().filled_count() > 0);
    }

    #[test]
    fn test_from_config_rejects_bad_volume() {
        let mut config = AppConfig::default();
        config.volume.dimensions = [0, 4, 4];
        assert!(matches!(
            SceneBuilder::from_config(&config),
            Err(SceneError::Volume(_))
        ));
    }
}
