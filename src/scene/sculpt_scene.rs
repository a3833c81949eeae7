//! The sculpting scene: static colliders plus the clay volumes
//!
//! Each volume is registered in the collision world as its bounding sphere on
//! the `VOLUME` layer. The sphere is looser than the grid, so a controller can
//! sit inside it while still outside the clay; `volume_at` reports that case.
//! The targeter only ever learns the collider key; the scene resolves it back
//! to the density grid.

use chisel_input::RaycastScene;
use chisel_math::{Ray, RayHit, Vec3};
use chisel_physics::{Collider, ColliderKey, CollisionLayer, CollisionWorld, Sphere, StaticCollider};
use chisel_volume::DensityVolume;
use slotmap::SecondaryMap;

use super::SceneError;

/// Collision world and the volumes living in it
pub struct SculptScene {
    world: CollisionWorld,
    volumes: SecondaryMap<ColliderKey, DensityVolume>,
    /// Layers raycasts consider
    pub raycast_mask: CollisionLayer,
    /// Raycasts ignore anything further than this
    pub max_distance: f32,
}

impl SculptScene {
    /// Create an empty scene
    pub fn new() -> Self {
        Self {
            world: CollisionWorld::new(),
            volumes: SecondaryMap::new(),
            raycast_mask: CollisionLayer::ALL,
            max_distance: f32::INFINITY,
        }
    }

    /// Add a volume and its raycast collider
    pub fn add_volume(&mut self, volume: DensityVolume, name: &str) -> ColliderKey {
        let (center, radius) = volume.bounding_sphere();
        let key = self
            .world
            .add_collider(StaticCollider::volume_bounds(center, radius).with_name(name));
        log::debug!("Added volume '{}' ({} filled cells)", name, volume.filled_count());
        self.volumes.insert(key, volume);
        key
    }

    /// Add a floor plane at the given Y height
    pub fn add_floor(&mut self, y: f32) -> ColliderKey {
        self.world.add_collider(StaticCollider::floor(y).with_name("floor"))
    }

    /// Add other static geometry (tables, walls)
    pub fn add_obstacle(&mut self, collider: StaticCollider) -> ColliderKey {
        self.world.add_collider(collider)
    }

    /// Remove a volume and its collider
    pub fn remove_volume(&mut self, key: ColliderKey) -> Option<DensityVolume> {
        let volume = self.volumes.remove(key)?;
        self.world.remove_collider(key);
        Some(volume)
    }

    /// Refit a volume's collider to its current bounds
    pub fn sync_volume(&mut self, key: ColliderKey) -> Result<(), SceneError> {
        let volume = self.volumes.get(key).ok_or(SceneError::UnknownVolume(key))?;
        let (center, radius) = volume.bounding_sphere();
        if self.world.set_shape(key, Collider::Sphere(Sphere::new(center, radius))) {
            Ok(())
        } else {
            Err(SceneError::UnknownVolume(key))
        }
    }

    pub fn world(&self) -> &CollisionWorld {
        &self.world
    }

    /// Get a volume by key
    pub fn get_volume(&self, key: ColliderKey) -> Option<&DensityVolume> {
        self.volumes.get(key)
    }

    /// Iterate over all volumes
    pub fn volumes(&self) -> impl Iterator<Item = (ColliderKey, &DensityVolume)> {
        self.volumes.iter()
    }

    /// Number of volumes in the scene
    pub fn volume_count(&self) -> usize {
        self.volumes.len()
    }

    /// The first volume added, if any
    pub fn first_volume(&self) -> Option<ColliderKey> {
        self.volumes.keys().next()
    }

    /// Debug name of a collider
    pub fn name_of(&self, key: ColliderKey) -> Option<&str> {
        self.world.get(key).and_then(|c| c.name.as_deref())
    }
}

impl Default for SculptScene {
    fn default() -> Self {
        Self::new()
    }
}

impl RaycastScene for SculptScene {
    type Key = ColliderKey;
    type Volume = DensityVolume;

    fn raycast(&self, ray: &Ray) -> Option<RayHit<ColliderKey>> {
        self.world.raycast(ray, self.max_distance, self.raycast_mask)
    }

    fn raycast_all(&self, ray: &Ray) -> Vec<RayHit<ColliderKey>> {
        self.world.raycast_all(ray, self.max_distance, self.raycast_mask)
    }

    fn volume_at(&self, point: Vec3) -> Option<ColliderKey> {
        self.world
            .containing(point, self.raycast_mask)
            .into_iter()
            .find(|key| self.volumes.contains_key(*key))
    }

    fn volume(&self, key: ColliderKey) -> Option<&DensityVolume> {
        self.volumes.get(key)
    }

    fn volume_mut(&mut self, key: ColliderKey) -> Option<&mut DensityVolume> {
        self.volumes.get_mut(key)
    }
}
