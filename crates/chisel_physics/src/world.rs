//! Collision world and raycast queries

use crate::body::{ColliderKey, StaticCollider};
use crate::collision::{ray_vs_collider, CollisionLayer};
use crate::shapes::Collider;
use chisel_math::{Ray, RayHit, Vec3};
use slotmap::SlotMap;

/// The collision world containing all scene colliders
pub struct CollisionWorld {
    /// All colliders in the world (using generational keys)
    colliders: SlotMap<ColliderKey, StaticCollider>,
}

impl CollisionWorld {
    /// Create an empty collision world
    pub fn new() -> Self {
        Self {
            colliders: SlotMap::with_key(),
        }
    }

    /// Add a collider to the world and return its key
    pub fn add_collider(&mut self, collider: StaticCollider) -> ColliderKey {
        self.colliders.insert(collider)
    }

    /// Remove a collider from the world and return it
    pub fn remove_collider(&mut self, key: ColliderKey) -> Option<StaticCollider> {
        self.colliders.remove(key)
    }

    /// Get an immutable reference to a collider by key
    pub fn get(&self, key: ColliderKey) -> Option<&StaticCollider> {
        self.colliders.get(key)
    }

    /// Replace the shape of an existing collider
    ///
    /// Returns false if the key is stale.
    pub fn set_shape(&mut self, key: ColliderKey, shape: Collider) -> bool {
        match self.colliders.get_mut(key) {
            Some(entry) => {
                entry.collider = shape;
                true
            }
            None => false,
        }
    }

    /// Get the number of colliders in the world
    pub fn len(&self) -> usize {
        self.colliders.len()
    }

    /// Check whether the world has no colliders
    pub fn is_empty(&self) -> bool {
        self.colliders.is_empty()
    }

    /// Cast a ray and return the nearest hit within `max_distance`
    pub fn raycast(
        &self,
        ray: &Ray,
        max_distance: f32,
        mask: CollisionLayer,
    ) -> Option<RayHit<ColliderKey>> {
        self.hits(ray, max_distance, mask)
            .min_by(|a, b| a.distance.total_cmp(&b.distance))
    }

    /// Cast a ray and return every hit within `max_distance`, nearest first
    ///
    /// Each collider contributes at most one hit (where the ray enters it).
    pub fn raycast_all(
        &self,
        ray: &Ray,
        max_distance: f32,
        mask: CollisionLayer,
    ) -> Vec<RayHit<ColliderKey>> {
        let mut hits: Vec<_> = self.hits(ray, max_distance, mask).collect();
        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        log::trace!("raycast_all from {:?}: {} hits", ray.origin, hits.len());
        hits
    }

    /// Keys of colliders on `mask` layers whose shape encloses `point`
    ///
    /// Raycasts starting inside a closed shape never report it; this does.
    pub fn containing(&self, point: Vec3, mask: CollisionLayer) -> Vec<ColliderKey> {
        self.colliders
            .iter()
            .filter(|(_, c)| mask.admits(c.layer) && c.collider.contains(point))
            .map(|(key, _)| key)
            .collect()
    }

    fn hits<'a>(
        &'a self,
        ray: &'a Ray,
        max_distance: f32,
        mask: CollisionLayer,
    ) -> impl Iterator<Item = RayHit<ColliderKey>> + 'a {
        self.colliders
            .iter()
            .filter(move |(_, c)| mask.admits(c.layer))
            .filter_map(move |(key, c)| {
                ray_vs_collider(ray, &c.collider)
                    .filter(|t| *t <= max_distance)
                    .map(|t| RayHit::new(ray.at(t), t, key))
            })
    }
}

impl Default for CollisionWorld {
    fn default() -> Self {
        Self::new()
    }
}
