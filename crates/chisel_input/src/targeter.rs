//! Voxel targeting by dual raycast
//!
//! The pointing ray runs from the primary controller through the secondary
//! controller. A forward cast finds where it enters the volume's bounds; a
//! backward cast from far along the ray finds where it leaves. The volume
//! then walks that segment for the filled cell nearest the entry point.
//!
//! A secondary controller already inside a volume's bounds enters there, at
//! distance zero. Raycasts do not report a shape their origin lies in.
//!
//! The backward cast collects every intersection because something behind
//! the volume (the floor, a table) would otherwise be the only thing hit.

use std::fmt::Debug;

use chisel_math::{Ray, RayHit, Vec3};
use chisel_volume::{Cell, Volume};

/// Default distance past the secondary controller the backward cast starts from
pub const DEFAULT_BACK_CAST_DISTANCE: f32 = 100.0;

/// The host scene as seen by the targeter
pub trait RaycastScene {
    /// Opaque collider identity
    type Key: Copy + PartialEq + Debug;
    /// Volume type resolved from a collider
    type Volume: Volume;

    /// Nearest hit along the ray
    fn raycast(&self, ray: &Ray) -> Option<RayHit<Self::Key>>;

    /// Every hit along the ray, nearest first
    fn raycast_all(&self, ray: &Ray) -> Vec<RayHit<Self::Key>>;

    /// The volume whose raycast bounds enclose `point`, if any
    fn volume_at(&self, point: Vec3) -> Option<Self::Key>;

    /// The volume behind a collider, if it is one
    fn volume(&self, key: Self::Key) -> Option<&Self::Volume>;

    /// Mutable access to the volume behind a collider
    fn volume_mut(&mut self, key: Self::Key) -> Option<&mut Self::Volume>;

    /// Capability check: does this collider belong to a volume
    fn is_volume(&self, key: Self::Key) -> bool {
        self.volume(key).is_some()
    }
}

/// Everything one targeting pass learned
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TargetOutcome<K> {
    /// The targeted cell, or the sentinel
    pub cell: Cell,
    /// Volume entered by the forward cast
    pub volume: Option<K>,
    /// Where the forward cast hit anything (volume or not)
    pub forward_hit: Option<Vec3>,
    /// Entry point into the volume
    pub entry: Option<Vec3>,
    /// Exit point from the volume
    pub exit: Option<Vec3>,
    /// World position of the targeted cell
    pub cursor: Option<Vec3>,
}

impl<K> TargetOutcome<K> {
    fn none() -> Self {
        Self {
            cell: Cell::SENTINEL,
            volume: None,
            forward_hit: None,
            entry: None,
            exit: None,
            cursor: None,
        }
    }

    /// True if a filled cell is targeted
    pub fn is_locked_on(&self) -> bool {
        !self.cell.is_sentinel()
    }
}

/// Finds the filled voxel the player is pointing at
#[derive(Clone, Debug)]
pub struct VoxelTargeter<K> {
    back_cast_distance: f32,
    target_cell: Cell,
    active_volume: Option<K>,
}

impl<K: Copy + PartialEq + Debug> VoxelTargeter<K> {
    pub fn new() -> Self {
        Self {
            back_cast_distance: DEFAULT_BACK_CAST_DISTANCE,
            target_cell: Cell::SENTINEL,
            active_volume: None,
        }
    }

    /// Builder: set how far along the ray the backward cast starts
    pub fn with_back_cast_distance(mut self, distance: f32) -> Self {
        self.back_cast_distance = distance;
        self
    }

    /// Builder: track a volume before anything has been hit
    pub fn with_volume(mut self, key: K) -> Self {
        self.active_volume = Some(key);
        self
    }

    /// The current target (sentinel when none)
    pub fn target_cell(&self) -> Cell {
        self.target_cell
    }

    /// The volume last entered by the pointing ray
    pub fn active_volume(&self) -> Option<K> {
        self.active_volume
    }

    /// Forget the current target
    pub fn clear_target(&mut self) {
        self.target_cell = Cell::SENTINEL;
    }

    /// Run one targeting pass from the filtered controller positions
    pub fn update<S>(&mut self, primary: Vec3, secondary: Vec3, scene: &S) -> TargetOutcome<K>
    where
        S: RaycastScene<Key = K>,
    {
        let mut outcome = TargetOutcome::none();
        self.target_cell = Cell::SENTINEL;

        let Some(ray) = Ray::new(secondary, secondary - primary) else {
            log::trace!("Controllers coincide; no pointing direction");
            return outcome;
        };

        let entry = match scene.volume_at(secondary).filter(|key| scene.is_volume(*key)) {
            Some(key) => {
                log::trace!("Secondary controller inside {:?}", key);
                RayHit::new(secondary, 0.0, key)
            }
            None => match scene.raycast(&ray) {
                Some(hit) => hit,
                None => return outcome,
            },
        };
        outcome.forward_hit = Some(entry.point);

        let Some(volume) = scene.volume(entry.target) else {
            log::trace!("Forward cast blocked by {:?}", entry.target);
            return outcome;
        };
        self.active_volume = Some(entry.target);
        outcome.volume = Some(entry.target);
        outcome.entry = Some(entry.point);

        let back_origin = secondary + ray.direction * self.back_cast_distance;
        let hits = scene.raycast_all(&ray.reversed_from(back_origin));
        if hits.is_empty() {
            log::trace!("Backward cast hit nothing");
            return outcome;
        }

        let Some(exit) = hits.iter().find(|h| h.target == entry.target) else {
            log::trace!("Backward cast never reached {:?}", entry.target);
            return outcome;
        };
        outcome.exit = Some(exit.point);

        let cell = volume.find_closest_filled_cell(entry.point, exit.point);
        if cell.is_sentinel() {
            return outcome;
        }
        if !volume.contains_cell(cell) {
            log::warn!(
                "Volume {:?} returned out-of-range cell {} (dimensions {:?})",
                entry.target,
                cell,
                volume.dimensions()
            );
            return outcome;
        }

        self.target_cell = cell;
        outcome.cell = cell;
        outcome.cursor = Some(volume.cell_to_world(cell));
        outcome
    }
}

impl<K: Copy + PartialEq + Debug> Default for VoxelTargeter<K> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
pub(crate) mod test_scene {
    //! Scripted scene: fixed forward/backward results and a volume stub

    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;

    pub const VOLUME: u32 = 1;
    pub const FLOOR: u32 = 2;

    #[derive(Default)]
    pub struct StubVolume {
        pub dims: [usize; 3],
        pub closest: Cell,
        pub densities: HashMap<Cell, f32>,
        pub rotation: f32,
        pub queries: RefCell<Vec<(Vec3, Vec3)>>,
    }

    impl Volume for StubVolume {
        fn dimensions(&self) -> [usize; 3] {
            self.dims
        }
        fn fill_threshold(&self) -> f32 {
            0.0
        }
        fn find_closest_filled_cell(&self, entry: Vec3, exit: Vec3) -> Cell {
            self.queries.borrow_mut().push((entry, exit));
            self.closest
        }
        fn cell_to_world(&self, cell: Cell) -> Vec3 {
            Vec3::new(cell.i as f32, cell.j as f32, cell.k as f32) * 0.1
        }
        fn get_cell(&self, cell: Cell) -> f32 {
            self.densities.get(&cell).copied().unwrap_or(0.0)
        }
        fn set_cell(&mut self, cell: Cell, density: f32) {
            self.densities.insert(cell, density);
        }
        fn rotation(&self) -> f32 {
            self.rotation
        }
        fn set_rotation(&mut self, degrees: f32) {
            self.rotation = degrees;
        }
    }

    pub struct ScriptedScene {
        pub forward: Option<RayHit<u32>>,
        pub inside: Option<u32>,
        pub backward: Vec<RayHit<u32>>,
        pub volume: StubVolume,
        pub backward_rays: RefCell<Vec<Ray>>,
    }

    impl ScriptedScene {
        pub fn new(volume: StubVolume) -> Self {
            Self {
                forward: None,
                inside: None,
                backward: Vec::new(),
                volume,
                backward_rays: RefCell::new(Vec::new()),
            }
        }
    }

    impl RaycastScene for ScriptedScene {
        type Key = u32;
        type Volume = StubVolume;

        fn raycast(&self, _ray: &Ray) -> Option<RayHit<u32>> {
            self.forward
        }
        fn raycast_all(&self, ray: &Ray) -> Vec<RayHit<u32>> {
            self.backward_rays.borrow_mut().push(*ray);
            self.backward.clone()
        }
        fn volume_at(&self, _point: Vec3) -> Option<u32> {
            self.inside
        }
        fn volume(&self, key: u32) -> Option<&StubVolume> {
            (key == VOLUME).then_some(&self.volume)
        }
        fn volume_mut(&mut self, key: u32) -> Option<&mut StubVolume> {
            (key == VOLUME).then_some(&mut self.volume)
        }
    }

    pub fn hit(point: Vec3, target: u32) -> RayHit<u32> {
        RayHit::new(point, 1.0, target)
    }

    pub fn stub(closest: Cell) -> StubVolume {
        StubVolume {
            dims: [8, 8, 8],
            closest,
            ..StubVolume::default()
        }
    }
}
