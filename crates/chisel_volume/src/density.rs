//! Dense voxel grid implementing [`Volume`]
//!
//! The grid is an axis-aligned block of `nx * ny * nz` cubic cells. Its min
//! corner sits at `origin` when unrotated, and the whole block spins about the
//! vertical axis through its centre (the pot turning on its wheel).

use crate::cell::Cell;
use crate::error::VolumeError;
use crate::volume::Volume;
use chisel_math::Vec3;

/// Default fill threshold
///
/// Slightly above zero so the float residue left by repeated decrements does
/// not count as clay.
pub const DEFAULT_FILL_THRESHOLD: f32 = 0.01;

/// Offset (in cells) used to pick the cell a segment actually starts in
const BOUNDARY_NUDGE: f32 = 1e-4;

/// A dense scalar density field
#[derive(Clone, Debug)]
pub struct DensityVolume {
    dimensions: [usize; 3],
    cell_size: f32,
    origin: Vec3,
    rotation: f32,
    threshold: f32,
    densities: Vec<f32>,
}

impl DensityVolume {
    /// Create an empty volume
    pub fn new(dimensions: [usize; 3], cell_size: f32, origin: Vec3) -> Result<Self, VolumeError> {
        if !cell_size.is_finite() || cell_size <= 0.0 {
            return Err(VolumeError::InvalidCellSize(cell_size));
        }
        let count = dimensions[0]
            .checked_mul(dimensions[1])
            .and_then(|n| n.checked_mul(dimensions[2]))
            .filter(|n| *n > 0 && *n <= i32::MAX as usize)
            .ok_or(VolumeError::InvalidDimensions(dimensions))?;

        Ok(Self {
            dimensions,
            cell_size,
            origin,
            rotation: 0.0,
            threshold: DEFAULT_FILL_THRESHOLD,
            densities: vec![0.0; count],
        })
    }

    /// Builder: set the fill threshold
    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold;
        self
    }

    /// Builder: set the initial rotation in degrees
    pub fn with_rotation(mut self, degrees: f32) -> Self {
        self.rotation = degrees;
        self
    }

    /// Edge length of one cell
    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Full extent of the grid in world units
    pub fn size(&self) -> Vec3 {
        Vec3::new(
            self.dimensions[0] as f32,
            self.dimensions[1] as f32,
            self.dimensions[2] as f32,
        ) * self.cell_size
    }

    /// World-space centre of the grid (the pivot of its rotation)
    pub fn center(&self) -> Vec3 {
        self.origin + self.size() * 0.5
    }

    /// A sphere enclosing the grid at every rotation, as (centre, radius)
    pub fn bounding_sphere(&self) -> (Vec3, f32) {
        (self.center(), self.size().length() * 0.5)
    }

    /// Raw densities, x fastest then y then z
    pub fn densities(&self) -> &[f32] {
        &self.densities
    }

    /// Number of cells above the fill threshold
    pub fn filled_count(&self) -> usize {
        self.densities.iter().filter(|d| **d > self.threshold).count()
    }

    /// Set every cell to `density`
    pub fn fill(&mut self, density: f32) {
        self.densities.fill(density);
    }

    /// Set every cell from a function of the cell and its centre
    ///
    /// The position passed is relative to the grid centre, unrotated.
    pub fn fill_with<F>(&mut self, mut density: F)
    where
        F: FnMut(Cell, Vec3) -> f32,
    {
        let half = self.size() * 0.5;
        let [nx, ny, nz] = self.dimensions;
        for k in 0..nz {
            for j in 0..ny {
                for i in 0..nx {
                    let cell = Cell::new(i as i32, j as i32, k as i32);
                    let local = (Vec3::new(i as f32, j as f32, k as f32) + Vec3::splat(0.5))
                        * self.cell_size
                        - half;
                    let idx = self.index_unchecked(i, j, k);
                    self.densities[idx] = density(cell, local);
                }
            }
        }
    }

    /// Fill a vertical cylinder of clay around the rotation axis, empty elsewhere
    pub fn fill_cylinder(&mut self, radius: f32, density: f32) {
        let r2 = radius * radius;
        self.fill_with(|_, p| if p.x * p.x + p.z * p.z <= r2 { density } else { 0.0 });
    }

    /// Map a world-space point to continuous grid coordinates (in cells)
    ///
    /// Cell (i, j, k) spans `[i, i+1) x [j, j+1) x [k, k+1)`.
    pub fn world_to_grid(&self, point: Vec3) -> Vec3 {
        let local = (point - self.center()).rotate_y(-self.rotation.to_radians());
        (local + self.size() * 0.5) / self.cell_size
    }

    /// Map continuous grid coordinates back to world space
    pub fn grid_to_world(&self, grid: Vec3) -> Vec3 {
        let local = grid * self.cell_size - self.size() * 0.5;
        local.rotate_y(self.rotation.to_radians()) + self.center()
    }

    fn index_unchecked(&self, i: usize, j: usize, k: usize) -> usize {
        i + self.dimensions[0] * (j + self.dimensions[1] * k)
    }

    fn index(&self, cell: Cell) -> Option<usize> {
        if cell.in_bounds(self.dimensions) {
            Some(self.index_unchecked(cell.i as usize, cell.j as usize, cell.k as usize))
        } else {
            None
        }
    }

    fn is_filled(&self, cell: Cell) -> bool {
        self.index(cell)
            .map(|idx| self.densities[idx] > self.threshold)
            .unwrap_or(false)
    }

    /// Clip the grid-space segment `a -> b` to the grid box
    ///
    /// Returns the parameter range `[t0, t1]` within `[0, 1]`.
    fn clip_to_grid(&self, a: Vec3, b: Vec3) -> Option<(f32, f32)> {
        let d = (b - a).to_array();
        let a = a.to_array();
        let mut t0 = 0.0f32;
        let mut t1 = 1.0f32;

        for axis in 0..3 {
            let n = self.dimensions[axis] as f32;
            if d[axis].abs() < f32::EPSILON {
                if a[axis] < 0.0 || a[axis] > n {
                    return None;
                }
                continue;
            }
            let ta = (0.0 - a[axis]) / d[axis];
            let tb = (n - a[axis]) / d[axis];
            t0 = t0.max(ta.min(tb));
            t1 = t1.min(ta.max(tb));
        }

        if t0 > t1 {
            None
        } else {
            Some((t0, t1))
        }
    }

    fn clamp_to_cell(&self, p: Vec3) -> [i32; 3] {
        let p = p.floor().to_array();
        let mut cell = [0i32; 3];
        for axis in 0..3 {
            let max = self.dimensions[axis] as i32 - 1;
            cell[axis] = (p[axis] as i32).clamp(0, max);
        }
        cell
    }
}

impl Volume for DensityVolume {
    fn dimensions(&self) -> [usize; 3] {
        self.dimensions
    }

    fn fill_threshold(&self) -> f32 {
        self.threshold
    }

    fn find_closest_filled_cell(&self, entry: Vec3, exit: Vec3) -> Cell {
        let a = self.world_to_grid(entry);
        let b = self.world_to_grid(exit);

        let Some((t0, t1)) = self.clip_to_grid(a, b) else {
            log::trace!("segment {:?} -> {:?} misses the grid", entry, exit);
            return Cell::SENTINEL;
        };

        let start = a.lerp(b, t0);
        let seg = a.lerp(b, t1) - start;
        let nudged = start + seg.normalized() * BOUNDARY_NUDGE;
        let mut cell = self.clamp_to_cell(nudged);

        // 3D DDA (Amanatides & Woo) in segment parameter u in [0, 1]
        let start = start.to_array();
        let seg = seg.to_array();
        let mut step = [0i32; 3];
        let mut t_max = [f32::INFINITY; 3];
        let mut t_delta = [f32::INFINITY; 3];
        for axis in 0..3 {
            if seg[axis].abs() < f32::EPSILON {
                continue;
            }
            step[axis] = if seg[axis] > 0.0 { 1 } else { -1 };
            let boundary = (if step[axis] > 0 { cell[axis] + 1 } else { cell[axis] }) as f32;
            t_max[axis] = (boundary - start[axis]) / seg[axis];
            t_delta[axis] = (1.0 / seg[axis]).abs();
        }

        let max_steps = self.dimensions.iter().sum::<usize>() + 3;
        for _ in 0..max_steps {
            let current = Cell::new(cell[0], cell[1], cell[2]);
            if self.is_filled(current) {
                return current;
            }

            let axis = if t_max[0] <= t_max[1] && t_max[0] <= t_max[2] {
                0
            } else if t_max[1] <= t_max[2] {
                1
            } else {
                2
            };
            if t_max[axis] > 1.0 {
                break;
            }
            cell[axis] += step[axis];
            if cell[axis] < 0 || cell[axis] >= self.dimensions[axis] as i32 {
                break;
            }
            t_max[axis] += t_delta[axis];
        }

        Cell::SENTINEL
    }

    fn cell_to_world(&self, cell: Cell) -> Vec3 {
        let g = Vec3::new(cell.i as f32, cell.j as f32, cell.k as f32) + Vec3::splat(0.5);
        self.grid_to_world(g)
    }

    fn get_cell(&self, cell: Cell) -> f32 {
        self.index(cell).map(|idx| self.densities[idx]).unwrap_or(0.0)
    }

    fn set_cell(&mut self, cell: Cell, density: f32) {
        match self.index(cell) {
            Some(idx) => self.densities[idx] = density,
            None => log::warn!("Ignoring write to out-of-range cell {}", cell),
        }
    }

    fn rotation(&self) -> f32 {
        self.rotation
    }

    fn set_rotation(&mut self, degrees: f32) {
        self.rotation = degrees;
    }
}
