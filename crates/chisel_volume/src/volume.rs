//! The voxel volume collaborator contract

use crate::cell::Cell;
use chisel_math::Vec3;

/// A sculptable scalar density field
///
/// The controller only reads and queries through this trait; the volume
/// owns its storage, meshing and transform.
pub trait Volume {
    /// Grid size in cells along each axis
    fn dimensions(&self) -> [usize; 3];

    /// Densities strictly above this count as filled
    fn fill_threshold(&self) -> f32;

    /// Walk the segment from `entry` to `exit` (world space) and return the
    /// filled cell nearest `entry`, or [`Cell::SENTINEL`]
    fn find_closest_filled_cell(&self, entry: Vec3, exit: Vec3) -> Cell;

    /// World-space position of a cell
    fn cell_to_world(&self, cell: Cell) -> Vec3;

    /// Density stored at a cell (0.0 outside the grid)
    fn get_cell(&self, cell: Cell) -> f32;

    /// Overwrite the density at a cell
    fn set_cell(&mut self, cell: Cell, density: f32);

    /// Rotation about the vertical axis, in degrees
    fn rotation(&self) -> f32;

    /// Set the rotation about the vertical axis, in degrees
    fn set_rotation(&mut self, degrees: f32);

    /// Check a cell is a valid index into this volume
    fn contains_cell(&self, cell: Cell) -> bool {
        cell.in_bounds(self.dimensions())
    }
}
