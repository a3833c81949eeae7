//! Integer voxel coordinates

use std::fmt;

/// A voxel coordinate in a volume's grid
///
/// [`Cell::SENTINEL`] means "no voxel targeted". Any other value handed out by
/// a volume is expected to be in range for that volume.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Cell {
    pub i: i32,
    pub j: i32,
    pub k: i32,
}

impl Cell {
    /// The "no target" value
    pub const SENTINEL: Self = Self { i: -1, j: -1, k: -1 };

    /// Create a new cell coordinate
    #[inline]
    pub const fn new(i: i32, j: i32, k: i32) -> Self {
        Self { i, j, k }
    }

    /// True for the sentinel
    ///
    /// Any component at -1 counts.
    #[inline]
    pub fn is_sentinel(&self) -> bool {
        self.i == -1 || self.j == -1 || self.k == -1
    }

    /// Some(self) unless this is the sentinel
    #[inline]
    pub fn target(self) -> Option<Self> {
        if self.is_sentinel() {
            None
        } else {
            Some(self)
        }
    }

    /// Check the cell lies inside a grid of the given dimensions
    pub fn in_bounds(&self, dimensions: [usize; 3]) -> bool {
        let within = |v: i32, n: usize| v >= 0 && (v as usize) < n;
        within(self.i, dimensions[0]) && within(self.j, dimensions[1]) && within(self.k, dimensions[2])
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::SENTINEL
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.i, self.j, self.k)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinel() {
        assert!(Cell::SENTINEL.is_sentinel());
        assert!(Cell::default().is_sentinel());
        assert!(Cell::new(3, -1, 2).is_sentinel());
        assert!(!Cell::new(0, 0, 0).is_sentinel());
        assert_eq!(Cell::SENTINEL.target(), None);
        assert_eq!(Cell::new(2, 3, 1).target(), Some(Cell::new(2, 3, 1)));
    }

    #[test]
    fn test_in_bounds() {
        let dims = [4, 5, 6];
        assert!(Cell::new(0, 0, 0).in_bounds(dims));
        assert!(Cell::new(3, 4, 5).in_bounds(dims));
        assert!(!Cell::new(4, 0, 0).in_bounds(dims));
        assert!(!Cell::new(0, -2, 0).in_bounds(dims));
        assert!(!Cell::SENTINEL.in_bounds(dims));
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Cell::new(2, 3, 1)), "(2, 3, 1)");
    }
}
