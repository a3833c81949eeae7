//! Visual feedback contract for the pointer and cursor

use chisel_math::Vec3;

/// Which material the pointer line is drawn with
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PointerMaterial {
    /// No filled voxel under the ray
    #[default]
    Seeking,
    /// A filled voxel is targeted
    LockedOn,
}

/// Presentation side effects driven by the controller
///
/// Positions are world space; converting into a hand's local frame is the
/// presenter's business.
pub trait PointerPresenter {
    fn set_cursor_visible(&mut self, visible: bool);
    fn set_cursor_position(&mut self, position: Vec3);
    fn set_pointer_visible(&mut self, visible: bool);
    fn set_pointer_line(&mut self, start: Vec3, end: Vec3);
    fn set_pointer_material(&mut self, material: PointerMaterial);
}

/// Plain-data presenter that records the latest visual state
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerView {
    pub cursor_visible: bool,
    pub cursor_position: Vec3,
    pub pointer_visible: bool,
    pub line_start: Vec3,
    pub line_end: Vec3,
    pub material: PointerMaterial,
}

impl PointerPresenter for PointerView {
    fn set_cursor_visible(&mut self, visible: bool) {
        self.cursor_visible = visible;
    }

    fn set_cursor_position(&mut self, position: Vec3) {
        self.cursor_position = position;
    }

    fn set_pointer_visible(&mut self, visible: bool) {
        self.pointer_visible = visible;
    }

    fn set_pointer_line(&mut self, start: Vec3, end: Vec3) {
        self.line_start = start;
        self.line_end = end;
    }

    fn set_pointer_material(&mut self, material: PointerMaterial) {
        self.material = material;
    }
}
