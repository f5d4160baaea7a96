use serde::{Deserialize, Serialize};

use super::{Axis, Dim, Point, Rect};

/// A `Size` has a width and height but no location.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Size {
    /// Width.
    pub w: u32,
    /// Height.
    pub h: u32,
}

impl Size {
    /// A zero-valued size.
    pub const ZERO: Self = Self { w: 0, h: 0 };

    /// Construct a size from width and height.
    pub fn new(w: u32, h: u32) -> Self {
        Self { w, h }
    }

    /// The extent along an axis.
    pub fn along(&self, axis: Axis) -> u32 {
        match axis {
            Axis::Horizontal => self.w,
            Axis::Vertical => self.h,
        }
    }

    /// Replace the extent along an axis.
    pub fn set_along(&mut self, axis: Axis, value: u32) {
        match axis {
            Axis::Horizontal => self.w = value,
            Axis::Vertical => self.h = value,
        }
    }

    /// Return a `Rect` with this size located at the origin.
    pub fn rect(&self) -> Rect {
        Rect::new(Point::zero(), *self)
    }
}

impl From<(u32, u32)> for Size {
    fn from(v: (u32, u32)) -> Self {
        Self { w: v.0, h: v.1 }
    }
}

impl From<Dim<u32>> for Size {
    fn from(d: Dim<u32>) -> Self {
        Self { w: d.hor, h: d.vert }
    }
}

impl From<Size> for Dim<u32> {
    fn from(s: Size) -> Self {
        Self::new(s.w, s.h)
    }
}
