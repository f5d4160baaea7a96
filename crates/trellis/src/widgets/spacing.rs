use std::borrow::Cow;

use trellis_geom::{Axis, Size};

use crate::{
    error::Result,
    widget::{LayoutView, Widget},
};

/// Empty space of a fixed preferred size. Mark it stretchable to make it
/// absorb surplus space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Spacing {
    /// Preferred extent.
    size: Size,
}

impl Spacing {
    /// Construct a spacer.
    pub fn new(size: Size) -> Self {
        Self { size }
    }
}

impl Widget for Spacing {
    fn preferred_size(&self, axis: Axis, _ctx: &LayoutView<'_>) -> Result<u32> {
        Ok(self.size.along(axis))
    }

    fn class(&self) -> Cow<'static, str> {
        Cow::Borrowed("YSpacing")
    }
}
