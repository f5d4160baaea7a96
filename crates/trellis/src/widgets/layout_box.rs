use std::borrow::Cow;

use trellis_geom::{Axis, Point, Rect, Size};

use crate::{
    error::Result,
    layout::distribute_run,
    widget::{LayoutView, Placement, Widget, WidgetKind},
};

/// A container that lays its children out in a row or a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutBox {
    /// Axis along which children follow each other.
    primary: Axis,
}

impl LayoutBox {
    /// A box that places children in a row.
    pub fn horizontal() -> Self {
        Self {
            primary: Axis::Horizontal,
        }
    }

    /// A box that places children in a column.
    pub fn vertical() -> Self {
        Self {
            primary: Axis::Vertical,
        }
    }

    /// The axis children are stacked along.
    pub fn primary(&self) -> Axis {
        self.primary
    }
}

/// Sum along the primary axis, maximum across it.
fn combine(primary: Axis, axis: Axis, values: impl Iterator<Item = u32>) -> u32 {
    if axis == primary {
        values.fold(0, u32::saturating_add)
    } else {
        values.max().unwrap_or(0)
    }
}

impl Widget for LayoutBox {
    fn kind(&self) -> WidgetKind {
        WidgetKind::Container
    }

    fn preferred_size(&self, axis: Axis, ctx: &LayoutView<'_>) -> Result<u32> {
        let sizes = ctx
            .children()
            .iter()
            .map(|c| ctx.preferred_size(*c, axis))
            .collect::<Result<Vec<_>>>()?;
        Ok(combine(self.primary, axis, sizes.into_iter()))
    }

    fn minimum_size(&self, axis: Axis, ctx: &LayoutView<'_>) -> Result<u32> {
        let sizes = ctx
            .children()
            .iter()
            .map(|c| ctx.minimum_size(*c, axis))
            .collect::<Result<Vec<_>>>()?;
        Ok(combine(self.primary, axis, sizes.into_iter()))
    }

    fn stretchable(&self, axis: Axis, ctx: &LayoutView<'_>) -> Result<bool> {
        if ctx.stretch_flag(axis) {
            return Ok(true);
        }
        for child in ctx.children() {
            if ctx.stretchable(*child, axis)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn arrange(&self, size: Size, ctx: &LayoutView<'_>) -> Result<Vec<Placement>> {
        let children = ctx.children();
        let primary = self.primary;
        let secondary = primary.other();

        let mut preferred = Vec::with_capacity(children.len());
        let mut stretch = Vec::with_capacity(children.len());
        for child in children {
            preferred.push(ctx.preferred_size(*child, primary)?);
            stretch.push(ctx.stretchable(*child, primary)?);
        }
        let spans = distribute_run(size.along(primary), &preferred, &stretch);

        let across = size.along(secondary);
        let mut out = Vec::with_capacity(children.len());
        for (child, span) in children.iter().zip(spans) {
            let cross = if ctx.stretchable(*child, secondary)? {
                across
            } else {
                ctx.preferred_size(*child, secondary)?.min(across)
            };
            let mut tl = Point::zero();
            tl.set_along(primary, span.offset);
            let mut child_size = Size::ZERO;
            child_size.set_along(primary, span.size);
            child_size.set_along(secondary, cross);
            out.push(Placement {
                child: *child,
                rect: Rect::new(tl, child_size),
            });
        }
        Ok(out)
    }

    fn class(&self) -> Cow<'static, str> {
        match self.primary {
            Axis::Horizontal => Cow::Borrowed("YLayoutBox_H"),
            Axis::Vertical => Cow::Borrowed("YLayoutBox_V"),
        }
    }
}
