use std::borrow::Cow;

use trellis_geom::{Axis, Dim, Margins, Point, Rect, Size};

use crate::{
    error::Result,
    layout::{Align, AxisRequest, distribute},
    widget::{LayoutView, Placement, Widget, WidgetKind},
};

/// A single-child container that aligns its child, surrounds it with margins
/// and optionally enforces a minimum size.
///
/// The same widget serves as an alignment box, a margin box and a minimum size
/// box; its class name reflects which of these roles it plays.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Alignment {
    /// Alignment per axis.
    align: Dim<Align>,
    /// Margins around the child.
    margins: Margins,
    /// Minimum size per axis; zero means no minimum.
    min_size: Dim<u32>,
    /// Background image name, passed through to the backend.
    background: Option<String>,
}

impl Alignment {
    /// Construct an alignment box.
    pub fn new(hor: Align, vert: Align) -> Self {
        Self {
            align: Dim::new(hor, vert),
            ..Self::default()
        }
    }

    /// Construct a box that only adds margins around its child.
    pub fn margin_box(margins: Margins) -> Self {
        Self::default().with_margins(margins)
    }

    /// Construct a box that enforces a minimum size. A zero dimension imposes
    /// no minimum along that axis.
    pub fn min_size(width: u32, height: u32) -> Self {
        Self::default().with_min_size(width, height)
    }

    /// Builder: set the margins.
    pub fn with_margins(mut self, margins: Margins) -> Self {
        self.margins = margins;
        self
    }

    /// Builder: set the minimum size.
    pub fn with_min_size(mut self, width: u32, height: u32) -> Self {
        self.min_size = Dim::new(width, height);
        self
    }

    /// Builder: set the background image.
    pub fn with_background(mut self, name: impl Into<String>) -> Self {
        self.background = Some(name.into());
        self
    }

    /// Alignment along an axis.
    pub fn align(&self, axis: Axis) -> Align {
        self.align[axis]
    }

    /// Change the alignment along an axis.
    pub fn set_align(&mut self, axis: Axis, align: Align) {
        self.align[axis] = align;
    }

    /// Current margins.
    pub fn margins(&self) -> Margins {
        self.margins
    }

    /// Replace the margins.
    pub fn set_margins(&mut self, margins: Margins) {
        self.margins = margins;
    }

    /// Minimum size along an axis.
    pub fn min_size_along(&self, axis: Axis) -> u32 {
        self.min_size[axis]
    }

    /// Change the minimum size along an axis. Only children attached after
    /// this call are promoted to stretchable.
    pub fn set_min_size(&mut self, axis: Axis, value: u32) {
        self.min_size[axis] = value;
    }

    /// Background image name.
    pub fn background(&self) -> Option<&str> {
        self.background.as_deref()
    }

    /// Replace the background image name.
    pub fn set_background(&mut self, name: Option<String>) {
        self.background = name;
    }

    /// Suffix naming the alignment, following the toolkit class names.
    fn class_suffix(&self) -> Option<&'static str> {
        let hor = self.align[Axis::Horizontal];
        let vert = self.align[Axis::Vertical];
        match (hor, vert) {
            (Align::Begin, _) => Some("Left"),
            (Align::End, _) => Some("Right"),
            (Align::Center, Align::Center) => Some("HVCenter"),
            (Align::Center, _) => Some("HCenter"),
            (Align::Unchanged, Align::Begin) => Some("Top"),
            (Align::Unchanged, Align::End) => Some("Bottom"),
            (Align::Unchanged, Align::Center) => Some("VCenter"),
            (Align::Unchanged, Align::Unchanged) => None,
        }
    }
}

impl Widget for Alignment {
    fn kind(&self) -> WidgetKind {
        WidgetKind::SingleChildContainer
    }

    fn preferred_size(&self, axis: Axis, ctx: &LayoutView<'_>) -> Result<u32> {
        let Some(child) = ctx.first_child() else {
            return Ok(self.min_size[axis]);
        };
        let wanted = ctx
            .preferred_size(child, axis)?
            .saturating_add(self.margins.total(axis));
        Ok(wanted.max(self.min_size[axis]))
    }

    fn minimum_size(&self, axis: Axis, ctx: &LayoutView<'_>) -> Result<u32> {
        let Some(child) = ctx.first_child() else {
            return Ok(self.min_size[axis]);
        };
        Ok(ctx.minimum_size(child, axis)?.max(self.min_size[axis]))
    }

    fn stretchable(&self, axis: Axis, ctx: &LayoutView<'_>) -> Result<bool> {
        match (self.align[axis], ctx.first_child()) {
            (Align::Unchanged, Some(child)) => ctx.stretchable(child, axis),
            _ => Ok(true),
        }
    }

    fn arrange(&self, size: Size, ctx: &LayoutView<'_>) -> Result<Vec<Placement>> {
        let child = ctx.require_child()?;
        let mut tl = Point::zero();
        let mut child_size = Size::ZERO;
        for axis in Axis::ALL {
            let align = self.align[axis];
            let stretch = ctx.stretchable(child, axis)?
                && (align == Align::Unchanged || self.stretchable(axis, ctx)?);
            let span = distribute(AxisRequest {
                allotted: size.along(axis),
                preferred: ctx.preferred_size(child, axis)?,
                leading: self.margins.leading(axis),
                trailing: self.margins.trailing(axis),
                stretch,
                align,
            });
            tl.set_along(axis, span.offset);
            child_size.set_along(axis, span.size);
        }
        Ok(vec![Placement {
            child,
            rect: Rect::new(tl, child_size),
        }])
    }

    fn child_stretch(&self) -> Dim<bool> {
        self.min_size.map(|m| m > 0)
    }

    fn class(&self) -> Cow<'static, str> {
        let mut base = "YAlignment";
        if self.align == Dim::splat(Align::Unchanged) {
            if !self.margins.is_zero() {
                base = "YMarginBox";
            }
            base = match (self.min_size.hor, self.min_size.vert) {
                (0, 0) => base,
                (0, _) => "YMinHeight",
                (_, 0) => "YMinWidth",
                _ => "YMinSize",
            };
        }
        match self.class_suffix() {
            Some(suffix) => Cow::Owned(format!("{base}_{suffix}")),
            None => Cow::Borrowed(base),
        }
    }
}
