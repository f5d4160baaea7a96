//! Widget trait and layout context.

use std::{
    any::{Any, type_name},
    borrow::Cow,
};

use trellis_geom::{Axis, Dim, Rect, Size};

use crate::{
    NodeId,
    error::{Error, Result},
    world::Core,
};

/// The structural capability of a widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WidgetKind {
    /// Holds no children.
    Leaf,
    /// Holds any number of children.
    Container,
    /// Holds at most one child.
    SingleChildContainer,
}

impl WidgetKind {
    /// Can a node of this kind hold children at all?
    pub fn is_container(self) -> bool {
        !matches!(self, Self::Leaf)
    }
}

/// Where a container wants one of its children, relative to its own origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// The child being placed.
    pub child: NodeId,
    /// Position and size of the child.
    pub rect: Rect,
}

/// Widgets are the behavior attached to nodes in the Core arena.
///
/// All geometry methods take `&self` and a read-only [`LayoutView`], so a
/// widget can consult its children while the engine holds the arena. Leaf
/// widgets implement [`Widget::preferred_size`]; containers additionally
/// implement [`Widget::arrange`].
pub trait Widget: Any + Send {
    /// Structural capability of this widget.
    fn kind(&self) -> WidgetKind {
        WidgetKind::Leaf
    }

    /// Preferred extent along an axis.
    fn preferred_size(&self, axis: Axis, ctx: &LayoutView<'_>) -> Result<u32>;

    /// Smallest usable extent along an axis. Leaves use their preferred size.
    fn minimum_size(&self, axis: Axis, ctx: &LayoutView<'_>) -> Result<u32> {
        self.preferred_size(axis, ctx)
    }

    /// Whether the widget wants to grow beyond its preferred size.
    fn stretchable(&self, axis: Axis, ctx: &LayoutView<'_>) -> Result<bool> {
        Ok(ctx.stretch_flag(axis))
    }

    /// Compute child placements for an assigned size. Only called on
    /// containers that have at least one child.
    fn arrange(&self, _size: Size, _ctx: &LayoutView<'_>) -> Result<Vec<Placement>> {
        Ok(Vec::new())
    }

    /// Axes along which a newly attached child is made stretchable.
    fn child_stretch(&self) -> Dim<bool> {
        Dim::splat(false)
    }

    /// Initial value of the node's notify flag.
    fn notifies(&self) -> bool {
        false
    }

    /// Class name used in logs and dumps.
    fn class(&self) -> Cow<'static, str> {
        let name = type_name::<Self>();
        Cow::Borrowed(name.rsplit("::").next().unwrap_or(name))
    }
}

/// Convert widgets into boxed trait objects.
impl<W> From<W> for Box<dyn Widget>
where
    W: Widget + 'static,
{
    fn from(widget: W) -> Self {
        Box::new(widget)
    }
}

/// Downcast a widget trait object to a concrete type.
pub(crate) fn downcast_ref<W: Widget>(widget: &dyn Widget) -> Option<&W> {
    let any = widget as &dyn Any;
    any.downcast_ref::<W>()
}

/// Downcast a mutable widget trait object to a concrete type.
pub(crate) fn downcast_mut<W: Widget>(widget: &mut dyn Widget) -> Option<&mut W> {
    let any = widget as &mut dyn Any;
    any.downcast_mut::<W>()
}

/// Read-only view of the arena from the perspective of one node.
pub struct LayoutView<'a> {
    /// Arena being laid out.
    core: &'a Core,
    /// Node whose widget is being asked.
    node: NodeId,
}

impl<'a> LayoutView<'a> {
    /// Construct a view for a node.
    pub(crate) fn new(core: &'a Core, node: NodeId) -> Self {
        Self { core, node }
    }

    /// The node this view belongs to.
    pub fn id(&self) -> NodeId {
        self.node
    }

    /// The node's children in layout order.
    pub fn children(&self) -> &'a [NodeId] {
        self.core
            .node(self.node)
            .map(|n| n.children())
            .unwrap_or_default()
    }

    /// The node's first child, if any.
    pub fn first_child(&self) -> Option<NodeId> {
        self.children().first().copied()
    }

    /// The node's first child, or [`Error::NoChild`].
    pub fn require_child(&self) -> Result<NodeId> {
        self.first_child().ok_or(Error::NoChild(self.node))
    }

    /// The node's own explicit stretch flag.
    pub fn stretch_flag(&self, axis: Axis) -> bool {
        self.core
            .node(self.node)
            .is_some_and(|n| n.stretch_flag(axis))
    }

    /// Preferred size of another node.
    pub fn preferred_size(&self, node: NodeId, axis: Axis) -> Result<u32> {
        self.core.preferred_size(node, axis)
    }

    /// Minimum size of another node.
    pub fn minimum_size(&self, node: NodeId, axis: Axis) -> Result<u32> {
        self.core.minimum_size(node, axis)
    }

    /// Stretchability of another node.
    pub fn stretchable(&self, node: NodeId, axis: Axis) -> Result<bool> {
        self.core.stretchable(node, axis)
    }

    /// Preferred size of another node along both axes.
    pub fn preferred(&self, node: NodeId) -> Result<Size> {
        Ok(Size::new(
            self.preferred_size(node, Axis::Horizontal)?,
            self.preferred_size(node, Axis::Vertical)?,
        ))
    }
}
