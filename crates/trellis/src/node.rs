use trellis_geom::{Axis, Dim, Point, Rect, Size};

use crate::{id::NodeId, widget::Widget};

/// Core node data stored in the arena.
pub struct Node {
    /// Widget behavior and geometry contract.
    pub(crate) widget: Box<dyn Widget>,

    /// Parent in the arena tree.
    pub(crate) parent: Option<NodeId>,
    /// Children in the arena tree, in layout order.
    pub(crate) children: Vec<NodeId>,

    /// Explicit stretch flags set by the application or a parent container.
    pub(crate) stretch: Dim<bool>,
    /// Whether the widget accepts user input.
    pub(crate) enabled: bool,
    /// Whether the widget is currently visible.
    pub(crate) shown: bool,
    /// Whether user actions on this widget end a pending event wait.
    pub(crate) notify: bool,

    /// Position relative to the parent's origin, assigned by the parent.
    pub(crate) position: Point,
    /// Size assigned by the most recent layout pass.
    pub(crate) size: Size,
    /// Number of layout passes that have sized this node.
    pub(crate) layout_passes: u32,
}

impl Node {
    /// Build a detached node around a widget.
    pub(crate) fn new(widget: Box<dyn Widget>) -> Self {
        let notify = widget.notifies();
        Self {
            widget,
            parent: None,
            children: Vec::new(),
            stretch: Dim::splat(false),
            enabled: true,
            shown: true,
            notify,
            position: Point::zero(),
            size: Size::ZERO,
            layout_passes: 0,
        }
    }

    /// Return the node's widget.
    pub fn widget(&self) -> &dyn Widget {
        self.widget.as_ref()
    }

    /// Return the node's parent, if any.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Return the node's children.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Return the explicit stretch flag for an axis.
    pub fn stretch_flag(&self, axis: Axis) -> bool {
        self.stretch[axis]
    }

    /// Return true if the widget accepts input.
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Return true if the widget is visible.
    pub fn shown(&self) -> bool {
        self.shown
    }

    /// Return true if actions on this widget produce events.
    pub fn notify(&self) -> bool {
        self.notify
    }

    /// Return the rectangle relative to the parent's origin.
    pub fn rect(&self) -> Rect {
        Rect::new(self.position, self.size)
    }

    /// Return the number of layout passes that reached this node.
    pub fn layout_passes(&self) -> u32 {
        self.layout_passes
    }
}
