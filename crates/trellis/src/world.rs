use std::any::type_name;

use slotmap::SlotMap;
use tracing::{debug, error};
use trellis_geom::{Axis, Point, Rect, Size};

use crate::{
    dialog::Dialog,
    error::{Error, Result},
    id::{NodeId, TypedId},
    node::Node,
    widget::{LayoutView, Widget, WidgetKind, downcast_mut, downcast_ref},
};

/// Node arena and layout engine.
///
/// Every widget lives in the arena and is addressed by a [`NodeId`]. A node
/// has at most one parent; removing a node removes its whole subtree and
/// invalidates every id inside it.
#[derive(Default)]
pub struct Core {
    /// Node storage arena.
    pub(crate) nodes: SlotMap<NodeId, Node>,
}

impl Core {
    /// Create an empty arena.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return a reference to a node by id.
    pub fn node(&self, node_id: impl Into<NodeId>) -> Option<&Node> {
        self.nodes.get(node_id.into())
    }

    /// Return a node or [`Error::NodeNotFound`].
    pub(crate) fn get(&self, node_id: NodeId) -> Result<&Node> {
        self.nodes.get(node_id).ok_or(Error::NodeNotFound(node_id))
    }

    /// Return a mutable node or [`Error::NodeNotFound`].
    pub(crate) fn get_mut(&mut self, node_id: NodeId) -> Result<&mut Node> {
        self.nodes
            .get_mut(node_id)
            .ok_or(Error::NodeNotFound(node_id))
    }

    /// Does the id still resolve to a live node?
    pub fn contains(&self, node_id: impl Into<NodeId>) -> bool {
        self.nodes.contains_key(node_id.into())
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True if the arena holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Create a node in the arena detached from any tree.
    pub fn create_detached<W>(&mut self, widget: W) -> TypedId<W>
    where
        W: Widget + 'static,
    {
        TypedId::new(self.create_detached_boxed(Box::new(widget)))
    }

    /// Create a node from a boxed widget, detached from any tree.
    pub fn create_detached_boxed(&mut self, widget: Box<dyn Widget>) -> NodeId {
        self.nodes.insert(Node::new(widget))
    }

    /// Create a widget as the last child of `parent`.
    pub fn add_child<W>(&mut self, parent: impl Into<NodeId>, widget: W) -> Result<TypedId<W>>
    where
        W: Widget + 'static,
    {
        let parent = parent.into();
        self.check_can_adopt(parent)?;
        let child = self.create_detached(widget);
        self.attach(parent, child)?;
        Ok(child)
    }

    /// Fail unless `parent` can take one more child.
    fn check_can_adopt(&self, parent: NodeId) -> Result<()> {
        let node = self.get(parent)?;
        match node.widget.kind() {
            WidgetKind::Leaf => Err(Error::InvalidOperation(format!(
                "{} {parent:?} cannot hold children",
                node.widget.class()
            ))),
            WidgetKind::SingleChildContainer if !node.children.is_empty() => {
                Err(Error::TooManyChildren(parent))
            }
            _ => Ok(()),
        }
    }

    /// Fail if an open dialog lies in the subtree rooted at `root`. Open
    /// dialogs leave the arena only through the dialog stack.
    fn check_no_open_dialog(&self, root: NodeId) -> Result<()> {
        for id in self.subtree_pre_order(root) {
            if self.widget::<Dialog>(id).is_ok_and(Dialog::is_open) {
                error!(dialog = ?id, "structural change to an open dialog");
                return Err(Error::InvalidOperation(format!(
                    "dialog {id:?} is open and must be destroyed through the dialog stack"
                )));
            }
        }
        Ok(())
    }

    /// Attach a detached node as the last child of `parent`.
    pub fn attach(&mut self, parent: impl Into<NodeId>, child: impl Into<NodeId>) -> Result<()> {
        let parent = parent.into();
        let child = child.into();
        self.check_can_adopt(parent)?;
        self.check_no_open_dialog(child)?;
        if self.get(child)?.parent.is_some() {
            return Err(Error::AlreadyAttached(child));
        }
        if parent == child || self.is_ancestor(child, parent) {
            return Err(Error::WouldCreateCycle { parent, child });
        }

        let promote = self.get(parent)?.widget.child_stretch();
        let node = self.get_mut(child)?;
        node.parent = Some(parent);
        for axis in Axis::ALL {
            if promote[axis] {
                node.stretch[axis] = true;
            }
        }
        self.get_mut(parent)?.children.push(child);
        Ok(())
    }

    /// Detach a node from its parent, keeping its subtree alive.
    pub fn detach(&mut self, child: impl Into<NodeId>) -> Result<()> {
        let child = child.into();
        let Some(parent) = self.get(child)?.parent else {
            return Ok(());
        };
        self.check_no_open_dialog(child)?;
        if let Some(node) = self.nodes.get_mut(parent) {
            node.children.retain(|id| *id != child);
        }
        self.get_mut(child)?.parent = None;
        Ok(())
    }

    /// Remove a node and all descendants from the arena.
    pub fn remove_subtree(&mut self, root_id: impl Into<NodeId>) -> Result<()> {
        let root_id = root_id.into();
        self.check_no_open_dialog(root_id)?;
        self.detach(root_id)?;
        let doomed = self.subtree_post_order(root_id);
        for node_id in &doomed {
            self.nodes.remove(*node_id);
        }
        debug!(root = ?root_id, count = doomed.len(), "removed subtree");
        Ok(())
    }

    /// Is `ancestor` a proper ancestor of `node`?
    pub fn is_ancestor(&self, ancestor: impl Into<NodeId>, node: impl Into<NodeId>) -> bool {
        let ancestor = ancestor.into();
        let mut current = self.nodes.get(node.into()).and_then(|n| n.parent);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.nodes.get(id).and_then(|n| n.parent);
        }
        false
    }

    /// Is `node` equal to `root` or inside its subtree?
    pub fn in_subtree(&self, root: impl Into<NodeId>, node: impl Into<NodeId>) -> bool {
        let root = root.into();
        let node = node.into();
        self.nodes.contains_key(node) && (root == node || self.is_ancestor(root, node))
    }

    /// Return the topmost ancestor of a node, or the node itself.
    pub fn root_of(&self, node: impl Into<NodeId>) -> Result<NodeId> {
        let mut current = node.into();
        while let Some(parent) = self.get(current)?.parent {
            current = parent;
        }
        Ok(current)
    }

    /// Return the nearest node, starting at `node` and walking up, whose
    /// widget is a `W`.
    pub fn find_ancestor<W: Widget>(&self, node: impl Into<NodeId>) -> Option<TypedId<W>> {
        let mut current = Some(node.into());
        while let Some(id) = current {
            let n = self.nodes.get(id)?;
            if downcast_ref::<W>(n.widget.as_ref()).is_some() {
                return Some(TypedId::new(id));
            }
            current = n.parent;
        }
        None
    }

    /// Collect a subtree in pre-order, including the root.
    pub fn subtree_pre_order(&self, root: impl Into<NodeId>) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![root.into()];
        while let Some(node_id) = stack.pop() {
            let Some(node) = self.nodes.get(node_id) else {
                continue;
            };
            out.push(node_id);
            for child in node.children.iter().rev() {
                stack.push(*child);
            }
        }
        out
    }

    /// Collect a subtree in post-order, including the root.
    fn subtree_post_order(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![(root, false)];
        while let Some((node_id, visited)) = stack.pop() {
            let Some(node) = self.nodes.get(node_id) else {
                continue;
            };
            if visited {
                out.push(node_id);
                continue;
            }
            stack.push((node_id, true));
            for child in node.children.iter().rev() {
                stack.push((*child, false));
            }
        }
        out
    }

    /// Borrow a node's widget as a concrete type.
    pub fn widget<W: Widget>(&self, node: impl Into<NodeId>) -> Result<&W> {
        let node = node.into();
        downcast_ref::<W>(self.get(node)?.widget.as_ref()).ok_or(Error::WrongWidget {
            node,
            expected: type_name::<W>(),
        })
    }

    /// Mutably borrow a node's widget as a concrete type.
    pub fn widget_mut<W: Widget>(&mut self, node: impl Into<NodeId>) -> Result<&mut W> {
        let node = node.into();
        downcast_mut::<W>(self.get_mut(node)?.widget.as_mut()).ok_or(Error::WrongWidget {
            node,
            expected: type_name::<W>(),
        })
    }

    /// Set the explicit stretch flag of a node along one axis.
    pub fn set_stretchable(&mut self, node: impl Into<NodeId>, axis: Axis, stretch: bool) -> Result<()> {
        self.get_mut(node.into())?.stretch[axis] = stretch;
        Ok(())
    }

    /// Enable or disable a node for user input.
    pub fn set_enabled(&mut self, node: impl Into<NodeId>, enabled: bool) -> Result<()> {
        self.get_mut(node.into())?.enabled = enabled;
        Ok(())
    }

    /// Show or hide a node.
    pub fn set_shown(&mut self, node: impl Into<NodeId>, shown: bool) -> Result<()> {
        self.get_mut(node.into())?.shown = shown;
        Ok(())
    }

    /// Set whether user actions on a node produce events.
    pub fn set_notify(&mut self, node: impl Into<NodeId>, notify: bool) -> Result<()> {
        self.get_mut(node.into())?.notify = notify;
        Ok(())
    }

    /// Preferred size of a node along an axis.
    pub fn preferred_size(&self, node: impl Into<NodeId>, axis: Axis) -> Result<u32> {
        let node = node.into();
        self.get(node)?
            .widget
            .preferred_size(axis, &LayoutView::new(self, node))
    }

    /// Minimum size of a node along an axis.
    pub fn minimum_size(&self, node: impl Into<NodeId>, axis: Axis) -> Result<u32> {
        let node = node.into();
        self.get(node)?
            .widget
            .minimum_size(axis, &LayoutView::new(self, node))
    }

    /// Whether a node wants to grow along an axis.
    pub fn stretchable(&self, node: impl Into<NodeId>, axis: Axis) -> Result<bool> {
        let node = node.into();
        self.get(node)?
            .widget
            .stretchable(axis, &LayoutView::new(self, node))
    }

    /// Preferred size of a node along both axes.
    pub fn preferred(&self, node: impl Into<NodeId>) -> Result<Size> {
        let node = node.into();
        Ok(Size::new(
            self.preferred_size(node, Axis::Horizontal)?,
            self.preferred_size(node, Axis::Vertical)?,
        ))
    }

    /// Assign a final size to a node and lay out its subtree.
    ///
    /// Containers compute placements for their children, which are then sized
    /// recursively, top-down, once each. A container without children cannot
    /// be sized and yields [`Error::NoChild`].
    pub fn set_size(&mut self, node: impl Into<NodeId>, size: Size) -> Result<()> {
        let node = node.into();
        let placements = {
            let n = self.get(node)?;
            if n.widget.kind().is_container() {
                if n.children.is_empty() {
                    error!(node = ?node, class = %n.widget.class(), "no child to lay out");
                    return Err(Error::NoChild(node));
                }
                n.widget.arrange(size, &LayoutView::new(self, node))?
            } else {
                Vec::new()
            }
        };

        let n = self.get_mut(node)?;
        n.size = size;
        n.layout_passes = n.layout_passes.saturating_add(1);

        for p in placements {
            self.get_mut(p.child)?.position = p.rect.tl;
            self.set_size(p.child, p.rect.size)?;
        }
        Ok(())
    }

    /// Rectangle of a node relative to its parent.
    pub fn rect(&self, node: impl Into<NodeId>) -> Result<Rect> {
        Ok(self.get(node.into())?.rect())
    }

    /// Rectangle of a node relative to the root of its tree.
    pub fn screen_rect(&self, node: impl Into<NodeId>) -> Result<Rect> {
        let node = node.into();
        let n = self.get(node)?;
        let mut origin = n.position;
        let mut current = n.parent;
        while let Some(id) = current {
            let p = self.get(id)?;
            if p.parent.is_some() {
                origin = origin + p.position;
            }
            current = p.parent;
        }
        if n.parent.is_none() {
            origin = Point::zero();
        }
        Ok(Rect::new(origin, n.size))
    }
}
