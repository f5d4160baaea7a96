use crate::NodeId;

/// The open dialogs, oldest first. Only the last one receives events.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DialogStack {
    /// Open dialogs in the order they were opened.
    dialogs: Vec<NodeId>,
}

impl DialogStack {
    /// An empty stack.
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a newly opened dialog.
    pub(crate) fn push(&mut self, dialog: NodeId) {
        self.dialogs.push(dialog);
    }

    /// Pop the topmost dialog.
    pub(crate) fn pop(&mut self) -> Option<NodeId> {
        self.dialogs.pop()
    }

    /// The topmost dialog.
    pub fn top(&self) -> Option<NodeId> {
        self.dialogs.last().copied()
    }

    /// Is `dialog` the topmost dialog?
    pub fn is_top(&self, dialog: NodeId) -> bool {
        self.top() == Some(dialog)
    }

    /// Is `dialog` anywhere on the stack?
    pub fn contains(&self, dialog: NodeId) -> bool {
        self.dialogs.contains(&dialog)
    }

    /// Number of open dialogs.
    pub fn len(&self) -> usize {
        self.dialogs.len()
    }

    /// True if no dialog is open.
    pub fn is_empty(&self) -> bool {
        self.dialogs.is_empty()
    }
}
