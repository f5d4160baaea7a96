use std::{io, result::Result as StdResult, sync::mpsc};

use thiserror::Error;

use crate::NodeId;

/// Result type for trellis operations.
pub type Result<T> = StdResult<T, Error>;

/// Core error type.
#[derive(PartialEq, Eq, Error, Debug, Clone)]
pub enum Error {
    /// A container was asked to lay out without a child to lay out.
    #[error("no child in container {0:?}")]
    NoChild(NodeId),
    /// A single-child container already has its child.
    #[error("container {0:?} already has a child")]
    TooManyChildren(NodeId),
    /// A second explicit default button was requested.
    #[error("too many default buttons: {rejected:?} rejected, keeping {current:?}")]
    DuplicateDefaultButton {
        /// The default button that stays in effect.
        current: NodeId,
        /// The button that was refused.
        rejected: NodeId,
    },
    /// The dialog is not the topmost dialog on the stack.
    #[error("dialog {0:?} is not the topmost dialog")]
    NotTopmost(NodeId),
    /// The dialog is not on the stack at all.
    #[error("dialog {0:?} is not on the dialog stack")]
    NotOnStack(NodeId),
    /// An operation needed an open dialog and there is none.
    #[error("no dialog")]
    NoDialog,
    /// The node is not a dialog, or is not inside one.
    #[error("node {0:?} is not a dialog")]
    NotADialog(NodeId),
    /// The node exists but holds a different widget type.
    #[error("node {node:?} is not a {expected}")]
    WrongWidget {
        /// Node that was looked up.
        node: NodeId,
        /// Expected widget type.
        expected: &'static str,
    },
    /// The node handle does not resolve, usually because it was destroyed.
    #[error("node not found: {0:?}")]
    NodeNotFound(NodeId),
    /// The node already has a parent.
    #[error("node {0:?} is already attached")]
    AlreadyAttached(NodeId),
    /// Attaching would make a node its own ancestor.
    #[error("attaching {child:?} under {parent:?} would create a cycle")]
    WouldCreateCycle {
        /// Prospective parent.
        parent: NodeId,
        /// Prospective child.
        child: NodeId,
    },
    /// Invalid operation on an otherwise valid node.
    #[error("invalid operation: {0}")]
    InvalidOperation(String),
    #[error("geometry: {0}")]
    /// Geometry failure.
    Geometry(String),
    #[error("config: {0}")]
    /// Configuration could not be read or parsed.
    Config(String),
    #[error("runloop: {0}")]
    /// The event channel failed.
    RunLoop(String),
    #[error("internal: {0}")]
    /// Internal error.
    Internal(String),
}

impl From<mpsc::RecvError> for Error {
    fn from(e: mpsc::RecvError) -> Self {
        Self::RunLoop(e.to_string())
    }
}

impl<T> From<mpsc::SendError<T>> for Error {
    fn from(e: mpsc::SendError<T>) -> Self {
        Self::RunLoop(e.to_string())
    }
}

impl From<trellis_geom::Error> for Error {
    fn from(e: trellis_geom::Error) -> Self {
        Self::Geometry(e.to_string())
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Self::Internal(e.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Self::Config(e.to_string())
    }
}
