//! Trellis: a backend-agnostic widget toolkit core.
//!
//! Trellis keeps a tree of abstract widgets in an arena, negotiates their
//! geometry into concrete sizes, and runs a stack of modal dialogs with a
//! blocking event loop. Drawing and input are left to a [`backend::Backend`].
//!
//! # Quick Start
//!
//! The main entry points are:
//! - [`Ui`] - The application context: arena, dialog stack and event loop
//! - [`Core`] - The arena and layout engine
//! - [`Widget`] - The trait implemented by all widgets
//!
//! # Module Organization
//!
//! - [`geom`] - Geometry primitives (Size, Rect, Margins, etc.)
//! - [`layout`] - Per-axis size distribution arithmetic
//! - [`widgets`] - The widget kinds the core understands

#![warn(missing_docs)]

/// Error types.
pub mod error;
/// Node identifiers.
mod id;
/// Arena node storage.
mod node;
/// Node arena and layout engine.
mod world;

pub mod backend;
pub mod config;
pub mod dialog;
/// Debug dumps of node trees.
pub mod dump;
pub mod event;
pub mod layout;
pub mod logging;
/// The dialog stack.
mod stack;
pub mod ui;
pub mod widget;
pub mod widgets;

/// Geometry primitives.
pub mod geom {
    pub use trellis_geom::*;
}

pub use dialog::{ColorMode, Dialog, DialogType};
pub use error::{Error, Result};
pub use event::{Event, EventKind, EventReason, EventSender};
pub use id::{NodeId, TypedId};
pub use node::Node;
pub use stack::DialogStack;
pub use ui::{OnFailure, Ui};
pub use widget::{LayoutView, Placement, Widget, WidgetKind};
pub use world::Core;
