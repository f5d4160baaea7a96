//! The contract between the core and a native toolkit.

/// A backend that draws nothing and records what it was asked to do.
pub mod headless;

use std::fmt::Debug;

use trellis_geom::Size;

use crate::{NodeId, error::Result};

/// A native toolkit integration.
///
/// The core calls these hooks at fixed points of a dialog's life. Events
/// travel the other way, through an [`crate::EventSender`].
pub trait Backend: Debug {
    /// Size for main and wizard dialogs that have not been resized.
    fn default_size(&self) -> Size;

    /// Screen size, if known. Dialogs never exceed it.
    fn screen_size(&self) -> Option<Size>;

    /// Width of the window frame drawn around dialog content.
    fn decoration_width(&self) -> u32 {
        0
    }

    /// Show a dialog that was just laid out at `size`.
    fn open_dialog(&mut self, dialog: NodeId, size: Size) -> Result<()>;

    /// Make a dialog the active window.
    fn activate_dialog(&mut self, dialog: NodeId) -> Result<()>;

    /// Tear down a dialog's native window.
    fn close_dialog(&mut self, dialog: NodeId) -> Result<()>;
}
