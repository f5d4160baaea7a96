use std::sync::{Arc, Mutex};

use trellis_geom::Size;

use super::Backend;
use crate::{NodeId, config::WindowConfig, error::Result};

/// A call made by the core into a backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendCall {
    /// A dialog was shown at a size.
    Open(NodeId, Size),
    /// A dialog was activated.
    Activate(NodeId),
    /// A dialog was closed.
    Close(NodeId),
}

/// Shared log of backend calls.
#[derive(Debug, Default)]
pub struct CallLog {
    /// Calls in the order they were made.
    pub calls: Vec<BackendCall>,
}

impl CallLog {
    /// Dialogs currently shown, oldest first.
    pub fn open_dialogs(&self) -> Vec<NodeId> {
        let mut out = Vec::new();
        for call in &self.calls {
            match call {
                BackendCall::Open(id, _) => out.push(*id),
                BackendCall::Close(id) => out.retain(|d| d != id),
                BackendCall::Activate(_) => {}
            }
        }
        out
    }

    /// The most recently activated dialog.
    pub fn last_activated(&self) -> Option<NodeId> {
        self.calls.iter().rev().find_map(|c| match c {
            BackendCall::Activate(id) => Some(*id),
            _ => None,
        })
    }
}

/// A backend with no display, sized from configuration.
#[derive(Debug)]
pub struct HeadlessBackend {
    /// Window metrics.
    window: WindowConfig,
    /// Shared call log.
    log: Arc<Mutex<CallLog>>,
}

impl HeadlessBackend {
    /// Create a backend and a handle to the log of calls made into it.
    pub fn create(window: WindowConfig) -> (Arc<Mutex<CallLog>>, Self) {
        let log = Arc::new(Mutex::new(CallLog::default()));
        (
            log.clone(),
            Self {
                window,
                log,
            },
        )
    }

    /// Append a call to the log. A poisoned log is still written to.
    fn record(&self, call: BackendCall) {
        let mut log = match self.log.lock() {
            Ok(log) => log,
            Err(poisoned) => poisoned.into_inner(),
        };
        log.calls.push(call);
    }
}

impl Backend for HeadlessBackend {
    fn default_size(&self) -> Size {
        self.window.default_size()
    }

    fn screen_size(&self) -> Option<Size> {
        self.window.screen_size()
    }

    fn decoration_width(&self) -> u32 {
        self.window.decoration_width
    }

    fn open_dialog(&mut self, dialog: NodeId, size: Size) -> Result<()> {
        self.record(BackendCall::Open(dialog, size));
        Ok(())
    }

    fn activate_dialog(&mut self, dialog: NodeId) -> Result<()> {
        self.record(BackendCall::Activate(dialog));
        Ok(())
    }

    fn close_dialog(&mut self, dialog: NodeId) -> Result<()> {
        self.record(BackendCall::Close(dialog));
        Ok(())
    }
}
