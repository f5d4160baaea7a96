//! The application context: widget arena, dialog stack and event loop.

use std::{
    sync::{
        Arc, Mutex,
        mpsc::{self, RecvTimeoutError, TryRecvError},
    },
    time::{Duration, Instant},
};

use tracing::{debug, error, warn};
use trellis_geom::Size;

use crate::{
    NodeId, TypedId,
    backend::{
        Backend,
        headless::{CallLog, HeadlessBackend},
    },
    config::Config,
    dialog::{self, ColorMode, Dialog, DialogType, dialog_mut, dialog_ref},
    error::{Error, Result},
    event::{Event, EventKind, EventReason, EventSender},
    stack::DialogStack,
    widgets::Button,
    world::Core,
};

/// What to do when an operation cannot find the dialog it needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OnFailure {
    /// Return an error.
    #[default]
    Error,
    /// Return an empty result instead.
    Quiet,
}

/// The application context.
///
/// `Ui` owns the node arena, the stack of open dialogs and the receiving end
/// of the event channel. Everything runs on the thread that owns the `Ui`;
/// other threads reach it only through an [`EventSender`].
pub struct Ui {
    /// Widget arena.
    core: Core,
    /// Open dialogs.
    stack: DialogStack,
    /// Native toolkit hooks.
    backend: Box<dyn Backend>,
    /// Configuration the context was built with.
    config: Config,
    /// Sending side of the event channel, kept so the channel never closes.
    event_tx: mpsc::Sender<Event>,
    /// Receiving side of the event channel.
    event_rx: mpsc::Receiver<Event>,
}

impl Ui {
    /// Build a context around a backend.
    pub fn new(config: Config, backend: Box<dyn Backend>) -> Self {
        let (event_tx, event_rx) = mpsc::channel();
        Self {
            core: Core::new(),
            stack: DialogStack::new(),
            backend,
            config,
            event_tx,
            event_rx,
        }
    }

    /// Build a context with a [`HeadlessBackend`] sized from the
    /// configuration. Returns the backend's call log alongside.
    pub fn headless(config: Config) -> (Arc<Mutex<CallLog>>, Self) {
        let (log, backend) = HeadlessBackend::create(config.window.clone());
        (log, Self::new(config, Box::new(backend)))
    }

    /// The widget arena.
    pub fn core(&self) -> &Core {
        &self.core
    }

    /// The widget arena, mutably.
    pub fn core_mut(&mut self) -> &mut Core {
        &mut self.core
    }

    /// The dialog stack.
    pub fn stack(&self) -> &DialogStack {
        &self.stack
    }

    /// The configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// A handle for enqueueing events from backends and other threads.
    pub fn event_sender(&self) -> EventSender {
        EventSender::new(self.event_tx.clone())
    }

    /// Create a closed dialog, sized with the backend's window metrics.
    pub fn create_dialog(&mut self, dialog_type: DialogType, color_mode: ColorMode) -> TypedId<Dialog> {
        let dialog = Dialog::new(dialog_type, color_mode).with_metrics(
            self.backend.default_size(),
            self.backend.screen_size(),
            self.backend.decoration_width(),
        );
        self.core.create_detached(dialog)
    }

    /// Open a dialog: lay it out, show it, push it and activate it. Opening
    /// an open dialog does nothing.
    pub fn open(&mut self, dialog: impl Into<NodeId>) -> Result<()> {
        let dialog = dialog.into();
        if dialog_ref(&self.core, dialog)?.is_open() {
            return Ok(());
        }
        if self.core.node(dialog).and_then(|n| n.parent()).is_some() {
            return Err(Error::InvalidOperation(format!(
                "dialog {dialog:?} is not the root of its tree"
            )));
        }

        let size = self.layout(dialog)?;
        self.backend.open_dialog(dialog, size)?;
        dialog_mut(&mut self.core, dialog)?.open = true;
        self.stack.push(dialog);
        debug!(dialog = ?dialog, ?size, depth = self.stack.len(), "opened dialog");
        self.activate(dialog)
    }

    /// Lay a dialog out at its preferred size.
    fn layout(&mut self, dialog: NodeId) -> Result<Size> {
        let size = self.core.preferred(dialog)?;
        let wanted = dialog::wanted_size(&self.core, dialog)?;
        if wanted != size {
            warn!(dialog = ?dialog, ?wanted, ?size, "dialog larger than the screen, clamping");
        }
        self.core.set_size(dialog, size)?;
        Ok(size)
    }

    /// Make a dialog the live one: settle its default button and tell the
    /// backend.
    fn activate(&mut self, dialog: NodeId) -> Result<()> {
        dialog::resolve_default_button(&mut self.core, dialog)?;
        self.backend.activate_dialog(dialog)
    }

    /// Re-run layout after widgets changed.
    pub fn recalc_layout(&mut self, dialog: impl Into<NodeId>) -> Result<()> {
        let dialog = dialog.into();
        dialog_ref(&self.core, dialog)?;
        self.layout(dialog)?;
        Ok(())
    }

    /// Record a size chosen by the user and lay the dialog out at it.
    pub fn resize(&mut self, dialog: impl Into<NodeId>, size: Size) -> Result<()> {
        let dialog = dialog.into();
        dialog_mut(&mut self.core, dialog)?.user_size = Some(size);
        self.core.set_size(dialog, size)
    }

    /// Open a dialog if needed and check that it is the live one.
    fn ensure_topmost(&mut self, dialog: NodeId) -> Result<()> {
        self.open(dialog)?;
        if !self.stack.is_top(dialog) {
            error!(dialog = ?dialog, top = ?self.stack.top(), "dialog is not topmost");
            return Err(Error::NotTopmost(dialog));
        }
        Ok(())
    }

    /// Should an event be handed to the application waiting on `dialog`?
    fn accept(&self, dialog: NodeId, event: &Event) -> bool {
        if event.kind == EventKind::NoEvent {
            return false;
        }
        let Some(widget) = event.widget else {
            return true;
        };
        if !self.core.in_subtree(dialog, widget) {
            debug!(dialog = ?dialog, widget = ?widget, "dropping event from outside the topmost dialog");
            return false;
        }
        match event.kind {
            EventKind::Widget(_) => self.core.node(widget).is_some_and(|n| n.notify()),
            _ => true,
        }
    }

    /// Block until an event arrives for `dialog`, which must be topmost.
    ///
    /// A zero timeout waits forever, as does one too long to express as a
    /// deadline. Otherwise a timeout event is returned once the timeout
    /// passes. A dialog that was never opened is opened first.
    pub fn wait_for_event_in(&mut self, dialog: impl Into<NodeId>, timeout: Duration) -> Result<Event> {
        let dialog = dialog.into();
        self.ensure_topmost(dialog)?;
        let deadline = if timeout.is_zero() {
            None
        } else {
            Instant::now().checked_add(timeout)
        };
        loop {
            let event = match deadline {
                None => self.event_rx.recv()?,
                Some(deadline) => {
                    let left = deadline.saturating_duration_since(Instant::now());
                    match self.event_rx.recv_timeout(left) {
                        Ok(event) => event,
                        Err(RecvTimeoutError::Timeout) => return Ok(Event::timeout()),
                        Err(RecvTimeoutError::Disconnected) => {
                            return Err(Error::RunLoop("event channel closed".into()));
                        }
                    }
                }
            };
            if self.accept(dialog, &event) {
                return Ok(event);
            }
        }
    }

    /// Return a pending event for `dialog`, which must be topmost, without
    /// blocking.
    pub fn poll_event_in(&mut self, dialog: impl Into<NodeId>) -> Result<Option<Event>> {
        let dialog = dialog.into();
        self.ensure_topmost(dialog)?;
        loop {
            match self.event_rx.try_recv() {
                Ok(event) if self.accept(dialog, &event) => return Ok(Some(event)),
                Ok(_) => {}
                Err(TryRecvError::Empty) => return Ok(None),
                Err(TryRecvError::Disconnected) => {
                    return Err(Error::RunLoop("event channel closed".into()));
                }
            }
        }
    }

    /// Block until an event arrives for the topmost dialog.
    pub fn wait_for_event(&mut self, timeout: Duration, on_failure: OnFailure) -> Result<Option<Event>> {
        match self.current_dialog(on_failure)? {
            Some(dialog) => Ok(Some(self.wait_for_event_in(dialog, timeout)?)),
            None => Ok(None),
        }
    }

    /// Return a pending event for the topmost dialog without blocking.
    pub fn poll_event(&mut self, on_failure: OnFailure) -> Result<Option<Event>> {
        match self.current_dialog(on_failure)? {
            Some(dialog) => self.poll_event_in(dialog),
            None => Ok(None),
        }
    }

    /// The topmost dialog.
    pub fn current_dialog(&self, on_failure: OnFailure) -> Result<Option<NodeId>> {
        match (self.stack.top(), on_failure) {
            (Some(dialog), _) => Ok(Some(dialog)),
            (None, OnFailure::Quiet) => Ok(None),
            (None, OnFailure::Error) => Err(Error::NoDialog),
        }
    }

    /// Number of open dialogs.
    pub fn open_dialogs_count(&self) -> usize {
        self.stack.len()
    }

    /// Is `dialog` the topmost dialog?
    pub fn is_topmost(&self, dialog: impl Into<NodeId>) -> bool {
        self.stack.is_top(dialog.into())
    }

    /// Destroy a dialog and its widget tree.
    ///
    /// An open dialog can only be destroyed while it is topmost; otherwise
    /// the stack is left alone and the call fails or returns `false`. A
    /// dialog that was never opened is simply removed. The new topmost
    /// dialog is re-activated.
    pub fn destroy(&mut self, dialog: impl Into<NodeId>, on_failure: OnFailure) -> Result<bool> {
        let dialog = dialog.into();
        if !dialog_ref(&self.core, dialog)?.is_open() {
            self.core.remove_subtree(dialog)?;
            debug!(dialog = ?dialog, "destroyed unopened dialog");
            return Ok(true);
        }
        if !self.stack.is_top(dialog) {
            error!(dialog = ?dialog, top = ?self.stack.top(), "cannot destroy a dialog that is not topmost");
            return match on_failure {
                OnFailure::Error => Err(Error::NotTopmost(dialog)),
                OnFailure::Quiet => Ok(false),
            };
        }

        self.backend.close_dialog(dialog)?;
        self.stack.pop();
        dialog_mut(&mut self.core, dialog)?.open = false;
        self.core.remove_subtree(dialog)?;
        debug!(dialog = ?dialog, depth = self.stack.len(), "destroyed dialog");
        if let Some(top) = self.stack.top() {
            self.activate(top)?;
        }
        Ok(true)
    }

    /// Destroy the topmost dialog. Returns whether any dialogs remain.
    pub fn delete_topmost_dialog(&mut self, on_failure: OnFailure) -> Result<bool> {
        let Some(dialog) = self.current_dialog(on_failure)? else {
            return Ok(false);
        };
        self.destroy(dialog, OnFailure::Error)?;
        Ok(!self.stack.is_empty())
    }

    /// Destroy every open dialog, topmost first.
    pub fn delete_all_dialogs(&mut self) -> Result<()> {
        while let Some(dialog) = self.stack.top() {
            self.destroy(dialog, OnFailure::Error)?;
        }
        Ok(())
    }

    /// Destroy dialogs from the top of the stack down to and including
    /// `dialog`.
    pub fn delete_to(&mut self, dialog: impl Into<NodeId>) -> Result<()> {
        let dialog = dialog.into();
        if !self.stack.contains(dialog) {
            error!(dialog = ?dialog, "dialog is not on the stack");
            return Err(Error::NotOnStack(dialog));
        }
        while let Some(top) = self.stack.top() {
            self.destroy(top, OnFailure::Error)?;
            if top == dialog {
                break;
            }
        }
        Ok(())
    }

    /// Designate a dialog's explicit default button, or clear it.
    pub fn set_default_button(&mut self, dialog: impl Into<NodeId>, button: Option<NodeId>) -> Result<()> {
        let dialog = dialog.into();
        dialog::set_default_button(&mut self.core, dialog, button)?;
        if self.stack.is_top(dialog) {
            dialog::resolve_default_button(&mut self.core, dialog)?;
        }
        Ok(())
    }

    /// The dialog a button belongs to, after checking it is a button.
    fn button_dialog(&self, button: NodeId) -> Result<NodeId> {
        self.core.widget::<Button>(button)?;
        dialog::dialog_of(&self.core, button)
            .map(NodeId::from)
            .ok_or(Error::NotADialog(button))
    }

    /// A button received keyboard focus.
    pub fn getting_focus(&mut self, button: impl Into<NodeId>) -> Result<()> {
        let button = button.into();
        let dialog = self.button_dialog(button)?;
        dialog_mut(&mut self.core, dialog)?.focus_button = Some(button);
        if self.stack.is_top(dialog) {
            dialog::resolve_default_button(&mut self.core, dialog)?;
        }
        Ok(())
    }

    /// A button lost keyboard focus.
    pub fn losing_focus(&mut self, button: impl Into<NodeId>) -> Result<()> {
        let button = button.into();
        let dialog = self.button_dialog(button)?;
        let d = dialog_mut(&mut self.core, dialog)?;
        if d.focus_button == Some(button) {
            d.focus_button = None;
        }
        if self.stack.is_top(dialog) {
            dialog::resolve_default_button(&mut self.core, dialog)?;
        }
        Ok(())
    }

    /// Activate the focused or default button, as the Return key would.
    ///
    /// Posts an activation event and returns `true` if a button that is
    /// enabled and shown as default was found. Only the topmost dialog
    /// takes key presses.
    pub fn activate_default_button(&mut self, dialog: impl Into<NodeId>) -> Result<bool> {
        let dialog = dialog.into();
        dialog_ref(&self.core, dialog)?;
        if !self.stack.is_top(dialog) {
            error!(dialog = ?dialog, top = ?self.stack.top(), "dialog is not topmost");
            return Err(Error::NotTopmost(dialog));
        }
        let candidates = [
            dialog::focus_button(&self.core, dialog)?,
            dialog::default_button(&self.core, dialog)?,
        ];
        for button in candidates.into_iter().flatten() {
            let enabled = self.core.node(button).is_some_and(|n| n.enabled());
            if enabled && self.core.widget::<Button>(button)?.shown_as_default() {
                debug!(dialog = ?dialog, button = ?button, "activating default button");
                self.event_tx.send(Event::widget(button, EventReason::Activated))?;
                return Ok(true);
            }
        }
        warn!(dialog = ?dialog, "no default button, ignoring activation");
        Ok(false)
    }

    /// Ask for a dialog to be closed, as a window manager close would.
    pub fn request_cancel(&mut self, dialog: impl Into<NodeId>) -> Result<()> {
        let dialog = dialog.into();
        dialog_ref(&self.core, dialog)?;
        self.event_tx.send(Event::cancel(Some(dialog)))?;
        Ok(())
    }
}
