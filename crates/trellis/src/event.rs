//! Events delivered to the application by the event loop.

use std::sync::mpsc;

use crate::{NodeId, error::Result};

/// What a widget reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventReason {
    /// The widget was activated, e.g. a button was pressed.
    Activated,
    /// The widget's value changed.
    ValueChanged,
    /// The widget's selection changed.
    SelectionChanged,
}

/// The kind of an event.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Nothing happened. Never handed to the application.
    NoEvent,
    /// A wait ran out of time.
    Timeout,
    /// A widget with the notify flag reported a user action.
    Widget(EventReason),
    /// The user asked to close the dialog.
    Cancel,
    /// The user asked for debugging output.
    Debug,
    /// An application-defined event.
    User(String),
}

/// An event, optionally tied to the widget that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Event {
    /// What happened.
    pub kind: EventKind,
    /// Originating widget, if any.
    pub widget: Option<NodeId>,
}

impl Event {
    /// A timeout event.
    pub fn timeout() -> Self {
        Self {
            kind: EventKind::Timeout,
            widget: None,
        }
    }

    /// A cancel request, optionally tied to a dialog.
    pub fn cancel(dialog: Option<NodeId>) -> Self {
        Self {
            kind: EventKind::Cancel,
            widget: dialog,
        }
    }

    /// A widget event.
    pub fn widget(node: impl Into<NodeId>, reason: EventReason) -> Self {
        Self {
            kind: EventKind::Widget(reason),
            widget: Some(node.into()),
        }
    }

    /// A debug request.
    pub fn debug() -> Self {
        Self {
            kind: EventKind::Debug,
            widget: None,
        }
    }

    /// An application-defined event.
    pub fn user(name: impl Into<String>, widget: Option<NodeId>) -> Self {
        Self {
            kind: EventKind::User(name.into()),
            widget,
        }
    }

    /// Is this a timeout?
    pub fn is_timeout(&self) -> bool {
        self.kind == EventKind::Timeout
    }
}

/// Cloneable handle used by backends, and other threads, to enqueue events.
#[derive(Debug, Clone)]
pub struct EventSender {
    /// Channel into the event loop.
    tx: mpsc::Sender<Event>,
}

impl EventSender {
    /// Wrap a channel sender.
    pub(crate) fn new(tx: mpsc::Sender<Event>) -> Self {
        Self { tx }
    }

    /// Enqueue an event. Fails once the [`crate::Ui`] is gone.
    pub fn send(&self, event: Event) -> Result<()> {
        self.tx.send(event)?;
        Ok(())
    }
}
