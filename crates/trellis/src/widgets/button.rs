use std::borrow::Cow;

use trellis_geom::{Axis, Size};

use crate::{
    error::Result,
    widget::{LayoutView, Widget},
};

/// What a button is for, as far as default button resolution cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ButtonRole {
    /// An ordinary push button.
    #[default]
    Push,
    /// A wizard's back button.
    WizardBack,
    /// A wizard's next button.
    WizardNext,
}

/// A push button.
///
/// Buttons notify by default: activating one ends a pending event wait.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    /// Label text.
    label: String,
    /// Size the backend measured for the button.
    size: Size,
    /// Role in its enclosing composite.
    role: ButtonRole,
    /// Designated as the dialog's default button by the application.
    pub(crate) is_default: bool,
    /// Currently drawn as the default button.
    pub(crate) shown_as_default: bool,
}

impl Button {
    /// Construct a push button.
    pub fn new(label: impl Into<String>, size: Size) -> Self {
        Self {
            label: label.into(),
            size,
            role: ButtonRole::Push,
            is_default: false,
            shown_as_default: false,
        }
    }

    /// Builder: set the role.
    pub fn with_role(mut self, role: ButtonRole) -> Self {
        self.role = role;
        self
    }

    /// Builder: designate this button as its dialog's default button. The
    /// designation takes effect when the dialog is next activated.
    pub fn with_default(mut self) -> Self {
        self.is_default = true;
        self
    }

    /// Label text.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Replace the label along with its measured size.
    pub fn set_label(&mut self, label: impl Into<String>, size: Size) {
        self.label = label.into();
        self.size = size;
    }

    /// Role in the enclosing composite.
    pub fn role(&self) -> ButtonRole {
        self.role
    }

    /// Is this the application's designated default button?
    pub fn is_default(&self) -> bool {
        self.is_default
    }

    /// Is this button currently drawn as the default button?
    pub fn shown_as_default(&self) -> bool {
        self.shown_as_default
    }
}

impl Widget for Button {
    fn preferred_size(&self, axis: Axis, _ctx: &LayoutView<'_>) -> Result<u32> {
        Ok(self.size.along(axis))
    }

    fn notifies(&self) -> bool {
        true
    }

    fn class(&self) -> Cow<'static, str> {
        Cow::Borrowed("YPushButton")
    }
}
