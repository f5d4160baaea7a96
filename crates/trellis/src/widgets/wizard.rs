use std::borrow::Cow;

use trellis_geom::{Axis, Size};

use crate::{
    error::Result,
    widget::{LayoutView, Placement, Widget, WidgetKind},
    widgets::LayoutBox,
};

/// The direction a wizard is being navigated in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WizardDirection {
    /// Towards the last page. The next button is the default.
    #[default]
    Forward,
    /// Towards the first page. The back button is the default.
    Backward,
}

/// A wizard composite: content followed by navigation buttons, stacked
/// vertically.
///
/// The back and next buttons are ordinary [`crate::widgets::Button`]s
/// anywhere in the wizard's subtree with the matching
/// [`crate::widgets::ButtonRole`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Wizard {
    /// Current navigation direction.
    direction: WizardDirection,
}

impl Wizard {
    /// Construct a wizard navigating forward.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current navigation direction.
    pub fn direction(&self) -> WizardDirection {
        self.direction
    }

    /// Change the navigation direction.
    pub fn set_direction(&mut self, direction: WizardDirection) {
        self.direction = direction;
    }
}

impl Widget for Wizard {
    fn kind(&self) -> WidgetKind {
        WidgetKind::Container
    }

    fn preferred_size(&self, axis: Axis, ctx: &LayoutView<'_>) -> Result<u32> {
        LayoutBox::vertical().preferred_size(axis, ctx)
    }

    fn minimum_size(&self, axis: Axis, ctx: &LayoutView<'_>) -> Result<u32> {
        LayoutBox::vertical().minimum_size(axis, ctx)
    }

    fn stretchable(&self, _axis: Axis, _ctx: &LayoutView<'_>) -> Result<bool> {
        Ok(true)
    }

    fn arrange(&self, size: Size, ctx: &LayoutView<'_>) -> Result<Vec<Placement>> {
        LayoutBox::vertical().arrange(size, ctx)
    }

    fn class(&self) -> Cow<'static, str> {
        Cow::Borrowed("YWizard")
    }
}
