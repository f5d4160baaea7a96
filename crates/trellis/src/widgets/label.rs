use std::borrow::Cow;

use trellis_geom::{Axis, Size};

use crate::{
    error::Result,
    widget::{LayoutView, Widget},
};

/// A static text label.
///
/// The core does not measure text. The backend supplies the size the text
/// needs when it creates the label, and updates it when the text changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    /// Text shown.
    text: String,
    /// Size the backend measured for the text.
    size: Size,
}

impl Label {
    /// Construct a label with its measured size.
    pub fn new(text: impl Into<String>, size: Size) -> Self {
        Self {
            text: text.into(),
            size,
        }
    }

    /// Current text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the text along with its measured size.
    pub fn set_text(&mut self, text: impl Into<String>, size: Size) {
        self.text = text.into();
        self.size = size;
    }
}

impl Widget for Label {
    fn preferred_size(&self, axis: Axis, _ctx: &LayoutView<'_>) -> Result<u32> {
        Ok(self.size.along(axis))
    }

    fn class(&self) -> Cow<'static, str> {
        Cow::Borrowed("YLabel")
    }
}
