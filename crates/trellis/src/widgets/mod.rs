//! Widget kinds understood by the core.
//!
//! Concrete toolkit widgets are the business of a backend. The core only needs
//! the geometry contract and a handful of kinds whose structure it inspects:
//! alignment and box containers for layout, buttons and wizards for default
//! button resolution.

/// Single-child alignment and margin container.
mod alignment;
/// Push buttons.
mod button;
/// Text labels.
mod label;
/// Horizontal and vertical box containers.
mod layout_box;
/// Fixed-size spacers.
mod spacing;
/// Wizard composite.
mod wizard;

pub use alignment::Alignment;
pub use button::{Button, ButtonRole};
pub use label::Label;
pub use layout_box::LayoutBox;
pub use spacing::Spacing;
pub use wizard::{Wizard, WizardDirection};
