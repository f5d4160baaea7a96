//! Dialogs: the root nodes of widget trees, and default button resolution.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use tracing::{debug, error};
use trellis_geom::{Axis, Margins, Rect, Size};

use crate::{
    NodeId, TypedId,
    error::{Error, Result},
    widget::{LayoutView, Placement, Widget, WidgetKind, downcast_mut, downcast_ref},
    widgets::{Button, ButtonRole, Wizard, WizardDirection},
    world::Core,
};

/// The kind of a dialog, which decides how it is sized when opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DialogType {
    /// A main application window, sized by the backend.
    #[default]
    Main,
    /// A popup, sized to its content.
    Popup,
    /// A wizard window, sized like a main window.
    Wizard,
}

/// Color scheme hint passed to the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Regular colors.
    #[default]
    Normal,
    /// Informational colors.
    Info,
    /// Warning colors.
    Warn,
}

/// A dialog: a single-child container at the root of a widget tree.
///
/// Button references held by the dialog are weak: they are plain node ids,
/// checked against the arena on every use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dialog {
    /// How the dialog is sized.
    dialog_type: DialogType,
    /// Color scheme hint.
    color_mode: ColorMode,
    /// Set by the first layout pass.
    pub(crate) open: bool,
    /// Default button, explicit or taken from a wizard.
    pub(crate) default_button: Option<NodeId>,
    /// Button currently holding keyboard focus.
    pub(crate) focus_button: Option<NodeId>,
    /// Size chosen by the user, if the dialog was resized.
    pub(crate) user_size: Option<Size>,
    /// Backend default window size.
    pub(crate) default_size: Size,
    /// Screen size, if the backend knows it.
    pub(crate) screen: Option<Size>,
    /// Width of the window frame around the content.
    pub(crate) decoration: u32,
}

impl Dialog {
    /// Construct a closed dialog. Window metrics are filled in when the
    /// dialog is created through [`crate::Ui::create_dialog`].
    pub fn new(dialog_type: DialogType, color_mode: ColorMode) -> Self {
        Self {
            dialog_type,
            color_mode,
            open: false,
            default_button: None,
            focus_button: None,
            user_size: None,
            default_size: Size::ZERO,
            screen: None,
            decoration: 0,
        }
    }

    /// Builder: set the window metrics used for sizing.
    pub fn with_metrics(mut self, default_size: Size, screen: Option<Size>, decoration: u32) -> Self {
        self.default_size = default_size;
        self.screen = screen;
        self.decoration = decoration;
        self
    }

    /// Dialog type.
    pub fn dialog_type(&self) -> DialogType {
        self.dialog_type
    }

    /// Color mode.
    pub fn color_mode(&self) -> ColorMode {
        self.color_mode
    }

    /// Has the dialog been laid out and opened?
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Recorded default button. The id may be stale; use
    /// [`default_button`] for a checked lookup.
    pub fn default_button(&self) -> Option<NodeId> {
        self.default_button
    }

    /// Recorded focus button. The id may be stale.
    pub fn focus_button(&self) -> Option<NodeId> {
        self.focus_button
    }

    /// Size chosen by the user, if any.
    pub fn user_size(&self) -> Option<Size> {
        self.user_size
    }

    /// Outer size wanted along an axis before clamping.
    fn wanted(&self, axis: Axis, ctx: &LayoutView<'_>) -> Result<u32> {
        match (self.dialog_type, self.user_size) {
            (DialogType::Main | DialogType::Wizard, Some(size)) => Ok(size.along(axis)),
            (DialogType::Main | DialogType::Wizard, None) => Ok(self.default_size.along(axis)),
            (DialogType::Popup, _) => {
                let content = match ctx.first_child() {
                    Some(child) => ctx.preferred_size(child, axis)?,
                    None => 0,
                };
                Ok(content.saturating_add(self.decoration.saturating_mul(2)))
            }
        }
    }
}

impl Widget for Dialog {
    fn kind(&self) -> WidgetKind {
        WidgetKind::SingleChildContainer
    }

    fn preferred_size(&self, axis: Axis, ctx: &LayoutView<'_>) -> Result<u32> {
        let wanted = self.wanted(axis, ctx)?;
        Ok(match self.screen.map(|s| s.along(axis)) {
            Some(limit) => wanted.min(limit),
            None => wanted,
        })
    }

    fn minimum_size(&self, axis: Axis, ctx: &LayoutView<'_>) -> Result<u32> {
        let content = match ctx.first_child() {
            Some(child) => ctx.minimum_size(child, axis)?,
            None => 0,
        };
        Ok(content.saturating_add(self.decoration.saturating_mul(2)))
    }

    fn stretchable(&self, _axis: Axis, _ctx: &LayoutView<'_>) -> Result<bool> {
        Ok(true)
    }

    fn arrange(&self, size: Size, ctx: &LayoutView<'_>) -> Result<Vec<Placement>> {
        let child = ctx.require_child()?;
        let rect = size
            .rect()
            .inset(Margins::uniform(self.decoration))
            .unwrap_or_else(|_| Rect::new(size.rect().tl, Size::ZERO));
        Ok(vec![Placement { child, rect }])
    }

    fn class(&self) -> Cow<'static, str> {
        Cow::Borrowed("YDialog")
    }
}

/// Return the dialog a node belongs to, if any.
pub fn dialog_of(core: &Core, node: impl Into<NodeId>) -> Option<TypedId<Dialog>> {
    core.find_ancestor::<Dialog>(node)
}

/// Outer size a dialog wants before it is clamped to the screen.
pub(crate) fn wanted_size(core: &Core, dialog: NodeId) -> Result<Size> {
    let d = dialog_ref(core, dialog)?;
    let ctx = LayoutView::new(core, dialog);
    Ok(Size::new(
        d.wanted(Axis::Horizontal, &ctx)?,
        d.wanted(Axis::Vertical, &ctx)?,
    ))
}

/// Borrow a dialog widget, reporting a non-dialog node as such.
pub(crate) fn dialog_ref(core: &Core, dialog: NodeId) -> Result<&Dialog> {
    match core.widget::<Dialog>(dialog) {
        Err(Error::WrongWidget { .. }) => Err(Error::NotADialog(dialog)),
        other => other,
    }
}

/// Mutably borrow a dialog widget, reporting a non-dialog node as such.
pub(crate) fn dialog_mut(core: &mut Core, dialog: NodeId) -> Result<&mut Dialog> {
    match core.widget_mut::<Dialog>(dialog) {
        Err(Error::WrongWidget { .. }) => Err(Error::NotADialog(dialog)),
        other => other,
    }
}

/// Resolve a weak button reference: the node must be alive, be a button and
/// be inside the dialog.
fn live_button(core: &Core, dialog: NodeId, id: Option<NodeId>) -> Option<NodeId> {
    id.filter(|b| core.in_subtree(dialog, *b) && core.widget::<Button>(*b).is_ok())
}

/// Is the node enabled?
fn enabled(core: &Core, id: NodeId) -> bool {
    core.node(id).is_some_and(|n| n.enabled())
}

/// Is the node enabled and shown?
fn usable(core: &Core, id: NodeId) -> bool {
    core.node(id).is_some_and(|n| n.enabled() && n.shown())
}

/// Checked lookup of a dialog's default button.
pub fn default_button(core: &Core, dialog: impl Into<NodeId>) -> Result<Option<NodeId>> {
    let dialog = dialog.into();
    Ok(live_button(core, dialog, dialog_ref(core, dialog)?.default_button))
}

/// Checked lookup of a dialog's focus button.
pub fn focus_button(core: &Core, dialog: impl Into<NodeId>) -> Result<Option<NodeId>> {
    let dialog = dialog.into();
    Ok(live_button(core, dialog, dialog_ref(core, dialog)?.focus_button))
}

/// Pick the wizard's default navigation button.
fn wizard_default(core: &Core, wizard: NodeId) -> Option<NodeId> {
    let direction = core
        .widget::<Wizard>(wizard)
        .map(|w| w.direction())
        .unwrap_or_default();
    let find = |role: ButtonRole| {
        core.subtree_pre_order(wizard).into_iter().find(|id| {
            core.widget::<Button>(*id)
                .is_ok_and(|b| b.role() == role)
        })
    };
    let back = match direction {
        WizardDirection::Backward => find(ButtonRole::WizardBack).filter(|b| usable(core, *b)),
        WizardDirection::Forward => None,
    };
    back.or_else(|| find(ButtonRole::WizardNext).filter(|b| usable(core, *b)))
}

/// Decide which button of a dialog is shown as default, and make it the only
/// button in the arena drawn that way.
///
/// The focused button wins if it is enabled, then the explicit default button
/// if it is enabled, then a wizard navigation button. Returns the chosen
/// button.
pub fn resolve_default_button(core: &mut Core, dialog: impl Into<NodeId>) -> Result<Option<NodeId>> {
    let dialog = dialog.into();
    let d = dialog_ref(core, dialog)?;
    let focus = live_button(core, dialog, d.focus_button);
    let mut explicit = live_button(core, dialog, d.default_button)
        .filter(|b| core.widget::<Button>(*b).is_ok_and(|b| b.role() == ButtonRole::Push));

    let mut wizard = None;
    let mut rejected = Vec::new();
    for id in core.subtree_pre_order(dialog) {
        let Some(node) = core.node(id) else {
            continue;
        };
        if wizard.is_none() && downcast_ref::<Wizard>(node.widget()).is_some() {
            wizard = Some(id);
        }
        let Some(button) = downcast_ref::<Button>(node.widget()) else {
            continue;
        };
        if !button.is_default || button.role() != ButtonRole::Push {
            continue;
        }
        match explicit {
            Some(current) if current != id => {
                error!(current = ?current, rejected = ?id, "too many default buttons, keeping the old one");
                rejected.push(id);
            }
            _ => explicit = Some(id),
        }
    }
    for id in rejected {
        core.widget_mut::<Button>(id)?.is_default = false;
    }

    let fallback = match explicit {
        Some(_) => None,
        None => wizard.and_then(|w| wizard_default(core, w)),
    };
    let chosen = focus
        .filter(|b| enabled(core, *b))
        .or(explicit.filter(|b| enabled(core, *b)))
        .or(fallback);

    let d = dialog_mut(core, dialog)?;
    d.focus_button = focus;
    d.default_button = explicit.or(fallback);

    for node in core.nodes.values_mut() {
        if let Some(button) = downcast_mut::<Button>(node.widget.as_mut()) {
            button.shown_as_default = false;
        }
    }
    if let Some(id) = chosen {
        core.widget_mut::<Button>(id)?.shown_as_default = true;
    }
    debug!(dialog = ?dialog, chosen = ?chosen, "resolved default button");
    Ok(chosen)
}

/// Designate a dialog's explicit default button, or clear it with `None`.
///
/// A default taken from a wizard is replaced silently. If another explicit
/// default is already set, the old one stays, the request is refused and the
/// new button loses its default designation.
pub fn set_default_button(core: &mut Core, dialog: impl Into<NodeId>, button: Option<NodeId>) -> Result<()> {
    let dialog = dialog.into();
    let current = default_button(core, dialog)?;

    let Some(button) = button else {
        if let Some(old) = current {
            core.widget_mut::<Button>(old)?.is_default = false;
        }
        dialog_mut(core, dialog)?.default_button = None;
        return Ok(());
    };

    if !core.in_subtree(dialog, button) {
        return Err(Error::InvalidOperation(format!(
            "button {button:?} is not in dialog {dialog:?}"
        )));
    }
    core.widget::<Button>(button)?;

    if let Some(old) = current.filter(|old| *old != button) {
        if core.widget::<Button>(old)?.role() == ButtonRole::Push {
            error!(current = ?old, rejected = ?button, "too many default buttons");
            core.widget_mut::<Button>(button)?.is_default = false;
            return Err(Error::DuplicateDefaultButton {
                current: old,
                rejected: button,
            });
        }
        core.widget_mut::<Button>(old)?.is_default = false;
    }

    core.widget_mut::<Button>(button)?.is_default = true;
    dialog_mut(core, dialog)?.default_button = Some(button);
    debug!(dialog = ?dialog, button = ?button, "new default button");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::LayoutBox;

    fn button(label: &str) -> Button {
        Button::new(label, Size::new(10, 1))
    }

    fn shown_as_default(core: &Core) -> Vec<NodeId> {
        core.nodes
            .iter()
            .filter(|(_, n)| downcast_ref::<Button>(n.widget()).is_some_and(|b| b.shown_as_default()))
            .map(|(id, _)| id)
            .collect()
    }

    fn dialog_with_box(core: &mut Core) -> Result<(NodeId, NodeId)> {
        let d = core.create_detached(Dialog::new(DialogType::Main, ColorMode::Normal));
        let b = core.add_child(d, LayoutBox::horizontal())?;
        Ok((d.into(), b.into()))
    }

    #[test]
    fn focus_beats_default() -> Result<()> {
        let mut core = Core::new();
        let (d, row) = dialog_with_box(&mut core)?;
        let ok = core.add_child(row, button("OK").with_default())?.id();
        let cancel = core.add_child(row, button("Cancel"))?.id();

        assert_eq!(resolve_default_button(&mut core, d)?, Some(ok));
        assert_eq!(default_button(&core, d)?, Some(ok));

        dialog_mut(&mut core, d)?.focus_button = Some(cancel);
        assert_eq!(resolve_default_button(&mut core, d)?, Some(cancel));
        assert_eq!(shown_as_default(&core), vec![cancel]);

        core.set_enabled(cancel, false)?;
        assert_eq!(resolve_default_button(&mut core, d)?, Some(ok));
        assert_eq!(shown_as_default(&core), vec![ok]);
        Ok(())
    }

    #[test]
    fn duplicate_explicit_default_keeps_first() -> Result<()> {
        let mut core = Core::new();
        let (d, row) = dialog_with_box(&mut core)?;
        let first = core.add_child(row, button("A").with_default())?.id();
        let second = core.add_child(row, button("B").with_default())?.id();
        assert_eq!(resolve_default_button(&mut core, d)?, Some(first));
        assert!(!core.widget::<Button>(second)?.is_default());

        assert_eq!(
            set_default_button(&mut core, d, Some(second)),
            Err(Error::DuplicateDefaultButton {
                current: first,
                rejected: second
            })
        );
        assert_eq!(default_button(&core, d)?, Some(first));

        set_default_button(&mut core, d, None)?;
        set_default_button(&mut core, d, Some(second))?;
        assert_eq!(resolve_default_button(&mut core, d)?, Some(second));
        Ok(())
    }

    #[test]
    fn wizard_fallback_follows_direction() -> Result<()> {
        let mut core = Core::new();
        let d = core.create_detached(Dialog::new(DialogType::Wizard, ColorMode::Normal));
        let w = core.add_child(d, Wizard::new())?;
        let back = core.add_child(w, button("Back").with_role(ButtonRole::WizardBack))?.id();
        let next = core.add_child(w, button("Next").with_role(ButtonRole::WizardNext))?.id();

        assert_eq!(resolve_default_button(&mut core, d)?, Some(next));
        core.widget_mut::<Wizard>(w)?.set_direction(WizardDirection::Backward);
        assert_eq!(resolve_default_button(&mut core, d)?, Some(back));

        core.set_shown(back, false)?;
        assert_eq!(resolve_default_button(&mut core, d)?, Some(next));
        core.set_enabled(next, false)?;
        assert_eq!(resolve_default_button(&mut core, d)?, None);
        assert!(shown_as_default(&core).is_empty());

        // An explicit default replaces a wizard default without complaint.
        core.set_enabled(next, true)?;
        resolve_default_button(&mut core, d)?;
        let own = core.add_child(w, button("Own"))?.id();
        set_default_button(&mut core, d, Some(own))?;
        assert_eq!(resolve_default_button(&mut core, d)?, Some(own));
        Ok(())
    }

    #[test]
    fn stale_references_are_ignored() -> Result<()> {
        let mut core = Core::new();
        let (d, row) = dialog_with_box(&mut core)?;
        let ok = core.add_child(row, button("OK").with_default())?.id();
        resolve_default_button(&mut core, d)?;
        core.remove_subtree(ok)?;
        assert_eq!(default_button(&core, d)?, None);
        assert_eq!(resolve_default_button(&mut core, d)?, None);
        Ok(())
    }

    #[test]
    fn popup_sizes_to_content() -> Result<()> {
        let mut core = Core::new();
        let d = core.create_detached(
            Dialog::new(DialogType::Popup, ColorMode::Info).with_metrics(
                Size::new(800, 600),
                Some(Size::new(50, 50)),
                2,
            ),
        );
        let l = core.add_child(d, button("x"))?;
        assert_eq!(core.preferred(d)?, Size::new(14, 5));
        core.set_size(d, Size::new(14, 5))?;
        assert_eq!(core.rect(l)?, Rect::from_coords(2, 2, 10, 1));

        let main = core.create_detached(
            Dialog::new(DialogType::Main, ColorMode::Normal).with_metrics(
                Size::new(800, 600),
                Some(Size::new(640, 480)),
                0,
            ),
        );
        assert_eq!(core.preferred(main)?, Size::new(640, 480));
        Ok(())
    }

    #[test]
    fn not_a_dialog() -> Result<()> {
        let mut core = Core::new();
        let b = core.create_detached(button("x"));
        assert_eq!(default_button(&core, b), Err(Error::NotADialog(b.into())));
        assert!(dialog_of(&core, b).is_none());
        Ok(())
    }
}
