//! Integration tests for event retrieval and filtering.

#[cfg(test)]
mod tests {
    use std::{
        thread,
        time::{Duration, Instant},
    };

    use trellis::{
        ColorMode, DialogType, Error, Event, EventKind, EventReason, NodeId, OnFailure, Result, Ui,
        config::Config,
        geom::Size,
        widgets::{Button, Label, LayoutBox},
    };

    fn ui() -> Ui {
        Ui::headless(Config::default()).1
    }

    /// A dialog holding a label and a button.
    fn dialog(ui: &mut Ui) -> Result<(NodeId, NodeId, NodeId)> {
        let d = ui.create_dialog(DialogType::Popup, ColorMode::Normal);
        let col = ui.core_mut().add_child(d, LayoutBox::vertical())?;
        let label = ui.core_mut().add_child(col, Label::new("Proceed?", Size::new(8, 1)))?;
        let ok = ui.core_mut().add_child(col, Button::new("OK", Size::new(4, 1)))?;
        Ok((d.into(), label.into(), ok.into()))
    }

    #[test]
    fn wait_returns_event_from_another_thread() -> Result<()> {
        let mut ui = ui();
        let (d, _, ok) = dialog(&mut ui)?;
        let tx = ui.event_sender();
        let handle = thread::spawn(move || {
            thread::sleep(Duration::from_millis(20));
            tx.send(Event::widget(ok, EventReason::Activated))
        });
        let event = ui.wait_for_event_in(d, Duration::ZERO)?;
        assert_eq!(event, Event::widget(ok, EventReason::Activated));
        assert!(ui.is_topmost(d));
        handle
            .join()
            .map_err(|_| Error::Internal("sender thread panicked".into()))??;
        Ok(())
    }

    #[test]
    fn wait_times_out() -> Result<()> {
        let mut ui = ui();
        let (d, _, _) = dialog(&mut ui)?;
        ui.open(d)?;
        let start = Instant::now();
        let event = ui.wait_for_event(Duration::from_millis(30), OnFailure::Error)?;
        assert_eq!(event, Some(Event::timeout()));
        assert!(start.elapsed() >= Duration::from_millis(30));
        Ok(())
    }

    #[test]
    fn empty_stack_wait_is_quiet_on_request() -> Result<()> {
        let mut ui = ui();
        assert_eq!(ui.wait_for_event(Duration::ZERO, OnFailure::Quiet)?, None);
        assert_eq!(
            ui.wait_for_event(Duration::ZERO, OnFailure::Error),
            Err(Error::NoDialog)
        );
        Ok(())
    }

    #[test]
    fn background_dialog_events_are_dropped() -> Result<()> {
        let mut ui = ui();
        let (below, _, below_ok) = dialog(&mut ui)?;
        let (above, _, above_ok) = dialog(&mut ui)?;
        ui.open(below)?;
        ui.open(above)?;

        let tx = ui.event_sender();
        tx.send(Event::widget(below_ok, EventReason::Activated))?;
        tx.send(Event::widget(above_ok, EventReason::Activated))?;
        assert_eq!(
            ui.poll_event(OnFailure::Error)?,
            Some(Event::widget(above_ok, EventReason::Activated))
        );
        assert_eq!(ui.poll_event(OnFailure::Error)?, None);

        assert_eq!(ui.poll_event_in(below), Err(Error::NotTopmost(below)));
        assert_eq!(
            ui.wait_for_event_in(below, Duration::from_millis(1)),
            Err(Error::NotTopmost(below))
        );
        Ok(())
    }

    #[test]
    fn events_from_destroyed_widgets_are_dropped() -> Result<()> {
        let mut ui = ui();
        let (d, label, ok) = dialog(&mut ui)?;
        ui.open(d)?;
        ui.core_mut().remove_subtree(ok)?;
        ui.event_sender()
            .send(Event::widget(ok, EventReason::Activated))?;
        assert_eq!(ui.poll_event_in(d)?, None);

        // Labels do not notify unless asked to.
        let tx = ui.event_sender();
        tx.send(Event::widget(label, EventReason::ValueChanged))?;
        assert_eq!(ui.poll_event_in(d)?, None);
        ui.core_mut().set_notify(label, true)?;
        tx.send(Event::widget(label, EventReason::ValueChanged))?;
        assert_eq!(
            ui.poll_event_in(d)?.map(|e| e.kind),
            Some(EventKind::Widget(EventReason::ValueChanged))
        );
        Ok(())
    }

    #[test]
    fn waiting_opens_the_dialog() -> Result<()> {
        let mut ui = ui();
        let (d, _, _) = dialog(&mut ui)?;
        assert_eq!(ui.open_dialogs_count(), 0);
        assert_eq!(ui.poll_event_in(d)?, None);
        assert_eq!(ui.open_dialogs_count(), 1);
        assert!(ui.core().widget::<trellis::Dialog>(d)?.is_open());
        Ok(())
    }

    #[test]
    fn cancel_and_user_events_pass_through() -> Result<()> {
        let mut ui = ui();
        let (d, _, _) = dialog(&mut ui)?;
        ui.request_cancel(d)?;
        ui.event_sender().send(Event::user("refresh", None))?;
        assert_eq!(ui.poll_event_in(d)?, Some(Event::cancel(Some(d))));
        assert_eq!(
            ui.poll_event_in(d)?.map(|e| e.kind),
            Some(EventKind::User("refresh".into()))
        );
        Ok(())
    }

    #[test]
    fn return_key_activates_default_button() -> Result<()> {
        let mut ui = ui();
        let (d, _, ok) = dialog(&mut ui)?;
        ui.open(d)?;
        assert!(!ui.activate_default_button(d)?);

        ui.set_default_button(d, Some(ok))?;
        assert!(ui.activate_default_button(d)?);
        assert_eq!(
            ui.poll_event_in(d)?,
            Some(Event::widget(ok, EventReason::Activated))
        );

        ui.core_mut().set_enabled(ok, false)?;
        assert!(!ui.activate_default_button(d)?);
        Ok(())
    }
}
