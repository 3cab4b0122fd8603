//! Window-wide pointer and touch listening for the wheel.
//!
//! Moves and releases are taken from the whole window, not just the drawing
//! area, so a drag that wanders off the wheel still ends on release.

use crate::gui::wheel::{WheelState, motion};
use crate::gui::window::{layout_bounds, surface_to_widget};
use detent::{Bounds, Mount, MountError, Point, RawInput};
use gtk::gdk;
use gtk::prelude::*;
use gtk4 as gtk;
use std::cell::RefCell;
use std::rc::Rc;

const PRIMARY_BUTTON: u32 = 1;

/// The wheel's global listener subscription. Dropping it detaches the
/// controller from the window and unmounts the wheel.
pub struct PointerListeners {
    window: gtk::ApplicationWindow,
    controller: gtk::EventControllerLegacy,
    _mount: Mount,
}

impl PointerListeners {
    pub fn install(
        window: &gtk::ApplicationWindow,
        area: &gtk::DrawingArea,
        state: Rc<RefCell<WheelState>>,
    ) -> Result<Self, MountError> {
        let mount = state.borrow().mount()?;

        let controller = gtk::EventControllerLegacy::new();
        controller.set_propagation_phase(gtk::PropagationPhase::Capture);

        let (window_ref, area_ref) = (window.downgrade(), area.downgrade());
        controller.connect_event(move |_, event| {
            let (Some(window), Some(area)) = (window_ref.upgrade(), area_ref.upgrade()) else {
                return glib::Propagation::Proceed;
            };
            dispatch(&window, &area, &state, event)
        });

        window.add_controller(controller.clone());
        log::debug!("pointer listeners installed");

        Ok(Self {
            window: window.clone(),
            controller,
            _mount: mount,
        })
    }
}

impl Drop for PointerListeners {
    fn drop(&mut self) {
        self.window.remove_controller(&self.controller);
        log::debug!("pointer listeners removed");
    }
}

fn dispatch(
    window: &gtk::ApplicationWindow,
    area: &gtk::DrawingArea,
    state: &Rc<RefCell<WheelState>>,
    event: &gdk::Event,
) -> glib::Propagation {
    let position = event
        .position()
        .and_then(|p| surface_to_widget(window, area, p));
    let Some(raw) = raw_input(event, position) else {
        return glib::Propagation::Proceed;
    };

    let bounds = layout_bounds(area);
    if starts_off_wheel(&raw, bounds) {
        return glib::Propagation::Proceed;
    }

    let update = state.borrow_mut().handle(&raw, bounds);
    motion::present(area, state, update.transition);

    if update.consume && raw.is_touch_move() {
        glib::Propagation::Stop
    } else {
        glib::Propagation::Proceed
    }
}

/// Maps a gdk event onto wheel input. Secondary touch contacts and
/// non-primary buttons are dropped.
fn raw_input(event: &gdk::Event, position: Option<Point>) -> Option<RawInput> {
    if let Some(touch) = event.downcast_ref::<gdk::TouchEvent>()
        && !touch.is_emulating_pointer()
    {
        return None;
    }
    if let Some(button) = event.downcast_ref::<gdk::ButtonEvent>()
        && button.button() != PRIMARY_BUTTON
    {
        return None;
    }

    let contacts = || position.into_iter().collect::<Vec<_>>();
    match event.event_type() {
        gdk::EventType::ButtonPress => position.map(RawInput::MouseDown),
        gdk::EventType::MotionNotify => position.map(RawInput::MouseMove),
        gdk::EventType::ButtonRelease => Some(RawInput::MouseUp),
        gdk::EventType::TouchBegin => Some(RawInput::TouchStart(contacts())),
        gdk::EventType::TouchUpdate => Some(RawInput::TouchMove(contacts())),
        gdk::EventType::TouchEnd => Some(RawInput::TouchEnd),
        gdk::EventType::TouchCancel => Some(RawInput::TouchCancel),
        _ => None,
    }
}

/// A press only starts a drag when it lands on the wheel itself.
fn starts_off_wheel(raw: &RawInput, bounds: Option<Bounds>) -> bool {
    let start = match raw {
        RawInput::MouseDown(p) => Some(*p),
        RawInput::TouchStart(contacts) => contacts.first().copied(),
        _ => None,
    };
    match (start, bounds) {
        (Some(p), Some(b)) => !b.contains(p),
        _ => false,
    }
}
