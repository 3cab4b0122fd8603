use super::WheelState;
use detent::Transition;
use gtk::prelude::*;
use gtk4 as gtk;
use std::cell::RefCell;
use std::rc::Rc;

/// Repaints after a rotation change, driving eased transitions from the
/// widget's frame clock.
pub fn present(area: &gtk::DrawingArea, state: &Rc<RefCell<WheelState>>, transition: Transition) {
    match transition {
        Transition::None => {}
        Transition::Instant => area.queue_draw(),
        Transition::Eased => start_animation(area, state),
    }
}

fn start_animation(area: &gtk::DrawingArea, state: &Rc<RefCell<WheelState>>) {
    if !state.borrow_mut().claim_frame_clock() {
        return;
    }
    let state = state.clone();
    area.add_tick_callback(move |area, clock| {
        let running = state.borrow_mut().tick(clock.frame_time());
        area.queue_draw();
        if running {
            glib::ControlFlow::Continue
        } else {
            glib::ControlFlow::Break
        }
    });
}
