//! Drag/snap state machine for the rotating cover.
//!
//! [`update`] is the pure transition function; [`DiscRotationController`]
//! owns one wheel's state and gates it behind a [`Mount`].

use crate::angle::{self, Bounds};
use crate::detent::Detent;
use crate::error::{InputError, MountError};
use crate::input::{self, RawInput, WheelEvent};
use serde::Serialize;
use serde_with::DeserializeFromStr;
use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;
use strum::{Display as StrumDisplay, EnumIter, EnumString};

pub const DEFAULT_TRANSITION: Duration = Duration::from_millis(300);

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    DeserializeFromStr,
    EnumString,
    EnumIter,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum RotationMode {
    /// Every move lands on a detent.
    #[default]
    #[strum(serialize = "discrete", serialize = "d", serialize = "step")]
    Discrete,
    /// Tracks the pointer freely, snaps to the nearest detent on release.
    #[strum(serialize = "continuous", serialize = "c", serialize = "snap")]
    Continuous,
    /// Tracks the pointer freely and stays wherever it is released.
    #[strum(serialize = "free", serialize = "f")]
    Free,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RotationState {
    pub angle_degrees: f64,
    pub is_dragging: bool,
    /// `pointer_angle - angle_degrees` at drag start.
    pub drag_anchor: f64,
}

impl RotationState {
    pub fn at(detent: Detent) -> Self {
        Self {
            angle_degrees: detent.degrees(),
            ..Self::default()
        }
    }

    pub fn position(&self) -> Detent {
        Detent::nearest(self.angle_degrees)
    }
}

/// How the renderer should move to the new angle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Transition {
    /// Nothing visible changed.
    #[default]
    None,
    /// Jump straight to the new angle (drag tracking).
    Instant,
    /// Ease out towards the new angle.
    Eased,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Update {
    pub state: RotationState,
    pub transition: Transition,
    /// The event belonged to an active drag; hosts suppress default gestures.
    pub consume: bool,
}

impl Update {
    fn ignored(state: RotationState) -> Self {
        Self {
            state,
            transition: Transition::None,
            consume: false,
        }
    }

    fn apply(state: RotationState, transition: Transition) -> Self {
        Self {
            state,
            transition,
            consume: state.is_dragging,
        }
    }
}

/// Pure state transition. `bounds` is the wheel's layout box, `None` until
/// the host has laid it out.
pub fn update(
    mode: RotationMode,
    state: RotationState,
    event: WheelEvent,
    bounds: Option<Bounds>,
) -> Update {
    match event {
        WheelEvent::PointerDown(p) => {
            if state.is_dragging {
                return Update::ignored(state);
            }
            let Some(center) = center_of(bounds) else {
                log::debug!("pointer down ignored: {}", InputError::NoLayout);
                return Update::ignored(state);
            };
            let next = RotationState {
                is_dragging: true,
                drag_anchor: angle::pointer_angle(center, p) - state.angle_degrees,
                ..state
            };
            Update {
                state: next,
                transition: Transition::None,
                consume: true,
            }
        }
        WheelEvent::PointerMove(p) => {
            if !state.is_dragging {
                return Update::ignored(state);
            }
            let Some(center) = center_of(bounds) else {
                return Update {
                    consume: true,
                    ..Update::ignored(state)
                };
            };
            let tracked = angle::pointer_angle(center, p) - state.drag_anchor;
            let angle_degrees = match mode {
                RotationMode::Discrete => Detent::nearest(tracked).degrees(),
                RotationMode::Continuous | RotationMode::Free => tracked,
            };
            let transition = if angle_degrees == state.angle_degrees {
                Transition::None
            } else {
                Transition::Instant
            };
            Update {
                state: RotationState {
                    angle_degrees,
                    ..state
                },
                transition,
                consume: true,
            }
        }
        WheelEvent::PointerUp => {
            if !state.is_dragging {
                return Update::ignored(state);
            }
            let released = RotationState {
                is_dragging: false,
                ..state
            };
            match mode {
                RotationMode::Discrete => {
                    let settled = Detent::nearest(state.angle_degrees).degrees();
                    let transition = if settled == state.angle_degrees {
                        Transition::None
                    } else {
                        Transition::Eased
                    };
                    Update::apply(
                        RotationState {
                            angle_degrees: settled,
                            ..released
                        },
                        transition,
                    )
                }
                RotationMode::Continuous => Update::apply(
                    RotationState {
                        angle_degrees: angle::snap(state.angle_degrees),
                        ..released
                    },
                    Transition::Eased,
                ),
                RotationMode::Free => Update::apply(
                    RotationState {
                        angle_degrees: angle::normalize(state.angle_degrees),
                        ..released
                    },
                    Transition::Instant,
                ),
            }
        }
        WheelEvent::Advance => step(state, |d| d.next()),
        WheelEvent::Reduce => step(state, |d| d.prev()),
    }
}

fn step(state: RotationState, f: impl Fn(Detent) -> Detent) -> Update {
    if state.is_dragging {
        return Update::ignored(state);
    }
    let next = RotationState {
        angle_degrees: f(state.position()).degrees(),
        ..state
    };
    Update::apply(next, Transition::Eased)
}

fn center_of(bounds: Option<Bounds>) -> Option<angle::Point> {
    bounds.filter(Bounds::is_laid_out).map(|b| b.center())
}

/// Scoped subscription to global pointer events. Dropping it unmounts the
/// wheel; the controller ignores everything from then on.
#[derive(Debug)]
#[must_use = "dropping a Mount unmounts the wheel"]
pub struct Mount {
    live: Rc<Cell<bool>>,
}

impl Mount {
    pub fn is_live(&self) -> bool {
        self.live.get()
    }
}

impl Drop for Mount {
    fn drop(&mut self) {
        self.live.set(false);
        log::debug!("wheel unmounted");
    }
}

#[derive(Debug)]
pub struct DiscRotationController {
    mode: RotationMode,
    state: RotationState,
    transition: Duration,
    mounted: Rc<Cell<bool>>,
}

impl DiscRotationController {
    pub fn new(mode: RotationMode, initial: Detent) -> Self {
        Self {
            mode,
            state: RotationState::at(initial),
            transition: DEFAULT_TRANSITION,
            mounted: Rc::new(Cell::new(false)),
        }
    }

    pub fn with_transition(mut self, duration: Duration) -> Self {
        self.transition = duration;
        self
    }

    pub fn mount(&self) -> Result<Mount, MountError> {
        if self.mounted.get() {
            return Err(MountError::AlreadyMounted);
        }
        self.mounted.set(true);
        log::debug!("wheel mounted in {} mode", self.mode);
        Ok(Mount {
            live: self.mounted.clone(),
        })
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted.get()
    }

    pub fn mode(&self) -> RotationMode {
        self.mode
    }

    /// Switching mode ends any drag; entering discrete mode lands on a detent.
    pub fn set_mode(&mut self, mode: RotationMode) {
        self.mode = mode;
        self.state.is_dragging = false;
        if mode == RotationMode::Discrete {
            self.state.angle_degrees = self.state.position().degrees();
        }
    }

    pub fn set_transition(&mut self, duration: Duration) {
        self.transition = duration;
    }

    pub fn transition_duration(&self) -> Duration {
        self.transition
    }

    pub fn state(&self) -> RotationState {
        self.state
    }

    pub fn angle(&self) -> f64 {
        self.state.angle_degrees
    }

    pub fn position(&self) -> Detent {
        self.state.position()
    }

    pub fn is_dragging(&self) -> bool {
        self.state.is_dragging && self.is_mounted()
    }

    pub fn handle(&mut self, event: WheelEvent, bounds: Option<Bounds>) -> Update {
        if !self.is_mounted() {
            log::trace!("{:?} ignored: {}", event, InputError::Unmounted);
            self.state.is_dragging = false;
            return Update::ignored(self.state);
        }
        let update = update(self.mode, self.state, event, bounds);
        if update.transition != Transition::None {
            log::trace!(
                "{:?}: {:.1} -> {:.1}",
                event,
                self.state.angle_degrees,
                update.state.angle_degrees
            );
        }
        self.state = update.state;
        update
    }

    /// Moves an active drag onto `angle_degrees` keeping the grab point, so a
    /// drag started mid-animation picks the cover up where it is painted.
    pub fn rebase_drag(&mut self, angle_degrees: f64) {
        if !self.is_dragging() {
            return;
        }
        self.state.drag_anchor += self.state.angle_degrees - angle_degrees;
        self.state.angle_degrees = angle_degrees;
    }

    /// Never fails: malformed input is dropped and reported as ignored.
    pub fn handle_raw(&mut self, raw: &RawInput, bounds: Option<Bounds>) -> Update {
        match input::normalize(raw) {
            Ok(event) => self.handle(event, bounds),
            Err(e) => {
                log::debug!("input ignored: {}", e);
                Update::ignored(self.state)
            }
        }
    }

    pub fn advance(&mut self) -> Update {
        self.handle(WheelEvent::Advance, None)
    }

    pub fn reduce(&mut self) -> Update {
        self.handle(WheelEvent::Reduce, None)
    }
}

impl Default for DiscRotationController {
    fn default() -> Self {
        Self::new(RotationMode::default(), Detent::new(3))
    }
}
