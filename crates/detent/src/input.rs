use crate::angle::Point;
use crate::error::InputError;

/// Device events as the host delivers them, in wheel layout coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum RawInput {
    MouseDown(Point),
    MouseMove(Point),
    MouseUp,
    TouchStart(Vec<Point>),
    TouchMove(Vec<Point>),
    TouchEnd,
    TouchCancel,
}

impl RawInput {
    pub fn is_touch_move(&self) -> bool {
        matches!(self, Self::TouchMove(_))
    }
}

/// Device-independent events consumed by the rotation state machine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WheelEvent {
    PointerDown(Point),
    PointerMove(Point),
    PointerUp,
    Advance,
    Reduce,
}

/// Collapses mouse and touch into a single pointer stream. Touch uses the
/// primary (first) contact only.
pub fn normalize(raw: &RawInput) -> Result<WheelEvent, InputError> {
    match raw {
        RawInput::MouseDown(p) => Ok(WheelEvent::PointerDown(*p)),
        RawInput::MouseMove(p) => Ok(WheelEvent::PointerMove(*p)),
        RawInput::TouchStart(touches) => primary(touches).map(WheelEvent::PointerDown),
        RawInput::TouchMove(touches) => primary(touches).map(WheelEvent::PointerMove),
        RawInput::MouseUp | RawInput::TouchEnd | RawInput::TouchCancel => {
            Ok(WheelEvent::PointerUp)
        }
    }
}

fn primary(touches: &[Point]) -> Result<Point, InputError> {
    touches.first().copied().ok_or(InputError::NoTouchPoints)
}
