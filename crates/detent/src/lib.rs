pub mod angle;
pub mod controller;
pub mod detent;
pub mod error;
pub mod geometry;
pub mod input;
pub mod macros;
pub mod segment;
pub mod tween;

pub use angle::{Bounds, Point};
pub use controller::{
    DiscRotationController, Mount, RotationMode, RotationState, Transition, Update,
};
pub use detent::Detent;
pub use error::{InputError, MountError, SegmentError};
pub use geometry::{Dimensions, WheelGeometry};
pub use input::{RawInput, WheelEvent};
pub use segment::{Segment, Segments};
pub use tween::Tween;
