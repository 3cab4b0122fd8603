pub mod model;
pub mod motion;
pub mod view;

pub use model::WheelState;
pub use view::draw;

pub const WHEEL_SIZE: i32 = 360;
pub const WHEEL_MARGIN: f64 = 4.0; // room for the rim stroke
pub const SEGMENT_STROKE: f64 = 1.0;
pub const RIM_STROKE: f64 = 2.0;
