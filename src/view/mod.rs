//! Smoothed pan/zoom view state and view-space geometry.

pub use self::rect::ViewRect;
pub use self::smoothed::{Interpolate, Smoothed};
pub use self::view_camera::{ViewCamera, MIN_ZOOM};

mod rect;
mod smoothed;
mod view_camera;
