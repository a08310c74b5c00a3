//! Gesture classification and the pan/zoom interaction controller.

pub use self::controller::PanZoomController;
pub use self::policy::{DefaultClickPolicy, DefaultPanPolicy, DefaultZoomPolicy, GesturePolicy};

mod controller;
mod policy;
