//! Device-independent input events consumed by the interaction controller.

pub use self::input_event::{
    Action, AnalogAxis, InputEvent, Key, Modifiers, PointerButton, PointerButtons, Reply,
    TouchAction, TouchGesture,
};

mod input_event;
