use glamx::Vec2;

bitflags! {
    /// Keyboard modifiers held while an event fired.
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct Modifiers: u8 {
        const SHIFT   = 0b0001;
        const CONTROL = 0b0010;
        const ALT     = 0b0100;
        const SUPER   = 0b1000;
    }
}

bitflags! {
    /// Pointer buttons held down while a pointer-move event fired.
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct PointerButtons: u8 {
        const BUTTON_1 = 0b0001;
        const BUTTON_2 = 0b0010;
        const BUTTON_3 = 0b0100;
        const BUTTON_4 = 0b1000;
    }
}

impl PointerButtons {
    /// Whether the given button is part of this held-button set.
    pub fn holds(self, button: PointerButton) -> bool {
        match button {
            PointerButton::Button1 => self.contains(PointerButtons::BUTTON_1),
            PointerButton::Button2 => self.contains(PointerButtons::BUTTON_2),
            PointerButton::Button3 => self.contains(PointerButtons::BUTTON_3),
            PointerButton::Button4 => self.contains(PointerButtons::BUTTON_4),
        }
    }
}

/// State change of a button or key.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Action {
    Press,
    Release,
}

/// A pointer button.
///
/// `Button1` is the primary (left) button, `Button2` the secondary (right)
/// button, and `Button3` the middle button or wheel press.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PointerButton {
    Button1,
    Button2,
    Button3,
    Button4,
}

/// Keys and gamepad buttons the default gesture policies understand.
///
/// Gamepad buttons travel the same key-down/key-up channel as keyboard keys,
/// so they live in the same enum. Anything else maps to `Unknown` and is
/// reported as unhandled.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Key {
    Numpad2,
    Numpad4,
    Numpad6,
    Numpad8,
    PageUp,
    PageDown,
    DPadUp,
    DPadDown,
    DPadLeft,
    DPadRight,
    LeftTrigger,
    RightTrigger,
    FaceButtonBottom,
    Unknown,
}

/// Analog input sources reported through the analog-changed channel.
///
/// D-pad directions are separate half-axes carrying a magnitude in `[0, 1]`,
/// as are the two vertical half-axes of the right stick.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AnalogAxis {
    DPadUp,
    DPadDown,
    DPadLeft,
    DPadRight,
    RightStickUp,
    RightStickDown,
    Unknown,
}

/// Phase of a touch contact.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TouchAction {
    Start,
    Move,
    End,
    Cancel,
}

/// Platform-recognized multi-finger gestures.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TouchGesture {
    /// Two-finger scroll.
    Scroll,
    /// Pinch / magnify.
    Magnify,
}

/// A raw input event, normalized from whatever windowing or engine layer
/// hosts the map widget.
///
/// Positions and deltas are in widget pixels with the origin at the top-left
/// corner. The controller never polls device state; everything it needs is
/// carried on the event itself (notably the held-button set on
/// [`PointerMove`](InputEvent::PointerMove)).
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InputEvent {
    /// A pointer button was pressed or released.
    PointerButton(PointerButton, Action, Modifiers),
    /// The pointer moved: position, delta since the last move, held buttons.
    PointerMove(Vec2, Vec2, PointerButtons),
    /// The wheel turned; positive is away from the user.
    Wheel(f32, Modifiers),
    /// A touch contact changed: contact index, phase, position, delta.
    Touch(u64, TouchAction, Vec2, Vec2),
    /// A platform gesture fired with the given 2D delta.
    Gesture(TouchGesture, Vec2),
    /// A key or gamepad button was pressed or released.
    Key(Key, Action, Modifiers),
    /// An analog source changed, with its current magnitude.
    Analog(AnalogAxis, f32),
}

/// Whether a dispatch entry point consumed the event it was given.
///
/// An event matching no gesture is `Unhandled`; that is an expected outcome,
/// not an error, and produces no state change.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[must_use]
pub enum Reply {
    Handled,
    Unhandled,
}

impl Reply {
    #[inline]
    pub fn is_handled(self) -> bool {
        self == Reply::Handled
    }
}
