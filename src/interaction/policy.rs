use crate::event::{Action, AnalogAxis, InputEvent, Key, PointerButton, TouchAction, TouchGesture};
use crate::view::ViewCamera;
use glamx::Vec2;

/// Classifies raw events into one gesture's lifecycle and applies their
/// magnitude to the view state.
///
/// One policy instance serves one gesture kind (pan, zoom or click). The
/// controller owns the Idle/Active flag and asks the policy three questions
/// per event: does this event start the gesture, continue it while active,
/// or end it while active? Whichever fires first wins, and `apply` runs on
/// start and continue.
///
/// The default policies reproduce the stock bindings; embedders can swap in
/// their own implementation per gesture without touching the controller.
pub trait GesturePolicy {
    /// Whether this event begins (or re-triggers) the gesture.
    fn is_start(&self, event: &InputEvent) -> bool;

    /// Whether this event continues the gesture. Only consulted while the
    /// gesture is active.
    fn is_continue(&self, event: &InputEvent) -> bool;

    /// Whether this event ends the gesture. Only consulted while the
    /// gesture is active.
    fn is_end(&self, event: &InputEvent) -> bool;

    /// Applies the event's magnitude to the view state.
    fn apply(&self, event: &InputEvent, view: &mut ViewCamera);
}

fn is_pan_key(key: Key) -> bool {
    matches!(
        key,
        Key::Numpad2
            | Key::Numpad4
            | Key::Numpad6
            | Key::Numpad8
            | Key::DPadUp
            | Key::DPadDown
            | Key::DPadLeft
            | Key::DPadRight
    )
}

fn is_zoom_key(key: Key) -> bool {
    matches!(
        key,
        Key::PageUp | Key::PageDown | Key::LeftTrigger | Key::RightTrigger
    )
}

fn is_pan_axis(axis: AnalogAxis) -> bool {
    matches!(
        axis,
        AnalogAxis::DPadUp | AnalogAxis::DPadDown | AnalogAxis::DPadLeft | AnalogAxis::DPadRight
    )
}

/// Default pan bindings: secondary-button drag, two-finger scroll, numpad
/// and D-pad keys, D-pad analog axes.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DefaultPanPolicy {
    drag_button: Option<PointerButton>,
}

impl Default for DefaultPanPolicy {
    fn default() -> Self {
        DefaultPanPolicy {
            drag_button: Some(PointerButton::Button2),
        }
    }
}

impl DefaultPanPolicy {
    pub fn new() -> DefaultPanPolicy {
        DefaultPanPolicy::default()
    }

    /// The button used to drag-pan. Use `None` to disable drag panning.
    pub fn rebind_drag_button(&mut self, button: Option<PointerButton>) {
        self.drag_button = button;
    }
}

impl GesturePolicy for DefaultPanPolicy {
    fn is_start(&self, event: &InputEvent) -> bool {
        match *event {
            InputEvent::PointerButton(button, Action::Press, _) => {
                self.drag_button == Some(button)
            }
            InputEvent::Gesture(TouchGesture::Scroll, _) => true,
            InputEvent::Key(key, Action::Press, _) => is_pan_key(key),
            InputEvent::Analog(axis, _) => is_pan_axis(axis),
            _ => false,
        }
    }

    fn is_continue(&self, event: &InputEvent) -> bool {
        match *event {
            InputEvent::PointerMove(_, _, held) => match self.drag_button {
                Some(button) => held.holds(button),
                None => false,
            },
            _ => false,
        }
    }

    fn is_end(&self, event: &InputEvent) -> bool {
        match *event {
            InputEvent::PointerButton(button, Action::Release, _) => {
                self.drag_button == Some(button)
            }
            InputEvent::Touch(_, TouchAction::End, _, _)
            | InputEvent::Touch(_, TouchAction::Cancel, _, _) => true,
            InputEvent::Key(key, Action::Release, _) => is_pan_key(key),
            _ => false,
        }
    }

    fn apply(&self, event: &InputEvent, view: &mut ViewCamera) {
        match *event {
            InputEvent::PointerMove(_, delta, _) => view.pan_by(delta),
            InputEvent::Gesture(TouchGesture::Scroll, delta) => view.pan_by(delta),
            InputEvent::Key(key, Action::Press, _) => {
                let step = match key {
                    Key::Numpad8 | Key::DPadUp => Vec2::new(0.0, -1.0),
                    Key::Numpad2 | Key::DPadDown => Vec2::new(0.0, 1.0),
                    Key::Numpad4 | Key::DPadLeft => Vec2::new(-1.0, 0.0),
                    Key::Numpad6 | Key::DPadRight => Vec2::new(1.0, 0.0),
                    _ => return,
                };
                view.pan_by(step);
            }
            InputEvent::Analog(axis, value) => {
                let step = match axis {
                    AnalogAxis::DPadUp => Vec2::new(0.0, -value),
                    AnalogAxis::DPadDown => Vec2::new(0.0, value),
                    AnalogAxis::DPadLeft => Vec2::new(-value, 0.0),
                    AnalogAxis::DPadRight => Vec2::new(value, 0.0),
                    _ => return,
                };
                view.pan_by(step);
            }
            _ => {}
        }
    }
}

/// Default zoom bindings: wheel, middle-button vertical drag, magnify
/// gesture, PageUp/PageDown and trigger keys, right-stick vertical axes.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DefaultZoomPolicy {
    drag_button: Option<PointerButton>,
    zoom_step: f32,
}

impl Default for DefaultZoomPolicy {
    fn default() -> Self {
        DefaultZoomPolicy {
            drag_button: Some(PointerButton::Button3),
            zoom_step: 1.0,
        }
    }
}

impl DefaultZoomPolicy {
    pub fn new() -> DefaultZoomPolicy {
        DefaultZoomPolicy::default()
    }

    /// The button used to drag-zoom. Use `None` to disable drag zooming.
    pub fn rebind_drag_button(&mut self, button: Option<PointerButton>) {
        self.drag_button = button;
    }

    /// Zoom added per wheel notch or discrete key press. The default is 1.0.
    pub fn set_zoom_step(&mut self, step: f32) {
        self.zoom_step = step;
    }
}

impl GesturePolicy for DefaultZoomPolicy {
    fn is_start(&self, event: &InputEvent) -> bool {
        match *event {
            InputEvent::PointerButton(button, Action::Press, _) => {
                self.drag_button == Some(button)
            }
            InputEvent::Wheel(_, _) => true,
            InputEvent::Gesture(TouchGesture::Magnify, _) => true,
            InputEvent::Key(key, Action::Press, _) => is_zoom_key(key),
            InputEvent::Analog(axis, _) => {
                matches!(axis, AnalogAxis::RightStickUp | AnalogAxis::RightStickDown)
            }
            _ => false,
        }
    }

    fn is_continue(&self, event: &InputEvent) -> bool {
        match *event {
            InputEvent::PointerMove(_, _, held) => match self.drag_button {
                Some(button) => held.holds(button),
                None => false,
            },
            _ => false,
        }
    }

    fn is_end(&self, event: &InputEvent) -> bool {
        match *event {
            InputEvent::PointerButton(button, Action::Release, _) => {
                self.drag_button == Some(button)
            }
            InputEvent::Touch(_, TouchAction::End, _, _)
            | InputEvent::Touch(_, TouchAction::Cancel, _, _) => true,
            InputEvent::Key(key, Action::Release, _) => is_zoom_key(key),
            _ => false,
        }
    }

    fn apply(&self, event: &InputEvent, view: &mut ViewCamera) {
        match *event {
            InputEvent::Wheel(delta, _) => view.add_zoom(delta * self.zoom_step),
            InputEvent::PointerMove(_, delta, _) => view.add_zoom(delta.y),
            InputEvent::Gesture(TouchGesture::Magnify, delta) => view.add_zoom(delta.y),
            InputEvent::Key(key, Action::Press, _) => match key {
                Key::PageUp | Key::LeftTrigger => view.add_zoom(self.zoom_step),
                Key::PageDown | Key::RightTrigger => view.add_zoom(-self.zoom_step),
                _ => {}
            },
            InputEvent::Analog(axis, value) => match axis {
                AnalogAxis::RightStickDown => view.add_zoom(value),
                AnalogAxis::RightStickUp => view.add_zoom(-value),
                _ => {}
            },
            _ => {}
        }
    }
}

/// Default click bindings: primary button, the secondary touch contact, the
/// gamepad's bottom face button.
///
/// A click has no effect on the view state; it only latches the controller's
/// clicking flag for the embedding UI to act on.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DefaultClickPolicy {
    button: Option<PointerButton>,
    touch_pointer: u64,
}

impl Default for DefaultClickPolicy {
    fn default() -> Self {
        DefaultClickPolicy {
            button: Some(PointerButton::Button1),
            touch_pointer: 1,
        }
    }
}

impl DefaultClickPolicy {
    pub fn new() -> DefaultClickPolicy {
        DefaultClickPolicy::default()
    }

    /// The button that clicks. Use `None` to disable pointer clicking.
    pub fn rebind_button(&mut self, button: Option<PointerButton>) {
        self.button = button;
    }
}

impl GesturePolicy for DefaultClickPolicy {
    fn is_start(&self, event: &InputEvent) -> bool {
        match *event {
            InputEvent::PointerButton(button, Action::Press, _) => self.button == Some(button),
            InputEvent::Touch(pointer, TouchAction::Start, _, _) => pointer == self.touch_pointer,
            InputEvent::Key(Key::FaceButtonBottom, Action::Press, _) => true,
            _ => false,
        }
    }

    fn is_continue(&self, event: &InputEvent) -> bool {
        match *event {
            InputEvent::PointerMove(_, _, held) => match self.button {
                Some(button) => held.holds(button),
                None => false,
            },
            _ => false,
        }
    }

    fn is_end(&self, event: &InputEvent) -> bool {
        match *event {
            InputEvent::PointerButton(button, Action::Release, _) => self.button == Some(button),
            InputEvent::Touch(_, TouchAction::End, _, _)
            | InputEvent::Touch(_, TouchAction::Cancel, _, _) => true,
            InputEvent::Key(Key::FaceButtonBottom, Action::Release, _) => true,
            _ => false,
        }
    }

    fn apply(&self, _event: &InputEvent, _view: &mut ViewCamera) {}
}
