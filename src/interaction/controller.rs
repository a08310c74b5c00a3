use crate::event::{
    Action, AnalogAxis, InputEvent, Key, Modifiers, PointerButton, PointerButtons, Reply,
    TouchAction, TouchGesture,
};
use crate::interaction::policy::{
    DefaultClickPolicy, DefaultPanPolicy, DefaultZoomPolicy, GesturePolicy,
};
use crate::view::{ViewCamera, ViewRect};
use glamx::Vec2;

/// The interaction controller driving the map viewport.
///
/// Owns the smoothed [`ViewCamera`] state and three independent gesture
/// machines (pan, zoom, click), each in Idle or Active. Raw events enter
/// through one dispatch entry point per input channel; the first gesture
/// whose policy recognizes the event consumes it. Gestures latch
/// independently, so a keyboard pan and a wheel zoom can be active at the
/// same time.
///
/// # Example
/// ```
/// use scenemap::prelude::*;
///
/// let mut map = PanZoomController::new();
/// map.tick(Vec2::new(640.0, 360.0), 0.016);
///
/// let reply = map.on_wheel(1.0, Modifiers::empty());
/// assert!(reply.is_handled());
/// assert!(map.is_zooming());
/// ```
pub struct PanZoomController {
    view: ViewCamera,
    widget_size: Vec2,

    panning: bool,
    zooming: bool,
    clicking: bool,

    pan_policy: Box<dyn GesturePolicy>,
    zoom_policy: Box<dyn GesturePolicy>,
    click_policy: Box<dyn GesturePolicy>,
}

impl Default for PanZoomController {
    fn default() -> Self {
        PanZoomController {
            view: ViewCamera::new(),
            widget_size: Vec2::ZERO,
            panning: false,
            zooming: false,
            clicking: false,
            pan_policy: Box::new(DefaultPanPolicy::new()),
            zoom_policy: Box::new(DefaultZoomPolicy::new()),
            click_policy: Box::new(DefaultClickPolicy::new()),
        }
    }
}

impl PanZoomController {
    pub fn new() -> PanZoomController {
        PanZoomController::default()
    }

    /// Records the widget geometry and eases the view toward its targets.
    /// Call once per frame; a zero `dt` leaves the view unchanged.
    pub fn tick(&mut self, widget_size: Vec2, dt: f32) {
        self.widget_size = widget_size;
        self.view.advance(dt);
    }

    // ==================
    // Queries
    // ==================

    /// The smoothed view state.
    #[inline]
    pub fn view(&self) -> &ViewCamera {
        &self.view
    }

    /// The zoom factor applied this frame.
    #[inline]
    pub fn zoom(&self) -> f32 {
        self.view.zoom()
    }

    /// The pan offset applied this frame, in view space.
    #[inline]
    pub fn view_offset(&self) -> Vec2 {
        self.view.offset()
    }

    /// The portion of view space currently visible through the widget.
    pub fn view_rect(&self) -> ViewRect {
        ViewRect::new(Vec2::ZERO, self.widget_size / self.zoom()).offset_by(self.view_offset())
    }

    /// The widget's own rectangle, in widget pixels.
    pub fn widget_rect(&self) -> ViewRect {
        ViewRect::new(Vec2::ZERO, self.widget_size)
    }

    #[inline]
    pub fn view_center(&self) -> Vec2 {
        self.view_rect().center()
    }

    #[inline]
    pub fn widget_center(&self) -> Vec2 {
        self.widget_rect().center()
    }

    /// Converts a view-space position to widget (screen) pixels.
    #[inline]
    pub fn to_screen_position(&self, view_pos: Vec2) -> Vec2 {
        self.view.to_screen_position(view_pos)
    }

    /// Converts a widget (screen) pixel position to view space.
    #[inline]
    pub fn to_view_position(&self, screen_pos: Vec2) -> Vec2 {
        self.view.to_view_position(screen_pos)
    }

    /// Angle, in radians, between the view-center direction and the given
    /// position's direction. Degenerate inputs yield zero.
    pub fn angle_to_view_center(&self, position: Vec2, position_in_view_space: bool) -> f32 {
        let center = self.view_center();
        let position = if position_in_view_space {
            position
        } else {
            self.to_view_position(position)
        };
        let denom = center.length() * position.length();
        if denom <= f32::EPSILON {
            0.0
        } else {
            (center.dot(position) / denom).clamp(-1.0, 1.0).acos()
        }
    }

    #[inline]
    pub fn is_panning(&self) -> bool {
        self.panning
    }

    #[inline]
    pub fn is_zooming(&self) -> bool {
        self.zooming
    }

    #[inline]
    pub fn is_clicking(&self) -> bool {
        self.clicking
    }

    // ==================
    // Mutators
    // ==================

    /// Pans by a screen-space amount; the view covers the same number of
    /// screen pixels regardless of zoom.
    pub fn pan(&mut self, delta: Vec2) {
        self.view.pan_by(delta);
    }

    /// Nudges the zoom target by a signed amount.
    pub fn zoom_by(&mut self, amount: f32) {
        self.view.add_zoom(amount);
    }

    /// Jumps to a zoom level immediately, bypassing smoothing.
    pub fn snap_to_zoom(&mut self, value: f32) {
        self.view.snap_to_zoom(value);
    }

    /// Eases the view until the given view-space position is centered in
    /// the widget.
    pub fn pan_to(&mut self, desired_view_position: Vec2) {
        let view_half_size = 0.5 * self.widget_size / self.zoom();
        self.view
            .set_target_offset(desired_view_position - view_half_size);
    }

    /// Centers the given view-space position immediately, bypassing
    /// smoothing.
    pub fn snap_to_view_position(&mut self, view_position: Vec2) {
        self.pan_to(view_position);
        self.view.snap_offset();
    }

    /// Sets the zoom convergence rate. Higher is snappier.
    pub fn set_zoom_speed(&mut self, rate: f32) {
        self.view.set_zoom_rate(rate);
    }

    /// Sets the pan convergence rate. Higher is snappier.
    pub fn set_pan_speed(&mut self, rate: f32) {
        self.view.set_pan_rate(rate);
    }

    /// Reconfigures the zoom range and discrete snap levels.
    pub fn set_zoom_range(&mut self, min: f32, max: f32, levels: Vec<f32>) {
        self.view.set_zoom_range(min, max, levels);
    }

    /// Replaces the pan gesture policy.
    pub fn set_pan_policy(&mut self, policy: Box<dyn GesturePolicy>) {
        self.pan_policy = policy;
    }

    /// Replaces the zoom gesture policy.
    pub fn set_zoom_policy(&mut self, policy: Box<dyn GesturePolicy>) {
        self.zoom_policy = policy;
    }

    /// Replaces the click gesture policy.
    pub fn set_click_policy(&mut self, policy: Box<dyn GesturePolicy>) {
        self.click_policy = policy;
    }

    // ==================
    // Dispatch entry points, one per raw input channel
    // ==================

    pub fn on_pointer_down(&mut self, button: PointerButton, modifiers: Modifiers) -> Reply {
        self.dispatch(InputEvent::PointerButton(button, Action::Press, modifiers))
    }

    pub fn on_pointer_up(&mut self, button: PointerButton, modifiers: Modifiers) -> Reply {
        self.dispatch(InputEvent::PointerButton(button, Action::Release, modifiers))
    }

    pub fn on_pointer_move(&mut self, position: Vec2, delta: Vec2, held: PointerButtons) -> Reply {
        self.dispatch(InputEvent::PointerMove(position, delta, held))
    }

    pub fn on_wheel(&mut self, delta: f32, modifiers: Modifiers) -> Reply {
        self.dispatch(InputEvent::Wheel(delta, modifiers))
    }

    pub fn on_touch_started(&mut self, pointer: u64, position: Vec2) -> Reply {
        self.dispatch(InputEvent::Touch(
            pointer,
            TouchAction::Start,
            position,
            Vec2::ZERO,
        ))
    }

    pub fn on_touch_moved(&mut self, pointer: u64, position: Vec2, delta: Vec2) -> Reply {
        self.dispatch(InputEvent::Touch(pointer, TouchAction::Move, position, delta))
    }

    pub fn on_touch_ended(&mut self, pointer: u64, position: Vec2) -> Reply {
        self.dispatch(InputEvent::Touch(
            pointer,
            TouchAction::End,
            position,
            Vec2::ZERO,
        ))
    }

    pub fn on_touch_gesture(&mut self, gesture: TouchGesture, delta: Vec2) -> Reply {
        self.dispatch(InputEvent::Gesture(gesture, delta))
    }

    pub fn on_key_down(&mut self, key: Key, modifiers: Modifiers) -> Reply {
        self.dispatch(InputEvent::Key(key, Action::Press, modifiers))
    }

    pub fn on_key_up(&mut self, key: Key, modifiers: Modifiers) -> Reply {
        self.dispatch(InputEvent::Key(key, Action::Release, modifiers))
    }

    pub fn on_analog_changed(&mut self, axis: AnalogAxis, value: f32) -> Reply {
        self.dispatch(InputEvent::Analog(axis, value))
    }

    /// Runs an already-normalized event through the gesture machines.
    ///
    /// Gestures are consulted in pan, zoom, click order; the first one that
    /// reacts consumes the event.
    pub fn dispatch(&mut self, event: InputEvent) -> Reply {
        let PanZoomController {
            view,
            panning,
            zooming,
            clicking,
            pan_policy,
            zoom_policy,
            click_policy,
            ..
        } = self;

        if drive(&**pan_policy, panning, &event, view)
            || drive(&**zoom_policy, zooming, &event, view)
            || drive(&**click_policy, clicking, &event, view)
        {
            Reply::Handled
        } else {
            Reply::Unhandled
        }
    }
}

fn drive(
    policy: &dyn GesturePolicy,
    active: &mut bool,
    event: &InputEvent,
    view: &mut ViewCamera,
) -> bool {
    if policy.is_start(event) {
        *active = true;
        policy.apply(event, view);
        true
    } else if *active && policy.is_continue(event) {
        policy.apply(event, view);
        true
    } else if *active && policy.is_end(event) {
        *active = false;
        true
    } else {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller() -> PanZoomController {
        let mut map = PanZoomController::new();
        map.tick(Vec2::new(200.0, 100.0), 0.0);
        map
    }

    #[test]
    fn wheel_zoom_moves_only_the_zoom_target() {
        let mut map = controller();
        let before_offset = map.view().target_offset();
        let reply = map.on_wheel(1.0, Modifiers::empty());
        assert!(reply.is_handled());
        assert!(map.is_zooming());
        assert_eq!(map.view().target_zoom(), 3.0);
        assert_eq!(map.view().target_offset(), before_offset);
    }

    #[test]
    fn unmapped_key_is_unhandled_and_changes_nothing() {
        let mut map = controller();
        let before = map.view().clone();
        let reply = map.on_key_down(Key::Unknown, Modifiers::empty());
        assert_eq!(reply, Reply::Unhandled);
        assert_eq!(*map.view(), before);
        assert!(!map.is_panning() && !map.is_zooming() && !map.is_clicking());
    }

    #[test]
    fn right_button_drag_pans_scaled_by_zoom() {
        let mut map = controller();
        map.snap_to_zoom(2.0);
        assert!(map
            .on_pointer_down(PointerButton::Button2, Modifiers::empty())
            .is_handled());
        assert!(map.is_panning());

        let reply = map.on_pointer_move(
            Vec2::new(60.0, 40.0),
            Vec2::new(10.0, 4.0),
            PointerButtons::BUTTON_2,
        );
        assert!(reply.is_handled());
        assert_eq!(map.view().target_offset(), Vec2::new(5.0, 2.0));

        assert!(map
            .on_pointer_up(PointerButton::Button2, Modifiers::empty())
            .is_handled());
        assert!(!map.is_panning());
    }

    #[test]
    fn move_without_the_drag_button_is_unhandled() {
        let mut map = controller();
        let reply = map.on_pointer_move(
            Vec2::new(10.0, 10.0),
            Vec2::new(5.0, 5.0),
            PointerButtons::empty(),
        );
        assert_eq!(reply, Reply::Unhandled);
    }

    #[test]
    fn pan_and_zoom_latch_independently() {
        let mut map = controller();
        let _ = map.on_wheel(1.0, Modifiers::empty());
        let _ = map.on_pointer_down(PointerButton::Button2, Modifiers::empty());
        assert!(map.is_zooming() && map.is_panning());

        // Releasing the pan button must not disturb the zoom latch.
        let _ = map.on_pointer_up(PointerButton::Button2, Modifiers::empty());
        assert!(map.is_zooming());
        assert!(!map.is_panning());
    }

    #[test]
    fn discrete_keys_pan_by_unit_steps() {
        let mut map = controller();
        map.snap_to_zoom(1.0);
        let _ = map.on_key_down(Key::Numpad8, Modifiers::empty());
        assert_eq!(map.view().target_offset(), Vec2::new(0.0, -1.0));
        let _ = map.on_key_down(Key::DPadRight, Modifiers::empty());
        assert_eq!(map.view().target_offset(), Vec2::new(1.0, -1.0));
        let _ = map.on_key_up(Key::Numpad8, Modifiers::empty());
        assert!(!map.is_panning());
    }

    #[test]
    fn analog_pan_scales_with_magnitude() {
        let mut map = controller();
        map.snap_to_zoom(1.0);
        let reply = map.on_analog_changed(AnalogAxis::DPadRight, 0.25);
        assert!(reply.is_handled());
        assert_eq!(map.view().target_offset(), Vec2::new(0.25, 0.0));
    }

    #[test]
    fn zoom_keys_step_in_both_directions() {
        let mut map = controller();
        let _ = map.on_key_down(Key::PageUp, Modifiers::empty());
        assert_eq!(map.view().target_zoom(), 3.0);
        let _ = map.on_key_down(Key::RightTrigger, Modifiers::empty());
        assert_eq!(map.view().target_zoom(), 2.0);
        let _ = map.on_key_up(Key::PageUp, Modifiers::empty());
        assert!(!map.is_zooming());
    }

    #[test]
    fn click_latches_without_touching_the_view() {
        let mut map = controller();
        let before = map.view().clone();
        let _ = map.on_pointer_down(PointerButton::Button1, Modifiers::empty());
        assert!(map.is_clicking());
        assert_eq!(*map.view(), before);
        let _ = map.on_pointer_up(PointerButton::Button1, Modifiers::empty());
        assert!(!map.is_clicking());
    }

    #[test]
    fn touch_scroll_gesture_pans_and_touch_end_releases() {
        let mut map = controller();
        map.snap_to_zoom(1.0);
        let _ = map.on_touch_gesture(TouchGesture::Scroll, Vec2::new(8.0, -2.0));
        assert!(map.is_panning());
        assert_eq!(map.view().target_offset(), Vec2::new(8.0, -2.0));
        let _ = map.on_touch_ended(0, Vec2::ZERO);
        assert!(!map.is_panning());
    }

    #[test]
    fn pan_to_centers_the_requested_position() {
        let mut map = controller();
        map.snap_to_zoom(2.0);
        map.pan_to(Vec2::new(50.0, 50.0));
        // Half the widget in view units is (50, 25).
        assert_eq!(map.view().target_offset(), Vec2::new(0.0, 25.0));
    }

    #[test]
    fn snap_to_view_position_arrives_immediately() {
        let mut map = controller();
        map.snap_to_zoom(2.0);
        map.snap_to_view_position(Vec2::new(50.0, 50.0));
        assert_eq!(map.view_offset(), Vec2::new(0.0, 25.0));
        assert_eq!(map.view_center(), Vec2::new(50.0, 50.0));
    }

    #[test]
    fn view_rect_tracks_zoom_and_offset() {
        let mut map = controller();
        map.snap_to_zoom(2.0);
        map.snap_to_view_position(Vec2::new(50.0, 25.0));
        let rect = map.view_rect();
        assert_eq!(rect.size, Vec2::new(100.0, 50.0));
        assert_eq!(rect.center(), Vec2::new(50.0, 25.0));
    }

    #[test]
    fn screen_round_trip_through_the_controller() {
        let mut map = controller();
        map.snap_to_zoom(2.5);
        map.pan(Vec2::new(31.0, -8.0));
        map.tick(Vec2::new(200.0, 100.0), 1.0e6);
        let p = Vec2::new(12.75, 99.5);
        let back = map.to_view_position(map.to_screen_position(p));
        assert!((back - p).length() < 1.0e-4);
    }
}
