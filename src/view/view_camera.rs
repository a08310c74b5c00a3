use crate::view::smoothed::Smoothed;
use glamx::Vec2;
use log::warn;

/// Hard floor for the zoom range; keeps every division by the zoom finite.
pub const MIN_ZOOM: f32 = 1.0e-5;

/// Smoothed zoom and pan state of the map viewport.
///
/// Both values carry a current/target pair: gestures move the targets, and
/// [`advance`](ViewCamera::advance) eases the current values toward them once
/// per frame. The zoom eases toward the *resolved* target (the raw target
/// snapped up to the next configured zoom level), so continuous wheel input
/// still settles on one of a small set of magnifications.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ViewCamera {
    zoom: Smoothed<f32>,
    offset: Smoothed<Vec2>,
    zoom_min: f32,
    zoom_max: f32,
    zoom_levels: Vec<f32>,
}

impl Default for ViewCamera {
    fn default() -> Self {
        ViewCamera {
            zoom: Smoothed::new(2.0, 0.5),
            offset: Smoothed::new(Vec2::ZERO, 0.333),
            zoom_min: 0.5,
            zoom_max: 5.0,
            zoom_levels: vec![1.0, 1.5, 2.0, 2.5, 3.0, 3.5, 4.0, 4.5],
        }
    }
}

impl ViewCamera {
    pub fn new() -> ViewCamera {
        ViewCamera::default()
    }

    /// The zoom factor applied to the view this frame.
    #[inline]
    pub fn zoom(&self) -> f32 {
        self.zoom.current
    }

    /// The zoom the view is easing toward, before snap resolution.
    #[inline]
    pub fn target_zoom(&self) -> f32 {
        self.zoom.target
    }

    /// The pan offset applied to the view this frame, in view space.
    #[inline]
    pub fn offset(&self) -> Vec2 {
        self.offset.current
    }

    /// The pan offset the view is easing toward.
    #[inline]
    pub fn target_offset(&self) -> Vec2 {
        self.offset.target
    }

    #[inline]
    pub fn zoom_range(&self) -> (f32, f32) {
        (self.zoom_min, self.zoom_max)
    }

    /// The discrete zoom level the current target resolves to.
    ///
    /// The minimum if the target sits at or below it, else the first
    /// configured level at or above the target, else the maximum.
    pub fn resolved_zoom(&self) -> f32 {
        if self.zoom.target <= self.zoom_min {
            return self.zoom_min;
        }
        for &level in &self.zoom_levels {
            if self.zoom.target <= level {
                return level;
            }
        }
        self.zoom_max
    }

    /// Eases zoom and pan toward their targets. Call once per frame.
    pub fn advance(&mut self, dt: f32) {
        let resolved = self.resolved_zoom();
        self.zoom.advance_toward(resolved, dt);
        self.zoom.current = self.zoom.current.clamp(self.zoom_min, self.zoom_max);
        self.offset.advance(dt);
    }

    /// Nudges the zoom target by `amount`, clamped to the configured range.
    pub fn add_zoom(&mut self, amount: f32) {
        self.zoom.target = (self.zoom.target + amount).clamp(self.zoom_min, self.zoom_max);
    }

    /// Sets the zoom target, clamped to the configured range.
    pub fn set_zoom(&mut self, value: f32) {
        self.zoom.target = value.clamp(self.zoom_min, self.zoom_max);
    }

    /// Sets the zoom target and reaches its resolved level immediately.
    pub fn snap_to_zoom(&mut self, value: f32) {
        self.set_zoom(value);
        self.zoom.current = self.resolved_zoom();
    }

    /// Moves the pan target by a screen-space amount.
    ///
    /// The amount is divided by the current zoom so panning covers the same
    /// number of screen pixels regardless of magnification.
    pub fn pan_by(&mut self, amount: Vec2) {
        self.offset.target += amount / self.zoom();
    }

    /// Sets the pan target directly, in view space.
    pub fn set_target_offset(&mut self, offset: Vec2) {
        self.offset.target = offset;
    }

    /// Forces the pan offset to its target immediately.
    pub fn snap_offset(&mut self) {
        self.offset.snap();
    }

    /// Sets the zoom convergence rate. Higher is snappier.
    pub fn set_zoom_rate(&mut self, rate: f32) {
        self.zoom.rate = rate;
    }

    /// Sets the pan convergence rate. Higher is snappier.
    pub fn set_pan_rate(&mut self, rate: f32) {
        self.offset.rate = rate;
    }

    /// Reconfigures the zoom range and the discrete snap levels.
    ///
    /// The minimum is floored at [`MIN_ZOOM`]; an inverted range is
    /// normalized. Levels are expected in ascending order.
    pub fn set_zoom_range(&mut self, min: f32, max: f32, levels: Vec<f32>) {
        if min < MIN_ZOOM || max < min {
            warn!("normalized degenerate zoom range [{}, {}]", min, max);
        }
        let min = min.max(MIN_ZOOM);
        let max = max.max(min);
        self.zoom_min = min;
        self.zoom_max = max;
        self.zoom_levels = levels;
        self.zoom.target = self.zoom.target.clamp(min, max);
    }

    /// Converts a view-space position to widget (screen) pixels.
    #[inline]
    pub fn to_screen_position(&self, view_pos: Vec2) -> Vec2 {
        (view_pos - self.offset()) * self.zoom()
    }

    /// Converts a widget (screen) pixel position to view space.
    #[inline]
    pub fn to_view_position(&self, screen_pos: Vec2) -> Vec2 {
        screen_pos / self.zoom() + self.offset()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zoom_resolution_snaps_to_levels() {
        let mut cam = ViewCamera::new();
        cam.set_zoom_range(0.5, 5.0, vec![1.0, 2.0, 3.0]);
        cam.set_zoom(0.3);
        assert_eq!(cam.resolved_zoom(), 0.5);
        cam.set_zoom(1.5);
        assert_eq!(cam.resolved_zoom(), 2.0);
        cam.set_zoom(4.5);
        assert_eq!(cam.resolved_zoom(), 5.0);
    }

    #[test]
    fn zoom_advance_is_monotonic_and_bounded() {
        let mut cam = ViewCamera::new();
        cam.set_zoom(5.0);
        let resolved = cam.resolved_zoom();
        let mut prev = cam.zoom();
        for _ in 0..200 {
            cam.advance(0.033);
            assert!(cam.zoom() >= prev);
            assert!(cam.zoom() <= resolved);
            prev = cam.zoom();
        }
    }

    #[test]
    fn smoothing_interpolates_toward_the_resolved_value() {
        let mut cam = ViewCamera::new();
        cam.set_zoom_range(0.5, 5.0, vec![1.0, 2.0, 3.0]);
        cam.snap_to_zoom(1.0);
        // Target 1.2 resolves to 2.0; the current zoom must move past the
        // raw target on its way to the resolved level.
        cam.set_zoom(1.2);
        for _ in 0..2000 {
            cam.advance(0.033);
        }
        assert!((cam.zoom() - 2.0).abs() < 1.0e-3);
    }

    #[test]
    fn snap_to_zoom_reaches_the_resolved_level_in_one_call() {
        let mut cam = ViewCamera::new();
        cam.snap_to_zoom(1.2);
        assert_eq!(cam.zoom(), 1.5);
    }

    #[test]
    fn add_zoom_clamps_to_range() {
        let mut cam = ViewCamera::new();
        cam.add_zoom(100.0);
        assert_eq!(cam.target_zoom(), 5.0);
        cam.add_zoom(-100.0);
        assert_eq!(cam.target_zoom(), 0.5);
    }

    #[test]
    fn pan_amount_scales_inversely_with_zoom() {
        let mut cam = ViewCamera::new();
        cam.snap_to_zoom(2.0);
        cam.pan_by(Vec2::new(10.0, 0.0));
        assert_eq!(cam.target_offset(), Vec2::new(5.0, 0.0));
    }

    #[test]
    fn round_trip_holds_across_random_states() {
        use rand::Rng;
        let mut rng = rand::rng();
        for _ in 0..200 {
            let mut cam = ViewCamera::new();
            cam.snap_to_zoom(rng.random_range(0.5..5.0));
            cam.set_target_offset(Vec2::new(
                rng.random_range(-1000.0..1000.0),
                rng.random_range(-1000.0..1000.0),
            ));
            cam.snap_offset();
            let p = Vec2::new(
                rng.random_range(-500.0..500.0),
                rng.random_range(-500.0..500.0),
            );
            let back = cam.to_view_position(cam.to_screen_position(p));
            assert!((back - p).length() < 1.0e-2);
        }
    }

    #[test]
    fn screen_view_round_trip() {
        let mut cam = ViewCamera::new();
        cam.snap_to_zoom(2.5);
        cam.set_target_offset(Vec2::new(13.0, -4.0));
        cam.snap_offset();
        let p = Vec2::new(101.5, 33.25);
        let there_and_back = cam.to_view_position(cam.to_screen_position(p));
        assert!((there_and_back - p).length() < 1.0e-4);
    }
}
