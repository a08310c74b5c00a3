//! Default visual parameters for map widgets.

use glamx::Vec2;

/// Process-wide default visuals for a map widget.
///
/// Constructed once at startup and passed by reference into whatever needs
/// default sizes; there is no global instance.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapStyle {
    /// Size of the map background image, in pixels. Doubles as the widget's
    /// desired size when the embedder gives no other constraint.
    pub background_size: Vec2,
    /// Default icon size, in pixels.
    pub icon_size: Vec2,
}

impl Default for MapStyle {
    fn default() -> Self {
        MapStyle {
            background_size: Vec2::new(640.0, 360.0),
            icon_size: Vec2::new(64.0, 64.0),
        }
    }
}

impl MapStyle {
    pub fn new() -> MapStyle {
        MapStyle::default()
    }
}
