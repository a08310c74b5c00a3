/*!
# scenemap

Top-down scene map engine.

This library is the coordinate and interaction core behind a live "map" view
of a 3D scene: a capture camera renders the world from above into a texture,
and **scenemap** supplies everything needed to place overlays on that texture
and to pan, zoom and click around it.

It deliberately renders nothing. The captured image, the widget tree and the
scene graph belong to the embedding engine; scenemap owns the mathematics and
the interaction state between them:

* project any world position onto the map image, consistently with the
  capture's own orthographic (or perspective) transform;
* ease a virtual 2D camera over the image, with a smoothed zoom that snaps
  to a configurable set of magnification levels and a smoothed pan offset;
* normalize pointers, touch contacts, keys and analog sticks into three
  abstract gestures (pan, zoom, click) through swappable per-gesture
  policies;
* track per-entity icons and resolve their on-map positions, optionally
  pinning them to the edge of the visible rectangle.

Driving a map is a few lines per frame:

```
use scenemap::prelude::*;

let mut capture = SceneCapture::new();
capture.set_render_target(Some(RenderTargetInfo::new(1024, 1024)));

let mut map = PanZoomController::new();
let mut icons = IconLayer::new();
icons.add("player", PlacedIcon::new(Vec2::new(64.0, 64.0), true));

// Each frame: forward input, tick, place.
let _ = map.on_wheel(1.0, Modifiers::empty());
map.tick(Vec2::new(640.0, 360.0), 0.016);
let on_map = icons.place(&"player", Vec3::ZERO, &capture, map.view_rect());
assert!(on_map.is_some());
```

All state is single-threaded and frame-driven; nothing blocks, performs I/O,
or needs locking. Failure is absorbed into defined results: an unbound render
target projects to the zero vector, and input matching no gesture is reported
as unhandled rather than treated as an error.
*/
#[macro_use]
extern crate bitflags;
#[cfg(feature = "serde")]
extern crate serde;

pub use glamx;

pub mod capture;
pub mod event;
pub mod icons;
pub mod interaction;
pub mod style;
pub mod view;

pub mod prelude {
    pub use crate::capture::*;
    pub use crate::event::*;
    pub use crate::icons::*;
    pub use crate::interaction::*;
    pub use crate::style::*;
    pub use crate::view::*;
    pub use glamx::{Quat, Vec2, Vec2Swizzles, Vec3, Vec3Swizzles};
}
