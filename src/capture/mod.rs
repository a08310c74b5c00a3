//! Capture pose and the world-to-map projection mathematics.

pub use self::scene_capture::{
    DepthConvention, Projection, RenderTargetInfo, SceneCapture, WorldPositioned, NEAR_CLIP,
    WORLD_EXTENT,
};

mod scene_capture;
