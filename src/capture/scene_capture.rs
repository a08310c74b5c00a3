use glamx::{Mat4, Pose3, Quat, Vec2, Vec3, Vec4, Vec4Swizzles};
use log::warn;

/// Near clip distance of the perspective capture frustum.
pub const NEAR_CLIP: f32 = 10.0;

/// Extent of the addressable world; the orthographic depth range runs to an
/// eighth of this.
pub const WORLD_EXTENT: f32 = 2_097_152.0;

/// Projection kind of the capture.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Projection {
    Orthographic,
    Perspective,
}

/// Depth convention of the rendering backend the capture feeds.
///
/// Overlay placement only reads the projected X/Y, but the projection
/// matrices still carry a depth row; it must match the backend that renders
/// the captured image.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DepthConvention {
    Standard,
    ReversedZ,
}

/// Pixel size of the render target the capture draws into.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RenderTargetInfo {
    pub width: u32,
    pub height: u32,
}

impl RenderTargetInfo {
    pub fn new(width: u32, height: u32) -> RenderTargetInfo {
        RenderTargetInfo { width, height }
    }

    #[inline]
    fn is_degenerate(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Anything that can report a world position, so entities and scene objects
/// can be projected without extracting the position by hand.
pub trait WorldPositioned {
    fn world_position(&self) -> Vec3;
}

/// The virtual camera that produces the map image, and the math that places
/// world positions onto that image.
///
/// The pose and projection parameters mirror the external capture
/// collaborator; [`project_to_map`](SceneCapture::project_to_map) is the
/// single projection formula every variant delegates to. With no render
/// target bound the map is considered inactive and every projection returns
/// the zero vector, so downstream layout code never needs a null check.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SceneCapture {
    position: Vec3,
    rotation: Quat,
    projection: Projection,
    fov_angle_deg: f32,
    ortho_width: f32,
    depth_convention: DepthConvention,
    target: Option<RenderTargetInfo>,
}

impl Default for SceneCapture {
    fn default() -> Self {
        SceneCapture {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            projection: Projection::Orthographic,
            fov_angle_deg: 120.0,
            ortho_width: 512.0,
            depth_convention: DepthConvention::ReversedZ,
            target: None,
        }
    }
}

impl SceneCapture {
    pub fn new() -> SceneCapture {
        SceneCapture::default()
    }

    #[inline]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    #[inline]
    pub fn rotation(&self) -> Quat {
        self.rotation
    }

    pub fn set_pose(&mut self, position: Vec3, rotation: Quat) {
        self.position = position;
        self.rotation = rotation;
    }

    /// Relocates the capture to `world_position`, masked component-wise by
    /// `axis_mask`. The usual mask `(1, 1, 0)` re-centers the map without
    /// disturbing the capture altitude.
    pub fn go_to_world_position(&mut self, world_position: Vec3, axis_mask: Vec3) {
        self.position = world_position * axis_mask;
    }

    #[inline]
    pub fn projection(&self) -> Projection {
        self.projection
    }

    pub fn set_projection(&mut self, projection: Projection) {
        self.projection = projection;
    }

    pub fn set_depth_convention(&mut self, convention: DepthConvention) {
        self.depth_convention = convention;
    }

    #[inline]
    pub fn fov_angle_deg(&self) -> f32 {
        self.fov_angle_deg
    }

    pub fn set_fov_angle_deg(&mut self, angle: f32) {
        self.fov_angle_deg = angle;
    }

    #[inline]
    pub fn ortho_width(&self) -> f32 {
        self.ortho_width
    }

    pub fn set_ortho_width(&mut self, width: f32) {
        self.ortho_width = width;
    }

    #[inline]
    pub fn render_target(&self) -> Option<RenderTargetInfo> {
        self.target
    }

    /// Binds (or unbinds) the render target. A zero-sized target is refused
    /// and treated as no target at all.
    pub fn set_render_target(&mut self, target: Option<RenderTargetInfo>) {
        self.target = match target {
            Some(t) if t.is_degenerate() => {
                warn!(
                    "refusing degenerate {}x{} render target",
                    t.width, t.height
                );
                None
            }
            other => other,
        };
    }

    /// Half the field-of-view angle, in radians.
    #[inline]
    fn half_fov(&self) -> f32 {
        self.fov_angle_deg * std::f32::consts::PI / 360.0
    }

    /// Vertical extent of the captured region.
    ///
    /// The field-of-view angle doubles as the aspect divisor of the
    /// orthographic extents; the external capture component uses the same
    /// formula, and the two must agree for overlays to line up with the
    /// rendered image.
    #[inline]
    pub fn ortho_height(&self) -> f32 {
        self.ortho_width / self.half_fov()
    }

    /// Scale from capture-extent coordinates to render-target pixels, or
    /// `(1, 1)` when no target is bound.
    pub fn view_to_texture_scale(&self) -> Vec2 {
        match self.target {
            Some(t) => {
                Vec2::new(t.width as f32, t.height as f32)
                    / Vec2::new(self.ortho_width, self.ortho_height())
            }
            None => Vec2::new(1.0, 1.0),
        }
    }

    /// The capture's view matrix: the inverse of its world transform,
    /// followed by the fixed basis permutation that sends view-space
    /// `(x, y, z)` to `(y, z, x)`: depth lands on the capture's forward axis
    /// and world elevation on the image's vertical axis.
    pub fn view_matrix(&self) -> Mat4 {
        let mut world = Pose3::from(self.rotation);
        world.translation = self.position;

        let axis_remap = Mat4::from_cols(
            Vec4::new(0.0, 0.0, 1.0, 0.0),
            Vec4::new(1.0, 0.0, 0.0, 0.0),
            Vec4::new(0.0, 1.0, 0.0, 0.0),
            Vec4::new(0.0, 0.0, 0.0, 1.0),
        );
        axis_remap * world.inverse().to_mat4()
    }

    /// The capture's projection matrix under the configured depth convention.
    pub fn projection_matrix(&self) -> Mat4 {
        // The aspect multipliers come from the capture extents, not the
        // render-target pixels; pixel aspect enters through the texture
        // scale instead.
        let capture_size = Vec2::new(self.ortho_width, self.ortho_height());
        let (x_mult, y_mult) = if capture_size.x > capture_size.y {
            (1.0, capture_size.x / capture_size.y)
        } else {
            (capture_size.y / capture_size.x, 1.0)
        };

        match self.projection {
            Projection::Orthographic => {
                let half_width = self.ortho_width / 2.0;
                let half_height = self.ortho_width / 2.0 * y_mult;
                let z_scale = 1.0 / (WORLD_EXTENT / 8.0);
                ortho_matrix(half_width, half_height, z_scale, self.depth_convention)
            }
            Projection::Perspective => perspective_matrix(
                self.half_fov(),
                x_mult,
                y_mult,
                NEAR_CLIP,
                self.depth_convention,
            ),
        }
    }

    /// The combined world-to-clip transform.
    #[inline]
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Projects a world position into map-texture pixel coordinates.
    ///
    /// The X/Y of the result are pixels on the map image; the Z component is
    /// the world elevation, passed through unscaled so 3D-aware callers can
    /// recover relative height. Returns the zero vector when no render
    /// target is bound or the position is behind the capture plane.
    pub fn project_to_map(&self, world_position: Vec3) -> Vec3 {
        if self.target.is_none() {
            return Vec3::ZERO;
        }

        let clip = self.view_projection_matrix() * world_position.extend(1.0);
        if clip.w <= 0.0 {
            return Vec3::ZERO;
        }

        let ndc = clip.xyz() / clip.w;
        let normalized = Vec2::new(ndc.x / 2.0 + 0.5, 0.5 - ndc.y / 2.0);
        let capture_space = normalized * Vec2::new(self.ortho_width, self.ortho_height());
        let pixels = capture_space * self.view_to_texture_scale();

        let result = Vec3::new(pixels.x, pixels.y, world_position.z);
        if result.is_finite() {
            result
        } else {
            Vec3::ZERO
        }
    }

    /// Projects a world position into map-texture pixels, dropping elevation.
    #[inline]
    pub fn project_to_map_2d(&self, world_position: Vec3) -> Vec2 {
        let projected = self.project_to_map(world_position);
        Vec2::new(projected.x, projected.y)
    }

    /// Projects a positioned object into map-texture pixel coordinates.
    #[inline]
    pub fn project_positioned(&self, object: &impl WorldPositioned) -> Vec3 {
        self.project_to_map(object.world_position())
    }

    /// Projects a positioned object into map-texture pixels, dropping
    /// elevation.
    #[inline]
    pub fn project_positioned_2d(&self, object: &impl WorldPositioned) -> Vec2 {
        self.project_to_map_2d(object.world_position())
    }
}

fn ortho_matrix(
    half_width: f32,
    half_height: f32,
    z_scale: f32,
    convention: DepthConvention,
) -> Mat4 {
    let (zz, zw) = match convention {
        DepthConvention::ReversedZ => (-z_scale, 1.0),
        DepthConvention::Standard => (z_scale, 0.0),
    };
    Mat4::from_cols(
        Vec4::new(1.0 / half_width, 0.0, 0.0, 0.0),
        Vec4::new(0.0, 1.0 / half_height, 0.0, 0.0),
        Vec4::new(0.0, 0.0, zz, 0.0),
        Vec4::new(0.0, 0.0, zw, 1.0),
    )
}

fn perspective_matrix(
    half_fov: f32,
    x_mult: f32,
    y_mult: f32,
    near: f32,
    convention: DepthConvention,
) -> Mat4 {
    // Degenerate frustum with coincident near/far planes; only the near clip
    // matters for a capture nobody reads depth from.
    let (zz, zw) = match convention {
        DepthConvention::ReversedZ => (0.0, near),
        DepthConvention::Standard => (1.0, -near),
    };
    let tan_half_fov = half_fov.tan();
    Mat4::from_cols(
        Vec4::new(x_mult / tan_half_fov, 0.0, 0.0, 0.0),
        Vec4::new(0.0, y_mult / tan_half_fov, 0.0, 0.0),
        Vec4::new(0.0, 0.0, zz, 1.0),
        Vec4::new(0.0, 0.0, zw, 0.0),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    // Field of view whose half-angle is exactly one radian, making the
    // derived ortho height equal the ortho width.
    const SQUARE_FOV: f32 = 360.0 / std::f32::consts::PI;

    fn square_capture() -> SceneCapture {
        let mut capture = SceneCapture::new();
        capture.set_fov_angle_deg(SQUARE_FOV);
        capture.set_ortho_width(1024.0);
        capture.set_render_target(Some(RenderTargetInfo::new(1024, 1024)));
        capture
    }

    #[test]
    fn unbound_target_projects_to_zero() {
        let capture = SceneCapture::new();
        assert_eq!(capture.project_to_map(Vec3::new(5.0, 5.0, 5.0)), Vec3::ZERO);
        assert_eq!(capture.view_to_texture_scale(), Vec2::new(1.0, 1.0));
    }

    #[test]
    fn degenerate_target_is_refused() {
        let mut capture = SceneCapture::new();
        capture.set_render_target(Some(RenderTargetInfo::new(0, 512)));
        assert_eq!(capture.render_target(), None);
    }

    #[test]
    fn identity_ortho_capture_maps_known_points() {
        let capture = square_capture();
        // With an identity pose and a square capture, a world point lands at
        // (512 + y, 512 - z) with elevation passed through.
        let center = capture.project_to_map(Vec3::ZERO);
        assert!((center - Vec3::new(512.0, 512.0, 0.0)).length() < 1.0e-2);
        let projected = capture.project_to_map(Vec3::new(7.0, 100.0, 50.0));
        assert!((projected.x - 612.0).abs() < 1.0e-2);
        assert!((projected.y - 462.0).abs() < 1.0e-2);
        assert_eq!(projected.z, 50.0);
    }

    #[test]
    fn capture_translation_recenters_the_image() {
        let mut capture = square_capture();
        capture.set_pose(Vec3::new(10.0, 20.0, 0.0), Quat::IDENTITY);
        let projected = capture.project_to_map(Vec3::new(10.0, 20.0, 0.0));
        assert!((projected.x - 512.0).abs() < 1.0e-2);
        assert!((projected.y - 512.0).abs() < 1.0e-2);
    }

    #[test]
    fn texture_scale_halves_with_a_half_size_target() {
        let mut capture = square_capture();
        capture.set_render_target(Some(RenderTargetInfo::new(512, 512)));
        let scale = capture.view_to_texture_scale();
        assert!((scale - Vec2::new(0.5, 0.5)).length() < 1.0e-4);
        let projected = capture.project_to_map(Vec3::new(0.0, 100.0, 0.0));
        assert!((projected.x - 306.0).abs() < 1.0e-2);
    }

    #[test]
    fn perspective_point_behind_capture_is_zero() {
        let mut capture = square_capture();
        capture.set_projection(Projection::Perspective);
        // Depth maps onto world +x; anything at negative x is behind.
        assert_eq!(
            capture.project_to_map(Vec3::new(-100.0, 0.0, 0.0)),
            Vec3::ZERO
        );
        let ahead = capture.project_to_map(Vec3::new(100.0, 0.0, 0.0));
        assert!((ahead.x - 512.0).abs() < 1.0e-2);
        assert!((ahead.y - 512.0).abs() < 1.0e-2);
    }

    #[test]
    fn points_behind_the_capture_never_produce_garbage() {
        use rand::Rng;
        let mut capture = square_capture();
        capture.set_projection(Projection::Perspective);
        let mut rng = rand::rng();
        for _ in 0..200 {
            let behind = Vec3::new(
                rng.random_range(-1.0e5..0.0),
                rng.random_range(-1.0e5..1.0e5),
                rng.random_range(-1.0e5..1.0e5),
            );
            assert_eq!(capture.project_to_map(behind), Vec3::ZERO);
        }
    }

    #[test]
    fn depth_convention_does_not_move_the_planar_result() {
        let mut reversed = square_capture();
        reversed.set_depth_convention(DepthConvention::ReversedZ);
        let mut standard = square_capture();
        standard.set_depth_convention(DepthConvention::Standard);
        let p = Vec3::new(40.0, -250.0, 12.0);
        let a = reversed.project_to_map(p);
        let b = standard.project_to_map(p);
        assert!((a - b).length() < 1.0e-3);
    }

    #[test]
    fn positioned_overloads_delegate_to_the_same_formula() {
        struct Marker(Vec3);
        impl WorldPositioned for Marker {
            fn world_position(&self) -> Vec3 {
                self.0
            }
        }
        let capture = square_capture();
        let marker = Marker(Vec3::new(3.0, 4.0, 5.0));
        assert_eq!(
            capture.project_positioned(&marker),
            capture.project_to_map(marker.0)
        );
        assert_eq!(
            capture.project_positioned_2d(&marker),
            capture.project_to_map_2d(marker.0)
        );
    }

    #[test]
    fn go_to_world_position_respects_the_axis_mask() {
        let mut capture = SceneCapture::new();
        capture.set_pose(Vec3::new(0.0, 0.0, 300.0), Quat::IDENTITY);
        capture.go_to_world_position(Vec3::new(50.0, -20.0, 999.0), Vec3::new(1.0, 1.0, 0.0));
        assert_eq!(capture.position(), Vec3::new(50.0, -20.0, 0.0));
    }
}
