//! 3D camera with clamped transform setters
//!
//! The camera holds position, wrapped Euler rotation and projection
//! parameters, and derives view/projection matrices on demand. It never polls
//! input itself; movement is applied by the player-input glue through the
//! clamped setters, so runaway input accumulation cannot blow up the
//! transform numerically.

use crate::config::CameraConfig;
use crate::foundation::math::{utils, wrap_degrees_vec, Mat4, Point3, Vec3};

/// Symmetric world-space bound applied to every position axis.
///
/// A safety clamp, not a gameplay boundary.
pub const POSITION_BOUND: f32 = 10_000.0;

/// Field-of-view bounds in degrees
pub const FOV_RANGE: (f32, f32) = (70.0, 110.0);

/// Minimum distance kept between the near and far clip planes
pub const CLIP_GAP: f32 = 0.1;

/// Largest allowed far clip distance
pub const MAX_FAR_CLIP: f32 = 1000.0;

/// Perspective camera with clamped setters
///
/// Exactly one camera exists per engine context; it is created by the engine
/// during initialization and lives until shutdown.
#[derive(Debug, Clone)]
pub struct Camera {
    can_move: bool,

    fov: f32,
    near_clip: f32,
    far_clip: f32,
    aspect_ratio: f32,
    speed: f32,
    sensitivity: f32,

    up: Vec3,
    front: Vec3,
    right: Vec3,

    position: Vec3,
    rotation: Vec3,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            can_move: false,
            fov: 90.0,
            near_clip: 0.01,
            far_clip: 500.0,
            aspect_ratio: 16.0 / 9.0,
            speed: 1.0,
            sensitivity: 0.1,
            up: Vec3::new(0.0, 1.0, 0.0),
            front: Vec3::new(0.0, 0.0, -1.0),
            right: Vec3::new(1.0, 0.0, 0.0),
            position: Vec3::zeros(),
            rotation: Vec3::zeros(),
        }
    }
}

impl Camera {
    /// Create a camera from configuration, passing every value through the
    /// clamped setters
    pub fn from_config(config: &CameraConfig, aspect_ratio: f32) -> Self {
        log::debug!("Creating camera.");

        let mut camera = Self::default();
        camera.set_fov(config.fov);
        camera.set_far_clip(config.far_clip);
        camera.set_near_clip(config.near_clip);
        camera.set_aspect_ratio(aspect_ratio);
        camera.set_speed(config.speed);
        camera.set_sensitivity(config.sensitivity);
        camera.set_pos(Vec3::from(config.position));
        camera.set_rot(Vec3::from(config.rotation));
        camera
    }

    /// Whether keyboard/mouse movement is applied to this camera
    pub fn can_move(&self) -> bool {
        self.can_move
    }

    /// Enable or disable movement
    pub fn set_move_state(&mut self, can_move: bool) {
        self.can_move = can_move;
    }

    /// Field of view in degrees
    pub fn fov(&self) -> f32 {
        self.fov
    }

    /// Set the field of view, clamped to the supported range
    pub fn set_fov(&mut self, fov: f32) {
        self.fov = fov.clamp(FOV_RANGE.0, FOV_RANGE.1);
    }

    /// Near clip plane distance
    pub fn near_clip(&self) -> f32 {
        self.near_clip
    }

    /// Set the near clip plane, clamped against the current far clip.
    ///
    /// When shrinking both planes, set the far clip first; the near clip is
    /// always kept at least [`CLIP_GAP`] below it.
    pub fn set_near_clip(&mut self, near_clip: f32) {
        self.near_clip = near_clip.clamp(0.001, self.far_clip - CLIP_GAP);
    }

    /// Far clip plane distance
    pub fn far_clip(&self) -> f32 {
        self.far_clip
    }

    /// Set the far clip plane, clamped against the current near clip
    pub fn set_far_clip(&mut self, far_clip: f32) {
        self.far_clip = far_clip.clamp(self.near_clip + CLIP_GAP, MAX_FAR_CLIP);
    }

    /// Aspect ratio (width / height)
    pub fn aspect_ratio(&self) -> f32 {
        self.aspect_ratio
    }

    /// Set the aspect ratio; called from the resize handling so the value
    /// always stays valid
    pub fn set_aspect_ratio(&mut self, aspect_ratio: f32) {
        self.aspect_ratio = aspect_ratio.clamp(0.001, 10.0);
    }

    /// Movement speed in units per second
    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Set the movement speed
    pub fn set_speed(&mut self, speed: f32) {
        self.speed = speed.clamp(0.1, 10.0);
    }

    /// Mouse-look sensitivity
    pub fn sensitivity(&self) -> f32 {
        self.sensitivity
    }

    /// Set the mouse-look sensitivity
    pub fn set_sensitivity(&mut self, sensitivity: f32) {
        self.sensitivity = sensitivity.clamp(0.001, 10.0);
    }

    /// World-space up basis vector
    pub fn up(&self) -> Vec3 {
        self.up
    }

    /// Front basis vector
    pub fn front(&self) -> Vec3 {
        self.front
    }

    /// Set the front basis vector
    pub fn set_front(&mut self, front: Vec3) {
        self.front = front;
    }

    /// Right basis vector
    pub fn right(&self) -> Vec3 {
        self.right
    }

    /// Set the right basis vector
    pub fn set_right(&mut self, right: Vec3) {
        self.right = right;
    }

    /// Camera position
    pub fn pos(&self) -> Vec3 {
        self.position
    }

    /// Set the position, each axis clamped to [`POSITION_BOUND`]
    pub fn set_pos(&mut self, pos: Vec3) {
        self.position = Vec3::new(
            pos.x.clamp(-POSITION_BOUND, POSITION_BOUND),
            pos.y.clamp(-POSITION_BOUND, POSITION_BOUND),
            pos.z.clamp(-POSITION_BOUND, POSITION_BOUND),
        );
    }

    /// Euler rotation in degrees, wrapped to `[0, 360)`
    pub fn rot(&self) -> Vec3 {
        self.rotation
    }

    /// Set the rotation, wrapping each axis to `[0, 360)`
    pub fn set_rot(&mut self, rot: Vec3) {
        self.rotation = wrap_degrees_vec(rot);
    }

    /// Add a rotation delta, wrapping each axis to `[0, 360)`.
    ///
    /// Negative deltas wrap correctly; adding a full turn per axis leaves the
    /// rotation unchanged.
    pub fn add_rot(&mut self, delta: Vec3) {
        self.rotation = wrap_degrees_vec(self.rotation + delta);
    }

    /// View matrix derived from position, front and up (look-at convention).
    ///
    /// Pure; may be called any number of times per frame.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(
            &Point3::from(self.position),
            &Point3::from(self.position + self.front),
            &self.up,
        )
    }

    /// Perspective projection matrix from fov, aspect ratio and clip planes
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::new_perspective(
            self.aspect_ratio,
            utils::deg_to_rad(self.fov),
            self.near_clip,
            self.far_clip,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn position_clamps_each_axis_independently() {
        let mut camera = Camera::default();
        camera.set_pos(Vec3::new(20_000.0, -20_000.0, 0.0));
        assert_relative_eq!(camera.pos(), Vec3::new(10_000.0, -10_000.0, 0.0));
    }

    #[test]
    fn full_turn_leaves_rotation_unchanged() {
        let mut camera = Camera::default();
        camera.set_rot(Vec3::new(12.5, 200.0, 301.0));
        camera.add_rot(Vec3::new(360.0, 360.0, 360.0));
        assert_relative_eq!(camera.rot(), Vec3::new(12.5, 200.0, 301.0), epsilon = 1e-3);
    }

    #[test]
    fn negative_rotation_deltas_wrap() {
        let mut camera = Camera::default();
        camera.set_rot(Vec3::new(10.0, 0.0, 0.0));
        camera.add_rot(Vec3::new(-20.0, -90.0, 0.0));
        assert_relative_eq!(camera.rot(), Vec3::new(350.0, 270.0, 0.0), epsilon = 1e-3);
    }

    #[test]
    fn fov_clamps_to_supported_range() {
        let mut camera = Camera::default();
        camera.set_fov(180.0);
        assert_relative_eq!(camera.fov(), 110.0);
        camera.set_fov(10.0);
        assert_relative_eq!(camera.fov(), 70.0);
    }

    #[test]
    fn near_clip_never_reaches_far_clip() {
        let mut camera = Camera::default();
        camera.set_near_clip(10_000.0);
        assert!(camera.near_clip() < camera.far_clip());

        camera.set_far_clip(1.0);
        assert!(camera.near_clip() < camera.far_clip());

        // shrink far first, then near tracks the new bound
        camera.set_near_clip(500.0);
        assert!(camera.near_clip() <= camera.far_clip() - CLIP_GAP + 1e-6);
    }

    #[test]
    fn far_clip_respects_absolute_bound() {
        let mut camera = Camera::default();
        camera.set_far_clip(5_000.0);
        assert_relative_eq!(camera.far_clip(), MAX_FAR_CLIP);
    }

    #[test]
    fn view_matrix_has_no_side_effects() {
        let camera = Camera::default();
        let a = camera.view_matrix();
        let b = camera.view_matrix();
        assert_relative_eq!(a, b);
    }
}
