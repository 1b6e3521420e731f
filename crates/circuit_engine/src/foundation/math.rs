//! Math utilities and types
//!
//! Provides the fundamental math types used by the camera, scene and render
//! dispatch code. All angles crossing a public API are degrees; conversion to
//! radians happens at matrix construction.

pub use nalgebra::{Matrix4, Point3, Unit, UnitQuaternion, Vector2, Vector3, Vector4};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type
pub type Vec4 = Vector4<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// Quaternion type for rotations
pub type Quat = UnitQuaternion<f32>;

/// Transform representing position, rotation and scale
///
/// Rotation is stored as Euler angles in degrees, wrapped to `[0, 360)` per
/// axis, matching the rest of the engine's angle conventions.
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    /// Position in world space
    pub position: Vec3,

    /// Euler rotation in degrees, wrapped to `[0, 360)`
    pub rotation: Vec3,

    /// Scale factors
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: Vec3::zeros(),
            scale: Vec3::new(1.0, 1.0, 1.0),
        }
    }
}

impl Transform {
    /// Create a new identity transform
    pub fn identity() -> Self {
        Self::default()
    }

    /// Create a transform with only position
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Create a transform from position, rotation (degrees) and scale
    pub fn new(position: Vec3, rotation: Vec3, scale: Vec3) -> Self {
        Self {
            position,
            rotation: wrap_degrees_vec(rotation),
            scale,
        }
    }

    /// Rotation as a quaternion built from the stored Euler degrees
    pub fn rotation_quat(&self) -> Quat {
        Quat::from_euler_angles(
            utils::deg_to_rad(self.rotation.x),
            utils::deg_to_rad(self.rotation.y),
            utils::deg_to_rad(self.rotation.z),
        )
    }

    /// Convert to a model matrix: translation * rotation * scale
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::new_translation(&self.position)
            * self.rotation_quat().to_homogeneous()
            * Mat4::new_nonuniform_scaling(&self.scale)
    }
}

/// Wrap an angle in degrees to `[0, 360)`, handling negative input
pub fn wrap_degrees(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid can return 360.0 for tiny negative inputs after rounding
    if wrapped >= 360.0 {
        wrapped - 360.0
    } else {
        wrapped
    }
}

/// Wrap each component of an Euler angle vector to `[0, 360)`
pub fn wrap_degrees_vec(angles: Vec3) -> Vec3 {
    Vec3::new(
        wrap_degrees(angles.x),
        wrap_degrees(angles.y),
        wrap_degrees(angles.z),
    )
}

/// Math constants
pub mod constants {
    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = std::f32::consts::PI / 180.0;

    /// Radians to degrees conversion factor
    pub const RAD_TO_DEG: f32 = 180.0 / std::f32::consts::PI;
}

/// Math utility functions
pub mod utils {
    use super::constants;

    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * constants::DEG_TO_RAD
    }

    /// Convert radians to degrees
    pub fn rad_to_deg(radians: f32) -> f32 {
        radians * constants::RAD_TO_DEG
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn wrap_handles_negative_angles() {
        assert_relative_eq!(wrap_degrees(-90.0), 270.0);
        assert_relative_eq!(wrap_degrees(720.0), 0.0);
        assert_relative_eq!(wrap_degrees(359.5), 359.5);
    }

    #[test]
    fn identity_transform_is_identity_matrix() {
        let m = Transform::identity().to_matrix();
        assert_relative_eq!(m, Mat4::identity(), epsilon = 1e-6);
    }

    #[test]
    fn translation_lands_in_last_column() {
        let m = Transform::from_position(Vec3::new(1.0, 2.0, 3.0)).to_matrix();
        assert_relative_eq!(m[(0, 3)], 1.0);
        assert_relative_eq!(m[(1, 3)], 2.0);
        assert_relative_eq!(m[(2, 3)], 3.0);
    }
}
