//! Math utilities and types
//!
//! Thin aliases over nalgebra. The physics side (rapier) speaks nalgebra
//! natively; the renderer receives plain column-major arrays.

pub use nalgebra::{Matrix4, Quaternion, Unit, UnitQuaternion, Vector3};

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// 3D point type
pub type Point3 = nalgebra::Point3<f32>;

/// Quaternion type for rotations
pub type Quat = UnitQuaternion<f32>;

/// Transform representing position, rotation, and scale
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// Position in 3D space
    pub position: Vec3,

    /// Rotation quaternion
    pub rotation: Quat,

    /// Scale factors
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: Quat::identity(),
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

    /// Create a transform with position and rotation
    pub fn from_position_rotation(position: Vec3, rotation: Quat) -> Self {
        Self {
            position,
            rotation,
            ..Default::default()
        }
    }

    /// Convert to a transformation matrix (translation * rotation * scale)
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::new_translation(&self.position)
            * self.rotation.to_homogeneous()
            * Mat4::new_nonuniform_scaling(&self.scale)
    }

    /// Column-major array form of [`Transform::to_matrix`], ready for GPU upload
    pub fn to_cols_array(&self) -> [[f32; 4]; 4] {
        mat4_to_cols_array(&self.to_matrix())
    }

    /// Apply this transform to a point
    pub fn transform_point(&self, point: Point3) -> Point3 {
        self.to_matrix().transform_point(&point)
    }
}

/// Column-major array form of a matrix
pub fn mat4_to_cols_array(matrix: &Mat4) -> [[f32; 4]; 4] {
    (*matrix).into()
}

/// Build a Vec3 from a `[x, y, z]` array (config files store vectors this way)
pub fn vec3_from_array(values: [f32; 3]) -> Vec3 {
    Vec3::new(values[0], values[1], values[2])
}

/// Math utility functions
pub mod utils {
    /// Whether every component is finite
    pub fn all_finite(values: &[f32]) -> bool {
        values.iter().all(|v| v.is_finite())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_identity_matrix() {
        let transform = Transform::identity();
        assert_eq!(transform.to_matrix(), Mat4::identity());
    }

    #[test]
    fn test_translation_lands_in_last_column() {
        let transform = Transform::from_position(Vec3::new(1.0, 2.0, 3.0));
        let cols = transform.to_cols_array();
        assert_eq!(cols[3], [1.0, 2.0, 3.0, 1.0]);
    }

    #[test]
    fn test_rotation_applied_before_translation() {
        let rotation = Quat::from_axis_angle(&Vec3::y_axis(), std::f32::consts::FRAC_PI_2);
        let transform = Transform::from_position_rotation(Vec3::new(0.0, 1.0, 0.0), rotation);
        let moved = transform.transform_point(Point3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(moved.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(moved.y, 1.0, epsilon = 1e-6);
        assert_relative_eq!(moved.z, -1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_scale_is_applied_in_local_space() {
        let transform = Transform {
            position: Vec3::new(0.0, 0.0, 5.0),
            scale: Vec3::new(2.0, 2.0, 2.0),
            ..Default::default()
        };
        let moved = transform.transform_point(Point3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(moved.x, 2.0);
        assert_relative_eq!(moved.z, 5.0);
    }
}
