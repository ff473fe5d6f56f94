//! Math utilities and types
//!
//! Provides fundamental math types for 2D graphics, aliased over
//! `nalgebra`. Matrices are column-major; transforms compose by
//! left-multiplication, so `translate * rotate * scale` applies scale
//! first.

pub use nalgebra::{Matrix4, Vector2, Vector3, Vector4};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type
pub type Vec4 = Vector4<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// Compose a quad transform from position, z-rotation, and size
///
/// Evaluates `translate(position) * rotate_z(rotation) * scale(size)`,
/// the matrix order that quad submission applies to unit-quad corners.
/// Rotation is given in degrees.
#[must_use]
pub fn quad_transform(position: Vec3, rotation_degrees: f32, size: Vec2) -> Mat4 {
    Mat4::new_translation(&position)
        * Mat4::from_axis_angle(&Vector3::z_axis(), rotation_degrees.to_radians())
        * Mat4::new_nonuniform_scaling(&Vec3::new(size.x, size.y, 1.0))
}
