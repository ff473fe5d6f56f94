//! Orthographic camera for 2D scenes
//!
//! The camera owns its projection, view, and combined view-projection
//! matrices and recalculates them eagerly whenever a setter runs, so
//! `view_projection_matrix()` is a plain read on the hot path.

use nalgebra::Vector3;

use crate::foundation::math::{Mat4, Vec3};

/// Orthographic camera with position and roll
///
/// Projection bounds are given in world units; depth is fixed to the
/// -1..1 clip range, which is all a 2D layer needs. Rotation is about
/// the z axis, in degrees, positive counter-clockwise.
#[derive(Debug, Clone)]
pub struct OrthographicCamera {
    projection_matrix: Mat4,
    view_matrix: Mat4,
    view_projection_matrix: Mat4,

    position: Vec3,
    rotation: f32,
}

impl OrthographicCamera {
    /// Create a camera from orthographic projection bounds
    #[must_use]
    pub fn new(left: f32, right: f32, bottom: f32, top: f32) -> Self {
        let mut camera = Self {
            projection_matrix: Mat4::new_orthographic(left, right, bottom, top, -1.0, 1.0),
            view_matrix: Mat4::identity(),
            view_projection_matrix: Mat4::identity(),
            position: Vec3::zeros(),
            rotation: 0.0,
        };
        camera.recalculate_view_matrix();
        camera
    }

    /// Replace the projection bounds (zoom or aspect change)
    pub fn set_projection(&mut self, left: f32, right: f32, bottom: f32, top: f32) {
        self.projection_matrix = Mat4::new_orthographic(left, right, bottom, top, -1.0, 1.0);
        self.recalculate_view_matrix();
    }

    /// Camera position in world space
    #[must_use]
    pub const fn position(&self) -> &Vec3 {
        &self.position
    }

    /// Move the camera
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        self.recalculate_view_matrix();
    }

    /// Camera roll in degrees
    #[must_use]
    pub const fn rotation(&self) -> f32 {
        self.rotation
    }

    /// Set the camera roll in degrees
    pub fn set_rotation(&mut self, rotation: f32) {
        self.rotation = rotation;
        self.recalculate_view_matrix();
    }

    /// Projection matrix
    #[must_use]
    pub const fn projection_matrix(&self) -> &Mat4 {
        &self.projection_matrix
    }

    /// View matrix (inverse camera transform)
    #[must_use]
    pub const fn view_matrix(&self) -> &Mat4 {
        &self.view_matrix
    }

    /// Combined view-projection matrix applied to all scene geometry
    #[must_use]
    pub const fn view_projection_matrix(&self) -> &Mat4 {
        &self.view_projection_matrix
    }

    fn recalculate_view_matrix(&mut self) {
        // The camera transform is translate(position) * rotate_z(rotation);
        // its inverse in closed form avoids a generic matrix inversion.
        let inverse_rotation =
            Mat4::from_axis_angle(&Vector3::z_axis(), -self.rotation.to_radians());
        let inverse_translation = Mat4::new_translation(&(-self.position));

        self.view_matrix = inverse_rotation * inverse_translation;
        self.view_projection_matrix = self.projection_matrix * self.view_matrix;
    }
}
