//! Fixed camera and model-rotation matrices.

use glam::{Mat4, Vec3};

/// A fixed perspective camera looking at the origin from +Z.
///
/// The cloud itself rotates (via the model matrix); the camera never
/// moves. Resizes only change the aspect ratio.
pub struct Camera {
    pub fov_y: f32,
    pub distance: f32,
    pub aspect: f32,
}

impl Camera {
    pub fn new(aspect: f32) -> Self {
        Self {
            fov_y: 75.0_f32.to_radians(),
            distance: 30.0,
            aspect,
        }
    }

    pub fn set_aspect(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    pub fn view_proj(&self) -> Mat4 {
        let view = Mat4::look_at_rh(
            Vec3::new(0.0, 0.0, self.distance),
            Vec3::ZERO,
            Vec3::Y,
        );
        let proj = Mat4::perspective_rh(self.fov_y, self.aspect, 0.1, 1000.0);
        proj * view
    }
}

/// Model matrix for the cloud's orientation: tilt about Z applied first,
/// then yaw about Y.
pub fn model_matrix(yaw: f32, tilt: f32) -> Mat4 {
    Mat4::from_rotation_y(yaw) * Mat4::from_rotation_z(tilt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;

    #[test]
    fn test_view_proj_centers_origin() {
        let camera = Camera::new(16.0 / 9.0);
        let clip = camera.view_proj() * Vec4::new(0.0, 0.0, 0.0, 1.0);
        assert!((clip.x / clip.w).abs() < 1e-5);
        assert!((clip.y / clip.w).abs() < 1e-5);
    }

    #[test]
    fn test_model_matrix_identity_at_rest() {
        let m = model_matrix(0.0, 0.0);
        let diff = m - Mat4::IDENTITY;
        assert!(diff.to_cols_array().iter().all(|v| v.abs() < 1e-6));
    }
}
