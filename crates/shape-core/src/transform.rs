//! View, projection and model matrices for the demos.

use glam::{Mat2, Mat4, Vec3};

/// A perspective camera looking at a fixed target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub fov_y_degrees: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            eye: Vec3::new(-2.0, -1.0, -5.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
            fov_y_degrees: 45.0,
            near: 0.1,
            far: 100.0,
        }
    }
}

impl Camera {
    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    /// OpenGL-style projection (clip space z in -1..1).
    pub fn projection(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov_y_degrees.to_radians(), aspect, self.near, self.far)
    }
}

/// `width / height`, or 1.0 for a degenerate (minimised) framebuffer.
pub fn aspect_ratio(width: u32, height: u32) -> f32 {
    if height == 0 {
        1.0
    } else {
        width as f32 / height as f32
    }
}

pub fn model_rotation_z(degrees: f32) -> Mat4 {
    Mat4::from_rotation_z(degrees.to_radians())
}

/// `projection * view * model`.
pub fn compose_pvm(projection: Mat4, view: Mat4, model: Mat4) -> Mat4 {
    projection * view * model
}

/// Counter-clockwise 2D rotation with columns `(cos, sin)` and `(-sin, cos)`.
pub fn rotation_2d(radians: f32) -> Mat2 {
    let (sin, cos) = radians.sin_cos();
    Mat2::from_cols_array(&[cos, sin, -sin, cos])
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Vec2, Vec4};

    #[test]
    fn aspect_ratio_handles_zero_height() {
        assert_eq!(aspect_ratio(650, 0), 1.0);
        assert_eq!(aspect_ratio(800, 400), 2.0);
    }

    #[test]
    fn compose_order_applies_model_first() {
        let model = Mat4::from_translation(Vec3::X);
        let view = Mat4::from_scale(Vec3::splat(2.0));
        let pvm = compose_pvm(Mat4::IDENTITY, view, model);
        let p = pvm * Vec4::new(0.0, 0.0, 0.0, 1.0);
        assert_eq!(p, Vec4::new(2.0, 0.0, 0.0, 1.0));
    }

    #[test]
    fn camera_looks_at_target() {
        let camera = Camera::default();
        let target_in_view = camera.view().transform_point3(camera.target);
        assert!(target_in_view.x.abs() < 1e-5);
        assert!(target_in_view.y.abs() < 1e-5);
        // Right-handed view space looks down -Z.
        assert!(target_in_view.z < 0.0);
    }

    #[test]
    fn target_projects_inside_clip_volume() {
        let camera = Camera::default();
        let pvm = compose_pvm(camera.projection(650.0 / 480.0), camera.view(), Mat4::IDENTITY);
        let clip = pvm * camera.target.extend(1.0);
        let ndc = clip.truncate() / clip.w;
        assert!(ndc.z > -1.0 && ndc.z < 1.0);
        assert!(ndc.x.abs() < 1e-5 && ndc.y.abs() < 1e-5);
    }

    #[test]
    fn rotation_2d_quarter_turn() {
        let r = rotation_2d(std::f32::consts::FRAC_PI_2);
        let v = r * Vec2::X;
        assert!((v - Vec2::Y).length() < 1e-6);
    }

    #[test]
    fn rotation_2d_matches_glam() {
        let angle = std::f32::consts::PI / 6.0;
        assert!(rotation_2d(angle).abs_diff_eq(Mat2::from_angle(angle), 1e-6));
    }
}
