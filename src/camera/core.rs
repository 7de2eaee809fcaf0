use glam::{Mat4, Vec3};
use serde::Serialize;

use super::frustum::Frustum;
use crate::math::{horizontal_fov_radians, vertical_fov_radians};

/// Perspective camera defined by eye position, target, and projection
/// parameters.
///
/// The field of view and clip planes are fixed at construction; only the
/// aspect ratio follows the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Camera {
    /// Eye (camera) position in world space.
    pub eye: Vec3,
    /// Look-at target position.
    pub target: Vec3,
    /// Up direction vector.
    pub up: Vec3,
    aspect: f32,
    fovy: f32,
    znear: f32,
    zfar: f32,
}

impl Camera {
    /// Create a camera looking from `eye` at `target` with +Y up.
    ///
    /// `fovy` is the vertical field of view in degrees.
    #[must_use]
    pub fn new(
        fovy: f32,
        aspect: f32,
        znear: f32,
        zfar: f32,
        eye: Vec3,
        target: Vec3,
    ) -> Self {
        Self {
            eye,
            target,
            up: Vec3::Y,
            aspect,
            fovy,
            znear,
            zfar,
        }
    }

    /// Vertical field of view in degrees.
    #[must_use]
    pub fn fovy(&self) -> f32 {
        self.fovy
    }

    /// Vertical field of view in radians.
    #[must_use]
    pub fn fovy_radians(&self) -> f32 {
        vertical_fov_radians(self.fovy)
    }

    /// Horizontal field of view in radians at the current aspect.
    #[must_use]
    pub fn fovx_radians(&self) -> f32 {
        horizontal_fov_radians(self.fovy_radians(), self.aspect)
    }

    /// Viewport aspect ratio (width / height).
    #[must_use]
    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    /// Near clipping plane distance.
    #[must_use]
    pub fn znear(&self) -> f32 {
        self.znear
    }

    /// Far clipping plane distance.
    #[must_use]
    pub fn zfar(&self) -> f32 {
        self.zfar
    }

    /// Recompute the aspect ratio for a viewport. Zero dimensions are
    /// clamped to 1.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.aspect = width.max(1) as f32 / height.max(1) as f32;
    }

    /// Unit vector from the eye toward the target.
    #[must_use]
    pub fn forward(&self) -> Vec3 {
        (self.target - self.eye).normalize_or_zero()
    }

    /// World-to-view matrix.
    #[must_use]
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    /// Projection matrix.
    #[must_use]
    pub fn projection_matrix(&self) -> Mat4 {
        // perspective_rh already uses [0,1] depth range (wgpu/Vulkan
        // convention)
        Mat4::perspective_rh(
            self.fovy_radians(),
            self.aspect,
            self.znear,
            self.zfar,
        )
    }

    /// Build the combined view-projection matrix.
    #[must_use]
    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// View frustum of the current camera state.
    #[must_use]
    pub fn frustum(&self) -> Frustum {
        Frustum::from_view_projection(self.view_projection())
    }

    /// GPU-ready snapshot of the current camera state.
    #[must_use]
    pub fn uniform(&self) -> CameraUniform {
        CameraUniform {
            view_proj: self.view_projection().to_cols_array_2d(),
            position: self.eye.to_array(),
            aspect: self.aspect,
            forward: self.forward().to_array(),
            fovy: self.fovy,
        }
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
/// Camera block a rendering backend can upload verbatim.
pub struct CameraUniform {
    /// Combined view-projection matrix, column-major.
    pub view_proj: [[f32; 4]; 4],
    /// Camera world-space position.
    pub position: [f32; 3],
    /// Viewport aspect ratio.
    pub aspect: f32,
    /// Camera forward direction.
    pub forward: [f32; 3],
    /// Vertical field of view in degrees.
    pub fovy: f32,
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn camera() -> Camera {
        let eye = Vec3::new(0.0, 0.0, 150.0);
        Camera::new(75.0, 1.5, 0.1, 1000.0, eye, Vec3::ZERO)
    }

    #[test]
    fn zero_height_viewport_is_clamped() {
        let mut cam = camera();
        cam.set_viewport(640, 0);
        assert_eq!(cam.aspect(), 640.0);
        cam.set_viewport(0, 0);
        assert_eq!(cam.aspect(), 1.0);
    }

    #[test]
    fn resize_keeps_fov() {
        let mut cam = camera();
        cam.set_viewport(1920, 1080);
        assert_eq!(cam.fovy(), 75.0);
        assert_relative_eq!(cam.aspect(), 1920.0 / 1080.0);
    }

    #[test]
    fn target_projects_to_screen_center() {
        let cam = camera();
        let ndc = cam.view_projection().project_point3(Vec3::ZERO);
        assert_relative_eq!(ndc.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(ndc.y, 0.0, epsilon = 1e-6);
        assert!(ndc.z > 0.0 && ndc.z < 1.0);
    }

    #[test]
    fn uniform_is_plain_bytes() {
        let cam = camera();
        let uniform = cam.uniform();
        let bytes: &[u8] = bytemuck::bytes_of(&uniform);
        assert_eq!(bytes.len(), size_of::<CameraUniform>());
        assert_eq!(uniform.position, [0.0, 0.0, 150.0]);
        assert_eq!(uniform.forward, [0.0, 0.0, -1.0]);
    }
}
