//! View/projection setup for the chase camera

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

use crate::sim::FollowCamera;

/// GPU-side camera and lighting uniform (must match shader)
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
    /// Direction *toward* the light, w unused
    pub light_dir: [f32; 4],
    /// x = ambient strength, y = diffuse strength
    pub light: [f32; 4],
}

impl CameraUniform {
    pub fn new(view_proj: Mat4) -> Self {
        Self {
            view_proj: view_proj.to_cols_array_2d(),
            light_dir: Vec3::new(10.0, 20.0, 10.0).normalize().extend(0.0).to_array(),
            light: [0.6, 1.0, 0.0, 0.0],
        }
    }
}

/// Perspective lens
#[derive(Debug, Clone, Copy)]
pub struct Projection {
    /// Vertical field of view in radians
    pub fovy: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Default for Projection {
    fn default() -> Self {
        Self {
            fovy: 75f32.to_radians(),
            znear: 0.1,
            zfar: 1000.0,
        }
    }
}

impl Projection {
    pub fn matrix(&self, width: u32, height: u32) -> Mat4 {
        let aspect = width.max(1) as f32 / height.max(1) as f32;
        Mat4::perspective_rh(self.fovy, aspect, self.znear, self.zfar)
    }

    pub fn view_proj(&self, camera: &FollowCamera, width: u32, height: u32) -> Mat4 {
        let view = Mat4::look_at_rh(camera.position, camera.target, Vec3::Y);
        self.matrix(width, height) * view
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;

    #[test]
    fn test_target_projects_to_centre() {
        let camera = FollowCamera::new(Vec3::new(0.0, 10.0, 20.0));
        let vp = Projection::default().view_proj(&camera, 1280, 720);
        let clip = vp * Vec4::new(0.0, 0.0, 0.0, 1.0);
        let ndc = clip / clip.w;
        assert!(ndc.x.abs() < 1e-5);
        assert!(ndc.y.abs() < 1e-5);
        assert!((0.0..1.0).contains(&ndc.z));
    }

    #[test]
    fn test_zero_size_is_safe() {
        let m = Projection::default().matrix(0, 0);
        assert!(m.is_finite());
    }
}
