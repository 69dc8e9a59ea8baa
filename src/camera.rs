use glam::{Mat4, Vec2, Vec3, Vec4};

use crate::config::CameraConfig;
use crate::core::Viewport;
use crate::math::Ray;
use crate::render::CameraUniform;

/// Clip-space w below which a point counts as behind the camera
const BEHIND_EPSILON: f32 = 1e-5;

/// Perspective look-at camera. Projection follows GL conventions
/// (right-handed, NDC depth in [-1, 1]).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub aspect: f32,
}

/// A world point run through the camera
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub ndc: Vec3,
    /// Distance in front of the camera along its view axis
    pub depth: f32,
}

impl Camera {
    pub fn new(position: Vec3, target: Vec3) -> Self {
        let defaults = CameraConfig::default();
        Self {
            position,
            target,
            up: Vec3::Y,
            fov_degrees: defaults.fov_degrees,
            near: defaults.near,
            far: defaults.far,
            aspect: Viewport::default().aspect(),
        }
    }

    pub fn from_config(config: &CameraConfig, viewport: Viewport) -> Self {
        Self {
            fov_degrees: config.fov_degrees,
            near: config.near,
            far: config.far,
            aspect: viewport.aspect(),
            ..Self::new(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO)
        }
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.aspect = viewport.aspect();
    }

    pub fn forward(&self) -> Vec3 {
        (self.target - self.position).try_normalize().unwrap_or(Vec3::NEG_Z)
    }

    pub fn right(&self) -> Vec3 {
        self.forward().cross(self.up).try_normalize().unwrap_or(Vec3::X)
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov_degrees.to_radians(), self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    pub fn to_clip(&self, world: Vec3) -> Vec4 {
        self.view_projection() * world.extend(1.0)
    }

    /// Project a world point to NDC. `None` when the point is behind the camera,
    /// where the perspective divide would mirror it onto the screen.
    pub fn project(&self, world: Vec3) -> Option<Projection> {
        let clip = self.to_clip(world);
        if clip.w <= BEHIND_EPSILON {
            return None;
        }
        Some(Projection {
            ndc: clip.truncate() / clip.w,
            depth: clip.w,
        })
    }

    /// Ray from the eye through a point given in NDC
    pub fn ray_through(&self, ndc: Vec2) -> Ray {
        let inverse = self.view_projection().inverse();
        let near = inverse.project_point3(Vec3::new(ndc.x, ndc.y, -1.0));
        let far = inverse.project_point3(Vec3::new(ndc.x, ndc.y, 1.0));
        Ray::new(self.position, far - near)
    }

    pub fn to_uniform(&self) -> CameraUniform {
        CameraUniform {
            view_proj: self.view_projection().to_cols_array_2d(),
            position: self.position.to_array(),
            _pad: 0.0,
        }
    }
}
