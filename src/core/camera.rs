//! Perspective camera used by the renderer, the scroll timeline and the audio
//! listener.
//!
//! The camera looks down −Z from its position (no look-at target), matching a
//! freshly constructed perspective camera that is only ever translated.

use glam::{Mat4, Vec3};

use crate::constants::{CAMERA_FAR, CAMERA_FOV_DEG, CAMERA_NEAR, CAMERA_START};

#[derive(Clone, Debug)]
pub struct Camera {
    pub position: Vec3,
    pub fovy_degrees: f32,
    pub aspect: f32,
    pub znear: f32,
    pub zfar: f32,
    projection: Mat4,
}

impl Camera {
    pub fn new(fovy_degrees: f32, aspect: f32, znear: f32, zfar: f32) -> Self {
        let mut camera = Self {
            position: Vec3::ZERO,
            fovy_degrees,
            aspect,
            znear,
            zfar,
            projection: Mat4::IDENTITY,
        };
        camera.update_projection_matrix();
        camera
    }

    /// Camera with the scene's fixed lens, placed at the start of the scroll path.
    pub fn for_scene(aspect: f32) -> Self {
        let mut camera = Self::new(CAMERA_FOV_DEG, aspect, CAMERA_NEAR, CAMERA_FAR);
        camera.position = Vec3::from(CAMERA_START);
        camera
    }

    /// Recompute the cached projection after `aspect` or the lens changed.
    pub fn update_projection_matrix(&mut self) {
        let aspect = if self.aspect.is_finite() && self.aspect > 0.0 {
            self.aspect
        } else {
            1.0
        };
        self.projection = Mat4::perspective_rh(
            self.fovy_degrees.to_radians(),
            aspect,
            self.znear,
            self.zfar,
        );
    }

    pub fn projection_matrix(&self) -> Mat4 {
        self.projection
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_to_rh(self.position, Vec3::NEG_Z, Vec3::Y)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection * self.view_matrix()
    }

    pub fn forward(&self) -> Vec3 {
        Vec3::NEG_Z
    }
}
