use super::camera::Camera;

/// Container size in CSS pixels plus the pixel ratio the renderer uses.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub pixel_ratio: f64,
}

impl Viewport {
    /// `device_pixel_ratio` is clamped to `max_pixel_ratio`; nonsense ratios
    /// fall back to 1.
    pub fn new(width: f64, height: f64, device_pixel_ratio: f64, max_pixel_ratio: f64) -> Self {
        let dpr = if device_pixel_ratio.is_finite() && device_pixel_ratio > 0.0 {
            device_pixel_ratio
        } else {
            1.0
        };
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
            pixel_ratio: dpr.min(max_pixel_ratio),
        }
    }

    pub fn aspect(&self) -> f32 {
        if self.height <= 0.0 {
            1.0
        } else {
            (self.width / self.height) as f32
        }
    }

    /// Drawing-buffer size in device pixels, never zero.
    pub fn backing_size(&self) -> (u32, u32) {
        let w = (self.width * self.pixel_ratio).floor() as u32;
        let h = (self.height * self.pixel_ratio).floor() as u32;
        (w.max(1), h.max(1))
    }

    pub fn apply_to_camera(&self, camera: &mut Camera) {
        camera.aspect = self.aspect();
        camera.update_projection_matrix();
    }
}
