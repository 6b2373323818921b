// Host-side tests for viewport sizing and the camera.

use glam::Vec3;
use sonic_planet::constants::*;
use sonic_planet::core::{Camera, Viewport};

#[test]
fn pixel_ratio_is_capped() {
    assert_eq!(Viewport::new(800.0, 600.0, 3.0, MAX_PIXEL_RATIO).pixel_ratio, 2.0);
    assert_eq!(Viewport::new(800.0, 600.0, 1.5, MAX_PIXEL_RATIO).pixel_ratio, 1.5);
    assert_eq!(Viewport::new(800.0, 600.0, 0.0, MAX_PIXEL_RATIO).pixel_ratio, 1.0);
    assert_eq!(Viewport::new(800.0, 600.0, f64::NAN, MAX_PIXEL_RATIO).pixel_ratio, 1.0);
}

#[test]
fn backing_size_uses_device_pixels() {
    let v = Viewport::new(800.0, 600.0, 3.0, MAX_PIXEL_RATIO);
    assert_eq!(v.backing_size(), (1600, 1200));
    let collapsed = Viewport::new(0.0, 0.0, 1.0, MAX_PIXEL_RATIO);
    assert_eq!(collapsed.backing_size(), (1, 1));
    assert_eq!(collapsed.aspect(), 1.0);
}

#[test]
fn resize_updates_camera_aspect() {
    let mut camera = Camera::for_scene(1.0);
    let v = Viewport::new(1600.0, 900.0, 1.0, MAX_PIXEL_RATIO);
    v.apply_to_camera(&mut camera);
    assert!((camera.aspect - 16.0 / 9.0).abs() < 1e-6);
    let expected = glam::Mat4::perspective_rh(75f32.to_radians(), 16.0 / 9.0, 0.1, 1000.0);
    assert!(camera.projection_matrix().abs_diff_eq(expected, 1e-6));
}

#[test]
fn camera_starts_far_and_looks_at_origin() {
    let camera = Camera::for_scene(1.0);
    assert_eq!(camera.position, Vec3::new(0.0, 0.0, 50.0));
    assert_eq!(camera.fovy_degrees, CAMERA_FOV_DEG);
    let clip = camera.view_projection().project_point3(Vec3::ZERO);
    assert!(clip.x.abs() < 1e-6 && clip.y.abs() < 1e-6);
    assert!(clip.z > 0.0 && clip.z < 1.0);
}
