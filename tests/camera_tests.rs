// Host-side tests for camera projection.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}
mod camera {
    include!("../src/camera.rs");
}

use camera::Camera;
use glam::{Vec3, Vec4};

#[test]
fn default_camera_looks_down_negative_z() {
    let cam = Camera::default();
    assert_eq!(cam.eye, Vec3::new(0.0, 0.0, 10.0));
    assert!((cam.target - cam.eye).normalize().z < 0.0);
    assert_eq!(cam.fov_y_deg, 60.0);
}

#[test]
fn origin_projects_to_viewport_center() {
    let cam = Camera::default();
    let [x, y] = cam.project_to_screen(Vec3::ZERO, 1280.0, 720.0).unwrap();
    assert!((x - 640.0).abs() < 1e-2);
    assert!((y - 360.0).abs() < 1e-2);
}

#[test]
fn screen_y_grows_downward() {
    let cam = Camera::default();
    let [_, up] = cam.project_to_screen(Vec3::new(0.0, 1.0, 0.0), 800.0, 600.0).unwrap();
    let [_, down] = cam.project_to_screen(Vec3::new(0.0, -1.0, 0.0), 800.0, 600.0).unwrap();
    assert!(up < 300.0);
    assert!(down > 300.0);
}

#[test]
fn points_behind_or_outside_are_rejected() {
    let cam = Camera::default();
    assert_eq!(cam.project_to_screen(Vec3::new(0.0, 0.0, 20.0), 800.0, 600.0), None);
    assert_eq!(cam.project_to_screen(Vec3::new(100.0, 0.0, 0.0), 800.0, 600.0), None);
    assert_eq!(cam.project_to_screen(Vec3::new(0.0, 0.0, -500.0), 800.0, 600.0), None);
}

#[test]
fn empty_viewport_projects_nothing() {
    let cam = Camera::default();
    assert_eq!(cam.project_to_screen(Vec3::ZERO, 0.0, 600.0), None);
    assert_eq!(cam.project_to_screen(Vec3::ZERO, 800.0, 0.0), None);
}

#[test]
fn depth_range_is_zero_to_one() {
    let cam = Camera::default();
    let vp = cam.view_proj(16.0 / 9.0);
    let near = vp * Vec4::new(0.0, 0.0, 10.0 - cam.near, 1.0);
    let far = vp * Vec4::new(0.0, 0.0, 10.0 - cam.far, 1.0);
    assert!((near.z / near.w).abs() < 1e-4);
    assert!((far.z / far.w - 1.0).abs() < 1e-4);
}
