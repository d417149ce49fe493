use crate::constants::{CAMERA_FAR, CAMERA_FOV_Y_DEG, CAMERA_NEAR, CAMERA_Z};
use glam::{Mat4, Vec3, Vec4};

/// Fixed perspective camera looking down -Z. The scene travels past it; the
/// camera itself never moves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub fov_y_deg: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, CAMERA_Z),
            target: Vec3::new(0.0, 0.0, CAMERA_Z - 1.0),
            fov_y_deg: CAMERA_FOV_Y_DEG,
            near: CAMERA_NEAR,
            far: CAMERA_FAR,
        }
    }
}

impl Camera {
    #[inline]
    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, Vec3::Y)
    }

    #[inline]
    pub fn projection(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(
            self.fov_y_deg.to_radians(),
            aspect.max(1e-3),
            self.near,
            self.far,
        )
    }

    pub fn view_proj(&self, aspect: f32) -> Mat4 {
        self.projection(aspect) * self.view()
    }

    /// Project a world-space point to CSS pixel coordinates of a `width` x
    /// `height` viewport (origin top-left).
    ///
    /// Returns `None` for points behind the camera or outside the clip volume.
    pub fn project_to_screen(&self, world: Vec3, width: f32, height: f32) -> Option<[f32; 2]> {
        if width <= 0.0 || height <= 0.0 {
            return None;
        }
        let clip = self.view_proj(width / height) * Vec4::new(world.x, world.y, world.z, 1.0);
        if clip.w <= 0.0 {
            return None;
        }
        let ndc = clip.truncate() / clip.w;
        if ndc.x.abs() > 1.0 || ndc.y.abs() > 1.0 || !(0.0..=1.0).contains(&ndc.z) {
            return None;
        }
        Some([
            (ndc.x + 1.0) * 0.5 * width,
            (1.0 - ndc.y) * 0.5 * height,
        ])
    }
}
