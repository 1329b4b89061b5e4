use cgmath::{Deg, InnerSpace, Matrix4, SquareMatrix, Vector3, Vector4};

use crate::config::CameraDefaults;
use crate::gfx::picking::Ray;

/// Near clipping plane distance
pub const ZNEAR: f32 = 0.1;
/// Far clipping plane distance
pub const ZFAR: f32 = 1000.0;

/// The mouse-driven model camera.
///
/// The camera sits `zoom` units in front of the scene origin, the scene is
/// tilted by `rot_x` and turned by `rot_y` (degrees), and the result is shifted
/// by `pan_x`/`pan_y` in view space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneCamera {
    /// Vertical field of view in degrees
    pub fov_angle: f32,
    pub zoom: f32,
    pub rot_x: f32,
    pub rot_y: f32,
    pub pan_x: f32,
    pub pan_y: f32,
}

impl SceneCamera {
    pub fn new(defaults: &CameraDefaults) -> Self {
        Self {
            fov_angle: defaults.fov_angle,
            zoom: defaults.zoom,
            rot_x: defaults.rot_x,
            rot_y: defaults.rot_y,
            pan_x: defaults.pan_x,
            pan_y: defaults.pan_y,
        }
    }

    pub fn reset(&mut self, defaults: &CameraDefaults) {
        *self = Self::new(defaults);
    }

    /// World-to-view matrix.
    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::from_translation(Vector3::new(self.pan_x, self.pan_y, -self.zoom))
            * Matrix4::from_angle_x(Deg(self.rot_x))
            * Matrix4::from_angle_y(Deg(self.rot_y))
    }

    /// OpenGL-style perspective projection.
    pub fn projection_matrix(&self, aspect: f32) -> Matrix4<f32> {
        cgmath::perspective(Deg(self.fov_angle), aspect, ZNEAR, ZFAR)
    }

    pub fn view_projection_matrix(&self, aspect: f32) -> Matrix4<f32> {
        self.projection_matrix(aspect) * self.view_matrix()
    }

    /// Converts window pixel coordinates into a world-space picking ray.
    ///
    /// Returns `None` for a collapsed (zero-sized) screen, which has no
    /// valid projection.
    pub fn screen_to_ray(&self, screen_pos: (f32, f32), screen_size: (f32, f32)) -> Option<Ray> {
        let (mouse_x, mouse_y) = screen_pos;
        let (width, height) = screen_size;
        if !(width > 0.0 && height > 0.0) {
            return None;
        }

        // Normalized device coordinates (-1 to 1), y pointing up
        let ndc_x = (2.0 * mouse_x) / width - 1.0;
        let ndc_y = 1.0 - (2.0 * mouse_y) / height;

        let inv_view_proj = self
            .view_projection_matrix(width / height)
            .invert()
            .unwrap_or_else(Matrix4::identity);

        let unproject = |z: f32| {
            let p = inv_view_proj * Vector4::new(ndc_x, ndc_y, z, 1.0);
            Vector3::new(p.x / p.w, p.y / p.w, p.z / p.w)
        };
        let near = unproject(-1.0);
        let far = unproject(1.0);

        Some(Ray::new(near, (far - near).normalize()))
    }
}

impl Default for SceneCamera {
    fn default() -> Self {
        Self::new(&CameraDefaults::default())
    }
}
