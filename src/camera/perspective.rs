//! Perspective camera looking at a target point.

use glam::{Mat4, Vec3};

use crate::params::RenderConfig;

/// Right-handed, Y-up perspective camera
#[derive(Debug, Clone)]
pub struct PerspectiveCamera {
    /// Vertical field of view (radians)
    pub fov_y: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
    /// Point the camera looks at
    pub target: Vec3,
}

impl PerspectiveCamera {
    pub fn from_config(config: &RenderConfig) -> Self {
        Self {
            fov_y: config.fov_degrees.to_radians(),
            aspect: config.aspect_ratio(),
            near: config.near_plane,
            far: config.far_plane,
            position: Vec3::from_array(config.camera_position),
            target: Vec3::from_array(config.camera_target),
        }
    }

    /// Update aspect ratio after a resize. Degenerate sizes keep the previous ratio.
    pub fn set_aspect(&mut self, aspect: f32) {
        if aspect.is_finite() && aspect > 0.0 {
            self.aspect = aspect;
        }
    }

    pub fn view(&self) -> Mat4 {
        // Always keep Y as up vector (camera never rolls)
        Mat4::look_at_rh(self.position, self.target, Vec3::Y)
    }

    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect, self.near, self.far)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection() * self.view()
    }

    /// Camera-space right and up axes in world coordinates
    pub fn basis(&self) -> (Vec3, Vec3) {
        let world = self.view().inverse();
        (world.x_axis.truncate(), world.y_axis.truncate())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_default_config() {
        let camera = PerspectiveCamera::from_config(&RenderConfig::default());
        assert!((camera.fov_y - 75f32.to_radians()).abs() < 1e-6);
        assert_eq!(camera.position, Vec3::ONE);
        assert_eq!(camera.target, Vec3::ZERO);
        assert!((camera.aspect - 1280.0 / 720.0).abs() < 1e-6);
    }

    #[test]
    fn test_set_aspect_ignores_degenerate() {
        let mut camera = PerspectiveCamera::from_config(&RenderConfig::default());
        camera.set_aspect(2.0);
        assert_eq!(camera.aspect, 2.0);
        camera.set_aspect(0.0);
        camera.set_aspect(f32::NAN);
        camera.set_aspect(f32::INFINITY);
        assert_eq!(camera.aspect, 2.0);
    }

    #[test]
    fn test_target_projects_to_screen_center() {
        let camera = PerspectiveCamera::from_config(&RenderConfig::default());
        let clip = camera.view_proj() * camera.target.extend(1.0);
        let ndc = clip.truncate() / clip.w;
        assert!(ndc.x.abs() < 1e-5 && ndc.y.abs() < 1e-5);
        assert!(ndc.z > 0.0 && ndc.z < 1.0);
    }

    #[test]
    fn test_basis_is_orthonormal_and_level() {
        let camera = PerspectiveCamera::from_config(&RenderConfig::default());
        let (right, up) = camera.basis();
        assert!((right.length() - 1.0).abs() < 1e-5);
        assert!((up.length() - 1.0).abs() < 1e-5);
        assert!(right.dot(up).abs() < 1e-5);
        // No roll: right vector stays horizontal
        assert!(right.y.abs() < 1e-5);
    }
}
