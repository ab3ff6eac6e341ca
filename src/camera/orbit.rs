//! Orbit controls: mouse-driven rotate, pan and dolly around a target, with damping.
//!
//! Pending motion is accumulated by input handlers and consumed by `update`,
//! which runs once per frame. With damping on, `update` applies a fraction of
//! the pending rotation and pan each frame so the camera glides to a stop.

use std::f32::consts::{PI, TAU};

use glam::{Vec2, Vec3};

use super::perspective::PerspectiveCamera;
use crate::params::RenderConfig;

/// Keeps the polar angle away from the poles where `look_at` degenerates
const POLE_EPSILON: f32 = 1e-6;

/// Motion below this is not reported as a camera change
const CHANGE_EPSILON: f32 = 1e-6;

/// Per-notch dolly factor at zoom speed 1
const DOLLY_BASE: f32 = 0.95;

/// What a held pointer button does while dragging
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragAction {
    Rotate,
    Pan,
}

#[derive(Debug, Clone, Copy)]
struct Drag {
    action: DragAction,
    last: Vec2,
}

/// Spherical coordinates around the Y axis (theta: azimuth from +Z, phi: polar from +Y)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct Spherical {
    radius: f32,
    theta: f32,
    phi: f32,
}

impl Spherical {
    fn from_offset(offset: Vec3) -> Self {
        let radius = offset.length();
        if radius == 0.0 {
            return Self::default();
        }
        Self {
            radius,
            theta: offset.x.atan2(offset.z),
            phi: (offset.y / radius).clamp(-1.0, 1.0).acos(),
        }
    }

    fn to_offset(self) -> Vec3 {
        let sin_phi_radius = self.phi.sin() * self.radius;
        Vec3::new(
            sin_phi_radius * self.theta.sin(),
            self.phi.cos() * self.radius,
            sin_phi_radius * self.theta.cos(),
        )
    }
}

/// Orbit camera controller
#[derive(Debug, Clone)]
pub struct OrbitControls {
    pub target: Vec3,

    pub enable_damping: bool,
    pub damping_factor: f32,

    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,

    pub min_distance: f32,
    pub max_distance: f32,

    /// Polar angle limits (radians from +Y)
    pub min_polar_angle: f32,
    pub max_polar_angle: f32,

    // Pending motion
    spherical_delta: Spherical,
    pan_offset: Vec3,
    scale: f32,

    drag: Option<Drag>,
}

impl OrbitControls {
    pub fn new(target: Vec3) -> Self {
        Self {
            target,
            enable_damping: false,
            damping_factor: 0.05,
            rotate_speed: 1.0,
            zoom_speed: 1.0,
            pan_speed: 1.0,
            min_distance: 0.0,
            max_distance: f32::INFINITY,
            min_polar_angle: 0.0,
            max_polar_angle: PI,
            spherical_delta: Spherical::default(),
            pan_offset: Vec3::ZERO,
            scale: 1.0,
            drag: None,
        }
    }

    pub fn from_config(config: &RenderConfig) -> Self {
        Self {
            enable_damping: config.damping,
            damping_factor: config.damping_factor.clamp(0.0, 1.0),
            ..Self::new(Vec3::from_array(config.camera_target))
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Start a drag at pointer position `at` (logical pixels)
    pub fn pointer_down(&mut self, action: DragAction, at: Vec2) {
        self.drag = Some(Drag { action, last: at });
    }

    pub fn pointer_up(&mut self) {
        self.drag = None;
    }

    /// Feed a pointer move; rotates or pans when a drag is active
    pub fn pointer_move(&mut self, at: Vec2, viewport_height: f32, camera: &PerspectiveCamera) {
        let Some(drag) = self.drag.as_mut() else {
            return;
        };
        let delta = at - drag.last;
        drag.last = at;

        match drag.action {
            DragAction::Rotate => self.rotate(delta.x, delta.y, viewport_height),
            DragAction::Pan => self.pan(delta.x, delta.y, viewport_height, camera),
        }
    }

    /// Queue a rotation from a pointer delta. A drag across the full viewport
    /// height turns the camera once around.
    pub fn rotate(&mut self, dx: f32, dy: f32, viewport_height: f32) {
        if viewport_height <= 0.0 {
            return;
        }
        self.spherical_delta.theta -= TAU * dx / viewport_height * self.rotate_speed;
        self.spherical_delta.phi -= TAU * dy / viewport_height * self.rotate_speed;
    }

    /// Queue a screen-space pan so the point under the cursor follows it
    pub fn pan(&mut self, dx: f32, dy: f32, viewport_height: f32, camera: &PerspectiveCamera) {
        if viewport_height <= 0.0 {
            return;
        }
        // Half the visible height at the target distance
        let target_distance = (camera.position - self.target).length() * (camera.fov_y / 2.0).tan();
        let (right, up) = camera.basis();

        let left = -right * (2.0 * dx * target_distance / viewport_height);
        let upward = up * (2.0 * dy * target_distance / viewport_height);
        self.pan_offset += (left + upward) * self.pan_speed;
    }

    /// Queue a dolly. Positive steps move towards the target.
    pub fn dolly(&mut self, steps: f32) {
        self.scale *= DOLLY_BASE.powf(self.zoom_speed * steps);
    }

    /// Apply pending motion to the camera. Returns true when the camera moved.
    pub fn update(&mut self, camera: &mut PerspectiveCamera) -> bool {
        let last_position = camera.position;
        let last_target = self.target;

        let mut spherical = Spherical::from_offset(camera.position - self.target);

        let factor = if self.enable_damping {
            self.damping_factor
        } else {
            1.0
        };

        spherical.theta += self.spherical_delta.theta * factor;
        spherical.phi += self.spherical_delta.phi * factor;
        spherical.phi = spherical
            .phi
            .clamp(self.min_polar_angle, self.max_polar_angle)
            .clamp(POLE_EPSILON, PI - POLE_EPSILON);

        spherical.radius = (spherical.radius * self.scale).clamp(self.min_distance, self.max_distance);

        self.target += self.pan_offset * factor;

        camera.position = self.target + spherical.to_offset();
        camera.target = self.target;

        if self.enable_damping {
            let decay = 1.0 - self.damping_factor;
            self.spherical_delta.theta *= decay;
            self.spherical_delta.phi *= decay;
            self.pan_offset *= decay;
        } else {
            self.spherical_delta = Spherical::default();
            self.pan_offset = Vec3::ZERO;
        }
        self.scale = 1.0;

        camera.position.distance_squared(last_position) > CHANGE_EPSILON
            || self.target.distance_squared(last_target) > CHANGE_EPSILON
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup(damping: bool) -> (OrbitControls, PerspectiveCamera) {
        let config = RenderConfig {
            damping,
            ..Default::default()
        };
        (
            OrbitControls::from_config(&config),
            PerspectiveCamera::from_config(&config),
        )
    }

    fn radius(controls: &OrbitControls, camera: &PerspectiveCamera) -> f32 {
        (camera.position - controls.target).length()
    }

    #[test]
    fn test_update_without_input_keeps_camera() {
        let (mut controls, mut camera) = setup(true);
        let before = camera.position;
        assert!(!controls.update(&mut camera));
        assert!(camera.position.distance(before) < 1e-5);
    }

    #[test]
    fn test_rotation_preserves_radius() {
        let (mut controls, mut camera) = setup(false);
        let r0 = radius(&controls, &camera);
        controls.rotate(120.0, 35.0, 720.0);
        assert!(controls.update(&mut camera));
        assert!((radius(&controls, &camera) - r0).abs() < 1e-5);
    }

    #[test]
    fn test_full_height_drag_is_full_turn() {
        let (mut controls, mut camera) = setup(false);
        let before = camera.position;
        controls.rotate(720.0, 0.0, 720.0);
        controls.update(&mut camera);
        assert!(camera.position.distance(before) < 1e-4);
    }

    #[test]
    fn test_polar_angle_clamped() {
        let (mut controls, mut camera) = setup(false);
        controls.max_polar_angle = PI / 2.0;

        // Drag far downwards: tries to swing below the horizon
        controls.rotate(0.0, -5000.0, 720.0);
        controls.update(&mut camera);
        assert!(camera.position.y >= controls.target.y - 1e-5);

        // Drag far upwards: stops just short of the pole
        controls.rotate(0.0, 5000.0, 720.0);
        controls.update(&mut camera);
        let offset = camera.position - controls.target;
        assert!(offset.x.abs() + offset.z.abs() > 0.0);
        assert!(camera.position.is_finite());
    }

    #[test]
    fn test_dolly_scales_radius() {
        let (mut controls, mut camera) = setup(false);
        let r0 = radius(&controls, &camera);

        controls.dolly(1.0);
        controls.update(&mut camera);
        assert!((radius(&controls, &camera) - r0 * 0.95).abs() < 1e-5);

        controls.dolly(-2.0);
        controls.update(&mut camera);
        let expected = r0 * 0.95 / (0.95 * 0.95);
        assert!((radius(&controls, &camera) - expected).abs() < 1e-4);
    }

    #[test]
    fn test_distance_limits() {
        let (mut controls, mut camera) = setup(false);
        controls.min_distance = 1.0;
        controls.max_distance = 3.0;

        controls.dolly(100.0);
        controls.update(&mut camera);
        assert!((radius(&controls, &camera) - 1.0).abs() < 1e-5);

        controls.dolly(-100.0);
        controls.update(&mut camera);
        assert!((radius(&controls, &camera) - 3.0).abs() < 1e-5);
    }

    #[test]
    fn test_damping_spreads_motion_over_frames() {
        let (mut damped, mut damped_camera) = setup(true);
        let (mut direct, mut direct_camera) = setup(false);

        damped.rotate(90.0, 0.0, 720.0);
        direct.rotate(90.0, 0.0, 720.0);
        direct.update(&mut direct_camera);

        // First frame only moves part of the way
        damped.update(&mut damped_camera);
        assert!(damped_camera.position.distance(direct_camera.position) > 1e-3);

        // Converges to the undamped result
        for _ in 0..600 {
            damped.update(&mut damped_camera);
        }
        assert!(damped_camera.position.distance(direct_camera.position) < 1e-3);
        assert!(!damped.update(&mut damped_camera));
    }

    #[test]
    fn test_pan_moves_target_and_camera_together() {
        let (mut controls, mut camera) = setup(false);
        let offset_before = camera.position - controls.target;

        let snapshot = camera.clone();
        controls.pan(50.0, -20.0, 720.0, &snapshot);
        assert!(controls.update(&mut camera));

        assert!(controls.target.length() > 0.0);
        assert!((camera.position - controls.target).distance(offset_before) < 1e-5);
        assert_eq!(camera.target, controls.target);
    }

    #[test]
    fn test_pointer_drag_routes_to_action() {
        let (mut controls, mut camera) = setup(false);
        let start = camera.position;
        let snapshot = camera.clone();

        // Moves without a held button are ignored
        controls.pointer_move(Vec2::new(10.0, 10.0), 720.0, &snapshot);
        assert!(!controls.update(&mut camera));

        controls.pointer_down(DragAction::Rotate, Vec2::new(100.0, 100.0));
        assert!(controls.is_dragging());
        controls.pointer_move(Vec2::new(160.0, 100.0), 720.0, &snapshot);
        controls.pointer_up();
        assert!(!controls.is_dragging());

        assert!(controls.update(&mut camera));
        assert!(camera.position.distance(start) > 1e-3);
        assert_eq!(controls.target, Vec3::ZERO);
    }

    #[test]
    fn test_zero_height_viewport_ignored() {
        let (mut controls, mut camera) = setup(false);
        let snapshot = camera.clone();
        controls.rotate(10.0, 10.0, 0.0);
        controls.pan(10.0, 10.0, 0.0, &snapshot);
        assert!(!controls.update(&mut camera));
    }
}
