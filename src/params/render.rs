//! Window, camera and renderer configuration.

use serde::{Deserialize, Serialize};

/// Rendering configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    /// Window width (logical pixels)
    pub window_width: u32,

    /// Window height (logical pixels)
    pub window_height: u32,

    /// Vertical field of view (degrees)
    pub fov_degrees: f32,

    /// Near clipping plane (scene units)
    pub near_plane: f32,

    /// Far clipping plane (scene units)
    pub far_plane: f32,

    /// Initial camera position
    pub camera_position: [f32; 3],

    /// Point the orbit controls circle around
    pub camera_target: [f32; 3],

    /// Upper bound on render pixels per logical pixel
    /// High-DPI screens above this render at reduced resolution and get upscaled
    pub max_pixel_ratio: f32,

    /// Plane width and depth (scene units)
    pub plane_size: f32,

    /// Plane subdivisions per side
    pub plane_segments: u32,

    /// Wait for vertical blank when presenting
    pub vsync: bool,

    /// Smooth out orbit motion after the pointer is released
    pub damping: bool,

    /// Fraction of the pending orbit motion applied per frame
    pub damping_factor: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            window_width: 1280,
            window_height: 720,
            fov_degrees: 75.0,
            near_plane: 0.1,
            far_plane: 100.0,
            camera_position: [1.0, 1.0, 1.0],
            camera_target: [0.0, 0.0, 0.0],
            max_pixel_ratio: 2.0,
            plane_size: 2.0,
            plane_segments: 512,
            vsync: true,
            damping: true,
            damping_factor: 0.05,
        }
    }
}

impl RenderConfig {
    /// Largest accepted `plane_segments` (keeps the index buffer in the tens of MB)
    pub const MAX_PLANE_SEGMENTS: u32 = 1024;

    pub fn aspect_ratio(&self) -> f32 {
        self.window_width as f32 / self.window_height.max(1) as f32
    }

    pub fn present_mode(&self) -> wgpu::PresentMode {
        if self.vsync {
            wgpu::PresentMode::Fifo
        } else {
            wgpu::PresentMode::AutoNoVsync
        }
    }
}
