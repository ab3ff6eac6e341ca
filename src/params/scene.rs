//! Scene-wide lighting, fog and background parameters.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::color::Rgb;

/// Background, fog and light settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SceneParams {
    /// Clear color behind the water
    pub background: Rgb,

    /// Color the surface fades into with distance
    pub fog_color: Rgb,

    /// View distance where fog starts (scene units)
    pub fog_near: f32,

    /// View distance where fog is opaque (scene units); `<= fog_near` disables fog
    pub fog_far: f32,

    /// Direction pointing towards the light (normalized on use)
    pub light_direction: [f32; 3],

    /// Blend between flat color (0) and fully lit lambert shading (1)
    pub light_intensity: f32,
}

impl Default for SceneParams {
    fn default() -> Self {
        Self {
            background: Rgb::new(0x0b, 0x10, 0x20),
            fog_color: Rgb::new(0x0b, 0x10, 0x20),
            fog_near: 1.0,
            fog_far: 6.0,
            light_direction: [1.0, 1.0, 0.5],
            light_intensity: 0.35,
        }
    }
}

impl SceneParams {
    /// Light direction as a unit vector, straight up if the stored vector is degenerate
    pub fn light_dir(&self) -> Vec3 {
        Vec3::from_array(self.light_direction)
            .try_normalize()
            .unwrap_or(Vec3::Y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_light_dir_normalized() {
        let scene = SceneParams::default();
        assert!((scene.light_dir().length() - 1.0).abs() < 1e-6);

        let degenerate = SceneParams {
            light_direction: [0.0; 3],
            ..Default::default()
        };
        assert_eq!(degenerate.light_dir(), Vec3::Y);
    }
}
