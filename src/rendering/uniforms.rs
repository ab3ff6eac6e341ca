//! Uniform buffer layouts shared with the WGSL shaders.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

use crate::params::{SceneParams, WaterParams};

/// Uniform buffer for the water shaders (`WaterUniforms` in `water_common.wgsl`)
///
/// Fields are grouped so every vec3 shares its 16-byte slot with a scalar.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct WaterUniforms {
    pub view_proj: [[f32; 4]; 4],

    pub camera_position: [f32; 3],
    pub time: f32,

    pub wave_frequency: [f32; 2],
    pub wave_speed: [f32; 2],

    pub crest_color: [f32; 3],
    pub wave_elevation: f32,

    pub trough_color: [f32; 3],
    pub color_difference: f32,

    pub fog_color: [f32; 3],
    pub color_offset: f32,

    pub light_direction: [f32; 3],
    pub light_intensity: f32,

    pub small_waves_elevation: f32,
    pub small_waves_frequency: f32,
    pub small_waves_speed: f32,
    pub small_iterations: u32,

    pub fog_near: f32,
    pub fog_far: f32,
    pub _padding: [f32; 2],
}

impl WaterUniforms {
    /// Byte size of the WGSL struct
    pub const SIZE: usize = 192;

    pub fn new(
        view_proj: Mat4,
        camera_position: Vec3,
        time_s: f32,
        water: &WaterParams,
        scene: &SceneParams,
    ) -> Self {
        Self {
            view_proj: view_proj.to_cols_array_2d(),
            camera_position: camera_position.to_array(),
            time: time_s,
            wave_frequency: water.wave_frequency,
            wave_speed: water.wave_speed,
            crest_color: water.crest_color.to_linear(),
            wave_elevation: water.wave_elevation,
            trough_color: water.trough_color.to_linear(),
            color_difference: water.color_difference,
            fog_color: scene.fog_color.to_linear(),
            color_offset: water.color_offset,
            light_direction: scene.light_dir().to_array(),
            light_intensity: scene.light_intensity,
            small_waves_elevation: water.small_waves_elevation,
            small_waves_frequency: water.small_waves_frequency,
            small_waves_speed: water.small_waves_speed,
            small_iterations: water
                .small_iterations
                .min(WaterParams::MAX_SMALL_ITERATIONS),
            fog_near: scene.fog_near,
            fog_far: scene.fog_far,
            _padding: [0.0; 2],
        }
    }
}

impl Default for WaterUniforms {
    fn default() -> Self {
        Self::new(
            Mat4::IDENTITY,
            Vec3::ZERO,
            0.0,
            &WaterParams::default(),
            &SceneParams::default(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem::{offset_of, size_of};

    #[test]
    fn test_layout_matches_wgsl() {
        assert_eq!(size_of::<WaterUniforms>(), WaterUniforms::SIZE);
        assert_eq!(size_of::<WaterUniforms>() % 16, 0);

        // vec3 members start on 16-byte boundaries
        assert_eq!(offset_of!(WaterUniforms, camera_position), 64);
        assert_eq!(offset_of!(WaterUniforms, wave_frequency), 80);
        assert_eq!(offset_of!(WaterUniforms, crest_color), 96);
        assert_eq!(offset_of!(WaterUniforms, trough_color), 112);
        assert_eq!(offset_of!(WaterUniforms, fog_color), 128);
        assert_eq!(offset_of!(WaterUniforms, light_direction), 144);
        assert_eq!(offset_of!(WaterUniforms, small_waves_elevation), 160);
        assert_eq!(offset_of!(WaterUniforms, fog_near), 176);
    }

    #[test]
    fn test_colors_written_linear() {
        let uniforms = WaterUniforms::default();
        let water = WaterParams::default();
        assert_eq!(uniforms.crest_color, water.crest_color.to_linear());
        assert_eq!(uniforms.trough_color, [0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_light_direction_normalized() {
        let scene = SceneParams {
            light_direction: [0.0, 4.0, 0.0],
            ..Default::default()
        };
        let uniforms = WaterUniforms::new(
            Mat4::IDENTITY,
            Vec3::ZERO,
            0.0,
            &WaterParams::default(),
            &scene,
        );
        assert_eq!(uniforms.light_direction, [0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_iterations_capped() {
        let water = WaterParams {
            small_iterations: 99,
            ..Default::default()
        };
        let uniforms = WaterUniforms::new(
            Mat4::IDENTITY,
            Vec3::ZERO,
            1.5,
            &water,
            &SceneParams::default(),
        );
        assert_eq!(uniforms.small_iterations, WaterParams::MAX_SMALL_ITERATIONS);
        assert_eq!(uniforms.time, 1.5);
    }
}
