//! Water material parameters (the tunable shader uniforms).

use serde::{Deserialize, Serialize};

use super::color::Rgb;

/// Water surface parameters
///
/// Big waves are a product of two sines across X and Z. Small waves are
/// layered octaves of classic Perlin noise carved out of the big waves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WaterParams {
    /// Height of the big waves (scene units)
    pub wave_elevation: f32,

    /// Spatial frequency of the big waves along X and Z (radians per unit)
    pub wave_frequency: [f32; 2],

    /// Phase speed of the big waves along X and Z (radians per second)
    pub wave_speed: [f32; 2],

    /// Color at the top of the waves
    pub crest_color: Rgb,

    /// Color at the bottom of the waves
    pub trough_color: Rgb,

    /// Multiplier applied to elevation before blending trough to crest
    pub color_difference: f32,

    /// Elevation bias applied before blending trough to crest
    pub color_offset: f32,

    /// Height of the first small-wave octave
    pub small_waves_elevation: f32,

    /// Spatial frequency of the first small-wave octave
    pub small_waves_frequency: f32,

    /// Time scale of the small-wave noise
    pub small_waves_speed: f32,

    /// Number of small-wave octaves
    pub small_iterations: u32,
}

impl Default for WaterParams {
    fn default() -> Self {
        Self {
            wave_elevation: 0.2,
            wave_frequency: [4.0, 1.5],
            wave_speed: [1.2, 1.0],
            crest_color: Rgb::new(0x88, 0x88, 0xff),
            trough_color: Rgb::new(0x00, 0x00, 0xff),
            color_difference: 2.0,
            color_offset: 0.25,
            small_waves_elevation: 0.15,
            small_waves_frequency: 3.0,
            small_waves_speed: 0.2,
            small_iterations: 4,
        }
    }
}

impl WaterParams {
    /// Upper bound on `small_iterations` (matches the shader loop bound)
    pub const MAX_SMALL_ITERATIONS: u32 = 5;
}
