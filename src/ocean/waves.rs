//! CPU mirror of the water shader math.
//!
//! `water_vertex.wgsl` and `water_fragment.wgsl` compute the same values per
//! vertex and per fragment. Keep the two in step.

use glam::Vec3;

use super::noise::classic_3d;
use crate::params::WaterParams;

/// Big waves: product of two travelling sines
pub fn big_waves(params: &WaterParams, x: f32, z: f32, time_s: f32) -> f32 {
    let [freq_x, freq_z] = params.wave_frequency;
    let [speed_x, speed_z] = params.wave_speed;

    (x * freq_x + time_s * speed_x).sin()
        * (z * freq_z + time_s * speed_z).sin()
        * params.wave_elevation
}

/// Small waves: `small_iterations` octaves of absolute noise, always <= 0
pub fn small_waves(params: &WaterParams, x: f32, z: f32, time_s: f32) -> f32 {
    let iterations = params
        .small_iterations
        .min(WaterParams::MAX_SMALL_ITERATIONS);

    (1..=iterations)
        .map(|i| {
            let i = i as f32;
            let frequency = params.small_waves_frequency * i;
            let n = classic_3d(Vec3::new(
                x * frequency,
                z * frequency,
                time_s * params.small_waves_speed,
            ));
            -(n * params.small_waves_elevation / i).abs()
        })
        .sum()
}

/// Surface height at world position (x, z)
pub fn elevation(params: &WaterParams, x: f32, z: f32, time_s: f32) -> f32 {
    big_waves(params, x, z, time_s) + small_waves(params, x, z, time_s)
}

/// Trough (0) to crest (1) blend factor for a given elevation.
/// Not clamped: high crests extrapolate past the crest color and wash out.
pub fn mix_strength(params: &WaterParams, elevation: f32) -> f32 {
    (elevation + params.color_offset) * params.color_difference
}

/// Linear RGB surface color before lighting and fog
pub fn surface_color(params: &WaterParams, elevation: f32) -> [f32; 3] {
    let trough = Vec3::from_array(params.trough_color.to_linear());
    let crest = Vec3::from_array(params.crest_color.to_linear());
    trough.lerp(crest, mix_strength(params, elevation)).to_array()
}
