//! Slider bindings: panel label, range and step for every tunable scalar.
//!
//! The same tables drive the debug panel and config validation, so a value
//! accepted from a config file is always reachable with the panel.

use std::ops::RangeInclusive;

use super::scene::SceneParams;
use super::water::WaterParams;

/// A scalar field of `T` exposed as a slider
pub struct SliderControl<T> {
    pub label: &'static str,
    pub min: f32,
    pub max: f32,
    pub step: f32,
    pub field: fn(&mut T) -> &mut f32,
}

impl<T> SliderControl<T> {
    pub fn range(&self) -> RangeInclusive<f32> {
        self.min..=self.max
    }

    pub fn contains(&self, value: f32) -> bool {
        self.range().contains(&value)
    }

    /// Read the bound value
    pub fn get(&self, target: &T) -> f32
    where
        T: Clone,
    {
        let mut copy = target.clone();
        *(self.field)(&mut copy)
    }
}

const fn water(
    label: &'static str,
    min: f32,
    max: f32,
    step: f32,
    field: fn(&mut WaterParams) -> &mut f32,
) -> SliderControl<WaterParams> {
    SliderControl {
        label,
        min,
        max,
        step,
        field,
    }
}

const fn scene(
    label: &'static str,
    min: f32,
    max: f32,
    step: f32,
    field: fn(&mut SceneParams) -> &mut f32,
) -> SliderControl<SceneParams> {
    SliderControl {
        label,
        min,
        max,
        step,
        field,
    }
}

/// Big-wave controls
pub static WAVE_CONTROLS: [SliderControl<WaterParams>; 5] = [
    water("uWaveElevation", 0.01, 1.0, 0.01, |w| &mut w.wave_elevation),
    water("uWaveFrequencyX", 0.0, 10.0, 0.01, |w| &mut w.wave_frequency[0]),
    water("uWaveFrequencyZ", 0.0, 10.0, 0.01, |w| &mut w.wave_frequency[1]),
    water("uWaveSpeedX", 0.0, 10.0, 0.01, |w| &mut w.wave_speed[0]),
    water("uWaveSpeedZ", 0.0, 10.0, 0.01, |w| &mut w.wave_speed[1]),
];

/// Trough-to-crest blend controls
pub static COLOR_CONTROLS: [SliderControl<WaterParams>; 2] = [
    water("uColorDifference", 0.0, 10.0, 0.01, |w| &mut w.color_difference),
    water("uColorOffset", 0.0, 1.0, 0.01, |w| &mut w.color_offset),
];

/// Small-wave controls (the iteration count is an integer slider of its own)
pub static SMALL_WAVE_CONTROLS: [SliderControl<WaterParams>; 3] = [
    water("uSmallWavesElevation", 0.0, 1.0, 0.001, |w| {
        &mut w.small_waves_elevation
    }),
    water("uSmallWavesFrequency", 0.0, 30.0, 0.001, |w| {
        &mut w.small_waves_frequency
    }),
    water("uSmallWavesSpeed", 0.0, 4.0, 0.001, |w| &mut w.small_waves_speed),
];

pub const SMALL_ITERATIONS_LABEL: &str = "uSmallIterations";

/// Fog and light controls
pub static SCENE_CONTROLS: [SliderControl<SceneParams>; 3] = [
    scene("fogNear", 0.0, 10.0, 0.01, |s| &mut s.fog_near),
    scene("fogFar", 0.0, 20.0, 0.01, |s| &mut s.fog_far),
    scene("lightIntensity", 0.0, 1.0, 0.01, |s| &mut s.light_intensity),
];

/// Every scalar water control, in panel order
pub fn water_controls() -> impl Iterator<Item = &'static SliderControl<WaterParams>> {
    WAVE_CONTROLS
        .iter()
        .chain(SMALL_WAVE_CONTROLS.iter())
        .chain(COLOR_CONTROLS.iter())
}
