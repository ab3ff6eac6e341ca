//! Startup settings: TOML file with defaults for every missing key.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::params::controls::{water_controls, SliderControl, SCENE_CONTROLS};
use crate::params::{RenderConfig, SceneParams, WaterParams};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("{field} = {value} is outside {min}..={max}")]
    OutOfRange {
        field: String,
        value: f32,
        min: f32,
        max: f32,
    },

    #[error("invalid {field}: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Panel window settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PanelConfig {
    pub title: String,

    /// Start with the panel open
    pub expanded: bool,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            title: "pane".to_string(),
            expanded: false,
        }
    }
}

/// Everything read at startup
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub render: RenderConfig,
    pub water: WaterParams,
    pub scene: SceneParams,
    pub panel: PanelConfig,
}

impl Settings {
    /// Read, parse and validate a TOML config file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_toml(&text)?;
        log::info!("Loaded config from {}", path.display());
        Ok(settings)
    }

    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let settings: Settings = toml::from_str(text)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let render = &self.render;

        if render.window_width == 0 || render.window_height == 0 {
            return Err(invalid("render.window_width/window_height", "must be positive"));
        }
        if !(render.near_plane > 0.0 && render.near_plane < render.far_plane) {
            return Err(invalid(
                "render.near_plane/far_plane",
                "expected 0 < near_plane < far_plane",
            ));
        }
        if !(render.fov_degrees > 0.0 && render.fov_degrees < 180.0) {
            return Err(invalid("render.fov_degrees", "expected 0 < fov_degrees < 180"));
        }
        if render.plane_segments == 0 || render.plane_segments > RenderConfig::MAX_PLANE_SEGMENTS {
            return Err(ConfigError::OutOfRange {
                field: "render.plane_segments".to_string(),
                value: render.plane_segments as f32,
                min: 1.0,
                max: RenderConfig::MAX_PLANE_SEGMENTS as f32,
            });
        }
        if !(render.plane_size > 0.0 && render.plane_size.is_finite()) {
            return Err(invalid("render.plane_size", "must be positive"));
        }
        if !(render.max_pixel_ratio > 0.0 && render.max_pixel_ratio.is_finite()) {
            return Err(invalid("render.max_pixel_ratio", "must be positive"));
        }
        if !(0.0..=1.0).contains(&render.damping_factor) {
            return Err(ConfigError::OutOfRange {
                field: "render.damping_factor".to_string(),
                value: render.damping_factor,
                min: 0.0,
                max: 1.0,
            });
        }
        let finite = |v: [f32; 3]| v.iter().all(|c| c.is_finite());
        if !finite(render.camera_position) || !finite(render.camera_target) {
            return Err(invalid("render.camera_position/camera_target", "must be finite"));
        }

        check_controls("water", water_controls(), &self.water)?;
        if self.water.small_iterations > WaterParams::MAX_SMALL_ITERATIONS {
            return Err(ConfigError::OutOfRange {
                field: "water.small_iterations".to_string(),
                value: self.water.small_iterations as f32,
                min: 0.0,
                max: WaterParams::MAX_SMALL_ITERATIONS as f32,
            });
        }

        check_controls("scene", SCENE_CONTROLS.iter(), &self.scene)?;
        if !finite(self.scene.light_direction) {
            return Err(invalid("scene.light_direction", "must be finite"));
        }

        Ok(())
    }
}

fn invalid(field: &'static str, reason: &'static str) -> ConfigError {
    ConfigError::Invalid { field, reason }
}

/// Every slider-backed value must be reachable with its slider
fn check_controls<'a, T: Clone + 'a>(
    section: &str,
    controls: impl Iterator<Item = &'a SliderControl<T>>,
    target: &T,
) -> Result<(), ConfigError> {
    for control in controls {
        let value = control.get(target);
        if !control.contains(value) {
            return Err(ConfigError::OutOfRange {
                field: format!("{section}.{}", control.label),
                value,
                min: control.min,
                max: control.max,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::Rgb;

    #[test]
    fn test_defaults_validate() {
        assert!(Settings::default().validate().is_ok());
    }

    #[test]
    fn test_empty_file_is_defaults() {
        let settings = Settings::from_toml("").unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.panel.title, "pane");
        assert!(!settings.panel.expanded);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let settings = Settings::from_toml(
            r##"
            [water]
            wave_elevation = 0.5
            crest_color = "#ff8800"

            [panel]
            expanded = true
            "##,
        )
        .unwrap();

        assert_eq!(settings.water.wave_elevation, 0.5);
        assert_eq!(settings.water.crest_color, Rgb::new(0xff, 0x88, 0x00));
        assert_eq!(settings.water.wave_frequency, WaterParams::default().wave_frequency);
        assert!(settings.panel.expanded);
        assert_eq!(settings.render, RenderConfig::default());
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = Settings::from_toml("[water]\nwave_height = 1.0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_bad_color_rejected() {
        let err = Settings::from_toml("[scene]\nfog_color = \"blue\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().contains("blue"));
    }

    #[test]
    fn test_slider_range_enforced() {
        let err = Settings::from_toml("[water]\nwave_elevation = 3.0\n").unwrap_err();
        match err {
            ConfigError::OutOfRange { field, max, .. } => {
                assert_eq!(field, "water.uWaveElevation");
                assert_eq!(max, 1.0);
            }
            other => panic!("unexpected error: {other}"),
        }

        let err = Settings::from_toml("[scene]\nlight_intensity = -0.5\n").unwrap_err();
        assert!(matches!(err, ConfigError::OutOfRange { .. }));
    }

    #[test]
    fn test_iterations_capped() {
        let err = Settings::from_toml("[water]\nsmall_iterations = 6\n").unwrap_err();
        assert!(matches!(err, ConfigError::OutOfRange { .. }));
        assert!(Settings::from_toml("[water]\nsmall_iterations = 5\n").is_ok());
    }

    #[test]
    fn test_render_limits() {
        let cases = [
            "[render]\nwindow_width = 0\n",
            "[render]\nnear_plane = 0.0\n",
            "[render]\nnear_plane = 200.0\n",
            "[render]\nfov_degrees = 180.0\n",
            "[render]\nplane_segments = 0\n",
            "[render]\nplane_segments = 2048\n",
            "[render]\nmax_pixel_ratio = 0.0\n",
            "[render]\ndamping_factor = 1.5\n",
        ];
        for case in cases {
            assert!(Settings::from_toml(case).is_err(), "accepted: {case}");
        }
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = Settings::load(Path::new("/nonexistent/raging-sea.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_settings_serialize_back() {
        let text = toml::to_string(&Settings::default()).unwrap();
        assert_eq!(Settings::from_toml(&text).unwrap(), Settings::default());
    }
}
