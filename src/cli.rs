//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;

use crate::config::{ConfigError, Settings};

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "raging-sea")]
#[command(about = "Animated ocean surface with a live tuning panel", long_about = None)]
pub struct Args {
    /// TOML settings file ([render], [water], [scene], [panel])
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Window width (logical pixels)
    #[arg(long, value_name = "PIXELS")]
    pub width: Option<u32>,

    /// Window height (logical pixels)
    #[arg(long, value_name = "PIXELS")]
    pub height: Option<u32>,

    /// Grid subdivisions per side of the water plane
    #[arg(long, value_name = "N")]
    pub segments: Option<u32>,

    /// Cap on render pixels per logical pixel
    #[arg(long, value_name = "RATIO")]
    pub max_pixel_ratio: Option<f32>,

    /// Start with the tuning panel open
    #[arg(long)]
    pub expanded: bool,

    /// Present without waiting for vertical sync
    #[arg(long)]
    pub no_vsync: bool,

    /// Log filter (env_logger syntax), overrides RUST_LOG
    #[arg(long, value_name = "FILTER")]
    pub log: Option<String>,
}

impl Args {
    /// Load the config file (or defaults), apply flag overrides and validate
    pub fn load_settings(&self) -> Result<Settings, ConfigError> {
        let mut settings = match &self.config {
            Some(path) => Settings::load(path)?,
            None => Settings::default(),
        };
        self.apply(&mut settings);
        settings.validate()?;
        Ok(settings)
    }

    fn apply(&self, settings: &mut Settings) {
        let render = &mut settings.render;
        if let Some(width) = self.width {
            render.window_width = width;
        }
        if let Some(height) = self.height {
            render.window_height = height;
        }
        if let Some(segments) = self.segments {
            render.plane_segments = segments;
        }
        if let Some(ratio) = self.max_pixel_ratio {
            render.max_pixel_ratio = ratio;
        }
        if self.no_vsync {
            render.vsync = false;
        }
        if self.expanded {
            settings.panel.expanded = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_flags_gives_defaults() {
        let args = Args::try_parse_from(["raging-sea"]).unwrap();
        assert_eq!(args.load_settings().unwrap(), Settings::default());
        assert!(args.log.is_none());
    }

    #[test]
    fn test_flags_override_settings() {
        let args = Args::try_parse_from([
            "raging-sea",
            "--width",
            "800",
            "--height",
            "600",
            "--segments",
            "128",
            "--max-pixel-ratio",
            "1",
            "--expanded",
            "--no-vsync",
            "--log",
            "debug",
        ])
        .unwrap();

        let settings = args.load_settings().unwrap();
        assert_eq!(settings.render.window_width, 800);
        assert_eq!(settings.render.window_height, 600);
        assert_eq!(settings.render.plane_segments, 128);
        assert_eq!(settings.render.max_pixel_ratio, 1.0);
        assert!(!settings.render.vsync);
        assert!(settings.panel.expanded);
        assert_eq!(args.log.as_deref(), Some("debug"));
    }

    #[test]
    fn test_overrides_are_validated() {
        let args = Args::try_parse_from(["raging-sea", "--segments", "0"]).unwrap();
        assert!(matches!(
            args.load_settings(),
            Err(ConfigError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_rejects_unknown_flag() {
        assert!(Args::try_parse_from(["raging-sea", "--record", "10"]).is_err());
    }
}
