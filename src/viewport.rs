//! Window size bookkeeping: logical size, scale factor and capped render resolution.

use winit::dpi::{LogicalSize, PhysicalSize};

/// Current window geometry
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Viewport {
    /// Window size in physical pixels (what the surface is configured with)
    physical: PhysicalSize<u32>,

    /// OS scale factor (physical pixels per logical pixel)
    scale_factor: f64,

    /// Upper bound on render pixels per logical pixel
    max_pixel_ratio: f64,
}

impl Viewport {
    pub fn new(physical: PhysicalSize<u32>, scale_factor: f64, max_pixel_ratio: f32) -> Self {
        Self {
            physical,
            scale_factor: sanitize(scale_factor),
            max_pixel_ratio: sanitize(max_pixel_ratio as f64),
        }
    }

    pub fn resize(&mut self, physical: PhysicalSize<u32>) {
        self.physical = physical;
    }

    pub fn set_scale_factor(&mut self, scale_factor: f64) {
        self.scale_factor = sanitize(scale_factor);
    }

    pub fn scale_factor(&self) -> f64 {
        self.scale_factor
    }

    /// Minimized windows report a zero size; nothing can be rendered then
    pub fn is_empty(&self) -> bool {
        self.physical.width == 0 || self.physical.height == 0
    }

    pub fn surface_size(&self) -> PhysicalSize<u32> {
        self.physical
    }

    pub fn logical_size(&self) -> LogicalSize<f64> {
        self.physical.to_logical(self.scale_factor)
    }

    /// Render pixels per logical pixel
    pub fn pixel_ratio(&self) -> f64 {
        self.scale_factor.min(self.max_pixel_ratio)
    }

    /// Size of the offscreen scene target, at least 1x1.
    /// Equal to the surface size unless the pixel ratio is capped.
    pub fn render_size(&self) -> PhysicalSize<u32> {
        let ratio = self.pixel_ratio();
        if ratio >= self.scale_factor {
            return PhysicalSize::new(self.physical.width.max(1), self.physical.height.max(1));
        }
        let scale = ratio / self.scale_factor;
        let fit = |physical: u32| ((physical as f64 * scale).round() as u32).clamp(1, physical.max(1));
        PhysicalSize::new(fit(self.physical.width), fit(self.physical.height))
    }

    pub fn aspect(&self) -> f32 {
        if self.is_empty() {
            return 1.0;
        }
        self.physical.width as f32 / self.physical.height as f32
    }
}

fn sanitize(factor: f64) -> f64 {
    if factor.is_finite() && factor > 0.0 {
        factor
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixel_ratio_capped() {
        let retina = Viewport::new(PhysicalSize::new(2560, 1440), 2.0, 2.0);
        assert_eq!(retina.pixel_ratio(), 2.0);
        assert_eq!(retina.render_size(), PhysicalSize::new(2560, 1440));

        let dense = Viewport::new(PhysicalSize::new(3000, 1500), 3.0, 2.0);
        assert_eq!(dense.pixel_ratio(), 2.0);
        assert_eq!(dense.render_size(), PhysicalSize::new(2000, 1000));
    }

    #[test]
    fn test_low_dpi_renders_at_native_size() {
        let viewport = Viewport::new(PhysicalSize::new(1280, 720), 1.0, 2.0);
        assert_eq!(viewport.render_size(), PhysicalSize::new(1280, 720));
        assert!((viewport.aspect() - 16.0 / 9.0).abs() < 1e-6);
    }

    #[test]
    fn test_uncapped_fractional_scale_matches_surface() {
        for scale in [1.1, 1.25, 1.3, 1.5, 1.75] {
            for width in [500, 634, 1001, 1366, 1921, 2599] {
                let viewport = Viewport::new(PhysicalSize::new(width, 400), scale, 2.0);
                assert_eq!(
                    viewport.render_size(),
                    PhysicalSize::new(width, 400),
                    "scale {scale}, width {width}"
                );
            }
        }
    }

    #[test]
    fn test_capped_fractional_scale_rounds() {
        // 2.5x display capped to 2x: 1001 * 0.8 = 800.8
        let viewport = Viewport::new(PhysicalSize::new(1001, 500), 2.5, 2.0);
        assert_eq!(viewport.render_size(), PhysicalSize::new(801, 400));
    }

    #[test]
    fn test_resize_updates_aspect() {
        let mut viewport = Viewport::new(PhysicalSize::new(800, 800), 1.0, 2.0);
        assert_eq!(viewport.aspect(), 1.0);
        viewport.resize(PhysicalSize::new(1600, 800));
        assert_eq!(viewport.aspect(), 2.0);
    }

    #[test]
    fn test_minimized_window() {
        let viewport = Viewport::new(PhysicalSize::new(0, 0), 1.0, 2.0);
        assert!(viewport.is_empty());
        assert_eq!(viewport.aspect(), 1.0);
        assert_eq!(viewport.render_size(), PhysicalSize::new(1, 1));
    }

    #[test]
    fn test_invalid_scale_factor_falls_back() {
        let mut viewport = Viewport::new(PhysicalSize::new(100, 100), f64::NAN, 2.0);
        assert_eq!(viewport.scale_factor(), 1.0);
        viewport.set_scale_factor(-3.0);
        assert_eq!(viewport.scale_factor(), 1.0);
        viewport.set_scale_factor(1.5);
        assert_eq!(viewport.pixel_ratio(), 1.5);
    }
}
