//! The tuning panel: one slider per shader parameter, color pickers and a readout.

use crate::params::controls::{
    SliderControl, COLOR_CONTROLS, SCENE_CONTROLS, SMALL_ITERATIONS_LABEL, SMALL_WAVE_CONTROLS,
    WAVE_CONTROLS,
};
use crate::params::{Rgb, WaterParams};
use crate::scene::Scene;

/// Values shown read-only at the bottom of the panel
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Readout {
    /// Seconds spent on the previous frame
    pub frame_dt: f32,
    pub target_elevation: f32,
}

/// Floating panel window, collapsed unless `expanded`
#[derive(Debug, Clone)]
pub struct Panel {
    pub title: String,
    pub expanded: bool,
}

impl Panel {
    pub fn new(title: impl Into<String>, expanded: bool) -> Self {
        Self {
            title: title.into(),
            expanded,
        }
    }

    /// Draw the panel. Returns true if any parameter was edited this frame.
    pub fn show(&self, ctx: &egui::Context, scene: &mut Scene, readout: &Readout) -> bool {
        let mut changed = false;

        egui::Window::new(self.title.as_str())
            .default_open(self.expanded)
            .resizable(false)
            .default_width(320.0)
            .anchor(egui::Align2::RIGHT_TOP, [-8.0, 8.0])
            .show(ctx, |ui| {
                egui::CollapsingHeader::new("Waves")
                    .default_open(true)
                    .show(ui, |ui| {
                        changed |= sliders(ui, &WAVE_CONTROLS, &mut scene.water);
                    });

                egui::CollapsingHeader::new("Small waves")
                    .default_open(true)
                    .show(ui, |ui| {
                        changed |= sliders(ui, &SMALL_WAVE_CONTROLS, &mut scene.water);
                        changed |= ui
                            .add(
                                egui::Slider::new(
                                    &mut scene.water.small_iterations,
                                    0..=WaterParams::MAX_SMALL_ITERATIONS,
                                )
                                .text(SMALL_ITERATIONS_LABEL),
                            )
                            .changed();
                    });

                egui::CollapsingHeader::new("Colors")
                    .default_open(true)
                    .show(ui, |ui| {
                        changed |= color_row(ui, "crestColor", &mut scene.water.crest_color);
                        changed |= color_row(ui, "troughColor", &mut scene.water.trough_color);
                        changed |= sliders(ui, &COLOR_CONTROLS, &mut scene.water);
                    });

                egui::CollapsingHeader::new("Scene")
                    .default_open(false)
                    .show(ui, |ui| {
                        changed |= color_row(ui, "background", &mut scene.scene.background);
                        changed |= color_row(ui, "fogColor", &mut scene.scene.fog_color);
                        changed |= sliders(ui, &SCENE_CONTROLS, &mut scene.scene);
                    });

                ui.separator();
                ui.label(format!(
                    "frame {:.2} ms ({:.0} fps)",
                    readout.frame_dt * 1000.0,
                    fps(readout.frame_dt)
                ));
                ui.label(format!("elevation @ target {:+.3}", readout.target_elevation));
            });

        changed
    }
}

fn sliders<T>(ui: &mut egui::Ui, controls: &[SliderControl<T>], target: &mut T) -> bool {
    let mut changed = false;
    for control in controls {
        let value = (control.field)(target);
        let step = control.step;
        let range = control.min as f64..=control.max as f64;
        ui.add(
            egui::Slider::from_get_set(range, |new| {
                // Step snapping runs in f64 every frame and can nudge an untouched
                // f32 by an ulp; only a move of at least half a step is an edit.
                if let Some(new) = new {
                    let new = new as f32;
                    if (new - *value).abs() >= step * 0.5 {
                        *value = new;
                        changed = true;
                    }
                }
                *value as f64
            })
            .step_by(step as f64)
            .text(control.label),
        );
    }
    changed
}

fn color_row(ui: &mut egui::Ui, label: &str, color: &mut Rgb) -> bool {
    ui.horizontal(|ui| {
        ui.label(label);
        ui.color_edit_button_srgb(&mut color.0).changed()
    })
    .inner
}

fn fps(dt: f32) -> f32 {
    if dt > 0.0 {
        1.0 / dt
    } else {
        0.0
    }
}
