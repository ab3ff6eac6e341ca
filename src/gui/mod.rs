//! egui integration: input forwarding, per-frame panel run and painting over the scene.

mod panel;

use winit::event::WindowEvent;
use winit::window::Window;

use crate::rendering::Overlay;
use crate::scene::Scene;

pub use panel::{Panel, Readout};

/// Tessellated output of one egui pass, waiting to be painted
struct GuiFrame {
    paint_jobs: Vec<egui::ClippedPrimitive>,
    pixels_per_point: f32,
    size_in_pixels: [u32; 2],
}

impl GuiFrame {
    fn screen(&self) -> egui_wgpu::ScreenDescriptor {
        egui_wgpu::ScreenDescriptor {
            size_in_pixels: self.size_in_pixels,
            pixels_per_point: self.pixels_per_point,
        }
    }
}

/// Texture changes egui has emitted but the GPU has not seen yet.
///
/// Deltas from frames whose surface acquire failed are merged, not dropped,
/// so the font atlas from the first frame always reaches the renderer.
#[derive(Default)]
struct PendingTextures {
    delta: egui::TexturesDelta,
}

impl PendingTextures {
    fn push(&mut self, delta: egui::TexturesDelta) {
        self.delta.append(delta);
    }

    fn take(&mut self) -> egui::TexturesDelta {
        std::mem::take(&mut self.delta)
    }
}

/// egui context, winit input state and wgpu renderer for the panel
pub struct GuiLayer {
    ctx: egui::Context,
    state: egui_winit::State,
    renderer: egui_wgpu::Renderer,
    panel: Panel,
    frame: Option<GuiFrame>,
    textures: PendingTextures,
    // Freed after the frame that last used them has been painted
    pending_free: Vec<egui::TextureId>,
}

impl GuiLayer {
    pub fn new(
        window: &Window,
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        panel: Panel,
    ) -> Self {
        let ctx = egui::Context::default();
        let state = egui_winit::State::new(
            ctx.clone(),
            egui::ViewportId::ROOT,
            window,
            Some(window.scale_factor() as f32),
            None,
            Some(device.limits().max_texture_dimension_2d as usize),
        );
        let renderer = egui_wgpu::Renderer::new(device, surface_format, None, 1, false);

        log::debug!(
            "Panel '{}' ready ({})",
            panel.title,
            if panel.expanded { "expanded" } else { "collapsed" }
        );

        Self {
            ctx,
            state,
            renderer,
            panel,
            frame: None,
            textures: PendingTextures::default(),
            pending_free: Vec::new(),
        }
    }

    /// Feed a window event to egui. Returns true if egui consumed it.
    pub fn handle_event(&mut self, window: &Window, event: &WindowEvent) -> bool {
        self.state.on_window_event(window, event).consumed
    }

    /// Run the panel for this frame. Returns true if a parameter changed.
    pub fn run(&mut self, window: &Window, scene: &mut Scene, readout: &Readout) -> bool {
        for id in self.pending_free.drain(..) {
            self.renderer.free_texture(&id);
        }

        let raw_input = self.state.take_egui_input(window);
        let mut changed = false;
        let panel = &self.panel;
        let output = self.ctx.run(raw_input, |ctx| {
            changed = panel.show(ctx, scene, readout);
        });
        self.state
            .handle_platform_output(window, output.platform_output);

        self.textures.push(output.textures_delta);

        let size = window.inner_size();
        let paint_jobs = self.ctx.tessellate(output.shapes, output.pixels_per_point);
        self.frame = Some(GuiFrame {
            paint_jobs,
            pixels_per_point: output.pixels_per_point,
            size_in_pixels: [size.width, size.height],
        });

        changed
    }
}

impl Overlay for GuiLayer {
    fn prepare(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        surface_size: [u32; 2],
    ) -> Vec<wgpu::CommandBuffer> {
        let textures = self.textures.take();
        for (id, delta) in &textures.set {
            self.renderer.update_texture(device, queue, *id, delta);
        }
        self.pending_free.extend(textures.free);

        let Some(frame) = self.frame.as_mut() else {
            return Vec::new();
        };

        frame.size_in_pixels = surface_size;
        self.renderer
            .update_buffers(device, queue, encoder, &frame.paint_jobs, &frame.screen())
    }

    fn paint(&self, pass: &mut wgpu::RenderPass<'static>) {
        if let Some(frame) = &self.frame {
            self.renderer.render(pass, &frame.paint_jobs, &frame.screen());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn font_atlas_uploaded(delta: &egui::TexturesDelta) -> bool {
        delta
            .set
            .iter()
            .any(|(id, _)| *id == egui::TextureId::default())
    }

    #[test]
    fn test_font_atlas_survives_skipped_frame() {
        let ctx = egui::Context::default();
        let mut pending = PendingTextures::default();

        // First frame emits the font atlas; its surface acquire fails, so nothing is taken
        let first = ctx.run(egui::RawInput::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| ui.label("pane"));
        });
        assert!(font_atlas_uploaded(&first.textures_delta));
        pending.push(first.textures_delta);

        let second = ctx.run(egui::RawInput::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| ui.label("pane"));
        });
        pending.push(second.textures_delta);

        let taken = pending.take();
        assert!(font_atlas_uploaded(&taken));
        assert!(pending.take().set.is_empty());
    }
}
