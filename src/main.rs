//! Raging sea - an animated ocean surface
//!
//! Big travelling sine waves plus layered noise ripples, displaced on the GPU,
//! with orbit camera controls and a panel for tuning every wave parameter live.

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use glam::Vec2;
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use raging_sea::camera::DragAction;
use raging_sea::cli::Args;
use raging_sea::config::Settings;
use raging_sea::gui::{GuiLayer, Panel, Readout};
use raging_sea::logging::{init_logging, LoggingConfig};
use raging_sea::ocean::PlaneMesh;
use raging_sea::rendering::{RenderSystem, SurfaceErrorAction};
use raging_sea::scene::Scene;
use raging_sea::time::Clock;
use raging_sea::viewport::Viewport;

/// Wheel pixels per dolly step on touchpads
const PIXELS_PER_WHEEL_STEP: f32 = 100.0;

/// Window-bound state, created once the event loop is running
struct Graphics {
    window: Arc<Window>,
    viewport: Viewport,
    render_system: RenderSystem,
    gui: GuiLayer,
}

/// Main application state
struct App {
    settings: Settings,
    mesh: PlaneMesh,
    scene: Scene,
    clock: Clock,

    graphics: Option<Graphics>,

    // Pointer position in logical pixels
    cursor: Vec2,
    last_readout: Readout,

    // Startup or fatal frame error, reported from main
    error: Option<anyhow::Error>,
}

impl App {
    fn new(settings: Settings) -> Self {
        let render = &settings.render;
        let mesh = PlaneMesh::new(render.plane_size, render.plane_segments);
        log::info!(
            "Water plane: {0}x{0} units, {1} segments, {2} vertices, {3} triangles",
            mesh.size(),
            mesh.segments(),
            mesh.vertices.len(),
            mesh.index_count() / 3
        );

        let scene = Scene::new(render, settings.water.clone(), settings.scene.clone());

        Self {
            settings,
            mesh,
            scene,
            clock: Clock::new(),
            graphics: None,
            cursor: Vec2::ZERO,
            last_readout: Readout::default(),
            error: None,
        }
    }

    fn init_graphics(&mut self, event_loop: &ActiveEventLoop) -> anyhow::Result<Graphics> {
        let render = &self.settings.render;
        let window_attributes = Window::default_attributes()
            .with_title("Raging Sea")
            .with_inner_size(winit::dpi::LogicalSize::new(
                render.window_width,
                render.window_height,
            ));

        let window = Arc::new(
            event_loop
                .create_window(window_attributes)
                .context("failed to create window")?,
        );

        let viewport = Viewport::new(
            window.inner_size(),
            window.scale_factor(),
            render.max_pixel_ratio,
        );
        log::info!(
            "Window: {}x{} physical, scale factor {:.2}",
            viewport.surface_size().width,
            viewport.surface_size().height,
            viewport.scale_factor()
        );

        let render_system = pollster::block_on(RenderSystem::new(
            Arc::clone(&window),
            &viewport,
            &self.mesh,
            render.present_mode(),
        ))
        .context("failed to initialize renderer")?;

        let panel = Panel::new(
            self.settings.panel.title.clone(),
            self.settings.panel.expanded,
        );
        let gui = GuiLayer::new(
            &window,
            render_system.device(),
            render_system.surface_format(),
            panel,
        );

        self.scene.fit_viewport(&viewport);

        Ok(Graphics {
            window,
            viewport,
            render_system,
            gui,
        })
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: anyhow::Error) {
        log::error!("{error:#}");
        self.error = Some(error);
        event_loop.exit();
    }
}

impl ApplicationHandler for App {
    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(graphics) = &self.graphics {
            graphics.window.request_redraw();
        }
    }

    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.graphics.is_some() {
            return; // Already initialized
        }

        match self.init_graphics(event_loop) {
            Ok(graphics) => {
                log::info!("Running. Drag to orbit, right-drag to pan, scroll to zoom, Esc to quit");
                self.graphics = Some(graphics);
            }
            Err(error) => self.fail(event_loop, error),
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        let Some(graphics) = self.graphics.as_mut() else {
            return;
        };

        // Panel sees everything first; pointer input it consumes stays away from the camera
        let consumed = graphics.gui.handle_event(&graphics.window, &event);

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => event_loop.exit(),
            WindowEvent::Resized(size) => {
                graphics.viewport.resize(size);
                graphics.render_system.resize(&graphics.viewport);
                self.scene.fit_viewport(&graphics.viewport);
            }
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                graphics.viewport.set_scale_factor(scale_factor);
                graphics.render_system.resize(&graphics.viewport);
                self.scene.fit_viewport(&graphics.viewport);
            }
            WindowEvent::CursorMoved { position, .. } => {
                let logical = position.to_logical::<f32>(graphics.viewport.scale_factor());
                self.cursor = Vec2::new(logical.x, logical.y);
                let height = graphics.viewport.logical_size().height as f32;
                self.scene
                    .controls
                    .pointer_move(self.cursor, height, &self.scene.camera);
            }
            WindowEvent::MouseInput { state, button, .. } => match state {
                // A release always ends the drag, even over the panel
                ElementState::Released => self.scene.controls.pointer_up(),
                ElementState::Pressed if !consumed => {
                    let action = match button {
                        MouseButton::Left => Some(DragAction::Rotate),
                        MouseButton::Right | MouseButton::Middle => Some(DragAction::Pan),
                        _ => None,
                    };
                    if let Some(action) = action {
                        self.scene.controls.pointer_down(action, self.cursor);
                    }
                }
                ElementState::Pressed => {}
            },
            WindowEvent::MouseWheel { delta, .. } if !consumed => {
                let steps = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(pixels) => pixels.y as f32 / PIXELS_PER_WHEEL_STEP,
                };
                self.scene.controls.dolly(steps);
            }
            WindowEvent::RedrawRequested => {
                self.render_frame(event_loop);
            }
            _ => {}
        }
    }
}

impl App {
    /// Render a single frame
    fn render_frame(&mut self, event_loop: &ActiveEventLoop) {
        let Some(graphics) = self.graphics.as_mut() else {
            return;
        };
        if graphics.viewport.is_empty() {
            return;
        }

        let frame = self.clock.tick();

        // Panel edits land in this frame's uniforms
        if graphics
            .gui
            .run(&graphics.window, &mut self.scene, &self.last_readout)
        {
            log::trace!("Parameters edited at frame {}", frame.frame_index);
        }

        let uniforms = self.scene.tick(frame.elapsed_s);
        self.last_readout = Readout {
            frame_dt: frame.dt,
            target_elevation: self.scene.target_elevation(),
        };

        let render_system = &mut graphics.render_system;
        render_system.set_background(self.scene.scene.background);
        render_system.update_uniforms(&uniforms);

        let Err(error) = render_system.render(&mut graphics.gui) else {
            return;
        };
        match SurfaceErrorAction::from(&error) {
            SurfaceErrorAction::Reconfigure => {
                log::warn!("Surface {error}, reconfiguring");
                render_system.reconfigure();
            }
            SurfaceErrorAction::SkipFrame => {
                log::warn!("Surface {error}, skipping frame");
            }
            SurfaceErrorAction::Fatal => {
                let error = anyhow::Error::new(error).context("surface failed");
                self.fail(event_loop, error);
            }
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(LoggingConfig::with_filter(args.log.clone()));

    let settings = args.load_settings().context("failed to load settings")?;

    let event_loop = EventLoop::new().context("failed to create event loop")?;
    let mut app = App::new(settings);
    event_loop.run_app(&mut app).context("event loop failed")?;

    match app.error.take() {
        Some(error) => Err(error),
        None => Ok(()),
    }
}
