//! Per-frame scene state: tunable parameters, camera and orbit controls.

use glam::Vec3;

use crate::camera::{OrbitControls, PerspectiveCamera};
use crate::ocean::waves;
use crate::params::{RenderConfig, SceneParams, WaterParams};
use crate::rendering::WaterUniforms;
use crate::viewport::Viewport;

/// Everything the water pass reads, owned by the app and edited by the panel
#[derive(Debug, Clone)]
pub struct Scene {
    pub water: WaterParams,
    pub scene: SceneParams,
    pub camera: PerspectiveCamera,
    pub controls: OrbitControls,

    /// Time of the last tick (seconds since start)
    time_s: f32,
}

impl Scene {
    pub fn new(render: &RenderConfig, water: WaterParams, scene: SceneParams) -> Self {
        let mut camera = PerspectiveCamera::from_config(render);
        let mut controls = OrbitControls::from_config(render);
        // Settle limits (distance, polar clamp) before the first frame
        controls.update(&mut camera);

        Self {
            water,
            scene,
            camera,
            controls,
            time_s: 0.0,
        }
    }

    pub fn time_s(&self) -> f32 {
        self.time_s
    }

    /// Match the projection to the window after a resize or scale change.
    /// A minimized window keeps the last projection.
    pub fn fit_viewport(&mut self, viewport: &Viewport) {
        if viewport.is_empty() {
            return;
        }
        self.camera.set_aspect(viewport.aspect());
    }

    /// Advance to `elapsed_s`: apply pending orbit motion, then build the frame's uniforms
    pub fn tick(&mut self, elapsed_s: f32) -> WaterUniforms {
        self.time_s = elapsed_s;
        self.controls.update(&mut self.camera);

        WaterUniforms::new(
            self.camera.view_proj(),
            self.camera.position,
            self.time_s,
            &self.water,
            &self.scene,
        )
    }

    /// Water height under the orbit target at the current time
    pub fn target_elevation(&self) -> f32 {
        let Vec3 { x, z, .. } = self.controls.target;
        waves::elevation(&self.water, x, z, self.time_s)
    }
}
