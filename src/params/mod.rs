//! Parameter definitions with units, defaults and documented ranges.
//!
//! Every magic number of the scene lives here.

pub mod controls;

mod color;
mod render;
mod scene;
mod water;

// Re-export all types
pub use color::{srgb_to_linear, ParseColorError, Rgb};
pub use controls::SliderControl;
pub use render::RenderConfig;
pub use scene::SceneParams;
pub use water::WaterParams;
