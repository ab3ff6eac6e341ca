//! Perspective camera and orbit controls.

mod orbit;
mod perspective;

pub use orbit::{DragAction, OrbitControls};
pub use perspective::PerspectiveCamera;
