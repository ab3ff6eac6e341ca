//! Water surface geometry and the CPU side of the wave model.

pub mod noise;
pub mod waves;

mod mesh;

pub use mesh::{PlaneMesh, Vertex};
