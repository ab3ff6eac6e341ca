//! Subdivided plane mesh for the water surface.

use bytemuck::{Pod, Zeroable};

/// Vertex data for the water mesh (rest position, displaced in the vertex shader)
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
}

impl Vertex {
    pub const ATTRIBUTES: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x3];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Flat square grid in the XZ plane, centered on the origin
pub struct PlaneMesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
    size: f32,
    segments: u32,
}

impl PlaneMesh {
    /// Create a plane `size` units wide with `segments` subdivisions per side
    pub fn new(size: f32, segments: u32) -> Self {
        let segments = segments.max(1);
        let row = segments as usize + 1;
        let cell = size / segments as f32;
        let half_size = size / 2.0;

        let mut vertices = Vec::with_capacity(row * row);
        let mut indices = Vec::with_capacity(segments as usize * segments as usize * 6);

        // Rows run from -Z to +Z, columns from -X to +X
        for z in 0..row {
            for x in 0..row {
                vertices.push(Vertex {
                    position: [x as f32 * cell - half_size, 0.0, z as f32 * cell - half_size],
                });
            }
        }

        // Counter-clockwise when seen from +Y
        for z in 0..segments {
            for x in 0..segments {
                let top_left = z * (segments + 1) + x;
                let top_right = top_left + 1;
                let bottom_left = (z + 1) * (segments + 1) + x;
                let bottom_right = bottom_left + 1;

                indices.extend_from_slice(&[
                    top_left,
                    bottom_left,
                    top_right,
                    bottom_left,
                    bottom_right,
                    top_right,
                ]);
            }
        }

        Self {
            vertices,
            indices,
            size,
            segments,
        }
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn segments(&self) -> u32 {
        self.segments
    }

    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }
}
