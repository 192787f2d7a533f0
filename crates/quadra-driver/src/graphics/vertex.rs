use bytemuck::{Pod, Zeroable};

/// A vertex as produced by the renderer.
///
/// - `position`: destination pixels (top-left origin, +Y down)
/// - `tex`: `xy` = source UV (0..1 over the padded texture), `zw` = reserved
/// - `color`: per-vertex RGBA multiplier
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub tex: [f32; 4],
    pub color: [f32; 4],
}

impl Vertex {
    const ATTRS: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
        0 => Float32x2, // position
        1 => Float32x4, // tex
        2 => Float32x4  // color
    ];

    #[inline]
    pub const fn new(position: [f32; 2], uv: [f32; 2], color: [f32; 4]) -> Self {
        Self {
            position,
            tex: [uv[0], uv[1], 0.0, 0.0],
            color,
        }
    }

    pub(crate) fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}
