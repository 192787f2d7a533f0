use super::Vertex;

const QUAD_INDICES: [u16; 6] = [0, 1, 2, 0, 2, 3];

/// Accumulates axis-aligned quads into one vertex/index pair.
///
/// Each [`push`](Self::push) returns the index offset of the quad, ready to
/// pass to `draw(6, offset, ..)`.
#[derive(Debug, Default, Clone)]
pub struct QuadBatch {
    vertices: Vec<Vertex>,
    indices: Vec<u16>,
}

impl QuadBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a quad covering `dst = [x, y, w, h]` in destination pixels,
    /// sampling `uv = [u0, v0, u1, v1]`, tinted by premultiplied `color`.
    ///
    /// Returns `None` once the batch cannot address more vertices with `u16`.
    pub fn push(&mut self, dst: [f32; 4], uv: [f32; 4], color: [f32; 4]) -> Option<u32> {
        let base = u16::try_from(self.vertices.len()).ok()?;
        base.checked_add(3)?;

        let [x, y, w, h] = dst;
        let [u0, v0, u1, v1] = uv;
        self.vertices.extend_from_slice(&[
            Vertex::new([x, y], [u0, v0], color),
            Vertex::new([x + w, y], [u1, v0], color),
            Vertex::new([x + w, y + h], [u1, v1], color),
            Vertex::new([x, y + h], [u0, v1], color),
        ]);

        let offset = self.indices.len() as u32;
        self.indices.extend(QUAD_INDICES.iter().map(|i| base + i));
        Some(offset)
    }

    /// UV rectangle selecting the logical `width x height` area of an image
    /// whose texture is `padded_width x padded_height`.
    pub fn logical_uv(width: u32, height: u32, padded_width: u32, padded_height: u32) -> [f32; 4] {
        [
            0.0,
            0.0,
            width as f32 / padded_width as f32,
            height as f32 / padded_height as f32,
        ]
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u16] {
        &self.indices
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
        self.indices.clear();
    }
}
