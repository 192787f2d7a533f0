use wgpu::util::DeviceExt;

use crate::device::{DriverError, DriverResult};
use crate::graphics::Vertex;

const INDEX_SIZE: u64 = std::mem::size_of::<u16>() as u64;

/// Byte range of `count` indices starting at index `offset`, checked against
/// a buffer holding `len` indices.
pub fn index_byte_range(offset: u32, count: u32, len: u32) -> DriverResult<(u64, u64)> {
    let start = u64::from(offset);
    let end = start + u64::from(count);
    if end > u64::from(len) {
        return Err(DriverError::IndexRange { start, end, len });
    }
    Ok((start * INDEX_SIZE, end * INDEX_SIZE))
}

/// The shared vertex and index buffers.
///
/// Replaced wholesale by every `set_vertices`; never appended to.
#[derive(Default)]
pub struct DrawBuffers {
    vertex: Option<wgpu::Buffer>,
    index: Option<wgpu::Buffer>,
    index_count: u32,
}

impl DrawBuffers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uploads new geometry, releasing the previous buffers.
    pub fn replace(&mut self, device: &wgpu::Device, vertices: &[Vertex], indices: &[u16]) {
        self.release();

        if vertices.is_empty() || indices.is_empty() {
            log::debug!("set_vertices with empty geometry; draws will be rejected");
            return;
        }

        self.vertex = Some(device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("quadra vertex buffer"),
            contents: bytemuck::cast_slice(vertices),
            usage: wgpu::BufferUsages::VERTEX,
        }));
        self.index = Some(device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("quadra index buffer"),
            contents: bytemuck::cast_slice(indices),
            usage: wgpu::BufferUsages::INDEX,
        }));
        self.index_count = indices.len() as u32;
    }

    /// Vertex buffer plus the index slice for `count` indices at `offset`.
    pub fn slices(
        &self,
        offset: u32,
        count: u32,
    ) -> DriverResult<(wgpu::BufferSlice<'_>, wgpu::BufferSlice<'_>)> {
        let (Some(vertex), Some(index)) = (self.vertex.as_ref(), self.index.as_ref()) else {
            return Err(DriverError::NoVertices);
        };
        let (start, end) = index_byte_range(offset, count, self.index_count)?;
        Ok((vertex.slice(..), index.slice(start..end)))
    }

    pub fn release(&mut self) {
        if let Some(b) = self.vertex.take() {
            b.destroy();
        }
        if let Some(b) = self.index.take() {
            b.destroy();
        }
        self.index_count = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_is_converted_to_bytes() {
        assert_eq!(index_byte_range(0, 6, 6).unwrap(), (0, 12));
        assert_eq!(index_byte_range(6, 6, 12).unwrap(), (12, 24));
    }

    #[test]
    fn range_past_end_is_rejected() {
        let err = index_byte_range(6, 7, 12).unwrap_err();
        assert!(matches!(err, DriverError::IndexRange { start: 6, end: 13, len: 12 }));
    }

    #[test]
    fn range_does_not_overflow() {
        assert!(index_byte_range(u32::MAX, u32::MAX, u32::MAX).is_err());
    }

    #[test]
    fn empty_buffers_reject_draws() {
        let buffers = DrawBuffers::new();
        assert!(matches!(buffers.slices(0, 3), Err(DriverError::NoVertices)));
    }
}
