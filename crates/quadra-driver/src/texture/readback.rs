use std::sync::mpsc;

use crate::device::{DriverError, DriverResult, Gpu};

use super::upload::BYTES_PER_PIXEL;

/// Row pitch for a texture-to-buffer copy of `width` RGBA8 pixels.
pub fn padded_bytes_per_row(width: u32) -> u32 {
    let row = width * BYTES_PER_PIXEL;
    let align = wgpu::COPY_BYTES_PER_ROW_ALIGNMENT;
    row.div_ceil(align) * align
}

/// Drops per-row alignment padding from a mapped copy.
pub fn repack_rows(mapped: &[u8], padded_row: usize, tight_row: usize, rows: usize) -> Vec<u8> {
    let mut out = Vec::with_capacity(tight_row * rows);
    for row in 0..rows {
        let start = row * padded_row;
        out.extend_from_slice(&mapped[start..start + tight_row]);
    }
    out
}

/// Reads the top-left `width x height` region of `texture` as tightly packed
/// RGBA8. Blocks until the copy has completed.
pub fn read_region(
    gpu: &Gpu,
    texture: &wgpu::Texture,
    width: u32,
    height: u32,
) -> DriverResult<Vec<u8>> {
    if width == 0 || height == 0 {
        return Ok(Vec::new());
    }

    let device = gpu.device();
    let bytes_per_row = padded_bytes_per_row(width);

    let staging = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("quadra readback buffer"),
        size: u64::from(bytes_per_row) * u64::from(height),
        usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
        mapped_at_creation: false,
    });

    let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
        label: Some("quadra readback encoder"),
    });
    encoder.copy_texture_to_buffer(
        wgpu::TexelCopyTextureInfo {
            texture,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        wgpu::TexelCopyBufferInfo {
            buffer: &staging,
            layout: wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(bytes_per_row),
                rows_per_image: Some(height),
            },
        },
        wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
    );
    gpu.queue().submit(std::iter::once(encoder.finish()));

    let slice = staging.slice(..);
    let (tx, rx) = mpsc::channel();
    slice.map_async(wgpu::MapMode::Read, move |res| {
        let _ = tx.send(res);
    });
    gpu.wait_idle()?;
    rx.recv()
        .map_err(|_| DriverError::ReadbackDropped)?
        .map_err(DriverError::Readback)?;

    let mapped = slice.get_mapped_range();
    let out = repack_rows(
        &mapped,
        bytes_per_row as usize,
        (width * BYTES_PER_PIXEL) as usize,
        height as usize,
    );
    drop(mapped);
    staging.unmap();
    staging.destroy();

    Ok(out)
}
