use std::sync::atomic::{AtomicU64, Ordering};

use crate::pipeline::OFFSCREEN_FORMAT;

/// Driver-wide image identifier. Never reused within a process.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct ImageId(u64);

impl ImageId {
    pub(crate) fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// A GPU texture padded to power-of-two dimensions.
///
/// `width`/`height` are what the caller asked for; the texture itself is
/// `padded_width` x `padded_height`. Projection uses the padded size, pixel
/// access uses the logical one.
pub struct ImageTexture {
    texture: wgpu::Texture,
    view: wgpu::TextureView,
    width: u32,
    height: u32,
    padded_width: u32,
    padded_height: u32,
}

impl ImageTexture {
    /// Allocates a `padded` texture holding a logical `width x height` image
    /// and records a clear to transparent.
    ///
    /// The clear is submitted but not waited on.
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        (width, height): (u32, u32),
        (padded_width, padded_height): (u32, u32),
    ) -> Self {

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("quadra image"),
            size: wgpu::Extent3d {
                width: padded_width,
                height: padded_height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: OFFSCREEN_FORMAT,
            usage: wgpu::TextureUsages::TEXTURE_BINDING
                | wgpu::TextureUsages::RENDER_ATTACHMENT
                | wgpu::TextureUsages::COPY_SRC
                | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("quadra image clear encoder"),
        });
        {
            let _rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("quadra image clear"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::TRANSPARENT),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });
        }
        queue.submit(std::iter::once(encoder.finish()));

        Self {
            texture,
            view,
            width,
            height,
            padded_width,
            padded_height,
        }
    }

    pub fn texture(&self) -> &wgpu::Texture {
        &self.texture
    }

    pub fn view(&self) -> &wgpu::TextureView {
        &self.view
    }

    /// Size requested by the caller.
    pub fn logical_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Allocated texture size.
    pub fn padded_size(&self) -> (u32, u32) {
        (self.padded_width, self.padded_height)
    }

    /// Frees GPU memory now rather than when the last reference drops.
    pub fn destroy(self) {
        drop(self.view);
        self.texture.destroy();
    }
}

/// 1x1 transparent texture bound when a draw has no source.
///
/// Bind group layouts require a texture in every draw; the clear flag keeps
/// the shader from using what it samples.
pub fn placeholder_texture(device: &wgpu::Device) -> wgpu::TextureView {
    device
        .create_texture(&wgpu::TextureDescriptor {
            label: Some("quadra placeholder source"),
            size: wgpu::Extent3d {
                width: 1,
                height: 1,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: OFFSCREEN_FORMAT,
            usage: wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats: &[],
        })
        .create_view(&wgpu::TextureViewDescriptor::default())
}
