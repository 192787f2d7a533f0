use crate::device::{Drawable, DriverError, DriverResult, Gpu};
use crate::graphics::{ColorMatrix, CompositeMode, Filter};
use crate::pipeline::{
    color_uniforms, ColorBodyUniform, ColorTranslationUniform, FlagsUniform, PipelineCache,
    ViewportUniform,
};
use crate::texture::{placeholder_texture, ImageTexture};

use super::buffers::DrawBuffers;
use super::stages::FrameStages;

/// Per-draw parameters from the facade.
#[derive(Debug, Clone, Copy)]
pub struct DrawParams {
    pub index_count: u32,
    pub index_offset: u32,
    pub mode: CompositeMode,
    pub color_matrix: ColorMatrix,
    pub filter: Filter,
}

/// Long-lived objects every draw binds: uniform buffers, samplers and the
/// placeholder source.
pub struct DrawResources {
    viewport_ubo: wgpu::Buffer,
    color_body_ubo: wgpu::Buffer,
    color_translation_ubo: wgpu::Buffer,
    flags_ubo: wgpu::Buffer,
    uniforms: wgpu::BindGroup,

    nearest: wgpu::Sampler,
    linear: wgpu::Sampler,
    placeholder: wgpu::TextureView,
}

impl DrawResources {
    pub fn new(device: &wgpu::Device, pipelines: &PipelineCache) -> Self {
        let ubo = |label: &str, size: usize| {
            device.create_buffer(&wgpu::BufferDescriptor {
                label: Some(label),
                size: size as u64,
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            })
        };

        let viewport_ubo = ubo("quadra viewport ubo", size_of::<ViewportUniform>());
        let color_body_ubo = ubo("quadra color body ubo", size_of::<ColorBodyUniform>());
        let color_translation_ubo =
            ubo("quadra color translation ubo", size_of::<ColorTranslationUniform>());
        let flags_ubo = ubo("quadra flags ubo", size_of::<FlagsUniform>());

        let uniforms = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("quadra uniforms bind group"),
            layout: pipelines.uniform_layout(),
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: viewport_ubo.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: color_body_ubo.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: color_translation_ubo.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 3,
                    resource: flags_ubo.as_entire_binding(),
                },
            ],
        });

        let sampler = |label: &str, filter: wgpu::FilterMode| {
            device.create_sampler(&wgpu::SamplerDescriptor {
                label: Some(label),
                address_mode_u: wgpu::AddressMode::ClampToEdge,
                address_mode_v: wgpu::AddressMode::ClampToEdge,
                mag_filter: filter,
                min_filter: filter,
                ..Default::default()
            })
        };

        Self {
            viewport_ubo,
            color_body_ubo,
            color_translation_ubo,
            flags_ubo,
            uniforms,
            nearest: sampler("quadra nearest sampler", wgpu::FilterMode::Nearest),
            linear: sampler("quadra linear sampler", wgpu::FilterMode::Linear),
            placeholder: placeholder_texture(device),
        }
    }

    fn sampler(&self, filter: Filter) -> &wgpu::Sampler {
        match filter {
            Filter::Nearest => &self.nearest,
            Filter::Linear => &self.linear,
        }
    }
}

/// Where a draw lands.
pub enum Destination<'a> {
    /// The presentable surface, configured to `width x height`.
    Screen { width: u32, height: u32 },
    Image(&'a ImageTexture),
}

/// Render target resolved by [`DrawCall::acquire`].
pub enum Target {
    Screen(Drawable),
    Offscreen,
}

/// One draw, expressed as [`FrameStages`] over wgpu.
pub struct DrawCall<'a> {
    pub gpu: &'a Gpu,
    pub pipelines: &'a PipelineCache,
    pub resources: &'a DrawResources,
    pub buffers: &'a DrawBuffers,
    pub destination: Destination<'a>,
    pub source: Option<&'a ImageTexture>,
    pub params: DrawParams,
}

impl DrawCall<'_> {
    /// Size used for clip-space projection: the texture's real size.
    fn viewport_size(&self) -> (u32, u32) {
        match self.destination {
            Destination::Screen { width, height } => (width, height),
            Destination::Image(image) => image.padded_size(),
        }
    }

    fn write_uniforms(&self) {
        let queue = self.gpu.queue();
        let r = self.resources;
        let (w, h) = self.viewport_size();
        let (body, translation) = color_uniforms(&self.params.color_matrix);

        queue.write_buffer(&r.viewport_ubo, 0, bytemuck::bytes_of(&ViewportUniform::new(w, h)));
        queue.write_buffer(&r.color_body_ubo, 0, bytemuck::bytes_of(&body));
        queue.write_buffer(&r.color_translation_ubo, 0, bytemuck::bytes_of(&translation));
        queue.write_buffer(
            &r.flags_ubo,
            0,
            bytemuck::bytes_of(&FlagsUniform::new(self.source.is_none())),
        );
    }

    fn source_bind_group(&self) -> wgpu::BindGroup {
        let view = self
            .source
            .map_or(&self.resources.placeholder, |src| src.view());

        self.gpu.device().create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("quadra source bind group"),
            layout: self.pipelines.source_layout(),
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(
                        self.resources.sampler(self.params.filter),
                    ),
                },
            ],
        })
    }
}

impl FrameStages for DrawCall<'_> {
    type Target = Target;
    type Commands = wgpu::CommandBuffer;

    fn acquire(&mut self) -> DriverResult<Target> {
        match self.destination {
            Destination::Screen { .. } => Ok(Target::Screen(self.gpu.acquire_drawable()?)),
            Destination::Image(_) => Ok(Target::Offscreen),
        }
    }

    fn encode(&mut self, target: &Target) -> DriverResult<wgpu::CommandBuffer> {
        let p = self.params;
        let (vertex_slice, index_slice) = self.buffers.slices(p.index_offset, p.index_count)?;

        // Screen draws always use the presentation pipeline; offscreen draws
        // keep prior contents and blend per mode.
        let (view, load, pipeline) = match (target, &self.destination) {
            (Target::Screen(drawable), _) => {
                let pipeline = self.pipelines.screen().ok_or(DriverError::NoSurface)?;
                (drawable.view(), wgpu::LoadOp::Clear(wgpu::Color::TRANSPARENT), pipeline)
            }
            (Target::Offscreen, Destination::Image(image)) => {
                (image.view(), wgpu::LoadOp::Load, self.pipelines.for_mode(p.mode))
            }
            (Target::Offscreen, Destination::Screen { .. }) => {
                return Err(DriverError::NoSurface);
            }
        };

        self.write_uniforms();
        let source_group = self.source_bind_group();

        let mut encoder =
            self.gpu
                .device()
                .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                    label: Some("quadra draw encoder"),
                });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("quadra draw pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load,
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            rpass.set_pipeline(pipeline);
            rpass.set_bind_group(0, &self.resources.uniforms, &[]);
            rpass.set_bind_group(1, &source_group, &[]);
            rpass.set_vertex_buffer(0, vertex_slice);
            rpass.set_index_buffer(index_slice, wgpu::IndexFormat::Uint16);
            rpass.draw_indexed(0..p.index_count, 0, 0..1);
        }

        Ok(encoder.finish())
    }

    fn commit(&mut self, commands: wgpu::CommandBuffer) -> DriverResult<()> {
        self.gpu.queue().submit(std::iter::once(commands));
        Ok(())
    }

    fn present(&mut self, target: Target) -> DriverResult<()> {
        if let Target::Screen(drawable) = target {
            drawable.present();
        }
        Ok(())
    }

    fn wait(&mut self) -> DriverResult<()> {
        self.gpu.wait_idle()
    }
}
