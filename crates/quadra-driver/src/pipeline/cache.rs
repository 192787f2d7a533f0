use crate::device::{DriverError, DriverResult};
use crate::graphics::{CompositeMode, Vertex};

use super::blend::{blend_state, screen_blend_state};
use super::uniforms::{
    min_binding_size, ColorBodyUniform, ColorTranslationUniform, FlagsUniform, ViewportUniform,
};

/// Format of every offscreen image.
pub const OFFSCREEN_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;

/// One pipeline per composite mode, plus the presentation pipeline.
///
/// Built once per reset; never rebuilt mid-frame.
pub struct PipelineCache {
    uniform_layout: wgpu::BindGroupLayout,
    source_layout: wgpu::BindGroupLayout,

    /// Indexed by `CompositeMode::index()`.
    composite: Vec<wgpu::RenderPipeline>,

    /// `None` when the driver runs headless.
    screen: Option<wgpu::RenderPipeline>,
}

impl PipelineCache {
    pub fn new(
        device: &wgpu::Device,
        screen_format: Option<wgpu::TextureFormat>,
    ) -> DriverResult<Self> {
        let shader = compile_shader(device)?;
        let uniform_layout = uniform_bind_group_layout(device);
        let source_layout = source_bind_group_layout(device);

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("quadra pipeline layout"),
            bind_group_layouts: &[&uniform_layout, &source_layout],
            immediate_size: 0,
        });

        let composite = CompositeMode::ALL
            .iter()
            .map(|&mode| {
                build_pipeline(
                    device,
                    &pipeline_layout,
                    &shader,
                    mode.name(),
                    OFFSCREEN_FORMAT,
                    blend_state(mode),
                )
            })
            .collect();

        let screen = screen_format.map(|format| {
            build_pipeline(
                device,
                &pipeline_layout,
                &shader,
                "screen",
                format,
                screen_blend_state(),
            )
        });

        log::debug!(
            "built {} composite pipelines{}",
            CompositeMode::COUNT,
            if screen.is_some() { " + screen pipeline" } else { "" }
        );

        Ok(Self {
            uniform_layout,
            source_layout,
            composite,
            screen,
        })
    }

    /// Pipeline for drawing into an offscreen image with `mode`.
    pub fn for_mode(&self, mode: CompositeMode) -> &wgpu::RenderPipeline {
        &self.composite[mode.index()]
    }

    /// Pipeline for drawing into the presentable surface.
    pub fn screen(&self) -> Option<&wgpu::RenderPipeline> {
        self.screen.as_ref()
    }

    pub fn uniform_layout(&self) -> &wgpu::BindGroupLayout {
        &self.uniform_layout
    }

    pub fn source_layout(&self) -> &wgpu::BindGroupLayout {
        &self.source_layout
    }
}

fn compile_shader(device: &wgpu::Device) -> DriverResult<wgpu::ShaderModule> {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("quadra driver shader"),
        source: wgpu::ShaderSource::Wgsl(include_str!("shaders/driver.wgsl").into()),
    });

    let info = pollster::block_on(shader.get_compilation_info());
    let mut errors = Vec::new();
    for msg in &info.messages {
        match msg.message_type {
            wgpu::CompilationMessageType::Error => errors.push(msg.message.clone()),
            _ => log::warn!("shader: {}", msg.message),
        }
    }
    if !errors.is_empty() {
        return Err(DriverError::Shader {
            label: "quadra driver shader",
            message: errors.join("; "),
        });
    }

    Ok(shader)
}

fn uniform_entry(
    binding: u32,
    visibility: wgpu::ShaderStages,
    min_binding_size: Option<std::num::NonZeroU64>,
) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size,
        },
        count: None,
    }
}

fn uniform_bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("quadra uniforms bgl"),
        entries: &[
            uniform_entry(0, wgpu::ShaderStages::VERTEX, min_binding_size::<ViewportUniform>()),
            uniform_entry(1, wgpu::ShaderStages::FRAGMENT, min_binding_size::<ColorBodyUniform>()),
            uniform_entry(
                2,
                wgpu::ShaderStages::FRAGMENT,
                min_binding_size::<ColorTranslationUniform>(),
            ),
            uniform_entry(3, wgpu::ShaderStages::FRAGMENT, min_binding_size::<FlagsUniform>()),
        ],
    })
}

fn source_bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("quadra source bgl"),
        entries: &[
            wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Texture {
                    sample_type: wgpu::TextureSampleType::Float { filterable: true },
                    view_dimension: wgpu::TextureViewDimension::D2,
                    multisampled: false,
                },
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: 1,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                count: None,
            },
        ],
    })
}

fn build_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    name: &str,
    format: wgpu::TextureFormat,
    blend: wgpu::BlendState,
) -> wgpu::RenderPipeline {
    let label = format!("quadra {name} pipeline");
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(&label),
        layout: Some(layout),

        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some("vs_main"),
            compilation_options: Default::default(),
            buffers: &[Vertex::layout()],
        },

        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some("fs_main"),
            compilation_options: Default::default(),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(blend),
                write_mask: wgpu::ColorWrites::ALL,
            })],
        }),

        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: None,
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },

        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview_mask: None,
        cache: None,
    })
}
