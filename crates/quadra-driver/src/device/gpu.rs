use std::sync::Arc;

use super::frame::Drawable;
use super::surface::{self, NativeWindow};
use super::{DriverConfig, DriverError, DriverResult, SurfaceErrorAction};

/// The presentable surface and its configuration.
struct ScreenSurface {
    surface: wgpu::Surface<'static>,
    config: wgpu::SurfaceConfiguration,
    configured: bool,
}

/// Owns wgpu core objects and the optional presentable surface.
///
/// This type is the low-level rendering context:
/// - creates and stores Instance/Adapter/Device/Queue
/// - creates the Surface for the host window, if any
/// - acquires drawables and waits for queue completion
///
/// It lives on the dispatcher thread only.
pub struct Gpu {
    /// Kept alive for the surface.
    _instance: wgpu::Instance,

    adapter: wgpu::Adapter,

    device: wgpu::Device,

    queue: wgpu::Queue,

    /// `None` when the driver runs headless.
    screen: Option<ScreenSurface>,
}

impl Gpu {
    /// Creates a GPU context, optionally bound to `window`.
    ///
    /// Adapter/device acquisition is asynchronous under wgpu; this blocks.
    pub fn new(config: &DriverConfig, window: Option<Arc<dyn NativeWindow>>) -> DriverResult<Self> {
        pollster::block_on(Self::new_async(config, window))
    }

    async fn new_async(
        config: &DriverConfig,
        window: Option<Arc<dyn NativeWindow>>,
    ) -> DriverResult<Self> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: config.backends,
            ..Default::default()
        });

        let surface = window
            .map(|w| instance.create_surface(w))
            .transpose()
            .map_err(DriverError::CreateSurface)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: config.power_preference,
                compatible_surface: surface.as_ref(),
                force_fallback_adapter: config.force_fallback_adapter,
            })
            .await
            .map_err(DriverError::AdapterNotFound)?;

        // Nothing beyond the most conservative limits is needed, except that
        // texture size should be as large as the hardware allows.
        let required_limits =
            wgpu::Limits::downlevel_webgl2_defaults().using_resolution(adapter.limits());

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("quadra device"),
                required_features: wgpu::Features::empty(),
                required_limits,
                experimental_features: wgpu::ExperimentalFeatures::disabled(),
                memory_hints: wgpu::MemoryHints::Performance,
                trace: wgpu::Trace::Off,
            })
            .await
            .map_err(DriverError::RequestDevice)?;

        let screen = match surface {
            Some(surface) => {
                let caps = surface.get_capabilities(&adapter);
                let format =
                    surface::choose_surface_format(&caps.formats, &config.preferred_surface_formats)
                        .ok_or(DriverError::UnsupportedSurface)?;
                let alpha_mode = surface::choose_alpha_mode(&caps.alpha_modes, config.alpha_mode);
                log::debug!("surface format {format:?}, alpha mode {alpha_mode:?}");

                // Configured once the screen image size is known.
                let config = wgpu::SurfaceConfiguration {
                    usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
                    format,
                    width: 0,
                    height: 0,
                    present_mode: config.present_mode,
                    alpha_mode,
                    view_formats: vec![],
                    desired_maximum_frame_latency: config.desired_maximum_frame_latency,
                };

                Some(ScreenSurface {
                    surface,
                    config,
                    configured: false,
                })
            }
            None => None,
        };

        Ok(Self {
            _instance: instance,
            adapter,
            device,
            queue,
            screen,
        })
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    /// Name and backend of the adapter the device was opened on.
    pub fn adapter_info(&self) -> wgpu::AdapterInfo {
        self.adapter.get_info()
    }

    /// Largest texture edge the device accepts.
    pub fn max_texture_dimension(&self) -> u32 {
        self.device.limits().max_texture_dimension_2d
    }

    /// Format of the presentable surface, or `None` when headless.
    pub fn surface_format(&self) -> Option<wgpu::TextureFormat> {
        self.screen.as_ref().map(|s| s.config.format)
    }

    /// Sets the drawable size. A 0x0 size is remembered but not applied.
    pub fn configure_screen(&mut self, width: u32, height: u32) -> DriverResult<()> {
        let screen = self.screen.as_mut().ok_or(DriverError::NoSurface)?;
        screen.configured =
            surface::apply_resize(&screen.surface, &self.device, &mut screen.config, width, height);
        if !screen.configured {
            log::debug!("deferring surface configuration for {width}x{height}");
        }
        Ok(())
    }

    /// Acquires the next drawable.
    ///
    /// On failure the surface is reconfigured when that helps the next frame,
    /// but the error is always returned.
    pub fn acquire_drawable(&self) -> DriverResult<Drawable> {
        let screen = self.screen.as_ref().ok_or(DriverError::NoSurface)?;
        if !screen.configured {
            return Err(DriverError::Drawable {
                source: wgpu::SurfaceError::Outdated,
                action: SurfaceErrorAction::SkipFrame,
            });
        }

        match screen.surface.get_current_texture() {
            Ok(surface_texture) => Ok(Drawable::new(surface_texture)),
            Err(err) => {
                let action =
                    surface::map_surface_error(&screen.surface, &self.device, &screen.config, &err);
                Err(DriverError::Drawable { source: err, action })
            }
        }
    }

    /// Blocks until every submitted command buffer has completed.
    pub fn wait_idle(&self) -> DriverResult<()> {
        self.device
            .poll(wgpu::PollType::wait_indefinitely())
            .map(|_| ())
            .map_err(DriverError::Poll)
    }
}
