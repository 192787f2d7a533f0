/// Initialization parameters for the driver.
///
/// Keep this structure stable and minimal. Add configuration flags only when a
/// concrete platform or backend requirement exists.
#[derive(Debug, Clone)]
pub struct DriverConfig {
    /// Backends wgpu may choose from.
    pub backends: wgpu::Backends,

    /// Adapter selection preference.
    pub power_preference: wgpu::PowerPreference,

    /// Use a software adapter. Mostly useful for CI.
    pub force_fallback_adapter: bool,

    /// Present mode (swap behavior).
    ///
    /// FIFO is broadly supported and keeps presentation display-synced.
    pub present_mode: wgpu::PresentMode,

    /// Optional alpha mode preference for the surface.
    ///
    /// If provided but unsupported on the current surface, a supported mode is selected.
    pub alpha_mode: Option<wgpu::CompositeAlphaMode>,

    /// Surface formats to try, in order. The first supported one wins; if none
    /// is supported the surface's first reported format is used.
    ///
    /// Colors produced by the compositor are already in display space, so the
    /// defaults are non-sRGB.
    pub preferred_surface_formats: Vec<wgpu::TextureFormat>,

    /// Desired maximum frame latency for the surface.
    ///
    /// This value is a hint; support depends on platform/backend.
    pub desired_maximum_frame_latency: u32,

    /// Reported by `max_image_size` before the device limits are known.
    pub fallback_max_image_size: u32,

    /// Name of the dispatcher thread.
    pub worker_name: String,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            backends: wgpu::Backends::all(),
            power_preference: wgpu::PowerPreference::HighPerformance,
            force_fallback_adapter: false,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: None,
            preferred_surface_formats: vec![
                wgpu::TextureFormat::Bgra8Unorm,
                wgpu::TextureFormat::Rgba8Unorm,
            ],
            desired_maximum_frame_latency: 2,
            fallback_max_image_size: 4096,
            worker_name: "quadra-gpu".to_string(),
        }
    }
}
