use crate::dispatch::DispatchError;
use crate::texture::ImageId;

/// High-level response after a surface error.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SurfaceErrorAction {
    /// Surface was reconfigured; the next frame may succeed.
    Reconfigured,
    /// Transient error; the next frame may succeed without changes.
    SkipFrame,
    /// Fatal error (commonly OOM).
    Fatal,
}

/// Every failure the driver can report. Nothing is retried internally.
#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    // ── initialization ────────────────────────────────────────────────────
    #[error("driver is not initialized; call reset() first")]
    NotInitialized,

    #[error("failed to find a suitable GPU adapter")]
    AdapterNotFound(#[source] wgpu::RequestAdapterError),

    #[error("failed to create wgpu device/queue")]
    RequestDevice(#[source] wgpu::RequestDeviceError),

    #[error("failed to create wgpu surface")]
    CreateSurface(#[source] wgpu::CreateSurfaceError),

    #[error("no supported surface formats")]
    UnsupportedSurface,

    #[error("shader '{label}' failed to compile: {message}")]
    Shader { label: &'static str, message: String },

    // ── per draw ──────────────────────────────────────────────────────────
    #[error("driver has no presentable surface")]
    NoSurface,

    #[error("failed to acquire drawable ({action:?})")]
    Drawable {
        #[source]
        source: wgpu::SurfaceError,
        action: SurfaceErrorAction,
    },

    #[error("no destination image bound")]
    NoDestination,

    #[error("draw issued before set_vertices")]
    NoVertices,

    #[error("index range {start}..{end} exceeds {len} indices")]
    IndexRange { start: u64, end: u64, len: u32 },

    #[error("image {0:?} is bound as both source and destination")]
    SourceIsDestination(ImageId),

    #[error("screen image {0:?} cannot be sampled as a draw source")]
    ScreenSource(ImageId),

    // ── resources ─────────────────────────────────────────────────────────
    #[error("invalid image size {width}x{height} (max {max})")]
    InvalidImageSize { width: u32, height: u32, max: u32 },

    #[error("unknown image {0:?}")]
    UnknownImage(ImageId),

    #[error("screen image {0:?} has no readable or writable texture")]
    ScreenPixels(ImageId),

    #[error("region {width}x{height} at ({x}, {y}) is outside the {image_width}x{image_height} image")]
    PixelRegion {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        image_width: u32,
        image_height: u32,
    },

    #[error("expected {expected} bytes of pixel data, got {actual}")]
    PixelLength { expected: usize, actual: usize },

    #[error("texture readback failed")]
    Readback(#[source] wgpu::BufferAsyncError),

    #[error("readback callback was dropped before completing")]
    ReadbackDropped,

    #[error("waiting for the GPU failed")]
    Poll(#[source] wgpu::PollError),

    // ── dispatcher ────────────────────────────────────────────────────────
    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}

pub type DriverResult<T> = Result<T, DriverError>;
