use super::{ColorMatrix, CompositeMode, Vertex};

/// Sampling filter for the source image.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub enum Filter {
    #[default]
    Nearest,
    Linear,
}

/// Contract between the backend-agnostic renderer and a draw backend.
///
/// The renderer accumulates one frame of geometry, uploads it once with
/// [`set_vertices`](Self::set_vertices), then issues one [`draw`](Self::draw)
/// per (destination, source, mode) batch. Every call is synchronous: when it
/// returns, its GPU-visible effects are complete.
pub trait GraphicsDriver {
    /// Opaque image handle. Sizes reported by the handle are logical sizes.
    type Image;
    type Error: std::error::Error + Send + Sync + 'static;

    /// (Re)creates device, queue, presentable surface and pipelines.
    fn reset(&mut self) -> Result<(), Self::Error>;

    /// Allocates an offscreen image cleared to transparent.
    fn new_image(&mut self, width: u32, height: u32) -> Result<Self::Image, Self::Error>;

    /// Binds the presentable surface as an image of the given size.
    fn new_screen_framebuffer_image(
        &mut self,
        width: u32,
        height: u32,
    ) -> Result<Self::Image, Self::Error>;

    /// Replaces the shared vertex and index buffers.
    fn set_vertices(&mut self, vertices: &[Vertex], indices: &[u16]) -> Result<(), Self::Error>;

    /// Draws `index_count` indices starting at `index_offset` into the bound
    /// destination, sampling the bound source if any.
    fn draw(
        &mut self,
        index_count: u32,
        index_offset: u32,
        mode: CompositeMode,
        color_matrix: &ColorMatrix,
        filter: Filter,
    ) -> Result<(), Self::Error>;

    /// Blocks until all submitted work has completed.
    fn flush(&mut self) -> Result<(), Self::Error>;

    fn max_image_size(&self) -> u32;

    fn reset_source(&mut self);

    fn set_as_source(&mut self, image: &Self::Image);

    fn set_as_destination(&mut self, image: &Self::Image);

    /// Reads back the logical region as tightly packed RGBA8.
    fn pixels(&self, image: &Self::Image) -> Result<Vec<u8>, Self::Error>;

    /// Uploads tightly packed RGBA8 (`4 * width` bytes per row) into a sub-region.
    fn replace_pixels(
        &self,
        image: &Self::Image,
        pixels: &[u8],
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    ) -> Result<(), Self::Error>;

    /// Whether the backend lost the image's contents (context loss).
    fn is_invalidated(&self, image: &Self::Image) -> bool;

    /// Releases the image's GPU resources.
    fn dispose(&mut self, image: Self::Image) -> Result<(), Self::Error>;
}
