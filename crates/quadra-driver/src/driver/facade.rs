use std::sync::Arc;

use crate::device::{DriverConfig, DriverError, DriverResult, NativeWindow};
use crate::dispatch::Dispatcher;
use crate::graphics::{ColorMatrix, CompositeMode, Filter, GraphicsDriver, Vertex};
use crate::submit::DrawParams;
use crate::texture::ImageId;

use super::backend::{Backend, WorkerState};

/// Handle to a driver image.
///
/// Sizes are logical: the backing texture may be larger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    id: ImageId,
    width: u32,
    height: u32,
    padded_width: u32,
    padded_height: u32,
    screen: bool,
}

impl Image {
    pub fn id(&self) -> ImageId {
        self.id
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Size of the backing texture. Vertex UVs are relative to this size.
    ///
    /// The screen image is never padded.
    pub fn padded_size(&self) -> (u32, u32) {
        (self.padded_width, self.padded_height)
    }

    /// Whether this image is the presentable surface.
    pub fn is_screen(&self) -> bool {
        self.screen
    }
}

/// The draw driver.
///
/// Every GPU call runs on a dedicated dispatcher thread; each method blocks
/// until its work is done. Nothing native exists until [`reset`](Self::reset).
pub struct Driver {
    dispatcher: Dispatcher<WorkerState>,

    /// Device limit once reset, the configured fallback before.
    max_image_size: u32,

    source: Option<ImageId>,
    destination: Option<ImageId>,
}

impl Driver {
    /// Starts the dispatcher. `window`, when given, becomes the presentable
    /// surface at reset; without it the driver is headless.
    pub fn new(config: DriverConfig, window: Option<Arc<dyn NativeWindow>>) -> DriverResult<Self> {
        let name = config.worker_name.clone();
        let max_image_size = config.fallback_max_image_size;
        let dispatcher = Dispatcher::spawn(name, move || WorkerState::new(config, window))?;

        Ok(Self {
            dispatcher,
            max_image_size,
            source: None,
            destination: None,
        })
    }

    /// Headless driver with the default configuration.
    pub fn headless() -> DriverResult<Self> {
        Self::new(DriverConfig::default(), None)
    }

    /// (Re)creates device, queue, surface, samplers and pipelines.
    ///
    /// Images created before a reset are gone afterwards; their handles report
    /// [`DriverError::UnknownImage`].
    pub fn reset(&mut self) -> DriverResult<()> {
        self.source = None;
        self.destination = None;
        self.max_image_size = self.dispatcher.run(WorkerState::reset)??;
        Ok(())
    }

    pub fn new_image(&mut self, width: u32, height: u32) -> DriverResult<Image> {
        let (id, (padded_width, padded_height)) =
            self.with_backend(move |b| b.new_image(width, height))?;
        Ok(Image {
            id,
            width,
            height,
            padded_width,
            padded_height,
            screen: false,
        })
    }

    /// Configures the presentable surface to `width x height` and returns it
    /// as an image. Fails with `NoSurface` when headless.
    pub fn new_screen_framebuffer_image(&mut self, width: u32, height: u32) -> DriverResult<Image> {
        let id = self.with_backend(move |b| b.new_screen_image(width, height))?;
        Ok(Image {
            id,
            width,
            height,
            padded_width: width,
            padded_height: height,
            screen: true,
        })
    }

    /// Reconfigures the surface after the host window was resized.
    ///
    /// A 0x0 size is accepted; screen draws fail until a real size arrives.
    pub fn resize_screen(&mut self, screen: &mut Image, width: u32, height: u32) -> DriverResult<()> {
        let id = screen.id;
        self.with_backend(move |b| b.resize_screen(id, width, height))?;
        screen.width = width;
        screen.height = height;
        screen.padded_width = width;
        screen.padded_height = height;
        Ok(())
    }

    pub fn set_vertices(&mut self, vertices: &[Vertex], indices: &[u16]) -> DriverResult<()> {
        let vertices = vertices.to_vec();
        let indices = indices.to_vec();
        self.with_backend(move |b| {
            b.set_vertices(&vertices, &indices);
            Ok(())
        })
    }

    pub fn draw(
        &mut self,
        index_count: u32,
        index_offset: u32,
        mode: CompositeMode,
        color_matrix: &ColorMatrix,
        filter: Filter,
    ) -> DriverResult<()> {
        let destination = self.destination.ok_or(DriverError::NoDestination)?;
        if index_count == 0 {
            return Ok(());
        }

        let source = self.source;
        let params = DrawParams {
            index_count,
            index_offset,
            mode,
            color_matrix: *color_matrix,
            filter,
        };
        self.with_backend(move |b| b.draw(destination, source, params))
    }

    pub fn flush(&mut self) -> DriverResult<()> {
        self.with_backend(|b| b.flush())
    }

    pub fn max_image_size(&self) -> u32 {
        self.max_image_size
    }

    pub fn reset_source(&mut self) {
        self.source = None;
    }

    pub fn set_as_source(&mut self, image: &Image) {
        self.source = Some(image.id);
    }

    pub fn set_as_destination(&mut self, image: &Image) {
        self.destination = Some(image.id);
    }

    /// Reads the image back as tightly packed RGBA8, `4 * width * height` bytes.
    pub fn pixels(&self, image: &Image) -> DriverResult<Vec<u8>> {
        let id = image.id;
        self.with_backend(move |b| b.pixels(id))
    }

    /// Uploads tightly packed RGBA8 into the `width x height` region at `(x, y)`.
    pub fn replace_pixels(
        &self,
        image: &Image,
        pixels: &[u8],
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    ) -> DriverResult<()> {
        let id = image.id;
        let pixels = pixels.to_vec();
        self.with_backend(move |b| b.replace_pixels(id, &pixels, x, y, width, height))
    }

    /// Always false: wgpu does not lose texture contents.
    pub fn is_invalidated(&self, _image: &Image) -> bool {
        false
    }

    pub fn dispose(&mut self, image: Image) -> DriverResult<()> {
        let id = image.id;
        if self.source == Some(id) {
            self.source = None;
        }
        if self.destination == Some(id) {
            self.destination = None;
        }
        self.with_backend(move |b| b.dispose(id))
    }

    /// Runs `job` against the backend on the dispatcher thread.
    fn with_backend<R, F>(&self, job: F) -> DriverResult<R>
    where
        F: FnOnce(&mut Backend) -> DriverResult<R> + Send + 'static,
        R: Send + 'static,
    {
        self.dispatcher.run(move |state| match state.backend.as_mut() {
            Some(backend) => job(backend),
            None => Err(DriverError::NotInitialized),
        })?
    }
}

impl GraphicsDriver for Driver {
    type Image = Image;
    type Error = DriverError;

    fn reset(&mut self) -> DriverResult<()> {
        Driver::reset(self)
    }

    fn new_image(&mut self, width: u32, height: u32) -> DriverResult<Image> {
        Driver::new_image(self, width, height)
    }

    fn new_screen_framebuffer_image(&mut self, width: u32, height: u32) -> DriverResult<Image> {
        Driver::new_screen_framebuffer_image(self, width, height)
    }

    fn set_vertices(&mut self, vertices: &[Vertex], indices: &[u16]) -> DriverResult<()> {
        Driver::set_vertices(self, vertices, indices)
    }

    fn draw(
        &mut self,
        index_count: u32,
        index_offset: u32,
        mode: CompositeMode,
        color_matrix: &ColorMatrix,
        filter: Filter,
    ) -> DriverResult<()> {
        Driver::draw(self, index_count, index_offset, mode, color_matrix, filter)
    }

    fn flush(&mut self) -> DriverResult<()> {
        Driver::flush(self)
    }

    fn max_image_size(&self) -> u32 {
        Driver::max_image_size(self)
    }

    fn reset_source(&mut self) {
        Driver::reset_source(self)
    }

    fn set_as_source(&mut self, image: &Image) {
        Driver::set_as_source(self, image)
    }

    fn set_as_destination(&mut self, image: &Image) {
        Driver::set_as_destination(self, image)
    }

    fn pixels(&self, image: &Image) -> DriverResult<Vec<u8>> {
        Driver::pixels(self, image)
    }

    fn replace_pixels(
        &self,
        image: &Image,
        pixels: &[u8],
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    ) -> DriverResult<()> {
        Driver::replace_pixels(self, image, pixels, x, y, width, height)
    }

    fn is_invalidated(&self, image: &Image) -> bool {
        Driver::is_invalidated(self, image)
    }

    fn dispose(&mut self, image: Image) -> DriverResult<()> {
        Driver::dispose(self, image)
    }
}
