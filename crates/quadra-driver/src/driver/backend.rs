use std::collections::HashMap;
use std::sync::Arc;

use crate::device::{DriverConfig, DriverError, DriverResult, Gpu, NativeWindow};
use crate::graphics::{padded_size, Vertex};
use crate::pipeline::PipelineCache;
use crate::submit::{run_cycle, Destination, DrawBuffers, DrawCall, DrawParams, DrawResources};
use crate::texture::{
    read_region, validate_length, validate_region, write_region, ImageId, ImageTexture,
};

/// State owned by the dispatcher thread.
pub(crate) struct WorkerState {
    pub config: DriverConfig,
    pub window: Option<Arc<dyn NativeWindow>>,
    /// `None` until the first successful reset.
    pub backend: Option<Backend>,
}

impl WorkerState {
    pub fn new(config: DriverConfig, window: Option<Arc<dyn NativeWindow>>) -> Self {
        Self {
            config,
            window,
            backend: None,
        }
    }

    /// Tears down the current backend (if any) and builds a new one.
    ///
    /// Returns the device's maximum image size.
    pub fn reset(&mut self) -> DriverResult<u32> {
        if let Some(old) = self.backend.take() {
            log::info!("resetting driver; releasing {} images", old.images.len());
            old.destroy();
        }

        let backend = Backend::new(&self.config, self.window.clone())?;
        let max = backend.max_image_size();
        self.backend = Some(backend);
        Ok(max)
    }
}

/// The presentable surface, seen as an image.
#[derive(Debug, Copy, Clone)]
struct ScreenImage {
    id: ImageId,
    width: u32,
    height: u32,
}

/// Everything created by a reset.
pub(crate) struct Backend {
    gpu: Gpu,
    pipelines: PipelineCache,
    resources: DrawResources,
    buffers: DrawBuffers,
    images: HashMap<ImageId, ImageTexture>,
    screen: Option<ScreenImage>,
}

impl Backend {
    fn new(config: &DriverConfig, window: Option<Arc<dyn NativeWindow>>) -> DriverResult<Self> {
        let gpu = Gpu::new(config, window)?;
        let pipelines = PipelineCache::new(gpu.device(), gpu.surface_format())?;
        let resources = DrawResources::new(gpu.device(), &pipelines);

        let adapter = gpu.adapter_info();
        log::info!(
            "driver ready on '{}' ({:?}; max image size {}, {})",
            adapter.name,
            adapter.backend,
            gpu.max_texture_dimension(),
            if gpu.surface_format().is_some() { "with surface" } else { "headless" }
        );

        Ok(Self {
            gpu,
            pipelines,
            resources,
            buffers: DrawBuffers::new(),
            images: HashMap::new(),
            screen: None,
        })
    }

    fn destroy(mut self) {
        self.buffers.release();
        for (_, image) in self.images.drain() {
            image.destroy();
        }
    }

    pub fn max_image_size(&self) -> u32 {
        self.gpu.max_texture_dimension()
    }

    /// Creates an offscreen image and returns its id with the padded size.
    pub fn new_image(&mut self, width: u32, height: u32) -> DriverResult<(ImageId, (u32, u32))> {
        let max = self.max_image_size();
        let padded = checked_image_size(width, height, max)?;

        let image = ImageTexture::new(self.gpu.device(), self.gpu.queue(), (width, height), padded);
        self.gpu.wait_idle()?;

        let id = ImageId::next();
        log::debug!(
            "created image {id:?} {width}x{height} (padded {}x{})",
            padded.0,
            padded.1
        );
        self.images.insert(id, image);
        Ok((id, padded))
    }

    pub fn new_screen_image(&mut self, width: u32, height: u32) -> DriverResult<ImageId> {
        self.gpu.configure_screen(width, height)?;

        let id = ImageId::next();
        if let Some(previous) = self.screen.replace(ScreenImage { id, width, height }) {
            log::debug!("screen image {:?} replaced by {id:?}", previous.id);
        }
        Ok(id)
    }

    pub fn resize_screen(&mut self, id: ImageId, width: u32, height: u32) -> DriverResult<()> {
        let screen = self.screen_image(id)?;
        self.gpu.configure_screen(width, height)?;
        self.screen = Some(ScreenImage {
            width,
            height,
            ..screen
        });
        Ok(())
    }

    pub fn set_vertices(&mut self, vertices: &[Vertex], indices: &[u16]) {
        self.buffers.replace(self.gpu.device(), vertices, indices);
    }

    pub fn draw(
        &self,
        destination: ImageId,
        source: Option<ImageId>,
        params: DrawParams,
    ) -> DriverResult<()> {
        if source == Some(destination) {
            return Err(DriverError::SourceIsDestination(destination));
        }

        let destination = match self.screen {
            Some(screen) if screen.id == destination => Destination::Screen {
                width: screen.width,
                height: screen.height,
            },
            _ => Destination::Image(self.texture(destination, TextureUse::Pixels)?),
        };
        let source = source
            .map(|id| self.texture(id, TextureUse::Source))
            .transpose()?;

        run_cycle(&mut DrawCall {
            gpu: &self.gpu,
            pipelines: &self.pipelines,
            resources: &self.resources,
            buffers: &self.buffers,
            destination,
            source,
            params,
        })
    }

    pub fn flush(&self) -> DriverResult<()> {
        self.gpu.wait_idle()
    }

    pub fn pixels(&self, id: ImageId) -> DriverResult<Vec<u8>> {
        let image = self.texture(id, TextureUse::Pixels)?;
        let (width, height) = image.logical_size();

        self.gpu.wait_idle()?;
        read_region(&self.gpu, image.texture(), width, height)
    }

    pub fn replace_pixels(
        &self,
        id: ImageId,
        pixels: &[u8],
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    ) -> DriverResult<()> {
        let image = self.texture(id, TextureUse::Pixels)?;
        let (image_width, image_height) = image.logical_size();
        validate_region(x, y, width, height, image_width, image_height)?;
        validate_length(pixels, width, height)?;

        self.gpu.wait_idle()?;
        write_region(self.gpu.queue(), image.texture(), pixels, x, y, width, height);
        // Staged writes are flushed by the next submission.
        self.gpu.queue().submit(std::iter::empty());
        self.gpu.wait_idle()
    }

    pub fn dispose(&mut self, id: ImageId) -> DriverResult<()> {
        if self.screen.is_some_and(|s| s.id == id) {
            self.screen = None;
            log::debug!("disposed screen image {id:?}");
            return Ok(());
        }

        let image = self.images.remove(&id).ok_or(DriverError::UnknownImage(id))?;
        image.destroy();
        log::debug!("disposed image {id:?}");
        Ok(())
    }

    /// Offscreen texture for `id`. The screen image has none.
    fn texture(&self, id: ImageId, usage: TextureUse) -> DriverResult<&ImageTexture> {
        match self.images.get(&id) {
            Some(image) => Ok(image),
            None => Err(missing_texture(id, self.screen.map(|s| s.id), usage)),
        }
    }

    fn screen_image(&self, id: ImageId) -> DriverResult<ScreenImage> {
        match self.screen {
            Some(screen) if screen.id == id => Ok(screen),
            _ => Err(DriverError::UnknownImage(id)),
        }
    }
}

/// Why a texture is being looked up.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum TextureUse {
    /// Read back, written, or rendered into.
    Pixels,
    /// Sampled by a draw.
    Source,
}

/// Error for an id with no offscreen texture behind it.
fn missing_texture(id: ImageId, screen: Option<ImageId>, usage: TextureUse) -> DriverError {
    match usage {
        _ if screen != Some(id) => DriverError::UnknownImage(id),
        TextureUse::Pixels => DriverError::ScreenPixels(id),
        TextureUse::Source => DriverError::ScreenSource(id),
    }
}

/// Padded size for a `width x height` image, or `InvalidImageSize` when
/// either axis is zero or pads past `max`.
fn checked_image_size(width: u32, height: u32, max: u32) -> DriverResult<(u32, u32)> {
    padded_size(width, height)
        .filter(|&(w, h)| width > 0 && height > 0 && w <= max && h <= max)
        .ok_or(DriverError::InvalidImageSize { width, height, max })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_size_is_padded_per_axis() {
        assert_eq!(checked_image_size(100, 60, 4096).unwrap(), (128, 64));
        assert_eq!(checked_image_size(4096, 1, 4096).unwrap(), (4096, 1));
    }

    #[test]
    fn image_size_rejects_zero_and_oversized_axes() {
        for (width, height) in [(0, 1), (1, 0), (4097, 1), (1, 3000)] {
            let err = checked_image_size(width, height, 4096).unwrap_err();
            assert!(
                matches!(err, DriverError::InvalidImageSize { width: w, height: h, max: 4096 } if w == width && h == height),
                "{width}x{height}: {err}"
            );
        }
    }

    #[test]
    fn image_size_rejects_widths_that_cannot_pad() {
        let err = checked_image_size(3_000_000_000, 1, u32::MAX).unwrap_err();
        assert!(matches!(
            err,
            DriverError::InvalidImageSize { width: 3_000_000_000, height: 1, .. }
        ));
    }

    #[test]
    fn screen_image_cannot_be_sampled() {
        let screen = ImageId::next();
        let err = missing_texture(screen, Some(screen), TextureUse::Source);
        assert!(matches!(err, DriverError::ScreenSource(id) if id == screen));
        assert!(err.to_string().contains("sampled"));
    }

    #[test]
    fn screen_image_has_no_pixels() {
        let screen = ImageId::next();
        let err = missing_texture(screen, Some(screen), TextureUse::Pixels);
        assert!(matches!(err, DriverError::ScreenPixels(id) if id == screen));
    }

    #[test]
    fn ids_other_than_the_screen_are_unknown() {
        let screen = ImageId::next();
        let other = ImageId::next();
        for usage in [TextureUse::Pixels, TextureUse::Source] {
            assert!(matches!(
                missing_texture(other, Some(screen), usage),
                DriverError::UnknownImage(id) if id == other
            ));
            assert!(matches!(
                missing_texture(other, None, usage),
                DriverError::UnknownImage(id) if id == other
            ));
        }
    }
}
