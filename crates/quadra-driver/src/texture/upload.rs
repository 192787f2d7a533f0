use crate::device::{DriverError, DriverResult};

/// Bytes per RGBA8 pixel.
pub const BYTES_PER_PIXEL: u32 = 4;

/// Checks that a `width x height` region at `(x, y)` fits inside a logical
/// `image_width x image_height` image.
pub fn validate_region(
    x: u32,
    y: u32,
    width: u32,
    height: u32,
    image_width: u32,
    image_height: u32,
) -> DriverResult<()> {
    let fits_x = x.checked_add(width).is_some_and(|r| r <= image_width);
    let fits_y = y.checked_add(height).is_some_and(|b| b <= image_height);
    if fits_x && fits_y {
        return Ok(());
    }
    Err(DriverError::PixelRegion {
        x,
        y,
        width,
        height,
        image_width,
        image_height,
    })
}

/// Checks that `pixels` holds exactly one tightly packed RGBA8 region.
pub fn validate_length(pixels: &[u8], width: u32, height: u32) -> DriverResult<()> {
    let expected = (BYTES_PER_PIXEL as usize) * width as usize * height as usize;
    if pixels.len() != expected {
        return Err(DriverError::PixelLength {
            expected,
            actual: pixels.len(),
        });
    }
    Ok(())
}

/// Records an upload of tightly packed RGBA8 into a sub-region of `texture`.
///
/// Row stride is `4 * width`. The write lands before the next submission.
pub fn write_region(
    queue: &wgpu::Queue,
    texture: &wgpu::Texture,
    pixels: &[u8],
    x: u32,
    y: u32,
    width: u32,
    height: u32,
) {
    if width == 0 || height == 0 {
        return;
    }

    queue.write_texture(
        wgpu::TexelCopyTextureInfo {
            texture,
            mip_level: 0,
            origin: wgpu::Origin3d { x, y, z: 0 },
            aspect: wgpu::TextureAspect::All,
        },
        pixels,
        wgpu::TexelCopyBufferLayout {
            offset: 0,
            bytes_per_row: Some(BYTES_PER_PIXEL * width),
            rows_per_image: Some(height),
        },
        wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
    );
}
