//! GPU image storage.
//!
//! Images are allocated at power-of-two sizes and addressed by their logical
//! size. Upload and readback are synchronous from the caller's point of view.

mod image;
mod readback;
mod upload;

pub use image::{ImageId, ImageTexture};
pub(crate) use image::placeholder_texture;
pub(crate) use readback::read_region;
pub(crate) use upload::{validate_length, validate_region, write_region};
