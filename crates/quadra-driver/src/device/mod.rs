//! GPU device + surface management.
//!
//! This module is responsible for:
//! - creating the wgpu Instance/Adapter/Device/Queue
//! - creating & configuring the Surface for the host window
//! - acquiring drawables and waiting on queue completion
//! - the driver's error type

mod error;
mod frame;
mod gpu;
mod init;
mod surface;

pub use error::{DriverError, DriverResult, SurfaceErrorAction};
pub use frame::Drawable;
pub use gpu::Gpu;
pub use init::DriverConfig;
pub use surface::NativeWindow;
