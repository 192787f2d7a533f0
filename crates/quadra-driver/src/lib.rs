//! Quadra draw driver.
//!
//! This crate turns a backend-agnostic stream of geometry, image and blend
//! commands into wgpu draws. All GPU work is funneled through one dispatcher
//! thread; the [`Driver`] facade can live anywhere.

pub mod device;
pub mod dispatch;
pub mod driver;
pub mod graphics;
pub mod logging;
pub mod pipeline;
pub mod submit;
pub mod texture;

pub use device::{DriverConfig, DriverError, DriverResult, NativeWindow, SurfaceErrorAction};
pub use driver::{Driver, Image};
pub use graphics::{ColorMatrix, CompositeMode, Filter, GraphicsDriver, QuadBatch, Vertex};
pub use texture::ImageId;
