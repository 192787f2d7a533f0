//! Driver facade.
//!
//! [`Driver`] is what the renderer talks to. It keeps the per-frame bindings
//! on the caller's thread and forwards everything else to the dispatcher,
//! which owns the device and the image table.

mod backend;
mod facade;

pub use facade::{Driver, Image};
