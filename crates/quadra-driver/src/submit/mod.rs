//! Command submission.
//!
//! Each draw records one command buffer, submits it and waits for the GPU
//! before returning. The ordering lives in [`run_cycle`]; [`DrawCall`] supplies
//! the wgpu work for each step.

mod buffers;
mod draw;
mod stages;

pub use buffers::DrawBuffers;
pub use draw::{Destination, DrawCall, DrawParams, DrawResources, Target};
pub use stages::{run_cycle, FrameStages};
