//! Backend-agnostic drawing vocabulary.
//!
//! These types are shared between the renderer above the driver and any
//! backend below it. Nothing here records or submits GPU commands.

mod batch;
mod color_matrix;
mod composite;
mod contract;
mod size;
mod vertex;

pub use batch::QuadBatch;
pub use color_matrix::ColorMatrix;
pub use composite::{BlendFactor, CompositeMode};
pub use contract::{Filter, GraphicsDriver};
pub use size::{next_power_of_two, padded_size};
pub use vertex::Vertex;
