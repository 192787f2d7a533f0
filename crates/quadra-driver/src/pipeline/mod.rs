//! Pre-built render pipelines.
//!
//! Blend factors are baked into pipeline state, so every composite mode gets
//! its own pipeline. All of them share one shader and one layout:
//! - group 0: viewport (vertex), color body, color translation, clear flag
//! - group 1: source texture + sampler

mod blend;
mod cache;
mod uniforms;

pub use cache::{PipelineCache, OFFSCREEN_FORMAT};
pub(crate) use uniforms::{
    color_uniforms, ColorBodyUniform, ColorTranslationUniform, FlagsUniform, ViewportUniform,
};
