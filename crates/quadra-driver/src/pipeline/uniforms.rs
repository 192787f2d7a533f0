use bytemuck::{Pod, Zeroable};

use crate::graphics::ColorMatrix;

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(crate) struct ViewportUniform {
    pub size: [f32; 2],
    pub _pad: [f32; 2], // 16-byte alignment
}

impl ViewportUniform {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: [width.max(1) as f32, height.max(1) as f32],
            _pad: [0.0; 2],
        }
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(crate) struct ColorBodyUniform {
    pub m: [f32; 16],
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(crate) struct ColorTranslationUniform {
    pub v: [f32; 4],
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(crate) struct FlagsUniform {
    pub clear: u32,
    pub _pad: [u32; 3],
}

impl FlagsUniform {
    pub fn new(clear: bool) -> Self {
        Self {
            clear: u32::from(clear),
            _pad: [0; 3],
        }
    }
}

/// Splits a color matrix into the two uniform blocks the fragment stage reads.
pub(crate) fn color_uniforms(m: &ColorMatrix) -> (ColorBodyUniform, ColorTranslationUniform) {
    (
        ColorBodyUniform { m: m.body_columns() },
        ColorTranslationUniform { v: m.translation() },
    )
}

/// Minimum binding size for a uniform of type `T`.
///
/// Every uniform here has a non-zero size, so this never fails in practice.
pub(crate) fn min_binding_size<T>() -> Option<std::num::NonZeroU64> {
    std::num::NonZeroU64::new(std::mem::size_of::<T>() as u64)
}
