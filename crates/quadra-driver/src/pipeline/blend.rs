use crate::graphics::{BlendFactor, CompositeMode};

pub(crate) fn factor(f: BlendFactor) -> wgpu::BlendFactor {
    match f {
        BlendFactor::Zero => wgpu::BlendFactor::Zero,
        BlendFactor::One => wgpu::BlendFactor::One,
        BlendFactor::SrcAlpha => wgpu::BlendFactor::SrcAlpha,
        BlendFactor::DstAlpha => wgpu::BlendFactor::DstAlpha,
        BlendFactor::OneMinusSrcAlpha => wgpu::BlendFactor::OneMinusSrcAlpha,
        BlendFactor::OneMinusDstAlpha => wgpu::BlendFactor::OneMinusDstAlpha,
    }
}

/// Fixed-function blend state for `mode`; color and alpha share the factors.
pub(crate) fn blend_state(mode: CompositeMode) -> wgpu::BlendState {
    let (src, dst) = mode.factors();
    let component = wgpu::BlendComponent {
        src_factor: factor(src),
        dst_factor: factor(dst),
        operation: wgpu::BlendOperation::Add,
    };
    wgpu::BlendState {
        color: component,
        alpha: component,
    }
}

/// Presentation overwrites the drawable.
pub(crate) fn screen_blend_state() -> wgpu::BlendState {
    blend_state(CompositeMode::Copy)
}
