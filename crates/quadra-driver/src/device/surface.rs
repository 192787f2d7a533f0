use raw_window_handle::{HasDisplayHandle, HasWindowHandle};

use super::SurfaceErrorAction;

/// A platform window the driver can present into.
///
/// Anything exposing raw window/display handles and safe to move onto the
/// dispatcher thread qualifies, e.g. `winit::window::Window`.
pub trait NativeWindow: HasWindowHandle + HasDisplayHandle + Send + Sync + 'static {}

impl<T> NativeWindow for T where T: HasWindowHandle + HasDisplayHandle + Send + Sync + 'static {}

/// Picks the first preferred format the surface supports, else its first format.
pub(crate) fn choose_surface_format(
    formats: &[wgpu::TextureFormat],
    preferred: &[wgpu::TextureFormat],
) -> Option<wgpu::TextureFormat> {
    if formats.is_empty() {
        return None;
    }

    for f in preferred {
        if formats.contains(f) {
            return Some(*f);
        }
    }

    Some(formats[0])
}

pub(crate) fn choose_alpha_mode(
    supported: &[wgpu::CompositeAlphaMode],
    requested: Option<wgpu::CompositeAlphaMode>,
) -> wgpu::CompositeAlphaMode {
    requested
        .filter(|m| supported.contains(m))
        .or_else(|| supported.first().copied())
        .unwrap_or(wgpu::CompositeAlphaMode::Auto)
}

/// Updates the configured drawable size.
///
/// wgpu does not support configuring a surface with a 0x0 size; in that case
/// configuration is deferred and `false` is returned.
pub(crate) fn apply_resize(
    surface: &wgpu::Surface<'static>,
    device: &wgpu::Device,
    config: &mut wgpu::SurfaceConfiguration,
    width: u32,
    height: u32,
) -> bool {
    if width == 0 || height == 0 {
        return false;
    }

    config.width = width;
    config.height = height;
    surface.configure(device, config);
    true
}

/// Classifies a drawable acquisition failure, reconfiguring the surface when
/// that is what the next frame needs.
pub(crate) fn map_surface_error(
    surface: &wgpu::Surface<'static>,
    device: &wgpu::Device,
    config: &wgpu::SurfaceConfiguration,
    err: &wgpu::SurfaceError,
) -> SurfaceErrorAction {
    match err {
        wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => {
            if config.width > 0 && config.height > 0 {
                log::warn!("surface {err:?}; reconfiguring for the next frame");
                surface.configure(device, config);
            }
            SurfaceErrorAction::Reconfigured
        }
        wgpu::SurfaceError::OutOfMemory => SurfaceErrorAction::Fatal,
        wgpu::SurfaceError::Timeout => SurfaceErrorAction::SkipFrame,
        wgpu::SurfaceError::Other => SurfaceErrorAction::SkipFrame,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wgpu::CompositeAlphaMode as A;
    use wgpu::TextureFormat as F;

    #[test]
    fn format_prefers_first_supported_preference() {
        let formats = [F::Bgra8UnormSrgb, F::Rgba8Unorm, F::Bgra8Unorm];
        let chosen = choose_surface_format(&formats, &[F::Bgra8Unorm, F::Rgba8Unorm]);
        assert_eq!(chosen, Some(F::Bgra8Unorm));
    }

    #[test]
    fn format_falls_back_to_first_reported() {
        let formats = [F::Rgba16Float, F::Bgra8UnormSrgb];
        assert_eq!(choose_surface_format(&formats, &[F::Bgra8Unorm]), Some(F::Rgba16Float));
    }

    #[test]
    fn format_none_when_surface_reports_nothing() {
        assert_eq!(choose_surface_format(&[], &[F::Bgra8Unorm]), None);
    }

    #[test]
    fn alpha_mode_honors_supported_request() {
        let supported = [A::Opaque, A::PreMultiplied];
        assert_eq!(choose_alpha_mode(&supported, Some(A::PreMultiplied)), A::PreMultiplied);
    }

    #[test]
    fn alpha_mode_ignores_unsupported_request() {
        let supported = [A::Opaque];
        assert_eq!(choose_alpha_mode(&supported, Some(A::PostMultiplied)), A::Opaque);
        assert_eq!(choose_alpha_mode(&[], Some(A::PostMultiplied)), A::Auto);
    }
}
