/// A presentable surface texture acquired for one draw.
///
/// Holding it prevents acquisition of subsequent drawables; present or drop it
/// promptly.
pub struct Drawable {
    surface_texture: wgpu::SurfaceTexture,
    view: wgpu::TextureView,
}

impl Drawable {
    pub(crate) fn new(surface_texture: wgpu::SurfaceTexture) -> Self {
        let view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        Self {
            surface_texture,
            view,
        }
    }

    pub fn view(&self) -> &wgpu::TextureView {
        &self.view
    }

    /// Schedules the drawable for presentation. Call after submission.
    pub fn present(self) {
        drop(self.view);
        self.surface_texture.present();
    }
}
