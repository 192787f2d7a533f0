//! Renderers are written against `GraphicsDriver`; the same code runs on a
//! recording fake and on the wgpu driver.

mod common;

use std::convert::Infallible;

use common::{assert_rect, driver, filled_image, CLEAR, RED};
use quadra_driver::{ColorMatrix, CompositeMode, Filter, GraphicsDriver, QuadBatch, Vertex};

/// Copies `src` into `dst` at `(x, y)`, one quad, source-over.
fn blit<D: GraphicsDriver>(
    driver: &mut D,
    src: &D::Image,
    src_uv: [f32; 4],
    size: (u32, u32),
    dst: &D::Image,
    (x, y): (f32, f32),
) -> Result<(), D::Error> {
    let mut batch = QuadBatch::new();
    let offset = batch
        .push([x, y, size.0 as f32, size.1 as f32], src_uv, [1.0; 4])
        .unwrap_or_default();

    driver.set_vertices(batch.vertices(), batch.indices())?;
    driver.set_as_destination(dst);
    driver.set_as_source(src);
    driver.draw(6, offset, CompositeMode::SourceOver, &ColorMatrix::identity(), Filter::Nearest)?;
    driver.reset_source();
    driver.flush()
}

#[derive(Debug, PartialEq)]
enum Call {
    SetVertices(usize, usize),
    Destination(u32),
    Source(u32),
    Draw(u32, u32, CompositeMode),
    ResetSource,
    Flush,
}

#[derive(Default)]
struct Recorder {
    calls: Vec<Call>,
    next: u32,
}

impl GraphicsDriver for Recorder {
    type Image = u32;
    type Error = Infallible;

    fn reset(&mut self) -> Result<(), Infallible> {
        Ok(())
    }

    fn new_image(&mut self, _: u32, _: u32) -> Result<u32, Infallible> {
        self.next += 1;
        Ok(self.next)
    }

    fn new_screen_framebuffer_image(&mut self, w: u32, h: u32) -> Result<u32, Infallible> {
        self.new_image(w, h)
    }

    fn set_vertices(&mut self, vertices: &[Vertex], indices: &[u16]) -> Result<(), Infallible> {
        self.calls.push(Call::SetVertices(vertices.len(), indices.len()));
        Ok(())
    }

    fn draw(
        &mut self,
        index_count: u32,
        index_offset: u32,
        mode: CompositeMode,
        _: &ColorMatrix,
        _: Filter,
    ) -> Result<(), Infallible> {
        self.calls.push(Call::Draw(index_count, index_offset, mode));
        Ok(())
    }

    fn flush(&mut self) -> Result<(), Infallible> {
        self.calls.push(Call::Flush);
        Ok(())
    }

    fn max_image_size(&self) -> u32 {
        4096
    }

    fn reset_source(&mut self) {
        self.calls.push(Call::ResetSource);
    }

    fn set_as_source(&mut self, image: &u32) {
        self.calls.push(Call::Source(*image));
    }

    fn set_as_destination(&mut self, image: &u32) {
        self.calls.push(Call::Destination(*image));
    }

    fn pixels(&self, _: &u32) -> Result<Vec<u8>, Infallible> {
        Ok(Vec::new())
    }

    fn replace_pixels(&self, _: &u32, _: &[u8], _: u32, _: u32, _: u32, _: u32) -> Result<(), Infallible> {
        Ok(())
    }

    fn is_invalidated(&self, _: &u32) -> bool {
        false
    }

    fn dispose(&mut self, _: u32) -> Result<(), Infallible> {
        Ok(())
    }
}

#[test]
fn blit_issues_one_bound_draw_on_a_fake() {
    let mut fake = Recorder::default();
    let src = fake.new_image(8, 8).unwrap();
    let dst = fake.new_image(16, 16).unwrap();

    blit(&mut fake, &src, [0.0, 0.0, 1.0, 1.0], (8, 8), &dst, (4.0, 4.0)).unwrap();

    assert_eq!(
        fake.calls,
        [
            Call::SetVertices(4, 6),
            Call::Destination(dst),
            Call::Source(src),
            Call::Draw(6, 0, CompositeMode::SourceOver),
            Call::ResetSource,
            Call::Flush,
        ]
    );
}

#[test]
fn blit_draws_on_the_gpu_driver() {
    let Some(mut driver) = driver("blit_draws_on_the_gpu_driver") else {
        return;
    };

    let src = filled_image(&mut driver, 8, 8, RED);
    let dst = driver.new_image(16, 16).unwrap();
    let uv = QuadBatch::logical_uv(8, 8, 8, 8);

    blit(&mut *driver, &src, uv, (8, 8), &dst, (4.0, 4.0)).unwrap();

    assert_rect(&driver.pixels(&dst).unwrap(), 16, 16, [4, 4, 8, 8], RED, CLEAR);
    driver.dispose(src).unwrap();
    driver.dispose(dst).unwrap();
}
