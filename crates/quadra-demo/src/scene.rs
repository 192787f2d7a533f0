use std::time::Instant;

use anyhow::{Context, Result};

use quadra_driver::{
    ColorMatrix, CompositeMode, Driver, DriverResult, Filter, Image, QuadBatch,
};

const SPRITE: u32 = 48;
const CANVAS_W: u32 = 320;
const CANVAS_H: u32 = 200;

/// A checkerboard sprite bouncing around an offscreen canvas, which is then
/// stretched onto the screen with a pulsing color matrix.
pub struct Scene {
    screen: Image,
    sprite: Image,
    canvas: Image,
    batch: QuadBatch,
    started: Instant,
}

impl Scene {
    pub fn new(driver: &mut Driver, width: u32, height: u32) -> Result<Self> {
        let screen = driver
            .new_screen_framebuffer_image(width, height)
            .context("failed to bind screen")?;
        let sprite = driver.new_image(SPRITE, SPRITE).context("failed to create sprite")?;
        let canvas = driver
            .new_image(CANVAS_W, CANVAS_H)
            .context("failed to create canvas")?;

        driver
            .replace_pixels(&sprite, &checkerboard(SPRITE, 8), 0, 0, SPRITE, SPRITE)
            .context("failed to upload sprite")?;

        log::info!(
            "scene ready: screen {width}x{height}, max image size {}",
            driver.max_image_size()
        );

        Ok(Self {
            screen,
            sprite,
            canvas,
            batch: QuadBatch::new(),
            started: Instant::now(),
        })
    }

    pub fn resize(&mut self, driver: &mut Driver, width: u32, height: u32) -> DriverResult<()> {
        driver.resize_screen(&mut self.screen, width, height)
    }

    pub fn frame(&mut self, driver: &mut Driver) -> DriverResult<()> {
        let t = self.started.elapsed().as_secs_f32();
        let white = [1.0; 4];

        // Sprite bounces inside the canvas.
        let range_x = (CANVAS_W - SPRITE) as f32;
        let range_y = (CANVAS_H - SPRITE) as f32;
        let x = range_x * (0.5 + 0.5 * (t * 1.3).sin());
        let y = range_y * (0.5 + 0.5 * (t * 0.9).cos());

        let (canvas_w, canvas_h) = self.canvas.size();
        let (screen_w, screen_h) = self.screen.size();
        let sprite_uv = uv_of(&self.sprite);
        let canvas_uv = uv_of(&self.canvas);

        self.batch.clear();
        let clear = self.push([0.0, 0.0, canvas_w as f32, canvas_h as f32], [0.0; 4], white);
        let sprite = self.push([x, y, SPRITE as f32, SPRITE as f32], sprite_uv, white);
        let shadow = self.push(
            [x + 6.0, y + 6.0, SPRITE as f32, SPRITE as f32],
            sprite_uv,
            [0.0, 0.0, 0.0, 0.4],
        );
        let blit = self.push([0.0, 0.0, screen_w as f32, screen_h as f32], canvas_uv, white);

        driver.set_vertices(self.batch.vertices(), self.batch.indices())?;
        let identity = ColorMatrix::identity();

        driver.set_as_destination(&self.canvas);
        driver.reset_source();
        driver.draw(6, clear, CompositeMode::Clear, &identity, Filter::Nearest)?;

        driver.set_as_source(&self.sprite);
        driver.draw(6, shadow, CompositeMode::SourceOver, &identity, Filter::Nearest)?;
        driver.draw(6, sprite, CompositeMode::SourceOver, &identity, Filter::Nearest)?;

        let pulse = 0.75 + 0.25 * (t * 2.0).sin();
        let tint = ColorMatrix::scale(pulse, 1.0, 2.0 - pulse, 1.0)
            .then(&ColorMatrix::translate(0.0, 0.0, 0.05, 0.0));

        driver.set_as_destination(&self.screen);
        driver.set_as_source(&self.canvas);
        driver.draw(6, blit, CompositeMode::Copy, &tint, Filter::Linear)
    }

    fn push(&mut self, dst: [f32; 4], uv: [f32; 4], color: [f32; 4]) -> u32 {
        // Four quads never come close to the u16 index limit.
        self.batch.push(dst, uv, color).unwrap_or_default()
    }
}

fn uv_of(image: &Image) -> [f32; 4] {
    let (w, h) = image.size();
    let (pw, ph) = image.padded_size();
    QuadBatch::logical_uv(w, h, pw, ph)
}

/// Opaque two-tone checkerboard, `size x size`, with `cell`-pixel squares.
fn checkerboard(size: u32, cell: u32) -> Vec<u8> {
    let mut pixels = Vec::with_capacity((size * size * 4) as usize);
    for y in 0..size {
        for x in 0..size {
            let light = ((x / cell) + (y / cell)) % 2 == 0;
            let rgba = if light {
                [240, 200, 60, 255]
            } else {
                [40, 90, 200, 255]
            };
            pixels.extend_from_slice(&rgba);
        }
    }
    pixels
}
