//! Shared helpers for `quadra-driver` integration tests.
//!
//! Tests that need a GPU skip when no adapter is available. Set
//! `QUADRA_REQUIRE_GPU=1` to turn those skips into failures.

#![allow(dead_code)]

use std::sync::{Mutex, MutexGuard, OnceLock};

use quadra_driver::{
    ColorMatrix, CompositeMode, Driver, DriverError, DriverResult, Filter, Image, QuadBatch,
};

pub const RED: [u8; 4] = [255, 0, 0, 255];
pub const GREEN: [u8; 4] = [0, 255, 0, 255];
pub const CLEAR: [u8; 4] = [0, 0, 0, 0];

pub fn require_gpu() -> bool {
    let Ok(raw) = std::env::var("QUADRA_REQUIRE_GPU") else {
        return false;
    };

    let v = raw.trim();
    v == "1" || v.eq_ignore_ascii_case("true") || v.eq_ignore_ascii_case("yes")
}

pub fn skip_or_panic(test_name: &str, reason: &str) {
    if require_gpu() {
        panic!("QUADRA_REQUIRE_GPU is enabled but {test_name} cannot run: {reason}");
    }
    eprintln!("skipping {test_name}: {reason}");
}

/// Shared headless driver for this test binary.
///
/// Creating a device per test is slow and some drivers misbehave when many
/// devices are created and dropped in one process, so every test locks the
/// same driver. Bindings are not reset between tests; set what you use.
pub fn driver(test_name: &str) -> Option<MutexGuard<'static, Driver>> {
    static DRIVER: OnceLock<Option<Mutex<Driver>>> = OnceLock::new();

    let driver = DRIVER.get_or_init(|| {
        quadra_driver::logging::init_logging(Default::default());

        let mut driver = Driver::headless().expect("failed to start driver");
        match driver.reset() {
            Ok(()) => Some(Mutex::new(driver)),
            Err(DriverError::AdapterNotFound(_)) => None,
            Err(err) => panic!("driver reset failed: {err}"),
        }
    });

    let Some(driver) = driver.as_ref() else {
        skip_or_panic(test_name, "wgpu adapter not found");
        return None;
    };

    // A failed assertion in another test must not take this one down too.
    Some(driver.lock().unwrap_or_else(|poisoned| poisoned.into_inner()))
}

/// `width x height` pixels of one color.
pub fn solid(width: u32, height: u32, rgba: [u8; 4]) -> Vec<u8> {
    rgba.repeat((width * height) as usize)
}

/// Allocates an image and fills its logical area with `rgba`.
pub fn filled_image(driver: &mut Driver, width: u32, height: u32, rgba: [u8; 4]) -> Image {
    let image = driver.new_image(width, height).unwrap();
    driver
        .replace_pixels(&image, &solid(width, height, rgba), 0, 0, width, height)
        .unwrap();
    image
}

pub fn pixel_at(pixels: &[u8], width: u32, x: u32, y: u32) -> [u8; 4] {
    let i = ((y * width + x) * 4) as usize;
    [pixels[i], pixels[i + 1], pixels[i + 2], pixels[i + 3]]
}

/// Asserts every pixel: `inside` within `rect = [x, y, w, h]`, `outside` elsewhere.
pub fn assert_rect(pixels: &[u8], width: u32, height: u32, rect: [u32; 4], inside: [u8; 4], outside: [u8; 4]) {
    let [rx, ry, rw, rh] = rect;
    for y in 0..height {
        for x in 0..width {
            let within = x >= rx && x < rx + rw && y >= ry && y < ry + rh;
            let expected = if within { inside } else { outside };
            assert_eq!(pixel_at(pixels, width, x, y), expected, "pixel ({x}, {y})");
        }
    }
}

/// Uploads one quad and draws it into the bound destination.
///
/// `uv` defaults to the logical area of the bound `source`, if any.
pub fn draw_quad(
    driver: &mut Driver,
    dst: [f32; 4],
    source: Option<&Image>,
    mode: CompositeMode,
    color_matrix: &ColorMatrix,
) -> DriverResult<()> {
    let uv = match source {
        Some(src) => {
            let (w, h) = src.size();
            let (pw, ph) = src.padded_size();
            QuadBatch::logical_uv(w, h, pw, ph)
        }
        None => [0.0; 4],
    };

    let mut batch = QuadBatch::new();
    let offset = batch.push(dst, uv, [1.0; 4]).unwrap();
    driver.set_vertices(batch.vertices(), batch.indices())?;

    match source {
        Some(src) => driver.set_as_source(src),
        None => driver.reset_source(),
    }
    driver.draw(6, offset, mode, color_matrix, Filter::Nearest)
}
