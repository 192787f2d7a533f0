mod common;

use common::{assert_rect, draw_quad, driver, filled_image, CLEAR, RED};
use quadra_driver::{ColorMatrix, CompositeMode, DriverError, Filter, QuadBatch};

#[test]
fn draw_before_set_vertices_is_rejected() {
    let Some(mut driver) = driver("draw_before_set_vertices_is_rejected") else {
        return;
    };

    let dst = driver.new_image(8, 8).unwrap();
    driver.set_as_destination(&dst);
    driver.reset_source();

    // Empty geometry releases whatever an earlier test uploaded.
    driver.set_vertices(&[], &[]).unwrap();
    let err = driver
        .draw(6, 0, CompositeMode::SourceOver, &ColorMatrix::identity(), Filter::Nearest)
        .unwrap_err();
    assert!(matches!(err, DriverError::NoVertices), "{err}");

    driver.dispose(dst).unwrap();
}

#[test]
fn index_range_past_the_buffer_is_rejected() {
    let Some(mut driver) = driver("index_range_past_the_buffer_is_rejected") else {
        return;
    };

    let dst = driver.new_image(8, 8).unwrap();
    let mut batch = QuadBatch::new();
    batch.push([0.0, 0.0, 8.0, 8.0], [0.0; 4], [1.0; 4]).unwrap();
    driver.set_vertices(batch.vertices(), batch.indices()).unwrap();
    driver.set_as_destination(&dst);
    driver.reset_source();

    let err = driver
        .draw(6, 3, CompositeMode::Copy, &ColorMatrix::identity(), Filter::Nearest)
        .unwrap_err();
    assert!(matches!(err, DriverError::IndexRange { start: 3, end: 9, len: 6 }), "{err}");

    // The driver is still usable afterwards.
    driver
        .draw(6, 0, CompositeMode::Copy, &ColorMatrix::identity(), Filter::Nearest)
        .unwrap();
    driver.dispose(dst).unwrap();
}

#[test]
fn drawing_into_a_disposed_image_is_rejected() {
    let Some(mut driver) = driver("drawing_into_a_disposed_image_is_rejected") else {
        return;
    };

    let dst = driver.new_image(8, 8).unwrap();
    let stale = dst.clone();
    driver.dispose(dst).unwrap();

    // Disposal unbinds, so rebinding the stale handle reaches the backend.
    driver.set_as_destination(&stale);
    let err = draw_quad(&mut driver, [0.0, 0.0, 8.0, 8.0], None, CompositeMode::Copy, &ColorMatrix::identity())
        .unwrap_err();
    assert!(matches!(err, DriverError::UnknownImage(id) if id == stale.id()), "{err}");
}

#[test]
fn disposing_the_destination_unbinds_it() {
    let Some(mut driver) = driver("disposing_the_destination_unbinds_it") else {
        return;
    };

    let dst = driver.new_image(8, 8).unwrap();
    driver.set_as_destination(&dst);
    driver.dispose(dst).unwrap();

    let err = driver
        .draw(6, 0, CompositeMode::Copy, &ColorMatrix::identity(), Filter::Nearest)
        .unwrap_err();
    assert!(matches!(err, DriverError::NoDestination), "{err}");
}

#[test]
fn sampling_the_destination_is_rejected() {
    let Some(mut driver) = driver("sampling_the_destination_is_rejected") else {
        return;
    };

    let image = filled_image(&mut driver, 8, 8, RED);
    driver.set_as_destination(&image);
    let err = draw_quad(
        &mut driver,
        [0.0, 0.0, 8.0, 8.0],
        Some(&image),
        CompositeMode::SourceOver,
        &ColorMatrix::identity(),
    )
    .unwrap_err();
    assert!(matches!(err, DriverError::SourceIsDestination(_)), "{err}");

    driver.dispose(image).unwrap();
}

#[test]
fn second_reset_forgets_images_and_bindings() {
    let Some(mut driver) = driver("second_reset_forgets_images_and_bindings") else {
        return;
    };

    // The shared driver was reset once already; this is the second.
    let old = driver.new_image(8, 8).unwrap();
    driver.set_as_destination(&old);
    driver.reset().unwrap();

    let err = driver.pixels(&old).unwrap_err();
    assert!(matches!(err, DriverError::UnknownImage(id) if id == old.id()), "{err}");

    let err = driver
        .draw(6, 0, CompositeMode::Copy, &ColorMatrix::identity(), Filter::Nearest)
        .unwrap_err();
    assert!(matches!(err, DriverError::NoDestination), "{err}");

    let src = filled_image(&mut driver, 4, 4, RED);
    let dst = driver.new_image(8, 8).unwrap();
    driver.set_as_destination(&dst);
    draw_quad(
        &mut driver,
        [2.0, 2.0, 4.0, 4.0],
        Some(&src),
        CompositeMode::Copy,
        &ColorMatrix::identity(),
    )
    .unwrap();

    let pixels = driver.pixels(&dst).unwrap();
    assert_rect(&pixels, 8, 8, [2, 2, 4, 4], RED, CLEAR);

    driver.dispose(src).unwrap();
    driver.dispose(dst).unwrap();
}
