//! Regression tests for median noise filtering

use seedgrow_core::{Pix, PixelDepth};
use seedgrow_filter::{FilterError, median_filter};
use seedgrow_test::{RegParams, load_test_image_gray};

/// Quadrant fixture with isolated salt and pepper pixels away from seams.
fn noisy_quadrants() -> (Pix, Pix) {
    let clean = load_test_image_gray("quadrants.pgm").unwrap();
    let mut pm = clean.to_mut();
    for &(x, y, v) in &[(4, 4, 255), (20, 6, 0), (7, 25, 255), (27, 27, 0)] {
        pm.set_pixel(x, y, v).unwrap();
    }
    (clean, pm.into())
}

#[test]
fn test_median_removes_impulses() {
    let mut rp = RegParams::new("median_impulse");
    let (clean, noisy) = noisy_quadrants();
    rp.compare_values(4.0, clean.count_diff_pixels(&noisy).unwrap() as f64, 0.0);

    // isolated impulses vanish, so both inputs filter to the same image
    let filtered = median_filter(&noisy, 3).unwrap();
    rp.compare_pix(&median_filter(&clean, 3).unwrap(), &filtered);
    rp.compare_values(30.0, filtered.get_pixel(4, 4).unwrap() as f64, 0.0);
    rp.compare_values(90.0, filtered.get_pixel(20, 6).unwrap() as f64, 0.0);
    // the input is left untouched
    rp.compare_values(255.0, noisy.get_pixel(4, 4).unwrap() as f64, 0.0);
    assert!(rp.cleanup());
}

#[test]
fn test_median_kernel_sizes() {
    let mut rp = RegParams::new("median_kernels");
    let (_, noisy) = noisy_quadrants();

    rp.compare_pix(&noisy, &median_filter(&noisy, 1).unwrap());
    rp.compare_pix(&noisy, &median_filter(&noisy, 0).unwrap());
    rp.compare_pix(&noisy, &median_filter(&noisy, 4).unwrap());

    // flat quadrants survive a wide window; only pixels near seams and
    // the impulses can change
    let wide = median_filter(&noisy, 5).unwrap();
    rp.compare_values(30.0, wide.get_pixel(8, 8).unwrap() as f64, 0.0);
    rp.compare_values(210.0, wide.get_pixel(27, 27).unwrap() as f64, 0.0);
    // within two pixels of the edge nothing is filtered
    rp.compare_values(
        noisy.get_pixel(1, 1).unwrap() as f64,
        wide.get_pixel(1, 1).unwrap() as f64,
        0.0,
    );
    assert!(rp.cleanup());
}

#[test]
fn test_median_rejects_rgb() {
    let pix = Pix::new(8, 8, PixelDepth::Bit32).unwrap();
    assert!(matches!(
        median_filter(&pix, 3),
        Err(FilterError::UnsupportedDepth { actual: 32, .. })
    ));
}
