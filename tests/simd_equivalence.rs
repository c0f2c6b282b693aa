#![cfg(feature = "simd")]

use blobmatch::lowlevel::{SadKernel, SadScalar, SadSimd};
use blobmatch::{PixelFormat, PixelView};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[test]
fn simd_kernel_agrees_with_scalar() {
    let mut rng = StdRng::seed_from_u64(11);
    for format in [PixelFormat::Gray8, PixelFormat::Rgb24] {
        for _ in 0..10 {
            let width = rng.random_range(8..60);
            let height = rng.random_range(4..30);
            let tpl_width = rng.random_range(1..=width);
            let tpl_height = rng.random_range(1..=height);
            let bpp = format.bytes_per_pixel();

            let image: Vec<u8> = (0..width * height * bpp).map(|_| rng.random()).collect();
            let template: Vec<u8> = (0..tpl_width * tpl_height * bpp)
                .map(|_| rng.random())
                .collect();
            let image = PixelView::from_slice(&image, width, height, format).unwrap();
            let template = PixelView::from_slice(&template, tpl_width, tpl_height, format).unwrap();

            let x = rng.random_range(0..=width - tpl_width);
            let y = rng.random_range(0..=height - tpl_height);
            assert_eq!(
                SadSimd::sad_at(image, template, x, y),
                SadScalar::sad_at(image, template, x, y)
            );
        }
    }
}

#[test]
fn simd_kernel_is_exact_on_long_rows() {
    // Worst-case differences over rows longer than one flush interval.
    let width = 9000;
    let bright = vec![255u8; width * 2];
    let dark = vec![0u8; width * 2];
    let image = PixelView::from_slice(&bright, width, 2, PixelFormat::Gray8).unwrap();
    let template = PixelView::from_slice(&dark, width, 2, PixelFormat::Gray8).unwrap();

    let expected = 255 * (width as u64) * 2;
    assert_eq!(SadScalar::sad_at(image, template, 0, 0), expected);
    assert_eq!(SadSimd::sad_at(image, template, 0, 0), expected);
}
