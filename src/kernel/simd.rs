//! SIMD SAD kernel using the `wide` crate.
//!
//! Eight channel bytes are widened to `f32x8` per step. Lane sums are
//! flushed to an integer total often enough that every intermediate value
//! stays exactly representable in `f32`, so results match the scalar kernel.

use crate::image::PixelView;
use crate::kernel::scalar::row_sad;
use crate::kernel::SadKernel;
use wide::f32x8;

const LANES: usize = 8;

/// Steps accumulated per lane before flushing; 255 * 4096 < 2^24.
const FLUSH_STEPS: usize = 4096;

#[inline]
fn load_u8x8(slice: &[u8]) -> f32x8 {
    f32x8::from([
        slice[0] as f32,
        slice[1] as f32,
        slice[2] as f32,
        slice[3] as f32,
        slice[4] as f32,
        slice[5] as f32,
        slice[6] as f32,
        slice[7] as f32,
    ])
}

#[inline]
fn hsum(v: f32x8) -> u64 {
    v.to_array().iter().map(|&lane| lane as u64).sum()
}

#[inline]
fn row_sad_simd(a: &[u8], b: &[u8]) -> u64 {
    let simd_end = a.len() / LANES * LANES;
    let mut total = 0u64;
    let mut acc = f32x8::ZERO;
    let mut steps = 0usize;

    let mut i = 0;
    while i < simd_end {
        acc += (load_u8x8(&a[i..]) - load_u8x8(&b[i..])).abs();
        steps += 1;
        if steps == FLUSH_STEPS {
            total += hsum(acc);
            acc = f32x8::ZERO;
            steps = 0;
        }
        i += LANES;
    }

    total + hsum(acc) + row_sad(&a[simd_end..], &b[simd_end..])
}

/// SIMD SAD kernel.
pub struct SadSimd;

impl SadKernel for SadSimd {
    fn sad_at(region: PixelView<'_>, template: PixelView<'_>, x: usize, y: usize) -> u64 {
        let bpp = template.format().bytes_per_pixel();
        let row_len = template.width() * bpp;
        let x0 = x * bpp;
        let mut total = 0u64;
        for ty in 0..template.height() {
            let src = &region.row_at(y + ty)[x0..x0 + row_len];
            total += row_sad_simd(src, template.row_at(ty));
        }
        total
    }
}
