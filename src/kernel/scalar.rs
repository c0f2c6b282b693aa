//! Scalar reference kernel.

use crate::image::PixelView;
use crate::kernel::SadKernel;

/// Byte-wise scalar SAD kernel.
pub struct SadScalar;

/// Sum of absolute differences of two equally long byte rows.
#[inline]
pub(crate) fn row_sad(a: &[u8], b: &[u8]) -> u64 {
    a.iter()
        .zip(b)
        .map(|(&p, &q)| p.abs_diff(q) as u64)
        .sum()
}

impl SadKernel for SadScalar {
    fn sad_at(region: PixelView<'_>, template: PixelView<'_>, x: usize, y: usize) -> u64 {
        let bpp = template.format().bytes_per_pixel();
        let row_len = template.width() * bpp;
        let x0 = x * bpp;
        let mut total = 0u64;
        for ty in 0..template.height() {
            let src = &region.row_at(y + ty)[x0..x0 + row_len];
            total += row_sad(src, template.row_at(ty));
        }
        total
    }
}
