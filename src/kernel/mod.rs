//! Sum-of-absolute-differences kernels.
//!
//! A kernel scores one template placement inside a search region. Scores
//! are exact integers, so every kernel must agree bit-for-bit with the
//! scalar reference.

use crate::image::PixelView;

/// Kernel evaluating the sum of absolute differences at one placement.
pub trait SadKernel {
    /// Sum of `|region - template|` over every channel byte of the template
    /// placed with its top-left corner at `(x, y)` of `region`.
    ///
    /// Callers guarantee that `region` and `template` share a pixel format
    /// and that the placement lies inside `region`.
    fn sad_at(region: PixelView<'_>, template: PixelView<'_>, x: usize, y: usize) -> u64;
}

pub mod scalar;

#[cfg(feature = "simd")]
pub mod simd;

#[cfg(feature = "rayon")]
pub(crate) mod rayon;

#[cfg(not(feature = "simd"))]
pub(crate) use scalar::SadScalar as Sad;
#[cfg(feature = "simd")]
pub(crate) use simd::SadSimd as Sad;
