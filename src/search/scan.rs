//! Exhaustive fill of the similarity map.

use crate::image::PixelView;
use crate::kernel::{Sad, SadKernel};
use crate::search::SimilarityMap;

/// Inputs shared by every row of a scan.
#[derive(Clone, Copy)]
pub(crate) struct ScanSetup<'a> {
    pub(crate) region: PixelView<'a>,
    pub(crate) template: PixelView<'a>,
    pub(crate) max_diff: u64,
    /// Minimum integer similarity that is recorded.
    pub(crate) threshold: u64,
}

impl ScanSetup<'_> {
    /// Scores every placement of map row `y` into `out`.
    ///
    /// Cells below the threshold keep their zero default.
    pub(crate) fn fill_row(&self, y: usize, out: &mut [u64]) {
        for (x, cell) in out.iter_mut().enumerate() {
            let sad = Sad::sad_at(self.region, self.template, x, y);
            let similarity = self.max_diff - sad;
            if similarity >= self.threshold {
                *cell = similarity;
            }
        }
    }
}

/// Smallest integer similarity `s` with `s / max_diff >= threshold`.
///
/// Exact while `max_diff` fits in 29 bits.
pub(crate) fn similarity_cutoff(threshold: f32, max_diff: u64) -> u64 {
    (threshold as f64 * max_diff as f64).ceil() as u64
}

/// Fills every row of `map` on the calling thread.
pub(crate) fn fill_map(setup: &ScanSetup<'_>, map: &mut SimilarityMap) {
    for y in 0..map.height() {
        setup.fill_row(y, map.row_mut(y));
    }
}
