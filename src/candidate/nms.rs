//! Windowed non-maximum suppression over a similarity map.

use crate::search::SimilarityMap;
use std::cmp::Ordering;

/// Local maximum of a similarity map.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Peak {
    /// Placement column in the search region.
    pub x: usize,
    /// Placement row in the search region.
    pub y: usize,
    /// Raw integer similarity.
    pub score: u64,
}

fn peak_cmp_desc(a: &Peak, b: &Peak) -> Ordering {
    b.score
        .cmp(&a.score)
        .then_with(|| a.y.cmp(&b.y))
        .then_with(|| a.x.cmp(&b.x))
}

/// Sorts peaks by descending score, ties in raster order.
pub(crate) fn sort_peaks_desc(peaks: &mut [Peak]) {
    peaks.sort_by(peak_cmp_desc);
}

/// Collects non-zero cells that no cell in their window strictly exceeds.
///
/// The window is `(2r + 1) x (2r + 1)` with `r = map.border()`. Equal
/// neighbours do not suppress each other, so plateaus yield one peak per
/// cell. Peaks are returned in raster order.
pub fn local_maxima(map: &SimilarityMap) -> Vec<Peak> {
    let radius = map.border();
    let padded_width = map.padded_width();
    let values = map.padded();
    let mut peaks = Vec::new();

    for y in 0..map.height() {
        for x in 0..map.width() {
            let center = map.padded_index(x, y);
            let value = values[center];
            if value == 0 {
                continue;
            }

            // Padded coordinates of the window's top-left cell.
            let top = center - radius * padded_width - radius;
            let dominated = (0..=2 * radius).any(|wy| {
                let start = top + wy * padded_width;
                values[start..=start + 2 * radius].iter().any(|&v| v > value)
            });
            if !dominated {
                peaks.push(Peak {
                    x,
                    y,
                    score: value,
                });
            }
        }
    }
    peaks
}
