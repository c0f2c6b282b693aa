//! Connected-component labeling of foreground pixels.
//!
//! Pixels are classified against a per-channel [`BackgroundThreshold`] and
//! grouped into 8-connected components. Two strategies are available: the
//! default two-pass scan with deferred union-find merging, and an explicit
//! worklist flood fill that also accepts one-pixel-wide images. Both number
//! components `1..=count` in the raster order of each component's first
//! pixel, so they produce identical label maps.

mod flood_fill;
mod two_pass;
pub(crate) mod union_find;

use crate::image::{PixelFormat, PixelView};
use crate::util::BlobMatchResult;

pub use flood_fill::label_flood_fill;
pub use two_pass::label_two_pass;

/// Per-channel background threshold.
///
/// A channel value at or below its threshold is background. Grayscale images
/// compare their single channel against `green`; use [`BackgroundThreshold::uniform`]
/// to set all three channels at once.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BackgroundThreshold {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl BackgroundThreshold {
    /// Same threshold for every channel.
    pub const fn uniform(value: u8) -> Self {
        Self {
            red: value,
            green: value,
            blue: value,
        }
    }

    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }
}

/// How colour pixels are classified as foreground.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ForegroundRule {
    /// Foreground when any of R, G, B exceeds its threshold.
    #[default]
    AnyChannel,
    /// Foreground only when all of R, G, B exceed their thresholds.
    AllChannels,
}

/// Labeling algorithm selection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LabelingStrategy {
    /// Raster scan with union-find equivalences; requires width >= 2.
    #[default]
    TwoPass,
    /// Explicit-stack flood fill; any width.
    FloodFill,
}

/// Per-pixel component labels, 0 for background.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LabelMap {
    labels: Vec<u32>,
    width: usize,
    height: usize,
    count: usize,
}

impl LabelMap {
    pub(crate) fn from_parts(labels: Vec<u32>, width: usize, height: usize, count: usize) -> Self {
        debug_assert_eq!(labels.len(), width * height);
        Self {
            labels,
            width,
            height,
            count,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of components; labels in use are exactly `1..=objects_count`.
    pub fn objects_count(&self) -> usize {
        self.count
    }

    /// Row-major labels, `width * height` entries.
    pub fn labels(&self) -> &[u32] {
        &self.labels
    }

    /// Label at `(x, y)` if it is within bounds.
    pub fn get(&self, x: usize, y: usize) -> Option<u32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.labels.get(y * self.width + x).copied()
    }

    /// Labels of row `y`.
    pub fn row(&self, y: usize) -> Option<&[u32]> {
        if y >= self.height {
            return None;
        }
        let start = y * self.width;
        self.labels.get(start..start + self.width)
    }

    /// Rewrites every label through `table` (indexed by old label).
    pub(crate) fn remap(&mut self, table: &[u32], count: usize) {
        for label in self.labels.iter_mut() {
            *label = table[*label as usize];
        }
        self.count = count;
    }
}

impl std::ops::Index<usize> for LabelMap {
    type Output = u32;

    #[inline]
    fn index(&self, idx: usize) -> &Self::Output {
        &self.labels[idx]
    }
}

/// Labels `image` with the chosen strategy.
pub fn label_image(
    image: PixelView<'_>,
    background: BackgroundThreshold,
    rule: ForegroundRule,
    strategy: LabelingStrategy,
) -> BlobMatchResult<LabelMap> {
    match strategy {
        LabelingStrategy::TwoPass => label_two_pass(image, background, rule),
        LabelingStrategy::FloodFill => label_flood_fill(image, background, rule),
    }
}

/// Classifies every pixel as foreground (`true`) or background.
pub(crate) fn foreground_mask(
    image: PixelView<'_>,
    background: BackgroundThreshold,
    rule: ForegroundRule,
) -> Vec<bool> {
    let width = image.width();
    let mut mask = Vec::with_capacity(width * image.height());
    for y in 0..image.height() {
        let row = image.row_at(y);
        match image.format() {
            PixelFormat::Gray8 => {
                mask.extend(row.iter().map(|&v| v > background.green));
            }
            format => {
                let bpp = format.bytes_per_pixel();
                mask.extend(row.chunks_exact(bpp).map(|px| {
                    let r = px[0] > background.red;
                    let g = px[1] > background.green;
                    let b = px[2] > background.blue;
                    match rule {
                        ForegroundRule::AnyChannel => r || g || b,
                        ForegroundRule::AllChannels => r && g && b,
                    }
                }));
            }
        }
    }
    mask
}
