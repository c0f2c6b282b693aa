//! Per-channel histograms and image statistics.
//!
//! A single linear pass fills one histogram per colour channel plus a second
//! set that skips black pixels. Black often marks unpainted background, so
//! the "without black" histograms give moments of the meaningful content.
//! A colour pixel is black only when R, G and B are all zero.

mod histogram;

pub use histogram::{Histogram, HISTOGRAM_BUCKETS};

use crate::image::{PixelFormat, PixelView};
use crate::trace::{trace_event, trace_span};
use crate::util::{BlobMatchError, BlobMatchResult};

/// Channel selector for histogram queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Channel {
    /// The single channel of a grayscale image.
    Gray,
    Red,
    Green,
    Blue,
}

/// Histograms and pixel counts of one image.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageStatistics {
    format: PixelFormat,
    pixels_count: u64,
    pixels_count_without_black: u64,
    histograms: Vec<Histogram>,
    histograms_without_black: Vec<Histogram>,
}

impl ImageStatistics {
    /// Gathers statistics over every pixel.
    pub fn compute(image: PixelView<'_>) -> BlobMatchResult<Self> {
        Self::gather(image, None)
    }

    /// Gathers statistics over pixels whose `mask` value is non-zero.
    ///
    /// `mask` must be a `Gray8` view with the image's dimensions.
    pub fn compute_masked(image: PixelView<'_>, mask: PixelView<'_>) -> BlobMatchResult<Self> {
        mask.ensure_format(&[PixelFormat::Gray8], "statistics mask")?;
        if mask.width() != image.width() || mask.height() != image.height() {
            return Err(BlobMatchError::SizeMismatch {
                expected_width: image.width(),
                expected_height: image.height(),
                width: mask.width(),
                height: mask.height(),
            });
        }
        Self::gather(image, Some(mask))
    }

    fn gather(image: PixelView<'_>, mask: Option<PixelView<'_>>) -> BlobMatchResult<Self> {
        let _span = trace_span!(
            "image_statistics",
            width = image.width(),
            height = image.height(),
            masked = mask.is_some()
        )
        .entered();

        let format = image.format();
        let channels = format.color_channels();
        let bpp = format.bytes_per_pixel();
        let mut counts = vec![[0u64; HISTOGRAM_BUCKETS]; channels];
        let mut counts_nb = vec![[0u64; HISTOGRAM_BUCKETS]; channels];
        let mut pixels = 0u64;
        let mut pixels_nb = 0u64;

        for y in 0..image.height() {
            let row = image.row_at(y);
            let mask_row = mask.map(|m| m.row_at(y));
            for (x, px) in row.chunks_exact(bpp).enumerate() {
                if mask_row.is_some_and(|m| m[x] == 0) {
                    continue;
                }
                let color = &px[..channels];
                pixels += 1;
                for (c, &v) in color.iter().enumerate() {
                    counts[c][v as usize] += 1;
                }
                if color.iter().any(|&v| v != 0) {
                    pixels_nb += 1;
                    for (c, &v) in color.iter().enumerate() {
                        counts_nb[c][v as usize] += 1;
                    }
                }
            }
        }

        trace_event!("image_statistics", pixels = pixels, without_black = pixels_nb);
        Ok(Self {
            format,
            pixels_count: pixels,
            pixels_count_without_black: pixels_nb,
            histograms: counts.into_iter().map(Histogram::from_counts).collect(),
            histograms_without_black: counts_nb.into_iter().map(Histogram::from_counts).collect(),
        })
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    pub fn is_grayscale(&self) -> bool {
        self.format.is_gray()
    }

    /// Number of pixels counted (inside the mask, if any).
    pub fn pixels_count(&self) -> u64 {
        self.pixels_count
    }

    /// Number of counted pixels that are not black.
    pub fn pixels_count_without_black(&self) -> u64 {
        self.pixels_count_without_black
    }

    fn channel_index(&self, channel: Channel) -> BlobMatchResult<usize> {
        match (self.format.is_gray(), channel) {
            (true, Channel::Gray) => Ok(0),
            (false, Channel::Red) => Ok(0),
            (false, Channel::Green) => Ok(1),
            (false, Channel::Blue) => Ok(2),
            _ => Err(BlobMatchError::UnsupportedFormat {
                format: self.format,
                operation: "channel histogram",
            }),
        }
    }

    /// Histogram of `channel` over all counted pixels.
    pub fn histogram(&self, channel: Channel) -> BlobMatchResult<&Histogram> {
        let idx = self.channel_index(channel)?;
        Ok(&self.histograms[idx])
    }

    /// Histogram of `channel` over counted non-black pixels.
    pub fn histogram_without_black(&self, channel: Channel) -> BlobMatchResult<&Histogram> {
        let idx = self.channel_index(channel)?;
        Ok(&self.histograms_without_black[idx])
    }
}
