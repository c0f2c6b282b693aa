//! Stateless in-place pixel transforms.
//!
//! Each filter declares the formats it accepts and rewrites the pixels of a
//! rectangle through an exclusive borrow of the image. The rectangle is
//! clipped to the image bounds; an empty intersection leaves the image
//! unchanged.

mod grayscale;

pub use grayscale::to_grayscale;

use crate::image::{PixelFormat, PixelViewMut, Rect};
use crate::stats::{Histogram, HISTOGRAM_BUCKETS};
use crate::util::{BlobMatchError, BlobMatchResult};

const ALL_FORMATS: &[PixelFormat] = &[PixelFormat::Gray8, PixelFormat::Rgb24, PixelFormat::Rgba32];

/// A transform applied to pixels in place.
pub trait InPlaceFilter {
    /// Formats this filter can process.
    fn supported_formats(&self) -> &'static [PixelFormat];

    /// Transforms the pixels of `rect` (clipped to the image).
    fn apply_in_place(&self, image: &mut PixelViewMut<'_>, rect: Rect) -> BlobMatchResult<()>;

    /// Transforms the whole image.
    fn apply(&self, image: &mut PixelViewMut<'_>) -> BlobMatchResult<()> {
        let bounds = image.bounds();
        self.apply_in_place(image, bounds)
    }
}

/// Checks the format and clips `rect`; `None` means nothing to do.
fn prepare(
    supported: &[PixelFormat],
    image: &PixelViewMut<'_>,
    rect: Rect,
    operation: &'static str,
) -> BlobMatchResult<Option<Rect>> {
    image.ensure_format(supported, operation)?;
    Ok(rect.intersect(&image.bounds()))
}

/// Rewrites every colour channel of `rect` through per-channel tables.
fn remap_channels(image: &mut PixelViewMut<'_>, rect: Rect, tables: &[[u8; HISTOGRAM_BUCKETS]]) {
    let bpp = image.format().bytes_per_pixel();
    let channels = image.format().color_channels();
    for y in rect.y..rect.bottom() {
        let Some(row) = image.row_mut(y) else {
            continue;
        };
        for px in row[rect.x * bpp..rect.right() * bpp].chunks_exact_mut(bpp) {
            for (c, value) in px[..channels].iter_mut().enumerate() {
                *value = tables[c][*value as usize];
            }
        }
    }
}

/// Equalizes each colour channel of the rectangle independently.
#[derive(Clone, Copy, Debug, Default)]
pub struct HistogramEqualization;

impl InPlaceFilter for HistogramEqualization {
    fn supported_formats(&self) -> &'static [PixelFormat] {
        ALL_FORMATS
    }

    fn apply_in_place(&self, image: &mut PixelViewMut<'_>, rect: Rect) -> BlobMatchResult<()> {
        let Some(rect) = prepare(self.supported_formats(), image, rect, "histogram equalization")?
        else {
            return Ok(());
        };

        let bpp = image.format().bytes_per_pixel();
        let channels = image.format().color_channels();
        let mut counts = vec![[0u64; HISTOGRAM_BUCKETS]; channels];
        {
            let view = image.as_view();
            for y in rect.y..rect.bottom() {
                let row = view.row_at(y);
                for px in row[rect.x * bpp..rect.right() * bpp].chunks_exact(bpp) {
                    for (c, &v) in px[..channels].iter().enumerate() {
                        counts[c][v as usize] += 1;
                    }
                }
            }
        }

        let tables: Vec<[u8; HISTOGRAM_BUCKETS]> = counts
            .into_iter()
            .map(|c| Histogram::from_counts(c).equalization_table())
            .collect();
        remap_channels(image, rect, &tables);
        Ok(())
    }
}

/// Per-channel lookup-table remapping.
///
/// Grayscale images use the `gray` table, colour images the red, green and
/// blue tables.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColorRemapping {
    red: [u8; HISTOGRAM_BUCKETS],
    green: [u8; HISTOGRAM_BUCKETS],
    blue: [u8; HISTOGRAM_BUCKETS],
    gray: [u8; HISTOGRAM_BUCKETS],
}

fn to_table(table: &[u8], name: &'static str) -> BlobMatchResult<[u8; HISTOGRAM_BUCKETS]> {
    table
        .try_into()
        .map_err(|_| BlobMatchError::ArgumentOutOfRange {
            name,
            reason: "remap table needs exactly 256 entries",
        })
}

fn identity_table() -> [u8; HISTOGRAM_BUCKETS] {
    let mut table = [0u8; HISTOGRAM_BUCKETS];
    for (value, slot) in table.iter_mut().enumerate() {
        *slot = value as u8;
    }
    table
}

impl Default for ColorRemapping {
    fn default() -> Self {
        let identity = identity_table();
        Self {
            red: identity,
            green: identity,
            blue: identity,
            gray: identity,
        }
    }
}

impl ColorRemapping {
    /// Colour tables; the gray table stays the identity.
    pub fn rgb(red: &[u8], green: &[u8], blue: &[u8]) -> BlobMatchResult<Self> {
        Ok(Self {
            red: to_table(red, "red")?,
            green: to_table(green, "green")?,
            blue: to_table(blue, "blue")?,
            ..Self::default()
        })
    }

    /// Gray table; the colour tables stay the identity.
    pub fn gray(gray: &[u8]) -> BlobMatchResult<Self> {
        Ok(Self {
            gray: to_table(gray, "gray")?,
            ..Self::default()
        })
    }
}

impl InPlaceFilter for ColorRemapping {
    fn supported_formats(&self) -> &'static [PixelFormat] {
        ALL_FORMATS
    }

    fn apply_in_place(&self, image: &mut PixelViewMut<'_>, rect: Rect) -> BlobMatchResult<()> {
        let Some(rect) = prepare(self.supported_formats(), image, rect, "color remapping")? else {
            return Ok(());
        };
        if image.format().is_gray() {
            remap_channels(image, rect, &[self.gray]);
        } else {
            remap_channels(image, rect, &[self.red, self.green, self.blue]);
        }
        Ok(())
    }
}

/// Binarization: values at or above `threshold` become 255, others 0.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Threshold {
    pub threshold: u8,
}

impl Default for Threshold {
    fn default() -> Self {
        Self { threshold: 128 }
    }
}

impl InPlaceFilter for Threshold {
    fn supported_formats(&self) -> &'static [PixelFormat] {
        &[PixelFormat::Gray8]
    }

    fn apply_in_place(&self, image: &mut PixelViewMut<'_>, rect: Rect) -> BlobMatchResult<()> {
        let Some(rect) = prepare(self.supported_formats(), image, rect, "threshold")? else {
            return Ok(());
        };
        let mut table = [0u8; HISTOGRAM_BUCKETS];
        table[self.threshold as usize..].fill(255);
        remap_channels(image, rect, &[table]);
        Ok(())
    }
}
