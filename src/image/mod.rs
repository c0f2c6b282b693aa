//! Pixel buffers with explicit stride and format.
//!
//! `PixelView` is a borrowed read-only view into a caller-owned byte buffer,
//! `PixelViewMut` the in-place mutable counterpart and `PixelBuffer` an owned
//! contiguous buffer returned by extraction and conversion helpers. The stride
//! counts bytes between row starts, so a stride larger than
//! `width * bytes_per_pixel` represents padded rows. ROI views are zero-copy
//! and keep the parent stride.

use crate::util::{BlobMatchError, BlobMatchResult};

mod owned;

pub use owned::PixelBuffer;

/// Memory layout of a single pixel.
///
/// Colour channels are stored in R, G, B order; the alpha byte of `Rgba32`
/// is carried along but never analysed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PixelFormat {
    /// 8-bit indexed intensity.
    Gray8,
    /// 24-bit packed RGB.
    Rgb24,
    /// 32-bit packed RGBA.
    Rgba32,
}

impl PixelFormat {
    /// Number of bytes used by one pixel.
    pub const fn bytes_per_pixel(self) -> usize {
        match self {
            PixelFormat::Gray8 => 1,
            PixelFormat::Rgb24 => 3,
            PixelFormat::Rgba32 => 4,
        }
    }

    /// Number of colour channels taking part in analysis.
    pub const fn color_channels(self) -> usize {
        match self {
            PixelFormat::Gray8 => 1,
            PixelFormat::Rgb24 | PixelFormat::Rgba32 => 3,
        }
    }

    /// Returns true for the single-channel format.
    pub const fn is_gray(self) -> bool {
        matches!(self, PixelFormat::Gray8)
    }
}

/// Axis-aligned rectangle in pixel coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    /// Left edge (inclusive).
    pub x: usize,
    /// Top edge (inclusive).
    pub y: usize,
    /// Width in pixels.
    pub width: usize,
    /// Height in pixels.
    pub height: usize,
}

impl Rect {
    /// Creates a rectangle from its top-left corner and size.
    pub const fn new(x: usize, y: usize, width: usize, height: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Exclusive right edge.
    pub const fn right(&self) -> usize {
        self.x + self.width
    }

    /// Exclusive bottom edge.
    pub const fn bottom(&self) -> usize {
        self.y + self.height
    }

    /// Number of pixels covered.
    pub const fn area(&self) -> usize {
        self.width * self.height
    }

    /// Returns true when the rectangle covers no pixels.
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Returns true if `(x, y)` lies inside the rectangle.
    pub const fn contains(&self, x: usize, y: usize) -> bool {
        x >= self.x && y >= self.y && x < self.right() && y < self.bottom()
    }

    /// Overlap of two rectangles, `None` when they do not overlap.
    pub fn intersect(&self, other: &Rect) -> Option<Rect> {
        let x0 = self.x.max(other.x);
        let y0 = self.y.max(other.y);
        let x1 = self.right().min(other.right());
        let y1 = self.bottom().min(other.bottom());
        if x1 <= x0 || y1 <= y0 {
            return None;
        }
        Some(Rect::new(x0, y0, x1 - x0, y1 - y0))
    }
}

/// Integer pixel coordinate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Point {
    pub x: usize,
    pub y: usize,
}

impl Point {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

/// Borrowed read-only pixel grid with an explicit stride.
#[derive(Copy, Clone)]
pub struct PixelView<'a> {
    data: &'a [u8],
    width: usize,
    height: usize,
    stride: usize,
    format: PixelFormat,
}

impl<'a> PixelView<'a> {
    /// Creates a view over tightly packed rows.
    pub fn from_slice(
        data: &'a [u8],
        width: usize,
        height: usize,
        format: PixelFormat,
    ) -> BlobMatchResult<Self> {
        let stride = row_bytes(width, height, format)?;
        Self::new(data, width, height, stride, format)
    }

    /// Creates a view with an explicit stride in bytes.
    pub fn new(
        data: &'a [u8],
        width: usize,
        height: usize,
        stride: usize,
        format: PixelFormat,
    ) -> BlobMatchResult<Self> {
        validate_layout(data.len(), width, height, stride, format)?;
        Ok(Self {
            data,
            width,
            height,
            stride,
            format,
        })
    }

    /// Image width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Image height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Bytes between row starts.
    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// Backing slice including any row padding.
    pub fn as_slice(&self) -> &'a [u8] {
        self.data
    }

    /// Rectangle covering the whole view.
    pub fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.width, self.height)
    }

    /// Byte offset of pixel `(x, y)`; coordinates are not checked.
    #[inline]
    pub fn offset(&self, x: usize, y: usize) -> usize {
        pixel_offset(self.stride, self.format, x, y)
    }

    /// Channel bytes of pixel `(x, y)` if it is within bounds.
    pub fn pixel(&self, x: usize, y: usize) -> Option<&'a [u8]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let start = self.offset(x, y);
        self.data.get(start..start + self.format.bytes_per_pixel())
    }

    /// Row `y` as `width * bytes_per_pixel` bytes.
    pub fn row(&self, y: usize) -> Option<&'a [u8]> {
        if y >= self.height {
            return None;
        }
        let start = self.offset(0, y);
        self.data.get(start..start + self.width * self.format.bytes_per_pixel())
    }

    /// Row access for callers that already validated `y`.
    #[inline]
    pub(crate) fn row_at(&self, y: usize) -> &'a [u8] {
        let start = self.offset(0, y);
        &self.data[start..start + self.width * self.format.bytes_per_pixel()]
    }

    /// Zero-copy view of `rect` sharing this view's stride.
    pub fn roi(&self, rect: Rect) -> BlobMatchResult<PixelView<'a>> {
        let start = check_roi(self.width, self.height, rect)?;
        let start = pixel_offset(self.stride, self.format, start.0, start.1);
        let data = self
            .data
            .get(start..)
            .ok_or(BlobMatchError::BufferTooSmall {
                needed: start.saturating_add(1),
                got: self.data.len(),
            })?;
        PixelView::new(data, rect.width, rect.height, self.stride, self.format)
    }

    /// Fails with `UnsupportedFormat` unless the format is in `allowed`.
    pub fn ensure_format(
        &self,
        allowed: &[PixelFormat],
        operation: &'static str,
    ) -> BlobMatchResult<()> {
        ensure_format(self.format, allowed, operation)
    }
}

/// Borrowed mutable pixel grid for in-place transforms.
pub struct PixelViewMut<'a> {
    data: &'a mut [u8],
    width: usize,
    height: usize,
    stride: usize,
    format: PixelFormat,
}

impl<'a> PixelViewMut<'a> {
    /// Creates a mutable view over tightly packed rows.
    pub fn from_slice(
        data: &'a mut [u8],
        width: usize,
        height: usize,
        format: PixelFormat,
    ) -> BlobMatchResult<Self> {
        let stride = row_bytes(width, height, format)?;
        Self::new(data, width, height, stride, format)
    }

    /// Creates a mutable view with an explicit stride in bytes.
    pub fn new(
        data: &'a mut [u8],
        width: usize,
        height: usize,
        stride: usize,
        format: PixelFormat,
    ) -> BlobMatchResult<Self> {
        validate_layout(data.len(), width, height, stride, format)?;
        Ok(Self {
            data,
            width,
            height,
            stride,
            format,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// Rectangle covering the whole view.
    pub fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.width, self.height)
    }

    /// Read-only reborrow of the same pixels.
    pub fn as_view(&self) -> PixelView<'_> {
        PixelView {
            data: &*self.data,
            width: self.width,
            height: self.height,
            stride: self.stride,
            format: self.format,
        }
    }

    /// Mutable channel bytes of pixel `(x, y)` if it is within bounds.
    pub fn pixel_mut(&mut self, x: usize, y: usize) -> Option<&mut [u8]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let start = pixel_offset(self.stride, self.format, x, y);
        self.data
            .get_mut(start..start + self.format.bytes_per_pixel())
    }

    /// Mutable row `y` as `width * bytes_per_pixel` bytes.
    pub fn row_mut(&mut self, y: usize) -> Option<&mut [u8]> {
        if y >= self.height {
            return None;
        }
        let start = pixel_offset(self.stride, self.format, 0, y);
        self.data
            .get_mut(start..start + self.width * self.format.bytes_per_pixel())
    }

    /// Zero-copy mutable view of `rect` sharing this view's stride.
    pub fn roi_mut(&mut self, rect: Rect) -> BlobMatchResult<PixelViewMut<'_>> {
        let start = check_roi(self.width, self.height, rect)?;
        let start = pixel_offset(self.stride, self.format, start.0, start.1);
        let got = self.data.len();
        let data = self
            .data
            .get_mut(start..)
            .ok_or(BlobMatchError::BufferTooSmall {
                needed: start.saturating_add(1),
                got,
            })?;
        PixelViewMut::new(data, rect.width, rect.height, self.stride, self.format)
    }

    /// Fails with `UnsupportedFormat` unless the format is in `allowed`.
    pub fn ensure_format(
        &self,
        allowed: &[PixelFormat],
        operation: &'static str,
    ) -> BlobMatchResult<()> {
        ensure_format(self.format, allowed, operation)
    }
}

#[inline]
fn pixel_offset(stride: usize, format: PixelFormat, x: usize, y: usize) -> usize {
    y * stride + x * format.bytes_per_pixel()
}

pub(crate) fn ensure_format(
    format: PixelFormat,
    allowed: &[PixelFormat],
    operation: &'static str,
) -> BlobMatchResult<()> {
    if allowed.contains(&format) {
        Ok(())
    } else {
        Err(BlobMatchError::UnsupportedFormat { format, operation })
    }
}

fn row_bytes(width: usize, height: usize, format: PixelFormat) -> BlobMatchResult<usize> {
    width
        .checked_mul(format.bytes_per_pixel())
        .ok_or(BlobMatchError::InvalidDimensions { width, height })
}

fn validate_layout(
    len: usize,
    width: usize,
    height: usize,
    stride: usize,
    format: PixelFormat,
) -> BlobMatchResult<()> {
    if width == 0 || height == 0 {
        return Err(BlobMatchError::InvalidDimensions { width, height });
    }
    let row = row_bytes(width, height, format)?;
    if stride < row {
        return Err(BlobMatchError::InvalidStride {
            row_bytes: row,
            stride,
        });
    }
    // The last row only needs its pixel bytes, which lets ROI views share
    // the parent stride.
    let needed = (height - 1)
        .checked_mul(stride)
        .and_then(|v| v.checked_add(row))
        .ok_or(BlobMatchError::InvalidDimensions { width, height })?;
    if len < needed {
        return Err(BlobMatchError::BufferTooSmall { needed, got: len });
    }
    Ok(())
}

fn check_roi(img_width: usize, img_height: usize, rect: Rect) -> BlobMatchResult<(usize, usize)> {
    if rect.is_empty() {
        return Err(BlobMatchError::InvalidDimensions {
            width: rect.width,
            height: rect.height,
        });
    }
    let out_of_bounds = BlobMatchError::RoiOutOfBounds {
        x: rect.x,
        y: rect.y,
        width: rect.width,
        height: rect.height,
        img_width,
        img_height,
    };
    let end_x = rect.x.checked_add(rect.width).ok_or(out_of_bounds.clone())?;
    let end_y = rect.y.checked_add(rect.height).ok_or(out_of_bounds.clone())?;
    if end_x > img_width || end_y > img_height {
        return Err(out_of_bounds);
    }
    Ok((rect.x, rect.y))
}
