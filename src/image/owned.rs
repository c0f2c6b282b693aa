//! Owned pixel storage.

use crate::image::{PixelFormat, PixelView, PixelViewMut};
use crate::util::{BlobMatchError, BlobMatchResult};

/// Owned pixel buffer with tightly packed or padded rows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    data: Vec<u8>,
    width: usize,
    height: usize,
    stride: usize,
    format: PixelFormat,
}

impl PixelBuffer {
    /// Wraps tightly packed pixel data.
    pub fn new(
        data: Vec<u8>,
        width: usize,
        height: usize,
        format: PixelFormat,
    ) -> BlobMatchResult<Self> {
        let stride = width
            .checked_mul(format.bytes_per_pixel())
            .ok_or(BlobMatchError::InvalidDimensions { width, height })?;
        Self::with_stride(data, width, height, stride, format)
    }

    /// Wraps pixel data whose rows are `stride` bytes apart.
    pub fn with_stride(
        data: Vec<u8>,
        width: usize,
        height: usize,
        stride: usize,
        format: PixelFormat,
    ) -> BlobMatchResult<Self> {
        PixelView::new(&data, width, height, stride, format)?;
        Ok(Self {
            data,
            width,
            height,
            stride,
            format,
        })
    }

    /// Allocates a zero-filled (black) buffer.
    pub fn zeroed(width: usize, height: usize, format: PixelFormat) -> BlobMatchResult<Self> {
        let len = width
            .checked_mul(height)
            .and_then(|v| v.checked_mul(format.bytes_per_pixel()))
            .ok_or(BlobMatchError::InvalidDimensions { width, height })?;
        Self::new(vec![0u8; len], width, height, format)
    }

    /// Copies a view into a new tightly packed buffer.
    pub fn from_view(view: PixelView<'_>) -> Self {
        let row_len = view.width() * view.format().bytes_per_pixel();
        let mut data = Vec::with_capacity(row_len * view.height());
        for y in 0..view.height() {
            data.extend_from_slice(view.row_at(y));
        }
        Self {
            data,
            width: view.width(),
            height: view.height(),
            stride: row_len,
            format: view.format(),
        }
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

    /// Raw bytes including any row padding.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Consumes the buffer and returns its bytes.
    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }

    /// Borrowed read-only view.
    pub fn view(&self) -> PixelView<'_> {
        PixelView {
            data: &self.data,
            width: self.width,
            height: self.height,
            stride: self.stride,
            format: self.format,
        }
    }

    /// Borrowed mutable view.
    pub fn view_mut(&mut self) -> PixelViewMut<'_> {
        PixelViewMut {
            data: &mut self.data,
            width: self.width,
            height: self.height,
            stride: self.stride,
            format: self.format,
        }
    }
}
