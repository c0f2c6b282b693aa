//! Error types for blobmatch.

use crate::image::PixelFormat;
use thiserror::Error;

/// Result alias for blobmatch operations.
pub type BlobMatchResult<T> = std::result::Result<T, BlobMatchError>;

/// Errors that can occur when labeling, matching or measuring images.
///
/// Every variant is a caller error: nothing here is transient, so nothing is
/// retried internally.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum BlobMatchError {
    /// The pixel format cannot be handled by the requested operation.
    #[error("unsupported pixel format {format:?} for {operation}")]
    UnsupportedFormat {
        format: PixelFormat,
        operation: &'static str,
    },
    /// Two buffers that must share a pixel format do not.
    #[error("pixel format mismatch: expected {expected:?}, got {got:?}")]
    FormatMismatch {
        expected: PixelFormat,
        got: PixelFormat,
    },
    /// Width or height is zero, overflows, or is too small for the algorithm.
    #[error("invalid dimensions: width={width}, height={height}")]
    InvalidDimensions { width: usize, height: usize },
    /// Stride is smaller than the byte length of a row.
    #[error("invalid stride: row_bytes={row_bytes}, stride={stride}")]
    InvalidStride { row_bytes: usize, stride: usize },
    /// Backing buffer is shorter than the layout requires.
    #[error("buffer too small: needed {needed}, got {got}")]
    BufferTooSmall { needed: usize, got: usize },
    /// Template does not fit into the search region.
    #[error(
        "template {tpl_width}x{tpl_height} does not fit in search region \
         {region_width}x{region_height}"
    )]
    TemplateTooLarge {
        tpl_width: usize,
        tpl_height: usize,
        region_width: usize,
        region_height: usize,
    },
    /// Two buffers that must have equal dimensions do not.
    #[error("size mismatch: expected {expected_width}x{expected_height}, got {width}x{height}")]
    SizeMismatch {
        expected_width: usize,
        expected_height: usize,
        width: usize,
        height: usize,
    },
    /// Region of interest lies outside the image.
    #[error(
        "roi out of bounds: x={x}, y={y}, width={width}, height={height}, \
         image={img_width}x{img_height}"
    )]
    RoiOutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
        img_width: usize,
        img_height: usize,
    },
    /// A query ran before any image was processed.
    #[error("{0} called before an image was processed")]
    NotYetProcessed(&'static str),
    /// A configuration value is malformed.
    #[error("argument out of range: {name} ({reason})")]
    ArgumentOutOfRange {
        name: &'static str,
        reason: &'static str,
    },
    /// Index into a collection is out of range.
    #[error("index out of bounds: {context} index {index} (len {len})")]
    IndexOutOfBounds {
        index: usize,
        len: usize,
        context: &'static str,
    },
    /// The bounded worker pool could not be created.
    #[error("thread pool: {reason}")]
    ThreadPool { reason: String },
}
