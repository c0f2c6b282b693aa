//! Blob pixel extraction and edge tracing.

use crate::blob::Blob;
use crate::image::{PixelBuffer, PixelView, Point, Rect};
use crate::label::LabelMap;
use crate::util::{BlobMatchError, BlobMatchResult};

pub(crate) fn check_source(labels: &LabelMap, source: PixelView<'_>) -> BlobMatchResult<()> {
    if source.width() != labels.width() || source.height() != labels.height() {
        return Err(BlobMatchError::SizeMismatch {
            expected_width: labels.width(),
            expected_height: labels.height(),
            width: source.width(),
            height: source.height(),
        });
    }
    Ok(())
}

/// Part of `blob.rect` that lies inside the label map.
fn clipped_rect(labels: &LabelMap, blob: &Blob) -> Rect {
    let bounds = Rect::new(0, 0, labels.width(), labels.height());
    blob.rect.intersect(&bounds).unwrap_or_default()
}

/// Copies the pixels labeled `blob.id` into a new black buffer.
///
/// With `original_size` the output has the source dimensions and the blob at
/// its original position; otherwise it is cropped to the blob rectangle.
pub fn extract_blob_image(
    source: PixelView<'_>,
    labels: &LabelMap,
    blob: &Blob,
    original_size: bool,
) -> BlobMatchResult<PixelBuffer> {
    check_source(labels, source)?;
    let rect = blob.rect;
    if clipped_rect(labels, blob) != rect {
        return Err(BlobMatchError::RoiOutOfBounds {
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
            img_width: labels.width(),
            img_height: labels.height(),
        });
    }
    let (out_width, out_height, dx, dy) = if original_size {
        (source.width(), source.height(), 0, 0)
    } else {
        (rect.width, rect.height, rect.x, rect.y)
    };

    let format = source.format();
    let bpp = format.bytes_per_pixel();
    let mut out = PixelBuffer::zeroed(out_width, out_height, format)?;
    {
        let mut dst = out.view_mut();
        for y in rect.y..rect.bottom() {
            let src_row = source.row_at(y);
            let label_row = &labels.labels()[y * labels.width()..(y + 1) * labels.width()];
            let Some(dst_row) = dst.row_mut(y - dy) else {
                continue;
            };
            for x in rect.x..rect.right() {
                if label_row[x] != blob.id {
                    continue;
                }
                let ox = (x - dx) * bpp;
                dst_row[ox..ox + bpp].copy_from_slice(&src_row[x * bpp..(x + 1) * bpp]);
            }
        }
    }
    Ok(out)
}

/// Leftmost and rightmost blob pixel of every row the blob occupies.
///
/// Only the part of `blob.rect` inside the label map is scanned.
pub fn left_and_right_edges(labels: &LabelMap, blob: &Blob) -> (Vec<Point>, Vec<Point>) {
    let rect = clipped_rect(labels, blob);
    let mut left = Vec::with_capacity(rect.height);
    let mut right = Vec::with_capacity(rect.height);
    for y in rect.y..rect.bottom() {
        let row = &labels.labels()[y * labels.width()..(y + 1) * labels.width()];
        let span = &row[rect.x..rect.right()];
        let first = span.iter().position(|&l| l == blob.id);
        let last = span.iter().rposition(|&l| l == blob.id);
        if let (Some(first), Some(last)) = (first, last) {
            left.push(Point::new(rect.x + first, y));
            right.push(Point::new(rect.x + last, y));
        }
    }
    (left, right)
}

/// Topmost and bottommost blob pixel of every column the blob occupies.
pub fn top_and_bottom_edges(labels: &LabelMap, blob: &Blob) -> (Vec<Point>, Vec<Point>) {
    let rect = clipped_rect(labels, blob);
    let width = labels.width();
    let mut top = Vec::with_capacity(rect.width);
    let mut bottom = Vec::with_capacity(rect.width);
    for x in rect.x..rect.right() {
        let mut column = (rect.y..rect.bottom()).filter(|&y| labels[y * width + x] == blob.id);
        if let Some(first) = column.next() {
            let last = column.last().unwrap_or(first);
            top.push(Point::new(x, first));
            bottom.push(Point::new(x, last));
        }
    }
    (top, bottom)
}

/// Union of row and column extremes, sorted by `(y, x)` without duplicates.
pub fn edge_points(labels: &LabelMap, blob: &Blob) -> Vec<Point> {
    let (left, right) = left_and_right_edges(labels, blob);
    let (top, bottom) = top_and_bottom_edges(labels, blob);
    let mut points: Vec<Point> = left
        .into_iter()
        .chain(right)
        .chain(top)
        .chain(bottom)
        .collect();
    points.sort_by_key(|p| (p.y, p.x));
    points.dedup();
    points
}
