//! Per-blob aggregate statistics.

use crate::blob::{Blob, Centroid};
use crate::image::{PixelFormat, PixelView, Rect};
use crate::label::LabelMap;
use crate::util::math::{mean_from_sum, std_dev_from_sums};
use crate::util::{BlobMatchError, BlobMatchResult};

#[derive(Clone, Copy)]
struct Accumulator {
    min_x: usize,
    max_x: usize,
    min_y: usize,
    max_y: usize,
    count: u64,
    sum_x: u64,
    sum_y: u64,
    sum: [u64; 3],
    sum_sq: [u64; 3],
}

impl Accumulator {
    const EMPTY: Self = Self {
        min_x: usize::MAX,
        max_x: 0,
        min_y: usize::MAX,
        max_y: 0,
        count: 0,
        sum_x: 0,
        sum_y: 0,
        sum: [0; 3],
        sum_sq: [0; 3],
    };

    #[inline]
    fn add(&mut self, x: usize, y: usize, color: [u8; 3]) {
        self.min_x = self.min_x.min(x);
        self.max_x = self.max_x.max(x);
        self.min_y = self.min_y.min(y);
        self.max_y = self.max_y.max(y);
        self.count += 1;
        self.sum_x += x as u64;
        self.sum_y += y as u64;
        for (c, &v) in color.iter().enumerate() {
            let v = v as u64;
            self.sum[c] += v;
            self.sum_sq[c] += v * v;
        }
    }

    fn finish(&self, id: u32) -> Blob {
        let rect = Rect::new(
            self.min_x,
            self.min_y,
            self.max_x - self.min_x + 1,
            self.max_y - self.min_y + 1,
        );
        let area = self.count as usize;
        let n = self.count as f64;
        let mut color_mean = [0.0f64; 3];
        let mut color_std_dev = [0.0f64; 3];
        for c in 0..3 {
            color_mean[c] = mean_from_sum(self.sum[c] as f64, n);
            color_std_dev[c] = std_dev_from_sums(self.sum[c] as f64, self.sum_sq[c] as f64, n);
        }
        Blob {
            id,
            rect,
            area,
            fullness: area as f64 / rect.area() as f64,
            center_of_gravity: Centroid {
                x: mean_from_sum(self.sum_x as f64, n),
                y: mean_from_sum(self.sum_y as f64, n),
            },
            color_mean,
            color_std_dev,
        }
    }
}

/// Computes statistics for every label in `labels` in one linear pass.
///
/// `image` supplies the colours and must have the label map's dimensions.
/// Blobs are returned in label order, `blobs[i].id == i + 1`.
pub fn collect_blobs(labels: &LabelMap, image: PixelView<'_>) -> BlobMatchResult<Vec<Blob>> {
    if image.width() != labels.width() || image.height() != labels.height() {
        return Err(BlobMatchError::SizeMismatch {
            expected_width: labels.width(),
            expected_height: labels.height(),
            width: image.width(),
            height: image.height(),
        });
    }

    let mut acc = vec![Accumulator::EMPTY; labels.objects_count() + 1];
    let bpp = image.format().bytes_per_pixel();
    for y in 0..labels.height() {
        let label_row = &labels.labels()[y * labels.width()..(y + 1) * labels.width()];
        let pixel_row = image.row_at(y);
        for (x, &label) in label_row.iter().enumerate() {
            if label == 0 {
                continue;
            }
            let px = &pixel_row[x * bpp..(x + 1) * bpp];
            let color = match image.format() {
                PixelFormat::Gray8 => [px[0]; 3],
                PixelFormat::Rgb24 | PixelFormat::Rgba32 => [px[0], px[1], px[2]],
            };
            acc[label as usize].add(x, y, color);
        }
    }

    Ok(acc
        .iter()
        .enumerate()
        .skip(1)
        .map(|(id, a)| a.finish(id as u32))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::collect_blobs;
    use crate::image::{PixelFormat, PixelView, Rect};
    use crate::label::LabelMap;

    #[test]
    fn l_shape_statistics() {
        // label 1: (0,0) (0,1) (1,1); values 10, 20, 30
        let labels = LabelMap::from_parts(vec![1, 0, 1, 1], 2, 2, 1);
        let data = [10u8, 0, 20, 30];
        let view = PixelView::from_slice(&data, 2, 2, PixelFormat::Gray8).unwrap();
        let blobs = collect_blobs(&labels, view).unwrap();
        assert_eq!(blobs.len(), 1);
        let blob = &blobs[0];
        assert_eq!(blob.rect, Rect::new(0, 0, 2, 2));
        assert_eq!(blob.area, 3);
        assert!((blob.fullness - 0.75).abs() < 1e-12);
        assert!((blob.center_of_gravity.x - 1.0 / 3.0).abs() < 1e-12);
        assert!((blob.center_of_gravity.y - 2.0 / 3.0).abs() < 1e-12);
        assert!((blob.color_mean[0] - 20.0).abs() < 1e-12);
        let expected_std = (200.0f64 / 3.0).sqrt();
        assert!((blob.color_std_dev[1] - expected_std).abs() < 1e-9);
    }

    #[test]
    fn rejects_mismatched_image() {
        let labels = LabelMap::from_parts(vec![0; 4], 2, 2, 0);
        let data = [0u8; 6];
        let view = PixelView::from_slice(&data, 3, 2, PixelFormat::Gray8).unwrap();
        assert!(collect_blobs(&labels, view).is_err());
    }
}
