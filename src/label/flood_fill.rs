//! Worklist flood-fill labeling.

use crate::image::PixelView;
use crate::label::{foreground_mask, BackgroundThreshold, ForegroundRule, LabelMap};
use crate::trace::{trace_debug, trace_span};
use crate::util::BlobMatchResult;

/// Labels 8-connected foreground components by flood filling from each
/// unlabeled foreground pixel in raster order.
///
/// Uses an explicit stack, so arbitrarily large components cannot overflow
/// the native call stack. Accepts images of any width.
pub fn label_flood_fill(
    image: PixelView<'_>,
    background: BackgroundThreshold,
    rule: ForegroundRule,
) -> BlobMatchResult<LabelMap> {
    let width = image.width();
    let height = image.height();
    let _span = trace_span!("label_flood_fill", width = width, height = height).entered();
    let mask = foreground_mask(image, background, rule);
    Ok(label_mask(&mask, width, height))
}

pub(crate) fn label_mask(mask: &[bool], width: usize, height: usize) -> LabelMap {
    let mut labels = vec![0u32; width * height];
    let mut stack = Vec::new();
    let mut count = 0u32;

    for start in 0..labels.len() {
        if !mask[start] || labels[start] != 0 {
            continue;
        }
        count += 1;
        labels[start] = count;
        stack.push(start);

        while let Some(idx) = stack.pop() {
            let x = idx % width;
            let y = idx / width;
            for ny in y.saturating_sub(1)..=(y + 1).min(height - 1) {
                for nx in x.saturating_sub(1)..=(x + 1).min(width - 1) {
                    let n = ny * width + nx;
                    if mask[n] && labels[n] == 0 {
                        labels[n] = count;
                        stack.push(n);
                    }
                }
            }
        }
    }

    trace_debug!("label_flood_fill", labels = count);
    LabelMap::from_parts(labels, width, height, count as usize)
}
