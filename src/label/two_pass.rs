//! Two-pass raster labeling with deferred equivalence merging.

use crate::image::PixelView;
use crate::label::union_find::UnionFind;
use crate::label::{foreground_mask, BackgroundThreshold, ForegroundRule, LabelMap};
use crate::trace::{trace_debug, trace_span};
use crate::util::{BlobMatchError, BlobMatchResult};

/// Labels 8-connected foreground components with a two-pass scan.
///
/// The first pass assigns provisional labels from the already-visited
/// neighbours (left, upper-left, upper, upper-right) and records conflicting
/// neighbours as union-find equivalences instead of relabeling. The
/// equivalence table is then resolved to dense labels and applied in a
/// second pass over the map.
///
/// Images one pixel wide are rejected; use the flood-fill strategy for them.
pub fn label_two_pass(
    image: PixelView<'_>,
    background: BackgroundThreshold,
    rule: ForegroundRule,
) -> BlobMatchResult<LabelMap> {
    let width = image.width();
    let height = image.height();
    if width < 2 {
        return Err(BlobMatchError::InvalidDimensions { width, height });
    }

    let _span = trace_span!("label_two_pass", width = width, height = height).entered();
    let mask = foreground_mask(image, background, rule);
    Ok(label_mask(&mask, width, height))
}

pub(crate) fn label_mask(mask: &[bool], width: usize, height: usize) -> LabelMap {
    // Upper bound on provisional labels for 8-connectivity.
    let capacity = ((width / 2) + 1) * ((height / 2) + 1) + 1;
    let mut uf = UnionFind::with_capacity(capacity);
    let mut labels = vec![0u32; width * height];

    for y in 0..height {
        let row_start = y * width;
        for x in 0..width {
            let idx = row_start + x;
            if !mask[idx] {
                continue;
            }

            let mut neighbors = [0u32; 4];
            if x > 0 {
                neighbors[0] = labels[idx - 1];
            }
            if y > 0 {
                let up = idx - width;
                if x > 0 {
                    neighbors[1] = labels[up - 1];
                }
                neighbors[2] = labels[up];
                if x + 1 < width {
                    neighbors[3] = labels[up + 1];
                }
            }

            let mut assigned = 0u32;
            for &label in neighbors.iter().filter(|&&l| l != 0) {
                if assigned == 0 {
                    assigned = label;
                } else if label != assigned {
                    uf.union(assigned, label);
                }
            }

            labels[idx] = if assigned == 0 {
                uf.make_set()
            } else {
                assigned
            };
        }
    }

    let provisional = uf.len();
    let (table, count) = uf.resolve();
    for label in labels.iter_mut() {
        *label = table[*label as usize];
    }

    trace_debug!("label_two_pass", provisional = provisional, labels = count);
    LabelMap::from_parts(labels, width, height, count)
}
