//! Blob removal by size bounds or caller predicate, with dense relabeling.

use crate::blob::Blob;
use crate::label::LabelMap;
use crate::trace::{trace_event, trace_span};
use crate::util::{BlobMatchError, BlobMatchResult};

/// Accept/reject decision for a single blob.
pub trait BlobPredicate {
    /// Returns true if the blob survives filtering.
    fn accept(&self, blob: &Blob) -> bool;
}

impl<F> BlobPredicate for F
where
    F: Fn(&Blob) -> bool,
{
    fn accept(&self, blob: &Blob) -> bool {
        self(blob)
    }
}

/// Inclusive bounding-box size bounds.
///
/// Uncoupled (default): a blob is removed when any single dimension falls
/// outside its bound. Coupled: a blob is removed only when both dimensions
/// are jointly below the minimum or jointly above the maximum.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BlobFilter {
    pub min_width: usize,
    pub min_height: usize,
    pub max_width: usize,
    pub max_height: usize,
    pub coupled: bool,
}

impl Default for BlobFilter {
    fn default() -> Self {
        Self {
            min_width: 1,
            min_height: 1,
            max_width: usize::MAX,
            max_height: usize::MAX,
            coupled: false,
        }
    }
}

impl BlobFilter {
    /// Checks that each minimum does not exceed its maximum.
    pub fn validate(&self) -> BlobMatchResult<()> {
        if self.min_width > self.max_width {
            return Err(BlobMatchError::ArgumentOutOfRange {
                name: "min_width",
                reason: "exceeds max_width",
            });
        }
        if self.min_height > self.max_height {
            return Err(BlobMatchError::ArgumentOutOfRange {
                name: "min_height",
                reason: "exceeds max_height",
            });
        }
        Ok(())
    }
}

impl BlobPredicate for BlobFilter {
    fn accept(&self, blob: &Blob) -> bool {
        let width = blob.rect.width;
        let height = blob.rect.height;
        let removed = if self.coupled {
            (width < self.min_width && height < self.min_height)
                || (width > self.max_width && height > self.max_height)
        } else {
            width < self.min_width
                || height < self.min_height
                || width > self.max_width
                || height > self.max_height
        };
        !removed
    }
}

/// Removes rejected blobs and closes the label gaps they leave.
///
/// `blobs` must describe exactly the labels of `labels`: one blob per id
/// in `1..=count`, otherwise nothing is modified. Survivors keep
/// their relative label order and are renumbered `1..=kept`; the label map is
/// rewritten through the same table and removed blobs become background.
/// On return `blobs` is sorted by id. Returns the number of survivors.
pub fn filter_blobs(
    labels: &mut LabelMap,
    blobs: &mut Vec<Blob>,
    predicate: &dyn BlobPredicate,
) -> BlobMatchResult<usize> {
    let count = labels.objects_count();
    if blobs.len() != count {
        return Err(BlobMatchError::IndexOutOfBounds {
            index: blobs.len(),
            len: count,
            context: "blob list length",
        });
    }
    let mut seen = vec![false; count + 1];
    for blob in blobs.iter() {
        let id = blob.id as usize;
        if id == 0 || id > count || seen[id] {
            return Err(BlobMatchError::IndexOutOfBounds {
                index: id,
                len: count,
                context: "blob id",
            });
        }
        seen[id] = true;
    }

    let _span = trace_span!("blob_filter", blobs = count).entered();

    blobs.sort_by_key(|blob| blob.id);
    let mut table = vec![0u32; count + 1];
    let mut next = 0u32;
    blobs.retain_mut(|blob| {
        if !predicate.accept(blob) {
            return false;
        }
        next += 1;
        table[blob.id as usize] = next;
        blob.id = next;
        true
    });

    let kept = next as usize;
    labels.remap(&table, kept);
    trace_event!("blob_filter", kept = kept, removed = count - kept);
    Ok(kept)
}
