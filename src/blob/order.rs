//! Blob ordering.

use crate::blob::Blob;

/// Weight of the major coordinate in positional sort keys.
pub(crate) const POSITION_KEY_SCALE: usize = 100_000;

/// Order in which blobs are reported.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ObjectsOrder {
    /// Label order (first pixel in raster order).
    #[default]
    None,
    /// Bounding-box area, largest first.
    Size,
    /// Pixel count, largest first.
    Area,
    /// Top edge, then left edge, ascending.
    YX,
    /// Left edge, then top edge, ascending.
    XY,
}

/// Sorts blobs in place; ties keep label order.
pub fn sort_blobs(blobs: &mut [Blob], order: ObjectsOrder) {
    blobs.sort_by_key(|blob| blob.id);
    match order {
        ObjectsOrder::None => {}
        ObjectsOrder::Size => blobs.sort_by_key(|b| std::cmp::Reverse(b.rect.area())),
        ObjectsOrder::Area => blobs.sort_by_key(|b| std::cmp::Reverse(b.area)),
        ObjectsOrder::YX => {
            blobs.sort_by_key(|b| b.rect.y.saturating_mul(POSITION_KEY_SCALE) + b.rect.x)
        }
        ObjectsOrder::XY => {
            blobs.sort_by_key(|b| b.rect.x.saturating_mul(POSITION_KEY_SCALE) + b.rect.y)
        }
    }
}
