//! Low-level building blocks for custom pipelines.
//!
//! These expose the individual labeling passes, statistics collection,
//! filtering and suppression steps that [`BlobCounter`](crate::BlobCounter)
//! and [`TemplateMatcher`](crate::TemplateMatcher) compose. Most users
//! should prefer those two types.

pub use crate::blob::{
    collect_blobs, edge_points, extract_blob_image, filter_blobs, left_and_right_edges,
    sort_blobs, top_and_bottom_edges,
};
pub use crate::candidate::nms::{local_maxima, Peak};
pub use crate::kernel::scalar::SadScalar;
#[cfg(feature = "simd")]
pub use crate::kernel::simd::SadSimd;
pub use crate::kernel::SadKernel;
pub use crate::label::{label_flood_fill, label_image, label_two_pass};
