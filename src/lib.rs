//! Blobmatch is a CPU image-analysis core for blob extraction and exhaustive
//! template matching over raw pixel buffers.
//!
//! Callers hand in already-decoded pixels through [`PixelView`] (explicit
//! width, height, stride and [`PixelFormat`]). [`BlobCounter`] labels
//! 8-connected foreground regions, filters them by size or predicate and
//! reports per-blob statistics; [`TemplateMatcher`] scores every template
//! placement by sum of absolute differences and returns locally maximal
//! matches. [`ImageStatistics`] and the [`filter`] module cover histograms,
//! equalization and simple in-place transforms.
//!
//! Optional features: `rayon` (row-parallel matching), `simd` (vectorized
//! SAD kernel), `tracing` (spans and events) and `serde` (configuration
//! types).

pub mod blob;
mod candidate;
pub mod filter;
pub mod image;
pub mod kernel;
pub mod label;
pub mod lowlevel;
pub mod search;
pub mod stats;
mod trace;
pub mod util;

pub use blob::{
    Blob, BlobCounter, BlobCounterConfig, BlobFilter, BlobPredicate, Centroid, ObjectsOrder,
};
pub use filter::{ColorRemapping, HistogramEqualization, InPlaceFilter, Threshold};
pub use image::{PixelBuffer, PixelFormat, PixelView, PixelViewMut, Point, Rect};
pub use label::{BackgroundThreshold, ForegroundRule, LabelMap, LabelingStrategy};
pub use search::{
    matches_by_relative_similarity, most_intensive_matches, MatchConfig, SimilarityMap,
    TemplateMatch, TemplateMatcher,
};
pub use stats::{Channel, Histogram, ImageStatistics};
pub use util::{BlobMatchError, BlobMatchResult};
