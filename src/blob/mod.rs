//! Blob extraction: labeling, statistics, filtering and queries.
//!
//! [`BlobCounter`] owns the result of its latest `process_image` call. Every
//! call recomputes labels and statistics from scratch; queries made before
//! the first call fail with `NotYetProcessed`.

mod extract;
mod filter;
mod order;
mod stats;

pub use extract::{edge_points, extract_blob_image, left_and_right_edges, top_and_bottom_edges};
pub use filter::{filter_blobs, BlobFilter, BlobPredicate};
pub use order::{sort_blobs, ObjectsOrder};
pub use stats::collect_blobs;

use crate::image::{PixelBuffer, PixelView, Point, Rect};
use crate::label::{label_image, BackgroundThreshold, ForegroundRule, LabelMap, LabelingStrategy};
use crate::trace::{trace_event, trace_span};
use crate::util::{BlobMatchError, BlobMatchResult};

/// Mean pixel position of a blob.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Centroid {
    pub x: f64,
    pub y: f64,
}

/// A labeled connected region and its statistics.
#[derive(Clone, Debug, PartialEq)]
pub struct Blob {
    /// Label value of the blob's pixels in the label map.
    pub id: u32,
    /// Minimal bounding rectangle.
    pub rect: Rect,
    /// Number of labeled pixels.
    pub area: usize,
    /// `area / rect.area()`, in `(0, 1]`.
    pub fullness: f64,
    pub center_of_gravity: Centroid,
    /// Mean R, G, B (grayscale images repeat the single channel).
    pub color_mean: [f64; 3],
    /// Per-channel standard deviation, same layout as `color_mean`.
    pub color_std_dev: [f64; 3],
}

/// Configuration for [`BlobCounter`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BlobCounterConfig {
    pub background: BackgroundThreshold,
    pub rule: ForegroundRule,
    pub strategy: LabelingStrategy,
    pub order: ObjectsOrder,
    /// Size bounds applied after every labeling, if set.
    pub size_filter: Option<BlobFilter>,
}

struct Processed {
    labels: LabelMap,
    blobs: Vec<Blob>,
}

/// Stateful blob extractor.
#[derive(Default)]
pub struct BlobCounter {
    config: BlobCounterConfig,
    predicate: Option<Box<dyn BlobPredicate + Send + Sync>>,
    state: Option<Processed>,
}

impl BlobCounter {
    /// Creates a counter with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the configuration.
    pub fn with_config(mut self, config: BlobCounterConfig) -> Self {
        self.config = config;
        self
    }

    /// Installs a custom predicate that overrides `size_filter`.
    pub fn with_predicate<P>(mut self, predicate: P) -> Self
    where
        P: BlobPredicate + Send + Sync + 'static,
    {
        self.predicate = Some(Box::new(predicate));
        self
    }

    pub fn config(&self) -> &BlobCounterConfig {
        &self.config
    }

    /// Labels `image`, collects statistics, applies the configured filter
    /// and order, and returns the number of blobs.
    ///
    /// On error the previous result is left untouched.
    pub fn process_image(&mut self, image: PixelView<'_>) -> BlobMatchResult<usize> {
        if let Some(filter) = &self.config.size_filter {
            filter.validate()?;
        }

        let _span = trace_span!(
            "blob_counter.process_image",
            width = image.width(),
            height = image.height()
        )
        .entered();

        let mut labels = label_image(
            image,
            self.config.background,
            self.config.rule,
            self.config.strategy,
        )?;
        let mut blobs = collect_blobs(&labels, image)?;

        if let Some(predicate) = &self.predicate {
            filter_blobs(&mut labels, &mut blobs, predicate.as_ref())?;
        } else if let Some(filter) = &self.config.size_filter {
            filter_blobs(&mut labels, &mut blobs, filter)?;
        }
        sort_blobs(&mut blobs, self.config.order);

        let count = blobs.len();
        trace_event!("blob_counter.process_image", blobs = count);
        self.state = Some(Processed { labels, blobs });
        Ok(count)
    }

    fn processed(&self, query: &'static str) -> BlobMatchResult<&Processed> {
        self.state
            .as_ref()
            .ok_or(BlobMatchError::NotYetProcessed(query))
    }

    /// Resolves `blob` by id against the last result.
    ///
    /// The stored blob is returned, so a blob kept from an earlier call is
    /// measured with the current geometry of that id.
    fn processed_blob(
        &self,
        query: &'static str,
        blob: &Blob,
    ) -> BlobMatchResult<(&Processed, &Blob)> {
        let state = self.processed(query)?;
        let stored = state
            .blobs
            .iter()
            .find(|stored| stored.id == blob.id)
            .ok_or(BlobMatchError::IndexOutOfBounds {
                index: blob.id as usize,
                len: state.blobs.len(),
                context: "blob id",
            })?;
        Ok((state, stored))
    }

    /// Number of blobs found by the last call.
    pub fn objects_count(&self) -> BlobMatchResult<usize> {
        Ok(self.processed("objects_count")?.blobs.len())
    }

    /// Label map of the last call.
    pub fn label_map(&self) -> BlobMatchResult<&LabelMap> {
        Ok(&self.processed("label_map")?.labels)
    }

    /// Bounding rectangles in the configured order.
    pub fn objects_rectangles(&self) -> BlobMatchResult<Vec<Rect>> {
        Ok(self
            .processed("objects_rectangles")?
            .blobs
            .iter()
            .map(|blob| blob.rect)
            .collect())
    }

    /// Blobs with full statistics in the configured order.
    pub fn objects_information(&self) -> BlobMatchResult<&[Blob]> {
        Ok(&self.processed("objects_information")?.blobs)
    }

    /// Filters the current result by size bounds.
    pub fn filter_blobs(&mut self, filter: &BlobFilter) -> BlobMatchResult<usize> {
        filter.validate()?;
        self.filter_blobs_with(filter)
    }

    /// Filters the current result with a caller predicate.
    pub fn filter_blobs_with(&mut self, predicate: &dyn BlobPredicate) -> BlobMatchResult<usize> {
        let order = self.config.order;
        let state = self
            .state
            .as_mut()
            .ok_or(BlobMatchError::NotYetProcessed("filter_blobs"))?;
        let kept = filter_blobs(&mut state.labels, &mut state.blobs, predicate)?;
        sort_blobs(&mut state.blobs, order);
        Ok(kept)
    }

    /// Copies one blob's pixels out of `source`, the image that was processed.
    pub fn extract_blob_image(
        &self,
        source: PixelView<'_>,
        blob: &Blob,
        original_size: bool,
    ) -> BlobMatchResult<PixelBuffer> {
        let (state, blob) = self.processed_blob("extract_blob_image", blob)?;
        extract_blob_image(source, &state.labels, blob, original_size)
    }

    /// Copies every blob's pixels out of `source`, in the configured order.
    pub fn extract_blobs_image(
        &self,
        source: PixelView<'_>,
        original_size: bool,
    ) -> BlobMatchResult<Vec<PixelBuffer>> {
        let state = self.processed("extract_blobs_image")?;
        extract::check_source(&state.labels, source)?;
        state
            .blobs
            .iter()
            .map(|blob| extract_blob_image(source, &state.labels, blob, original_size))
            .collect()
    }

    /// Leftmost and rightmost pixel of each blob row.
    pub fn blob_left_and_right_edges(
        &self,
        blob: &Blob,
    ) -> BlobMatchResult<(Vec<Point>, Vec<Point>)> {
        let (state, blob) = self.processed_blob("blob_left_and_right_edges", blob)?;
        Ok(left_and_right_edges(&state.labels, blob))
    }

    /// Topmost and bottommost pixel of each blob column.
    pub fn blob_top_and_bottom_edges(
        &self,
        blob: &Blob,
    ) -> BlobMatchResult<(Vec<Point>, Vec<Point>)> {
        let (state, blob) = self.processed_blob("blob_top_and_bottom_edges", blob)?;
        Ok(top_and_bottom_edges(&state.labels, blob))
    }

    /// Edge points of a blob.
    pub fn blob_edge_points(&self, blob: &Blob) -> BlobMatchResult<Vec<Point>> {
        let (state, blob) = self.processed_blob("blob_edge_points", blob)?;
        Ok(edge_points(&state.labels, blob))
    }
}
