//! Exhaustive template matching.
//!
//! Every placement of the template inside the search region is scored by
//! the sum of absolute differences over all channels, converted to a
//! similarity `(max_diff - sad) / max_diff`, and stored in a padded
//! [`SimilarityMap`] when it reaches the threshold. Windowed non-maximum
//! suppression then turns the map into a list of matches, best first.
//!
//! The fill phase may run row-parallel with the `rayon` feature; suppression
//! always runs afterwards on the completed map.

mod map;
pub(crate) mod scan;
mod select;

pub use map::SimilarityMap;
pub use select::{matches_by_relative_similarity, most_intensive_matches};

use crate::candidate::nms::{local_maxima, sort_peaks_desc};
use crate::image::{ensure_format, PixelFormat, PixelView, Rect};
use crate::search::scan::{fill_map, similarity_cutoff, ScanSetup};
use crate::trace::{trace_debug, trace_event, trace_span};
use crate::util::math::is_unit_ratio;
use crate::util::{BlobMatchError, BlobMatchResult};

/// Formats the matcher accepts.
const MATCH_FORMATS: [PixelFormat; 2] = [PixelFormat::Gray8, PixelFormat::Rgb24];

/// Matcher configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MatchConfig {
    /// Minimum similarity in `[0, 1]` recorded in the map.
    pub similarity_threshold: f32,
    /// Suppression radius; the window is `(2r + 1) x (2r + 1)` cells.
    pub nms_radius: usize,
    /// Fill map rows in parallel (requires the `rayon` feature, otherwise
    /// ignored).
    pub parallel: bool,
    /// Worker bound for the parallel fill; 0 uses the global pool.
    pub max_threads: usize,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: 0.9,
            nms_radius: 2,
            parallel: false,
            max_threads: 0,
        }
    }
}

/// A template placement and its similarity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TemplateMatch {
    /// Placement in source coordinates, sized like the template.
    pub rect: Rect,
    /// `1.0` is a pixel-perfect match.
    pub similarity: f32,
}

/// Exhaustive sum-of-absolute-differences template matcher.
#[derive(Clone, Debug, Default)]
pub struct TemplateMatcher {
    config: MatchConfig,
}

impl TemplateMatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the configuration.
    pub fn with_config(mut self, config: MatchConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Searches the whole source image.
    pub fn process_image(
        &self,
        source: PixelView<'_>,
        template: PixelView<'_>,
    ) -> BlobMatchResult<Vec<TemplateMatch>> {
        self.process_image_region(source, template, source.bounds())
    }

    /// Searches placements whose template rectangle lies inside `search`.
    ///
    /// `search` is clipped to the source bounds first. Matches are sorted by
    /// descending similarity; equal similarities keep raster order.
    pub fn process_image_region(
        &self,
        source: PixelView<'_>,
        template: PixelView<'_>,
        search: Rect,
    ) -> BlobMatchResult<Vec<TemplateMatch>> {
        let _span = trace_span!(
            "template_match.process_image",
            tpl_width = template.width(),
            tpl_height = template.height()
        )
        .entered();

        let (map, region) = self.build_map(source, template, search)?;

        let mut peaks = {
            let _span = trace_span!("template_match.nms", radius = map.border()).entered();
            local_maxima(&map)
        };
        sort_peaks_desc(&mut peaks);

        let matches: Vec<TemplateMatch> = peaks
            .iter()
            .map(|peak| TemplateMatch {
                rect: Rect::new(
                    region.x + peak.x,
                    region.y + peak.y,
                    template.width(),
                    template.height(),
                ),
                similarity: map.normalize(peak.score),
            })
            .collect();

        trace_event!("template_match.process_image", matches = matches.len());
        Ok(matches)
    }

    /// Builds the padded similarity map for `search` without suppression.
    pub fn similarity_map(
        &self,
        source: PixelView<'_>,
        template: PixelView<'_>,
        search: Rect,
    ) -> BlobMatchResult<SimilarityMap> {
        self.build_map(source, template, search).map(|(map, _)| map)
    }

    fn build_map(
        &self,
        source: PixelView<'_>,
        template: PixelView<'_>,
        search: Rect,
    ) -> BlobMatchResult<(SimilarityMap, Rect)> {
        let threshold = self.config.similarity_threshold;
        if !is_unit_ratio(threshold) {
            return Err(BlobMatchError::ArgumentOutOfRange {
                name: "similarity_threshold",
                reason: "must lie in [0, 1]",
            });
        }

        ensure_format(template.format(), &MATCH_FORMATS, "template matching")?;
        if source.format() != template.format() {
            return Err(BlobMatchError::FormatMismatch {
                expected: template.format(),
                got: source.format(),
            });
        }

        let region = search.intersect(&source.bounds()).unwrap_or_default();
        if template.width() > region.width || template.height() > region.height {
            return Err(BlobMatchError::TemplateTooLarge {
                tpl_width: template.width(),
                tpl_height: template.height(),
                region_width: region.width,
                region_height: region.height,
            });
        }
        let region_view = source.roi(region)?;

        let bpp = template.format().bytes_per_pixel() as u64;
        let max_diff = (template.width() as u64) * (template.height() as u64) * bpp * 255;
        let setup = ScanSetup {
            region: region_view,
            template,
            max_diff,
            threshold: similarity_cutoff(threshold, max_diff),
        };

        let mut map = SimilarityMap::new(
            region.width - template.width() + 1,
            region.height - template.height() + 1,
            self.config.nms_radius,
            max_diff,
        );

        let _span = trace_span!(
            "template_match.fill",
            width = map.width(),
            height = map.height(),
            parallel = self.config.parallel
        )
        .entered();
        self.fill(&setup, &mut map)?;
        trace_debug!("template_match.fill", placements = map.width() * map.height());

        Ok((map, region))
    }

    #[cfg(feature = "rayon")]
    fn fill(&self, setup: &ScanSetup<'_>, map: &mut SimilarityMap) -> BlobMatchResult<()> {
        if self.config.parallel {
            crate::kernel::rayon::fill_map_par(setup, map, self.config.max_threads)
        } else {
            fill_map(setup, map);
            Ok(())
        }
    }

    #[cfg(not(feature = "rayon"))]
    fn fill(&self, setup: &ScanSetup<'_>, map: &mut SimilarityMap) -> BlobMatchResult<()> {
        fill_map(setup, map);
        Ok(())
    }
}
