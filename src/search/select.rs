//! Selection helpers over match lists.

use crate::search::TemplateMatch;
use crate::util::math::is_unit_ratio;
use crate::util::{BlobMatchError, BlobMatchResult};

fn sorted_desc(matches: &[TemplateMatch]) -> Vec<TemplateMatch> {
    let mut out = matches.to_vec();
    out.sort_by(|a, b| b.similarity.total_cmp(&a.similarity));
    out
}

/// The `count` most similar matches, best first.
pub fn most_intensive_matches(matches: &[TemplateMatch], count: usize) -> Vec<TemplateMatch> {
    let mut out = sorted_desc(matches);
    out.truncate(count);
    out
}

/// Matches whose similarity is at least `ratio` times the best one.
///
/// `ratio` must lie in `[0, 1]`. The result is sorted best first and is
/// empty only when `matches` is.
pub fn matches_by_relative_similarity(
    matches: &[TemplateMatch],
    ratio: f32,
) -> BlobMatchResult<Vec<TemplateMatch>> {
    if !is_unit_ratio(ratio) {
        return Err(BlobMatchError::ArgumentOutOfRange {
            name: "ratio",
            reason: "must lie in [0, 1]",
        });
    }
    let mut out = sorted_desc(matches);
    let Some(best) = out.first().map(|m| m.similarity) else {
        return Ok(out);
    };
    let cutoff = best * ratio;
    out.retain(|m| m.similarity >= cutoff);
    Ok(out)
}
