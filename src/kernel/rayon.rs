//! Row-parallel similarity map fill (feature-gated).

use crate::search::scan::ScanSetup;
use crate::search::SimilarityMap;
use crate::util::{BlobMatchError, BlobMatchResult};
use rayon::prelude::*;

/// Fills every placement row in parallel.
///
/// Rows are independent, so each worker writes a disjoint slice of the
/// padded storage. With `max_threads == 0` the global rayon pool is used;
/// otherwise a dedicated pool of that size runs the fill. The call returns
/// only after every row is written.
pub(crate) fn fill_map_par(
    setup: &ScanSetup<'_>,
    map: &mut SimilarityMap,
    max_threads: usize,
) -> BlobMatchResult<()> {
    if max_threads == 0 {
        fill_rows(setup, map);
        return Ok(());
    }

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(max_threads)
        .build()
        .map_err(|err| BlobMatchError::ThreadPool {
            reason: err.to_string(),
        })?;
    pool.install(|| fill_rows(setup, map));
    Ok(())
}

fn fill_rows(setup: &ScanSetup<'_>, map: &mut SimilarityMap) {
    let padded_width = map.padded_width();
    let border = map.border();
    let width = map.width();
    let height = map.height();
    map.values
        .par_chunks_mut(padded_width)
        .skip(border)
        .take(height)
        .enumerate()
        .for_each(|(y, row)| setup.fill_row(y, &mut row[border..border + width]));
}
