//! Padded similarity map.

/// Integer similarity per template placement, surrounded by a zero border.
///
/// Cell `(x, y)` holds `max_diff - sad` for the placement with top-left
/// corner `(x, y)` of the search region, or 0 when that similarity fell
/// below the threshold. The border lets neighbourhood scans of radius up to
/// `border` run without bounds checks.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimilarityMap {
    pub(crate) values: Vec<u64>,
    pub(crate) width: usize,
    pub(crate) height: usize,
    pub(crate) border: usize,
    pub(crate) max_diff: u64,
}

impl SimilarityMap {
    pub(crate) fn new(width: usize, height: usize, border: usize, max_diff: u64) -> Self {
        let padded_width = width + 2 * border;
        let padded_height = height + 2 * border;
        Self {
            values: vec![0; padded_width * padded_height],
            width,
            height,
            border,
            max_diff,
        }
    }

    /// Number of horizontal placements.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of vertical placements.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Zero cells on each side of the placement grid.
    pub fn border(&self) -> usize {
        self.border
    }

    /// Row length of the padded storage.
    pub fn padded_width(&self) -> usize {
        self.width + 2 * self.border
    }

    /// Largest possible difference; a cell equal to it is a perfect match.
    pub fn max_diff(&self) -> u64 {
        self.max_diff
    }

    /// Padded row-major storage.
    pub fn padded(&self) -> &[u64] {
        &self.values
    }

    /// Raw score of placement `(x, y)`.
    pub fn get(&self, x: usize, y: usize) -> Option<u64> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.values[self.padded_index(x, y)])
    }

    /// Score of placement `(x, y)` normalised to `[0, 1]`.
    pub fn similarity(&self, x: usize, y: usize) -> Option<f32> {
        self.get(x, y).map(|v| self.normalize(v))
    }

    pub(crate) fn normalize(&self, value: u64) -> f32 {
        (value as f64 / self.max_diff as f64) as f32
    }

    #[inline]
    pub(crate) fn padded_index(&self, x: usize, y: usize) -> usize {
        (y + self.border) * self.padded_width() + x + self.border
    }

    /// Placement cells of row `y`, excluding the border.
    pub(crate) fn row_mut(&mut self, y: usize) -> &mut [u64] {
        let start = self.padded_index(0, y);
        let width = self.width;
        &mut self.values[start..start + width]
    }
}
