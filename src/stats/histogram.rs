//! 256-bucket intensity histogram.

use crate::util::math::{mean_from_sum, std_dev_from_sums};
use crate::util::{BlobMatchError, BlobMatchResult};

/// Number of buckets, one per byte value.
pub const HISTOGRAM_BUCKETS: usize = 256;

/// Frequency table over byte values with derived moments.
#[derive(Clone, Debug, PartialEq)]
pub struct Histogram {
    counts: [u64; HISTOGRAM_BUCKETS],
    total: u64,
    mean: f64,
    std_dev: f64,
    min: u8,
    max: u8,
    median: u8,
}

impl Histogram {
    /// Builds a histogram from bucket counts.
    pub fn from_counts(counts: [u64; HISTOGRAM_BUCKETS]) -> Self {
        let mut total = 0u64;
        let mut sum = 0.0f64;
        let mut sum_sq = 0.0f64;
        for (value, &count) in counts.iter().enumerate() {
            let v = value as f64;
            let c = count as f64;
            total += count;
            sum += v * c;
            sum_sq += v * v * c;
        }

        let min = counts.iter().position(|&c| c != 0).unwrap_or(0) as u8;
        let max = counts.iter().rposition(|&c| c != 0).unwrap_or(0) as u8;

        let half = total / 2;
        let mut cumulative = 0u64;
        let mut median = 0u8;
        if total > 0 {
            for (value, &count) in counts.iter().enumerate() {
                cumulative += count;
                if cumulative >= half && count != 0 {
                    median = value as u8;
                    break;
                }
            }
        }

        let n = total as f64;
        Self {
            counts,
            total,
            mean: mean_from_sum(sum, n),
            std_dev: std_dev_from_sums(sum, sum_sq, n),
            min,
            max,
            median,
        }
    }

    /// Builds a histogram from a slice that must hold exactly 256 counts.
    pub fn from_slice(counts: &[u64]) -> BlobMatchResult<Self> {
        let counts: [u64; HISTOGRAM_BUCKETS] =
            counts
                .try_into()
                .map_err(|_| BlobMatchError::ArgumentOutOfRange {
                    name: "counts",
                    reason: "histogram needs exactly 256 buckets",
                })?;
        Ok(Self::from_counts(counts))
    }

    /// Bucket counts indexed by value.
    pub fn values(&self) -> &[u64; HISTOGRAM_BUCKETS] {
        &self.counts
    }

    /// Number of samples.
    pub fn total_count(&self) -> u64 {
        self.total
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    pub fn std_dev(&self) -> f64 {
        self.std_dev
    }

    pub fn variance(&self) -> f64 {
        self.std_dev * self.std_dev
    }

    /// Smallest value with a non-zero count (0 when empty).
    pub fn min(&self) -> u8 {
        self.min
    }

    /// Largest value with a non-zero count (0 when empty).
    pub fn max(&self) -> u8 {
        self.max
    }

    /// Value at which the cumulative count first reaches half the total.
    pub fn median(&self) -> u8 {
        self.median
    }

    /// Value range around the median holding `percent` of the samples.
    ///
    /// The excluded share `1 - percent` is split evenly between the low and
    /// high tails. `percent` must lie in `[0, 1]`.
    pub fn range(&self, percent: f64) -> BlobMatchResult<(u8, u8)> {
        if !(0.0..=1.0).contains(&percent) {
            return Err(BlobMatchError::ArgumentOutOfRange {
                name: "percent",
                reason: "must lie in [0, 1]",
            });
        }
        if self.total == 0 {
            return Ok((0, 0));
        }

        let keep = (self.total as f64 * (percent + (1.0 - percent) / 2.0)) as u64;
        let mut low = 0usize;
        let mut hits = self.total;
        while low < HISTOGRAM_BUCKETS - 1 {
            hits -= self.counts[low];
            if hits < keep {
                break;
            }
            low += 1;
        }

        let mut high = HISTOGRAM_BUCKETS - 1;
        let mut hits = self.total;
        while high > 0 {
            hits -= self.counts[high];
            if hits < keep {
                break;
            }
            high -= 1;
        }

        Ok((low.min(high) as u8, high.max(low) as u8))
    }

    /// Cumulative-distribution remap `t[v] = floor(255 * cdf(v) / total)`.
    ///
    /// The table is monotonically non-decreasing; an empty histogram yields
    /// the identity table.
    pub fn equalization_table(&self) -> [u8; HISTOGRAM_BUCKETS] {
        let mut table = [0u8; HISTOGRAM_BUCKETS];
        if self.total == 0 {
            for (value, slot) in table.iter_mut().enumerate() {
                *slot = value as u8;
            }
            return table;
        }

        let total = self.total as u128;
        let mut cumulative = 0u128;
        for (slot, &count) in table.iter_mut().zip(self.counts.iter()) {
            cumulative += count as u128;
            *slot = (255 * cumulative / total) as u8;
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::{Histogram, HISTOGRAM_BUCKETS};

    fn histogram(samples: &[u8]) -> Histogram {
        let mut counts = [0u64; HISTOGRAM_BUCKETS];
        for &s in samples {
            counts[s as usize] += 1;
        }
        Histogram::from_counts(counts)
    }

    #[test]
    fn moments_of_small_population() {
        let h = histogram(&[2, 4, 4, 4, 5, 5, 7, 9]);
        assert_eq!(h.total_count(), 8);
        assert!((h.mean() - 5.0).abs() < 1e-12);
        assert!((h.std_dev() - 2.0).abs() < 1e-12);
        assert!((h.variance() - 4.0).abs() < 1e-9);
        assert_eq!(h.min(), 2);
        assert_eq!(h.max(), 9);
        assert_eq!(h.median(), 4);
    }

    #[test]
    fn empty_histogram_is_all_zero() {
        let h = Histogram::from_counts([0; HISTOGRAM_BUCKETS]);
        assert_eq!(h.total_count(), 0);
        assert_eq!(h.mean(), 0.0);
        assert_eq!((h.min(), h.max(), h.median()), (0, 0, 0));
        assert_eq!(h.range(0.9).unwrap(), (0, 0));
        assert_eq!(h.equalization_table()[77], 77);
    }

    #[test]
    fn from_slice_requires_256_buckets() {
        assert!(Histogram::from_slice(&[1, 2, 3]).is_err());
        let counts = vec![1u64; 256];
        assert_eq!(Histogram::from_slice(&counts).unwrap().total_count(), 256);
    }

    #[test]
    fn full_range_spans_occupied_buckets() {
        let h = histogram(&[10, 20, 30, 40]);
        assert_eq!(h.range(1.0).unwrap(), (10, 40));
    }

    #[test]
    fn narrow_range_trims_tails() {
        let mut samples = vec![128u8; 98];
        samples.push(0);
        samples.push(255);
        let h = histogram(&samples);
        assert_eq!(h.range(0.9).unwrap(), (128, 128));
        assert!(h.range(1.5).is_err());
    }

    #[test]
    fn equalization_of_two_values() {
        let h = histogram(&[0, 0, 255, 255]);
        let table = h.equalization_table();
        assert_eq!(table[0], 127);
        assert_eq!(table[100], 127);
        assert_eq!(table[255], 255);
    }
}
