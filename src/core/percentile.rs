use serde::{Deserialize, Serialize};

use crate::core::histogram::Histogram;
use crate::error::{Error, Result};

/// Lower and upper cumulative fractions of a cumulative-count stretch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PercentileFractions {
    pub low: f64,
    pub high: f64,
}

impl Default for PercentileFractions {
    fn default() -> Self {
        Self {
            low: 0.02,
            high: 0.98,
        }
    }
}

/// Find the histogram values at which the cumulative count first exceeds
/// `total_valid * low` and `total_valid * high`.
///
/// The walk stops at the high boundary. Both values are in data-type units
/// and may coincide on a low-variance band. `band` only labels the error
/// for an empty distribution.
pub fn extract(
    histogram: &Histogram,
    total_valid: u64,
    fractions: PercentileFractions,
    band: usize,
) -> Result<(i32, i32)> {
    if total_valid == 0 {
        return Err(Error::EmptyDistribution { band });
    }

    let low_target = total_valid as f64 * fractions.low;
    let high_target = total_valid as f64 * fractions.high;

    let mut low = None;
    let mut running: u64 = 0;
    for (idx, &count) in histogram.counts().iter().enumerate() {
        running += count;
        let sum = running as f64;
        if low.is_none() && sum > low_target {
            low = Some(histogram.value_of(idx));
        }
        if sum > high_target {
            // high >= low, so low is always set by now
            let high = histogram.value_of(idx);
            return Ok((low.unwrap_or(high), high));
        }
    }

    Err(Error::CountMismatch {
        expected: total_valid,
        actual: running,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BinRange;
    use ndarray::Array2;

    const UINT16: BinRange = BinRange {
        min_bin: 0,
        max_bin: 65535,
    };

    fn histogram_of(values: &[i32], range: BinRange) -> Histogram {
        let strip = Array2::from_shape_vec((1, values.len()), values.to_vec()).unwrap();
        Histogram::accumulate(strip.view(), None, range)
    }

    #[test]
    fn empty_distribution_is_an_error() {
        let hist = Histogram::zeroed(UINT16);
        assert!(matches!(
            extract(&hist, 0, PercentileFractions::default(), 2),
            Err(Error::EmptyDistribution { band: 2 })
        ));
    }

    #[test]
    fn single_occupied_bin_gives_equal_bounds() {
        let hist = histogram_of(&[420; 17], UINT16);
        for (low, high) in [(0.0, 0.5), (0.02, 0.98), (0.3, 0.31)] {
            let bounds = extract(&hist, 17, PercentileFractions { low, high }, 1).unwrap();
            assert_eq!(bounds, (420, 420));
        }
    }

    #[test]
    fn percentile_bounds_trim_outliers() {
        // 0..100 uniformly, once each
        let values: Vec<i32> = (0..100).collect();
        let hist = histogram_of(&values, UINT16);
        let (low, high) = extract(&hist, 100, PercentileFractions::default(), 1).unwrap();
        // running sum 3 is the first > 2, running sum 99 the first > 98
        assert_eq!((low, high), (2, 98));
    }

    #[test]
    fn reports_values_in_signed_units() {
        let range = BinRange {
            min_bin: -32768,
            max_bin: 32767,
        };
        let hist = histogram_of(&[-5, -5, -5, 10, 10, 10], range);
        let (low, high) = extract(&hist, 6, PercentileFractions::default(), 1).unwrap();
        assert_eq!((low, high), (-5, 10));
        assert!(low <= high);
    }

    #[test]
    fn inconsistent_total_is_reported() {
        let hist = histogram_of(&[1, 2, 3], UINT16);
        assert!(matches!(
            extract(&hist, 1000, PercentileFractions::default(), 1),
            Err(Error::CountMismatch {
                expected: 1000,
                actual: 3
            })
        ));
    }
}
