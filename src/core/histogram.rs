use ndarray::parallel::prelude::*;
use ndarray::{ArrayView2, Axis};

use crate::error::{Error, Result};
use crate::types::BinRange;

/// Fixed-width integer histogram, one bin per value in `[min_bin, max_bin)`.
///
/// Samples outside the range are clamped into the first/last bin, so a value
/// equal to `max_bin` is counted in the last bin rather than dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Histogram {
    range: BinRange,
    counts: Vec<u64>,
}

impl Histogram {
    /// All-zero histogram over `range`; identity element of `merge`.
    pub fn zeroed(range: BinRange) -> Self {
        Self {
            range,
            counts: vec![0; range.bin_count()],
        }
    }

    /// Histogram of one strip, skipping samples equal to `no_data`.
    pub fn accumulate(strip: ArrayView2<'_, i32>, no_data: Option<f64>, range: BinRange) -> Self {
        let mut hist = Self::zeroed(range);
        hist.add_samples(strip.iter().copied(), no_data);
        hist
    }

    /// Same result as `accumulate`, computed as a fold over row groups on the
    /// rayon pool followed by a merge of the partial histograms.
    pub fn accumulate_parallel(
        strip: ArrayView2<'_, i32>,
        no_data: Option<f64>,
        range: BinRange,
    ) -> Result<Self> {
        let partials: Vec<Histogram> = strip
            .axis_iter(Axis(0))
            .into_par_iter()
            .fold(
                || Self::zeroed(range),
                |mut hist, row| {
                    hist.add_samples(row.iter().copied(), no_data);
                    hist
                },
            )
            .collect();

        let mut total = Self::zeroed(range);
        for partial in &partials {
            total.merge_from(partial)?;
        }
        Ok(total)
    }

    fn add_samples<I: Iterator<Item = i32>>(&mut self, samples: I, no_data: Option<f64>) {
        let last = self.counts.len() as i64 - 1;
        if last < 0 {
            return;
        }
        let min_bin = self.range.min_bin as i64;
        for v in samples {
            if no_data.is_some_and(|nd| v as f64 == nd) {
                continue;
            }
            let idx = (v as i64 - min_bin).clamp(0, last) as usize;
            self.counts[idx] += 1;
        }
    }

    /// Element-wise sum of two histograms over the same bin range.
    pub fn merge(&self, other: &Histogram) -> Result<Histogram> {
        let mut merged = self.clone();
        merged.merge_from(other)?;
        Ok(merged)
    }

    /// In-place element-wise sum.
    pub fn merge_from(&mut self, other: &Histogram) -> Result<()> {
        if self.range != other.range || self.counts.len() != other.counts.len() {
            return Err(Error::ShapeMismatch {
                left: self.counts.len(),
                right: other.counts.len(),
            });
        }
        for (a, b) in self.counts.iter_mut().zip(&other.counts) {
            *a += *b;
        }
        Ok(())
    }

    pub fn range(&self) -> BinRange {
        self.range
    }

    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Number of samples counted.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Sample value represented by bin `idx`, in data-type units.
    pub fn value_of(&self, idx: usize) -> i32 {
        self.range.min_bin + idx as i32
    }

    /// Mean and population standard deviation of the counted samples.
    pub fn mean_std(&self) -> Option<(f64, f64)> {
        let n = self.total();
        if n == 0 {
            return None;
        }
        let (mut sum, mut sum_sq) = (0.0_f64, 0.0_f64);
        for (idx, &count) in self.counts.iter().enumerate() {
            if count == 0 {
                continue;
            }
            let v = self.value_of(idx) as f64;
            sum += v * count as f64;
            sum_sq += v * v * count as f64;
        }
        let mean = sum / n as f64;
        let var = (sum_sq / n as f64 - mean * mean).max(0.0);
        Some((mean, var.sqrt()))
    }
}
