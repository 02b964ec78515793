/// Sample budget of one strip read.
pub const DEFAULT_CHUNK_THRESHOLD: f64 = 1e8;

/// Rows `[start_row, start_row + row_count)` of a band, full width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Strip {
    pub start_row: usize,
    pub row_count: usize,
}

/// Split of a band into horizontal strips holding at most `threshold` samples
/// each (up to row rounding).
///
/// Boundaries are `floor(i * chunk_height)` with a real-valued `chunk_height`,
/// not an even integer split.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChunkPlan {
    pub width: usize,
    pub height: usize,
    pub chunks: usize,
    pub chunk_height: f64,
}

impl ChunkPlan {
    pub fn new(width: usize, height: usize, threshold: f64) -> Self {
        let image_size = (width as f64) * (height as f64);
        let chunks = (image_size / threshold).ceil() as usize;
        let chunk_height = if chunks == 0 {
            0.0
        } else {
            height as f64 / chunks as f64
        };
        Self {
            width,
            height,
            chunks,
            chunk_height,
        }
    }

    pub fn strip(&self, chunk: usize) -> Strip {
        let start_row = (chunk as f64 * self.chunk_height).floor() as usize;
        let stop_row = (((chunk + 1) as f64 * self.chunk_height).floor() as usize).min(self.height);
        Strip {
            start_row,
            row_count: stop_row.saturating_sub(start_row),
        }
    }

    pub fn strips(&self) -> impl Iterator<Item = Strip> + '_ {
        (0..self.chunks).map(move |chunk| self.strip(chunk))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_band_is_one_strip() {
        let plan = ChunkPlan::new(100, 80, DEFAULT_CHUNK_THRESHOLD);
        assert_eq!(plan.chunks, 1);
        let strips: Vec<Strip> = plan.strips().collect();
        assert_eq!(
            strips,
            vec![Strip {
                start_row: 0,
                row_count: 80
            }]
        );
    }

    #[test]
    fn large_band_splits_into_four() {
        let plan = ChunkPlan::new(20000, 20000, DEFAULT_CHUNK_THRESHOLD);
        assert_eq!(plan.chunks, 4);
        let starts: Vec<usize> = plan.strips().map(|s| s.start_row).collect();
        assert_eq!(starts, vec![0, 5000, 10000, 15000]);
    }

    #[test]
    fn uneven_heights_follow_floor_boundaries() {
        // 7 rows over 3 chunks: chunk height 2.333..
        let plan = ChunkPlan::new(10, 7, 25.0);
        assert_eq!(plan.chunks, 3);
        let strips: Vec<(usize, usize)> =
            plan.strips().map(|s| (s.start_row, s.row_count)).collect();
        assert_eq!(strips, vec![(0, 2), (2, 2), (4, 3)]);
    }

    #[test]
    fn strips_cover_the_band_contiguously() {
        for (width, height, threshold) in [(13, 101, 50.0), (1, 9999, 17.0), (640, 480, 1000.0)] {
            let plan = ChunkPlan::new(width, height, threshold);
            let mut next = 0;
            for strip in plan.strips() {
                assert_eq!(strip.start_row, next);
                next = strip.start_row + strip.row_count;
            }
            assert_eq!(next, height);
        }
    }

    #[test]
    fn empty_band_has_no_strips() {
        let plan = ChunkPlan::new(0, 10, DEFAULT_CHUNK_THRESHOLD);
        assert_eq!(plan.chunks, 0);
        assert_eq!(plan.strips().count(), 0);
    }
}
