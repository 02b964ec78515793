//! In-memory raster used by the integration tests.
#![allow(dead_code)]

use std::cell::RefCell;

use bandscale::{BandInfo, BandStatistics, RasterBandAccess, RasterSource, SampleType};
use ndarray::{Array2, s};

/// Pixel content of a mock band
pub enum Pixels {
    /// Full band, sliced on each strip read
    Data(Array2<i32>),
    /// Every strip read returns a single sample with this value
    Stub(i32),
}

pub struct MockBand {
    pub info: BandInfo,
    pub pixels: Pixels,
    pub stats: Option<BandStatistics>,
    /// Statistics computation fails instead of returning `stats`
    pub stats_fail: bool,
    reads: RefCell<Vec<(usize, usize)>>,
}

impl MockBand {
    pub fn from_data(sample_type: SampleType, data: Array2<i32>, no_data: Option<f64>) -> Self {
        let (height, width) = data.dim();
        Self {
            info: BandInfo {
                width,
                height,
                sample_type,
                no_data,
            },
            pixels: Pixels::Data(data),
            stats: None,
            stats_fail: false,
            reads: RefCell::new(Vec::new()),
        }
    }

    pub fn stub(sample_type: SampleType, width: usize, height: usize, value: i32) -> Self {
        Self {
            info: BandInfo {
                width,
                height,
                sample_type,
                no_data: None,
            },
            pixels: Pixels::Stub(value),
            stats: None,
            stats_fail: false,
            reads: RefCell::new(Vec::new()),
        }
    }

    pub fn with_stats(sample_type: SampleType, min: f64, max: f64) -> Self {
        let mut band = Self::stub(sample_type, 4, 4, 0);
        band.stats = Some(BandStatistics {
            min,
            max,
            mean: (min + max) / 2.0,
            std_dev: (max - min) / 4.0,
        });
        band
    }

    /// Band whose statistics computation errors, as GDAL does for an all no-data band
    pub fn failing_stats(sample_type: SampleType) -> Self {
        let mut band = Self::stub(sample_type, 4, 4, 0);
        band.stats_fail = true;
        band
    }

    /// `(start_row, row_count)` of every strip read so far
    pub fn reads(&self) -> Vec<(usize, usize)> {
        self.reads.borrow().clone()
    }
}

pub struct MockBandRef<'a>(&'a MockBand);

impl RasterBandAccess for MockBandRef<'_> {
    fn info(&self) -> BandInfo {
        self.0.info
    }

    fn read_strip(&self, start_row: usize, row_count: usize) -> bandscale::Result<Array2<i32>> {
        self.0.reads.borrow_mut().push((start_row, row_count));
        match &self.0.pixels {
            Pixels::Data(data) => Ok(data
                .slice(s![start_row..start_row + row_count, ..])
                .to_owned()),
            Pixels::Stub(value) => Ok(Array2::from_elem((1, 1), *value)),
        }
    }

    fn statistics(&self, _approx_ok: bool, _force: bool) -> bandscale::Result<Option<BandStatistics>> {
        if self.0.stats_fail {
            return Err(std::io::Error::other("failed to compute statistics").into());
        }
        Ok(self.0.stats)
    }
}

/// Dataset whose band slots may be empty to model inaccessible bands
pub struct MockSource {
    pub bands: Vec<Option<MockBand>>,
}

impl MockSource {
    pub fn new(bands: Vec<MockBand>) -> Self {
        Self {
            bands: bands.into_iter().map(Some).collect(),
        }
    }

    pub fn band_ref(&self, index: usize) -> &MockBand {
        self.bands[index - 1].as_ref().expect("band present")
    }
}

impl RasterSource for MockSource {
    type Band<'a> = MockBandRef<'a>;

    fn band_count(&self) -> usize {
        self.bands.len()
    }

    fn band(&self, index: usize) -> Option<MockBandRef<'_>> {
        if index == 0 {
            return None;
        }
        self.bands
            .get(index - 1)
            .and_then(|b| b.as_ref())
            .map(MockBandRef)
    }
}

/// `height x width` band filled with `value`
pub fn constant(height: usize, width: usize, value: i32) -> Array2<i32> {
    Array2::from_elem((height, width), value)
}
