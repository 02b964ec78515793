//! Band accessor seam between the scaling engine and a raster library.
//!
//! The engine only borrows read access: it asks a `RasterSource` for bands by
//! 1-based index, reads their metadata, horizontal strips and statistics.
use ndarray::Array2;

use crate::error::Result;
use crate::types::{BandInfo, BandStatistics};

/// A multi-band raster dataset.
pub trait RasterSource {
    type Band<'a>: RasterBandAccess
    where
        Self: 'a;

    /// Number of bands in the dataset
    fn band_count(&self) -> usize;

    /// Band at the 1-based `index`, or `None` when it is out of range or inaccessible.
    fn band(&self, index: usize) -> Option<Self::Band<'_>>;
}

/// Read access to one raster band.
pub trait RasterBandAccess {
    fn info(&self) -> BandInfo;

    /// Read rows `[start_row, start_row + row_count)` at full width.
    /// Returned array has shape `(row_count, width)`; samples are widened to `i32`.
    fn read_strip(&self, start_row: usize, row_count: usize) -> Result<Array2<i32>>;

    /// Min/max/mean/stddev as computed by the raster library itself.
    /// `Ok(None)` when the library has no statistics to offer.
    fn statistics(&self, approx_ok: bool, force: bool) -> Result<Option<BandStatistics>>;
}
