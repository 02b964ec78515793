use gdal::raster::{GdalDataType, RasterBand};
use gdal::{Dataset, errors::GdalError as GdalCrateError};
use ndarray::Array2;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

use crate::io::source::{RasterBandAccess, RasterSource};
use crate::types::{BandInfo, BandStatistics, SampleType};

/// Errors encountered when using GDAL reader
#[derive(Debug, Error)]
pub enum GdalError {
    #[error("GDAL error: {0}")]
    Gdal(#[from] GdalCrateError),
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
    #[error("Dimension mismatch: expected {0}x{1}, got {2}")]
    DimensionMismatch(usize, usize, usize),
}

/// Dataset-level metadata of a GDAL-supported raster
#[derive(Debug, Clone)]
pub struct GdalMetadata {
    /// Width (pixels) of the raster
    pub size_x: usize,
    /// Height (lines) of the raster
    pub size_y: usize,
    /// Number of raster bands
    pub bands: usize,
}

/// `RasterSource` over a dataset opened by GDAL
pub struct GdalRasterSource {
    pub dataset: Dataset,
    pub metadata: GdalMetadata,
}

impl GdalRasterSource {
    /// Open a GDAL-supported dataset (e.g., GeoTIFF, JP2, VRT, NITF)
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, GdalError> {
        let dataset = Dataset::open(path.as_ref())?;
        let (size_x, size_y) = dataset.raster_size();
        let bands = dataset.raster_count() as usize;
        if bands == 0 {
            return Err(GdalError::UnsupportedFormat("No raster bands found".into()));
        }
        debug!(
            "Opened {:?}: {} columns, {} rows, {} bands",
            path.as_ref(),
            size_x,
            size_y,
            bands
        );
        Ok(GdalRasterSource {
            dataset,
            metadata: GdalMetadata {
                size_x: size_x as usize,
                size_y: size_y as usize,
                bands,
            },
        })
    }
}

impl RasterSource for GdalRasterSource {
    type Band<'a> = GdalBand<'a>;

    fn band_count(&self) -> usize {
        self.metadata.bands
    }

    fn band(&self, index: usize) -> Option<GdalBand<'_>> {
        if index == 0 || index > self.metadata.bands {
            return None;
        }
        match self.dataset.rasterband(index) {
            Ok(band) => Some(GdalBand { band }),
            Err(e) => {
                debug!("Band {} not accessible: {}", index, e);
                None
            }
        }
    }
}

/// One band of a `GdalRasterSource`
pub struct GdalBand<'a> {
    band: RasterBand<'a>,
}

fn sample_type_of(data_type: GdalDataType) -> SampleType {
    match data_type {
        GdalDataType::UInt8 => SampleType::Byte,
        GdalDataType::UInt16 => SampleType::UInt16,
        GdalDataType::Int16 => SampleType::Int16,
        GdalDataType::UInt32 => SampleType::UInt32,
        GdalDataType::Int32 => SampleType::Int32,
        GdalDataType::Float32 => SampleType::Float32,
        GdalDataType::Float64 => SampleType::Float64,
        // Int8/UInt64/Int64 exist only on newer GDAL builds
        _ => SampleType::Unknown,
    }
}

impl RasterBandAccess for GdalBand<'_> {
    fn info(&self) -> BandInfo {
        let (width, height) = self.band.size();
        BandInfo {
            width,
            height,
            sample_type: sample_type_of(self.band.band_type()),
            no_data: self.band.no_data_value(),
        }
    }

    fn read_strip(&self, start_row: usize, row_count: usize) -> crate::Result<Array2<i32>> {
        let (width, _) = self.band.size();
        let window = (width, row_count);
        let buf = self
            .band
            .read_as::<i32>((0, start_row as isize), window, window, None)
            .map_err(GdalError::from)?;
        let (_, data_vec) = buf.into_shape_and_vec();
        let len = data_vec.len();
        let array = Array2::from_shape_vec((row_count, width), data_vec)
            .map_err(|_| GdalError::DimensionMismatch(width, row_count, len))?;
        Ok(array)
    }

    fn statistics(&self, approx_ok: bool, force: bool) -> crate::Result<Option<BandStatistics>> {
        let stats = self
            .band
            .get_statistics(force, approx_ok)
            .map_err(GdalError::from)?;
        Ok(stats.map(|s| BandStatistics {
            min: s.min,
            max: s.max,
            mean: s.mean,
            std_dev: s.std_dev,
        }))
    }
}
