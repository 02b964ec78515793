//! I/O layer: the band accessor seam (`source`), its GDAL-backed implementation
//! (`gdal`), and `writers` for the run report.
pub mod source;
pub use self::source::{RasterBandAccess, RasterSource};

pub mod gdal;
pub use self::gdal::{GdalBand, GdalError, GdalMetadata, GdalRasterSource};

pub mod writers;
