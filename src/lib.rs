#![doc = r#"
bandscale — radiometric scale parameters for true-colour rendering of
multi-band satellite rasters.

Raw sensor bands (8/16-bit, signed or unsigned, with outliers and no-data
sentinels) must be stretched into a bounded display range before they can be
shown. This crate computes, per band, the `(in_min, in_max, out_min, out_max,
exponent)` tuple used for that stretch, without ever holding a whole band in
memory: the cumulative-count policy builds an exact histogram strip by strip.

Policies
--------
- `AbsoluteMinMax` — per-band min/max from the raster library's statistics.
- `SharedMinMax` — one min/max shared by all requested bands.
- `CumulativePercentile` — 2nd/98th percentile of a chunked exact histogram.

Requirements
------------
- GDAL development headers and runtime available on your system.
- Rust 2024 edition toolchain.

Quick start: scale a GeoTIFF
----------------------------
```rust,no_run
use std::path::Path;
use bandscale::{compute_scale_params_for_path, ScalePolicy, ScaleRequest};

fn main() -> bandscale::Result<()> {
    let request = ScaleRequest::new(ScalePolicy::CumulativePercentile, vec![3, 2, 1], None);
    if let Some(out) = compute_scale_params_for_path(Path::new("/data/scene.tif"), &request)? {
        println!("gdal_translate {}", out.translate_args().join(" "));
    }
    Ok(())
}
```

Bring your own raster reader
----------------------------
Implement `RasterSource` / `RasterBandAccess` and call `compute_scale_params`.
A `None` dataset, or a batch in which no band could be read, yields `Ok(None)`.

Error handling
--------------
All public functions return `bandscale::Result<T>`; match on `bandscale::Error`
to tell an unsupported band type or an all-no-data band from GDAL failures.

```rust,no_run
use std::path::Path;
use bandscale::{compute_scale_params_for_path, Error, ScaleRequest};

fn main() {
    match compute_scale_params_for_path(Path::new("/data/scene.tif"), &ScaleRequest::default()) {
        Ok(Some(out)) => println!("{:?}", out.params),
        Ok(None) => println!("nothing to do"),
        Err(Error::UnsupportedDataType { band, sample_type }) => {
            eprintln!("band {band} is {sample_type}")
        }
        Err(Error::EmptyDistribution { band }) => eprintln!("band {band} is all no-data"),
        Err(other) => eprintln!("Other error: {other}"),
    }
}
```

Useful modules
--------------
- [`api`] — high-level, ergonomic entry points.
- [`core`] — histogram, percentile, chunking and the scale builder.
- [`types`] — sample types, policies and the `ScaleParams` tuple.
- [`io`] — the band accessor traits, GDAL adapter and report writer.
- [`error`] — crate-level `Error` and `Result`.
"#]

pub mod api;
pub mod core;
pub mod error;
pub mod io;
pub mod types;

// Curated public API surface
pub use crate::core::params::ScaleRequest;
pub use crate::core::scale::{DEFAULT_EXPONENT, ScaleOutput};
pub use error::{Error, Result};
pub use types::{BandExtent, BandInfo, BandStatistics, SampleType, ScaleParams, ScalePolicy};

pub use io::gdal::{GdalError, GdalRasterSource};
pub use io::source::{RasterBandAccess, RasterSource};
pub use io::writers::report::write_output_report;

pub use api::{
    BatchReport, compute_scale_params, compute_scale_params_for_path, compute_scale_params_with,
    process_directory_to_path, process_file_to_path,
};
