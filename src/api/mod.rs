//! High-level, ergonomic library API: compute scale parameters for any
//! `RasterSource`, for a GDAL-readable file, or for a directory of files.
//! Prefer these entrypoints over the low-level `core` modules when integrating bandscale.
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::core::params::ScaleRequest;
use crate::core::scale::{ScaleOutput, build_scale_params};
use crate::error::Result;
use crate::io::gdal::GdalRasterSource;
use crate::io::source::RasterSource;
use crate::types::ScalePolicy;

/// Compute per-band scale parameters with default percentile fractions and strip size.
///
/// Returns `Ok(None)` when `dataset` is `None` or no requested band could be processed.
pub fn compute_scale_params<S: RasterSource>(
    dataset: Option<&S>,
    bands: &[usize],
    policy: ScalePolicy,
    max_scale: Option<f64>,
) -> Result<Option<ScaleOutput>> {
    let request = ScaleRequest::new(policy, bands.to_vec(), max_scale);
    build_scale_params(dataset, &request)
}

/// Compute per-band scale parameters for a fully specified request.
pub fn compute_scale_params_with<S: RasterSource>(
    dataset: Option<&S>,
    request: &ScaleRequest,
) -> Result<Option<ScaleOutput>> {
    build_scale_params(dataset, request)
}

/// Open `input` with GDAL and compute its scale parameters.
pub fn compute_scale_params_for_path(
    input: &Path,
    request: &ScaleRequest,
) -> Result<Option<ScaleOutput>> {
    let source = GdalRasterSource::open(input)?;
    build_scale_params(Some(&source), request)
}

/// Compute scale parameters for `input` and write them as JSON to `output`.
/// Returns whether anything was written.
pub fn process_file_to_path(input: &Path, output: &Path, request: &ScaleRequest) -> Result<bool> {
    let source = GdalRasterSource::open(input)?;
    write_scale_params(&source, input, output, request)
}

fn write_scale_params(
    source: &GdalRasterSource,
    input: &Path,
    output: &Path,
    request: &ScaleRequest,
) -> Result<bool> {
    match build_scale_params(Some(source), request)? {
        Some(out) => {
            let json = serde_json::to_string_pretty(&out)?;
            fs::write(output, json)?;
            info!("Wrote scale parameters to {:?}", output);
            Ok(true)
        }
        None => {
            warn!("Nothing to write for {:?}", input);
            Ok(false)
        }
    }
}

/// Summary of a directory run
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    pub processed: usize,
    pub skipped: usize,
    pub errors: usize,
    /// Written output files
    pub products: Vec<PathBuf>,
}

/// Process every regular file in `input_dir`, writing `<file name>.scale.json`
/// into `output_dir`.
///
/// Entries GDAL cannot open as a raster (sidecars, earlier outputs, ...) are
/// skipped. Files that open but fail to scale count as errors; with
/// `continue_on_error` set the run goes on, otherwise the first error is returned.
pub fn process_directory_to_path(
    input_dir: &Path,
    output_dir: &Path,
    request: &ScaleRequest,
    continue_on_error: bool,
) -> Result<BatchReport> {
    fs::create_dir_all(output_dir)?;
    info!("Starting batch processing from directory: {:?}", input_dir);

    let mut entries: Vec<PathBuf> = fs::read_dir(input_dir)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<_>>()?;
    entries.sort();

    let mut report = BatchReport::default();
    for path in entries {
        let Some(name) = path.file_name().filter(|_| path.is_file()) else {
            info!("Skipping non-file: {:?}", path);
            report.skipped += 1;
            continue;
        };
        // Early viability check so non-raster files are skipped, not failed
        let source = match GdalRasterSource::open(&path) {
            Ok(source) => source,
            Err(e) => {
                info!("Skipping {:?}: {}", path, e);
                report.skipped += 1;
                continue;
            }
        };
        let output_path = output_dir.join(format!("{}.scale.json", name.to_string_lossy()));
        info!("Processing: {:?} -> {:?}", path, output_path);

        match write_scale_params(&source, &path, &output_path, request) {
            Ok(true) => {
                report.processed += 1;
                report.products.push(output_path);
            }
            Ok(false) => report.skipped += 1,
            Err(e) => {
                warn!("Error processing {:?}: {}", path, e);
                report.errors += 1;
                if !continue_on_error {
                    return Err(e);
                }
            }
        }
    }

    info!(
        "Batch processing complete: processed={} skipped={} errors={}",
        report.processed, report.skipped, report.errors
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directory_run_skips_files_that_are_not_rasters() {
        let input = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        fs::write(input.path().join("README.txt"), "scene notes, not a raster").unwrap();

        let request = ScaleRequest::default();
        let report = process_directory_to_path(input.path(), output.path(), &request, false).unwrap();
        assert_eq!(report.skipped, 1);
        assert_eq!(report.errors, 0);
        assert_eq!(report.processed, 0);
        assert!(report.products.is_empty());
    }
}
