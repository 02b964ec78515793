//! Scale parameter builder: turns a list of bands into per-band display
//! stretches under one of the three `ScalePolicy` algorithms.
//!
//! A missing band is skipped under every policy. An unsupported sample type
//! is fatal under `CumulativePercentile` only.
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::core::chunking::ChunkPlan;
use crate::core::histogram::Histogram;
use crate::core::params::ScaleRequest;
use crate::core::percentile;
use crate::error::{Error, Result};
use crate::io::source::{RasterBandAccess, RasterSource};
use crate::types::{
    BandExtent, BandInfo, BandStatistics, BinRange, SampleType, ScaleParams, ScalePolicy,
};

/// Gamma exponent applied by every policy.
pub const DEFAULT_EXPONENT: f64 = 0.5;

/// Result of a scaling pass over a batch of bands
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScaleOutput {
    pub policy: ScalePolicy,
    /// Source band index of each entry in `params`
    pub bands: Vec<usize>,
    pub params: Vec<ScaleParams>,
    /// Per-band exponents, reported by the statistics policies only
    pub exponents: Option<Vec<f64>>,
    /// Global min/max across bands, reported by the statistics policies only
    pub extent: Option<BandExtent>,
    /// Requested bands the dataset could not provide
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub missing_bands: Vec<usize>,
}

impl ScaleOutput {
    /// `gdal_translate`-style band selection and stretch arguments.
    ///
    /// Rows for `missing_bands` (which `SharedMinMax` still reports) are left
    /// out, and the `-scale_N`/`-exponent_N` numbering follows the bands kept.
    pub fn translate_args(&self) -> Vec<String> {
        let rows: Vec<(usize, &ScaleParams)> = self
            .bands
            .iter()
            .zip(&self.params)
            .filter(|(band, _)| !self.missing_bands.contains(*band))
            .map(|(&band, p)| (band, p))
            .collect();

        let mut args = Vec::with_capacity(rows.len() * 11);
        for (band, _) in &rows {
            args.push("-b".to_string());
            args.push(band.to_string());
        }
        for (i, (_, p)) in rows.iter().enumerate() {
            let n = i + 1;
            args.push(format!("-scale_{}", n));
            args.extend([p.in_min, p.in_max, p.out_min, p.out_max].map(|v| v.to_string()));
            args.push(format!("-exponent_{}", n));
            args.push(p.exponent.to_string());
        }
        args
    }
}

/// Run `request.policy` over `dataset`.
///
/// `Ok(None)` means nothing to do: no dataset was supplied, or none of the
/// requested bands could be processed.
pub fn build_scale_params<S: RasterSource>(
    dataset: Option<&S>,
    request: &ScaleRequest,
) -> Result<Option<ScaleOutput>> {
    let Some(dataset) = dataset else {
        warn!("No dataset provided");
        return Ok(None);
    };
    request.validate()?;
    info!(
        "Computing {} scale parameters for bands {:?}",
        request.policy, request.bands
    );

    let output = match request.policy {
        ScalePolicy::AbsoluteMinMax => absolute_min_max(dataset, request)?,
        ScalePolicy::SharedMinMax => shared_min_max(dataset, request)?,
        ScalePolicy::CumulativePercentile => cumulative_percentile(dataset, request)?,
    };

    match &output {
        Some(out) => info!("Scale value is {:?}", out.params),
        None => warn!("No band could be processed"),
    }
    Ok(output)
}

/// Band statistics, or `None` when the band has to be skipped. A failed
/// computation (e.g. a band holding only no-data) counts as unavailable.
fn statistics_of<B: RasterBandAccess>(band: &B, index: usize) -> Option<BandStatistics> {
    match band.statistics(true, true) {
        Ok(Some(s)) => {
            info!(
                "[ STATS ] band {}: Minimum={:.3}, Maximum={:.3}, Mean={:.3}, StdDev={:.3}",
                index, s.min, s.max, s.mean, s.std_dev
            );
            Some(s)
        }
        Ok(None) => {
            warn!("No statistics available for band {}, skipping", index);
            None
        }
        Err(e) => {
            warn!("Statistics failed for band {}: {}, skipping", index, e);
            None
        }
    }
}

fn absolute_min_max<S: RasterSource>(
    dataset: &S,
    request: &ScaleRequest,
) -> Result<Option<ScaleOutput>> {
    let mut extent = BandExtent::default();
    let mut max_scale = request.max_scale;
    let mut bands = Vec::new();
    let mut params = Vec::new();
    let mut missing = Vec::new();

    for &index in &request.bands {
        debug!("Getting band {}", index);
        let Some(band) = dataset.band(index) else {
            warn!("Band {} not available, skipping", index);
            missing.push(index);
            continue;
        };
        let Some(stats) = statistics_of(&band, index) else {
            continue;
        };

        // Only strictly positive minimums take part in the global minimum
        if stats.min > 0.0 && extent.min.is_none_or(|m| stats.min < m) {
            extent.min = Some(stats.min);
        }
        if extent.max.is_none_or(|m| stats.max > m) {
            extent.max = Some(stats.max);
        }

        let out_max =
            *max_scale.get_or_insert_with(|| band.info().sample_type.default_max_scale());
        params.push(ScaleParams::new(
            stats.min,
            stats.max,
            1.0,
            out_max,
            DEFAULT_EXPONENT,
        ));
        bands.push(index);
    }

    info!(
        "Min bands is {:?} and max bands is {:?}",
        extent.min, extent.max
    );
    Ok(finish(ScalePolicy::AbsoluteMinMax, bands, params, Some(extent), missing))
}

fn shared_min_max<S: RasterSource>(
    dataset: &S,
    request: &ScaleRequest,
) -> Result<Option<ScaleOutput>> {
    let mut extent = BandExtent::default();
    let mut last_type: Option<SampleType> = None;
    let mut missing = Vec::new();

    for &index in &request.bands {
        debug!("Getting band {}", index);
        let Some(band) = dataset.band(index) else {
            warn!("Band {} not available, skipping", index);
            missing.push(index);
            continue;
        };
        let info = band.info();
        debug!("No data value is {:?}", info.no_data);
        last_type = Some(info.sample_type);
        let Some(stats) = statistics_of(&band, index) else {
            continue;
        };

        if extent.min.is_none_or(|m| stats.min < m) {
            extent.min = Some(stats.min);
        }
        if extent.max.is_none_or(|m| stats.max > m) {
            extent.max = Some(stats.max);
        }
    }

    let (Some(min_bands), Some(max_bands), Some(last_type)) = (extent.min, extent.max, last_type)
    else {
        return Ok(None);
    };
    info!("Min bands is {} and max bands is {}", min_bands, max_bands);

    // Default output maximum comes from the last accessible band in request order
    let out_max = request
        .max_scale
        .unwrap_or_else(|| last_type.default_max_scale());
    let shared = ScaleParams::new(min_bands, max_bands, 0.0, out_max, DEFAULT_EXPONENT);
    let bands = request.bands.clone();
    let params = vec![shared; bands.len()];

    Ok(finish(ScalePolicy::SharedMinMax, bands, params, Some(extent), missing))
}

fn cumulative_percentile<S: RasterSource>(
    dataset: &S,
    request: &ScaleRequest,
) -> Result<Option<ScaleOutput>> {
    let mut max_scale = request.max_scale;
    let mut bands = Vec::new();
    let mut params = Vec::new();
    let mut missing = Vec::new();

    for &index in &request.bands {
        debug!("Getting band {}", index);
        let Some(band) = dataset.band(index) else {
            warn!("Band {} not available, skipping", index);
            missing.push(index);
            continue;
        };
        let info = band.info();
        debug!("No data value is {:?}", info.no_data);

        let range = info
            .sample_type
            .bin_range()
            .ok_or(Error::UnsupportedDataType {
                band: index,
                sample_type: info.sample_type,
            })?;

        let out_max = *max_scale.get_or_insert_with(|| {
            info!("No max scale provided, using default value");
            info.sample_type.default_max_scale()
        });

        let (histogram, valid) = band_histogram(&band, &info, range, request, index)?;
        let (min_value, max_value) =
            percentile::extract(&histogram, valid, request.fractions(), index)?;
        debug!(
            "Band {}: {:.0}% cut at {}, {:.0}% cut at {}",
            index,
            request.low_fraction * 100.0,
            min_value,
            request.high_fraction * 100.0,
            max_value
        );

        params.push(ScaleParams::new(
            min_value as f64,
            max_value as f64,
            1.0,
            out_max,
            DEFAULT_EXPONENT,
        ));
        bands.push(index);
    }

    let mut output = finish(ScalePolicy::CumulativePercentile, bands, params, None, missing);
    if let Some(out) = output.as_mut() {
        out.exponents = None;
    }
    Ok(output)
}

/// Merged histogram of a whole band and its valid sample count, read strip by strip.
fn band_histogram<B: RasterBandAccess>(
    band: &B,
    info: &BandInfo,
    range: BinRange,
    request: &ScaleRequest,
    index: usize,
) -> Result<(Histogram, u64)> {
    let plan = ChunkPlan::new(info.width, info.height, request.chunk_threshold);
    info!(
        "Band {}: width {} height {} split into {} chunks of {:.2} rows",
        index, plan.width, plan.height, plan.chunks, plan.chunk_height
    );

    let mut histogram = Histogram::zeroed(range);
    let mut valid: u64 = 0;
    for strip in plan.strips() {
        debug!(
            "Band {}: reading rows {}..{}",
            index,
            strip.start_row,
            strip.start_row + strip.row_count
        );
        let data = band.read_strip(strip.start_row, strip.row_count)?;
        let strip_hist = if request.parallel {
            Histogram::accumulate_parallel(data.view(), info.no_data, range)?
        } else {
            Histogram::accumulate(data.view(), info.no_data, range)
        };
        let count = strip_hist.total();
        if let Some((mean, std)) = strip_hist.mean_std() {
            debug!(
                "Band size {} standard deviation {:.3} and mean {:.3}",
                count, std, mean
            );
        }
        valid += count;
        histogram.merge_from(&strip_hist)?;
    }

    info!("Cumulated histogram size {} for band {}", valid, index);
    Ok((histogram, valid))
}

fn finish(
    policy: ScalePolicy,
    bands: Vec<usize>,
    params: Vec<ScaleParams>,
    extent: Option<BandExtent>,
    missing_bands: Vec<usize>,
) -> Option<ScaleOutput> {
    if params.is_empty() {
        return None;
    }
    let exponents = params.iter().map(|p| p.exponent).collect();
    Some(ScaleOutput {
        policy,
        bands,
        params,
        exponents: Some(exponents),
        extent,
        missing_bands,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output(params: Vec<ScaleParams>) -> ScaleOutput {
        ScaleOutput {
            policy: ScalePolicy::CumulativePercentile,
            bands: (1..=params.len()).collect(),
            params,
            exponents: None,
            extent: None,
            missing_bands: vec![],
        }
    }

    #[test]
    fn translate_args_select_and_stretch_each_band() {
        let out = output(vec![
            ScaleParams::new(12.0, 240.0, 1.0, 255.0, 0.5),
            ScaleParams::new(3.0, 198.0, 1.0, 255.0, 0.5),
        ]);
        let args = out.translate_args();
        assert_eq!(
            args,
            vec![
                "-b", "1", "-b", "2", "-scale_1", "12", "240", "1", "255", "-exponent_1", "0.5",
                "-scale_2", "3", "198", "1", "255", "-exponent_2", "0.5",
            ]
        );
    }

    #[test]
    fn translate_args_leave_out_missing_bands() {
        let shared = ScaleParams::new(2.0, 900.0, 0.0, 255.0, 0.5);
        let mut out = output(vec![shared; 3]);
        out.bands = vec![1, 9, 2];
        out.missing_bands = vec![9];
        assert_eq!(
            out.translate_args(),
            vec![
                "-b", "1", "-b", "2", "-scale_1", "2", "900", "0", "255", "-exponent_1", "0.5",
                "-scale_2", "2", "900", "0", "255", "-exponent_2", "0.5",
            ]
        );
    }

    #[test]
    fn finish_without_params_is_nothing_to_do() {
        assert!(finish(ScalePolicy::AbsoluteMinMax, vec![], vec![], None, vec![4]).is_none());
    }
}
