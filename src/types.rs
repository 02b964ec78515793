//! Shared types and enums used across bandscale.
//! Includes `SampleType` (with its histogram bin table), `ScalePolicy`,
//! per-band metadata (`BandInfo`, `BandStatistics`) and the `ScaleParams` output tuple.
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Raster sample data type as reported by the band accessor.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Serialize, Deserialize)]
pub enum SampleType {
    Byte,
    UInt16,
    Int16,
    UInt32,
    Int32,
    Float32,
    Float64,
    Unknown,
}

/// Inclusive numeric range `[min_bin, max_bin]` of a histogram-capable sample type.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct BinRange {
    pub min_bin: i32,
    pub max_bin: i32,
}

impl BinRange {
    /// Number of histogram bins, `max_bin - min_bin`.
    pub fn bin_count(&self) -> usize {
        (self.max_bin - self.min_bin) as usize
    }
}

// One row per histogram-capable type: (type, min_bin, max_bin, byte width)
const BIN_TABLE: &[(SampleType, i32, i32, usize)] = &[
    (SampleType::Byte, 0, 255, 1),
    (SampleType::UInt16, 0, 65535, 2),
    (SampleType::Int16, -32768, 32767, 2),
];

impl SampleType {
    /// Histogram bin range for this type, or `None` when the cumulative stretch
    /// does not support it.
    pub fn bin_range(self) -> Option<BinRange> {
        BIN_TABLE
            .iter()
            .find(|(t, ..)| *t == self)
            .map(|&(_, min_bin, max_bin, _)| BinRange { min_bin, max_bin })
    }

    /// Size in bytes of one sample, for the histogram-capable types.
    pub fn byte_width(self) -> Option<usize> {
        BIN_TABLE
            .iter()
            .find(|(t, ..)| *t == self)
            .map(|&(.., width)| width)
    }

    /// Default output maximum when the caller does not supply one.
    pub fn default_max_scale(self) -> f64 {
        match self {
            SampleType::Byte => 255.0,
            SampleType::UInt16 | SampleType::Int16 => 65535.0,
            _ => 255.0,
        }
    }
}

impl std::fmt::Display for SampleType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            SampleType::Byte => "Byte",
            SampleType::UInt16 => "UInt16",
            SampleType::Int16 => "Int16",
            SampleType::UInt32 => "UInt32",
            SampleType::Int32 => "Int32",
            SampleType::Float32 => "Float32",
            SampleType::Float64 => "Float64",
            SampleType::Unknown => "Unknown",
        };
        write!(f, "{}", s)
    }
}

/// Which scale parameter algorithm runs for the whole batch of bands.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug, Serialize, Deserialize)]
pub enum ScalePolicy {
    /// Per-band statistics min/max.
    #[value(name = "absolute")]
    AbsoluteMinMax,
    /// One min/max shared by every requested band.
    #[value(name = "shared")]
    SharedMinMax,
    /// 2nd/98th percentile of a chunked exact histogram.
    #[value(name = "cumulative")]
    CumulativePercentile,
}

impl std::fmt::Display for ScalePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScalePolicy::AbsoluteMinMax => write!(f, "AbsoluteMinMax"),
            ScalePolicy::SharedMinMax => write!(f, "SharedMinMax"),
            ScalePolicy::CumulativePercentile => write!(f, "CumulativePercentile"),
        }
    }
}

/// Band metadata needed by the scaling engine
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandInfo {
    /// Width (pixels)
    pub width: usize,
    /// Height (lines)
    pub height: usize,
    pub sample_type: SampleType,
    /// Reserved "no valid measurement" value, if any
    pub no_data: Option<f64>,
}

/// Band statistics as computed by the raster library
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BandStatistics {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub std_dev: f64,
}

/// Per-band display stretch: `(in_min, in_max, out_min, out_max, exponent)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleParams {
    pub in_min: f64,
    pub in_max: f64,
    pub out_min: f64,
    pub out_max: f64,
    pub exponent: f64,
}

impl ScaleParams {
    pub fn new(in_min: f64, in_max: f64, out_min: f64, out_max: f64, exponent: f64) -> Self {
        Self {
            in_min,
            in_max,
            out_min,
            out_max,
            exponent,
        }
    }
}

/// Min/max observed across all processed bands. Diagnostic only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BandExtent {
    pub min: Option<f64>,
    pub max: Option<f64>,
}
