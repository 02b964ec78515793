//! Crate-level error type and `Result` alias for stable, structured error handling.
//! Converts underlying I/O, JSON and GDAL errors, and provides semantic variants
//! for the fatal conditions of a scaling pass.
use thiserror::Error;

use crate::types::SampleType;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("GDAL error: {0}")]
    Gdal(#[from] crate::io::GdalError),

    #[error("Unsupported data type {sample_type} for band {band}")]
    UnsupportedDataType { band: usize, sample_type: SampleType },

    #[error("Band {band} has no valid samples")]
    EmptyDistribution { band: usize },

    #[error("Histogram shape mismatch: {left} bins vs {right} bins")]
    ShapeMismatch { left: usize, right: usize },

    #[error("Histogram holds {actual} samples, expected {expected}")]
    CountMismatch { expected: u64, actual: u64 },

    #[error("Invalid argument: {arg}={value}")]
    InvalidArgument { arg: &'static str, value: String },
}
