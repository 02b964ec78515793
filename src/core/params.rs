use serde::{Deserialize, Serialize};

use crate::core::chunking::DEFAULT_CHUNK_THRESHOLD;
use crate::core::percentile::PercentileFractions;
use crate::error::{Error, Result};
use crate::types::ScalePolicy;

/// Scaling parameters suitable for config files and batch presets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScaleRequest {
    pub policy: ScalePolicy,
    /// 1-based band indices, in output order (RGB order expected)
    pub bands: Vec<usize>,
    /// Output maximum; None resolves a default from the band data type
    pub max_scale: Option<f64>,
    pub low_fraction: f64,
    pub high_fraction: f64,
    /// Samples per strip read for the cumulative policy
    pub chunk_threshold: f64,
    /// Accumulate strip histograms on the rayon pool
    pub parallel: bool,
}

impl Default for ScaleRequest {
    fn default() -> Self {
        let fractions = PercentileFractions::default();
        Self {
            policy: ScalePolicy::CumulativePercentile,
            bands: vec![1, 2, 3],
            max_scale: None,
            low_fraction: fractions.low,
            high_fraction: fractions.high,
            chunk_threshold: DEFAULT_CHUNK_THRESHOLD,
            parallel: false,
        }
    }
}

impl ScaleRequest {
    pub fn new(policy: ScalePolicy, bands: Vec<usize>, max_scale: Option<f64>) -> Self {
        Self {
            policy,
            bands,
            max_scale,
            ..Self::default()
        }
    }

    pub fn fractions(&self) -> PercentileFractions {
        PercentileFractions {
            low: self.low_fraction,
            high: self.high_fraction,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(&bad) = self.bands.iter().find(|&&b| b == 0) {
            return Err(Error::InvalidArgument {
                arg: "bands",
                value: bad.to_string(),
            });
        }
        let (low, high) = (self.low_fraction, self.high_fraction);
        if !(0.0..1.0).contains(&low) || !(0.0..1.0).contains(&high) || low > high {
            return Err(Error::InvalidArgument {
                arg: "fractions",
                value: format!("{}..{}", low, high),
            });
        }
        // Below one sample per strip the plan degenerates into empty reads
        if !(self.chunk_threshold >= 1.0) {
            return Err(Error::InvalidArgument {
                arg: "chunk_threshold",
                value: self.chunk_threshold.to_string(),
            });
        }
        if let Some(max_scale) = self.max_scale {
            if !(max_scale > 0.0) {
                return Err(Error::InvalidArgument {
                    arg: "max_scale",
                    value: max_scale.to_string(),
                });
            }
        }
        Ok(())
    }
}
