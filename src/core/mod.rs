//! Core scaling building blocks: histogram accumulation, percentile extraction,
//! strip planning and the policy-driven scale parameter builder. These are
//! primitives consumed by the high-level `api` module.
pub mod chunking;
pub mod histogram;
pub mod params;
pub mod percentile;
pub mod scale;
