use clap::Parser;
use std::path::PathBuf;

use bandscale::ScalePolicy;

#[derive(Parser)]
#[command(
    name = "bandscale",
    version,
    about = "Compute true-colour display stretch parameters for raster bands"
)]
pub struct CliArgs {
    /// Input raster readable by GDAL (single file mode)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Input directory containing rasters (batch mode)
    #[arg(long)]
    pub input_dir: Option<PathBuf>,

    /// Output JSON file (single file mode); stdout when omitted
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output directory for batch processing (batch mode)
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// JSON file with a scale request; explicit flags override its values
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Scaling policy (absolute, shared, cumulative) [default: cumulative]
    #[arg(long, value_enum)]
    pub policy: Option<ScalePolicy>,

    /// 1-based band indices in output order, e.g. 3,2,1 [default: 1,2,3]
    #[arg(long, value_delimiter = ',')]
    pub bands: Option<Vec<usize>>,

    /// Output maximum; defaults from the band data type (255 or 65535)
    #[arg(long)]
    pub max_scale: Option<f64>,

    /// Lower cumulative fraction for the cumulative policy [default: 0.02]
    #[arg(long)]
    pub low: Option<f64>,

    /// Upper cumulative fraction for the cumulative policy [default: 0.98]
    #[arg(long)]
    pub high: Option<f64>,

    /// Samples per strip read [default: 1e8]
    #[arg(long)]
    pub chunk_threshold: Option<f64>,

    /// Accumulate strip histograms in parallel
    #[arg(long, default_value_t = false)]
    pub parallel: bool,

    /// Directory receiving an output.json run report
    #[arg(long)]
    pub report_dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, default_value_t = false)]
    pub log: bool,

    /// Batch mode over --input-dir; per-file errors are counted and the run goes on
    #[arg(long, default_value_t = false)]
    pub batch: bool,
}
