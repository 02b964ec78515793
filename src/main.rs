//! bandscale CLI entrypoint.
//!
//! Parses args, dispatches to single-file or batch processing, and exits
//! with an appropriate status. For programmatic use, prefer the library API.

use clap::Parser;

mod cli;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = cli::CliArgs::parse();
    cli::run(args)
}
