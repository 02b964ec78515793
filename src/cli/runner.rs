use std::fs;
use std::path::Path;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use bandscale::{
    ScaleRequest, compute_scale_params_for_path, process_directory_to_path, process_file_to_path,
    write_output_report,
};

use super::args::CliArgs;
use super::errors::AppError;

fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Request from `--config` (or defaults) with explicit flags applied on top.
fn build_request(args: &CliArgs) -> Result<ScaleRequest, AppError> {
    let mut request = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path)?;
            serde_json::from_str(&text).map_err(|source| AppError::InvalidConfig {
                path: path.display().to_string(),
                source,
            })?
        }
        None => ScaleRequest::default(),
    };

    if let Some(policy) = args.policy {
        request.policy = policy;
    }
    if let Some(bands) = &args.bands {
        request.bands = bands.clone();
    }
    if args.max_scale.is_some() {
        request.max_scale = args.max_scale;
    }
    if let Some(low) = args.low {
        request.low_fraction = low;
    }
    if let Some(high) = args.high {
        request.high_fraction = high;
    }
    if let Some(threshold) = args.chunk_threshold {
        request.chunk_threshold = threshold;
    }
    request.parallel |= args.parallel;

    request.validate()?;
    Ok(request)
}

fn process_single_file(
    input: &Path,
    output: Option<&Path>,
    request: &ScaleRequest,
) -> Result<(String, Vec<String>), AppError> {
    match output {
        Some(output) => {
            if process_file_to_path(input, output, request)? {
                Ok((
                    format!("Scale parameters computed for {}", input.display()),
                    vec![output.display().to_string()],
                ))
            } else {
                Ok((format!("No bands processed for {}", input.display()), vec![]))
            }
        }
        None => match compute_scale_params_for_path(input, request)? {
            Some(out) => {
                let json = serde_json::to_string_pretty(&out).map_err(bandscale::Error::from)?;
                println!("{}", json);
                Ok((
                    format!("Scale parameters computed for {}", input.display()),
                    vec![],
                ))
            }
            None => Ok((format!("No bands processed for {}", input.display()), vec![])),
        },
    }
}

fn dispatch(args: &CliArgs, request: &ScaleRequest) -> Result<(String, Vec<String>), AppError> {
    let batch_mode = args.batch || args.input_dir.is_some();

    if batch_mode {
        let input_dir = args.input_dir.as_deref().ok_or(AppError::MissingArgument {
            arg: "--input-dir".to_string(),
        })?;
        let output_dir = args.output_dir.as_deref().ok_or(AppError::MissingArgument {
            arg: "--output-dir".to_string(),
        })?;

        let report = process_directory_to_path(input_dir, output_dir, request, true)?;
        info!("Processed: {}", report.processed);
        info!("Skipped: {}", report.skipped);
        info!("Errors: {}", report.errors);

        let products = report
            .products
            .iter()
            .map(|p| p.display().to_string())
            .collect();
        Ok((
            format!(
                "Processed {} files, skipped {}, errors {}",
                report.processed, report.skipped, report.errors
            ),
            products,
        ))
    } else {
        let input = args.input.as_deref().ok_or(AppError::MissingArgument {
            arg: "--input".to_string(),
        })?;
        process_single_file(input, args.output.as_deref(), request)
    }
}

pub fn run(args: CliArgs) -> Result<(), Box<dyn std::error::Error>> {
    init_logging(args.log);

    let result = build_request(&args).and_then(|request| dispatch(&args, &request));

    if let Some(report_dir) = &args.report_dir {
        fs::create_dir_all(report_dir)?;
        let written = match &result {
            Ok((message, products)) => write_output_report(report_dir, true, message, products),
            Err(e) => write_output_report(report_dir, false, &e.to_string(), &[]),
        };
        if let Err(e) = written {
            warn!("Could not write run report: {}", e);
        }
    }

    let (message, _) = result?;
    info!("{}", message);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bandscale::ScalePolicy;
    use clap::Parser;

    #[test]
    fn flags_override_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("request.json");
        fs::write(
            &config,
            r#"{"policy":"SharedMinMax","bands":[4,3,2],"max_scale":4095.0}"#,
        )
        .unwrap();

        let args = CliArgs::parse_from([
            "bandscale",
            "--input",
            "scene.tif",
            "--config",
            config.to_str().unwrap(),
            "--policy",
            "cumulative",
            "--high",
            "0.99",
        ]);
        let request = build_request(&args).unwrap();
        assert_eq!(request.policy, ScalePolicy::CumulativePercentile);
        assert_eq!(request.bands, vec![4, 3, 2]);
        assert_eq!(request.max_scale, Some(4095.0));
        assert_eq!(request.high_fraction, 0.99);
    }

    #[test]
    fn band_list_is_comma_separated() {
        let args = CliArgs::parse_from(["bandscale", "-i", "scene.tif", "--bands", "3,2,1"]);
        let request = build_request(&args).unwrap();
        assert_eq!(request.bands, vec![3, 2, 1]);
        assert_eq!(request.policy, ScalePolicy::CumulativePercentile);
    }

    #[test]
    fn out_of_range_fraction_is_rejected() {
        let args = CliArgs::parse_from(["bandscale", "-i", "scene.tif", "--low=-0.5"]);
        assert!(matches!(build_request(&args), Err(AppError::Scale(_))));
    }
}
