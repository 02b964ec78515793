use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::Result;

/// Run report consumed by order pipelines, written as `output.json`.
#[derive(Debug, Clone, Serialize)]
pub struct OutputReport<'a> {
    pub success: bool,
    pub message: &'a str,
    pub products: &'a [String],
}

/// Write `directory/output.json` and return its path.
pub fn write_output_report(
    directory: &Path,
    success: bool,
    message: &str,
    products: &[String],
) -> Result<PathBuf> {
    let report = OutputReport {
        success,
        message,
        products,
    };
    let path = directory.join("output.json");
    let json = serde_json::to_string(&report)?;
    fs::write(&path, json)?;
    info!("Wrote run report to {:?}", path);
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_success_products_and_message() {
        let dir = tempfile::tempdir().unwrap();
        let products = vec!["scene.scale.json".to_string()];
        let path = write_output_report(dir.path(), true, "done", &products).unwrap();

        let text = fs::read_to_string(path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["success"], true);
        assert_eq!(value["message"], "done");
        assert_eq!(value["products"][0], "scene.scale.json");
    }
}
