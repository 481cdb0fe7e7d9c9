use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::info;

use crate::constants::REPORT_BASENAME;
use crate::models::Report;

/// Serialize the report as pretty-printed JSON.
pub fn to_json_string(report: &Report) -> Result<String> {
    serde_json::to_string_pretty(report).context("Failed to serialize report to JSON")
}

/// Write one JSON snapshot of the report, namespaced by the session
/// timestamp.
pub fn write_json_report(report: &Report, output_dir: &Path, timestamp: &str) -> Result<PathBuf> {
    let path = output_dir.join(format!("{}_{}.json", timestamp, REPORT_BASENAME));
    fs::write(&path, to_json_string(report)?)
        .context(format!("Failed to write JSON report: {}", path.display()))?;

    info!("JSON report saved to {}", path.display());
    Ok(path)
}
