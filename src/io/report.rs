//! SNR report JSON export.
//!
//! The JSON artifact is the "portable" representation of a comparison run,
//! easy to consume from notebooks or downstream scripts.

use std::fs::File;
use std::path::Path;

use crate::domain::SnrReport;
use crate::error::AppError;

/// Write an SNR report as pretty-printed JSON.
pub fn write_report_json(path: &Path, report: &SnrReport) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| {
        AppError::config(format!(
            "Failed to create report JSON '{}': {e}",
            path.display()
        ))
    })?;
    serde_json::to_writer_pretty(file, report)
        .map_err(|e| AppError::config(format!("Failed to write report JSON: {e}")))?;
    Ok(())
}

/// Read an SNR report JSON file.
pub fn read_report_json(path: &Path) -> Result<SnrReport, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::config(format!(
            "Failed to open report JSON '{}': {e}",
            path.display()
        ))
    })?;
    serde_json::from_reader(file)
        .map_err(|e| AppError::config(format!("Invalid report JSON: {e}")))
}
