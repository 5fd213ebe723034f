//! Read/write fit JSON files.
//!
//! Fit JSON is the portable record of one run's outcome:
//! - window + policy actually used
//! - fitted slope/intercept (when a fit was produced)
//! - the derived log10 rate (when defined)
//!
//! The schema is defined by `domain::FitExportFile`.

use std::fs::File;
use std::path::Path;

use crate::domain::FitExportFile;
use crate::error::AppError;

/// Write a fit JSON file.
pub fn write_fit_json(path: &Path, export: &FitExportFile) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| AppError::Io {
        message: format!("failed to create fit JSON '{}': {e}", path.display()),
    })?;

    serde_json::to_writer_pretty(file, export).map_err(|e| AppError::Io {
        message: format!("failed to write fit JSON '{}': {e}", path.display()),
    })?;

    Ok(())
}

/// Read a fit JSON file.
pub fn read_fit_json(path: &Path) -> Result<FitExportFile, AppError> {
    let file = File::open(path).map_err(|e| AppError::Io {
        message: format!("failed to open fit JSON '{}': {e}", path.display()),
    })?;
    let export: FitExportFile = serde_json::from_reader(file).map_err(|e| AppError::Io {
        message: format!("invalid fit JSON '{}': {e}", path.display()),
    })?;
    Ok(export)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FitPolicy, FrequencyWindow, PowerLawFit};

    #[test]
    fn fit_json_round_trips() {
        let export = FitExportFile {
            tool: "qion".to_string(),
            source: "PKS1306-09".to_string(),
            window: FrequencyWindow::new(1e15, 1e17).unwrap(),
            policy: FitPolicy::WindowedFitWithRate,
            n_records: 12,
            fit: Some(PowerLawFit {
                slope: -1.7,
                intercept: 45.25,
                n_points: 5,
            }),
            log10_rate: Some(52.9),
        };

        let path = std::env::temp_dir().join("qion_export_test.json");
        write_fit_json(&path, &export).unwrap();
        let back = read_fit_json(&path).unwrap();
        assert_eq!(back, export);
        let _ = std::fs::remove_file(&path);
    }
}
