//! SED table ingest and normalization.
//!
//! This module turns a whitespace-delimited photometry table into a clean,
//! ordered set of `SedRecord`s that are safe to window and fit.
//!
//! Design goals:
//! - **Strict frequencies**: a data row with a non-numeric or non-positive
//!   frequency aborts the run before any fitting happens (exit code 2)
//! - **Lenient bands**: missing or sentinel band cells are absent, not errors
//! - **Deterministic behavior**: input order is preserved, no hidden state
//! - **Separation of concerns**: no windowing or fitting logic here
//!
//! Table format (produced upstream by the catalog cross-matching stage):
//! column 1 is the rest-frame frequency in Hz, columns 2-5 are per-survey
//! luminosity contributions in W/Hz. An optional leading header row provides
//! the band labels used in the plot legend.

use std::path::Path;

use crate::domain::{BAND_COUNT, SedRecord};
use crate::error::AppError;

/// Ingest output: ordered records + display labels + row counts.
#[derive(Debug, Clone)]
pub struct LoadedTable {
    pub records: Vec<SedRecord>,
    /// Legend labels for the four band columns, from the header row when one
    /// is present, otherwise generic placeholders.
    pub band_labels: [String; BAND_COUNT],
    /// Identifying name for this source (input file stem), used to label all
    /// reporting and errors downstream.
    pub source_name: String,
    pub rows_read: usize,
}

/// Load and parse an SED table from disk.
pub fn load_sed_table(path: &Path) -> Result<LoadedTable, AppError> {
    let text = std::fs::read_to_string(path).map_err(|e| AppError::Io {
        message: format!("failed to open SED table '{}': {e}", path.display()),
    })?;

    let source_name = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    parse_sed_table(&text, &source_name)
}

/// Parse an SED table from text.
///
/// Leading rows whose first field does not parse as a number are headers or
/// comments: they are skipped for numeric processing, and the first of them
/// supplies the band labels. Once data rows begin, a non-numeric frequency is
/// a malformed record.
pub fn parse_sed_table(text: &str, source_name: &str) -> Result<LoadedTable, AppError> {
    let mut records = Vec::new();
    let mut band_labels = default_band_labels();
    let mut header_seen = false;
    let mut rows_read = 0usize;

    for (idx, raw_line) in text.lines().enumerate() {
        let line = idx + 1;
        let fields: Vec<&str> = raw_line.split_whitespace().collect();
        if fields.is_empty() {
            continue;
        }
        rows_read += 1;

        let freq_field = fields[0];
        match freq_field.parse::<f64>() {
            Ok(freq) => {
                if !freq.is_finite() || freq <= 0.0 {
                    return Err(AppError::MalformedRecord {
                        line,
                        message: format!(
                            "'{source_name}': frequency must be a positive number (log-space processing), got '{freq_field}'"
                        ),
                    });
                }
                records.push(SedRecord {
                    frequency: freq,
                    bands: parse_bands(&fields[1..]),
                });
            }
            Err(_) if records.is_empty() => {
                // Leading header/comment row. The first one names the bands.
                if !header_seen {
                    header_seen = true;
                    for (slot, label) in band_labels.iter_mut().zip(fields.iter().skip(1)) {
                        *slot = (*label).to_string();
                    }
                }
            }
            Err(_) => {
                return Err(AppError::MalformedRecord {
                    line,
                    message: format!(
                        "'{source_name}': non-numeric frequency field '{freq_field}' in data row"
                    ),
                });
            }
        }
    }

    if records.is_empty() {
        return Err(AppError::EmptyInput {
            path: source_name.to_string(),
        });
    }

    Ok(LoadedTable {
        records,
        band_labels,
        source_name: source_name.to_string(),
        rows_read,
    })
}

fn default_band_labels() -> [String; BAND_COUNT] {
    ["band 1", "band 2", "band 3", "band 4"].map(str::to_string)
}

/// Parse up to four band cells; anything that is not a finite number is absent.
fn parse_bands(fields: &[&str]) -> [Option<f64>; BAND_COUNT] {
    let mut bands = [None; BAND_COUNT];
    for (slot, field) in bands.iter_mut().zip(fields.iter()) {
        *slot = match field.parse::<f64>() {
            Ok(v) if v.is_finite() => Some(v),
            _ => None,
        };
    }
    bands
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_table_in_order() {
        let text = "1.0e14 1e20 2e20 -- 3e19\n2.0e15 4e20\n";
        let table = parse_sed_table(text, "src").unwrap();
        assert_eq!(table.records.len(), 2);
        assert_eq!(table.rows_read, 2);
        assert_eq!(table.records[0].frequency, 1.0e14);
        assert_eq!(table.records[0].bands, [Some(1e20), Some(2e20), None, Some(3e19)]);
        // Trailing bands missing entirely are absent too.
        assert_eq!(table.records[1].bands, [Some(4e20), None, None, None]);
    }

    #[test]
    fn header_row_supplies_band_labels() {
        let text = "freq ned wise twomass galex\n1e15 1e20 1e20 1e20 1e20\n";
        let table = parse_sed_table(text, "src").unwrap();
        assert_eq!(
            table.band_labels,
            ["ned", "wise", "twomass", "galex"].map(str::to_string)
        );
        assert_eq!(table.records.len(), 1);
    }

    #[test]
    fn later_comment_rows_do_not_override_labels() {
        let text = "freq a b c d\n# regenerated 2014-03-02 x y z w\n1e15 1e20 0 0 0\n";
        let table = parse_sed_table(text, "src").unwrap();
        assert_eq!(table.band_labels[0], "a");
    }

    #[test]
    fn missing_header_gets_placeholder_labels() {
        let text = "1e15 1e20\n";
        let table = parse_sed_table(text, "src").unwrap();
        assert_eq!(table.band_labels[0], "band 1");
    }

    #[test]
    fn nonpositive_frequency_is_malformed() {
        let err = parse_sed_table("-1e15 1e20\n", "src").unwrap_err();
        assert!(matches!(err, AppError::MalformedRecord { line: 1, .. }));

        let err = parse_sed_table("0 1e20\n", "src").unwrap_err();
        assert!(matches!(err, AppError::MalformedRecord { .. }));
    }

    #[test]
    fn non_numeric_frequency_after_data_is_malformed() {
        let text = "1e15 1e20\noops 1e20\n";
        let err = parse_sed_table(text, "src").unwrap_err();
        assert!(matches!(err, AppError::MalformedRecord { line: 2, .. }));
    }

    #[test]
    fn header_only_input_is_empty() {
        let err = parse_sed_table("freq a b c d\n\n", "src").unwrap_err();
        assert!(matches!(err, AppError::EmptyInput { .. }));
    }

    #[test]
    fn nan_band_cells_are_absent() {
        let table = parse_sed_table("1e15 nan 1e20 inf 2e20\n", "src").unwrap();
        assert_eq!(table.records[0].bands, [None, Some(1e20), None, Some(2e20)]);
    }
}
