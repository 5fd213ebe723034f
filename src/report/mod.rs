//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the windowing/fitting code stays clean and testable
//! - output changes are localized (important for future snapshot tests)

use crate::domain::{IonisingRate, PowerLawFit, RunConfig};
use crate::io::ingest::LoadedTable;

/// Format the full run summary (dataset stats + window + fit diagnostics).
pub fn format_run_summary(
    table: &LoadedTable,
    config: &RunConfig,
    fit: Option<&PowerLawFit>,
    fit_skipped: Option<&str>,
) -> String {
    let mut out = String::new();

    out.push_str("=== qion - ionising photon rate from SED photometry ===\n");
    out.push_str(&format!("Source: {}\n", table.source_name));
    out.push_str(&format!(
        "Records: {} ({} rows read)\n",
        table.records.len(),
        table.rows_read
    ));
    out.push_str(&format!(
        "Window: [{:.3e}, {:.3e}] Hz\n",
        config.window.lower_cutoff, config.window.upper_cutoff
    ));
    out.push_str(&format!("Policy: {}\n", config.policy.display_name()));

    match (fit, fit_skipped) {
        (Some(fit), _) => {
            out.push_str(&format!(
                "Fit: slope={:.4} intercept={:.4} (n={})\n",
                fit.slope, fit.intercept, fit.n_points
            ));
        }
        (None, Some(reason)) => {
            out.push_str(&format!("Fit: skipped ({reason})\n"));
        }
        (None, None) => {
            out.push_str("Fit: not requested\n");
        }
    }

    out
}

/// Format the labeled scalar rate line.
///
/// Every run reports exactly one of these per source, so batch scripts can
/// attribute each outcome to a name even when a figure fails elsewhere.
pub fn format_rate_line(source_name: &str, rate: Option<&IonisingRate>) -> String {
    match rate {
        Some(IonisingRate {
            log10_rate: Some(v),
        }) => format!("{source_name}: log10 Q(H) = {v:.2} photons/s"),
        Some(IonisingRate { log10_rate: None }) => {
            format!("{source_name}: ionising rate undefined (non-negative slope)")
        }
        None => format!("{source_name}: ionising rate not computed"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::IonisingRate;

    #[test]
    fn rate_line_variants() {
        let defined = IonisingRate {
            log10_rate: Some(52.345),
        };
        assert_eq!(
            format_rate_line("PKS1306-09", Some(&defined)),
            "PKS1306-09: log10 Q(H) = 52.35 photons/s"
        );

        let undefined = IonisingRate { log10_rate: None };
        assert!(format_rate_line("x", Some(&undefined)).contains("undefined"));
        assert!(format_rate_line("x", None).contains("not computed"));
    }
}
