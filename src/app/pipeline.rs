//! Shared fit pipeline: Loader -> Filter -> Fitter -> Estimator -> Renderer.
//!
//! Keeping this in one place means the `fit` and `rate` front-ends cannot
//! drift apart, and the whole flow is testable on in-memory tables without
//! touching the filesystem.

use crate::domain::{FitExportFile, FitPolicy, IonisingRate, PowerLawFit, RunConfig};
use crate::error::AppError;
use crate::fit::{fit_power_law, select_fit_records};
use crate::io::ingest::{LoadedTable, load_sed_table};
use crate::plot::{SedChart, render_sed_svg};
use crate::rate::estimate_ionising_rate;

/// All computed outputs of a single run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub table: LoadedTable,
    /// `None` when the policy skips fitting or too few points remained.
    pub fit: Option<PowerLawFit>,
    /// Frequency sub-range the fit used, for curve evaluation.
    pub fit_domain: Option<(f64, f64)>,
    /// Rate result; only the windowed-rate policy computes one. The inner
    /// value is still `None` for non-negative slopes.
    pub rate: Option<IonisingRate>,
    /// Why the fit was skipped, when it was.
    pub fit_error: Option<AppError>,
}

/// Load the input table and execute the pipeline.
pub fn run_fit(config: &RunConfig) -> Result<RunOutput, AppError> {
    let table = load_sed_table(&config.input)?;
    run_fit_with_table(config, table)
}

/// Execute the pipeline on an already-loaded table.
///
/// Loader errors abort before any fitting; an insufficient-data fit does NOT
/// abort — the run degrades to a raw-points-only figure with no rate.
pub fn run_fit_with_table(config: &RunConfig, table: LoadedTable) -> Result<RunOutput, AppError> {
    let mut fit = None;
    let mut fit_domain = None;
    let mut rate = None;
    let mut fit_error = None;

    if config.policy.fits() {
        let selected = select_fit_records(&table.records, &config.window, config.policy);
        match fit_power_law(&selected) {
            Ok(f) => {
                fit_domain = Some(match config.policy {
                    FitPolicy::WindowedFitWithRate => {
                        (config.window.lower_cutoff, config.window.upper_cutoff)
                    }
                    // Unwindowed fits used every point, so the curve spans the
                    // full plotted domain.
                    _ => crate::plot::FREQ_RANGE,
                });
                if config.policy == FitPolicy::WindowedFitWithRate {
                    rate = Some(estimate_ionising_rate(&f, config.window.lower_cutoff));
                }
                fit = Some(f);
            }
            Err(e) => fit_error = Some(e),
        }
    }

    Ok(RunOutput {
        table,
        fit,
        fit_domain,
        rate,
        fit_error,
    })
}

/// Render the SED figure for a completed run.
pub fn render(config: &RunConfig, run: &RunOutput) -> Result<(), AppError> {
    let chart = SedChart {
        records: &run.table.records,
        band_labels: &run.table.band_labels,
        window: config.window,
        fit: run.fit,
        fit_domain: run.fit_domain,
        log10_rate: run.rate.and_then(|r| r.log10_rate),
        title: &config.title,
        source_name: &run.table.source_name,
    };
    render_sed_svg(&chart, &config.output)
}

/// Assemble the portable export record for a completed run.
pub fn export_file(config: &RunConfig, run: &RunOutput) -> FitExportFile {
    FitExportFile {
        tool: "qion".to_string(),
        source: run.table.source_name.clone(),
        window: config.window,
        policy: config.policy,
        n_records: run.table.records.len(),
        fit: run.fit,
        log10_rate: run.rate.and_then(|r| r.log10_rate),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FrequencyWindow;
    use crate::io::ingest::parse_sed_table;
    use std::path::PathBuf;

    fn config(policy: FitPolicy) -> RunConfig {
        RunConfig {
            input: PathBuf::from("unused"),
            window: FrequencyWindow::new(1e15, 1e17).unwrap(),
            policy,
            output: PathBuf::from("unused.svg"),
            title: "test".to_string(),
            export_fit: None,
        }
    }

    #[test]
    fn windowed_run_produces_fit_and_finite_rate() {
        // Two in-window points on a falling power-law.
        let text = format!(
            "1e16 1e20 0 0 0\n{:.6e} 3.16e19 0 0 0\n",
            10f64.powf(16.5)
        );
        let table = parse_sed_table(&text, "two-points").unwrap();

        let run = run_fit_with_table(&config(FitPolicy::WindowedFitWithRate), table).unwrap();
        let fit = run.fit.expect("fit expected");
        assert_eq!(fit.n_points, 2);
        assert!(fit.slope < 0.0);
        assert_eq!(run.fit_domain, Some((1e15, 1e17)));

        let rate = run.rate.expect("rate expected");
        assert!(rate.log10_rate.expect("finite rate").is_finite());
    }

    #[test]
    fn all_points_outside_window_degrades_to_raw_render() {
        let text = "1e10 1e22 0 0 0\n1e12 1e21 0 0 0\n1e13 5e20 0 0 0\n";
        let table = parse_sed_table(text, "out-of-window").unwrap();

        let run = run_fit_with_table(&config(FitPolicy::WindowedFitWithRate), table).unwrap();
        assert!(run.fit.is_none());
        assert!(run.rate.is_none());
        assert!(matches!(
            run.fit_error,
            Some(AppError::InsufficientData { got: 0, .. })
        ));
        // Raw records are still available for the renderer.
        assert_eq!(run.table.records.len(), 3);
    }

    #[test]
    fn unwindowed_policy_fits_everything_without_rate() {
        let text = "1e10 1e22 0 0 0\n1e12 1e21 0 0 0\n1e16 1e19 0 0 0\n";
        let table = parse_sed_table(text, "legacy").unwrap();

        let run = run_fit_with_table(&config(FitPolicy::UnwindowedFit), table).unwrap();
        let fit = run.fit.expect("fit expected");
        assert_eq!(fit.n_points, 3);
        assert!(run.rate.is_none());
        assert_eq!(run.fit_domain, Some(crate::plot::FREQ_RANGE));
    }

    #[test]
    fn no_fit_policy_skips_fitting_entirely() {
        let table = parse_sed_table("1e16 1e20 0 0 0\n1e17 1e19 0 0 0\n", "raw").unwrap();
        let run = run_fit_with_table(&config(FitPolicy::NoFit), table).unwrap();
        assert!(run.fit.is_none());
        assert!(run.rate.is_none());
        assert!(run.fit_error.is_none());
    }

    #[test]
    fn rising_spectrum_reports_undefined_rate() {
        let text = "1e16 1e19 0 0 0\n3e16 1e20 0 0 0\n";
        let table = parse_sed_table(text, "rising").unwrap();

        let run = run_fit_with_table(&config(FitPolicy::WindowedFitWithRate), table).unwrap();
        let fit = run.fit.expect("fit expected");
        assert!(fit.slope > 0.0);
        assert_eq!(run.rate, Some(IonisingRate { log10_rate: None }));
    }

    #[test]
    fn boundary_records_never_enter_the_windowed_fit() {
        let text = "1e15 1e21 0 0 0\n1e16 1e20 0 0 0\n2e16 5e19 0 0 0\n1e17 1e19 0 0 0\n";
        let table = parse_sed_table(text, "boundaries").unwrap();

        let run = run_fit_with_table(&config(FitPolicy::WindowedFitWithRate), table).unwrap();
        assert_eq!(run.fit.expect("fit expected").n_points, 2);
    }
}
