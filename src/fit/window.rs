//! Frequency-window selection of fit records.
//!
//! The window itself (`FrequencyWindow`) lives in `domain`; this module
//! applies it according to the active policy:
//!
//! - `WindowedFitWithRate` *hard-excludes* records outside the window before
//!   fitting (the rate-estimation pipeline)
//! - `UnwindowedFit` fits everything; the window is only drawn for reference
//! - `NoFit` selects nothing (nothing is fitted)

use crate::domain::{FitPolicy, FrequencyWindow, SedRecord};

/// Records the active policy admits into the fit, in input order.
pub fn select_fit_records(
    records: &[SedRecord],
    window: &FrequencyWindow,
    policy: FitPolicy,
) -> Vec<SedRecord> {
    match policy {
        FitPolicy::NoFit => Vec::new(),
        FitPolicy::UnwindowedFit => records.to_vec(),
        FitPolicy::WindowedFitWithRate => records
            .iter()
            .filter(|r| window.contains(r.frequency))
            .copied()
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(frequency: f64) -> SedRecord {
        SedRecord {
            frequency,
            bands: [Some(1e20), None, None, None],
        }
    }

    fn window() -> FrequencyWindow {
        FrequencyWindow::new(1e15, 1e17).unwrap()
    }

    #[test]
    fn hard_exclude_drops_outside_and_boundary_records() {
        let records = vec![rec(1e14), rec(1e15), rec(1e16), rec(1e17), rec(1e18)];
        let selected = select_fit_records(&records, &window(), FitPolicy::WindowedFitWithRate);
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].frequency, 1e16);
    }

    #[test]
    fn unwindowed_keeps_everything() {
        let records = vec![rec(1e10), rec(1e16), rec(1e18)];
        let selected = select_fit_records(&records, &window(), FitPolicy::UnwindowedFit);
        assert_eq!(selected.len(), 3);
    }

    #[test]
    fn no_fit_selects_nothing() {
        let records = vec![rec(1e16)];
        assert!(select_fit_records(&records, &window(), FitPolicy::NoFit).is_empty());
    }

    #[test]
    fn hard_exclude_is_subset_of_unwindowed() {
        let records: Vec<SedRecord> = (8..19).map(|d| rec(10f64.powi(d))).collect();
        let w = window();
        let hard = select_fit_records(&records, &w, FitPolicy::WindowedFitWithRate);
        let all = select_fit_records(&records, &w, FitPolicy::UnwindowedFit);
        assert!(hard.iter().all(|r| all.contains(r)));
        assert!(hard.len() < all.len());
    }
}
