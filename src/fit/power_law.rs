//! Log-log power-law regression over the selected records.
//!
//! Each record maps to `(x, y) = (log10(frequency), log10(total luminosity))`;
//! records whose total luminosity is not positive carry no information in log
//! space and are excluded. The regression itself is plain OLS on a two-column
//! design matrix, solved in `math::ols`.

use nalgebra::{DMatrix, DVector};

use crate::domain::{PowerLawFit, SedRecord};
use crate::error::AppError;
use crate::math::solve_least_squares;

/// Minimum number of usable points for a line fit.
const MIN_FIT_POINTS: usize = 2;

/// Fit `log10(L) = slope * log10(nu) + intercept` over the given records.
///
/// Fails with `InsufficientData` when fewer than two records survive the
/// positive-total requirement.
pub fn fit_power_law(records: &[SedRecord]) -> Result<PowerLawFit, AppError> {
    let points = log_log_points(records);
    if points.len() < MIN_FIT_POINTS {
        return Err(AppError::InsufficientData {
            needed: MIN_FIT_POINTS,
            got: points.len(),
        });
    }

    let n = points.len();
    let x = DMatrix::from_fn(n, 2, |i, j| if j == 0 { 1.0 } else { points[i].0 });
    let y = DVector::from_iterator(n, points.iter().map(|&(_, v)| v));

    // The design matrix is finite by construction, so the SVD solve only
    // fails on fully degenerate inputs; those carry no usable fit either.
    let beta = solve_least_squares(&x, &y).ok_or(AppError::InsufficientData {
        needed: MIN_FIT_POINTS,
        got: points.len(),
    })?;

    Ok(PowerLawFit {
        intercept: beta[0],
        slope: beta[1],
        n_points: n,
    })
}

/// The `(log10 nu, log10 L)` pairs that enter the regression.
fn log_log_points(records: &[SedRecord]) -> Vec<(f64, f64)> {
    records
        .iter()
        .filter_map(|r| {
            let total = r.total_luminosity();
            if total > 0.0 {
                Some((r.frequency.log10(), total.log10()))
            } else {
                None
            }
        })
        .collect()
}

/// Evaluate the fitted power-law at a frequency: `10^(slope * log10(nu) + intercept)`.
pub fn evaluate(fit: &PowerLawFit, frequency: f64) -> f64 {
    10f64.powf(fit.slope * frequency.log10() + fit.intercept)
}

/// Sample the fitted curve over an explicit frequency sub-range.
///
/// The sub-range is the domain actually used in the fit (the hard-exclude
/// window, or the full plotted domain for unwindowed fits); out-of-range
/// suppression is a domain restriction here, never a sentinel value.
pub fn sample_curve(fit: &PowerLawFit, lo: f64, hi: f64, n: usize) -> Vec<(f64, f64)> {
    let n = n.max(2);
    let (log_lo, log_hi) = (lo.log10(), hi.log10());

    (0..n)
        .map(|i| {
            let u = i as f64 / (n as f64 - 1.0);
            let freq = 10f64.powf(log_lo + u * (log_hi - log_lo));
            (freq, evaluate(fit, freq))
        })
        .collect()
}
