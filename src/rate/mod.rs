//! Ionising photon rate from the fitted power-law.
//!
//! With `L_nu = 10^C * nu^alpha` (the log-log fit), the hydrogen-ionising
//! photon rate above a cutoff `nu_low` is
//!
//! ```text
//! Q = integral from nu_low to infinity of L_nu / (h nu) d nu
//!   = -10^C * nu_low^alpha / (alpha * h)      for alpha < 0
//! ```
//!
//! The integral diverges for `alpha >= 0`; in that regime the rate is
//! undefined and no value is fabricated.

use crate::domain::{IonisingRate, PowerLawFit};

/// Planck's constant in J s.
pub const PLANCK_H: f64 = 6.62606957e-34;

/// Evaluate the closed-form rate for a fitted power-law.
///
/// Works entirely in log10 space so the result stays finite across the
/// representable luminosity range:
///
/// ```text
/// log10 Q = C + alpha * log10(nu_low) - log10(-alpha) - log10(h)
/// ```
pub fn estimate_ionising_rate(fit: &PowerLawFit, nu_low: f64) -> IonisingRate {
    if !fit.slope.is_finite() || fit.slope >= 0.0 {
        return IonisingRate { log10_rate: None };
    }

    let log10_rate =
        fit.intercept + fit.slope * nu_low.log10() - (-fit.slope).log10() - PLANCK_H.log10();

    IonisingRate {
        log10_rate: Some(log10_rate),
    }
}
