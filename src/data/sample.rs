//! Synthetic SED table generation.
//!
//! Produces a whitespace-delimited table in the exact format the loader
//! consumes: header row with band labels, then one row per frequency with up
//! to four per-survey luminosity cells (`--` where a survey does not cover
//! that frequency).
//!
//! The generated SED follows `log10 L = slope * log10 nu + intercept` with
//! seeded log-normal scatter, so a noise-free sample reproduces its generating
//! slope exactly through the fitter. Deterministic for a given seed.

use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;

use crate::domain::BAND_COUNT;
use crate::error::AppError;

/// Anchor frequency for the luminosity normalisation parameter.
const ANCHOR_LOG_FREQ: f64 = 15.0;

/// Placeholder for cells outside a survey's coverage.
const ABSENT_CELL: &str = "--";

/// Survey coverage windows in log10 Hz. The first band is the catalog
/// aggregate and covers everything; the rest mimic real survey bandpasses.
const BAND_COVERAGE: [(&str, f64, f64); BAND_COUNT] = [
    ("ned", f64::NEG_INFINITY, f64::INFINITY),
    ("wise", 13.0, 14.2),
    ("twomass", 14.1, 14.5),
    ("galex", 15.0, 15.4),
];

/// Relative share of the total luminosity per band, renormalised over the
/// bands that cover a given frequency.
const BAND_WEIGHTS: [f64; BAND_COUNT] = [0.4, 0.25, 0.2, 0.15];

/// Parameters for one synthetic table.
#[derive(Debug, Clone)]
pub struct SampleSpec {
    pub n_points: usize,
    /// Spectral slope in log-log space (negative for ionising sources).
    pub slope: f64,
    /// log10 total luminosity (W/Hz) at 1e15 Hz.
    pub log10_lum_anchor: f64,
    /// Frequency range in log10 Hz.
    pub log_freq_min: f64,
    pub log_freq_max: f64,
    /// Log-normal scatter applied to each total, in dex.
    pub scatter_dex: f64,
    pub seed: u64,
}

/// Generate a synthetic SED table as text.
pub fn generate_sample(spec: &SampleSpec) -> Result<String, AppError> {
    if spec.n_points < 2 {
        return Err(AppError::InvalidConfig {
            message: format!("sample needs at least 2 points, got {}", spec.n_points),
        });
    }
    if !(spec.log_freq_min.is_finite()
        && spec.log_freq_max.is_finite()
        && spec.log_freq_max > spec.log_freq_min)
    {
        return Err(AppError::InvalidConfig {
            message: format!(
                "invalid sample frequency range [{}, {}] (log10 Hz)",
                spec.log_freq_min, spec.log_freq_max
            ),
        });
    }
    if !spec.slope.is_finite() || !spec.log10_lum_anchor.is_finite() {
        return Err(AppError::InvalidConfig {
            message: "sample slope and luminosity anchor must be finite".to_string(),
        });
    }
    if !(spec.scatter_dex.is_finite() && spec.scatter_dex >= 0.0) {
        return Err(AppError::InvalidConfig {
            message: format!("sample scatter must be non-negative, got {}", spec.scatter_dex),
        });
    }

    let mut rng = StdRng::seed_from_u64(spec.seed);
    let noise = Normal::new(0.0, spec.scatter_dex).map_err(|e| AppError::InvalidConfig {
        message: format!("sample scatter distribution error: {e}"),
    })?;

    let intercept = spec.log10_lum_anchor - spec.slope * ANCHOR_LOG_FREQ;

    let mut out = String::new();
    out.push_str("freq");
    for (label, _, _) in BAND_COVERAGE {
        out.push(' ');
        out.push_str(label);
    }
    out.push('\n');

    for i in 0..spec.n_points {
        let u = i as f64 / (spec.n_points as f64 - 1.0);
        let log_freq = spec.log_freq_min + u * (spec.log_freq_max - spec.log_freq_min);
        let freq = 10f64.powf(log_freq);

        let total = 10f64.powf(spec.slope * log_freq + intercept + noise.sample(&mut rng));
        let shares = band_shares(log_freq);

        out.push_str(&format!("{freq:.6e}"));
        for share in shares {
            match share {
                Some(s) => out.push_str(&format!(" {:.6e}", total * s)),
                None => {
                    out.push(' ');
                    out.push_str(ABSENT_CELL);
                }
            }
        }
        out.push('\n');
    }

    Ok(out)
}

/// Per-band luminosity shares at a frequency: `None` outside coverage,
/// otherwise weights renormalised over the covering bands.
fn band_shares(log_freq: f64) -> [Option<f64>; BAND_COUNT] {
    let mut shares = [None; BAND_COUNT];
    let mut weight_sum = 0.0;
    for (i, (_, lo, hi)) in BAND_COVERAGE.iter().enumerate() {
        if *lo <= log_freq && log_freq <= *hi {
            shares[i] = Some(BAND_WEIGHTS[i]);
            weight_sum += BAND_WEIGHTS[i];
        }
    }
    for share in shares.iter_mut().flatten() {
        *share /= weight_sum;
    }
    shares
}
