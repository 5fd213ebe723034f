//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during fitting
//! - exported to JSON
//! - reloaded later for comparisons across sources

use std::path::PathBuf;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Number of per-survey band columns the table format carries.
pub const BAND_COUNT: usize = 4;

/// Which pipeline variant to run.
///
/// The three historical variants of this tool (raw plot, plain fit, windowed
/// fit with rate estimation) are one parameterized pipeline selected here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum FitPolicy {
    /// Plot the raw per-band points only; no fit, no rate.
    NoFit,
    /// Fit all records regardless of the window; the window is drawn as a
    /// visual reference only. No rate estimation.
    UnwindowedFit,
    /// Drop records outside the window before fitting, then estimate the
    /// ionising photon rate from the fit.
    WindowedFitWithRate,
}

impl FitPolicy {
    /// Human-readable label for terminal output.
    pub fn display_name(self) -> &'static str {
        match self {
            FitPolicy::NoFit => "no fit",
            FitPolicy::UnwindowedFit => "unwindowed fit",
            FitPolicy::WindowedFitWithRate => "windowed fit + rate",
        }
    }

    /// Whether this policy fits a power-law at all.
    pub fn fits(self) -> bool {
        !matches!(self, FitPolicy::NoFit)
    }
}

/// One row of the input table: a rest-frame frequency plus up to four
/// per-survey luminosity contributions.
///
/// Absent bands (missing cells, `--`, non-numeric sentinels) are `None`; they
/// contribute nothing to the total and are skipped in per-band display.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SedRecord {
    /// Rest-frame frequency in Hz (always positive; the loader rejects the rest).
    pub frequency: f64,
    /// Per-survey luminosity contributions in W/Hz.
    pub bands: [Option<f64>; BAND_COUNT],
}

impl SedRecord {
    /// Total luminosity: the sum of present band values.
    ///
    /// A record with all bands absent totals 0.0 and is excluded from fitting
    /// (log undefined), but may still be plotted per-band.
    pub fn total_luminosity(&self) -> f64 {
        self.bands.iter().flatten().sum()
    }
}

/// The ionising-UV frequency band used for windowing and rate integration.
///
/// Immutable per run and supplied by configuration, never derived from data.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrequencyWindow {
    pub lower_cutoff: f64,
    pub upper_cutoff: f64,
}

impl FrequencyWindow {
    pub fn new(lower_cutoff: f64, upper_cutoff: f64) -> Result<Self, AppError> {
        if !(lower_cutoff.is_finite() && lower_cutoff > 0.0) {
            return Err(AppError::InvalidConfig {
                message: format!("lower cutoff must be a positive frequency, got {lower_cutoff}"),
            });
        }
        if !(upper_cutoff.is_finite() && upper_cutoff > lower_cutoff) {
            return Err(AppError::InvalidConfig {
                message: format!(
                    "upper cutoff must exceed the lower cutoff, got [{lower_cutoff}, {upper_cutoff}]"
                ),
            });
        }
        Ok(Self {
            lower_cutoff,
            upper_cutoff,
        })
    }

    /// Strict membership test at both ends.
    ///
    /// Boundary frequencies are excluded: a zero-width log domain edge is
    /// useless to the fitter, and cutoffs must never be double-counted.
    pub fn contains(&self, frequency: f64) -> bool {
        self.lower_cutoff < frequency && frequency < self.upper_cutoff
    }
}

/// A fitted power-law in log10-log10 space:
/// `log10(L_nu) = slope * log10(nu) + intercept`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PowerLawFit {
    pub slope: f64,
    pub intercept: f64,
    /// Number of points that entered the regression.
    pub n_points: usize,
}

/// The derived hydrogen-ionising photon rate.
///
/// `log10_rate` is `None` when the fitted slope is non-negative: the ionising
/// integral diverges in that regime and no value is fabricated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IonisingRate {
    pub log10_rate: Option<f64>,
}

/// A full run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus defaults); the historical template
/// strings are reified into named fields.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub input: PathBuf,
    pub window: FrequencyWindow,
    pub policy: FitPolicy,
    pub output: PathBuf,
    /// Figure title; defaults to the input file stem.
    pub title: String,
    pub export_fit: Option<PathBuf>,
}

/// A saved fit file (JSON): the portable record of one run's outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitExportFile {
    pub tool: String,
    pub source: String,
    pub window: FrequencyWindow,
    pub policy: FitPolicy,
    pub n_records: usize,
    pub fit: Option<PowerLawFit>,
    pub log10_rate: Option<f64>,
}
