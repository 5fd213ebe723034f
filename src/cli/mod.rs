//! Command-line parsing for the SED ionising-rate estimator.
//!
//! The goal of this module is to keep **argument parsing** and **command
//! dispatch** separate from the windowing/fitting/plotting code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::FitPolicy;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "qion",
    version,
    about = "Ionising photon rate estimation from multi-survey SED photometry"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fit the UV power-law, estimate the ionising rate, and render the SED figure.
    Fit(FitArgs),
    /// Print the labeled rate line only (useful for scripting).
    Rate(FitArgs),
    /// Write a synthetic SED table (for demos and testing the pipeline).
    Sample(SampleArgs),
}

/// Common options for fitting and rate estimation.
#[derive(Debug, Parser, Clone)]
pub struct FitArgs {
    /// Input SED table: whitespace-delimited, frequency (Hz) plus up to four
    /// per-survey luminosity columns (W/Hz), optional header row.
    pub input: PathBuf,

    /// Lower ionising-UV cutoff frequency (Hz).
    #[arg(long, default_value_t = 1e15)]
    pub lower_cutoff: f64,

    /// Upper ionising-UV cutoff frequency (Hz).
    #[arg(long, default_value_t = 1e17)]
    pub upper_cutoff: f64,

    /// Pipeline variant: raw plot, unwindowed fit, or windowed fit with rate.
    #[arg(long, value_enum, default_value_t = FitPolicy::WindowedFitWithRate)]
    pub policy: FitPolicy,

    /// Output figure path (SVG).
    #[arg(short, long, default_value = "sed.svg")]
    pub output: PathBuf,

    /// Figure title (defaults to the input file stem).
    #[arg(long)]
    pub title: Option<String>,

    /// Export the fit + rate to a JSON file.
    #[arg(long = "export-fit")]
    pub export_fit: Option<PathBuf>,
}

/// Options for synthetic table generation.
#[derive(Debug, Parser)]
pub struct SampleArgs {
    /// Output table path.
    pub output: PathBuf,

    /// Number of frequency points.
    #[arg(short = 'n', long, default_value_t = 24)]
    pub points: usize,

    /// Spectral slope in log-log space.
    #[arg(long, default_value_t = -1.5, allow_hyphen_values = true)]
    pub slope: f64,

    /// log10 total luminosity (W/Hz) at 1e15 Hz.
    #[arg(long, default_value_t = 21.0)]
    pub lum_anchor: f64,

    /// Lowest frequency, log10 Hz.
    #[arg(long, default_value_t = 13.0)]
    pub log_freq_min: f64,

    /// Highest frequency, log10 Hz.
    #[arg(long, default_value_t = 18.0)]
    pub log_freq_max: f64,

    /// Log-normal scatter applied to each total (dex).
    #[arg(long, default_value_t = 0.1)]
    pub scatter: f64,

    /// Random seed.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,
}
