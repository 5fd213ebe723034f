//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - runs the fit pipeline
//! - renders the SED figure
//! - prints the summary and the labeled rate line
//! - writes optional exports

use clap::Parser;

use crate::cli::{Cli, Command, FitArgs, SampleArgs};
use crate::data::{SampleSpec, generate_sample};
use crate::domain::{FrequencyWindow, RunConfig};
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `qion` binary.
pub fn run() -> Result<(), AppError> {
    let cli = Cli::parse();

    match cli.command {
        Command::Fit(args) => handle_fit(args, OutputMode::Full),
        Command::Rate(args) => handle_fit(args, OutputMode::RateOnly),
        Command::Sample(args) => handle_sample(args),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputMode {
    Full,
    RateOnly,
}

fn handle_fit(args: FitArgs, mode: OutputMode) -> Result<(), AppError> {
    let config = run_config_from_args(&args)?;
    let run = pipeline::run_fit(&config)?;

    match mode {
        OutputMode::Full => {
            let skipped = run.fit_error.as_ref().map(|e| e.to_string());
            println!(
                "{}",
                crate::report::format_run_summary(
                    &run.table,
                    &config,
                    run.fit.as_ref(),
                    skipped.as_deref(),
                )
            );
            pipeline::render(&config, &run)?;
            println!("Figure written to {}", config.output.display());
        }
        OutputMode::RateOnly => {
            // Scripting mode has no figure to fall back to: a skipped fit is
            // a hard failure here instead of a degraded render.
            if let Some(e) = &run.fit_error {
                return Err(e.clone());
            }
        }
    }

    println!(
        "{}",
        crate::report::format_rate_line(&run.table.source_name, run.rate.as_ref())
    );

    if let Some(path) = &config.export_fit {
        crate::io::export::write_fit_json(path, &pipeline::export_file(&config, &run))?;
    }

    Ok(())
}

fn handle_sample(args: SampleArgs) -> Result<(), AppError> {
    let spec = SampleSpec {
        n_points: args.points,
        slope: args.slope,
        log10_lum_anchor: args.lum_anchor,
        log_freq_min: args.log_freq_min,
        log_freq_max: args.log_freq_max,
        scatter_dex: args.scatter,
        seed: args.seed,
    };

    let text = generate_sample(&spec)?;
    std::fs::write(&args.output, text).map_err(|e| AppError::Io {
        message: format!(
            "failed to write sample table '{}': {e}",
            args.output.display()
        ),
    })?;

    println!(
        "Wrote {} synthetic records to {}",
        args.points,
        args.output.display()
    );
    Ok(())
}

/// Resolve CLI flags into the pipeline's explicit configuration structure.
pub fn run_config_from_args(args: &FitArgs) -> Result<RunConfig, AppError> {
    let window = FrequencyWindow::new(args.lower_cutoff, args.upper_cutoff)?;

    let title = args.title.clone().unwrap_or_else(|| {
        args.input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| args.input.display().to_string())
    });

    Ok(RunConfig {
        input: args.input.clone(),
        window,
        policy: args.policy,
        output: args.output.clone(),
        title,
        export_fit: args.export_fit.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn args() -> FitArgs {
        FitArgs {
            input: PathBuf::from("tables/PKS1306-09.dat"),
            lower_cutoff: 1e15,
            upper_cutoff: 1e17,
            policy: crate::domain::FitPolicy::WindowedFitWithRate,
            output: PathBuf::from("sed.svg"),
            title: None,
            export_fit: None,
        }
    }

    #[test]
    fn title_defaults_to_input_stem() {
        let config = run_config_from_args(&args()).unwrap();
        assert_eq!(config.title, "PKS1306-09");
    }

    #[test]
    fn explicit_title_wins() {
        let mut a = args();
        a.title = Some("custom".to_string());
        assert_eq!(run_config_from_args(&a).unwrap().title, "custom");
    }

    #[test]
    fn inverted_window_is_rejected_before_loading() {
        let mut a = args();
        a.lower_cutoff = 1e17;
        a.upper_cutoff = 1e15;
        assert!(matches!(
            run_config_from_args(&a),
            Err(AppError::InvalidConfig { .. })
        ));
    }
}
