//! Plotters-powered SED figure, written as a static SVG.
//!
//! Why Plotters' SVG backend?
//! - vector output scales cleanly in papers/notebooks
//! - no native font/raster dependencies
//! - log-log axes and legends come for free
//!
//! The chart is intentionally data-driven: all series, the fit sub-range, and
//! the annotation are computed by the pipeline before the render call. This
//! keeps `render_sed_svg` focused on drawing and makes the data prep testable
//! without producing files.

use std::path::Path;

use plotters::prelude::*;

use crate::domain::{BAND_COUNT, FrequencyWindow, PowerLawFit, SedRecord};
use crate::error::AppError;
use crate::fit::sample_curve;

/// Fixed frequency axis span in Hz.
pub const FREQ_RANGE: (f64, f64) = (1e7, 1e18);
/// Fixed luminosity axis span in W/Hz.
pub const LUM_RANGE: (f64, f64) = (1e15, 1e30);

/// Output size in pixels.
const FIGURE_SIZE: (u32, u32) = (1280, 960);

/// Samples along the fitted curve.
const CURVE_SAMPLES: usize = 256;

/// A render-only description of one source's SED figure.
pub struct SedChart<'a> {
    /// All loaded records, unfiltered (raw points are always shown).
    pub records: &'a [SedRecord],
    /// Legend labels for the band columns.
    pub band_labels: &'a [String; BAND_COUNT],
    /// Cutoff markers.
    pub window: FrequencyWindow,
    /// Fitted power-law, if one was produced.
    pub fit: Option<PowerLawFit>,
    /// Frequency sub-range the fit actually used; the curve is evaluated over
    /// this range only (explicit domain restriction, no sentinel values).
    pub fit_domain: Option<(f64, f64)>,
    /// Derived rate annotation (log10, photons per second).
    pub log10_rate: Option<f64>,
    pub title: &'a str,
    /// Source identity used to label render failures.
    pub source_name: &'a str,
}

/// High-contrast per-band palette.
const BAND_COLORS: [RGBColor; BAND_COUNT] = [
    RGBColor(214, 69, 65),   // red
    RGBColor(31, 119, 180),  // blue
    RGBColor(44, 160, 44),   // green
    RGBColor(148, 103, 189), // purple
];

const FIT_COLOR: RGBColor = RGBColor(20, 20, 20);
const CUTOFF_COLOR: RGBColor = RGBColor(120, 120, 120);

/// Render the figure to `path`. Any drawing failure is fatal to the run.
pub fn render_sed_svg(chart: &SedChart<'_>, path: &Path) -> Result<(), AppError> {
    let err = |e: &dyn std::fmt::Display| AppError::Render {
        source_name: chart.source_name.to_string(),
        message: e.to_string(),
    };

    let root = SVGBackend::new(path, FIGURE_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(|e| err(&e))?;

    let mut cc = ChartBuilder::on(&root)
        .caption(chart.title, ("sans-serif", 32))
        .margin(12)
        .x_label_area_size(55)
        .y_label_area_size(75)
        .build_cartesian_2d(
            (FREQ_RANGE.0..FREQ_RANGE.1).log_scale(),
            (LUM_RANGE.0..LUM_RANGE.1).log_scale(),
        )
        .map_err(|e| err(&e))?;

    cc.configure_mesh()
        .x_desc("rest-frame frequency (Hz)")
        .y_desc("luminosity (W/Hz)")
        .x_label_formatter(&|v| format!("1e{:.0}", v.log10()))
        .y_label_formatter(&|v| format!("1e{:.0}", v.log10()))
        .light_line_style(RGBColor(235, 235, 235))
        .draw()
        .map_err(|e| err(&e))?;

    // 1) One point+line series per band column. Only positive values are
    //    representable on the log axis.
    for band in 0..BAND_COUNT {
        let series = band_series(chart.records, band);
        if series.is_empty() {
            continue;
        }
        let color = BAND_COLORS[band];

        cc.draw_series(LineSeries::new(series.iter().copied(), color.mix(0.4)))
            .map_err(|e| err(&e))?;
        cc.draw_series(
            series
                .iter()
                .map(|&(x, y)| Circle::new((x, y), 4, color.filled())),
        )
        .map_err(|e| err(&e))?
        .label(chart.band_labels[band].as_str())
        .legend(move |(x, y)| Circle::new((x + 6, y), 4, color.filled()));
    }

    // 2) Dashed cutoff markers spanning the full luminosity axis.
    for cutoff in [chart.window.lower_cutoff, chart.window.upper_cutoff] {
        cc.draw_series(DashedLineSeries::new(
            [(cutoff, LUM_RANGE.0), (cutoff, LUM_RANGE.1)],
            8,
            6,
            CUTOFF_COLOR.stroke_width(1),
        ))
        .map_err(|e| err(&e))?;
    }

    // 3) Fitted power-law, restricted to the sub-range the fit used.
    if let (Some(fit), Some((lo, hi))) = (chart.fit, chart.fit_domain) {
        let curve = sample_curve(&fit, lo, hi, CURVE_SAMPLES);
        cc.draw_series(LineSeries::new(curve, FIT_COLOR.stroke_width(2)))
            .map_err(|e| err(&e))?
            .label(format!("power-law fit (slope {:.2})", fit.slope))
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 12, y)], FIT_COLOR.stroke_width(2)));
    }

    // 4) Rate annotation, omitted entirely when undefined.
    if let Some(log10_rate) = chart.log10_rate {
        root.draw(&Text::new(
            format!("log10 Q(H) = {log10_rate:.1} photons/s"),
            (90, 70),
            ("sans-serif", 24).into_font().color(&FIT_COLOR),
        ))
        .map_err(|e| err(&e))?;
    }

    cc.configure_series_labels()
        .position(SeriesLabelPosition::LowerLeft)
        .background_style(WHITE.mix(0.85))
        .border_style(RGBColor(180, 180, 180))
        .draw()
        .map_err(|e| err(&e))?;

    root.present().map_err(|e| err(&e))?;
    Ok(())
}

/// The plottable `(frequency, luminosity)` points of one band column.
fn band_series(records: &[SedRecord], band: usize) -> Vec<(f64, f64)> {
    records
        .iter()
        .filter_map(|r| match r.bands[band] {
            Some(v) if v > 0.0 => Some((r.frequency, v)),
            _ => None,
        })
        .collect()
}
