//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - input configuration (`RunConfig`, `FitPolicy`, `FrequencyWindow`)
//! - normalized SED observations (`SedRecord`)
//! - fit and rate outputs (`PowerLawFit`, `IonisingRate`)

pub mod types;

pub use types::*;
