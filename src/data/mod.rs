//! Synthetic SED data generation.

pub mod sample;

pub use sample::*;
