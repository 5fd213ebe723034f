//! SED figure rendering.

pub mod svg;

pub use svg::*;
