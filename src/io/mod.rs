//! Input/output helpers.
//!
//! - SED table ingest + validation (`ingest`)
//! - fit JSON read/write (`export`)

pub mod export;
pub mod ingest;

pub use export::*;
pub use ingest::*;
