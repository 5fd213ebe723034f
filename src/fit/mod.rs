//! Power-law fitting.
//!
//! Responsibilities:
//!
//! - select the records a policy allows into the fit (`window`)
//! - log-log least-squares regression (`power_law`)

pub mod power_law;
pub mod window;

pub use power_law::*;
pub use window::*;
