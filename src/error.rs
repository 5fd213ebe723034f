//! Error taxonomy for the pipeline.
//!
//! Each variant carries enough context to attribute a failure to one named
//! source, so multi-source batch scripts never lose track of which input
//! failed. `exit_code` is consumed by `main.rs`.

#[derive(Debug, Clone)]
pub enum AppError {
    /// File open/create/write failure.
    Io { message: String },
    /// A data row's frequency field is non-numeric or non-positive.
    MalformedRecord { line: usize, message: String },
    /// The input table contains no data rows.
    EmptyInput { path: String },
    /// Invalid run configuration (window, sampler parameters, ...).
    InvalidConfig { message: String },
    /// Fewer than two usable points remain after windowing.
    InsufficientData { needed: usize, got: usize },
    /// The output figure could not be produced.
    Render { source_name: String, message: String },
}

impl AppError {
    pub fn exit_code(&self) -> u8 {
        match self {
            AppError::Io { .. } => 2,
            AppError::MalformedRecord { .. } => 2,
            AppError::InvalidConfig { .. } => 2,
            AppError::EmptyInput { .. } => 3,
            AppError::InsufficientData { .. } => 3,
            AppError::Render { .. } => 4,
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Io { message } => write!(f, "{message}"),
            AppError::MalformedRecord { line, message } => {
                write!(f, "line {line}: {message}")
            }
            AppError::EmptyInput { path } => {
                write!(f, "'{path}' contains no data rows")
            }
            AppError::InvalidConfig { message } => write!(f, "{message}"),
            AppError::InsufficientData { needed, got } => {
                write!(
                    f,
                    "power-law fit needs at least {needed} usable points, got {got}"
                )
            }
            AppError::Render { source_name, message } => {
                write!(f, "failed to render figure for '{source_name}': {message}")
            }
        }
    }
}

impl std::error::Error for AppError {}
