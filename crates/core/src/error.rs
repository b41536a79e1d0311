//! Error types for the plotlines core.

use thiserror::Error;

/// Errors produced by generator operations.
///
/// The taxonomy is deliberately small: generation itself is total (bad
/// parameters degrade to reduced or empty geometry), so errors only arise
/// at the seams — dispatch, export, and file I/O.
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// A requested generator name was not found in the registry.
    #[error("unknown generator: {0}")]
    UnknownGenerator(String),

    /// Canvas width or height was zero when constructing a generator.
    #[error("invalid dimensions: width and height must be non-zero")]
    InvalidDimensions,

    /// Export was requested before the first generation pass filled the
    /// scene cache. Callers should treat this as a diagnostic, not emit
    /// a malformed document.
    #[error("no geometry to export: run a generation pass first")]
    EmptyScene,

    /// A file write failed while exporting.
    #[error("i/o error: {0}")]
    Io(String),
}
