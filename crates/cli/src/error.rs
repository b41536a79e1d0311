//! Structured CLI errors with meaningful exit codes.
//!
//! Exit code scheme:
//! - 0:  success
//! - 2:  clap arg parse error (automatic, before our code runs)
//! - 10: generator error (unknown generator, bad dimensions, empty scene)
//! - 11: I/O error (file write)
//! - 12: input error (bad JSON params)
//! - 13: serialization error
//!
//! I/O failures already arrive wrapped in [`GeneratorError::Io`], so there
//! is no separate I/O variant here; the exit-code mapping distinguishes
//! them inside `Generator`.

use plotlines_core::GeneratorError;
use std::fmt;

/// Errors produced by CLI operations, each mapped to a distinct exit code.
pub enum CliError {
    /// Anything the generator stack reports, file I/O included.
    Generator(GeneratorError),
    /// A user input error (bad JSON params).
    Input(String),
    /// A serialization error (JSON output failure).
    Serialization(String),
}

impl CliError {
    /// Returns the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Generator(GeneratorError::Io(_)) => 11,
            CliError::Generator(_) => 10,
            CliError::Input(_) => 12,
            CliError::Serialization(_) => 13,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Generator(e) => write!(f, "{e}"),
            CliError::Input(msg) => write!(f, "{msg}"),
            CliError::Serialization(msg) => write!(f, "{msg}"),
        }
    }
}

impl From<GeneratorError> for CliError {
    fn from(e: GeneratorError) -> Self {
        CliError::Generator(e)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Serialization(e.to_string())
    }
}
