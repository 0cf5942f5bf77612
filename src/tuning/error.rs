//! Error types for controller tuning loading.

use thiserror::Error;

/// Errors that can occur when loading controller tuning.
#[derive(Debug, Error)]
pub enum TuningError {
    /// File could not be found.
    #[error("Tuning file not found: {0}")]
    NotFound(String),

    /// File could not be read.
    #[error("Failed to read tuning file '{path}': {details}")]
    Read { path: String, details: String },

    /// RON parsing failed.
    #[error("Parse error in '{path}': {details}")]
    Parse { path: String, details: String },

    /// A value is outside the range the controllers can work with.
    #[error("Invalid tuning value for '{field}': {reason}")]
    Invalid { field: &'static str, reason: String },
}
