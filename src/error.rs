//! Error types for the salary engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate.
//! The calculation core only ever produces [`EngineError::InvalidInput`];
//! the remaining variants belong to loading and resolving the rule schedule,
//! and to writing the finished report.

use thiserror::Error;

/// The main error type for the salary engine.
///
/// # Example
///
/// ```
/// use salary_engine::error::EngineError;
///
/// let error = EngineError::invalid_input("month", "must be between 1 and 12, got 13");
/// assert_eq!(
///     error.to_string(),
///     "Invalid input 'month': must be between 1 and 12, got 13"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// A calculation input was outside its accepted domain.
    #[error("Invalid input '{field}': {reason}")]
    InvalidInput {
        /// The name of the offending field.
        field: String,
        /// A human-readable reason.
        reason: String,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Configuration parsed but violates a structural rule.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// A description of the violation.
        message: String,
    },

    /// No contribution table is effective for the reference month.
    #[error("No contribution table effective for {year}-{month:02}")]
    TableNotFound {
        /// The reference year.
        year: i32,
        /// The reference month.
        month: u32,
    },

    /// A finished result could not be serialized for output.
    #[error("Failed to write report: {message}")]
    ReportError {
        /// A description of the serialization failure.
        message: String,
    },
}

impl EngineError {
    /// Shorthand for building an [`EngineError::InvalidInput`].
    pub fn invalid_input(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Returns true if the error was caused by caller input rather than configuration.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput { .. })
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
