//! Core error types for tunesync

use thiserror::Error;

/// Result type alias using `CoreError`
pub type Result<T> = std::result::Result<T, CoreError>;

/// Core error type for tunesync
///
/// Only configuration-time problems surface as errors here. Identity and
/// playlist resolution misses are not errors: they show up as "missing"
/// or skipped songs instead.
#[derive(Error, Debug)]
pub enum CoreError {
    /// A `field:pattern` filter could not be parsed
    #[error("Invalid filter '{filter}': {reason}")]
    InvalidFilter {
        /// The filter text as given by the user
        filter: String,
        /// What was wrong with it
        reason: String,
    },

    /// A path exclusion pattern is not a valid regex
    #[error("Invalid exclude pattern '{pattern}': {reason}")]
    InvalidPattern {
        /// The pattern text as given by the user
        pattern: String,
        /// What was wrong with it
        reason: String,
    },
}

impl CoreError {
    /// Create an invalid filter error
    pub fn invalid_filter(filter: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidFilter {
            filter: filter.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid pattern error
    pub fn invalid_pattern(pattern: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidPattern {
            pattern: pattern.into(),
            reason: reason.into(),
        }
    }
}
