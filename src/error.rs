//! Error types for the crate.
//!
//! Segment operations are total and never fail. Only building a segment from an
//! invalid configuration is reported as an error.

use thiserror::Error;

/// Main error type for dendrite segment construction.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DendriteError {
    /// A configuration parameter is out of its valid range.
    #[error("Invalid parameter '{name}': {message}")]
    InvalidParameter {
        /// Name of the invalid parameter.
        name: &'static str,
        /// Description of the error.
        message: String,
    },
}

/// Result type alias using `DendriteError`.
pub type Result<T> = std::result::Result<T, DendriteError>;
