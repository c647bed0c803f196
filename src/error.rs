//! Error types for cornice.
//!
//! This module defines all error types used throughout the library.

use thiserror::Error;

/// Result type alias using [`BuildError`].
pub type Result<T> = std::result::Result<T, BuildError>;

/// Errors that can occur while generating building geometry.
#[derive(Error, Debug)]
pub enum BuildError {
    /// The host selection does not satisfy the feature's preconditions.
    #[error("invalid selection: {reason}")]
    InvalidSelection {
        /// Why the selection was rejected.
        reason: &'static str,
    },

    /// An operation would produce zero-area or self-intersecting geometry.
    #[error("degenerate geometry: {details}")]
    DegenerateGeometry {
        /// Description of the degenerate condition.
        details: String,
    },

    /// Invalid parameter value.
    #[error("invalid parameter: {name} = {value} ({reason})")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// The invalid value (as string).
        value: String,
        /// Reason the value is invalid.
        reason: &'static str,
    },

    /// A kernel operation was invoked on an empty vertex/edge/face set.
    #[error("kernel operation `{operation}` received empty input")]
    EmptyInput {
        /// Name of the kernel operation.
        operation: &'static str,
    },

    /// A face could not be re-acquired after a topology-changing operation.
    #[error("face lost during {operation}")]
    FaceLost {
        /// The pipeline step that lost track of the face.
        operation: &'static str,
    },

    /// An element id does not refer to live geometry.
    #[error("stale reference: {0}")]
    StaleReference(String),
}

impl BuildError {
    /// Create an invalid parameter error.
    pub fn invalid_param<T: std::fmt::Display>(
        name: &'static str,
        value: T,
        reason: &'static str,
    ) -> Self {
        BuildError::InvalidParameter {
            name,
            value: value.to_string(),
            reason,
        }
    }

    /// Create a degenerate geometry error.
    pub fn degenerate<S: Into<String>>(details: S) -> Self {
        BuildError::DegenerateGeometry {
            details: details.into(),
        }
    }
}
