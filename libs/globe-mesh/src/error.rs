//! # Error Types
//!
//! Error types for globe synthesis.
//!
//! ## Error Policy
//!
//! - Invalid configuration is fatal and reported before any geometry work
//! - Per-feature and per-element defects are never errors: they are skipped,
//!   counted in the stage reports and surfaced in the summary
//! - Errors include the offending field for debugging

use thiserror::Error;

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur while synthesizing a globe.
///
/// ## Example
///
/// ```rust
/// use globe_mesh::{GlobeError, GlobeParams};
///
/// let params = GlobeParams { radius: -1.0, ..GlobeParams::default() };
/// match params.validate() {
///     Err(GlobeError::InvalidConfig { field, .. }) => assert_eq!(field, "radius"),
///     other => panic!("expected config error, got {other:?}"),
/// }
/// ```
#[derive(Error, Debug)]
pub enum GlobeError {
    /// A numeric parameter is out of range.
    #[error("Invalid configuration '{field}': {message}")]
    InvalidConfig {
        /// Name of the offending parameter
        field: &'static str,
        /// What is wrong with its value
        message: String,
    },

    /// Params or summary could not be (de)serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl GlobeError {
    /// Creates an invalid configuration error.
    pub fn invalid_config(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field,
            message: message.into(),
        }
    }
}

// =============================================================================
// RESULT TYPE ALIAS
// =============================================================================

/// Result type alias for globe operations.
pub type GlobeResult<T> = Result<T, GlobeError>;

// =============================================================================
// TESTS
// =============================================================================
