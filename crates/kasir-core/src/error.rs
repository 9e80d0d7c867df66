//! # Error Types
//!
//! Domain-specific error types for kasir-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  kasir-core errors (this file)                                         │
//! │  ├── CoreError        - Domain failures (bad token, bad input)         │
//! │  └── ValidationError  - Form input validation failures                 │
//! │                                                                         │
//! │  kasir-client errors (separate crate)                                  │
//! │  └── ClientError      - Network / status / decode / session failures   │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ClientError → ResourceState::Error│
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Cart operations never fail, so there is no cart error variant.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Bearer token does not have exactly three dot-separated segments.
    #[error("Token must have 3 segments, found {found}")]
    MalformedToken { found: usize },

    /// Token payload segment is not valid base64url.
    #[error("Token payload is not valid base64url: {0}")]
    PayloadEncoding(String),

    /// Token payload is not a JSON object.
    #[error("Token payload is not a JSON object: {0}")]
    PayloadFormat(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised before a request leaves the client so the backend never sees a
/// form that is obviously incomplete.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., invalid email, invalid URL).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
