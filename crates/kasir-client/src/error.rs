//! # Client Error Types
//!
//! Error types for everything that talks to the backend or the disk.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Client Error Categories                           │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │   Transport     │  │   Response      │  │     Session             │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  Network        │  │  Status         │  │  TokenMissing           │ │
//! │  │                 │  │  EmptyResponse  │  │  TokenExpired           │ │
//! │  │                 │  │  Decode         │  │  Storage                │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐                              │
//! │  │  Configuration  │  │     Domain      │                              │
//! │  │                 │  │                 │                              │
//! │  │  InvalidConfig  │  │  Core           │                              │
//! │  │  InvalidUrl     │  │  (validation,   │                              │
//! │  │  ConfigLoad/Save│  │   bad token)    │                              │
//! │  └─────────────────┘  └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! View states turn every variant into `ResourceState::Error` using the
//! `Display` text as the message.

use kasir_core::{CoreError, ValidationError};
use thiserror::Error;

/// Result type alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Every failure the client can report.
#[derive(Debug, Error)]
pub enum ClientError {
    // =========================================================================
    // Transport Errors
    // =========================================================================
    /// Request could not be sent or the response could not be read.
    #[error("Network error: {0}")]
    Network(String),

    // =========================================================================
    // Response Errors
    // =========================================================================
    /// 2xx response without a usable body.
    #[error("Response body is empty")]
    EmptyResponseBody,

    /// Non-2xx response. `message` is what the cashier sees.
    #[error("{message}")]
    Status { status: u16, message: String },

    /// Body was not the JSON we expected.
    #[error("Failed to decode response: {0}")]
    Decode(String),

    // =========================================================================
    // Session Errors
    // =========================================================================
    /// No token stored.
    #[error("Not signed in")]
    TokenMissing,

    /// Stored token has expired or could not be read. It has been cleared.
    #[error("Session expired, please sign in again")]
    TokenExpired,

    /// Session file could not be read or written.
    #[error("Session storage error: {0}")]
    Storage(String),

    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Invalid client configuration.
    #[error("Invalid client configuration: {0}")]
    InvalidConfig(String),

    /// Invalid backend URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Failed to load config file.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    /// Failed to save config file.
    #[error("Failed to save config: {0}")]
    ConfigSaveFailed(String),

    // =========================================================================
    // Domain Errors
    // =========================================================================
    /// Rejected by kasir-core (validation, malformed token).
    #[error(transparent)]
    Core(#[from] CoreError),
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<ValidationError> for ClientError {
    fn from(err: ValidationError) -> Self {
        ClientError::Core(CoreError::Validation(err))
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ClientError::Decode(err.to_string())
        } else {
            ClientError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Decode(err.to_string())
    }
}

impl From<url::ParseError> for ClientError {
    fn from(err: url::ParseError) -> Self {
        ClientError::InvalidUrl(err.to_string())
    }
}

impl From<std::io::Error> for ClientError {
    fn from(err: std::io::Error) -> Self {
        ClientError::Storage(err.to_string())
    }
}

impl From<toml::de::Error> for ClientError {
    fn from(err: toml::de::Error) -> Self {
        ClientError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for ClientError {
    fn from(err: toml::ser::Error) -> Self {
        ClientError::ConfigSaveFailed(err.to_string())
    }
}

// =============================================================================
// Error Categorization
// =============================================================================

impl ClientError {
    /// True when the cashier has to sign in (again).
    pub fn requires_login(&self) -> bool {
        matches!(
            self,
            ClientError::TokenMissing
                | ClientError::TokenExpired
                | ClientError::Status { status: 401, .. }
        )
    }

    /// True for failures worth retrying as-is.
    pub fn is_retryable(&self) -> bool {
        match self {
            ClientError::Network(_) => true,
            ClientError::Status { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// True if this error indicates a configuration problem.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            ClientError::InvalidConfig(_)
                | ClientError::InvalidUrl(_)
                | ClientError::ConfigLoadFailed(_)
                | ClientError::ConfigSaveFailed(_)
        )
    }
}
