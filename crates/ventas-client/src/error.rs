//! # Client Error Types
//!
//! Error types for backend access and sale submission.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Client Error Categories                            │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Configuration  │  │   Transport     │  │     Backend             │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  ConfigError    │  │  Unreachable    │  │  Rejected (non-2xx)     │ │
//! │  │  InvalidUrl     │  │  Timeout        │  │  NotFound               │ │
//! │  │                 │  │                 │  │  Decode                 │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! │                                                                         │
//! │  SubmitError narrows ClientError to what a POST /ventas/ caller        │
//! │  has to handle: Validation | Rejected | Unreachable | InvalidResponse  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;
use ventas_core::ValidationError;

/// Result type alias for backend operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Result type alias for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// Client Error
// =============================================================================

/// Errors from talking to the REST backend.
#[derive(Debug, Error)]
pub enum ClientError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Configuration could not be loaded or is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A request URL could not be built.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    // =========================================================================
    // Transport Errors
    // =========================================================================
    /// The backend could not be reached.
    #[error("Backend unreachable: {0}")]
    Unreachable(String),

    /// The request did not complete in time.
    #[error("Request timed out after {0} seconds")]
    Timeout(u64),

    // =========================================================================
    // Backend Errors
    // =========================================================================
    /// The backend answered with a non-success status.
    #[error("Backend rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// The requested resource does not exist.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// A success response whose body could not be decoded.
    #[error("Unexpected response from backend: {0}")]
    Decode(String),

    // =========================================================================
    // Input Errors
    // =========================================================================
    /// Input was rejected before any request was made.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl ClientError {
    /// Creates a NotFound error for a given entity type and ID.
    pub fn not_found(entity: impl Into<String>, id: impl ToString) -> Self {
        ClientError::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }

    /// Returns true if the request never got an answer from the backend.
    pub fn is_unreachable(&self) -> bool {
        matches!(self, ClientError::Unreachable(_) | ClientError::Timeout(_))
    }

    /// Returns true if the backend refused the credentials.
    pub fn is_unauthorized(&self) -> bool {
        matches!(
            self,
            ClientError::Rejected {
                status: 401 | 403,
                ..
            }
        )
    }
}

impl From<url::ParseError> for ClientError {
    fn from(err: url::ParseError) -> Self {
        ClientError::InvalidUrl(err.to_string())
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Decode(err.to_string())
    }
}

/// `reqwest::Error` carries no timeout length; callers that know the
/// configured timeout map [`reqwest::Error::is_timeout`] themselves.
impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ClientError::Decode(err.to_string())
        } else {
            ClientError::Unreachable(err.to_string())
        }
    }
}

// =============================================================================
// Submit Error
// =============================================================================

/// Reasons a sale submission can fail.
///
/// In every case the in-progress sale is left untouched, so the user can
/// fix the problem and submit again.
#[derive(Debug, Error)]
pub enum SubmitError {
    /// The sale is incomplete (no customer, no lines).
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The backend answered with a non-success status.
    #[error("Sale rejected by backend ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// The backend could not be reached or did not answer in time.
    #[error("Could not reach backend: {0}")]
    Unreachable(String),

    /// The backend accepted the request but its answer could not be read.
    #[error("Backend returned an unreadable response: {0}")]
    InvalidResponse(String),
}

impl SubmitError {
    /// Returns true if submitting again unchanged could succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, SubmitError::Unreachable(_))
    }
}

impl From<ClientError> for SubmitError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Rejected { status, message } => SubmitError::Rejected { status, message },
            ClientError::NotFound { entity, id } => SubmitError::Rejected {
                status: 404,
                message: format!("{} not found: {}", entity, id),
            },
            ClientError::Unreachable(msg) => SubmitError::Unreachable(msg),
            err @ ClientError::Timeout(_) => SubmitError::Unreachable(err.to_string()),
            ClientError::Decode(msg) => SubmitError::InvalidResponse(msg),
            ClientError::Validation(err) => SubmitError::Validation(err),
            err @ (ClientError::Config(_) | ClientError::InvalidUrl(_)) => {
                SubmitError::Unreachable(err.to_string())
            }
        }
    }
}

// =============================================================================
// Config Error
// =============================================================================

/// Errors loading or validating [`ClientConfig`](crate::config::ClientConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("Failed to read config {path}: {reason}")]
    Read { path: String, reason: String },

    /// The config file is not valid TOML for this schema.
    #[error("Failed to parse config {path}: {reason}")]
    Parse { path: String, reason: String },

    /// A setting has an unusable value.
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_maps_to_submit_rejected() {
        let err: SubmitError = ClientError::Rejected {
            status: 400,
            message: "cliente: This field is required.".to_string(),
        }
        .into();

        match err {
            SubmitError::Rejected { status, message } => {
                assert_eq!(status, 400);
                assert!(message.contains("cliente"));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_transport_failures_are_unreachable() {
        let timeout: SubmitError = ClientError::Timeout(30).into();
        assert!(matches!(timeout, SubmitError::Unreachable(_)));
        assert!(timeout.is_retryable());

        let refused: SubmitError = ClientError::Unreachable("connection refused".into()).into();
        assert!(refused.is_retryable());
    }

    #[test]
    fn test_decode_maps_to_invalid_response() {
        let err: SubmitError = ClientError::Decode("missing field `id`".into()).into();
        assert!(matches!(err, SubmitError::InvalidResponse(_)));
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_error_categories() {
        assert!(ClientError::Timeout(5).is_unreachable());
        assert!(!ClientError::not_found("Product", 7).is_unreachable());
        assert!(ClientError::Rejected {
            status: 401,
            message: String::new()
        }
        .is_unauthorized());
        assert_eq!(ClientError::not_found("Product", 7).to_string(), "Product not found: 7");
    }
}
