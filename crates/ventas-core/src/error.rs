//! # Error Types
//!
//! Domain-specific error types for ventas-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  ventas-core errors (this file)                                        │
//! │  ├── CoreError        - Sale composition rule violations               │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  ventas-client errors (separate crate)                                 │
//! │  ├── ClientError      - HTTP / backend failures                        │
//! │  └── SubmitError      - Sale submission failures                       │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → SubmitError → CLI message         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every variant renders a message fit to show the user as-is.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Sale composition errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// The customer cannot change once lines have been added.
    ///
    /// ## User Workflow
    /// ```text
    /// select customer 3 → add line → select customer 7
    ///                                      │
    ///                                      ▼
    ///                      CustomerLocked { current: 3, requested: 7 }
    /// ```
    #[error("Customer {current} is locked for this sale; cancel it to pick customer {requested}")]
    CustomerLocked { current: i64, requested: i64 },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised before any state changes, so a failed operation never leaves a
/// partial update behind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (non-numeric quantity, malformed date, etc.).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// A reference that does not resolve to known reference data.
    #[error("{field} '{value}' was not found")]
    UnknownReference { field: String, value: String },

    /// Two fields that must agree do not.
    #[error("{field} does not match {other}")]
    Mismatch { field: String, other: String },
}

impl ValidationError {
    /// Shorthand for [`ValidationError::Required`].
    pub fn required(field: &str) -> Self {
        ValidationError::Required {
            field: field.to_string(),
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
