//! # Validation Module
//!
//! Input validation for the sale flow and the login/register forms.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: CLI arguments (clap)                                         │
//! │  └── Shape of the command line                                         │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Quantity / reference parsing from user text                       │
//! │  └── Required fields before any request is made                        │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Backend                                                      │
//! │  └── Model constraints, surfaced as SubmitError::Rejected              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use ventas_core::validation::{parse_quantity, parse_reference};
//!
//! assert_eq!(parse_quantity(" 3 ").unwrap(), 3);
//! assert!(parse_quantity("0").is_err());
//! assert_eq!(parse_reference("product", "12").unwrap(), 12);
//! ```

use chrono::NaiveDate;

use crate::error::ValidationError;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Sale Flow
// =============================================================================

/// Parses a quantity typed by the user.
///
/// ## Rules
/// - Must be present (after trimming)
/// - Must be an integer; `"3abc"` and `"2.5"` are rejected
/// - Must be positive (> 0)
///
/// ## User Workflow
/// ```text
/// User enters quantity: "3"
///      │
///      ▼
/// parse_quantity("3") ← THIS FUNCTION
///      │
///      ├── empty?        → Required
///      ├── not integer?  → InvalidFormat
///      ├── <= 0?         → MustBePositive
///      └── OK(3)         → build the line item
/// ```
pub fn parse_quantity(input: &str) -> ValidationResult<i64> {
    let input = input.trim();

    if input.is_empty() {
        return Err(ValidationError::required("quantity"));
    }

    let qty = input
        .parse::<i64>()
        .map_err(|_| ValidationError::InvalidFormat {
            field: "quantity".to_string(),
            reason: format!("'{}' is not a whole number", input),
        })?;

    validate_quantity(qty)?;
    Ok(qty)
}

/// Validates a quantity value.
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

/// Parses a backend identifier selected by the user.
///
/// ## Rules
/// - Must be present
/// - Must be a positive integer
pub fn parse_reference(field: &str, input: &str) -> ValidationResult<i64> {
    let input = input.trim();

    if input.is_empty() {
        return Err(ValidationError::required(field));
    }

    match input.parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: format!("'{}' is not a valid identifier", input),
        }),
    }
}

// =============================================================================
// Auth Forms
// =============================================================================

/// Validates an email address.
///
/// The backend owns the real check; this only rejects input that cannot
/// possibly be an address so the request is not wasted.
pub fn validate_email(email: &str) -> ValidationResult<()> {
    let email = email.trim();

    if email.is_empty() {
        return Err(ValidationError::required("email"));
    }

    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
        _ => Err(ValidationError::InvalidFormat {
            field: "email".to_string(),
            reason: "must look like name@domain".to_string(),
        }),
    }
}

/// Validates that a password was provided.
pub fn validate_password(password: &str) -> ValidationResult<()> {
    if password.is_empty() {
        return Err(ValidationError::required("password"));
    }

    Ok(())
}

/// Validates a registration password and its confirmation.
pub fn validate_password_confirmation(password: &str, confirmation: &str) -> ValidationResult<()> {
    validate_password(password)?;

    if confirmation.is_empty() {
        return Err(ValidationError::required("password confirmation"));
    }

    if password != confirmation {
        return Err(ValidationError::Mismatch {
            field: "password confirmation".to_string(),
            other: "password".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// History Filters
// =============================================================================

/// Validates an optional date range for the sale history filter.
pub fn validate_date_range(from: Option<NaiveDate>, to: Option<NaiveDate>) -> ValidationResult<()> {
    if let (Some(from), Some(to)) = (from, to) {
        if from > to {
            return Err(ValidationError::InvalidFormat {
                field: "date range".to_string(),
                reason: format!("start {} is after end {}", from, to),
            });
        }
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_quantity() {
        assert_eq!(parse_quantity("3").unwrap(), 3);
        assert_eq!(parse_quantity("  12\n").unwrap(), 12);

        assert_eq!(parse_quantity(""), Err(ValidationError::required("quantity")));
        assert_eq!(parse_quantity("   "), Err(ValidationError::required("quantity")));
        assert!(matches!(
            parse_quantity("0"),
            Err(ValidationError::MustBePositive { .. })
        ));
        assert!(matches!(
            parse_quantity("-2"),
            Err(ValidationError::MustBePositive { .. })
        ));
        assert!(matches!(
            parse_quantity("abc"),
            Err(ValidationError::InvalidFormat { .. })
        ));
        assert!(matches!(
            parse_quantity("3abc"),
            Err(ValidationError::InvalidFormat { .. })
        ));
        assert!(matches!(
            parse_quantity("2.5"),
            Err(ValidationError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn test_parse_reference() {
        assert_eq!(parse_reference("product", "7").unwrap(), 7);
        assert_eq!(parse_reference("product", ""), Err(ValidationError::required("product")));
        assert!(parse_reference("customer", "0").is_err());
        assert!(parse_reference("customer", "x1").is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("caja@tienda.co").is_ok());
        assert_eq!(validate_email(""), Err(ValidationError::required("email")));
        assert!(validate_email("caja").is_err());
        assert!(validate_email("@tienda.co").is_err());
    }

    #[test]
    fn test_password_confirmation() {
        assert!(validate_password_confirmation("s3cret", "s3cret").is_ok());
        assert_eq!(
            validate_password_confirmation("", ""),
            Err(ValidationError::required("password"))
        );
        assert!(matches!(
            validate_password_confirmation("s3cret", "secret"),
            Err(ValidationError::Mismatch { .. })
        ));
    }

    #[test]
    fn test_validate_date_range() {
        let may_1 = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let may_9 = NaiveDate::from_ymd_opt(2024, 5, 9).unwrap();

        assert!(validate_date_range(Some(may_1), Some(may_9)).is_ok());
        assert!(validate_date_range(Some(may_1), Some(may_1)).is_ok());
        assert!(validate_date_range(None, Some(may_1)).is_ok());
        assert!(validate_date_range(Some(may_9), Some(may_1)).is_err());
    }
}
