//! # Validation Module
//!
//! Input checks for the login and product forms.
//!
//! ## Validation Layers
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Front end (CLI flags / form fields)                          │
//! │  └── Type parsing (price digits, size/type labels)                     │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  └── Required fields, lengths, formats                                 │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: REST backend                                                 │
//! │  └── Authoritative checks, reported as ErrorResponse                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use kasir_core::validation::{validate_email, validate_product_name};
//!
//! assert!(validate_email("kasir@example.com").is_ok());
//! assert!(validate_product_name("Es Kopi Susu").is_ok());
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::NewProduct;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Maximum product name length, in characters.
pub const MAX_NAME_LEN: usize = 100;

/// Maximum length of free-text fields, in characters.
pub const MAX_TEXT_LEN: usize = 500;

// =============================================================================
// Product Fields
// =============================================================================

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty after trimming
/// - At most 100 characters
///
/// ```rust
/// use kasir_core::validation::validate_product_name;
///
/// assert!(validate_product_name("Roti Bakar").is_ok());
/// assert!(validate_product_name("   ").is_err());
/// ```
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates a unit price. Must be greater than zero.
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if !price.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "price".to_string(),
        });
    }
    Ok(())
}

/// Validates an optional free-text field such as a description.
pub fn validate_optional_text(field: &str, value: Option<&str>) -> ValidationResult<()> {
    match value {
        Some(text) if text.chars().count() > MAX_TEXT_LEN => Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_TEXT_LEN,
        }),
        _ => Ok(()),
    }
}

/// Validates an optional image URL. When present it must be http(s).
pub fn validate_image_url(url: Option<&str>) -> ValidationResult<()> {
    let Some(url) = url.map(str::trim) else {
        return Ok(());
    };

    let lower = url.to_ascii_lowercase();
    let rest = lower
        .strip_prefix("https://")
        .or_else(|| lower.strip_prefix("http://"));

    match rest {
        Some(host) if !host.is_empty() && !url.contains(char::is_whitespace) => Ok(()),
        _ => Err(ValidationError::InvalidFormat {
            field: "image".to_string(),
            reason: "must be an http or https URL".to_string(),
        }),
    }
}

/// Validates a complete create-product request.
pub fn validate_new_product(product: &NewProduct) -> ValidationResult<()> {
    if product.user_id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "userId".to_string(),
        });
    }
    validate_product_name(&product.name)?;
    validate_price(product.price)?;
    validate_optional_text("description", product.description.as_deref())?;
    validate_image_url(product.image.as_deref())?;
    Ok(())
}

// =============================================================================
// Login Fields
// =============================================================================

/// Validates an email address.
///
/// ## Rules
/// - Must not be empty
/// - Exactly one `@`
/// - Non-empty local part and domain
pub fn validate_email(email: &str) -> ValidationResult<()> {
    let email = email.trim();

    if email.is_empty() {
        return Err(ValidationError::Required {
            field: "email".to_string(),
        });
    }

    let mut parts = email.split('@');
    let local = parts.next().unwrap_or_default();
    let domain = parts.next().unwrap_or_default();

    if parts.next().is_some() || local.is_empty() || domain.is_empty() {
        return Err(ValidationError::InvalidFormat {
            field: "email".to_string(),
            reason: "must look like name@domain".to_string(),
        });
    }

    Ok(())
}

/// Validates a password. Only presence is checked.
pub fn validate_password(password: &str) -> ValidationResult<()> {
    if password.is_empty() {
        return Err(ValidationError::Required {
            field: "password".to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
