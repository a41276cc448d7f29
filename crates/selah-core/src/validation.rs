//! # Validation Module
//!
//! Input validation for the strict paths: client registration and catalog
//! maintenance. Sale-line numeric fields intentionally bypass these and use
//! the permissive parsers in the money module: a mistyped quantity must
//! never interrupt a checkout, but a client record with no name must never
//! reach the database.

use crate::error::ValidationError;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product id for catalog insertion.
///
/// ## Rules
/// - Must not be empty
/// - At most 20 characters
/// - Digits only (catalog ids are numeric codes; "0000" stays reserved)
///
/// ## Example
/// ```rust
/// use selah_core::validation::validate_product_id;
///
/// assert!(validate_product_id("1001").is_ok());
/// assert!(validate_product_id("").is_err());
/// assert!(validate_product_id("PULSERA-1").is_err());
/// ```
pub fn validate_product_id(id: &str) -> ValidationResult<()> {
    let id = id.trim();

    if id.is_empty() {
        return Err(ValidationError::Required {
            field: "product id".to_string(),
        });
    }

    if id.len() > 20 {
        return Err(ValidationError::TooLong {
            field: "product id".to_string(),
            max: 20,
        });
    }

    if !id.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidFormat {
            field: "product id".to_string(),
            reason: "must contain only digits".to_string(),
        });
    }

    Ok(())
}

/// Validates a product description.
pub fn validate_description(description: &str) -> ValidationResult<()> {
    let description = description.trim();

    if description.is_empty() {
        return Err(ValidationError::Required {
            field: "description".to_string(),
        });
    }

    if description.len() > 200 {
        return Err(ValidationError::TooLong {
            field: "description".to_string(),
            max: 200,
        });
    }

    Ok(())
}

/// Validates a classification tag (single character, e.g. "P", "M").
pub fn validate_classification(classification: &str) -> ValidationResult<()> {
    let classification = classification.trim();

    if classification.is_empty() {
        return Err(ValidationError::Required {
            field: "classification".to_string(),
        });
    }

    if classification.chars().count() != 1 {
        return Err(ValidationError::InvalidFormat {
            field: "classification".to_string(),
            reason: "must be a single character".to_string(),
        });
    }

    Ok(())
}

/// Validates a client name part (given or family name).
pub fn validate_client_name(field: &str, name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if name.len() > 100 {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: 100,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates an optional client age.
pub fn validate_age(age: Option<i64>) -> ValidationResult<()> {
    if let Some(age) = age {
        if !(0..=120).contains(&age) {
            return Err(ValidationError::OutOfRange {
                field: "age".to_string(),
                min: 0,
                max: 120,
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
    fn test_validate_product_id() {
        assert!(validate_product_id("1001").is_ok());
        assert!(validate_product_id("0000").is_ok());

        assert!(validate_product_id("").is_err());
        assert!(validate_product_id("   ").is_err());
        assert!(validate_product_id("PULSERA-1").is_err());
        assert!(validate_product_id(&"9".repeat(30)).is_err());
    }

    #[test]
    fn test_validate_description() {
        assert!(validate_description("Pulsera de plata").is_ok());
        assert!(validate_description("").is_err());
        assert!(validate_description(&"A".repeat(300)).is_err());
    }

    #[test]
    fn test_validate_classification() {
        assert!(validate_classification("P").is_ok());
        assert!(validate_classification("M").is_ok());
        assert!(validate_classification("").is_err());
        assert!(validate_classification("PM").is_err());
    }

    #[test]
    fn test_validate_client_name() {
        assert!(validate_client_name("given name", "María").is_ok());
        assert!(validate_client_name("given name", "  ").is_err());
        assert!(validate_client_name("family name", &"X".repeat(150)).is_err());
    }

    #[test]
    fn test_validate_age() {
        assert!(validate_age(None).is_ok());
        assert!(validate_age(Some(35)).is_ok());
        assert!(validate_age(Some(0)).is_ok());
        assert!(validate_age(Some(121)).is_err());
        assert!(validate_age(Some(-1)).is_err());
    }
}
