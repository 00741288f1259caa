//! Validation utilities for the Coffee Tasting API
//!
//! Plain functions return `&'static str` messages; the `validate_*_field`
//! wrappers adapt them for `#[validate(custom = "...")]`.

use rust_decimal::Decimal;
use validator::ValidationError;

// ============================================================================
// Normalization
// ============================================================================

/// Prepend `https://` to a website that has no scheme
pub fn normalize_website(website: Option<String>) -> Option<String> {
    website.map(|w| {
        if w.is_empty() || w.starts_with("http://") || w.starts_with("https://") {
            w
        } else {
            format!("https://{}", w)
        }
    })
}

// ============================================================================
// Decimal checks
// ============================================================================

/// Number of significant decimal places, ignoring trailing zeros
pub fn decimal_places(value: &Decimal) -> u32 {
    value.normalize().scale()
}

/// Validate a non-negative decimal with at most `max_places` decimal places
pub fn validate_non_negative_decimal(value: &Decimal, max_places: u32) -> Result<(), &'static str> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err("Value must be greater than or equal to 0");
    }
    if decimal_places(value) > max_places {
        return Err("Value has too many decimal places");
    }
    Ok(())
}

/// Prices: NUMERIC(10,2)
pub fn validate_price(value: &Decimal) -> Result<(), &'static str> {
    validate_non_negative_decimal(value, 2)?;
    if *value >= Decimal::from(100_000_000) {
        return Err("Price is too large");
    }
    Ok(())
}

/// Dose and water amounts: one decimal place, grams or ml
pub fn validate_measurement(value: &Decimal) -> Result<(), &'static str> {
    validate_non_negative_decimal(value, 1)?;
    if *value >= Decimal::from(100_000) {
        return Err("Measurement is too large");
    }
    Ok(())
}

// ============================================================================
// Text checks
// ============================================================================

/// Reject names made only of whitespace
pub fn validate_not_blank(value: &str) -> Result<(), &'static str> {
    if value.trim().is_empty() {
        return Err("Value must not be blank");
    }
    Ok(())
}

// ============================================================================
// validator adapters
// ============================================================================

fn to_validation_error(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(message.into());
    error
}

pub fn validate_price_field(value: &Decimal) -> Result<(), ValidationError> {
    validate_price(value).map_err(|m| to_validation_error("price", m))
}

pub fn validate_measurement_field(value: &Decimal) -> Result<(), ValidationError> {
    validate_measurement(value).map_err(|m| to_validation_error("measurement", m))
}

pub fn validate_not_blank_field(value: &str) -> Result<(), ValidationError> {
    validate_not_blank(value).map_err(|m| to_validation_error("blank", m))
}
