//! Input validation helpers
//!
//! Centralized limits and validation functions for the CRUD handlers.
//! Limits match the persistent schema of the original deployment: names up
//! to 100 chars, descriptions and notes up to 500, price capped at 99999.

use crate::utils::AppError;

// ── Limits ──────────────────────────────────────────────────────────

/// Menu item names
pub const MAX_NAME_LEN: usize = 100;

/// Descriptions and free-text notes
pub const MAX_TEXT_LEN: usize = 500;

/// Upper bound on price-per-gram
pub const MAX_PRICE: f64 = 99_999.0;

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value
        && v.len() > max_len
    {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.len()
        )));
    }
    Ok(())
}

/// Validate a per-gram price: finite, non-negative, below the cap.
pub fn validate_price(price: f64) -> Result<(), AppError> {
    if !price.is_finite() || price < 0.0 {
        return Err(AppError::validation("Price cannot be negative"));
    }
    if price > MAX_PRICE {
        return Err(AppError::validation("Price is too high"));
    }
    Ok(())
}

/// Validate a non-negative finite amount (discount, stock quantity).
pub fn validate_non_negative(value: f64, field: &str) -> Result<(), AppError> {
    if !value.is_finite() || value < 0.0 {
        return Err(AppError::validation(format!("{field} cannot be negative")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_required_text_is_rejected() {
        assert!(validate_required_text("  ", "name", MAX_NAME_LEN).is_err());
        assert!(validate_required_text("Samosa", "name", MAX_NAME_LEN).is_ok());
    }

    #[test]
    fn price_bounds() {
        assert!(validate_price(0.0).is_ok());
        assert!(validate_price(-0.01).is_err());
        assert!(validate_price(f64::NAN).is_err());
        assert!(validate_price(100_000.0).is_err());
    }
}
