pub mod chart_service;
pub mod navigation_service;
pub mod series_service;
pub mod session_service;
pub mod setup_service;
pub mod transaction_service;

use rust_decimal::Decimal;
use std::str::FromStr;

use crate::errors::CoreError;
use crate::models::finance::MAX_AMOUNT;

/// Parse a form value into an exact decimal.
///
/// Accepts plain ("12.50") and scientific ("1.2e3") notation. Blank input,
/// non-numbers and non-finite values are validation errors.
pub(crate) fn parse_decimal(raw: &str, field: &str) -> Result<Decimal, CoreError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(CoreError::ValidationError(format!("{field} is required")));
    }
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|_| {
            CoreError::ValidationError(format!("{field} must be a number (got '{trimmed}')"))
        })
}

/// Reject values above [`MAX_AMOUNT`] so running totals stay in range.
pub(crate) fn check_upper_bound(value: Decimal, field: &str) -> Result<Decimal, CoreError> {
    if value > MAX_AMOUNT {
        return Err(CoreError::ValidationError(format!(
            "{field} must not exceed {MAX_AMOUNT}"
        )));
    }
    Ok(value)
}
