// Input validation for partner applications
//
// Hard limits, not configurable. Values follow Discord's embed limits so a
// relayed application is never rejected by the webhook for size.

use crate::error::ApiError;

// =============================================================================
// Input Size Limits
// =============================================================================

/// Maximum size for the Roblox group field.
pub const MAX_GROUP_BYTES: usize = 256;

/// Maximum size for the reason field.
/// Matches the Discord embed field value limit.
pub const MAX_REASON_BYTES: usize = 1024;

/// Maximum size for the optional Roblox username field.
pub const MAX_USERNAME_BYTES: usize = 256;

/// Generic validation error message returned to clients.
/// Intentionally vague to avoid leaking which field exceeded limits.
pub const VALIDATION_ERROR_MESSAGE: &str = "Input exceeds allowed limits";

/// Message returned when a required field is absent or blank.
pub const MISSING_FIELDS_MESSAGE: &str = "Missing required fields";

// =============================================================================
// Validation Functions
// =============================================================================

/// Validation error - returns generic message to avoid leaking details
#[derive(Debug, PartialEq, Eq)]
pub enum ValidationError {
    Missing,
    TooLarge,
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::Missing => ApiError::input(MISSING_FIELDS_MESSAGE),
            ValidationError::TooLarge => ApiError::input(VALIDATION_ERROR_MESSAGE),
        }
    }
}

/// Trim a required field, rejecting absent or blank values
pub fn require_field(value: Option<&str>) -> Result<&str, ValidationError> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ValidationError::Missing),
    }
}

/// Trim an optional field, treating blank values as absent
pub fn optional_field(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Validate a field against its byte limit
pub fn validate_field_size(field: &str, value: &str, max: usize) -> Result<(), ValidationError> {
    if value.len() > max {
        tracing::warn!(
            "{} exceeds limit: {} bytes (max: {})",
            field,
            value.len(),
            max
        );
        return Err(ValidationError::TooLarge);
    }
    Ok(())
}
