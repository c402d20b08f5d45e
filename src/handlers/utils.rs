use uuid::Uuid;

use crate::error::ApiError;

/// Ids that do not parse cannot name an existing record.
pub fn parse_id(raw: &str, what: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::not_found(format!("{} not found", what)))
}

/// Presence check for required string inputs.
pub fn require_present(value: &str, field: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError::malformed_input(format!("'{}' is required", field)));
    }
    Ok(())
}
