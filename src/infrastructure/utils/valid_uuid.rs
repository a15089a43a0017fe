use uuid::Uuid;

use crate::errors::AppError;

/// Parses a path identifier, rejecting malformed values before any store lookup.
pub fn valid_uuid(id: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(id).map_err(|_| AppError::BadRequest(format!("Invalid id: {}", id)))
}
