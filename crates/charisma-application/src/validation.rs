//! Request validation helpers

use charisma_domain::error::{Error, Result};
use validator::{Validate, ValidationError};

/// Validate a request DTO, mapping violations to `InvalidArgument`
pub fn validated<T: Validate>(value: T) -> Result<T> {
    value
        .validate()
        .map_err(|e| Error::invalid_argument(e.to_string().replace('\n', "; ")))?;
    Ok(value)
}

/// Every permission must be a non-blank string
pub fn validate_permissions(permissions: &[String]) -> std::result::Result<(), ValidationError> {
    if permissions.iter().all(|p| !p.trim().is_empty()) {
        Ok(())
    } else {
        Err(ValidationError::new("blank_permission")
            .with_message("All permissions must be non-empty strings".into()))
    }
}
