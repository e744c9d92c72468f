//! Field rules checked before a lifecycle operation touches the store

use crate::dto::UserData;

use super::errors::CoordinationError;

/// Upper bound for userName, userID and password, in characters
pub(crate) const MAX_FIELD_CHARS: usize = 64;

/// All of userName, userID and password must be present
pub(super) fn validate_new_user(data: &UserData) -> Result<(), CoordinationError> {
    require("userName", data.user_name.as_deref())?;
    require("userID", data.user_id.as_deref())?;
    require("password", data.password.as_deref())?;
    Ok(())
}

/// Absent fields are fine; present ones follow the same rules as on create
pub(super) fn validate_user_update(data: &UserData) -> Result<(), CoordinationError> {
    for (name, value) in [
        ("userName", data.user_name.as_deref()),
        ("userID", data.user_id.as_deref()),
        ("password", data.password.as_deref()),
    ] {
        if let Some(value) = value {
            check_field(name, value)?;
        }
    }
    Ok(())
}

fn require(name: &str, value: Option<&str>) -> Result<(), CoordinationError> {
    match value {
        Some(value) => check_field(name, value),
        None => Err(CoordinationError::Validation(format!("{name} is required")).log()),
    }
}

fn check_field(name: &str, value: &str) -> Result<(), CoordinationError> {
    if value.trim().is_empty() {
        return Err(CoordinationError::Validation(format!("{name} must not be blank")).log());
    }

    if value.chars().count() > MAX_FIELD_CHARS {
        return Err(CoordinationError::Validation(format!(
            "{name} must be at most {MAX_FIELD_CHARS} characters"
        ))
        .log());
    }

    Ok(())
}
