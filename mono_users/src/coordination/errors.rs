//! Error types for the user lifecycle operations

use thiserror::Error;

use crate::userdb::UserError;

/// Errors that can occur in a user lifecycle operation
///
/// Every variant is final for the request that produced it; nothing is
/// retried internally.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoordinationError {
    /// A required field is missing or blank, or a field is too long
    #[error("Validation error: {0}")]
    Validation(String),

    /// No record matches the requested id or userID
    #[error("Resource not found: {resource_type} {resource_id}")]
    ResourceNotFound {
        resource_type: String,
        resource_id: String,
    },

    /// The userID is already held by another record
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Error from the user database operations
    #[error("User error: {0}")]
    UserError(UserError),
}

impl CoordinationError {
    /// Log the error and return self
    ///
    /// Client errors are logged at warn level, storage failures at error level.
    pub fn log(self) -> Self {
        match &self {
            Self::Validation(msg) => tracing::warn!("Validation error: {}", msg),
            Self::ResourceNotFound {
                resource_type,
                resource_id,
            } => tracing::warn!("Resource not found: {} {}", resource_type, resource_id),
            Self::Conflict(msg) => tracing::warn!("Conflict: {}", msg),
            Self::UserError(err) => tracing::error!("User error: {}", err),
        }
        self
    }

    pub(crate) fn user_not_found(id: impl ToString) -> Self {
        Self::ResourceNotFound {
            resource_type: "User".to_string(),
            resource_id: id.to_string(),
        }
        .log()
    }

    pub(crate) fn user_id_taken(user_id: &str) -> Self {
        Self::Conflict(format!("userID already exists: {user_id}")).log()
    }
}

// A duplicate reported by the storage constraint is the same conflict the
// lifecycle lookup reports
impl From<UserError> for CoordinationError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::DuplicateUserId(user_id) => Self::user_id_taken(&user_id),
            err => Self::UserError(err).log(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_is_sync_and_send() {
        fn assert_sync_send<T: Sync + Send>() {}
        assert_sync_send::<CoordinationError>();
    }

    #[test]
    fn test_error_display() {
        let err = CoordinationError::Validation("userID is required".to_string());
        assert_eq!(err.to_string(), "Validation error: userID is required");

        let err = CoordinationError::user_not_found(123);
        assert_eq!(err.to_string(), "Resource not found: User 123");

        let err = CoordinationError::user_id_taken("alice1");
        assert_eq!(err.to_string(), "Conflict: userID already exists: alice1");

        let err = CoordinationError::UserError(UserError::Storage("disk full".to_string()));
        assert_eq!(err.to_string(), "User error: Storage error: disk full");
    }

    #[test]
    fn test_from_duplicate_user_id_is_conflict() {
        let err: CoordinationError = UserError::DuplicateUserId("alice1".to_string()).into();
        assert_eq!(
            err,
            CoordinationError::Conflict("userID already exists: alice1".to_string())
        );
    }

    #[test]
    fn test_from_user_error() {
        let user_err = UserError::Storage("user db error".to_string());
        let err: CoordinationError = user_err.into();

        if let CoordinationError::UserError(inner) = err {
            if let UserError::Storage(msg) = inner {
                assert_eq!(msg, "user db error");
            } else {
                panic!("Wrong inner error type");
            }
        } else {
            panic!("Wrong error type");
        }
    }

    #[test]
    fn test_error_log() {
        // log() hands back the same error
        let err = CoordinationError::Validation("test error".to_string());
        let logged_err = err.log();

        assert_eq!(
            logged_err,
            CoordinationError::Validation("test error".to_string())
        );
    }
}
