use thiserror::Error;

#[derive(Clone, Error, Debug, PartialEq)]
pub enum UserError {
    #[error("User not found")]
    NotFound,

    #[error("userID already exists: {0}")]
    DuplicateUserId(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<sqlx::Error> for UserError {
    fn from(err: sqlx::Error) -> Self {
        UserError::Storage(err.to_string())
    }
}

impl UserError {
    /// Map an error raised by an INSERT or UPDATE that carried `user_id`
    ///
    /// The unique constraint on the userid column is the final guard against
    /// duplicates, so its violation is reported as a duplicate, not as a
    /// storage failure.
    pub(crate) fn from_write(err: sqlx::Error, user_id: &str) -> Self {
        match &err {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                tracing::warn!(user_id = %user_id, "Unique constraint rejected userID");
                UserError::DuplicateUserId(user_id.to_string())
            }
            _ => UserError::from(err),
        }
    }
}
