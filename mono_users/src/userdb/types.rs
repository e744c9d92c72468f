use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use sqlx::FromRow;

/// A persisted user account
///
/// `id` is assigned by the store and never changes afterwards. `user_id` is
/// the business identifier and is unique across all accounts.
#[derive(Clone, FromRow, PartialEq, Eq)]
pub struct UserAccount {
    /// Store-assigned surrogate identifier
    pub id: i64,
    /// Display name
    #[sqlx(rename = "username")]
    pub user_name: String,
    /// Business identifier, unique across all accounts
    #[sqlx(rename = "userid")]
    pub user_id: String,
    /// Stored verbatim; hashing is the caller's responsibility
    #[sqlx(rename = "userpw")]
    pub password: String,
    /// Account creation date
    #[sqlx(rename = "accountcreate")]
    pub account_create: NaiveDate,
}

impl fmt::Debug for UserAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserAccount")
            .field("id", &self.id)
            .field("user_name", &self.user_name)
            .field("user_id", &self.user_id)
            .field("password", &"[redacted]")
            .field("account_create", &self.account_create)
            .finish()
    }
}

/// A user account that has not been persisted yet
///
/// When `account_create` is `None` the store fills in the current local date
/// at insert time.
#[derive(Clone, PartialEq, Eq)]
pub(crate) struct NewUserAccount {
    pub(crate) user_name: String,
    pub(crate) user_id: String,
    pub(crate) password: String,
    pub(crate) account_create: Option<NaiveDate>,
}

impl fmt::Debug for NewUserAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewUserAccount")
            .field("user_name", &self.user_name)
            .field("user_id", &self.user_id)
            .field("password", &"[redacted]")
            .field("account_create", &self.account_create)
            .finish()
    }
}

/// Single-record lookup keys
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum UserSearchField {
    /// Surrogate identifier
    Id(i64),
    /// Business identifier, case-sensitive exact match
    UserId(String),
}

impl fmt::Display for UserSearchField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserSearchField::Id(id) => write!(f, "id={id}"),
            UserSearchField::UserId(user_id) => write!(f, "userID={user_id}"),
        }
    }
}

/// List filter taken from the `userID` / `userName` query parameters
///
/// Present conditions are combined with AND; an absent or empty condition
/// matches every account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UserFilter {
    #[serde(rename = "userID", default, deserialize_with = "empty_as_none")]
    user_id: Option<String>,
    #[serde(rename = "userName", default, deserialize_with = "empty_as_none")]
    user_name: Option<String>,
}

impl UserFilter {
    pub fn new(user_id: Option<String>, user_name: Option<String>) -> Self {
        Self {
            user_id: user_id.filter(|s| !s.is_empty()),
            user_name: user_name.filter(|s| !s.is_empty()),
        }
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    pub fn user_name(&self) -> Option<&str> {
        self.user_name.as_deref()
    }
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()))
}
