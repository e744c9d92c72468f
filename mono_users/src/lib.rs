//! mono-users - User account management core
//!
//! This crate owns the user-record lifecycle: mapping between the inbound
//! request, the stored record and the outbound view, and the create / read /
//! list / update / delete operations that keep the business `userID` unique
//! across all records. Persistence runs on SQLite or PostgreSQL through sqlx.

mod config;
mod coordination;
mod dto;
mod mapper;
mod storage;
mod userdb;

#[cfg(test)]
mod test_utils;

pub use config::MONO_USERS_ROUTE_PREFIX;

pub use coordination::{
    CoordinationError, create_user, delete_user, get_user, get_user_by_user_id, list_users,
    update_user,
};

pub use dto::{UserData, UserView};

pub use userdb::{UserAccount, UserError, UserFilter};

/// Initialize the data store and the user table
pub async fn init() -> Result<(), Box<dyn std::error::Error>> {
    storage::init().await?;
    userdb::init().await?;
    Ok(())
}
