//! Conversions between [`UserData`], the stored account and [`UserView`]
//!
//! Everything here is pure: no I/O, no validation, no uniqueness checks.

use chrono::Local;

use crate::dto::{UserData, UserView};
use crate::userdb::{NewUserAccount, UserAccount};

/// Build an unpersisted account from an inbound payload
///
/// Name, userID and password are copied as given (the password is not
/// hashed). A supplied `accountCreate` is converted to a date in the local
/// time zone; a missing one is left for the store to fill in.
pub(crate) fn to_entity(data: UserData) -> NewUserAccount {
    NewUserAccount {
        user_name: data.user_name.unwrap_or_default(),
        user_id: data.user_id.unwrap_or_default(),
        password: data.password.unwrap_or_default(),
        account_create: data
            .account_create
            .map(|ts| ts.with_timezone(&Local).date_naive()),
    }
}

pub(crate) fn to_view(account: &UserAccount) -> UserView {
    UserView {
        id: account.id,
        user_name: account.user_name.clone(),
        user_id: account.user_id.clone(),
        account_create: account.account_create,
    }
}

/// Merge the fields present in `data` into `account`
///
/// The userID is only replaced when it differs from the stored one.
/// Uniqueness of a new userID must be checked by the caller before this runs.
/// `accountCreate` is never changed by an update.
pub(crate) fn apply_update(account: &mut UserAccount, data: &UserData) {
    if let Some(user_name) = &data.user_name {
        account.user_name = user_name.clone();
    }

    if let Some(password) = &data.password {
        account.password = password.clone();
    }

    if let Some(user_id) = &data.user_id {
        if *user_id != account.user_id {
            account.user_id = user_id.clone();
        }
    }
}
