//! User lifecycle operations
//!
//! Each operation validates its input, then runs its lookups and writes in a
//! single store transaction.

mod errors;
mod user;
mod validation;

pub use errors::CoordinationError;
pub use user::{
    create_user, delete_user, get_user, get_user_by_user_id, list_users, update_user,
};
