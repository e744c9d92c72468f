//! Central configuration for the mono_users crate

use std::sync::LazyLock;

/// Route prefix under which the user endpoints are mounted
///
/// Also used to build the `Location` header of newly created users.
/// Default: "/users"
pub static MONO_USERS_ROUTE_PREFIX: LazyLock<String> = LazyLock::new(|| {
    std::env::var("MONO_USERS_ROUTE_PREFIX").unwrap_or_else(|_| "/users".to_string())
});
