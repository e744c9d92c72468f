//! mono-users-axum - HTTP routes for mono-users
//!
//! Mount [`users_router`] under [`MONO_USERS_ROUTE_PREFIX`] after calling
//! [`init`] once at startup.

mod error;
mod router;
mod users;

pub use error::IntoResponseError;
pub use router::{users_router, users_router_no_trace};

// Re-export the route prefix and initialization function from mono_users crate
pub use mono_users::{MONO_USERS_ROUTE_PREFIX, init};
