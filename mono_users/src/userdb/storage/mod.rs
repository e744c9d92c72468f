mod config;
mod postgres;
mod sqlite;
mod store_type;

// Re-export only the specific items needed by the lifecycle operations
pub(crate) use store_type::UserStore;
