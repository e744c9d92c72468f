mod errors;
mod storage;
mod types;

pub use errors::UserError;
pub use types::{UserAccount, UserFilter};

pub(crate) use storage::UserStore;
pub(crate) use types::{NewUserAccount, UserSearchField};

pub(crate) async fn init() -> Result<(), UserError> {
    UserStore::init().await
}
