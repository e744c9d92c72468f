use chrono::Local;
use sqlx::{Postgres, Sqlite, Transaction};
use tokio::sync::MutexGuard;

use crate::storage::{DataStore, GENERIC_DATA_STORE};
use crate::userdb::{
    errors::UserError,
    types::{NewUserAccount, UserAccount, UserFilter, UserSearchField},
};

use super::postgres::*;
use super::sqlite::*;

pub(crate) struct UserStore;

impl UserStore {
    /// Initialize the user database tables
    pub(crate) async fn init() -> Result<(), UserError> {
        let store = GENERIC_DATA_STORE.lock().await;

        match (store.as_sqlite(), store.as_postgres()) {
            (Some(pool), _) => {
                create_tables_sqlite(pool).await?;
                validate_user_tables_sqlite(pool).await?;
                Ok(())
            }
            (_, Some(pool)) => {
                create_tables_postgres(pool).await?;
                validate_user_tables_postgres(pool).await?;
                Ok(())
            }
            _ => Err(UserError::Storage("Unsupported database type".to_string())),
        }
    }

    /// Open a transaction on the configured data store
    ///
    /// Nothing done through the returned [`UserTransaction`] becomes visible
    /// until [`UserTransaction::commit`] succeeds. Dropping it rolls back.
    pub(crate) async fn begin() -> Result<UserTransaction, UserError> {
        let store = GENERIC_DATA_STORE.lock().await;

        if let Some(pool) = store.as_sqlite() {
            let tx = pool.begin().await?;
            // SQLite has a single writer; keep the store locked until the
            // transaction ends so two local transactions never race for it.
            Ok(UserTransaction::Sqlite { tx, _guard: store })
        } else if let Some(pool) = store.as_postgres() {
            let tx = pool.begin().await?;
            Ok(UserTransaction::Postgres { tx })
        } else {
            Err(UserError::Storage("Unsupported database type".to_string()))
        }
    }
}

/// A transaction scoped to one lifecycle operation
pub(crate) enum UserTransaction {
    Sqlite {
        tx: Transaction<'static, Sqlite>,
        _guard: MutexGuard<'static, Box<dyn DataStore>>,
    },
    Postgres {
        tx: Transaction<'static, Postgres>,
    },
}

impl UserTransaction {
    #[tracing::instrument(skip(self), fields(user_field = %field))]
    pub(crate) async fn find_by(
        &mut self,
        field: &UserSearchField,
    ) -> Result<Option<UserAccount>, UserError> {
        let result = match self {
            Self::Sqlite { tx, .. } => find_user_by_field_sqlite(tx, field).await,
            Self::Postgres { tx } => find_user_by_field_postgres(tx, field).await,
        };

        match &result {
            Ok(Some(_)) => {
                tracing::debug!(found = true, "User lookup completed");
            }
            Ok(None) => {
                tracing::debug!(found = false, "User lookup completed - not found");
            }
            Err(e) => {
                tracing::error!(error = %e, "User lookup failed");
            }
        }

        result
    }

    #[tracing::instrument(skip(self))]
    pub(crate) async fn find_all_by(
        &mut self,
        filter: &UserFilter,
    ) -> Result<Vec<UserAccount>, UserError> {
        let result = match self {
            Self::Sqlite { tx, .. } => find_users_by_filter_sqlite(tx, filter).await,
            Self::Postgres { tx } => find_users_by_filter_postgres(tx, filter).await,
        };

        if let Ok(users) = &result {
            tracing::debug!(count = users.len(), "User listing completed");
        }

        result
    }

    /// Insert a new account, defaulting its creation date to today
    #[tracing::instrument(skip(self, account), fields(user_id = %account.user_id))]
    pub(crate) async fn insert(
        &mut self,
        account: &NewUserAccount,
    ) -> Result<UserAccount, UserError> {
        let account_create = account
            .account_create
            .unwrap_or_else(|| Local::now().date_naive());

        let result = match self {
            Self::Sqlite { tx, .. } => insert_user_sqlite(tx, account, account_create).await,
            Self::Postgres { tx } => insert_user_postgres(tx, account, account_create).await,
        };

        match &result {
            Ok(user) => tracing::info!(id = user.id, "User inserted"),
            Err(e) => tracing::error!(error = %e, "User insert failed"),
        }

        result
    }

    /// Overwrite every mutable column of the account identified by `account.id`
    #[tracing::instrument(skip(self, account), fields(id = account.id))]
    pub(crate) async fn update(&mut self, account: &UserAccount) -> Result<UserAccount, UserError> {
        let result = match self {
            Self::Sqlite { tx, .. } => update_user_sqlite(tx, account).await,
            Self::Postgres { tx } => update_user_postgres(tx, account).await,
        };

        match result {
            Ok(Some(user)) => {
                tracing::info!(user_id = %user.user_id, "User updated");
                Ok(user)
            }
            Ok(None) => Err(UserError::NotFound),
            Err(e) => {
                tracing::error!(error = %e, "User update failed");
                Err(e)
            }
        }
    }

    /// Returns whether a row was removed
    #[tracing::instrument(skip(self))]
    pub(crate) async fn delete_by_id(&mut self, id: i64) -> Result<bool, UserError> {
        let deleted = match self {
            Self::Sqlite { tx, .. } => delete_user_sqlite(tx, id).await?,
            Self::Postgres { tx } => delete_user_postgres(tx, id).await?,
        };

        tracing::info!(deleted, "User delete completed");
        Ok(deleted)
    }

    pub(crate) async fn commit(self) -> Result<(), UserError> {
        match self {
            Self::Sqlite { tx, _guard } => tx.commit().await?,
            Self::Postgres { tx } => tx.commit().await?,
        }
        Ok(())
    }
}
