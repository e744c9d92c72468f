use chrono::NaiveDate;
use sqlx::{Pool, Sqlite, SqliteConnection};

use crate::storage::validate_sqlite_table_schema;
use crate::userdb::{
    errors::UserError,
    types::{NewUserAccount, UserAccount, UserFilter, UserSearchField},
};

use super::config::DB_TABLE_USERS;

// SQLite implementations
pub(super) async fn create_tables_sqlite(pool: &Pool<Sqlite>) -> Result<(), UserError> {
    let table_name = DB_TABLE_USERS.as_str();

    // AUTOINCREMENT keeps ids of deleted rows from being handed out again
    sqlx::query(&format!(
        r#"
        CREATE TABLE IF NOT EXISTS {table_name} (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            username VARCHAR(64) NOT NULL,
            userid VARCHAR(64) NOT NULL UNIQUE,
            userpw VARCHAR(64) NOT NULL,
            accountcreate DATE NOT NULL
        )
        "#
    ))
    .execute(pool)
    .await
    .map_err(|e| UserError::Storage(e.to_string()))?;

    Ok(())
}

/// Validates that the user table schema matches what we expect
pub(super) async fn validate_user_tables_sqlite(pool: &Pool<Sqlite>) -> Result<(), UserError> {
    let users_table = DB_TABLE_USERS.as_str();

    // Define expected schema (column name, declared type)
    let expected_columns = vec![
        ("id", "INTEGER"),
        ("username", "VARCHAR(64)"),
        ("userid", "VARCHAR(64)"),
        ("userpw", "VARCHAR(64)"),
        ("accountcreate", "DATE"),
    ];

    validate_sqlite_table_schema(pool, users_table, &expected_columns, UserError::Storage).await
}

pub(super) async fn find_user_by_field_sqlite(
    conn: &mut SqliteConnection,
    field: &UserSearchField,
) -> Result<Option<UserAccount>, UserError> {
    let table_name = DB_TABLE_USERS.as_str();

    match field {
        UserSearchField::Id(id) => sqlx::query_as::<_, UserAccount>(&format!(
            r#"
                SELECT * FROM {table_name} WHERE id = ?
                "#
        ))
        .bind(id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| UserError::Storage(e.to_string())),
        UserSearchField::UserId(user_id) => sqlx::query_as::<_, UserAccount>(&format!(
            r#"
                SELECT * FROM {table_name} WHERE userid = ?
                "#
        ))
        .bind(user_id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| UserError::Storage(e.to_string())),
    }
}

pub(super) async fn find_users_by_filter_sqlite(
    conn: &mut SqliteConnection,
    filter: &UserFilter,
) -> Result<Vec<UserAccount>, UserError> {
    let table_name = DB_TABLE_USERS.as_str();

    sqlx::query_as::<_, UserAccount>(&format!(
        r#"
        SELECT * FROM {table_name}
        WHERE (? IS NULL OR userid = ?)
          AND (? IS NULL OR username = ?)
        ORDER BY id ASC
        "#
    ))
    .bind(filter.user_id())
    .bind(filter.user_id())
    .bind(filter.user_name())
    .bind(filter.user_name())
    .fetch_all(&mut *conn)
    .await
    .map_err(|e| UserError::Storage(e.to_string()))
}

pub(super) async fn insert_user_sqlite(
    conn: &mut SqliteConnection,
    account: &NewUserAccount,
    account_create: NaiveDate,
) -> Result<UserAccount, UserError> {
    let table_name = DB_TABLE_USERS.as_str();

    sqlx::query_as::<_, UserAccount>(&format!(
        r#"
        INSERT INTO {table_name} (username, userid, userpw, accountcreate)
        VALUES (?, ?, ?, ?)
        RETURNING *
        "#
    ))
    .bind(&account.user_name)
    .bind(&account.user_id)
    .bind(&account.password)
    .bind(account_create)
    .fetch_one(&mut *conn)
    .await
    .map_err(|e| UserError::from_write(e, &account.user_id))
}

pub(super) async fn update_user_sqlite(
    conn: &mut SqliteConnection,
    account: &UserAccount,
) -> Result<Option<UserAccount>, UserError> {
    let table_name = DB_TABLE_USERS.as_str();

    sqlx::query_as::<_, UserAccount>(&format!(
        r#"
        UPDATE {table_name}
        SET username = ?, userid = ?, userpw = ?, accountcreate = ?
        WHERE id = ?
        RETURNING *
        "#
    ))
    .bind(&account.user_name)
    .bind(&account.user_id)
    .bind(&account.password)
    .bind(account.account_create)
    .bind(account.id)
    .fetch_optional(&mut *conn)
    .await
    .map_err(|e| UserError::from_write(e, &account.user_id))
}

pub(super) async fn delete_user_sqlite(
    conn: &mut SqliteConnection,
    id: i64,
) -> Result<bool, UserError> {
    let table_name = DB_TABLE_USERS.as_str();

    let result = sqlx::query(&format!(
        r#"
        DELETE FROM {table_name} WHERE id = ?
        "#
    ))
    .bind(id)
    .execute(&mut *conn)
    .await
    .map_err(|e| UserError::Storage(e.to_string()))?;

    Ok(result.rows_affected() > 0)
}
