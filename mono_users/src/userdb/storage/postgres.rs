use chrono::NaiveDate;
use sqlx::{PgConnection, Pool, Postgres};

use crate::storage::validate_postgres_table_schema;
use crate::userdb::{
    errors::UserError,
    types::{NewUserAccount, UserAccount, UserFilter, UserSearchField},
};

use super::config::DB_TABLE_USERS;

// PostgreSQL implementations
pub(super) async fn create_tables_postgres(pool: &Pool<Postgres>) -> Result<(), UserError> {
    let table_name = DB_TABLE_USERS.as_str();

    sqlx::query(&format!(
        r#"
        CREATE TABLE IF NOT EXISTS {table_name} (
            id BIGSERIAL PRIMARY KEY,
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
pub(super) async fn validate_user_tables_postgres(pool: &Pool<Postgres>) -> Result<(), UserError> {
    let users_table = DB_TABLE_USERS.as_str();

    // Define expected schema (column name, data type)
    let expected_columns = vec![
        ("id", "bigint"),
        ("username", "character varying"),
        ("userid", "character varying"),
        ("userpw", "character varying"),
        ("accountcreate", "date"),
    ];

    validate_postgres_table_schema(pool, users_table, &expected_columns, UserError::Storage).await
}

pub(super) async fn find_user_by_field_postgres(
    conn: &mut PgConnection,
    field: &UserSearchField,
) -> Result<Option<UserAccount>, UserError> {
    let table_name = DB_TABLE_USERS.as_str();

    match field {
        UserSearchField::Id(id) => sqlx::query_as::<_, UserAccount>(&format!(
            r#"
                SELECT * FROM {table_name} WHERE id = $1
                "#
        ))
        .bind(id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| UserError::Storage(e.to_string())),
        UserSearchField::UserId(user_id) => sqlx::query_as::<_, UserAccount>(&format!(
            r#"
                SELECT * FROM {table_name} WHERE userid = $1
                "#
        ))
        .bind(user_id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| UserError::Storage(e.to_string())),
    }
}

pub(super) async fn find_users_by_filter_postgres(
    conn: &mut PgConnection,
    filter: &UserFilter,
) -> Result<Vec<UserAccount>, UserError> {
    let table_name = DB_TABLE_USERS.as_str();

    sqlx::query_as::<_, UserAccount>(&format!(
        r#"
        SELECT * FROM {table_name}
        WHERE ($1::TEXT IS NULL OR userid = $1)
          AND ($2::TEXT IS NULL OR username = $2)
        ORDER BY id ASC
        "#
    ))
    .bind(filter.user_id())
    .bind(filter.user_name())
    .fetch_all(&mut *conn)
    .await
    .map_err(|e| UserError::Storage(e.to_string()))
}

pub(super) async fn insert_user_postgres(
    conn: &mut PgConnection,
    account: &NewUserAccount,
    account_create: NaiveDate,
) -> Result<UserAccount, UserError> {
    let table_name = DB_TABLE_USERS.as_str();

    sqlx::query_as::<_, UserAccount>(&format!(
        r#"
        INSERT INTO {table_name} (username, userid, userpw, accountcreate)
        VALUES ($1, $2, $3, $4)
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

pub(super) async fn update_user_postgres(
    conn: &mut PgConnection,
    account: &UserAccount,
) -> Result<Option<UserAccount>, UserError> {
    let table_name = DB_TABLE_USERS.as_str();

    sqlx::query_as::<_, UserAccount>(&format!(
        r#"
        UPDATE {table_name}
        SET username = $1, userid = $2, userpw = $3, accountcreate = $4
        WHERE id = $5
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

pub(super) async fn delete_user_postgres(
    conn: &mut PgConnection,
    id: i64,
) -> Result<bool, UserError> {
    let table_name = DB_TABLE_USERS.as_str();

    let result = sqlx::query(&format!(
        r#"
        DELETE FROM {table_name} WHERE id = $1
        "#
    ))
    .bind(id)
    .execute(&mut *conn)
    .await
    .map_err(|e| UserError::Storage(e.to_string()))?;

    Ok(result.rows_affected() > 0)
}
