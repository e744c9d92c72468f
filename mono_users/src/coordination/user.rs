use crate::dto::{UserData, UserView};
use crate::mapper::{apply_update, to_entity, to_view};
use crate::userdb::{UserError, UserFilter, UserSearchField, UserStore};

use super::errors::CoordinationError;
use super::validation::{validate_new_user, validate_user_update};

/// Create a user and return its view together with the assigned id
///
/// The userID must not be held by any existing record. The lookup and the
/// insert run in one transaction; a duplicate that slips past the lookup is
/// still reported as a conflict by the storage constraint.
#[tracing::instrument(skip(data), fields(user_id = ?data.user_id))]
pub async fn create_user(data: UserData) -> Result<(UserView, i64), CoordinationError> {
    validate_new_user(&data)?;

    let mut tx = UserStore::begin().await?;

    let user_id = data.user_id.clone().unwrap_or_default();
    if tx
        .find_by(&UserSearchField::UserId(user_id.clone()))
        .await?
        .is_some()
    {
        return Err(CoordinationError::user_id_taken(&user_id));
    }

    let created = tx.insert(&to_entity(data)).await?;
    tx.commit().await?;

    tracing::info!(id = created.id, "Created user");
    Ok((to_view(&created), created.id))
}

#[tracing::instrument]
pub async fn get_user(id: i64) -> Result<UserView, CoordinationError> {
    let mut tx = UserStore::begin().await?;
    let account = tx.find_by(&UserSearchField::Id(id)).await?;
    tx.commit().await?;

    account
        .map(|account| to_view(&account))
        .ok_or_else(|| CoordinationError::user_not_found(id))
}

#[tracing::instrument]
pub async fn get_user_by_user_id(user_id: &str) -> Result<UserView, CoordinationError> {
    let mut tx = UserStore::begin().await?;
    let account = tx
        .find_by(&UserSearchField::UserId(user_id.to_string()))
        .await?;
    tx.commit().await?;

    account
        .map(|account| to_view(&account))
        .ok_or_else(|| CoordinationError::user_not_found(user_id))
}

/// List users matching every filter that is set, ordered by id
#[tracing::instrument]
pub async fn list_users(filter: UserFilter) -> Result<Vec<UserView>, CoordinationError> {
    let mut tx = UserStore::begin().await?;
    let accounts = tx.find_all_by(&filter).await?;
    tx.commit().await?;

    Ok(accounts.iter().map(to_view).collect())
}

/// Apply the fields present in `data` to the user with `id`
///
/// An empty request is accepted and leaves the record as it was.
/// A new userID must not be held by any other record.
#[tracing::instrument(skip(data))]
pub async fn update_user(id: i64, data: UserData) -> Result<UserView, CoordinationError> {
    validate_user_update(&data)?;

    let mut tx = UserStore::begin().await?;

    let mut account = tx
        .find_by(&UserSearchField::Id(id))
        .await?
        .ok_or_else(|| CoordinationError::user_not_found(id))?;

    if let Some(new_user_id) = data.user_id.as_deref() {
        if new_user_id != account.user_id
            && tx
                .find_by(&UserSearchField::UserId(new_user_id.to_string()))
                .await?
                .is_some()
        {
            return Err(CoordinationError::user_id_taken(new_user_id));
        }
    }

    apply_update(&mut account, &data);

    let updated = tx.update(&account).await.map_err(|e| match e {
        UserError::NotFound => CoordinationError::user_not_found(id),
        e => e.into(),
    })?;
    tx.commit().await?;

    tracing::info!(id, "Updated user");
    Ok(to_view(&updated))
}

#[tracing::instrument]
pub async fn delete_user(id: i64) -> Result<(), CoordinationError> {
    let mut tx = UserStore::begin().await?;

    if !tx.delete_by_id(id).await? {
        return Err(CoordinationError::user_not_found(id));
    }

    tx.commit().await?;

    tracing::info!(id, "Deleted user");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::init_test_environment;
    use chrono::{Local, TimeZone, Utc};
    use serial_test::serial;

    /// Helper function to build a unique create request
    fn new_user_data(name: &str, prefix: &str) -> UserData {
        UserData {
            user_name: Some(name.to_string()),
            user_id: Some(format!("{prefix}-{}", Utc::now().timestamp_micros())),
            password: Some("p@ss".to_string()),
            account_create: None,
        }
    }

    async fn cleanup(id: i64) {
        let _ = delete_user(id).await;
    }

    async fn count_all() -> usize {
        list_users(UserFilter::default())
            .await
            .expect("Failed to list users")
            .len()
    }

    #[tokio::test]
    #[serial]
    async fn test_create_user_returns_view_and_id() {
        init_test_environment().await;

        // Given a complete request
        let data = new_user_data("Alice", "alice");
        let user_id = data.user_id.clone().unwrap();

        // When the user is created
        let (view, id) = create_user(data).await.expect("Failed to create user");

        // Then the view carries the assigned id and today's date
        assert_eq!(view.id, id);
        assert_eq!(view.user_name, "Alice");
        assert_eq!(view.user_id, user_id);
        assert_eq!(view.account_create, Local::now().date_naive());

        // And it can be read back by both keys
        assert_eq!(get_user(id).await, Ok(view.clone()));
        assert_eq!(get_user_by_user_id(&user_id).await, Ok(view));

        cleanup(id).await;
    }

    #[tokio::test]
    #[serial]
    async fn test_create_user_with_supplied_date() {
        init_test_environment().await;

        let ts = Utc.with_ymd_and_hms(2025, 10, 12, 12, 0, 0).unwrap();
        let data = UserData {
            account_create: Some(ts),
            ..new_user_data("Dated", "dated")
        };

        let (view, id) = create_user(data).await.expect("Failed to create user");
        assert_eq!(view.account_create, ts.with_timezone(&Local).date_naive());

        cleanup(id).await;
    }

    #[tokio::test]
    #[serial]
    async fn test_create_user_duplicate_user_id_is_conflict() {
        init_test_environment().await;

        // Given an existing user
        let data = new_user_data("Alice", "dup");
        let (_, id) = create_user(data.clone())
            .await
            .expect("Failed to create user");
        let before = count_all().await;

        // When another user with the same userID is created
        let result = create_user(UserData {
            user_name: Some("Someone Else".to_string()),
            ..data.clone()
        })
        .await;

        // Then it conflicts and nothing is stored
        assert!(matches!(result, Err(CoordinationError::Conflict(_))));
        assert_eq!(count_all().await, before);

        cleanup(id).await;
    }

    #[tokio::test]
    #[serial]
    async fn test_create_user_validation_fails_before_store() {
        init_test_environment().await;

        let before = count_all().await;

        let result = create_user(UserData {
            password: None,
            ..new_user_data("NoPassword", "nopw")
        })
        .await;
        assert!(matches!(result, Err(CoordinationError::Validation(_))));

        let result = create_user(UserData {
            user_id: Some("x".repeat(65)),
            ..new_user_data("TooLong", "long")
        })
        .await;
        assert!(matches!(result, Err(CoordinationError::Validation(_))));

        assert_eq!(count_all().await, before);
    }

    #[tokio::test]
    #[serial]
    async fn test_get_missing_user_is_not_found() {
        init_test_environment().await;

        assert!(matches!(
            get_user(i64::MAX).await,
            Err(CoordinationError::ResourceNotFound { .. })
        ));
        assert!(matches!(
            get_user_by_user_id("no-such-user-id").await,
            Err(CoordinationError::ResourceNotFound { .. })
        ));
    }

    #[tokio::test]
    #[serial]
    async fn test_list_users_filters() {
        init_test_environment().await;

        let shared_name = format!("Listed {}", Utc::now().timestamp_micros());
        let (first, first_id) = create_user(new_user_data(&shared_name, "list1"))
            .await
            .expect("Failed to create user");
        let (second, second_id) = create_user(new_user_data(&shared_name, "list2"))
            .await
            .expect("Failed to create user");

        let by_name = list_users(UserFilter::new(None, Some(shared_name.clone())))
            .await
            .expect("Failed to list users");
        assert_eq!(by_name, vec![first.clone(), second.clone()]);

        let by_user_id = list_users(UserFilter::new(Some(first.user_id.clone()), None))
            .await
            .expect("Failed to list users");
        assert_eq!(by_user_id, vec![first.clone()]);

        // Both filters must hold
        let none = list_users(UserFilter::new(
            Some(first.user_id.clone()),
            Some("not the name".to_string()),
        ))
        .await
        .expect("Failed to list users");
        assert!(none.is_empty());

        cleanup(first_id).await;
        cleanup(second_id).await;
    }

    #[tokio::test]
    #[serial]
    async fn test_update_user_partial_fields() {
        init_test_environment().await;

        // Given Alice
        let (created, id) = create_user(new_user_data("Alice", "upd"))
            .await
            .expect("Failed to create user");

        // When only the name is changed
        let updated = update_user(
            id,
            UserData {
                user_name: Some("Alicia".to_string()),
                ..Default::default()
            },
        )
        .await
        .expect("Failed to update user");

        // Then the other fields are kept
        assert_eq!(updated.user_name, "Alicia");
        assert_eq!(updated.user_id, created.user_id);
        assert_eq!(updated.account_create, created.account_create);

        // An empty update succeeds and changes nothing
        let unchanged = update_user(id, UserData::default())
            .await
            .expect("Empty update should succeed");
        assert_eq!(unchanged, updated);

        cleanup(id).await;
    }

    #[tokio::test]
    #[serial]
    async fn test_update_user_ignores_account_create() {
        init_test_environment().await;

        let (created, id) = create_user(new_user_data("Alice", "keepdate"))
            .await
            .expect("Failed to create user");

        let updated = update_user(
            id,
            UserData {
                account_create: Some(Utc.with_ymd_and_hms(1999, 1, 1, 0, 0, 0).unwrap()),
                ..Default::default()
            },
        )
        .await
        .expect("Failed to update user");

        assert_eq!(updated.account_create, created.account_create);

        cleanup(id).await;
    }

    #[tokio::test]
    #[serial]
    async fn test_update_user_id_conflict_leaves_record_unchanged() {
        init_test_environment().await;

        // Given Alice and Bob
        let (alice, alice_id) = create_user(new_user_data("Alice", "alice"))
            .await
            .expect("Failed to create user");
        let (bob, bob_id) = create_user(new_user_data("Bob", "bob"))
            .await
            .expect("Failed to create user");

        // When Alice tries to take Bob's userID
        let result = update_user(
            alice_id,
            UserData {
                user_name: Some("Changed".to_string()),
                user_id: Some(bob.user_id.clone()),
                ..Default::default()
            },
        )
        .await;

        // Then it conflicts and Alice is untouched
        assert!(matches!(result, Err(CoordinationError::Conflict(_))));
        assert_eq!(get_user(alice_id).await, Ok(alice.clone()));

        // Re-submitting her own userID is not a conflict
        let same = update_user(
            alice_id,
            UserData {
                user_id: Some(alice.user_id.clone()),
                ..Default::default()
            },
        )
        .await;
        assert_eq!(same, Ok(alice));

        cleanup(alice_id).await;
        cleanup(bob_id).await;
    }

    #[tokio::test]
    #[serial]
    async fn test_update_missing_user_is_not_found() {
        init_test_environment().await;

        let result = update_user(
            i64::MAX,
            UserData {
                user_name: Some("Nobody".to_string()),
                ..Default::default()
            },
        )
        .await;

        assert!(matches!(
            result,
            Err(CoordinationError::ResourceNotFound { .. })
        ));
    }

    #[tokio::test]
    #[serial]
    async fn test_delete_user_then_not_found() {
        init_test_environment().await;

        let (_, id) = create_user(new_user_data("Doomed", "del"))
            .await
            .expect("Failed to create user");

        assert_eq!(delete_user(id).await, Ok(()));

        assert!(matches!(
            get_user(id).await,
            Err(CoordinationError::ResourceNotFound { .. })
        ));
        assert!(matches!(
            delete_user(id).await,
            Err(CoordinationError::ResourceNotFound { .. })
        ));
    }

    #[tokio::test]
    #[serial]
    async fn test_deleted_user_id_can_be_reused() {
        init_test_environment().await;

        let data = new_user_data("First", "reuse");
        let (_, first_id) = create_user(data.clone())
            .await
            .expect("Failed to create user");
        delete_user(first_id).await.expect("Failed to delete user");

        let (_, second_id) = create_user(data)
            .await
            .expect("userID should be free after delete");
        assert!(second_id > first_id);

        cleanup(second_id).await;
    }
}
