//! Shared test initialization
//!
//! Tests across the crate share one SQLite file configured by `.env_test`.
//! The file is removed once per test process so every run starts empty.

use std::sync::Once;

/// Load the test environment and make sure the user table exists
///
/// ```rust,ignore
/// #[tokio::test]
/// #[serial]
/// async fn my_test() {
///     init_test_environment().await;
///     // ... test code that requires database access
/// }
/// ```
pub async fn init_test_environment() {
    static ENV_INIT: Once = Once::new();
    ENV_INIT.call_once(|| {
        if dotenvy::from_filename(".env_test").is_err() {
            dotenvy::dotenv().ok();
        }

        if let Some(db_path) = extract_sqlite_file_path() {
            // A missing file is fine
            let _ = std::fs::remove_file(&db_path);
        }
    });

    if let Err(e) = crate::userdb::UserStore::init().await {
        eprintln!("Warning: Failed to initialize UserStore: {e}");
    }
}

fn extract_sqlite_file_path_from_url(url: &str) -> Option<String> {
    let path = url.strip_prefix("sqlite:")?;
    let path = path.strip_prefix("file:").unwrap_or(path);
    let path = path.strip_prefix("//").unwrap_or(path);
    let path = path.split('?').next()?;

    if path.is_empty() || path.contains(":memory:") {
        return None;
    }
    Some(path.to_string())
}

fn extract_sqlite_file_path() -> Option<String> {
    std::env::var("GENERIC_DATA_STORE_URL")
        .ok()
        .and_then(|url| extract_sqlite_file_path_from_url(&url))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_sqlite_file_path_from_url() {
        assert_eq!(
            extract_sqlite_file_path_from_url("sqlite:/tmp/test.db"),
            Some("/tmp/test.db".to_string())
        );
        assert_eq!(
            extract_sqlite_file_path_from_url("sqlite:///tmp/test.db"),
            Some("/tmp/test.db".to_string())
        );
        assert_eq!(
            extract_sqlite_file_path_from_url("sqlite:file:/tmp/test.db?mode=rwc"),
            Some("/tmp/test.db".to_string())
        );
        assert_eq!(extract_sqlite_file_path_from_url("sqlite::memory:"), None);
        assert_eq!(
            extract_sqlite_file_path_from_url("postgresql://localhost/db"),
            None
        );
    }
}
