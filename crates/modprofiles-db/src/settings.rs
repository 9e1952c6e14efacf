//! Settings storage for namespaced setting values.
//!
//! Provides key-value storage using the settings table. Values are stored as
//! JSON, so any serde-representable setting fits without schema changes.

use crate::error::{DatabaseError, Result};
use serde_json::Value;
use sqlx::SqlitePool;

/// Set a setting in the database
pub async fn set_setting(pool: &SqlitePool, key: &str, value: &Value) -> Result<()> {
    let value_str = serde_json::to_string(value)
        .map_err(|e| DatabaseError::SerializationError(e.to_string()))?;

    sqlx::query(
        r"
        INSERT INTO settings (key, value, updated_at)
        VALUES (?, ?, datetime('now'))
        ON CONFLICT(key) DO UPDATE SET
            value = excluded.value,
            updated_at = datetime('now')
        ",
    )
    .bind(key)
    .bind(value_str)
    .execute(pool)
    .await?;

    tracing::debug!("Stored setting {}", key);
    Ok(())
}

/// Get a setting from the database
pub async fn get_setting(pool: &SqlitePool, key: &str) -> Result<Option<Value>> {
    let row: Option<(String,)> = sqlx::query_as(
        r"
        SELECT value
        FROM settings
        WHERE key = ?
        ",
    )
    .bind(key)
    .fetch_optional(pool)
    .await?;

    match row {
        Some((value_str,)) => {
            let value: Value = serde_json::from_str(&value_str)
                .map_err(|e| DatabaseError::SerializationError(e.to_string()))?;
            Ok(Some(value))
        }
        None => Ok(None),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::Database;

    async fn create_test_db() -> Database {
        let db = Database::new(":memory:", 1)
            .await
            .expect("create test database");
        db.run_migrations().await.expect("run migrations");
        db
    }

    #[tokio::test]
    async fn test_set_and_get_setting() {
        let db = create_test_db().await;
        let pool = db.pool();

        let value = serde_json::json!([{"name": "Default Profile", "modules": {"dnd5e": true}}]);
        set_setting(pool, "module-profiles.profiles", &value)
            .await
            .unwrap();

        let retrieved = get_setting(pool, "module-profiles.profiles").await.unwrap();
        assert_eq!(retrieved, Some(value));
    }

    #[tokio::test]
    async fn test_overwrite_setting() {
        let db = create_test_db().await;
        let pool = db.pool();

        set_setting(pool, "k", &serde_json::json!("first"))
            .await
            .unwrap();
        set_setting(pool, "k", &serde_json::json!("second"))
            .await
            .unwrap();

        let retrieved = get_setting(pool, "k").await.unwrap();
        assert_eq!(retrieved, Some(serde_json::json!("second")));
    }

    #[tokio::test]
    async fn test_get_nonexistent_setting() {
        let db = create_test_db().await;
        let pool = db.pool();

        let result = get_setting(pool, "does_not_exist").await.unwrap();
        assert_eq!(result, None);
    }
}
