//! SQLite connection management

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;

use crate::infrastructure::ports::RepoError;

const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS npcs (
        id TEXT PRIMARY KEY NOT NULL,
        faction TEXT NOT NULL,
        spawn_group_id TEXT,
        advanced_group_id TEXT,
        created_at TEXT NOT NULL,
        document TEXT NOT NULL
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_npcs_spawn_group ON npcs (spawn_group_id)",
    "CREATE INDEX IF NOT EXISTS idx_npcs_advanced_group ON npcs (advanced_group_id)",
    "CREATE INDEX IF NOT EXISTS idx_npcs_faction ON npcs (faction)",
    r#"
    CREATE TABLE IF NOT EXISTS advanced_groups (
        id TEXT PRIMARY KEY NOT NULL,
        faction TEXT NOT NULL,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL,
        document TEXT NOT NULL
    )
    "#,
];

/// Shared SQLite pool with the schema in place.
#[derive(Clone)]
pub struct SqliteDatabase {
    pool: SqlitePool,
}

impl SqliteDatabase {
    /// Open (creating if needed) the database at `path`. `:memory:` gives a
    /// private in-memory database that lives as long as this pool.
    pub async fn connect(path: &str) -> Result<Self, RepoError> {
        let pool = if path == ":memory:" {
            // Every connection to :memory: is a separate database
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect("sqlite::memory:")
                .await
        } else {
            let options = SqliteConnectOptions::from_str(&format!("sqlite:{}", path))
                .map_err(|e| RepoError::database("connect", e))?
                .create_if_missing(true);
            SqlitePoolOptions::new().connect_with(options).await
        }
        .map_err(|e| RepoError::database("connect", e))?;

        let db = Self { pool };
        db.initialize_schema().await?;
        tracing::info!(path = %path, "SQLite document store ready");
        Ok(db)
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    async fn initialize_schema(&self) -> Result<(), RepoError> {
        for statement in SCHEMA {
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .map_err(|e| RepoError::database("initialize_schema", e))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::Row;

    #[tokio::test]
    async fn schema_is_created_and_reopen_is_idempotent() {
        let temp_dir = tempfile::tempdir().expect("tempdir");
        let db_path = temp_dir.path().join("npcs.db");
        let db_path = db_path.to_string_lossy().to_string();

        SqliteDatabase::connect(&db_path).await.expect("first open");
        let db = SqliteDatabase::connect(&db_path).await.expect("reopen");

        let row = sqlx::query(
            "SELECT COUNT(*) AS n FROM sqlite_master WHERE type = 'table' AND name IN ('npcs', 'advanced_groups')",
        )
        .fetch_one(db.pool())
        .await
        .expect("query");
        assert_eq!(row.get::<i64, _>("n"), 2);
    }

    #[tokio::test]
    async fn memory_database_keeps_schema_across_queries() {
        let db = SqliteDatabase::connect(":memory:").await.expect("open");
        for _ in 0..3 {
            sqlx::query("SELECT COUNT(*) FROM npcs")
                .fetch_one(db.pool())
                .await
                .expect("table exists");
        }
    }
}
