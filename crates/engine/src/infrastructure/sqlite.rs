//! SQLite-backed content storage.
//!
//! Each record is kept as one JSON document keyed by its id.

use async_trait::async_trait;
use catalog_domain::{Content, ContentId};
use sqlx::{Row, SqlitePool};
use std::sync::Arc;

use crate::infrastructure::ports::{ClockPort, ContentRepo, RepoError};

/// SQLite implementation of the content document store.
pub struct SqliteContentRepo {
    pool: SqlitePool,
    clock: Arc<dyn ClockPort>,
}

impl SqliteContentRepo {
    pub async fn new(db_path: &str, clock: Arc<dyn ClockPort>) -> Result<Self, RepoError> {
        let pool = SqlitePool::connect(&format!("sqlite:{}?mode=rwc", db_path))
            .await
            .map_err(|e| RepoError::unavailable("contents.connect", e))?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS contents (
                id TEXT PRIMARY KEY NOT NULL,
                document TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&pool)
        .await
        .map_err(|e| RepoError::unavailable("contents.migrate", e))?;

        Ok(Self { pool, clock })
    }

    fn encode(content: &Content) -> Result<String, RepoError> {
        serde_json::to_string(content).map_err(RepoError::serialization)
    }

    fn decode(row: &sqlx::sqlite::SqliteRow) -> Result<Content, RepoError> {
        let json: String = row.get("document");
        serde_json::from_str(&json).map_err(RepoError::serialization)
    }
}

#[async_trait]
impl ContentRepo for SqliteContentRepo {
    async fn list_all(&self) -> Result<Vec<Content>, RepoError> {
        let rows = sqlx::query("SELECT document FROM contents ORDER BY rowid")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepoError::unavailable("contents.list_all", e))?;

        rows.iter().map(Self::decode).collect()
    }

    async fn get(&self, id: ContentId) -> Result<Option<Content>, RepoError> {
        let row = sqlx::query("SELECT document FROM contents WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepoError::unavailable("contents.get", e))?;

        row.as_ref().map(Self::decode).transpose()
    }

    async fn insert(&self, content: &Content) -> Result<(), RepoError> {
        let json = Self::encode(content)?;
        let now = self.clock.now().to_rfc3339();

        sqlx::query("INSERT INTO contents (id, document, updated_at) VALUES (?, ?, ?)")
            .bind(content.id().to_string())
            .bind(json)
            .bind(now)
            .execute(&self.pool)
            .await
            .map_err(|e| RepoError::unavailable("contents.insert", e))?;

        Ok(())
    }

    async fn replace(&self, content: &Content) -> Result<Option<Content>, RepoError> {
        let json = Self::encode(content)?;
        let now = self.clock.now().to_rfc3339();

        let result = sqlx::query("UPDATE contents SET document = ?, updated_at = ? WHERE id = ?")
            .bind(json)
            .bind(now)
            .bind(content.id().to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| RepoError::unavailable("contents.replace", e))?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        Ok(Some(content.clone()))
    }

    async fn delete(&self, id: ContentId) -> Result<ContentId, RepoError> {
        sqlx::query("DELETE FROM contents WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| RepoError::unavailable("contents.delete", e))?;
        Ok(id)
    }
}
