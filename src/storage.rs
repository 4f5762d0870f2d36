use async_trait::async_trait;
use sqlx::SqlitePool;
use time::{format_description::well_known::Rfc3339, OffsetDateTime};
use tracing::debug;

use crate::db;
use crate::error::StoreError;

/// Named text blobs under fixed keys.
#[async_trait]
pub trait BlobStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    async fn put(&self, key: &str, value: String) -> Result<(), StoreError>;

    /// Release underlying resources. The store must not be used afterwards.
    async fn close(&self) {}
}

#[derive(Clone)]
pub struct SqliteBlobStore {
    pool: SqlitePool,
}

impl SqliteBlobStore {
    pub async fn connect(database_url: &str) -> Result<Self, StoreError> {
        let pool = db::connect(database_url).await?;
        Ok(Self { pool })
    }
}

#[async_trait]
impl BlobStore for SqliteBlobStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let row = sqlx::query_as::<_, (String,)>(
            r#"
            SELECT value
              FROM kv_blobs
             WHERE key = ?1
            "#,
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(|(value,)| value))
    }

    async fn put(&self, key: &str, value: String) -> Result<(), StoreError> {
        let updated_at = OffsetDateTime::now_utc().format(&Rfc3339)?;
        sqlx::query(
            r#"
            INSERT INTO kv_blobs (key, value, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE
               SET value = excluded.value,
                   updated_at = excluded.updated_at
            "#,
        )
        .bind(key)
        .bind(&value)
        .bind(updated_at)
        .execute(&self.pool)
        .await?;
        debug!(key, bytes = value.len(), "blob written");
        Ok(())
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}

#[cfg(test)]
pub use memory::MemoryBlobStore;


#[cfg(test)]
mod storage_tests {
    use super::*;

    #[tokio::test]
    async fn memory_store_put_get_overwrite() {
        let store = MemoryBlobStore::new();
        assert_eq!(store.get("k").await.unwrap(), None);
        store.put("k", "one".into()).await.unwrap();
        store.put("k", "two".into()).await.unwrap();
        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("two"));
    }

    #[tokio::test]
    async fn sqlite_store_put_get_overwrite() {
        let store = SqliteBlobStore::connect("sqlite::memory:").await.unwrap();
        assert_eq!(store.get("k").await.unwrap(), None);
        store.put("k", "[1]".into()).await.unwrap();
        store.put("k", "[1,2]".into()).await.unwrap();
        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("[1,2]"));
        assert_eq!(store.get("other").await.unwrap(), None);
        store.close().await;
    }

    #[tokio::test]
    async fn sqlite_store_persists_across_reconnect() {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite://{}", dir.path().join("foodie.db").display());

        let store = SqliteBlobStore::connect(&url).await.unwrap();
        store.put("profile", "{}".into()).await.unwrap();
        store.close().await;

        let reopened = SqliteBlobStore::connect(&url).await.unwrap();
        assert_eq!(reopened.get("profile").await.unwrap().as_deref(), Some("{}"));
        reopened.close().await;
    }

    #[tokio::test]
    async fn sqlite_store_stamps_rfc3339_updated_at() {
        let store = SqliteBlobStore::connect("sqlite::memory:").await.unwrap();
        store.put("k", "[]".into()).await.unwrap();
        let (stamp,) = sqlx::query_as::<_, (String,)>("SELECT updated_at FROM kv_blobs WHERE key = 'k'")
            .fetch_one(&store.pool)
            .await
            .unwrap();
        assert!(OffsetDateTime::parse(&stamp, &Rfc3339).is_ok(), "bad stamp {stamp:?}");
        store.close().await;
    }
}
