use std::sync::Arc;

use anyhow::Context;

use crate::config::AppConfig;
use crate::entries::EntryStore;
use crate::storage::{BlobStore, SqliteBlobStore};

#[derive(Clone)]
pub struct AppState {
    pub store: EntryStore,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub async fn init(config: AppConfig) -> anyhow::Result<Self> {
        let blobs = SqliteBlobStore::connect(&config.database_url)
            .await
            .with_context(|| format!("open store at {}", config.database_url))?;
        let blobs = Arc::new(blobs) as Arc<dyn BlobStore>;
        Ok(Self::from_parts(EntryStore::new(blobs), Arc::new(config)))
    }

    pub fn from_parts(store: EntryStore, config: Arc<AppConfig>) -> Self {
        Self { store, config }
    }

    pub async fn close(self) {
        self.store.close().await;
    }

    #[cfg(test)]
    pub fn fake() -> Self {
        use crate::config::LogFormat;
        use crate::storage::MemoryBlobStore;

        let config = Arc::new(AppConfig {
            database_url: "memory".into(),
            log_format: LogFormat::Text,
        });
        let blobs = Arc::new(MemoryBlobStore::new()) as Arc<dyn BlobStore>;
        Self::from_parts(EntryStore::new(blobs), config)
    }
}
