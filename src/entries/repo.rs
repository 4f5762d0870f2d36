use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::entries::dto::FoodEntry;
use crate::error::StoreError;
use crate::storage::BlobStore;

pub const ENTRIES_KEY: &str = "foodie-tracker-entries";

/// Repository over the blob store for food entries and the user profile.
///
/// Every mutation is a read-modify-write of a whole blob; there is no locking
/// between concurrent writers.
#[derive(Clone)]
pub struct EntryStore {
    blobs: Arc<dyn BlobStore>,
}

impl EntryStore {
    pub fn new(blobs: Arc<dyn BlobStore>) -> Self {
        Self { blobs }
    }

    pub async fn close(&self) {
        self.blobs.close().await;
    }

    pub(crate) async fn read_json<T: DeserializeOwned>(
        &self,
        key: &str,
    ) -> Result<Option<T>, StoreError> {
        let Some(raw) = self.blobs.get(key).await? else {
            return Ok(None);
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| {
                warn!(key, error = %source, "corrupt blob");
                StoreError::Corrupt {
                    key: key.to_string(),
                    source,
                }
            })
    }

    pub(crate) async fn write_json<T: Serialize + ?Sized>(
        &self,
        key: &str,
        value: &T,
    ) -> Result<(), StoreError> {
        let raw = serde_json::to_string(value).map_err(|source| StoreError::Encode {
            key: key.to_string(),
            source,
        })?;
        self.blobs.put(key, raw).await
    }

    /// All entries in insertion order.
    pub async fn list_entries(&self) -> Result<Vec<FoodEntry>, StoreError> {
        Ok(self.read_json(ENTRIES_KEY).await?.unwrap_or_default())
    }

    /// Entries whose `date` equals `date` exactly.
    pub async fn list_entries_by_date(&self, date: &str) -> Result<Vec<FoodEntry>, StoreError> {
        let mut entries = self.list_entries().await?;
        entries.retain(|e| e.date == date);
        debug!(date, count = entries.len(), "entries for date");
        Ok(entries)
    }

    /// First entry with `id`, if any.
    pub async fn find_entry(&self, id: &str) -> Result<Option<FoodEntry>, StoreError> {
        let entries = self.list_entries().await?;
        Ok(entries.into_iter().find(|e| e.id == id))
    }

    /// Append without checking for an existing id.
    #[instrument(skip(self, entry), fields(id = %entry.id))]
    pub async fn add_entry(&self, entry: FoodEntry) -> Result<(), StoreError> {
        let mut entries = self.list_entries().await?;
        entries.push(entry);
        self.write_json(ENTRIES_KEY, &entries).await?;
        info!(total = entries.len(), "entry added");
        Ok(())
    }

    /// Remove every entry with `id`. Returns how many were removed; zero is not an error.
    #[instrument(skip(self))]
    pub async fn delete_entry(&self, id: &str) -> Result<usize, StoreError> {
        let mut entries = self.list_entries().await?;
        let before = entries.len();
        entries.retain(|e| e.id != id);
        let removed = before - entries.len();
        if removed == 0 {
            debug!("no entry matched");
            return Ok(0);
        }
        self.write_json(ENTRIES_KEY, &entries).await?;
        info!(removed, "entry deleted");
        Ok(removed)
    }
}
