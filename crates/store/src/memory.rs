use crate::error::StoreResult;
use crate::RecordStore;
use async_trait::async_trait;
use recordbook_core::{Record, StoredRecord};
use tokio::sync::Mutex;
use uuid::Uuid;

/// A store that keeps records in process memory. Ids are random UUIDs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Mutex<Vec<StoredRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub async fn len(&self) -> usize {
        self.records.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.lock().await.is_empty()
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn insert(&self, record: &Record) -> StoreResult<String> {
        let id = Uuid::new_v4().to_string();
        self.records
            .lock()
            .await
            .push(StoredRecord::new(id.clone(), record.clone()));
        Ok(id)
    }

    async fn list_all(&self) -> StoreResult<Vec<StoredRecord>> {
        Ok(self.records.lock().await.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(first: &str) -> Record {
        Record {
            first_name: first.to_string(),
            ..Record::default()
        }
    }

    #[tokio::test]
    async fn test_insert_assigns_unique_ids() {
        let store = MemoryStore::new();
        let a = store.insert(&record("Ann")).await.unwrap();
        let b = store.insert(&record("Bob")).await.unwrap();
        assert_ne!(a, b);
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn test_list_all_echoes_records_with_ids() {
        let store = MemoryStore::new();
        assert!(store.is_empty().await);

        let id = store.insert(&record("Ann")).await.unwrap();
        let listed = store.list_all().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, id);
        assert_eq!(listed[0].record.first_name, "Ann");
    }
}
