//! In-memory `EntityStore` fake for tests
//!
//! Matches filters by exact field equality against the BSON form of each
//! stored document, which covers every filter the operations issue
//! (`_id`, owner keys, `email_address`, `name`). Counts primitive calls so
//! tests can assert that e.g. the delete primitive was never reached.

use async_trait::async_trait;
use bson::{oid::ObjectId, Document};
use serde::{de::DeserializeOwned, Serialize};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::db::mongo::{DeleteOutcome, EntityStore, VaultDocument};
use crate::types::{Result, VaultError};

pub struct MemoryStore<T> {
    records: Mutex<Vec<T>>,
    pub save_calls: AtomicUsize,
    pub delete_calls: AtomicUsize,
}

impl<T> MemoryStore<T>
where
    T: Clone + Serialize + DeserializeOwned + VaultDocument + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
            save_calls: AtomicUsize::new(0),
            delete_calls: AtomicUsize::new(0),
        }
    }

    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn matches(entity: &T, filter: &Document) -> bool {
        let doc = match bson::to_document(entity) {
            Ok(d) => d,
            Err(_) => return false,
        };
        filter
            .iter()
            .all(|(key, expected)| doc.get(key) == Some(expected))
    }
}

#[async_trait]
impl<T> EntityStore<T> for MemoryStore<T>
where
    T: Clone + Serialize + DeserializeOwned + VaultDocument + Send + Sync + 'static,
{
    async fn save(&self, mut entity: T) -> Result<ObjectId> {
        self.save_calls.fetch_add(1, Ordering::SeqCst);
        let id = ObjectId::new();
        entity.set_id(id);
        self.records.lock().unwrap().push(entity);
        Ok(id)
    }

    async fn find_one(&self, filter: Document) -> Result<Option<T>> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .find(|e| Self::matches(e, &filter))
            .cloned())
    }

    async fn find(&self, filter: Document) -> Result<Vec<T>> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|e| Self::matches(e, &filter))
            .cloned()
            .collect())
    }

    async fn delete(&self, id: ObjectId) -> Result<DeleteOutcome> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        let mut records = self.records.lock().unwrap();
        let before = records.len();
        records.retain(|e| e.id() != Some(id));
        if records.len() < before {
            Ok(DeleteOutcome::Deleted)
        } else {
            Ok(DeleteOutcome::Missing)
        }
    }

    async fn update_one(&self, filter: Document, update: Document) -> Result<u64> {
        let set = update
            .get_document("$set")
            .map_err(|_| VaultError::Internal("MemoryStore only supports $set updates".into()))?
            .clone();

        let mut records = self.records.lock().unwrap();
        for entity in records.iter_mut() {
            if Self::matches(entity, &filter) {
                let mut doc = bson::to_document(entity)
                    .map_err(|e| VaultError::Internal(e.to_string()))?;
                for (key, value) in set.iter() {
                    doc.insert(key.clone(), value.clone());
                }
                *entity = bson::from_document(doc)
                    .map_err(|e| VaultError::Internal(e.to_string()))?;
                return Ok(1);
            }
        }

        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::schemas::Dataset;
    use bson::doc;
    use chrono::Utc;

    fn sample(wallet: &str) -> Dataset {
        Dataset {
            id: None,
            wallet_id: wallet.into(),
            data_pool_id: "pool-1".into(),
            data_schema_id: "schema-1".into(),
            name: "readings".into(),
            description: "sensor readings".into(),
            num_of_rows: 500,
            data_pool_position: 0,
            created: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_save_assigns_id_and_find_filters() {
        let store = MemoryStore::<Dataset>::new();
        let id = store.save(sample("W1")).await.unwrap();
        store.save(sample("W2")).await.unwrap();

        let by_id = store.find_one(doc! { "_id": id }).await.unwrap();
        assert_eq!(by_id.unwrap().wallet_id, "W1");

        let w2 = store.find(doc! { "wallet_id": "W2" }).await.unwrap();
        assert_eq!(w2.len(), 1);

        let none = store.find(doc! { "wallet_id": "W3" }).await.unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn test_delete_outcomes() {
        let store = MemoryStore::<Dataset>::new();
        let id = store.save(sample("W1")).await.unwrap();

        assert_eq!(store.delete(id).await.unwrap(), DeleteOutcome::Deleted);
        assert_eq!(store.delete(id).await.unwrap(), DeleteOutcome::Missing);
        assert_eq!(store.delete_calls.load(Ordering::SeqCst), 2);
    }
}
