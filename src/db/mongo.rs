//! MongoDB client and collection wrapper
//!
//! Typed collections with schema-declared indexes, behind the `EntityStore`
//! trait so operations can run against an in-memory fake in tests.

use async_trait::async_trait;
use bson::{doc, oid::ObjectId, Document};
use mongodb::{options::IndexOptions, Client, Collection, IndexModel};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{error, info};

use crate::types::{Result, VaultError};

/// Trait for schemas that provide index definitions
pub trait IntoIndexes {
    fn into_indices() -> Vec<(Document, Option<IndexOptions>)>;
}

/// Trait for documents owned by the store
///
/// The store assigns `_id` exactly once, on creation.
pub trait VaultDocument {
    /// Collection this document lives in
    fn collection_name() -> &'static str;

    fn id(&self) -> Option<ObjectId>;

    fn set_id(&mut self, id: ObjectId);
}

/// Whether a delete removed a record.
///
/// A record can vanish between the existence check and the delete (two
/// concurrent deletes on the same id); callers treat `Missing` as not-found,
/// never as a fatal error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    Missing,
}

/// Uniform interface over the document store
#[async_trait]
pub trait EntityStore<T>: Send + Sync
where
    T: Send + Sync + 'static,
{
    /// Persist a new record, returning the store-assigned id
    async fn save(&self, entity: T) -> Result<ObjectId>;

    /// Find a single record matching the filter
    async fn find_one(&self, filter: Document) -> Result<Option<T>>;

    /// Find all records matching the filter
    async fn find(&self, filter: Document) -> Result<Vec<T>>;

    /// Delete the record with the given id
    async fn delete(&self, id: ObjectId) -> Result<DeleteOutcome>;

    /// Apply an update to records matching the filter, returning the number
    /// of records matched. Never inserts.
    async fn update_one(&self, filter: Document, update: Document) -> Result<u64>;
}

/// MongoDB client wrapper
#[derive(Clone)]
pub struct MongoClient {
    client: Client,
    db_name: String,
}

impl MongoClient {
    /// Create a new MongoDB client
    pub async fn new(uri: &str, db_name: &str) -> Result<Self> {
        info!("Connecting to MongoDB at {}", uri);

        // Bounded timeouts so an unreachable MongoDB fails fast instead of
        // hanging the whole request
        let timeout_uri = if uri.contains('?') {
            format!("{}&serverSelectionTimeoutMS=3000&connectTimeoutMS=3000", uri)
        } else {
            format!("{}?serverSelectionTimeoutMS=3000&connectTimeoutMS=3000", uri)
        };

        let client = Client::with_uri_str(&timeout_uri)
            .await
            .map_err(|e| VaultError::Database(format!("Failed to connect to MongoDB: {}", e)))?;

        // Verify connection
        client
            .database(db_name)
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| VaultError::Database(format!("MongoDB ping failed: {}", e)))?;

        info!("Connected to MongoDB database '{}'", db_name);

        Ok(Self {
            client,
            db_name: db_name.to_string(),
        })
    }

    /// Get a typed collection for a document schema
    pub async fn collection<T>(&self) -> Result<MongoCollection<T>>
    where
        T: Serialize
            + DeserializeOwned
            + VaultDocument
            + IntoIndexes
            + Unpin
            + Send
            + Sync
            + 'static,
    {
        MongoCollection::new(&self.client, &self.db_name).await
    }
}

/// Typed MongoDB collection with automatic indexing
#[derive(Debug, Clone)]
pub struct MongoCollection<T>
where
    T: Serialize + DeserializeOwned + Unpin + Send + Sync,
{
    inner: Collection<T>,
}

impl<T> MongoCollection<T>
where
    T: Serialize + DeserializeOwned + VaultDocument + IntoIndexes + Unpin + Send + Sync + 'static,
{
    /// Create a new collection handle and apply schema indexes
    pub async fn new(client: &Client, db_name: &str) -> Result<Self> {
        let collection = client
            .database(db_name)
            .collection::<T>(T::collection_name());
        let mongo_collection = MongoCollection { inner: collection };

        mongo_collection.apply_indexes().await?;

        Ok(mongo_collection)
    }

    /// Apply schema-defined indexes
    async fn apply_indexes(&self) -> Result<()> {
        let schema_indices = T::into_indices();

        if schema_indices.is_empty() {
            return Ok(());
        }

        let indices: Vec<IndexModel> = schema_indices
            .into_iter()
            .map(|(keys, opts)| IndexModel::builder().keys(keys).options(opts).build())
            .collect();

        self.inner
            .create_indexes(indices)
            .await
            .map_err(|e| VaultError::Database(format!("Failed to create indexes: {}", e)))?;

        Ok(())
    }
}

#[async_trait]
impl<T> EntityStore<T> for MongoCollection<T>
where
    T: Serialize + DeserializeOwned + VaultDocument + IntoIndexes + Unpin + Send + Sync + 'static,
{
    async fn save(&self, entity: T) -> Result<ObjectId> {
        let result = self
            .inner
            .insert_one(entity)
            .await
            .map_err(|e| VaultError::Database(format!("Insert failed: {}", e)))?;

        result
            .inserted_id
            .as_object_id()
            .ok_or_else(|| VaultError::Database("Failed to get inserted id".into()))
    }

    async fn find_one(&self, filter: Document) -> Result<Option<T>> {
        self.inner
            .find_one(filter)
            .await
            .map_err(|e| VaultError::Database(format!("Find failed: {}", e)))
    }

    async fn find(&self, filter: Document) -> Result<Vec<T>> {
        use futures_util::StreamExt;

        let cursor = self
            .inner
            .find(filter)
            .await
            .map_err(|e| VaultError::Database(format!("Find failed: {}", e)))?;

        let results: Vec<T> = cursor
            .filter_map(|item| async {
                match item {
                    Ok(d) => Some(d),
                    Err(e) => {
                        error!("Error reading document: {}", e);
                        None
                    }
                }
            })
            .collect()
            .await;

        Ok(results)
    }

    async fn delete(&self, id: ObjectId) -> Result<DeleteOutcome> {
        let result = self
            .inner
            .delete_one(doc! { "_id": id })
            .await
            .map_err(|e| VaultError::Database(format!("Delete failed: {}", e)))?;

        if result.deleted_count == 0 {
            Ok(DeleteOutcome::Missing)
        } else {
            Ok(DeleteOutcome::Deleted)
        }
    }

    async fn update_one(&self, filter: Document, update: Document) -> Result<u64> {
        let result = self
            .inner
            .update_one(filter, update)
            .await
            .map_err(|e| VaultError::Database(format!("Update failed: {}", e)))?;

        Ok(result.matched_count)
    }
}
