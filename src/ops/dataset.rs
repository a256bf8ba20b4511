//! Dataset operations

use bson::doc;
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::db::{schemas::Dataset, EntityStore};
use crate::ops::{delete_entity, DeleteRequest};
use crate::types::Result;

/// Dataset creation parameters
#[derive(Debug, Clone, Deserialize)]
pub struct CreateDataset {
    pub wallet_id: String,
    pub data_pool_id: String,
    pub data_schema_id: String,
    pub name: String,
    pub description: String,
    pub num_of_rows: i64,
    pub data_pool_position: i64,
    pub created: DateTime<Utc>,
}

/// Create a new dataset, returning the persisted record with its
/// store-assigned id.
pub async fn create_dataset<S>(store: &S, params: CreateDataset) -> Result<Dataset>
where
    S: EntityStore<Dataset> + ?Sized,
{
    let mut dataset = Dataset {
        id: None,
        wallet_id: params.wallet_id,
        data_pool_id: params.data_pool_id,
        data_schema_id: params.data_schema_id,
        name: params.name,
        description: params.description,
        num_of_rows: params.num_of_rows,
        data_pool_position: params.data_pool_position,
        created: params.created,
    };

    let id = store.save(dataset.clone()).await?;
    dataset.id = Some(id);
    Ok(dataset)
}

/// Delete a specified dataset
pub async fn delete_dataset<S>(store: &S, params: &DeleteRequest) -> Result<()>
where
    S: EntityStore<Dataset> + ?Sized,
{
    delete_entity(store, params, "dataset").await
}

/// List all datasets owned by a wallet
pub async fn datasets<S>(store: &S, wallet_id: &str) -> Result<Vec<Dataset>>
where
    S: EntityStore<Dataset> + ?Sized,
{
    store.find(doc! { "wallet_id": wallet_id }).await
}
