//! Datapool operations

use bson::doc;
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::db::{schemas::Datapool, EntityStore};
use crate::ops::{delete_entity, parse_delete_id, DeleteRequest};
use crate::types::{Result, VaultError};

/// Datapool creation parameters
#[derive(Debug, Clone, Deserialize)]
pub struct CreateDatapool {
    pub creator_wallet_id: String,
    pub name: String,
    pub description: String,
    pub datapool_hash: String,
    pub smart_contract_id: String,
    pub smart_contract_address: String,
    pub sealed_data: String,
    pub total_rows: i64,
    #[serde(default)]
    pub contribution_token_id: String,
    #[serde(default)]
    pub ref_contributor_ids: Vec<String>,
    #[serde(default)]
    pub ref_derived_right_token_ids: Vec<String>,
    pub created: DateTime<Utc>,
}

/// Datapool update parameters.
///
/// `application_id` addresses the datapool being patched; the remaining
/// fields overwrite the stored values.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateDatapool {
    pub application_id: String,
    pub sealed_data: String,
    pub contribution_token_id: String,
    #[serde(default)]
    pub ref_contributors: Vec<String>,
}

/// Create a new datapool
pub async fn create_datapool<S>(store: &S, params: CreateDatapool) -> Result<Datapool>
where
    S: EntityStore<Datapool> + ?Sized,
{
    let mut datapool = Datapool {
        id: None,
        creator_wallet_id: params.creator_wallet_id,
        name: params.name,
        description: params.description,
        datapool_hash: params.datapool_hash,
        smart_contract_id: params.smart_contract_id,
        smart_contract_address: params.smart_contract_address,
        sealed_data: params.sealed_data,
        total_rows: params.total_rows,
        contribution_token_id: params.contribution_token_id,
        ref_contributor_ids: params.ref_contributor_ids,
        ref_derived_right_token_ids: params.ref_derived_right_token_ids,
        created: params.created,
    };

    let id = store.save(datapool.clone()).await?;
    datapool.id = Some(id);
    Ok(datapool)
}

/// Patch an existing datapool's marketplace fields.
///
/// The target must already exist; this never creates a record.
pub async fn update_datapool<S>(store: &S, params: UpdateDatapool) -> Result<Datapool>
where
    S: EntityStore<Datapool> + ?Sized,
{
    let id = parse_delete_id(&params.application_id)?;

    let mut datapool = store
        .find_one(doc! { "_id": id })
        .await?
        .ok_or_else(|| VaultError::NotFound(format!("datapool {}", params.application_id)))?;

    datapool.sealed_data = params.sealed_data.clone();
    datapool.contribution_token_id = params.contribution_token_id.clone();
    datapool.ref_contributor_ids = params.ref_contributors.clone();

    let matched = store
        .update_one(
            doc! { "_id": id },
            doc! { "$set": {
                "sealed_data": params.sealed_data,
                "contribution_token_id": params.contribution_token_id,
                "ref_contributor_ids": params.ref_contributors,
            }},
        )
        .await?;

    // Vanished between lookup and write
    if matched == 0 {
        return Err(VaultError::NotFound(format!(
            "datapool {}",
            params.application_id
        )));
    }

    Ok(datapool)
}

/// Delete a specified datapool
pub async fn delete_datapool<S>(store: &S, params: &DeleteRequest) -> Result<()>
where
    S: EntityStore<Datapool> + ?Sized,
{
    delete_entity(store, params, "datapool").await
}

/// List all datapools created by a wallet
pub async fn datapools<S>(store: &S, creator_wallet_id: &str) -> Result<Vec<Datapool>>
where
    S: EntityStore<Datapool> + ?Sized,
{
    store
        .find(doc! { "creator_wallet_id": creator_wallet_id })
        .await
}
