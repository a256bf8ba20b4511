//! Datapool document schema

use bson::{doc, oid::ObjectId, Document};
use chrono::{DateTime, Utc};
use mongodb::options::IndexOptions;
use serde::{Deserialize, Serialize};

use crate::db::mongo::{IntoIndexes, VaultDocument};

/// Collection name for datapools
pub const DATAPOOL_COLLECTION: &str = "datapools";

/// A datapool published to the marketplace.
///
/// The smart-contract and token fields are opaque ledger references; the
/// backend stores them without interpretation.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Datapool {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    /// Owning wallet
    pub creator_wallet_id: String,

    pub name: String,

    pub description: String,

    pub datapool_hash: String,

    pub smart_contract_id: String,

    pub smart_contract_address: String,

    pub sealed_data: String,

    pub total_rows: i64,

    pub contribution_token_id: String,

    /// Ledger ids of contributor tokens referenced by this pool
    #[serde(default)]
    pub ref_contributor_ids: Vec<String>,

    /// Ledger ids of derived-right tokens referenced by this pool
    #[serde(default)]
    pub ref_derived_right_token_ids: Vec<String>,

    pub created: DateTime<Utc>,
}

impl VaultDocument for Datapool {
    fn collection_name() -> &'static str {
        DATAPOOL_COLLECTION
    }

    fn id(&self) -> Option<ObjectId> {
        self.id
    }

    fn set_id(&mut self, id: ObjectId) {
        self.id = Some(id);
    }
}

impl IntoIndexes for Datapool {
    fn into_indices() -> Vec<(Document, Option<IndexOptions>)> {
        vec![(
            doc! { "creator_wallet_id": 1 },
            Some(
                IndexOptions::builder()
                    .name("creator_wallet_id_index".to_string())
                    .build(),
            ),
        )]
    }
}
