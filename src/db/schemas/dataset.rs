//! Dataset document schema

use bson::{doc, oid::ObjectId, Document};
use chrono::{DateTime, Utc};
use mongodb::options::IndexOptions;
use serde::{Deserialize, Serialize};

use crate::db::mongo::{IntoIndexes, VaultDocument};

/// Collection name for datasets
pub const DATASET_COLLECTION: &str = "datasets";

/// A dataset registered by a wallet
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Dataset {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    /// Owning wallet
    pub wallet_id: String,

    pub data_pool_id: String,

    pub data_schema_id: String,

    pub name: String,

    pub description: String,

    pub num_of_rows: i64,

    pub data_pool_position: i64,

    pub created: DateTime<Utc>,
}

impl VaultDocument for Dataset {
    fn collection_name() -> &'static str {
        DATASET_COLLECTION
    }

    fn id(&self) -> Option<ObjectId> {
        self.id
    }

    fn set_id(&mut self, id: ObjectId) {
        self.id = Some(id);
    }
}

impl IntoIndexes for Dataset {
    fn into_indices() -> Vec<(Document, Option<IndexOptions>)> {
        vec![(
            doc! { "wallet_id": 1 },
            Some(
                IndexOptions::builder()
                    .name("wallet_id_index".to_string())
                    .build(),
            ),
        )]
    }
}
