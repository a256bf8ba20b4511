//! Dataschema document schema

use bson::{oid::ObjectId, Document};
use chrono::{DateTime, Utc};
use mongodb::options::IndexOptions;
use serde::{Deserialize, Serialize};

use crate::db::mongo::{IntoIndexes, VaultDocument};

/// Collection name for dataschemas
pub const DATASCHEMA_COLLECTION: &str = "dataschemas";

/// A JSON schema describing the rows of a dataset or datapool.
///
/// Dataschemas are not wallet-scoped.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Dataschema {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    pub name: String,

    /// The schema body, stored verbatim
    pub data_schema: String,

    pub created: DateTime<Utc>,
}

impl VaultDocument for Dataschema {
    fn collection_name() -> &'static str {
        DATASCHEMA_COLLECTION
    }

    fn id(&self) -> Option<ObjectId> {
        self.id
    }

    fn set_id(&mut self, id: ObjectId) {
        self.id = Some(id);
    }
}

impl IntoIndexes for Dataschema {
    fn into_indices() -> Vec<(Document, Option<IndexOptions>)> {
        vec![]
    }
}
