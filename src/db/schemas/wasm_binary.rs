//! WASM binary document schema

use bson::{doc, oid::ObjectId, Document};
use chrono::{DateTime, Utc};
use mongodb::options::IndexOptions;
use serde::{Deserialize, Serialize};

use crate::db::mongo::{IntoIndexes, VaultDocument};

/// Collection name for WASM binaries
pub const WASM_BINARY_COLLECTION: &str = "wasm_binaries";

/// A stored WASM binary, looked up by name.
///
/// The payload is an opaque encoded string; the backend never inspects it.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct WasmBinary {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    pub name: String,

    pub wasm_binary: String,

    pub created: DateTime<Utc>,
}

impl VaultDocument for WasmBinary {
    fn collection_name() -> &'static str {
        WASM_BINARY_COLLECTION
    }

    fn id(&self) -> Option<ObjectId> {
        self.id
    }

    fn set_id(&mut self, id: ObjectId) {
        self.id = Some(id);
    }
}

impl IntoIndexes for WasmBinary {
    fn into_indices() -> Vec<(Document, Option<IndexOptions>)> {
        vec![(
            doc! { "name": 1 },
            Some(
                IndexOptions::builder()
                    .name("name_index".to_string())
                    .build(),
            ),
        )]
    }
}
