//! WASM binary operations

use bson::doc;
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::db::{schemas::WasmBinary, EntityStore};
use crate::ops::{delete_entity, DeleteRequest};
use crate::types::Result;

/// WASM binary creation parameters
#[derive(Debug, Clone, Deserialize)]
pub struct CreateWasmBinary {
    pub name: String,
    /// Opaque encoded binary payload
    pub wasm_binary: String,
    pub created: DateTime<Utc>,
}

/// Store a new WASM binary
pub async fn create_wasm_binary<S>(store: &S, params: CreateWasmBinary) -> Result<WasmBinary>
where
    S: EntityStore<WasmBinary> + ?Sized,
{
    let mut binary = WasmBinary {
        id: None,
        name: params.name,
        wasm_binary: params.wasm_binary,
        created: params.created,
    };

    let id = store.save(binary.clone()).await?;
    binary.id = Some(id);
    Ok(binary)
}

/// Retrieve all stored binaries with the given name
pub async fn get_wasm_binaries<S>(store: &S, name: &str) -> Result<Vec<WasmBinary>>
where
    S: EntityStore<WasmBinary> + ?Sized,
{
    store.find(doc! { "name": name }).await
}

/// Delete a specified WASM binary
pub async fn delete_wasm_binary<S>(store: &S, params: &DeleteRequest) -> Result<()>
where
    S: EntityStore<WasmBinary> + ?Sized,
{
    delete_entity(store, params, "wasm binary").await
}
