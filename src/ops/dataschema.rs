//! Dataschema operations

use bson::doc;
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::db::{schemas::Dataschema, EntityStore};
use crate::ops::{delete_entity, DeleteRequest};
use crate::types::Result;

/// Dataschema creation parameters
#[derive(Debug, Clone, Deserialize)]
pub struct CreateDataschema {
    pub name: String,
    pub data_schema: String,
    pub created: DateTime<Utc>,
}

/// Create a new dataschema
pub async fn create_dataschema<S>(store: &S, params: CreateDataschema) -> Result<Dataschema>
where
    S: EntityStore<Dataschema> + ?Sized,
{
    let mut dataschema = Dataschema {
        id: None,
        name: params.name,
        data_schema: params.data_schema,
        created: params.created,
    };

    let id = store.save(dataschema.clone()).await?;
    dataschema.id = Some(id);
    Ok(dataschema)
}

/// Delete a specified dataschema
pub async fn delete_dataschema<S>(store: &S, params: &DeleteRequest) -> Result<()>
where
    S: EntityStore<Dataschema> + ?Sized,
{
    delete_entity(store, params, "dataschema").await
}

/// List all dataschemas. Dataschemas are unscoped; an empty list is a valid
/// result.
pub async fn dataschemas<S>(store: &S) -> Result<Vec<Dataschema>>
where
    S: EntityStore<Dataschema> + ?Sized,
{
    store.find(doc! {}).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::memory::MemoryStore;
    use crate::types::VaultError;

    fn create_params(name: &str) -> CreateDataschema {
        CreateDataschema {
            name: name.into(),
            data_schema: r#"{"type":"object"}"#.into(),
            created: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_create_and_list_all() {
        let store = MemoryStore::new();
        assert!(dataschemas(&store).await.unwrap().is_empty());

        create_dataschema(&store, create_params("s1")).await.unwrap();
        create_dataschema(&store, create_params("s2")).await.unwrap();

        let all = dataschemas(&store).await.unwrap();
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn test_delete_lifecycle() {
        let store = MemoryStore::new();
        let created = create_dataschema(&store, create_params("s1")).await.unwrap();
        let params = DeleteRequest {
            delete_id: created.id.unwrap().to_hex(),
        };

        delete_dataschema(&store, &params).await.unwrap();
        assert!(matches!(
            delete_dataschema(&store, &params).await,
            Err(VaultError::NotFound(_))
        ));
    }
}
