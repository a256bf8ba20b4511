//! Entity operations
//!
//! One module per entity kind, plus the auth operations. Every mutation
//! follows the same discipline: resolve the target record first, fail with
//! a typed error if it is absent, and only then touch the store.

pub mod auth_ops;
pub mod datapool;
pub mod dataschema;
pub mod dataset;
pub mod wasm;

use bson::{doc, oid::ObjectId};
use serde::Deserialize;

use crate::db::{DeleteOutcome, EntityStore, VaultDocument};
use crate::types::{Result, VaultError};

/// Deletion parameters shared by every entity kind
#[derive(Debug, Clone, Deserialize)]
pub struct DeleteRequest {
    pub delete_id: String,
}

/// Parse a client-supplied identifier into the store's native id format.
///
/// Anything other than exactly 24 hexadecimal characters is rejected before
/// any store call is attempted.
pub fn parse_delete_id(raw: &str) -> Result<ObjectId> {
    if raw.len() != 24 {
        return Err(VaultError::MalformedIdentifier(format!(
            "expected a 24 character hexadecimal string but '{}' has length {}",
            raw,
            raw.len()
        )));
    }

    ObjectId::parse_str(raw).map_err(|_| {
        VaultError::MalformedIdentifier(format!(
            "expected a 24 character hexadecimal string, got '{}'",
            raw
        ))
    })
}

/// Existence-checked delete, shared by every entity kind.
///
/// The record must resolve before the delete primitive is called. A record
/// that vanishes between the check and the delete reports as not-found,
/// the same as one that never existed.
pub async fn delete_entity<T, S>(store: &S, params: &DeleteRequest, kind: &str) -> Result<()>
where
    T: VaultDocument + Send + Sync + 'static,
    S: EntityStore<T> + ?Sized,
{
    let id = parse_delete_id(&params.delete_id)?;

    let existing = store.find_one(doc! { "_id": id }).await?;
    if existing.is_none() {
        return Err(VaultError::NotFound(format!("{} {}", kind, params.delete_id)));
    }

    match store.delete(id).await? {
        DeleteOutcome::Deleted => Ok(()),
        DeleteOutcome::Missing => Err(VaultError::NotFound(format!(
            "{} {}",
            kind, params.delete_id
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_id() {
        let id = parse_delete_id("aaaaaaaaaaaaaaaaaaaaaaaa").unwrap();
        assert_eq!(id.to_hex(), "aaaaaaaaaaaaaaaaaaaaaaaa");
    }

    #[test]
    fn test_parse_wrong_length() {
        assert!(matches!(
            parse_delete_id("abc123"),
            Err(VaultError::MalformedIdentifier(_))
        ));
        assert!(matches!(
            parse_delete_id("aaaaaaaaaaaaaaaaaaaaaaaaaa"),
            Err(VaultError::MalformedIdentifier(_))
        ));
        assert!(matches!(
            parse_delete_id(""),
            Err(VaultError::MalformedIdentifier(_))
        ));
    }

    #[test]
    fn test_parse_non_hex() {
        assert!(matches!(
            parse_delete_id("zzzzzzzzzzzzzzzzzzzzzzzz"),
            Err(VaultError::MalformedIdentifier(_))
        ));
    }

    #[test]
    fn test_parse_uppercase_hex_accepted() {
        assert!(parse_delete_id("AAAAAAAAAAAAAAAAAAAAAAAA").is_ok());
    }
}
