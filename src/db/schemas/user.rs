//! User account document schema

use bson::{doc, oid::ObjectId, Document};
use mongodb::options::IndexOptions;
use serde::{Deserialize, Serialize};

use crate::db::mongo::{IntoIndexes, VaultDocument};

/// Collection name for user accounts
pub const USER_COLLECTION: &str = "users";

/// User account stored in MongoDB
///
/// `password_digest` is the PHC-formatted output of the credential hasher,
/// never the raw password. Accounts are immutable after creation and are
/// never returned directly to callers; see `UserDisplay`.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct UserAccount {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    /// Unique lookup key
    pub email_address: String,

    pub full_name: String,

    pub phone_number: String,

    /// Argon2 PHC digest
    pub password_digest: String,
}

impl UserAccount {
    pub fn new(
        email_address: String,
        full_name: String,
        phone_number: String,
        password_digest: String,
    ) -> Self {
        Self {
            id: None,
            email_address,
            full_name,
            phone_number,
            password_digest,
        }
    }
}

impl VaultDocument for UserAccount {
    fn collection_name() -> &'static str {
        USER_COLLECTION
    }

    fn id(&self) -> Option<ObjectId> {
        self.id
    }

    fn set_id(&mut self, id: ObjectId) {
        self.id = Some(id);
    }
}

impl IntoIndexes for UserAccount {
    fn into_indices() -> Vec<(Document, Option<IndexOptions>)> {
        vec![(
            doc! { "email_address": 1 },
            Some(
                IndexOptions::builder()
                    .unique(true)
                    .name("email_address_unique".to_string())
                    .build(),
            ),
        )]
    }
}

/// Projection of an account returned on registration and login.
///
/// Deliberately excludes the password digest.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct UserDisplay {
    pub user_id: String,
    pub email_address: String,
    pub full_name: String,
    pub phone_number: String,
}

impl UserDisplay {
    pub fn from_account(account: &UserAccount) -> Self {
        Self {
            user_id: account
                .id
                .map(|id| id.to_hex())
                .unwrap_or_default(),
            email_address: account.email_address.clone(),
            full_name: account.full_name.clone(),
            phone_number: account.phone_number.clone(),
        }
    }
}
