//! Account registration and authentication

use bson::doc;
use serde::Deserialize;

use crate::auth::CredentialHasher;
use crate::db::{
    schemas::{UserAccount, UserDisplay},
    EntityStore,
};
use crate::types::{Result, VaultError};

/// Registration parameters
#[derive(Debug, Clone, Deserialize)]
pub struct CreateNewUser {
    pub email_address: String,
    pub full_name: String,
    pub phone_number: String,
    pub password: String,
}

/// Login parameters
#[derive(Debug, Clone, Deserialize)]
pub struct AuthenticateUser {
    pub email_address: String,
    pub password: String,
}

/// Register a new account.
///
/// The email address must not already be registered; the duplicate check
/// runs before the password is hashed, so a rejected registration never
/// pays the hashing cost. Returns the display projection of the new
/// account, never the stored record with its digest.
pub async fn register<S>(
    store: &S,
    hasher: &CredentialHasher,
    params: CreateNewUser,
) -> Result<UserDisplay>
where
    S: EntityStore<UserAccount> + ?Sized,
{
    let existing = store
        .find_one(doc! { "email_address": &params.email_address })
        .await?;
    if existing.is_some() {
        return Err(VaultError::DuplicateIdentity);
    }

    let digest = hasher.hash(&params.password)?;
    let mut account = UserAccount::new(
        params.email_address,
        params.full_name,
        params.phone_number,
        digest,
    );

    let id = store.save(account.clone()).await?;
    account.id = Some(id);
    Ok(UserDisplay::from_account(&account))
}

/// Authenticate an email/password pair.
///
/// Returns the full stored account on success so the caller can issue a
/// session token from it. Unknown addresses and wrong passwords surface
/// as distinct internal errors; both collapse to the same external
/// message.
pub async fn authenticate<S>(
    store: &S,
    hasher: &CredentialHasher,
    params: AuthenticateUser,
) -> Result<UserAccount>
where
    S: EntityStore<UserAccount> + ?Sized,
{
    let account = store
        .find_one(doc! { "email_address": &params.email_address })
        .await?
        .ok_or(VaultError::UnknownIdentity)?;

    if !hasher.verify(&params.password, &account.password_digest) {
        return Err(VaultError::InvalidCredential);
    }

    Ok(account)
}
