//! Authentication for the vault backend
//!
//! Provides:
//! - Argon2 password hashing and verification
//! - JWT session token issuance and verification

pub mod jwt;
pub mod password;

pub use jwt::{extract_bearer_token, Claims, TokenIssuer, TokenSubject, TokenVerification};
pub use password::CredentialHasher;
