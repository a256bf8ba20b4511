//! Password hashing and verification using Argon2
//!
//! Uses the argon2id variant. The hasher is constructed once at startup and
//! passed into the auth operations, so tests can use cheaper parameters.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::types::{Result, VaultError};

/// Argon2id credential hasher
#[derive(Clone, Default)]
pub struct CredentialHasher {
    argon2: Argon2<'static>,
}

impl CredentialHasher {
    /// Create a hasher with the argon2 crate's recommended parameters
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a hasher with explicit parameters (cheap ones for tests)
    pub fn with_params(params: argon2::Params) -> Self {
        Self {
            argon2: Argon2::new(
                argon2::Algorithm::Argon2id,
                argon2::Version::V0x13,
                params,
            ),
        }
    }

    /// Hash a password with a fresh random salt.
    ///
    /// Returns the PHC-formatted digest string that embeds the salt and
    /// parameters. Two calls on the same input produce different digests.
    pub fn hash(&self, password: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|digest| digest.to_string())
            .map_err(|e| VaultError::Auth(format!("Failed to hash password: {e}")))
    }

    /// Verify a password against a stored digest.
    ///
    /// A digest that does not parse as a PHC string verifies as false rather
    /// than surfacing an error, so callers cannot distinguish a malformed
    /// stored digest from a wrong password.
    pub fn verify(&self, password: &str, digest: &str) -> bool {
        let parsed = match PasswordHash::new(digest) {
            Ok(p) => p,
            Err(_) => return false,
        };

        self.argon2
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Low-cost parameters so the test suite stays fast
    fn test_hasher() -> CredentialHasher {
        CredentialHasher::with_params(
            argon2::Params::new(1024, 1, 1, None).expect("valid test params"),
        )
    }

    #[test]
    fn test_hash_and_verify() {
        let hasher = test_hasher();
        let password = "correct-horse-battery-staple";
        let digest = hasher.hash(password).unwrap();

        // Digest should be in PHC format
        assert!(digest.starts_with("$argon2"));

        assert!(hasher.verify(password, &digest));
        assert!(!hasher.verify("wrong-password", &digest));
    }

    #[test]
    fn test_different_salts() {
        let hasher = test_hasher();
        let password = "same-password";
        let digest1 = hasher.hash(password).unwrap();
        let digest2 = hasher.hash(password).unwrap();

        // Same password should produce different digests (different salts)
        assert_ne!(digest1, digest2);

        assert!(hasher.verify(password, &digest1));
        assert!(hasher.verify(password, &digest2));
    }

    #[test]
    fn test_malformed_digest_verifies_false() {
        let hasher = test_hasher();

        // Legacy or corrupt digests must fail verification, not error
        assert!(!hasher.verify("password", "not-a-valid-digest"));
        assert!(!hasher.verify("password", ""));
        assert!(!hasher.verify("password", "$2b$12$bcrypt-shaped-but-not-argon2"));
    }

    #[test]
    fn test_digest_not_plaintext() {
        let hasher = test_hasher();
        let digest = hasher.hash("p1").unwrap();
        assert!(!digest.contains("p1$") && digest != "p1");
    }
}
