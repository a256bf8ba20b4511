//! Session token issuance and verification
//!
//! HS256-signed JWTs carrying the account's display claims. The signing
//! secret always comes from external configuration; the only built-in
//! secret is gated behind staging mode.

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::types::{Result, VaultError};

/// Default session lifetime: 15 minutes
pub const DEFAULT_TTL_SECONDS: u64 = 900;

/// Claims carried in a session token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Account id (hex ObjectId)
    pub sub: String,
    pub email_address: String,
    pub full_name: String,
    pub phone_number: String,
    /// Issued at (Unix timestamp)
    pub iat: u64,
    /// Expiration time (Unix timestamp)
    pub exp: u64,
}

/// Identity for which a token is issued
#[derive(Debug, Clone)]
pub struct TokenSubject {
    pub subject_id: String,
    pub email_address: String,
    pub full_name: String,
    pub phone_number: String,
}

/// Result of token verification
#[derive(Debug)]
pub enum TokenVerification {
    Valid(Claims),
    Expired,
    Invalid(String),
}

impl TokenVerification {
    pub fn claims(self) -> Option<Claims> {
        match self {
            Self::Valid(claims) => Some(claims),
            _ => None,
        }
    }
}

/// Session token issuer and verifier
#[derive(Clone)]
pub struct TokenIssuer {
    secret: String,
    ttl_seconds: u64,
}

impl TokenIssuer {
    /// Create a new issuer
    ///
    /// Returns an error if the secret is empty or shorter than 32 characters.
    pub fn new(secret: String, ttl_seconds: u64) -> Result<Self> {
        if secret.is_empty() {
            return Err(VaultError::Config("JWT secret must not be empty".into()));
        }

        if secret.len() < 32 {
            return Err(VaultError::Config(
                "JWT secret must be at least 32 characters".into(),
            ));
        }

        Ok(Self {
            secret,
            ttl_seconds,
        })
    }

    /// Create an issuer for staging mode (fixed local-only secret)
    pub fn staging(ttl_seconds: u64) -> Self {
        Self {
            secret: "staging-only-insecure-secret-0123456789ab".into(),
            ttl_seconds,
        }
    }

    /// Issue a signed token for a verified identity.
    ///
    /// Returns the token and its expiry timestamp.
    pub fn issue(&self, subject: TokenSubject) -> Result<(String, u64)> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| VaultError::Auth(format!("System time error: {}", e)))?
            .as_secs();

        let exp = now + self.ttl_seconds;
        let claims = Claims {
            sub: subject.subject_id,
            email_address: subject.email_address,
            full_name: subject.full_name,
            phone_number: subject.phone_number,
            iat: now,
            exp,
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| VaultError::Auth(format!("Failed to issue token: {}", e)))?;

        Ok((token, exp))
    }

    /// Verify and decode a session token
    pub fn verify(&self, token: &str) -> TokenVerification {
        let validation = Validation::default();

        match decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &validation,
        ) {
            Ok(data) => TokenVerification::Valid(data.claims),
            Err(err) => {
                use jsonwebtoken::errors::ErrorKind;
                match err.kind() {
                    ErrorKind::ExpiredSignature => TokenVerification::Expired,
                    ErrorKind::InvalidSignature => {
                        TokenVerification::Invalid("Invalid signature".into())
                    }
                    _ => TokenVerification::Invalid("Invalid token".into()),
                }
            }
        }
    }
}

/// Extract a bearer token from an Authorization header value
pub fn extract_bearer_token(auth_header: Option<&str>) -> Option<&str> {
    let token = auth_header?.strip_prefix("Bearer ")?.trim();
    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_issuer() -> TokenIssuer {
        TokenIssuer::new(
            "test-secret-that-is-at-least-32-characters-long".into(),
            DEFAULT_TTL_SECONDS,
        )
        .unwrap()
    }

    fn test_subject() -> TokenSubject {
        TokenSubject {
            subject_id: "64b1f0a2c3d4e5f601234567".into(),
            email_address: "a@x.com".into(),
            full_name: "Ada Lovelace".into(),
            phone_number: "+440000000000".into(),
        }
    }

    #[test]
    fn test_issue_and_verify() {
        let issuer = test_issuer();
        let (token, exp) = issuer.issue(test_subject()).unwrap();
        assert!(!token.is_empty());

        let claims = issuer.verify(&token).claims().unwrap();
        assert_eq!(claims.sub, "64b1f0a2c3d4e5f601234567");
        assert_eq!(claims.email_address, "a@x.com");
        assert_eq!(claims.full_name, "Ada Lovelace");
        assert_eq!(claims.exp, exp);
        assert_eq!(claims.exp - claims.iat, DEFAULT_TTL_SECONDS);
    }

    #[test]
    fn test_garbage_token_invalid() {
        let issuer = test_issuer();
        assert!(matches!(
            issuer.verify("not-a-token"),
            TokenVerification::Invalid(_)
        ));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let issuer1 = test_issuer();
        let issuer2 = TokenIssuer::new(
            "different-secret-that-is-at-least-32-chars".into(),
            DEFAULT_TTL_SECONDS,
        )
        .unwrap();

        let (token, _) = issuer1.issue(test_subject()).unwrap();
        assert!(issuer2.verify(&token).claims().is_none());
    }

    #[test]
    fn test_expired_token() {
        // jsonwebtoken's default validation has 60s leeway, so back-date
        // beyond it
        let issuer = test_issuer();
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs();
        let claims = Claims {
            sub: "64b1f0a2c3d4e5f601234567".into(),
            email_address: "a@x.com".into(),
            full_name: "Ada".into(),
            phone_number: "".into(),
            iat: now - 7200,
            exp: now - 3600,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(issuer.secret.as_bytes()),
        )
        .unwrap();

        assert!(matches!(issuer.verify(&token), TokenVerification::Expired));
    }

    #[test]
    fn test_secret_validation() {
        assert!(TokenIssuer::new("short".into(), 900).is_err());
        assert!(TokenIssuer::new("".into(), 900).is_err());
        assert!(TokenIssuer::new("this-secret-is-at-least-32-chars-long".into(), 900).is_ok());
    }

    #[test]
    fn test_extract_bearer_token() {
        assert_eq!(extract_bearer_token(Some("Bearer abc123")), Some("abc123"));
        assert_eq!(extract_bearer_token(Some("Bearer ")), None);
        assert_eq!(extract_bearer_token(Some("Basic abc123")), None);
        assert_eq!(extract_bearer_token(None), None);
    }
}
