//! Error types for the vault backend

use hyper::StatusCode;

/// Main error type for vault operations
#[derive(Debug, thiserror::Error)]
pub enum VaultError {
    /// Identifier was not a 24-character hex string
    #[error("Malformed identifier: {0}")]
    MalformedIdentifier(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// Registration attempted with an email address already on file
    #[error("An account with this email address already exists")]
    DuplicateIdentity,

    /// No account for the given email address
    #[error("Unknown identity")]
    UnknownIdentity,

    /// Password verification failed
    #[error("Invalid credential")]
    InvalidCredential,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl VaultError {
    /// Convert error to HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::MalformedIdentifier(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::DuplicateIdentity => StatusCode::CONFLICT,
            Self::UnknownIdentity => StatusCode::UNAUTHORIZED,
            Self::InvalidCredential => StatusCode::UNAUTHORIZED,
            Self::Database(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Auth(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Http(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to surface to the caller.
    ///
    /// Both authentication failures collapse into one external message so
    /// responses do not reveal which email addresses are registered.
    pub fn public_message(&self) -> String {
        match self {
            Self::UnknownIdentity | Self::InvalidCredential => {
                "Invalid email address or password".to_string()
            }
            Self::Database(_) => "Database unavailable".to_string(),
            Self::Auth(_) | Self::Config(_) | Self::Internal(_) => {
                "Internal server error".to_string()
            }
            other => other.to_string(),
        }
    }
}

impl From<std::io::Error> for VaultError {
    fn from(err: std::io::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

impl From<serde_json::Error> for VaultError {
    fn from(err: serde_json::Error) -> Self {
        Self::Http(format!("JSON error: {}", err))
    }
}

/// Result type alias for vault operations
pub type Result<T> = std::result::Result<T, VaultError>;
