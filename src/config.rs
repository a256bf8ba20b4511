//! Configuration for the vault backend
//!
//! CLI arguments and environment variable handling using clap.

use clap::Parser;
use std::net::SocketAddr;

/// Vault backend - wallet-scoped data marketplace storage
#[derive(Parser, Debug, Clone)]
#[command(name = "vault-backend")]
#[command(about = "HTTP backend for the vault data marketplace")]
pub struct Args {
    /// Address to listen on
    #[arg(long, env = "LISTEN", default_value = "0.0.0.0:8080")]
    pub listen: SocketAddr,

    /// MongoDB connection string
    #[arg(
        long,
        env = "VAULT_DB_CONNECTION_STRING",
        default_value = "mongodb://localhost:27017"
    )]
    pub db_connection_string: String,

    /// MongoDB database name
    #[arg(long, env = "VAULT_DB_NAME", default_value = "vault")]
    pub db_name: String,

    /// Primary allowed CORS origin (e.g. "https://vault.example.com")
    #[arg(long, env = "PRIMARY_ORIGIN", default_value = "http://localhost:4200")]
    pub primary_origin: String,

    /// Enable staging mode (relaxed JWT secret requirement, extra localhost origin)
    #[arg(long, env = "STAGING_MODE", default_value = "false")]
    pub staging_mode: bool,

    /// JWT secret for session token signing (required outside staging mode)
    #[arg(long, env = "JWT_SECRET")]
    pub jwt_secret: Option<String>,

    /// Session token lifetime in seconds
    #[arg(long, env = "JWT_TTL_SECONDS", default_value = "900")]
    pub jwt_ttl_seconds: u64,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

impl Args {
    /// Allowed CORS origins. Staging mode additionally permits the local
    /// Angular dev server.
    pub fn allowed_origins(&self) -> Vec<String> {
        let mut origins = vec![self.primary_origin.clone()];
        if self.staging_mode {
            origins.push("http://localhost:4200".to_string());
        }
        origins.dedup();
        origins
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if !self.staging_mode {
            match &self.jwt_secret {
                None => return Err("JWT_SECRET is required outside staging mode".to_string()),
                Some(s) if s.len() < 32 => {
                    return Err("JWT_SECRET must be at least 32 characters".to_string())
                }
                Some(_) => {}
            }
        }

        if self.jwt_ttl_seconds == 0 {
            return Err("JWT_TTL_SECONDS must be greater than zero".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_args() -> Args {
        Args::parse_from(["vault-backend"])
    }

    #[test]
    fn test_missing_secret_rejected_outside_staging() {
        let args = base_args();
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_short_secret_rejected() {
        let mut args = base_args();
        args.jwt_secret = Some("too-short".into());
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_staging_mode_allows_missing_secret() {
        let mut args = base_args();
        args.staging_mode = true;
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_staging_mode_adds_localhost_origin() {
        let mut args = base_args();
        args.primary_origin = "https://vault.example.com".into();
        args.staging_mode = true;
        let origins = args.allowed_origins();
        assert!(origins.contains(&"https://vault.example.com".to_string()));
        assert!(origins.contains(&"http://localhost:4200".to_string()));
    }
}
