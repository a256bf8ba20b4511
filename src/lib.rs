//! Vault backend library
//!
//! HTTP backend for a wallet-scoped data marketplace: datasets, datapools,
//! data schemas and WASM binaries, with email/password authentication and
//! JWT sessions, persisted to MongoDB.

pub mod auth;
pub mod config;
pub mod db;
pub mod ops;
pub mod routes;
pub mod server;
pub mod types;

pub use config::Args;
pub use server::AppState;
pub use types::{Result, VaultError};
