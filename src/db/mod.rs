//! Persistence layer: MongoDB client, typed collections, and the
//! `EntityStore` abstraction.

#[cfg(test)]
pub mod memory;
pub mod mongo;
pub mod schemas;

pub use mongo::{DeleteOutcome, EntityStore, IntoIndexes, MongoClient, MongoCollection, VaultDocument};
