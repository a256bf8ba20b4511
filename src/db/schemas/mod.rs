//! Database schemas for the vault backend
//!
//! MongoDB document structures for user accounts and the marketplace
//! entity kinds.

mod datapool;
mod dataschema;
mod dataset;
mod user;
mod wasm_binary;

pub use datapool::{Datapool, DATAPOOL_COLLECTION};
pub use dataschema::{Dataschema, DATASCHEMA_COLLECTION};
pub use dataset::{Dataset, DATASET_COLLECTION};
pub use user::{UserAccount, UserDisplay, USER_COLLECTION};
pub use wasm_binary::{WasmBinary, WASM_BINARY_COLLECTION};
