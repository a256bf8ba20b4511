//! HTTP server entry points

pub mod http;

pub use http::{run, AppState};
