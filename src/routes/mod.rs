//! HTTP route handlers and shared response helpers
//!
//! Handlers take the request plus shared state and return a full response;
//! dispatch by method and path happens in `server::http`. Every response
//! carries CORS headers for the configured origins.

pub mod auth_routes;
pub mod data_routes;
pub mod health;

use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::{Request, Response, StatusCode};
use serde::{Deserialize, Serialize};

use crate::types::{Result, VaultError};

pub use auth_routes::handle_auth_request;
pub use data_routes::handle_data_request;
pub use health::health_check;

pub type BoxBody = http_body_util::combinators::BoxBody<Bytes, hyper::Error>;

/// Largest accepted JSON body. WASM payloads ride inside JSON, so this is
/// deliberately generous.
const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

const ALLOWED_METHODS: &str = "GET, POST, HEAD, DELETE, OPTIONS";
const ALLOWED_HEADERS: &str = "Content-Type, Authorization";

/// Uniform error body
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Allowed CORS origins, resolved once at startup from `Args`.
#[derive(Clone, Debug)]
pub struct CorsPolicy {
    allowed: Vec<String>,
}

impl CorsPolicy {
    pub fn new(allowed: Vec<String>) -> Self {
        Self { allowed }
    }

    /// Echo the request origin back only if it is on the allow list.
    /// Credentialed CORS forbids a wildcard, so the header always names the
    /// caller's own origin.
    pub fn resolve(&self, request_origin: Option<&str>) -> Option<String> {
        let origin = request_origin?;
        self.allowed
            .iter()
            .find(|allowed| allowed.as_str() == origin)
            .cloned()
    }
}

fn apply_cors(
    mut builder: hyper::http::response::Builder,
    origin: Option<&str>,
) -> hyper::http::response::Builder {
    if let Some(origin) = origin {
        builder = builder
            .header("Access-Control-Allow-Origin", origin)
            .header("Access-Control-Allow-Credentials", "true")
            .header("Vary", "Origin");
    }
    builder
}

pub fn full_body(data: impl Into<Bytes>) -> BoxBody {
    Full::new(data.into())
        .map_err(|never| match never {})
        .boxed()
}

pub fn empty_body() -> BoxBody {
    Full::new(Bytes::new())
        .map_err(|never| match never {})
        .boxed()
}

pub fn json_response<T: Serialize>(
    status: StatusCode,
    body: &T,
    origin: Option<&str>,
) -> Response<BoxBody> {
    let json = serde_json::to_string(body).unwrap_or_else(|_| "{}".to_string());

    apply_cors(Response::builder(), origin)
        .status(status)
        .header("Content-Type", "application/json")
        .body(full_body(json))
        .unwrap()
}

/// Map an operation error to its HTTP status and external message
pub fn error_response(err: &VaultError, origin: Option<&str>) -> Response<BoxBody> {
    json_response(
        err.status_code(),
        &ErrorBody {
            error: err.public_message(),
        },
        origin,
    )
}

pub fn no_content_response(origin: Option<&str>) -> Response<BoxBody> {
    apply_cors(Response::builder(), origin)
        .status(StatusCode::NO_CONTENT)
        .body(empty_body())
        .unwrap()
}

pub fn not_found_response(path: &str, origin: Option<&str>) -> Response<BoxBody> {
    json_response(
        StatusCode::NOT_FOUND,
        &ErrorBody {
            error: format!("No route for {}", path),
        },
        origin,
    )
}

pub fn cors_preflight(origin: Option<&str>) -> Response<BoxBody> {
    apply_cors(Response::builder(), origin)
        .status(StatusCode::NO_CONTENT)
        .header("Access-Control-Allow-Methods", ALLOWED_METHODS)
        .header("Access-Control-Allow-Headers", ALLOWED_HEADERS)
        .header("Access-Control-Max-Age", "86400")
        .body(empty_body())
        .unwrap()
}

/// Read and deserialize a JSON request body, bounded by `MAX_BODY_BYTES`
pub async fn parse_json_body<T: for<'de> Deserialize<'de>>(
    req: Request<hyper::body::Incoming>,
) -> Result<T> {
    let body = req
        .collect()
        .await
        .map_err(|e| VaultError::Http(format!("Failed to read body: {}", e)))?;

    let bytes = body.to_bytes();
    if bytes.len() > MAX_BODY_BYTES {
        return Err(VaultError::Http("Request body too large".into()));
    }

    serde_json::from_slice(&bytes).map_err(|e| VaultError::Http(format!("Invalid JSON: {}", e)))
}

/// Pull a single query parameter out of a request URI
pub fn query_param(uri: &hyper::Uri, key: &str) -> Option<String> {
    uri.query()?.split('&').find_map(|pair| {
        let (k, v) = pair.split_once('=')?;
        if k == key && !v.is_empty() {
            Some(v.to_string())
        } else {
            None
        }
    })
}

/// Project a stored document into its public JSON form.
///
/// BSON's `ObjectId` serializes to JSON as `{"$oid": "<hex>"}`; clients get
/// a flat `"id": "<hex>"` instead, matching the identifier format they send
/// back on delete.
pub fn to_public_json<T: Serialize>(entity: &T) -> Result<serde_json::Value> {
    let mut value = serde_json::to_value(entity)?;

    if let serde_json::Value::Object(ref mut map) = value {
        if let Some(id) = map.remove("_id") {
            let hex = id
                .get("$oid")
                .and_then(|v| v.as_str())
                .map(str::to_owned)
                .or_else(|| id.as_str().map(str::to_owned));
            if let Some(hex) = hex {
                map.insert("id".into(), serde_json::Value::String(hex));
            }
        }
    }

    Ok(value)
}

pub fn to_public_json_list<T: Serialize>(entities: &[T]) -> Result<serde_json::Value> {
    let values = entities
        .iter()
        .map(to_public_json)
        .collect::<Result<Vec<_>>>()?;
    Ok(serde_json::Value::Array(values))
}
