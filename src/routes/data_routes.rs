//! Entity routes: datasets, datapools, dataschemas, WASM binaries
//!
//! Listing is scoped by the owner key where the entity has one; creation
//! returns the persisted record with its assigned id; deletion takes the id
//! in the request body and answers 204 on success.

use hyper::{Method, Request, Response, StatusCode};
use serde::Serialize;
use std::sync::Arc;
use tracing::warn;

use crate::ops::{self, DeleteRequest};
use crate::routes::{
    error_response, json_response, no_content_response, parse_json_body, query_param,
    to_public_json, to_public_json_list, BoxBody, ErrorBody,
};
use crate::server::AppState;
use crate::types::Result;

/// Dispatch entity requests. Returns `None` for paths this module does not
/// serve.
pub async fn handle_data_request(
    req: Request<hyper::body::Incoming>,
    state: Arc<AppState>,
    origin: Option<&str>,
) -> Option<Response<BoxBody>> {
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let response = match (method, path.as_str()) {
        // Datasets
        (Method::GET, "/datasets") => {
            let wallet_id = match require_param(&req, "wallet_id", origin) {
                Ok(w) => w,
                Err(resp) => return Some(resp),
            };
            list_response(
                ops::dataset::datasets(state.datasets.as_ref(), &wallet_id).await,
                origin,
            )
        }
        (Method::POST, "/dataset/create") => {
            let params = match parse_json_body(req).await {
                Ok(p) => p,
                Err(e) => return Some(error_response(&e, origin)),
            };
            created_response(
                ops::dataset::create_dataset(state.datasets.as_ref(), params).await,
                origin,
            )
        }
        (Method::DELETE, "/dataset") => {
            let params: DeleteRequest = match parse_json_body(req).await {
                Ok(p) => p,
                Err(e) => return Some(error_response(&e, origin)),
            };
            deleted_response(
                ops::dataset::delete_dataset(state.datasets.as_ref(), &params).await,
                origin,
            )
        }

        // Datapools
        (Method::GET, "/datapools") => {
            let wallet_id = match require_param(&req, "wallet_id", origin) {
                Ok(w) => w,
                Err(resp) => return Some(resp),
            };
            list_response(
                ops::datapool::datapools(state.datapools.as_ref(), &wallet_id).await,
                origin,
            )
        }
        (Method::POST, "/datapool/create") => {
            let params = match parse_json_body(req).await {
                Ok(p) => p,
                Err(e) => return Some(error_response(&e, origin)),
            };
            created_response(
                ops::datapool::create_datapool(state.datapools.as_ref(), params).await,
                origin,
            )
        }
        (Method::POST, "/datapool/update") => {
            let params = match parse_json_body(req).await {
                Ok(p) => p,
                Err(e) => return Some(error_response(&e, origin)),
            };
            created_response(
                ops::datapool::update_datapool(state.datapools.as_ref(), params).await,
                origin,
            )
        }
        (Method::DELETE, "/datapool") => {
            let params: DeleteRequest = match parse_json_body(req).await {
                Ok(p) => p,
                Err(e) => return Some(error_response(&e, origin)),
            };
            deleted_response(
                ops::datapool::delete_datapool(state.datapools.as_ref(), &params).await,
                origin,
            )
        }

        // Dataschemas
        (Method::GET, "/dataschemas") => list_response(
            ops::dataschema::dataschemas(state.dataschemas.as_ref()).await,
            origin,
        ),
        (Method::POST, "/dataschema/create") => {
            let params = match parse_json_body(req).await {
                Ok(p) => p,
                Err(e) => return Some(error_response(&e, origin)),
            };
            created_response(
                ops::dataschema::create_dataschema(state.dataschemas.as_ref(), params).await,
                origin,
            )
        }
        (Method::DELETE, "/dataschema") => {
            let params: DeleteRequest = match parse_json_body(req).await {
                Ok(p) => p,
                Err(e) => return Some(error_response(&e, origin)),
            };
            deleted_response(
                ops::dataschema::delete_dataschema(state.dataschemas.as_ref(), &params).await,
                origin,
            )
        }

        // WASM binaries
        (Method::GET, "/wasm") => {
            let name = match require_param(&req, "name", origin) {
                Ok(n) => n,
                Err(resp) => return Some(resp),
            };
            list_response(
                ops::wasm::get_wasm_binaries(state.wasm_binaries.as_ref(), &name).await,
                origin,
            )
        }
        (Method::POST, "/wasm") => {
            let params = match parse_json_body(req).await {
                Ok(p) => p,
                Err(e) => return Some(error_response(&e, origin)),
            };
            created_response(
                ops::wasm::create_wasm_binary(state.wasm_binaries.as_ref(), params).await,
                origin,
            )
        }
        (Method::DELETE, "/wasm") => {
            let params: DeleteRequest = match parse_json_body(req).await {
                Ok(p) => p,
                Err(e) => return Some(error_response(&e, origin)),
            };
            deleted_response(
                ops::wasm::delete_wasm_binary(state.wasm_binaries.as_ref(), &params).await,
                origin,
            )
        }

        _ => return None,
    };

    Some(response)
}

fn require_param(
    req: &Request<hyper::body::Incoming>,
    key: &str,
    origin: Option<&str>,
) -> std::result::Result<String, Response<BoxBody>> {
    query_param(req.uri(), key).ok_or_else(|| {
        json_response(
            StatusCode::BAD_REQUEST,
            &ErrorBody {
                error: format!("Missing required query parameter: {}", key),
            },
            origin,
        )
    })
}

fn list_response<T: Serialize>(result: Result<Vec<T>>, origin: Option<&str>) -> Response<BoxBody> {
    match result.and_then(|items| to_public_json_list(&items)) {
        Ok(json) => json_response(StatusCode::OK, &json, origin),
        Err(e) => {
            warn!("List request failed: {}", e);
            error_response(&e, origin)
        }
    }
}

fn created_response<T: Serialize>(result: Result<T>, origin: Option<&str>) -> Response<BoxBody> {
    match result.and_then(|entity| to_public_json(&entity)) {
        Ok(json) => json_response(StatusCode::CREATED, &json, origin),
        Err(e) => {
            warn!("Create request failed: {}", e);
            error_response(&e, origin)
        }
    }
}

fn deleted_response(result: Result<()>, origin: Option<&str>) -> Response<BoxBody> {
    match result {
        Ok(()) => no_content_response(origin),
        Err(e) => {
            warn!("Delete request failed: {}", e);
            error_response(&e, origin)
        }
    }
}
