//! Authentication routes
//!
//! - POST /auth/create — register a new account
//! - POST /auth/login  — authenticate and receive a session token
//! - GET  /auth/me     — decode the caller's session token

use hyper::{Method, Request, Response, StatusCode};
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

use crate::auth::{extract_bearer_token, TokenSubject, TokenVerification};
use crate::db::schemas::UserDisplay;
use crate::ops::auth_ops::{self, AuthenticateUser, CreateNewUser};
use crate::routes::{error_response, json_response, parse_json_body, BoxBody, ErrorBody};
use crate::server::AppState;

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub expires_at: u64,
    pub user: UserDisplay,
}

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub user_id: String,
    pub email_address: String,
    pub full_name: String,
    pub phone_number: String,
    pub expires_at: u64,
}

/// Dispatch /auth/* requests. Returns `None` for paths this module does not
/// serve.
pub async fn handle_auth_request(
    req: Request<hyper::body::Incoming>,
    state: Arc<AppState>,
    origin: Option<&str>,
) -> Option<Response<BoxBody>> {
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    match (method, path.as_str()) {
        (Method::POST, "/auth/create") => Some(handle_create(req, state, origin).await),
        (Method::POST, "/auth/login") => Some(handle_login(req, state, origin).await),
        (Method::GET, "/auth/me") => Some(handle_me(&req, state, origin)),
        _ => None,
    }
}

async fn handle_create(
    req: Request<hyper::body::Incoming>,
    state: Arc<AppState>,
    origin: Option<&str>,
) -> Response<BoxBody> {
    let params: CreateNewUser = match parse_json_body(req).await {
        Ok(p) => p,
        Err(e) => return error_response(&e, origin),
    };

    let email = params.email_address.clone();
    match auth_ops::register(state.users.as_ref(), &state.hasher, params).await {
        Ok(display) => {
            info!("Registered account for {}", email);
            json_response(StatusCode::CREATED, &display, origin)
        }
        Err(e) => {
            warn!("Registration failed for {}: {}", email, e);
            error_response(&e, origin)
        }
    }
}

async fn handle_login(
    req: Request<hyper::body::Incoming>,
    state: Arc<AppState>,
    origin: Option<&str>,
) -> Response<BoxBody> {
    let params: AuthenticateUser = match parse_json_body(req).await {
        Ok(p) => p,
        Err(e) => return error_response(&e, origin),
    };

    let email = params.email_address.clone();
    let account = match auth_ops::authenticate(state.users.as_ref(), &state.hasher, params).await {
        Ok(a) => a,
        Err(e) => {
            warn!("Login rejected for {}: {}", email, e);
            return error_response(&e, origin);
        }
    };

    let display = UserDisplay::from_account(&account);
    let subject = TokenSubject {
        subject_id: display.user_id.clone(),
        email_address: display.email_address.clone(),
        full_name: display.full_name.clone(),
        phone_number: display.phone_number.clone(),
    };

    match state.tokens.issue(subject) {
        Ok((token, expires_at)) => {
            info!("Issued session token for {}", email);
            json_response(
                StatusCode::OK,
                &LoginResponse {
                    token,
                    expires_at,
                    user: display,
                },
                origin,
            )
        }
        Err(e) => error_response(&e, origin),
    }
}

fn handle_me(
    req: &Request<hyper::body::Incoming>,
    state: Arc<AppState>,
    origin: Option<&str>,
) -> Response<BoxBody> {
    let auth_header = req
        .headers()
        .get(hyper::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    let token = match extract_bearer_token(auth_header) {
        Some(t) => t,
        None => {
            return json_response(
                StatusCode::UNAUTHORIZED,
                &ErrorBody {
                    error: "Missing bearer token".into(),
                },
                origin,
            )
        }
    };

    match state.tokens.verify(token) {
        TokenVerification::Valid(claims) => json_response(
            StatusCode::OK,
            &MeResponse {
                user_id: claims.sub,
                email_address: claims.email_address,
                full_name: claims.full_name,
                phone_number: claims.phone_number,
                expires_at: claims.exp,
            },
            origin,
        ),
        TokenVerification::Expired => json_response(
            StatusCode::UNAUTHORIZED,
            &ErrorBody {
                error: "Session expired".into(),
            },
            origin,
        ),
        TokenVerification::Invalid(reason) => json_response(
            StatusCode::UNAUTHORIZED,
            &ErrorBody { error: reason },
            origin,
        ),
    }
}
