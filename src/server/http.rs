//! HTTP server
//!
//! hyper http1 accept loop with hand-rolled method/path dispatch. Each
//! connection runs on its own task; shared state travels behind an `Arc`.

use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Method, Request, Response};
use hyper_util::rt::TokioIo;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{debug, error, info};

use crate::auth::{CredentialHasher, TokenIssuer};
use crate::config::Args;
use crate::db::schemas::{Datapool, Dataschema, Dataset, UserAccount, WasmBinary};
use crate::db::{EntityStore, MongoClient};
use crate::routes::{self, BoxBody, CorsPolicy};
use crate::types::{Result, VaultError};

/// Shared application state
pub struct AppState {
    pub args: Args,
    pub hasher: CredentialHasher,
    pub tokens: TokenIssuer,
    pub cors: CorsPolicy,
    pub users: Arc<dyn EntityStore<UserAccount>>,
    pub datasets: Arc<dyn EntityStore<Dataset>>,
    pub datapools: Arc<dyn EntityStore<Datapool>>,
    pub dataschemas: Arc<dyn EntityStore<Dataschema>>,
    pub wasm_binaries: Arc<dyn EntityStore<WasmBinary>>,
}

impl AppState {
    /// Build application state from validated configuration, wiring each
    /// entity kind to its MongoDB collection.
    pub async fn new(args: Args, mongo: &MongoClient) -> Result<Self> {
        let tokens = match &args.jwt_secret {
            Some(secret) => TokenIssuer::new(secret.clone(), args.jwt_ttl_seconds)?,
            None if args.staging_mode => TokenIssuer::staging(args.jwt_ttl_seconds),
            None => {
                return Err(VaultError::Config(
                    "JWT secret is required outside staging mode".into(),
                ))
            }
        };

        let cors = CorsPolicy::new(args.allowed_origins());

        Ok(Self {
            hasher: CredentialHasher::new(),
            tokens,
            cors,
            args,
            users: Arc::new(mongo.collection::<UserAccount>().await?),
            datasets: Arc::new(mongo.collection::<Dataset>().await?),
            datapools: Arc::new(mongo.collection::<Datapool>().await?),
            dataschemas: Arc::new(mongo.collection::<Dataschema>().await?),
            wasm_binaries: Arc::new(mongo.collection::<WasmBinary>().await?),
        })
    }
}

/// Accept loop. Runs until the process is stopped.
pub async fn run(state: Arc<AppState>) -> Result<()> {
    let listener = TcpListener::bind(state.args.listen).await?;

    info!("Vault backend listening on {}", state.args.listen);
    if state.args.staging_mode {
        info!("Staging mode enabled");
    }

    loop {
        match listener.accept().await {
            Ok((stream, addr)) => {
                let state = Arc::clone(&state);
                tokio::spawn(async move {
                    let io = TokioIo::new(stream);

                    let service = service_fn(move |req| {
                        let state = Arc::clone(&state);
                        async move { handle_request(state, addr, req).await }
                    });

                    if let Err(err) = http1::Builder::new().serve_connection(io, service).await {
                        error!("Error serving connection from {}: {:?}", addr, err);
                    }
                });
            }
            Err(e) => {
                error!("Error accepting connection: {:?}", e);
            }
        }
    }
}

/// Route incoming HTTP requests
async fn handle_request(
    state: Arc<AppState>,
    addr: SocketAddr,
    req: Request<Incoming>,
) -> std::result::Result<Response<BoxBody>, hyper::Error> {
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let request_origin = req
        .headers()
        .get(hyper::header::ORIGIN)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);
    let origin = state.cors.resolve(request_origin.as_deref());

    debug!("[{}] {} {}", addr, method, path);

    if method == Method::OPTIONS {
        return Ok(routes::cors_preflight(origin.as_deref()));
    }

    if method == Method::GET && path == "/health" {
        return Ok(routes::health_check(origin.as_deref()));
    }

    if path.starts_with("/auth") {
        if let Some(response) =
            routes::handle_auth_request(req, Arc::clone(&state), origin.as_deref()).await
        {
            return Ok(response);
        }
        return Ok(routes::not_found_response(&path, origin.as_deref()));
    }

    if let Some(response) =
        routes::handle_data_request(req, Arc::clone(&state), origin.as_deref()).await
    {
        return Ok(response);
    }

    Ok(routes::not_found_response(&path, origin.as_deref()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::memory::MemoryStore;
    use clap::Parser;

    /// State must carry the parsed configuration; `run` reads the listen
    /// address and staging flag from it after construction.
    #[test]
    fn test_state_carries_config() {
        let args = Args::parse_from(["vault-backend"]);

        let state = AppState {
            hasher: CredentialHasher::new(),
            tokens: TokenIssuer::staging(args.jwt_ttl_seconds),
            cors: CorsPolicy::new(args.allowed_origins()),
            users: Arc::new(MemoryStore::new()),
            datasets: Arc::new(MemoryStore::new()),
            datapools: Arc::new(MemoryStore::new()),
            dataschemas: Arc::new(MemoryStore::new()),
            wasm_binaries: Arc::new(MemoryStore::new()),
            args,
        };

        assert_eq!(state.args.listen.port(), 8080);
        assert!(state
            .cors
            .resolve(Some(state.args.primary_origin.as_str()))
            .is_some());
    }
}
