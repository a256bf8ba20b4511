//! Vault backend binary

use clap::Parser;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vault_backend::{config::Args, db::MongoClient, server};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let args = Args::parse();

    let log_level = args.log_level.clone();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("vault_backend={},info", log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = args.validate() {
        error!("Configuration error: {}", e);
        std::process::exit(1);
    }

    info!("======================================");
    info!("  Vault Backend");
    info!("======================================");
    info!("Listen: {}", args.listen);
    info!("Database: {}", args.db_name);
    info!(
        "Mode: {}",
        if args.staging_mode { "STAGING" } else { "PRODUCTION" }
    );
    info!("Allowed origins: {}", args.allowed_origins().join(", "));
    info!("Session TTL: {}s", args.jwt_ttl_seconds);
    info!("======================================");

    let mongo = match MongoClient::new(&args.db_connection_string, &args.db_name).await {
        Ok(client) => client,
        Err(e) => {
            error!("MongoDB connection failed: {}", e);
            std::process::exit(1);
        }
    };

    let state = server::AppState::new(args, &mongo).await?;

    server::run(Arc::new(state)).await?;

    Ok(())
}
