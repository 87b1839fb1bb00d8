use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use triptych_api::{
    auth::{AuthGate, JwksKeySource},
    config::AppConfig,
    database::{DatabaseManager, MemoryStore, Stores},
    router, AppState,
};

/// Trivia, coffee shop and venue booking API
#[derive(Debug, Parser)]
#[command(name = "triptych-api", version, about)]
struct Args {
    /// Address to bind
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    host: String,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = 5000)]
    port: u16,

    /// Serve from an in-memory store instead of PostgreSQL
    #[arg(long, env = "TRIPTYCH_MEMORY_STORE")]
    memory: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, AUTH0_DOMAIN, etc.
    dotenvy::dotenv().ok();

    init_logging();

    let args = Args::parse();
    let config = AppConfig::from_env().context("invalid configuration")?;
    info!("Starting triptych-api in {:?} mode", config.environment);

    let (stores, manager) = if args.memory {
        warn!("Using the in-memory store; nothing will be persisted");
        (Stores::memory(&MemoryStore::new()), None)
    } else {
        let manager = DatabaseManager::connect(&config.database)
            .await
            .context("failed to connect to the database")?;
        manager
            .bootstrap_schema()
            .await
            .context("failed to create the schema")?;
        (Stores::postgres(manager.pool().clone()), Some(manager))
    };

    let jwks_url = config.auth.jwks_url()?;
    info!(issuer = %config.auth.issuer(), jwks = %jwks_url, "Verifying bearer tokens");
    let keys = JwksKeySource::new(jwks_url, Duration::from_secs(config.auth.jwks_ttl_secs));
    let gate = AuthGate::from_config(&config.auth, std::sync::Arc::new(keys));

    let app = router(AppState::new(config, stores, gate));

    let addr: SocketAddr = format!("{}:{}", args.host, args.port)
        .parse()
        .with_context(|| format!("invalid bind address {}:{}", args.host, args.port))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    info!("Listening on http://{}", addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    if let Some(manager) = manager {
        manager.close().await;
    }
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("triptych_api=info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
