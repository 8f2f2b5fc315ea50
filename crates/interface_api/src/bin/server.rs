//! Insurance Ledger - API Server Binary
//!
//! Starts the HTTP API over either a PostgreSQL ledger or an in-memory one.
//!
//! # Usage
//!
//! ```bash
//! # In-memory ledger, default configuration
//! cargo run --bin insurance-ledger
//!
//! # PostgreSQL ledger, JSON logs
//! API_DATABASE_URL=postgres://... API_LOG_FORMAT=json cargo run --bin insurance-ledger
//! ```
//!
//! # Environment Variables
//!
//! * `API_HOST` - Server host (default: 0.0.0.0)
//! * `API_PORT` - Server port (default: 8080)
//! * `API_DATABASE_URL` - PostgreSQL connection string; unset keeps the ledger in memory
//! * `API_MAX_CONNECTIONS` - Database pool size (default: 10)
//! * `API_LOG_LEVEL` - Log level: trace, debug, info, warn, error (default: info)
//! * `API_LOG_FORMAT` - `pretty` or `json` (default: pretty)
//! * `API_STRICT_CLAIM_AMOUNT` - Reject non-numeric claim amounts (default: false)

use anyhow::Context;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use core_kernel::LedgerStore;
use infra_ledger::{create_pool, run_migrations, DatabaseConfig, InMemoryLedgerStore, PgLedgerStore};
use insurance_contract::InsuranceContract;
use interface_api::{
    config::{ApiConfig, LogFormat},
    create_router,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (useful for local development)
    dotenvy::dotenv().ok();

    let config = ApiConfig::from_env().context("Invalid API configuration")?;

    init_tracing(&config.log_level, config.log_format);

    tracing::info!(
        host = %config.host,
        port = %config.port,
        strict_claim_amount = config.strict_claim_amount,
        "Starting insurance ledger API server"
    );

    let store = open_ledger_store(&config).await?;
    let contract = InsuranceContract::with_config(store, config.contract_config());

    let app = create_router(contract);

    let addr: SocketAddr = config
        .server_addr()
        .parse()
        .with_context(|| format!("Invalid server address {}", config.server_addr()))?;

    tracing::info!(%addr, "Server listening");

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// `RUST_LOG` takes precedence over the configured level.
fn init_tracing(log_level: &str, format: LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json().with_current_span(true))
            .init(),
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer().with_target(true))
            .init(),
    }
}

/// Opens the ledger store the configuration points at.
///
/// # Errors
///
/// Returns error if the database is unreachable or the migration fails
async fn open_ledger_store(config: &ApiConfig) -> anyhow::Result<Arc<dyn LedgerStore>> {
    let Some(url) = config.database_url.as_deref() else {
        tracing::warn!("API_DATABASE_URL not set, ledger is kept in memory and lost on exit");
        return Ok(Arc::new(InMemoryLedgerStore::new()));
    };

    tracing::info!("Connecting to database...");
    let pool = create_pool(DatabaseConfig::new(url).max_connections(config.max_connections))
        .await
        .context("Failed to connect to the ledger database")?;

    tracing::info!("Running database migrations...");
    run_migrations(&pool)
        .await
        .context("Failed to migrate the ledger database")?;

    tracing::info!("Database ready");
    Ok(Arc::new(PgLedgerStore::new(pool)))
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
