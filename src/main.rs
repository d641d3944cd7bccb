use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use exercise_tracker_api::config::AppConfig;
use exercise_tracker_api::database::{DatabaseManager, MemoryUserStore, PgUserStore};
use exercise_tracker_api::types::StoreBackend;
use exercise_tracker_api::{app, AppState};

/// Command-line overrides on top of the environment
#[derive(Debug, Parser)]
#[command(name = "exercise-tracker-api", version, about = "Exercise tracker REST API")]
struct Args {
    #[arg(long, help = "Port to listen on (overrides PORT)")]
    port: Option<u16>,

    #[arg(long, help = "Address to bind (overrides HOST)")]
    host: Option<String>,

    #[arg(long, help = "Use the in-memory store regardless of DB_URI")]
    memory: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DB_URI, PORT, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,tower_http=info")),
        )
        .init();

    let args = Args::parse();
    let mut config = exercise_tracker_api::config::config().clone();
    apply_args(&mut config, &args);
    tracing::info!("Starting exercise tracker in {:?} mode", config.environment);

    let (state, database) = build_state(&config).await?;
    let router = app(state, &config);

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;
    tracing::info!("Your app is listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    if let Some(database) = database {
        database.close().await;
    }
    Ok(())
}

fn apply_args(config: &mut AppConfig, args: &Args) {
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(host) = &args.host {
        config.server.host = host.clone();
    }
    if args.memory {
        config.store.backend = StoreBackend::Memory;
    }
}

async fn build_state(config: &AppConfig) -> anyhow::Result<(AppState, Option<DatabaseManager>)> {
    match config.store.backend {
        StoreBackend::Memory => {
            tracing::info!("Using in-memory user store");
            Ok((AppState::new(MemoryUserStore::new()), None))
        }
        StoreBackend::Postgres => {
            let database = DatabaseManager::connect(&config.database)
                .await
                .context("failed to connect to database")?;
            database
                .ensure_schema()
                .await
                .context("failed to prepare users table")?;
            Ok((AppState::new(PgUserStore::new(database.pool())), Some(database)))
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
