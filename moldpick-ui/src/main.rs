//! moldpick-ui - mold selector service entry point
//!
//! Picks a random silicone mold from a remote Supabase catalog, applies
//! category filters, and streams content and image fade transitions to
//! the UI shell over SSE.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use moldpick_common::config::{self, Config, Overrides};
use moldpick_ui::store::SupabaseStore;
use moldpick_ui::{build_router, AppState, ScreenController, SharedState};

/// Command-line arguments for moldpick-ui
#[derive(Parser, Debug)]
#[command(name = "moldpick-ui")]
#[command(about = "Mold selector microservice")]
#[command(version)]
struct Args {
    /// Supabase project URL
    #[arg(long, env = config::ENV_ENDPOINT_URL)]
    supabase_url: Option<String>,

    /// Supabase anon API key
    #[arg(long, env = config::ENV_API_KEY)]
    supabase_key: Option<String>,

    /// Catalog table name
    #[arg(long, env = config::ENV_TABLE)]
    table: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = config::ENV_PORT)]
    port: Option<u16>,

    /// Path to a TOML config file (overrides the default search)
    #[arg(long)]
    config_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "moldpick_ui=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Log build identification immediately after tracing init
    info!(
        "Starting moldpick-ui v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let args = Args::parse();

    let config = Config::resolve(Overrides {
        endpoint_url: args.supabase_url,
        api_key: args.supabase_key,
        table: args.table,
        port: args.port,
        config_file: args.config_file,
    })
    .context("Failed to resolve configuration")?;

    info!("Catalog table: {:?} at {}", config.table, config.endpoint_url);

    let store = Arc::new(
        SupabaseStore::new(&config.endpoint_url, &config.api_key, &config.table)
            .context("Failed to create catalog store")?,
    );

    let shared = Arc::new(SharedState::new());
    let controller = Arc::new(ScreenController::new(store, Arc::clone(&shared), &config));
    let state = AppState::new(shared, Arc::clone(&controller));

    let app = build_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    info!("moldpick-ui listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    // Stop any in-flight transitions before exiting
    controller.shutdown();

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
