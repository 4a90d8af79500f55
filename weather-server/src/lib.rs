//! HTTP server for the weather proxy and data CRUD API.
//!
//! This crate focuses on:
//! - Routing and request validation
//! - Mapping core errors to HTTP responses
//! - Process bootstrap and the top-level fault boundary

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use axum::{Router, middleware, routing::get};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use weather_core::{Config, Store, provider::default_provider_from_config};

pub mod error;
pub mod extract;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult, ErrorKind};
pub use state::AppState;

/// Build the application router with its collaborators wired in.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::index))
        .nest("/api", routes::api_router())
        .merge(routes::docs::router())
        .fallback(routes::not_found)
        .layer(middleware::map_response(routes::method_not_allowed))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Initialize logging. `RUST_LOG` wins over `default_level`.
pub fn init_logging(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}

/// Log any panic and terminate the process with status 1.
///
/// No in-process recovery is attempted; restarts belong to the supervisor.
pub fn install_fault_boundary() {
    std::panic::set_hook(Box::new(|info| {
        error!(fault = %info, "unrecoverable fault, exiting");
        std::process::exit(1);
    }));
}

/// Open the store, build the provider and serve until Ctrl-C.
pub async fn run(config: &Config) -> anyhow::Result<()> {
    let store = Store::connect(&config.database_url)
        .await
        .with_context(|| format!("Failed to open database '{}'", config.database_url))?;
    store.migrate().await.context("Failed to create database schema")?;

    let provider = default_provider_from_config(config)?;
    info!(provider = %config.default_provider_id()?, "weather provider ready");

    let app = create_router(AppState::new(store.clone(), Arc::from(provider)));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!("Server is running on port {}", config.port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server failed")?;

    store.close().await;
    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
}
