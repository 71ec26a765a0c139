//! Server setup and initialization
//!
//! Provides the main application builder and server runner.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use club_common::{AppConfig, AppError, SessionService, StorageBackend};
use club_db::{create_pool, run_migrations, MemoryStore};
use club_service::ServiceContext;
use tokio::net::TcpListener;
use tracing::info;

use crate::middleware::{apply_middleware, apply_middleware_with_config};
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
///
/// Health routes get tracing but no rate limit.
///
/// # Errors
/// Returns an error if the middleware configuration is invalid
pub fn create_app(state: AppState) -> Result<Router, AppError> {
    let config = state.config();
    let pages = apply_middleware_with_config(
        create_router(),
        &config.rate_limit,
        &config.cors,
        config.app.env.is_production(),
    )?;
    let health = apply_middleware(health_routes());

    Ok(pages.merge(health).with_state(state))
}

/// Initialize all dependencies and create AppState
///
/// # Errors
/// Returns an error if the database is unreachable or migrations fail
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    let session_service = Arc::new(SessionService::new(
        &config.session.secret,
        config.session.ttl_seconds,
    ));

    let service_context = match config.storage {
        StorageBackend::Postgres => {
            let db_config = config
                .database
                .as_ref()
                .ok_or_else(|| AppError::Config("DATABASE_URL is required for postgres storage".to_string()))?;

            info!("Connecting to PostgreSQL...");
            let pool = create_pool(db_config)
                .await
                .map_err(|e| AppError::Database(e.to_string()))?;
            info!("PostgreSQL connection established");

            run_migrations(&pool, &db_config.migrations_dir)
                .await
                .map_err(|e| AppError::Database(e.to_string()))?;
            info!(dir = %db_config.migrations_dir, "Migrations applied");

            ServiceContext::postgres(pool, session_service)
        }
        StorageBackend::Memory => {
            info!("Using in-memory storage; data is lost on shutdown");
            ServiceContext::in_memory(MemoryStore::new(), session_service)
        }
    };

    Ok(AppState::new(service_context, config))
}

/// Run the HTTP server on an already bound listener
///
/// # Errors
/// Returns an error if serving fails
pub async fn serve(listener: TcpListener, app: Router) -> Result<(), AppError> {
    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::Config(format!("Server error: {}", e)))
}

/// Run the HTTP server
///
/// # Errors
/// Returns an error if the address cannot be bound or serving fails
pub async fn run_server(app: Router, addr: SocketAddr) -> Result<(), AppError> {
    info!("Starting HTTP server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {}: {}", addr, e)))?;

    info!("Server listening on http://{}", addr);

    serve(listener, app).await
}

/// Run the complete server with configuration
///
/// # Errors
/// Returns an error if any start-up step fails
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr: SocketAddr = config
        .api
        .address()
        .parse()
        .map_err(|e| AppError::Config(format!("Invalid listen address {}: {}", config.api.address(), e)))?;

    let state = create_app_state(config).await?;
    let app = create_app(state)?;

    run_server(app, addr).await
}
