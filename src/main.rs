//! Library Catalog Service - Main Application Entry Point
//!
//! This is a REST API server for managing authors and books. It provides JSON endpoints for CRUD operations on both entities, with book responses enriched with their author's data.
//!
//! # Startup Flow
//!
//! 1. Initialize logging
//! 2. Load configuration from environment variables (fatal if incomplete)
//! 3. Create the bounded database connection pool and verify connectivity
//! 4. Wire repositories and services around the pool
//! 5. Build HTTP router and start the server
//! 6. On shutdown, drain in-flight requests and close every pooled connection

use axum::{
    Router,
    routing::{delete, get, post, put},
};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use library_api::handlers::{self, AppState};
use library_api::{AppError, Config, db};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging with tracing subscriber. Reads RUST_LOG environment variable (defaults to "info" level)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    // Load configuration; missing DB_NAME/DB_USER/DB_PASSWORD aborts here
    let config = Config::from_env().map_err(|err| AppError::Config(err.to_string()))?;
    tracing::info!("Configuration loaded");

    // Create database pool (min 2 / max 10 connections)
    let pool = db::create_pool(&config).await?;

    // Wire repositories and services around the shared pool
    let state = AppState::new(pool.clone());

    let app = Router::new()
        // Author routes
        .route("/api/v1/autores", post(handlers::authors::create_author))
        .route("/api/v1/autores", get(handlers::authors::list_authors))
        .route("/api/v1/autores/{id}", get(handlers::authors::get_author))
        .route(
            "/api/v1/autores/{id}",
            put(handlers::authors::update_author),
        )
        .route(
            "/api/v1/autores/{id}",
            delete(handlers::authors::delete_author),
        )
        .route(
            "/api/v1/autores/{id}/libros",
            get(handlers::books::list_books_by_author),
        )
        // Book routes
        .route("/api/v1/libros", post(handlers::books::create_book))
        .route("/api/v1/libros", get(handlers::books::list_books))
        .route("/api/v1/libros/{id}", get(handlers::books::get_book))
        .route("/api/v1/libros/{id}", put(handlers::books::update_book))
        .route("/api/v1/libros/{id}", delete(handlers::books::delete_book))
        // Health check
        .route("/health", get(handlers::health::health_check))
        // Add tracing middleware for observability
        .layer(TraceLayer::new_for_http())
        // Share state with all handlers via State extraction
        .with_state(state);

    // Bind to network address and start server
    let addr = format!("0.0.0.0:{}", config.server_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    // Serve HTTP requests until ctrl-c, then drain in-flight requests
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // All connections are terminated exactly once, at process shutdown
    db::close_pool(&pool).await;

    Ok(())
}

/// Resolve when the process receives ctrl-c.
async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
    }
}
