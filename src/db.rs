//! Database connection pool management.
//!
//! This module provides utilities for:
//! - Creating a bounded PostgreSQL connection pool shared by all repositories
//! - Closing every pooled connection at process shutdown

use std::time::Duration;

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{Pool, Postgres};

use crate::config::Config;

/// Type alias for PostgreSQL connection pool.
///
/// Instead of writing `Pool<Postgres>` everywhere, we can use `DbPool`.
/// The pool is internally reference-counted: cloning the handle shares the
/// same underlying set of connections, so one pool exists per process as
/// long as it is created once at startup and passed down from there.
pub type DbPool = Pool<Postgres>;

/// Minimum number of connections kept open at all times.
const POOL_MIN_CONNECTIONS: u32 = 2;

/// Maximum number of connections the pool may open.
const POOL_MAX_CONNECTIONS: u32 = 10;

/// How long an acquire waits for a free connection before failing.
///
/// When all 10 connections are in flight, callers block up to this long and
/// then receive `sqlx::Error::PoolTimedOut`, surfaced to HTTP clients as 503.
const POOL_ACQUIRE_TIMEOUT: Duration = Duration::from_secs(30);

/// Create the PostgreSQL connection pool.
///
/// A connection pool maintains multiple database connections that can be reused across HTTP requests which is much more efficient than opening a new connection for each request.
///
/// # Arguments
///
/// * `config` - Application configuration carrying the connection parameters
///
/// # Configuration
///
/// - Minimum connections: 2 (opened eagerly, kept alive for reuse)
/// - Maximum connections: 10
/// - Acquire timeout: 30 seconds, then the acquire fails
///
/// # Errors
///
/// Returns an error if:
/// - Cannot connect to the PostgreSQL server
/// - Database authentication fails
pub async fn create_pool(config: &Config) -> Result<DbPool, sqlx::Error> {
    let options = PgConnectOptions::new()
        .host(&config.db_host)
        .port(config.db_port)
        .database(&config.db_name)
        .username(&config.db_user)
        .password(&config.db_password)
        // Shows up in pg_stat_activity for monitoring
        .application_name("library_api");

    let pool = PgPoolOptions::new()
        .min_connections(POOL_MIN_CONNECTIONS)
        .max_connections(POOL_MAX_CONNECTIONS)
        .acquire_timeout(POOL_ACQUIRE_TIMEOUT)
        .connect_with(options)
        .await?;

    // Verify connectivity before the server starts accepting requests
    sqlx::query("SELECT 1").execute(&pool).await?;

    tracing::info!(
        min_connections = POOL_MIN_CONNECTIONS,
        max_connections = POOL_MAX_CONNECTIONS,
        "Database connection pool created"
    );

    Ok(pool)
}

/// Close every pooled connection.
///
/// Called once at process shutdown, after the HTTP server has drained.
/// Any acquire attempted after this returns `sqlx::Error::PoolClosed`.
pub async fn close_pool(pool: &DbPool) {
    pool.close().await;
    tracing::info!("Database connection pool closed");
}
