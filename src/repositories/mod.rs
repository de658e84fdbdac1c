//! Repository layer mediating between entities and their persisted rows.
//!
//! This module defines the CRUD capability contract shared by every entity
//! repository, plus the connection-handling helpers the concrete Postgres
//! implementations are built on.
//!
//! # Connection discipline
//!
//! Every repository operation borrows one connection from the shared pool,
//! executes exactly one SQL statement, and returns the connection on every
//! exit path. The borrow is a guard value (`PoolConnection` for reads,
//! `Transaction` for writes), so release happens in its drop: an early `?`
//! return cannot leak a connection, and a transaction dropped before commit
//! rolls back.

use async_trait::async_trait;
use sqlx::pool::PoolConnection;
use sqlx::{Postgres, Transaction};

use crate::db::DbPool;
use crate::error::AppError;

/// Author repository against the `autores` table
pub mod author_repository;
/// Book repository against the `libros` table
pub mod book_repository;

pub use author_repository::PgAuthorRepository;
pub use book_repository::{BookRepository, PgBookRepository};

/// Uniform CRUD contract implemented by every entity repository.
///
/// `Entity` is the persisted shape (id assigned by storage); `New` is the
/// constructed-but-not-persisted shape consumed by `add`.
#[async_trait]
pub trait Repository: Send + Sync {
    type Entity: Send + Sync;
    type New: Send + Sync;

    /// Fetch one entity by id, `None` when no row matches.
    async fn get_by_id(&self, id: i32) -> Result<Option<Self::Entity>, AppError>;

    /// Fetch all entities, ordered by their human-sortable field.
    async fn get_all(&self) -> Result<Vec<Self::Entity>, AppError>;

    /// Insert a new entity and return it with its storage-assigned id.
    ///
    /// Constraint violations (e.g., duplicate key) propagate as database
    /// errors.
    async fn add(&self, new: Self::New) -> Result<Self::Entity, AppError>;

    /// Update an existing entity, failing with `NotFound` when no row
    /// matches its id.
    async fn update(&self, entity: Self::Entity) -> Result<Self::Entity, AppError>;

    /// Delete by id; `true` when a row was removed, `false` when none
    /// matched.
    async fn delete(&self, id: i32) -> Result<bool, AppError>;
}

/// Borrow a connection from the pool for a read-only operation.
///
/// The returned guard hands the connection back to the pool when dropped.
/// Acquisition failures (pool exhausted, pool closed, database down) are
/// logged with the operation name and propagated.
pub(crate) async fn acquire(
    pool: &DbPool,
    operation: &'static str,
) -> Result<PoolConnection<Postgres>, AppError> {
    pool.acquire().await.map_err(|err| {
        tracing::error!(operation, error = %err, "failed to acquire database connection");
        AppError::Database(err)
    })
}

/// Borrow a connection and open a transaction for a write operation.
///
/// Dropping the returned guard without an explicit commit rolls the
/// transaction back and returns the connection to the pool, so every error
/// path gets rollback-then-release without further bookkeeping.
pub(crate) async fn begin(
    pool: &DbPool,
    operation: &'static str,
) -> Result<Transaction<'static, Postgres>, AppError> {
    pool.begin().await.map_err(|err| {
        tracing::error!(operation, error = %err, "failed to begin database transaction");
        AppError::Database(err)
    })
}

/// Log a query failure with its operation context and wrap it.
///
/// Repositories never swallow or retry database errors; they log and
/// re-raise to the caller.
pub(crate) fn db_error(operation: &'static str) -> impl FnOnce(sqlx::Error) -> AppError {
    move |err| {
        tracing::error!(operation, error = %err, "database operation failed");
        AppError::Database(err)
    }
}
