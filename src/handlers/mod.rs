//! HTTP request handlers (route handlers).
//!
//! Each handler is a thin async function that:
//! 1. Receives HTTP request data (JSON body, URL params)
//! 2. Delegates to the service layer for validation and business logic
//! 3. Returns an HTTP response (JSON, status code)

use crate::db::DbPool;
use crate::repositories::{PgAuthorRepository, PgBookRepository};
use crate::services::{AuthorService, BookService};

/// Author endpoints
pub mod authors;
/// Book endpoints
pub mod books;
/// Health check endpoint
pub mod health;

/// Shared application state injected into every handler.
///
/// Built once at startup around the single process-wide connection pool;
/// cloning is cheap because the pool handle and the repositories inside
/// the services are reference-counted.
#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub authors: AuthorService<PgAuthorRepository>,
    pub books: BookService<PgBookRepository, PgAuthorRepository>,
}

impl AppState {
    /// Wire repositories and services around the shared pool.
    pub fn new(pool: DbPool) -> Self {
        let author_repo = PgAuthorRepository::new(pool.clone());
        let book_repo = PgBookRepository::new(pool.clone());

        Self {
            authors: AuthorService::new(author_repo.clone()),
            books: BookService::new(book_repo, author_repo),
            pool,
        }
    }
}
