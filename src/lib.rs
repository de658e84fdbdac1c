//! Library Catalog Service
//!
//! A REST API for managing authors and books backed by PostgreSQL. The
//! crate root exposes the core modules for the server binary, the seeding
//! utility and tests.
//!
//! # Architecture
//!
//! - **Web Framework**: Axum (async HTTP server)
//! - **Database**: PostgreSQL with sqlx, behind a bounded connection pool
//!   shared by per-entity repositories
//! - **Layering**: repositories mediate SQL; services add validation,
//!   cross-entity checks and author enrichment; handlers stay thin
//! - **Format**: JSON requests/responses, field names matching the
//!   existing Spanish schema

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod services;

#[cfg(test)]
mod test_utils;

// Re-export commonly used types at the crate root
pub use config::Config;
pub use db::DbPool;
pub use error::AppError;
