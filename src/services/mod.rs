//! Business logic services.
//!
//! Services contain core business logic separated from HTTP handlers: field
//! validation, cross-entity existence checks and response enrichment. They
//! hold no state of their own beyond the repositories injected at
//! construction time.

pub mod author_service;
pub mod book_service;

pub use author_service::AuthorService;
pub use book_service::BookService;
