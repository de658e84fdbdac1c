//! Book management HTTP handlers.
//!
//! This module implements the book-related API endpoints:
//! - POST /api/v1/libros - Create a new book
//! - GET /api/v1/libros - List all books
//! - GET /api/v1/libros/:id - Get book by ID (author-enriched)
//! - PUT /api/v1/libros/:id - Update a book (author-enriched)
//! - DELETE /api/v1/libros/:id - Delete a book
//! - GET /api/v1/autores/:id/libros - List one author's books (enriched)

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde_json::{Value, json};

use crate::error::AppError;
use crate::handlers::AppState;
use crate::models::book::{Book, BookWithAuthor, CreateBookRequest};

/// Create a new book.
///
/// # Endpoint
///
/// `POST /api/v1/libros`
///
/// # Request Body
///
/// ```json
/// {
///   "titulo": "Cien años de soledad",
///   "isbn": "9783161484100",
///   "anio_publicacion": 1967,
///   "autor_id": 1,
///   "genero": "Novela"
/// }
/// ```
///
/// # Response
///
/// - **Success (201 Created)**: Returns the created book with the author's
///   data nested under `author`
/// - **Error (400)**: A field is missing or fails a validation rule
/// - **Error (422)**: The referenced author does not exist
/// - **Error (500)**: Database error
pub async fn create_book(
    State(state): State<AppState>,
    Json(request): Json<CreateBookRequest>,
) -> Result<(StatusCode, Json<BookWithAuthor>), AppError> {
    let book = state.books.create(request).await?;

    Ok((StatusCode::CREATED, Json(book)))
}

/// List all books, ordered by title.
///
/// # Endpoint
///
/// `GET /api/v1/libros`
///
/// # Response
///
/// - **Success (200 OK)**: Returns an array of bare book records. The bulk
///   path skips author enrichment; fetch a single book for the nested
///   author data.
pub async fn list_books(State(state): State<AppState>) -> Result<Json<Vec<Book>>, AppError> {
    let books = state.books.get_all().await?;

    Ok(Json(books))
}

/// Get a specific book by ID, enriched with its author.
///
/// # Endpoint
///
/// `GET /api/v1/libros/:id`
///
/// # Response
///
/// - **Success (200 OK)**: Returns the book; `author` is the author's data
///   or `null` when the reference dangles
/// - **Error (400)**: `id` is not a positive integer
/// - **Error (404)**: No book with this id
pub async fn get_book(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<BookWithAuthor>, AppError> {
    let book = state
        .books
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("book with id {id} not found")))?;

    Ok(Json(book))
}

/// List every book of one author, each enriched with that author.
///
/// # Endpoint
///
/// `GET /api/v1/autores/:id/libros`
///
/// # Response
///
/// - **Success (200 OK)**: Returns an array of enriched books (may be empty)
/// - **Error (422)**: The author does not exist
pub async fn list_books_by_author(
    State(state): State<AppState>,
    Path(author_id): Path<i32>,
) -> Result<Json<Vec<BookWithAuthor>>, AppError> {
    let books = state.books.get_by_author(author_id).await?;

    Ok(Json(books))
}

/// Update an existing book.
///
/// # Endpoint
///
/// `PUT /api/v1/libros/:id`
///
/// All fields are replaced; the id is immutable. The referenced author is
/// re-verified.
///
/// # Response
///
/// - **Success (200 OK)**: Returns the updated, author-enriched book
/// - **Error (400)**: A field fails validation
/// - **Error (404)**: No book with this id
/// - **Error (422)**: The referenced author does not exist
pub async fn update_book(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(request): Json<CreateBookRequest>,
) -> Result<Json<BookWithAuthor>, AppError> {
    let book = state.books.update(id, request).await?;

    Ok(Json(book))
}

/// Delete a book by ID.
///
/// # Endpoint
///
/// `DELETE /api/v1/libros/:id`
///
/// # Response
///
/// - **Success (200 OK)**: `{"deleted": true}` when a row was removed,
///   `{"deleted": false}` when no book matched (idempotent)
/// - **Error (400)**: `id` is not a positive integer
pub async fn delete_book(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Value>, AppError> {
    let deleted = state.books.delete(id).await?;

    Ok(Json(json!({ "deleted": deleted })))
}
