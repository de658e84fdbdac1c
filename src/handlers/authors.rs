//! Author management HTTP handlers.
//!
//! This module implements the author-related API endpoints:
//! - POST /api/v1/autores - Create a new author
//! - GET /api/v1/autores - List all authors
//! - GET /api/v1/autores/:id - Get author by ID
//! - PUT /api/v1/autores/:id - Update an author
//! - DELETE /api/v1/autores/:id - Delete an author

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde_json::{Value, json};

use crate::error::AppError;
use crate::handlers::AppState;
use crate::models::author::{Author, CreateAuthorRequest};

/// Create a new author.
///
/// # Endpoint
///
/// `POST /api/v1/autores`
///
/// # Request Body
///
/// ```json
/// {
///   "nombre": "Gabriel García Márquez",
///   "nacionalidad": "Colombiana",
///   "fecha_nacimiento": "1927-03-06"
/// }
/// ```
///
/// # Response
///
/// - **Success (201 Created)**: Returns the created author with its assigned id
/// - **Error (400)**: A field is missing or fails a validation rule
/// - **Error (500)**: Database error
pub async fn create_author(
    State(state): State<AppState>,
    Json(request): Json<CreateAuthorRequest>,
) -> Result<(StatusCode, Json<Author>), AppError> {
    let author = state.authors.create(request).await?;

    Ok((StatusCode::CREATED, Json(author)))
}

/// List all authors, ordered by name.
///
/// # Endpoint
///
/// `GET /api/v1/autores`
///
/// # Response
///
/// - **Success (200 OK)**: Returns an array of authors (may be empty)
pub async fn list_authors(
    State(state): State<AppState>,
) -> Result<Json<Vec<Author>>, AppError> {
    let authors = state.authors.get_all().await?;

    Ok(Json(authors))
}

/// Get a specific author by ID.
///
/// # Endpoint
///
/// `GET /api/v1/autores/:id`
///
/// # Response
///
/// - **Success (200 OK)**: Returns the author
/// - **Error (400)**: `id` is not a positive integer
/// - **Error (404)**: No author with this id
pub async fn get_author(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Author>, AppError> {
    // The service logs the miss and returns None; the HTTP layer turns
    // that absence into a 404
    let author = state
        .authors
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("author with id {id} not found")))?;

    Ok(Json(author))
}

/// Update an existing author.
///
/// # Endpoint
///
/// `PUT /api/v1/autores/:id`
///
/// All fields are replaced; the id is immutable.
///
/// # Response
///
/// - **Success (200 OK)**: Returns the updated author
/// - **Error (400)**: Invalid id or a field fails validation
/// - **Error (404)**: No author with this id
pub async fn update_author(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(request): Json<CreateAuthorRequest>,
) -> Result<Json<Author>, AppError> {
    let author = state.authors.update(id, request).await?;

    Ok(Json(author))
}

/// Delete an author by ID.
///
/// # Endpoint
///
/// `DELETE /api/v1/autores/:id`
///
/// # Response
///
/// - **Success (200 OK)**: `{"deleted": true}` when a row was removed,
///   `{"deleted": false}` when no author matched (idempotent)
/// - **Error (400)**: `id` is not a positive integer
pub async fn delete_author(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Value>, AppError> {
    let deleted = state.authors.delete(id).await?;

    Ok(Json(json!({ "deleted": deleted })))
}
