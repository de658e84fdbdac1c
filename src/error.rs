//! Error types and HTTP error response handling.
//!
//! This module defines all application errors and how they are converted
//! into HTTP responses with appropriate status codes and JSON bodies.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// Application-wide error type.
///
/// This enum represents all possible errors that can occur in the application.
/// Each variant maps to a specific HTTP status code and error message.
///
/// # Error Categories
///
/// - **Configuration Errors**: Required connection parameters missing; fatal at startup
/// - **Database Errors**: Any sqlx::Error from pool or query operations
/// - **Validation Errors**: Caller-supplied fields fail business rules
/// - **Referential Integrity Errors**: A referenced entity does not exist
/// - **Resource Errors**: An update or lookup targets an id with no matching row
/// - **Argument Errors**: Structurally invalid input such as a non-positive id
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Required connection parameters were missing at startup.
    ///
    /// This error is fatal: it is raised before the server begins
    /// accepting requests, never during normal operation.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Database operation failed (e.g., connection error, query error).
    ///
    /// This wraps any sqlx::Error using the `#[from]` attribute, which
    /// automatically implements `From<sqlx::Error> for AppError`. Pool
    /// exhaustion (`PoolTimedOut`) and pool shutdown (`PoolClosed`) travel
    /// through this variant as well.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Caller-supplied fields failed a business validation rule.
    ///
    /// Returns HTTP 400 Bad Request. The String names the first violated
    /// rule; validation always runs before any persistence attempt.
    #[error("Validation error: {0}")]
    Validation(String),

    /// A referenced entity (the book's author) does not exist.
    ///
    /// Returns HTTP 422 Unprocessable Entity. Checked explicitly before
    /// dependent writes.
    #[error("Referential integrity error: {0}")]
    ReferentialIntegrity(String),

    /// Requested entity does not exist.
    ///
    /// Returns HTTP 404 Not Found.
    #[error("{0}")]
    NotFound(String),

    /// Request parameter is structurally invalid (e.g., id <= 0).
    ///
    /// Returns HTTP 400 Bad Request.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Convert AppError into an HTTP response.
///
/// This implementation allows Axum handlers to return `Result<T, AppError>`
/// and have errors automatically converted to proper HTTP responses.
///
/// # Response Format
///
/// All errors return JSON in this format:
/// ```json
/// {
///   "error": {
///     "code": "error_type",
///     "message": "Human-readable error message"
///   }
/// }
/// ```
///
/// # Status Code Mapping
///
/// - `Validation` → 400 Bad Request
/// - `InvalidArgument` → 400 Bad Request
/// - `NotFound` → 404 Not Found
/// - `ReferentialIntegrity` → 422 Unprocessable Entity
/// - `Database(PoolTimedOut | PoolClosed)` → 503 Service Unavailable
/// - `Database` / `Config` → 500 Internal Server Error (hides details from client)
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Map each error variant to (HTTP status, error code, message)
        let (status, code, message) = match self {
            AppError::Validation(ref msg) => {
                (StatusCode::BAD_REQUEST, "validation_error", msg.clone())
            }
            AppError::InvalidArgument(ref msg) => {
                (StatusCode::BAD_REQUEST, "invalid_argument", msg.clone())
            }
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found", self.to_string()),
            AppError::ReferentialIntegrity(ref msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "referential_integrity_error",
                msg.clone(),
            ),
            AppError::Database(sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "service_unavailable",
                "No database connection available".to_string(),
            ),
            AppError::Database(_) | AppError::Config(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                "An internal error occurred".to_string(),
            ),
        };

        // Build JSON response body
        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        // Return the response with status code and JSON body
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_maps_to_bad_request() {
        let response = AppError::Validation("title cannot be empty".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn invalid_argument_maps_to_bad_request() {
        let response = AppError::InvalidArgument("id must be positive".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn not_found_maps_to_404() {
        let response = AppError::NotFound("author with id 7 not found".into()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn referential_integrity_maps_to_unprocessable_entity() {
        let response =
            AppError::ReferentialIntegrity("author with id 7 does not exist".into())
                .into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn pool_timeout_maps_to_service_unavailable() {
        let response = AppError::Database(sqlx::Error::PoolTimedOut).into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn other_database_errors_map_to_internal_error() {
        let response = AppError::Database(sqlx::Error::RowNotFound).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
