//! Author data models and API request types.
//!
//! This module defines:
//! - `Author`: Database entity representing a persisted author
//! - `NewAuthor`: An author that has been constructed but not yet persisted
//! - `CreateAuthorRequest`: Request body for creating and updating authors

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Represents an author record from the database.
///
/// # Database Table
///
/// Maps to the `autores` table. The table predates this service, so the
/// column and JSON field names stay in Spanish while the Rust identifiers
/// are English.
///
/// # Identity
///
/// `id` is assigned by the database (SERIAL) and immutable once persisted;
/// an `Author` value always represents a persisted row. Use [`NewAuthor`]
/// for the not-yet-persisted shape.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow, Serialize)]
pub struct Author {
    /// Unique identifier for this author
    pub id: i32,

    /// Full name of the author
    #[sqlx(rename = "nombre")]
    #[serde(rename = "nombre")]
    pub name: String,

    /// Nationality, may be absent
    #[sqlx(rename = "nacionalidad")]
    #[serde(rename = "nacionalidad")]
    pub nationality: Option<String>,

    /// Birth date, rendered as an ISO-8601 date (`YYYY-MM-DD`) in JSON
    #[sqlx(rename = "fecha_nacimiento")]
    #[serde(rename = "fecha_nacimiento")]
    pub birth_date: Option<NaiveDate>,
}

/// An author that has not been persisted yet.
///
/// Carries every [`Author`] field except the id, which only storage can
/// assign. Repositories consume a `NewAuthor` on insert and hand back the
/// persisted `Author`.
#[derive(Debug, Clone)]
pub struct NewAuthor {
    pub name: String,
    pub nationality: Option<String>,
    pub birth_date: Option<NaiveDate>,
}

/// Request body for creating or updating an author.
///
/// # JSON Example
///
/// ```json
/// {
///   "nombre": "Gabriel García Márquez",
///   "nacionalidad": "Colombiana",
///   "fecha_nacimiento": "1927-03-06"
/// }
/// ```
///
/// All fields are optional at the serde level so a missing field surfaces
/// as a service-layer validation error rather than a deserialization
/// failure; the service requires all three.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAuthorRequest {
    /// Author name (required, at least 2 characters, letters and spaces only)
    #[serde(rename = "nombre")]
    pub name: Option<String>,

    /// Nationality (required, at least 2 characters)
    #[serde(rename = "nacionalidad")]
    pub nationality: Option<String>,

    /// Birth date as a `YYYY-MM-DD` string (required, must parse)
    #[serde(rename = "fecha_nacimiento")]
    pub birth_date: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn author_serializes_with_schema_field_names() {
        let author = Author {
            id: 1,
            name: "Gabriel García Márquez".to_string(),
            nationality: Some("Colombiana".to_string()),
            birth_date: Some(NaiveDate::from_ymd_opt(1927, 3, 6).unwrap()),
        };

        let json = serde_json::to_value(&author).unwrap();

        assert_eq!(json["id"], 1);
        assert_eq!(json["nombre"], "Gabriel García Márquez");
        assert_eq!(json["nacionalidad"], "Colombiana");
        assert_eq!(json["fecha_nacimiento"], "1927-03-06");
    }

    #[test]
    fn absent_fields_serialize_as_null() {
        let author = Author {
            id: 2,
            name: "Anónimo".to_string(),
            nationality: None,
            birth_date: None,
        };

        let json = serde_json::to_value(&author).unwrap();

        assert!(json["nacionalidad"].is_null());
        assert!(json["fecha_nacimiento"].is_null());
    }

    #[test]
    fn request_deserializes_from_schema_field_names() {
        let request: CreateAuthorRequest = serde_json::from_str(
            r#"{"nombre": "Julio Cortázar", "nacionalidad": "Argentina", "fecha_nacimiento": "1914-08-26"}"#,
        )
        .unwrap();

        assert_eq!(request.name.as_deref(), Some("Julio Cortázar"));
        assert_eq!(request.nationality.as_deref(), Some("Argentina"));
        assert_eq!(request.birth_date.as_deref(), Some("1914-08-26"));
    }

    #[test]
    fn request_tolerates_missing_fields() {
        let request: CreateAuthorRequest = serde_json::from_str("{}").unwrap();

        assert!(request.name.is_none());
        assert!(request.nationality.is_none());
        assert!(request.birth_date.is_none());
    }
}
