//! Book data models, API request types and the author-enriched response.
//!
//! This module defines:
//! - `Book`: Database entity representing a persisted book
//! - `NewBook`: A validated book that has not been persisted yet
//! - `CreateBookRequest`: Request body for creating and updating books
//! - `BookWithAuthor`: A book response with its author's data nested inside

use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::author::Author;

/// Represents a book record from the database.
///
/// # Database Table
///
/// Maps to the `libros` table. `autor_id` references `autores.id`; the
/// relation is queried on demand, an author never owns a collection of
/// books in memory.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow, Serialize)]
pub struct Book {
    /// Unique identifier for this book
    pub id: i32,

    /// Title, non-empty and trimmed
    #[sqlx(rename = "titulo")]
    #[serde(rename = "titulo")]
    pub title: String,

    /// ISBN, non-empty and trimmed
    pub isbn: String,

    /// Publication year, may be absent
    #[sqlx(rename = "anio_publicacion")]
    #[serde(rename = "anio_publicacion")]
    pub publication_year: Option<i32>,

    /// Id of the referenced author
    #[sqlx(rename = "autor_id")]
    #[serde(rename = "autor_id")]
    pub author_id: i32,
}

/// A validated book that has not been persisted yet.
///
/// `new` is the only way to build one: the title and ISBN invariants are
/// enforced at construction, so a `NewBook` in hand is always safe to
/// insert. Fields are private for that reason.
#[derive(Debug, Clone)]
pub struct NewBook {
    title: String,
    isbn: String,
    publication_year: Option<i32>,
    author_id: i32,
}

impl NewBook {
    /// Build a new, not-yet-persisted book.
    ///
    /// Title and ISBN are trimmed and must be non-empty afterwards;
    /// violating either fails construction immediately rather than
    /// deferring the problem to persistence.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` when the trimmed title or ISBN is
    /// empty.
    pub fn new(
        title: &str,
        isbn: &str,
        publication_year: Option<i32>,
        author_id: i32,
    ) -> Result<Self, AppError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(AppError::Validation(
                "the field 'titulo' is required and cannot be empty".to_string(),
            ));
        }

        let isbn = isbn.trim();
        if isbn.is_empty() {
            return Err(AppError::Validation(
                "the field 'isbn' is required and cannot be empty".to_string(),
            ));
        }

        Ok(Self {
            title: title.to_string(),
            isbn: isbn.to_string(),
            publication_year,
            author_id,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn isbn(&self) -> &str {
        &self.isbn
    }

    pub fn publication_year(&self) -> Option<i32> {
        self.publication_year
    }

    pub fn author_id(&self) -> i32 {
        self.author_id
    }

    /// Attach a storage-assigned id, producing the persisted shape.
    ///
    /// Used on the update path, where the id is already known and the
    /// remaining fields have just been re-validated.
    pub fn with_id(self, id: i32) -> Book {
        Book {
            id,
            title: self.title,
            isbn: self.isbn,
            publication_year: self.publication_year,
            author_id: self.author_id,
        }
    }
}

/// Request body for creating or updating a book.
///
/// # JSON Example
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
/// All fields are optional at the serde level so a missing field surfaces
/// as a service-layer validation error rather than a deserialization
/// failure. `genero` is validated but not stored; the `libros` table
/// carries no genre column.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateBookRequest {
    /// Title (required, non-empty after trim)
    #[serde(rename = "titulo")]
    pub title: Option<String>,

    /// ISBN (required, non-empty after trim)
    pub isbn: Option<String>,

    /// Publication year (required, between 1000 and 2100)
    #[serde(rename = "anio_publicacion")]
    pub publication_year: Option<i32>,

    /// Id of the referenced author (required, positive)
    #[serde(rename = "autor_id")]
    pub author_id: Option<i32>,

    /// Genre (required, at least 2 characters after trim)
    #[serde(rename = "genero")]
    pub genre: Option<String>,
}

/// A book combined with its author's data into one nested result.
///
/// # JSON Example
///
/// ```json
/// {
///   "id": 1,
///   "titulo": "Cien años de soledad",
///   "isbn": "9783161484100",
///   "anio_publicacion": 1967,
///   "autor_id": 1,
///   "author": {
///     "id": 1,
///     "nombre": "Gabriel García Márquez",
///     "nacionalidad": "Colombiana",
///     "fecha_nacimiento": "1927-03-06"
///   }
/// }
/// ```
///
/// A dangling `autor_id` (author deleted out-of-band) is represented as an
/// explicit `"author": null`, never as an error.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookWithAuthor {
    #[serde(flatten)]
    pub book: Book,

    pub author: Option<Author>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn new_book_trims_title_and_isbn() {
        let book = NewBook::new("  Rayuela  ", " 9788437604947 ", Some(1963), 1).unwrap();

        assert_eq!(book.title(), "Rayuela");
        assert_eq!(book.isbn(), "9788437604947");
        assert_eq!(book.publication_year(), Some(1963));
        assert_eq!(book.author_id(), 1);
    }

    #[test]
    fn empty_title_fails_construction() {
        let result = NewBook::new("   ", "9788437604947", Some(1963), 1);

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn empty_isbn_fails_construction() {
        let result = NewBook::new("Rayuela", "", Some(1963), 1);

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn with_id_produces_the_persisted_shape() {
        let book = NewBook::new("Rayuela", "9788437604947", Some(1963), 2)
            .unwrap()
            .with_id(9);

        assert_eq!(
            book,
            Book {
                id: 9,
                title: "Rayuela".to_string(),
                isbn: "9788437604947".to_string(),
                publication_year: Some(1963),
                author_id: 2,
            }
        );
    }

    #[test]
    fn book_serializes_with_schema_field_names() {
        let book = Book {
            id: 1,
            title: "Cien años de soledad".to_string(),
            isbn: "9783161484100".to_string(),
            publication_year: Some(1967),
            author_id: 1,
        };

        let json = serde_json::to_value(&book).unwrap();

        assert_eq!(json["titulo"], "Cien años de soledad");
        assert_eq!(json["isbn"], "9783161484100");
        assert_eq!(json["anio_publicacion"], 1967);
        assert_eq!(json["autor_id"], 1);
    }

    #[test]
    fn enriched_book_nests_the_author() {
        let enriched = BookWithAuthor {
            book: Book {
                id: 1,
                title: "Cien años de soledad".to_string(),
                isbn: "9783161484100".to_string(),
                publication_year: Some(1967),
                author_id: 1,
            },
            author: Some(Author {
                id: 1,
                name: "Gabriel García Márquez".to_string(),
                nationality: Some("Colombiana".to_string()),
                birth_date: Some(NaiveDate::from_ymd_opt(1927, 3, 6).unwrap()),
            }),
        };

        let json = serde_json::to_value(&enriched).unwrap();

        // Book fields flattened at the top level, author nested below
        assert_eq!(json["titulo"], "Cien años de soledad");
        assert_eq!(json["author"]["nombre"], "Gabriel García Márquez");
        assert_eq!(json["author"]["fecha_nacimiento"], "1927-03-06");
    }

    #[test]
    fn dangling_author_serializes_as_null() {
        let enriched = BookWithAuthor {
            book: Book {
                id: 3,
                title: "Ficciones".to_string(),
                isbn: "9788420633121".to_string(),
                publication_year: Some(1944),
                author_id: 42,
            },
            author: None,
        };

        let json = serde_json::to_value(&enriched).unwrap();

        assert!(json["author"].is_null());
    }
}
