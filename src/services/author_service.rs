//! Author service - business validation on top of the author repository.
//!
//! This service handles:
//! - Field validation (name, nationality, birth date)
//! - Positive-id guards before any storage access
//! - Outcome logging for lookups and deletions

use chrono::NaiveDate;

use crate::error::AppError;
use crate::models::author::{Author, CreateAuthorRequest, NewAuthor};
use crate::repositories::Repository;

/// Business operations for authors.
///
/// Generic over the repository so tests can substitute an in-memory
/// implementation; production code wires in [`PgAuthorRepository`]
/// (see `crate::repositories`).
#[derive(Debug, Clone)]
pub struct AuthorService<R> {
    repo: R,
}

impl<R> AuthorService<R>
where
    R: Repository<Entity = Author, New = NewAuthor>,
{
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Create a new author.
    ///
    /// # Process
    ///
    /// 1. Validate the supplied fields, failing with the first violated rule
    /// 2. Persist via the repository (assigns the id)
    ///
    /// # Errors
    ///
    /// - `Validation`: A field is missing or breaks a business rule
    /// - `Database`: Database error occurred
    pub async fn create(&self, request: CreateAuthorRequest) -> Result<Author, AppError> {
        let new_author = validate_author(&request)?;

        let author = self.repo.add(new_author).await?;

        tracing::info!(id = author.id, name = %author.name, "author created");
        Ok(author)
    }

    /// Fetch one author by id.
    ///
    /// A missing author is logged and returned as `None`, not raised as an
    /// error.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument`: `id` is not positive (checked before touching storage)
    /// - `Database`: Database error occurred
    pub async fn get_by_id(&self, id: i32) -> Result<Option<Author>, AppError> {
        if id <= 0 {
            return Err(AppError::InvalidArgument(
                "id must be a positive integer".to_string(),
            ));
        }

        let author = self.repo.get_by_id(id).await?;

        if author.is_none() {
            tracing::warn!(id, "author not found");
        }

        Ok(author)
    }

    /// Fetch all authors, ordered by name.
    pub async fn get_all(&self) -> Result<Vec<Author>, AppError> {
        let authors = self.repo.get_all().await?;

        tracing::info!(count = authors.len(), "fetched authors");
        Ok(authors)
    }

    /// Update an existing author.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument`: `id` is not positive
    /// - `NotFound`: No author exists with this id
    /// - `Validation`: A field is missing or breaks a business rule
    /// - `Database`: Database error occurred
    pub async fn update(&self, id: i32, request: CreateAuthorRequest) -> Result<Author, AppError> {
        // Resolve first so a bogus id fails before any validation work
        self.get_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("author with id {id} not found")))?;

        let new_author = validate_author(&request)?;

        let updated = self
            .repo
            .update(Author {
                id,
                name: new_author.name,
                nationality: new_author.nationality,
                birth_date: new_author.birth_date,
            })
            .await?;

        tracing::info!(id, name = %updated.name, "author updated");
        Ok(updated)
    }

    /// Delete an author by id; `true` when a row was removed.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument`: `id` is not positive (checked before touching storage)
    /// - `Database`: Database error occurred
    pub async fn delete(&self, id: i32) -> Result<bool, AppError> {
        if id <= 0 {
            return Err(AppError::InvalidArgument(
                "id must be a positive integer".to_string(),
            ));
        }

        let deleted = self.repo.delete(id).await?;

        if deleted {
            tracing::info!(id, "author deleted");
        } else {
            tracing::warn!(id, "author not found for deletion");
        }

        Ok(deleted)
    }
}

/// Validate author fields, returning the first violated rule.
///
/// Rules:
/// - `nombre`, `nacionalidad` and `fecha_nacimiento` are all required
/// - Name: at least 2 characters after trim, letters and spaces only
/// - Nationality: at least 2 characters after trim
/// - Birth date: must parse as a `YYYY-MM-DD` calendar date
fn validate_author(request: &CreateAuthorRequest) -> Result<NewAuthor, AppError> {
    let name = required_field(request.name.as_deref(), "nombre")?.trim();
    let nationality = required_field(request.nationality.as_deref(), "nacionalidad")?.trim();
    let birth_date = required_field(request.birth_date.as_deref(), "fecha_nacimiento")?.trim();

    if name.chars().count() < 2 {
        return Err(AppError::Validation(
            "name must be at least 2 characters long".to_string(),
        ));
    }

    if !name.chars().all(|c| c.is_alphabetic() || c.is_whitespace()) {
        return Err(AppError::Validation(
            "name may only contain letters and spaces".to_string(),
        ));
    }

    if nationality.chars().count() < 2 {
        return Err(AppError::Validation(
            "nationality must be at least 2 characters long".to_string(),
        ));
    }

    let birth_date = NaiveDate::parse_from_str(birth_date, "%Y-%m-%d").map_err(|_| {
        AppError::Validation("birth date must be a valid date in YYYY-MM-DD format".to_string())
    })?;

    Ok(NewAuthor {
        name: name.to_string(),
        nationality: Some(nationality.to_string()),
        birth_date: Some(birth_date),
    })
}

/// Presence check shared by every required field.
fn required_field<'a>(value: Option<&'a str>, field: &str) -> Result<&'a str, AppError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(AppError::Validation(format!(
            "the field '{field}' is required"
        ))),
    }
}
