//! Book service - business validation, author existence checks and
//! response enrichment on top of the book and author repositories.
//!
//! This service handles:
//! - Field validation (title, ISBN, publication year, genre, author id)
//! - Referential integrity: the referenced author must exist before a
//!   dependent write
//! - Enrichment: nesting the author's data into single-book responses
//!
//! # Consistency
//!
//! The author-exists check and the subsequent insert/update are two
//! separate repository calls with no surrounding transaction. A concurrent
//! author deletion between the two can slip through; reads tolerate the
//! resulting dangling reference by enriching with `author: null`.

use crate::error::AppError;
use crate::models::author::{Author, NewAuthor};
use crate::models::book::{Book, BookWithAuthor, CreateBookRequest, NewBook};
use crate::repositories::{BookRepository, Repository};

/// Lower bound for an acceptable publication year.
const MIN_PUBLICATION_YEAR: i32 = 1000;
/// Upper bound for an acceptable publication year.
const MAX_PUBLICATION_YEAR: i32 = 2100;

/// Business operations for books.
///
/// Generic over both repositories so tests can substitute in-memory
/// implementations; production code wires in `PgBookRepository` and
/// `PgAuthorRepository`.
#[derive(Debug, Clone)]
pub struct BookService<B, A> {
    books: B,
    authors: A,
}

impl<B, A> BookService<B, A>
where
    B: BookRepository,
    A: Repository<Entity = Author, New = NewAuthor>,
{
    pub fn new(books: B, authors: A) -> Self {
        Self { books, authors }
    }

    /// Create a new book.
    ///
    /// # Process
    ///
    /// 1. Validate the supplied fields, failing with the first violated rule
    /// 2. Verify the referenced author exists
    /// 3. Persist via the book repository
    /// 4. Enrich the result with the author fetched in step 2
    ///
    /// # Errors
    ///
    /// - `Validation`: A field is missing or breaks a business rule
    /// - `ReferentialIntegrity`: The referenced author does not exist
    /// - `Database`: Database error occurred
    pub async fn create(&self, request: CreateBookRequest) -> Result<BookWithAuthor, AppError> {
        let new_book = validate_book(&request)?;

        let author = self.require_author(new_book.author_id()).await?;

        let book = self.books.add(new_book).await?;

        tracing::info!(
            id = book.id,
            title = %book.title,
            author = %author.name,
            "book created"
        );

        Ok(BookWithAuthor {
            book,
            author: Some(author),
        })
    }

    /// Fetch one book by id, enriched with its author's data.
    ///
    /// A missing book is logged and returned as `None`. A missing *author*
    /// (dangling reference, data deleted out-of-band) is represented as
    /// `author: null`, never as an error.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument`: `id` is not positive (checked before touching storage)
    /// - `Database`: Database error occurred
    pub async fn get_by_id(&self, id: i32) -> Result<Option<BookWithAuthor>, AppError> {
        if id <= 0 {
            return Err(AppError::InvalidArgument(
                "id must be a positive integer".to_string(),
            ));
        }

        let Some(book) = self.books.get_by_id(id).await? else {
            tracing::warn!(id, "book not found");
            return Ok(None);
        };

        let author = self.authors.get_by_id(book.author_id).await?;

        Ok(Some(BookWithAuthor { book, author }))
    }

    /// Fetch all books, ordered by title.
    ///
    /// Returns the bare records: the bulk path deliberately skips per-item
    /// author enrichment, unlike [`Self::get_by_id`].
    pub async fn get_all(&self) -> Result<Vec<Book>, AppError> {
        let books = self.books.get_all().await?;

        tracing::info!(count = books.len(), "fetched books");
        Ok(books)
    }

    /// Fetch every book of one author, each enriched with that author.
    ///
    /// # Errors
    ///
    /// - `ReferentialIntegrity`: The author does not exist
    /// - `Database`: Database error occurred
    pub async fn get_by_author(&self, author_id: i32) -> Result<Vec<BookWithAuthor>, AppError> {
        let author = self.require_author(author_id).await?;

        let books = self.books.get_books_by_author(author_id).await?;

        tracing::info!(count = books.len(), author = %author.name, "fetched books by author");

        Ok(books
            .into_iter()
            .map(|book| BookWithAuthor {
                book,
                author: Some(author.clone()),
            })
            .collect())
    }

    /// Update an existing book.
    ///
    /// # Errors
    ///
    /// - `NotFound`: No book exists with this id
    /// - `Validation`: A field is missing or breaks a business rule
    /// - `ReferentialIntegrity`: The referenced author does not exist
    /// - `Database`: Database error occurred
    pub async fn update(&self, id: i32, request: CreateBookRequest) -> Result<BookWithAuthor, AppError> {
        self.books
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("book with id {id} not found")))?;

        let new_book = validate_book(&request)?;

        let author = self.require_author(new_book.author_id()).await?;

        let book = self.books.update(new_book.with_id(id)).await?;

        tracing::info!(id, title = %book.title, "book updated");

        Ok(BookWithAuthor {
            book,
            author: Some(author),
        })
    }

    /// Delete a book by id; `true` when a row was removed.
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

        let deleted = self.books.delete(id).await?;

        if deleted {
            tracing::info!(id, "book deleted");
        } else {
            tracing::warn!(id, "book not found for deletion");
        }

        Ok(deleted)
    }

    /// Resolve an author that a book depends on.
    async fn require_author(&self, author_id: i32) -> Result<Author, AppError> {
        self.authors.get_by_id(author_id).await?.ok_or_else(|| {
            AppError::ReferentialIntegrity(format!("author with id {author_id} does not exist"))
        })
    }
}

/// Validate book fields, returning the first violated rule.
///
/// Rules:
/// - `titulo`, `autor_id`, `anio_publicacion` and `genero` are all required
/// - Title: non-empty after trim
/// - Author id: positive integer
/// - Publication year: between 1000 and 2100
/// - Genre: at least 2 characters after trim (validated only; the `libros`
///   table has no genre column)
///
/// The ISBN requirement is enforced by [`NewBook::new`] at construction.
fn validate_book(request: &CreateBookRequest) -> Result<NewBook, AppError> {
    let title = request
        .title
        .as_deref()
        .ok_or_else(|| AppError::Validation("the field 'titulo' is required".to_string()))?;

    let author_id = request
        .author_id
        .ok_or_else(|| AppError::Validation("the field 'autor_id' is required".to_string()))?;

    let publication_year = request.publication_year.ok_or_else(|| {
        AppError::Validation("the field 'anio_publicacion' is required".to_string())
    })?;

    let genre = request
        .genre
        .as_deref()
        .ok_or_else(|| AppError::Validation("the field 'genero' is required".to_string()))?;

    if title.trim().is_empty() {
        return Err(AppError::Validation("title cannot be empty".to_string()));
    }

    if author_id <= 0 {
        return Err(AppError::Validation(
            "author id must be a positive integer".to_string(),
        ));
    }

    if !(MIN_PUBLICATION_YEAR..=MAX_PUBLICATION_YEAR).contains(&publication_year) {
        return Err(AppError::Validation(format!(
            "publication year must be between {MIN_PUBLICATION_YEAR} and {MAX_PUBLICATION_YEAR}"
        )));
    }

    if genre.trim().chars().count() < 2 {
        return Err(AppError::Validation(
            "genre must be at least 2 characters long".to_string(),
        ));
    }

    NewBook::new(
        title,
        request.isbn.as_deref().unwrap_or(""),
        Some(publication_year),
        author_id,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::author::CreateAuthorRequest;
    use crate::services::AuthorService;
    use crate::test_utils::{InMemoryAuthorRepository, InMemoryBookRepository};

    fn services() -> (
        BookService<InMemoryBookRepository, InMemoryAuthorRepository>,
        AuthorService<InMemoryAuthorRepository>,
    ) {
        let authors = InMemoryAuthorRepository::default();
        let books = InMemoryBookRepository::default();
        (
            BookService::new(books, authors.clone()),
            AuthorService::new(authors),
        )
    }

    async fn seeded_author(authors: &AuthorService<InMemoryAuthorRepository>) -> Author {
        authors
            .create(CreateAuthorRequest {
                name: Some("Gabriel García Márquez".to_string()),
                nationality: Some("Colombiana".to_string()),
                birth_date: Some("1927-03-06".to_string()),
            })
            .await
            .unwrap()
    }

    fn soledad(author_id: i32) -> CreateBookRequest {
        CreateBookRequest {
            title: Some("Cien años de soledad".to_string()),
            isbn: Some("9783161484100".to_string()),
            publication_year: Some(1967),
            author_id: Some(author_id),
            genre: Some("Novela".to_string()),
        }
    }

    #[tokio::test]
    async fn create_enriches_the_result_with_the_author() {
        let (books, authors) = services();
        let author = seeded_author(&authors).await;

        let created = books.create(soledad(author.id)).await.unwrap();

        assert!(created.book.id > 0);
        assert_eq!(created.book.title, "Cien años de soledad");
        assert_eq!(
            created.author.as_ref().map(|a| a.name.as_str()),
            Some("Gabriel García Márquez")
        );
    }

    #[tokio::test]
    async fn create_fails_referential_integrity_and_persists_nothing() {
        let (books, _authors) = services();

        let result = books.create(soledad(42)).await;

        assert!(matches!(result, Err(AppError::ReferentialIntegrity(_))));
        assert!(books.get_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn out_of_range_year_fails_validation_before_the_author_lookup() {
        let (books, authors) = services();
        let author = seeded_author(&authors).await;
        let request = CreateBookRequest {
            publication_year: Some(3000),
            ..soledad(author.id)
        };

        let result = books.create(request).await;

        // A validation error, not referential-integrity: the year check
        // runs before any author lookup
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn create_rejects_short_genre() {
        let (books, authors) = services();
        let author = seeded_author(&authors).await;
        let request = CreateBookRequest {
            genre: Some("N".to_string()),
            ..soledad(author.id)
        };

        assert!(matches!(
            books.create(request).await,
            Err(AppError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn create_rejects_missing_isbn() {
        let (books, authors) = services();
        let author = seeded_author(&authors).await;
        let request = CreateBookRequest {
            isbn: None,
            ..soledad(author.id)
        };

        assert!(matches!(
            books.create(request).await,
            Err(AppError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn get_by_id_rejects_non_positive_ids_before_storage() {
        let (books, _authors) = services();

        assert!(matches!(
            books.get_by_id(0).await,
            Err(AppError::InvalidArgument(_))
        ));
    }

    #[tokio::test]
    async fn get_by_id_returns_none_for_missing_book() {
        let (books, _authors) = services();

        assert_eq!(books.get_by_id(7).await.unwrap(), None);
    }

    #[tokio::test]
    async fn dangling_author_reference_enriches_with_null() {
        let (books, authors) = services();
        let author = seeded_author(&authors).await;
        let created = books.create(soledad(author.id)).await.unwrap();

        // Delete the author out-of-band, leaving the book dangling
        authors.delete(author.id).await.unwrap();

        let fetched = books.get_by_id(created.book.id).await.unwrap().unwrap();

        assert_eq!(fetched.book, created.book);
        assert_eq!(fetched.author, None);
    }

    #[tokio::test]
    async fn get_all_returns_bare_books_ordered_by_title() {
        let (books, authors) = services();
        let author = seeded_author(&authors).await;
        books.create(soledad(author.id)).await.unwrap();
        books
            .create(CreateBookRequest {
                title: Some("El coronel no tiene quien le escriba".to_string()),
                isbn: Some("9780060733308".to_string()),
                publication_year: Some(1961),
                author_id: Some(author.id),
                genre: Some("Novela corta".to_string()),
            })
            .await
            .unwrap();

        let all = books.get_all().await.unwrap();

        assert_eq!(all.len(), 2);
        assert_eq!(all[0].title, "Cien años de soledad");
        assert_eq!(all[1].title, "El coronel no tiene quien le escriba");
    }

    #[tokio::test]
    async fn get_by_author_enriches_every_book() {
        let (books, authors) = services();
        let author = seeded_author(&authors).await;
        books.create(soledad(author.id)).await.unwrap();

        let by_author = books.get_by_author(author.id).await.unwrap();

        assert_eq!(by_author.len(), 1);
        assert_eq!(by_author[0].author.as_ref().unwrap().id, author.id);
    }

    #[tokio::test]
    async fn get_by_author_fails_for_missing_author() {
        let (books, _authors) = services();

        assert!(matches!(
            books.get_by_author(42).await,
            Err(AppError::ReferentialIntegrity(_))
        ));
    }

    #[tokio::test]
    async fn update_fails_not_found_for_missing_book() {
        let (books, authors) = services();
        let author = seeded_author(&authors).await;

        let result = books.update(42, soledad(author.id)).await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn update_revalidates_the_referenced_author() {
        let (books, authors) = services();
        let author = seeded_author(&authors).await;
        let created = books.create(soledad(author.id)).await.unwrap();

        let result = books
            .update(
                created.book.id,
                CreateBookRequest {
                    author_id: Some(99),
                    ..soledad(author.id)
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::ReferentialIntegrity(_))));
    }

    #[tokio::test]
    async fn update_persists_and_enriches() {
        let (books, authors) = services();
        let author = seeded_author(&authors).await;
        let created = books.create(soledad(author.id)).await.unwrap();

        let updated = books
            .update(
                created.book.id,
                CreateBookRequest {
                    publication_year: Some(1970),
                    ..soledad(author.id)
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.book.id, created.book.id);
        assert_eq!(updated.book.publication_year, Some(1970));
        assert!(updated.author.is_some());
    }

    #[tokio::test]
    async fn delete_is_true_then_false_for_the_same_id() {
        let (books, authors) = services();
        let author = seeded_author(&authors).await;
        let created = books.create(soledad(author.id)).await.unwrap();

        assert!(books.delete(created.book.id).await.unwrap());
        assert!(!books.delete(created.book.id).await.unwrap());
    }
}
