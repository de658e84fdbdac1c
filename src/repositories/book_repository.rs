//! Postgres-backed book repository.

use async_trait::async_trait;

use crate::db::DbPool;
use crate::error::AppError;
use crate::models::book::{Book, NewBook};
use crate::repositories::{Repository, acquire, begin, db_error};

/// Book persistence contract: the uniform CRUD operations plus the one
/// relationship query books need.
#[async_trait]
pub trait BookRepository: Repository<Entity = Book, New = NewBook> {
    /// Fetch every book whose `autor_id` matches. Read-only, so no commit
    /// is involved.
    async fn get_books_by_author(&self, author_id: i32) -> Result<Vec<Book>, AppError>;
}

/// CRUD operations for books against the `libros` table.
///
/// Referential integrity of `autor_id` is NOT re-checked here; the service
/// layer verifies the author exists before dependent writes.
#[derive(Debug, Clone)]
pub struct PgBookRepository {
    pool: DbPool,
}

impl PgBookRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository for PgBookRepository {
    type Entity = Book;
    type New = NewBook;

    async fn get_by_id(&self, id: i32) -> Result<Option<Book>, AppError> {
        const OP: &str = "get book by id";

        let mut conn = acquire(&self.pool, OP).await?;

        sqlx::query_as::<_, Book>(
            "SELECT id, titulo, isbn, anio_publicacion, autor_id FROM libros WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(db_error(OP))
    }

    async fn get_all(&self) -> Result<Vec<Book>, AppError> {
        const OP: &str = "get all books";

        let mut conn = acquire(&self.pool, OP).await?;

        sqlx::query_as::<_, Book>(
            "SELECT id, titulo, isbn, anio_publicacion, autor_id FROM libros ORDER BY titulo",
        )
        .fetch_all(&mut *conn)
        .await
        .map_err(db_error(OP))
    }

    async fn add(&self, new: NewBook) -> Result<Book, AppError> {
        const OP: &str = "create book";

        let mut tx = begin(&self.pool, OP).await?;

        let book = sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO libros (titulo, isbn, anio_publicacion, autor_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, titulo, isbn, anio_publicacion, autor_id
            "#,
        )
        .bind(new.title())
        .bind(new.isbn())
        .bind(new.publication_year())
        .bind(new.author_id())
        .fetch_one(&mut *tx)
        .await
        .map_err(db_error(OP))?;

        tx.commit().await.map_err(db_error(OP))?;

        Ok(book)
    }

    async fn update(&self, entity: Book) -> Result<Book, AppError> {
        const OP: &str = "update book";

        let mut tx = begin(&self.pool, OP).await?;

        let updated = sqlx::query_as::<_, Book>(
            r#"
            UPDATE libros
            SET titulo = $1, isbn = $2, anio_publicacion = $3, autor_id = $4
            WHERE id = $5
            RETURNING id, titulo, isbn, anio_publicacion, autor_id
            "#,
        )
        .bind(&entity.title)
        .bind(&entity.isbn)
        .bind(entity.publication_year)
        .bind(entity.author_id)
        .bind(entity.id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(db_error(OP))?;

        let Some(updated) = updated else {
            tx.rollback().await.map_err(db_error(OP))?;
            return Err(AppError::NotFound(format!(
                "book with id {} not found",
                entity.id
            )));
        };

        tx.commit().await.map_err(db_error(OP))?;

        Ok(updated)
    }

    async fn delete(&self, id: i32) -> Result<bool, AppError> {
        const OP: &str = "delete book";

        let mut tx = begin(&self.pool, OP).await?;

        let deleted = sqlx::query("DELETE FROM libros WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(db_error(OP))?
            .rows_affected();

        tx.commit().await.map_err(db_error(OP))?;

        Ok(deleted > 0)
    }
}

#[async_trait]
impl BookRepository for PgBookRepository {
    async fn get_books_by_author(&self, author_id: i32) -> Result<Vec<Book>, AppError> {
        const OP: &str = "get books by author";

        let mut conn = acquire(&self.pool, OP).await?;

        sqlx::query_as::<_, Book>(
            "SELECT id, titulo, isbn, anio_publicacion, autor_id FROM libros WHERE autor_id = $1",
        )
        .bind(author_id)
        .fetch_all(&mut *conn)
        .await
        .map_err(db_error(OP))
    }
}
