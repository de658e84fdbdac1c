//! Postgres-backed author repository.

use async_trait::async_trait;

use crate::db::DbPool;
use crate::error::AppError;
use crate::models::author::{Author, NewAuthor};
use crate::repositories::{Repository, acquire, begin, db_error};

/// CRUD operations for authors against the `autores` table.
///
/// Holds a handle to the shared connection pool, injected at construction
/// time; borrows a connection per operation and never retains one between
/// calls.
#[derive(Debug, Clone)]
pub struct PgAuthorRepository {
    pool: DbPool,
}

impl PgAuthorRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository for PgAuthorRepository {
    type Entity = Author;
    type New = NewAuthor;

    async fn get_by_id(&self, id: i32) -> Result<Option<Author>, AppError> {
        const OP: &str = "get author by id";

        let mut conn = acquire(&self.pool, OP).await?;

        sqlx::query_as::<_, Author>(
            "SELECT id, nombre, nacionalidad, fecha_nacimiento FROM autores WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(db_error(OP))
    }

    async fn get_all(&self) -> Result<Vec<Author>, AppError> {
        const OP: &str = "get all authors";

        let mut conn = acquire(&self.pool, OP).await?;

        sqlx::query_as::<_, Author>(
            "SELECT id, nombre, nacionalidad, fecha_nacimiento FROM autores ORDER BY nombre",
        )
        .fetch_all(&mut *conn)
        .await
        .map_err(db_error(OP))
    }

    async fn add(&self, new: NewAuthor) -> Result<Author, AppError> {
        const OP: &str = "create author";

        let mut tx = begin(&self.pool, OP).await?;

        // RETURNING avoids a second round trip for the assigned id
        let author = sqlx::query_as::<_, Author>(
            r#"
            INSERT INTO autores (nombre, nacionalidad, fecha_nacimiento)
            VALUES ($1, $2, $3)
            RETURNING id, nombre, nacionalidad, fecha_nacimiento
            "#,
        )
        .bind(&new.name)
        .bind(&new.nationality)
        .bind(new.birth_date)
        .fetch_one(&mut *tx)
        .await
        .map_err(db_error(OP))?;

        tx.commit().await.map_err(db_error(OP))?;

        Ok(author)
    }

    async fn update(&self, entity: Author) -> Result<Author, AppError> {
        const OP: &str = "update author";

        let mut tx = begin(&self.pool, OP).await?;

        let updated = sqlx::query_as::<_, Author>(
            r#"
            UPDATE autores
            SET nombre = $1, nacionalidad = $2, fecha_nacimiento = $3
            WHERE id = $4
            RETURNING id, nombre, nacionalidad, fecha_nacimiento
            "#,
        )
        .bind(&entity.name)
        .bind(&entity.nationality)
        .bind(entity.birth_date)
        .bind(entity.id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(db_error(OP))?;

        let Some(updated) = updated else {
            tx.rollback().await.map_err(db_error(OP))?;
            return Err(AppError::NotFound(format!(
                "author with id {} not found",
                entity.id
            )));
        };

        tx.commit().await.map_err(db_error(OP))?;

        Ok(updated)
    }

    async fn delete(&self, id: i32) -> Result<bool, AppError> {
        const OP: &str = "delete author";

        let mut tx = begin(&self.pool, OP).await?;

        let deleted = sqlx::query("DELETE FROM autores WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(db_error(OP))?
            .rows_affected();

        tx.commit().await.map_err(db_error(OP))?;

        Ok(deleted > 0)
    }
}
