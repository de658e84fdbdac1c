//! Seed utility - populates the database with a sample author and book.
//!
//! Applies the schema, inserts one author and one of their books through
//! the repository layer, then lists that author's books. Useful for
//! smoke-testing a fresh database:
//!
//! ```text
//! cargo run --bin seed
//! ```

use chrono::NaiveDate;
use tracing_subscriber::EnvFilter;

use library_api::models::author::NewAuthor;
use library_api::models::book::NewBook;
use library_api::repositories::{
    BookRepository, PgAuthorRepository, PgBookRepository, Repository,
};
use library_api::{AppError, Config, db};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = Config::from_env().map_err(|err| AppError::Config(err.to_string()))?;
    let pool = db::create_pool(&config).await?;

    // Make sure the tables exist before touching them
    sqlx::raw_sql(include_str!("../../schema.sql"))
        .execute(&pool)
        .await?;
    tracing::info!("Schema applied");

    let authors = PgAuthorRepository::new(pool.clone());
    let books = PgBookRepository::new(pool.clone());

    let author = authors
        .add(NewAuthor {
            name: "Gabriel García Márquez".to_string(),
            nationality: Some("Colombiana".to_string()),
            birth_date: Some("1927-03-06".parse::<NaiveDate>()?),
        })
        .await?;
    tracing::info!(id = author.id, name = %author.name, "author created");

    let book = books
        .add(NewBook::new(
            "Cien años de soledad",
            "9783161484100",
            Some(1967),
            author.id,
        )?)
        .await?;
    tracing::info!(id = book.id, title = %book.title, "book created");

    let by_author = books.get_books_by_author(author.id).await?;
    tracing::info!(count = by_author.len(), author = %author.name, "books on record");

    db::close_pool(&pool).await;

    Ok(())
}
