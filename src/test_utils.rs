//! In-memory repository fakes for service tests.
//!
//! These implement the same traits as the Postgres repositories but store
//! rows in a mutex-guarded Vec, so service behavior can be tested without a
//! live database. Clones share the underlying storage, mirroring how pool
//! handles share one pool.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::error::AppError;
use crate::models::author::{Author, NewAuthor};
use crate::models::book::{Book, NewBook};
use crate::repositories::{BookRepository, Repository};

#[derive(Debug, Clone, Default)]
pub struct InMemoryAuthorRepository {
    state: Arc<Mutex<Table<Author>>>,
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryBookRepository {
    state: Arc<Mutex<Table<Book>>>,
}

/// Shared shape of a fake table: rows plus the next id to assign.
#[derive(Debug)]
struct Table<T> {
    rows: Vec<T>,
    next_id: i32,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            next_id: 1,
        }
    }
}

impl<T> Table<T> {
    fn assign_id(&mut self) -> i32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

#[async_trait]
impl Repository for InMemoryAuthorRepository {
    type Entity = Author;
    type New = NewAuthor;

    async fn get_by_id(&self, id: i32) -> Result<Option<Author>, AppError> {
        let state = self.state.lock().unwrap();
        Ok(state.rows.iter().find(|a| a.id == id).cloned())
    }

    async fn get_all(&self) -> Result<Vec<Author>, AppError> {
        let state = self.state.lock().unwrap();
        let mut authors = state.rows.clone();
        authors.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(authors)
    }

    async fn add(&self, new: NewAuthor) -> Result<Author, AppError> {
        let mut state = self.state.lock().unwrap();
        let author = Author {
            id: state.assign_id(),
            name: new.name,
            nationality: new.nationality,
            birth_date: new.birth_date,
        };
        state.rows.push(author.clone());
        Ok(author)
    }

    async fn update(&self, entity: Author) -> Result<Author, AppError> {
        let mut state = self.state.lock().unwrap();
        let row = state
            .rows
            .iter_mut()
            .find(|a| a.id == entity.id)
            .ok_or_else(|| {
                AppError::NotFound(format!("author with id {} not found", entity.id))
            })?;
        *row = entity.clone();
        Ok(entity)
    }

    async fn delete(&self, id: i32) -> Result<bool, AppError> {
        let mut state = self.state.lock().unwrap();
        let before = state.rows.len();
        state.rows.retain(|a| a.id != id);
        Ok(state.rows.len() < before)
    }
}

#[async_trait]
impl Repository for InMemoryBookRepository {
    type Entity = Book;
    type New = NewBook;

    async fn get_by_id(&self, id: i32) -> Result<Option<Book>, AppError> {
        let state = self.state.lock().unwrap();
        Ok(state.rows.iter().find(|b| b.id == id).cloned())
    }

    async fn get_all(&self) -> Result<Vec<Book>, AppError> {
        let state = self.state.lock().unwrap();
        let mut books = state.rows.clone();
        books.sort_by(|a, b| a.title.cmp(&b.title));
        Ok(books)
    }

    async fn add(&self, new: NewBook) -> Result<Book, AppError> {
        let mut state = self.state.lock().unwrap();
        let id = state.assign_id();
        let book = new.with_id(id);
        state.rows.push(book.clone());
        Ok(book)
    }

    async fn update(&self, entity: Book) -> Result<Book, AppError> {
        let mut state = self.state.lock().unwrap();
        let row = state
            .rows
            .iter_mut()
            .find(|b| b.id == entity.id)
            .ok_or_else(|| AppError::NotFound(format!("book with id {} not found", entity.id)))?;
        *row = entity.clone();
        Ok(entity)
    }

    async fn delete(&self, id: i32) -> Result<bool, AppError> {
        let mut state = self.state.lock().unwrap();
        let before = state.rows.len();
        state.rows.retain(|b| b.id != id);
        Ok(state.rows.len() < before)
    }
}

#[async_trait]
impl BookRepository for InMemoryBookRepository {
    async fn get_books_by_author(&self, author_id: i32) -> Result<Vec<Book>, AppError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .rows
            .iter()
            .filter(|b| b.author_id == author_id)
            .cloned()
            .collect())
    }
}
