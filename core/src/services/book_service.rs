// bookstore_core/src/services/book_service.rs

//! Catalog management: CRUD over books, stock adjustment, and population
//! from an external catalog source.

use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::Decimal;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::models::book::NewBook;
use crate::models::Book;
use crate::store::BookstoreStore;

/// Upstream catalog APIs cap page sizes; mirror that here so a populate call
/// never asks a source for more than it can return.
const MAX_POPULATE_RESULTS: usize = 40;

/// Asynchronous producer of catalog drafts (the book-ingestion collaborator).
#[async_trait]
pub trait CatalogSource: Send + Sync {
  async fn fetch_books(&self, query: &str, max_results: usize) -> Result<Vec<NewBook>>;
}

pub struct BookService {
  store: Arc<dyn BookstoreStore>,
}

impl BookService {
  pub fn new(store: Arc<dyn BookstoreStore>) -> Self {
    Self { store }
  }

  fn validate_draft(draft: &NewBook) -> Result<()> {
    if draft.title.trim().is_empty() || draft.author.trim().is_empty() {
      return Err(AppError::Validation("Title and author are required.".to_string()));
    }
    if draft.price < Decimal::ZERO {
      return Err(AppError::Validation("Price must not be negative.".to_string()));
    }
    if draft.price.scale() > 2 {
      return Err(AppError::Validation(
        "Price must have at most 2 decimal places.".to_string(),
      ));
    }
    if draft.stock_quantity < 0 {
      return Err(AppError::Validation("Stock quantity must not be negative.".to_string()));
    }
    Ok(())
  }

  pub async fn list_books(&self) -> Result<Vec<Book>> {
    Ok(self.store.list_books().await?)
  }

  pub async fn get_book(&self, id: Uuid) -> Result<Book> {
    self
      .store
      .get_book(id)
      .await?
      .ok_or_else(|| AppError::NotFound(format!("Book with ID {} not found.", id)))
  }

  #[instrument(name = "book_service::add_book", skip(self, draft), err(Display))]
  pub async fn add_book(&self, draft: NewBook) -> Result<Book> {
    Self::validate_draft(&draft)?;
    let mut book = Book::from_draft(draft);
    book.price = book.price.round_dp(2);
    Ok(self.store.insert_book(book).await?)
  }

  /// Replaces every updatable field of the book with the draft's values.
  #[instrument(name = "book_service::update_book", skip(self, draft), err(Display))]
  pub async fn update_book(&self, id: Uuid, draft: NewBook) -> Result<Book> {
    Self::validate_draft(&draft)?;
    let mut existing = self.get_book(id).await?;
    existing.title = draft.title;
    existing.author = draft.author;
    existing.description = draft.description;
    existing.price = draft.price.round_dp(2);
    existing.stock_quantity = draft.stock_quantity;
    existing.image_url = draft.image_url;
    existing.updated_at = chrono::Utc::now();
    if !self.store.update_book(existing.clone()).await? {
      return Err(AppError::NotFound(format!("Book with ID {} not found.", id)));
    }
    Ok(existing)
  }

  #[instrument(name = "book_service::delete_book", skip(self), err(Display))]
  pub async fn delete_book(&self, id: Uuid) -> Result<()> {
    if !self.store.delete_book(id).await? {
      return Err(AppError::NotFound(format!("Book with ID {} not found.", id)));
    }
    Ok(())
  }

  /// Applies a signed stock delta, rejecting adjustments that would push the
  /// stock below zero.
  #[instrument(name = "book_service::adjust_stock", skip(self), err(Display))]
  pub async fn adjust_stock(&self, id: Uuid, delta: i32) -> Result<Book> {
    let mut book = self.get_book(id).await?;
    let new_quantity = book.stock_quantity + delta;
    if new_quantity < 0 {
      return Err(AppError::Validation(format!("Not enough stock for book ID: {}", id)));
    }
    book.stock_quantity = new_quantity;
    book.updated_at = chrono::Utc::now();
    if !self.store.update_book(book.clone()).await? {
      return Err(AppError::NotFound(format!("Book with ID {} not found.", id)));
    }
    Ok(book)
  }

  pub async fn count_books(&self) -> Result<u64> {
    Ok(self.store.count_books().await?)
  }

  /// Fetches drafts from the catalog source and saves them all. Invalid
  /// drafts fail the whole call; nothing is partially discarded silently.
  #[instrument(name = "book_service::populate", skip(self, source), err(Display))]
  pub async fn populate(&self, source: &dyn CatalogSource, query: &str, max_results: usize) -> Result<usize> {
    let max_results = if max_results > MAX_POPULATE_RESULTS {
      warn!(
        requested = max_results,
        "Catalog source maxResults limit is {}. Adjusted.", MAX_POPULATE_RESULTS
      );
      MAX_POPULATE_RESULTS
    } else {
      max_results
    };

    info!(query, max_results, "Populating catalog from source.");
    let drafts = source.fetch_books(query, max_results).await?;
    if drafts.is_empty() {
      warn!(query, "No books fetched from catalog source.");
      return Ok(0);
    }

    let mut saved = 0;
    for draft in drafts {
      self.add_book(draft).await?;
      saved += 1;
    }
    info!(saved, "Catalog population finished.");
    Ok(saved)
  }
}
