// bookstore_core/src/services/catalog_mock.rs

//! Deterministic mock catalog source for development and tests, standing in
//! for an external books API. Defaults mirror the real ingestion path: books
//! without sale data are priced 19.99 with 10 copies on hand.

use async_trait::async_trait;
use rust_decimal::Decimal;
use tracing::info;

use crate::error::Result;
use crate::models::book::NewBook;
use crate::services::book_service::CatalogSource;

pub struct MockCatalogSource;

#[async_trait]
impl CatalogSource for MockCatalogSource {
  async fn fetch_books(&self, query: &str, max_results: usize) -> Result<Vec<NewBook>> {
    info!(query, max_results, "Mock catalog source producing drafts.");
    let default_price = Decimal::new(1999, 2); // 19.99
    let drafts = (0..max_results)
      .map(|n| NewBook {
        title: format!("{} vol. {}", query, n + 1),
        author: format!("Author {}", n + 1),
        description: Some("No description available.".to_string()),
        price: default_price,
        stock_quantity: 10,
        image_url: None,
      })
      .collect();
    Ok(drafts)
  }
}
