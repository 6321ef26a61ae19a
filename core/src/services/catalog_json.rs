// bookstore_core/src/services/catalog_json.rs

//! Catalog source over a books-API JSON payload (the shape returned by the
//! public volumes endpoints: `items[].volumeInfo` / `items[].saleInfo`).
//! Fetching the payload is transport-layer concern; this source only parses
//! an already-retrieved document.

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde_json::Value;
use tracing::info;

use crate::error::{AppError, Result};
use crate::models::book::NewBook;
use crate::services::book_service::CatalogSource;

/// Fallback list price for volumes without sale data.
fn default_price() -> Decimal {
  Decimal::new(1999, 2) // 19.99
}

#[derive(Debug)]
pub struct JsonCatalogSource {
  payload: Value,
}

impl JsonCatalogSource {
  pub fn from_str(payload: &str) -> Result<Self> {
    let payload: Value =
      serde_json::from_str(payload).map_err(|e| AppError::Validation(format!("Invalid catalog payload: {}", e)))?;
    Ok(Self { payload })
  }

  fn parse_volume(item: &Value) -> Option<NewBook> {
    let volume_info = item.get("volumeInfo")?;

    let title = volume_info
      .get("title")
      .and_then(Value::as_str)
      .unwrap_or("Unknown Title")
      .to_string();
    let author = volume_info
      .get("authors")
      .and_then(Value::as_array)
      .and_then(|authors| authors.first())
      .and_then(Value::as_str)
      .unwrap_or("Unknown Author")
      .to_string();
    let description = volume_info
      .get("description")
      .and_then(Value::as_str)
      .map(str::to_string)
      .or_else(|| Some("No description available.".to_string()));
    let image_url = volume_info
      .get("imageLinks")
      .and_then(|links| links.get("thumbnail"))
      .and_then(Value::as_str)
      .map(str::to_string);

    let mut price = default_price();
    if let Some(sale_info) = item.get("saleInfo") {
      if sale_info.get("saleability").and_then(Value::as_str) == Some("FOR_SALE") {
        let amount = sale_info
          .get("listPrice")
          .and_then(|p| p.get("amount"))
          .or_else(|| sale_info.get("retailPrice").and_then(|p| p.get("amount")));
        if let Some(amount) = amount.and_then(Value::as_f64) {
          price = Decimal::try_from(amount).map(|d| d.round_dp(2)).unwrap_or_else(|_| default_price());
        }
      }
    }

    Some(NewBook {
      title,
      author,
      description,
      price,
      stock_quantity: 10,
      image_url,
    })
  }
}

#[async_trait]
impl CatalogSource for JsonCatalogSource {
  async fn fetch_books(&self, query: &str, max_results: usize) -> Result<Vec<NewBook>> {
    let items = match self.payload.get("items").and_then(Value::as_array) {
      Some(items) => items,
      None => return Ok(Vec::new()),
    };

    let books: Vec<NewBook> = items
      .iter()
      .take(max_results)
      .filter_map(Self::parse_volume)
      .collect();
    info!(query, parsed = books.len(), "Parsed catalog drafts from JSON payload.");
    Ok(books)
  }
}
