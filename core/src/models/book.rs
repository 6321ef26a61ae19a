// bookstore_core/src/models/book.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One catalog entry. Read-only from the cart/order workflow's viewpoint;
/// only the catalog service mutates these rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Book {
  pub id: Uuid,
  pub title: String,
  pub author: String,
  pub description: Option<String>,
  /// Non-negative, normalized to 2 decimal places.
  pub price: Decimal,
  /// Stock on hand. Non-negative. Not decremented by order placement.
  pub stock_quantity: i32,
  pub image_url: Option<String>,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

/// Catalog draft produced by an ingestion source, before an id is assigned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewBook {
  pub title: String,
  pub author: String,
  pub description: Option<String>,
  pub price: Decimal,
  pub stock_quantity: i32,
  pub image_url: Option<String>,
}

impl Book {
  pub fn from_draft(draft: NewBook) -> Self {
    let now = Utc::now();
    Self {
      id: Uuid::new_v4(),
      title: draft.title,
      author: draft.author,
      description: draft.description,
      price: draft.price,
      stock_quantity: draft.stock_quantity,
      image_url: draft.image_url,
      created_at: now,
      updated_at: now,
    }
  }
}
