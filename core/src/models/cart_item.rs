// bookstore_core/src/models/cart_item.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One (user, book) association. The store guarantees at most one row per
/// pair; re-adding the same book merges quantities instead of duplicating.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartItem {
  pub id: Uuid,
  pub user_id: Uuid,
  pub book_id: Uuid,
  /// Always positive; a quantity update to zero deletes the row instead.
  pub quantity: i32,
  pub added_at: DateTime<Utc>,
}

impl CartItem {
  pub fn new(user_id: Uuid, book_id: Uuid, quantity: i32) -> Self {
    Self {
      id: Uuid::new_v4(),
      user_id,
      book_id,
      quantity,
      added_at: Utc::now(),
    }
  }
}
