// bookstore_core/src/models/order_item.rs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One line of an order. Price and quantity are snapshots taken at commit
/// time; later catalog changes never alter them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
  pub id: Uuid,
  pub order_id: Uuid,
  pub book_id: Uuid,
  pub quantity: i32,
  pub price_at_purchase: Decimal,
}
