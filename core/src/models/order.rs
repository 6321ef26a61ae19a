// bookstore_core/src/models/order.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::order_item::OrderItem;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderStatus {
  Pending,
  Completed,
  Cancelled,
  Shipped,
}

/// Immutable commercial record. Created only by the order commitment workflow
/// and always with status `Pending`; later status progression is handled by
/// external collaborators.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
  pub id: Uuid,
  pub user_id: Uuid,
  pub status: OrderStatus,
  /// Exact sum of `price_at_purchase * quantity` over `items`, computed once
  /// at creation and never recomputed.
  pub total_amount: Decimal,
  pub created_at: DateTime<Utc>,
  /// Owned line items; persisted and deleted only together with the order.
  pub items: Vec<OrderItem>,
}

impl Order {
  /// Starts an empty pending order for `user_id`. Lines are attached with
  /// [`Order::add_item`] before the order is handed to the store.
  pub fn pending(user_id: Uuid) -> Self {
    Self {
      id: Uuid::new_v4(),
      user_id,
      status: OrderStatus::Pending,
      total_amount: Decimal::ZERO,
      created_at: Utc::now(),
      items: Vec::new(),
    }
  }

  /// Attaches a line item, establishing the owning back-reference.
  pub fn add_item(&mut self, book_id: Uuid, quantity: i32, price_at_purchase: Decimal) {
    self.items.push(OrderItem {
      id: Uuid::new_v4(),
      order_id: self.id,
      book_id,
      quantity,
      price_at_purchase,
    });
  }
}
