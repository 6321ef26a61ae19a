// bookstore_core/src/services/order_service.rs

//! The order commitment workflow: converts a mutable cart into an immutable,
//! priced order record, atomically, with exact decimal totals and cart
//! teardown.
//!
//! Atomicity: the workflow builds the whole order aggregate off a cart
//! snapshot, then hands it to the store's single `commit_order` write. Either
//! the order (with all its items) is durably created and the cart emptied, or
//! neither happens. A concurrent cart mutation invalidates the snapshot and
//! surfaces as a retryable conflict; the loser of two racing `place_order`
//! calls never double-commits the same cart state.

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::models::Order;
use crate::store::BookstoreStore;

pub struct OrderService {
  store: Arc<dyn BookstoreStore>,
}

impl OrderService {
  pub fn new(store: Arc<dyn BookstoreStore>) -> Self {
    Self { store }
  }

  /// Commits the user's current cart as a new `Pending` order.
  ///
  /// Line items snapshot each book's current unit price and the cart's
  /// quantity; subsequent price changes never retroactively alter the order.
  /// Book stock is not decremented, preserving the source system's behavior.
  #[instrument(name = "order_service::place_order", skip(self), err(Display))]
  pub async fn place_order(&self, username: &str) -> Result<Order> {
    let user = self
      .store
      .find_user_by_username(username)
      .await?
      .ok_or_else(|| AppError::NotFound(format!("User not found: {}", username)))?;

    let snapshot = self.store.snapshot_cart(user.id).await?;
    if snapshot.is_empty() {
      return Err(AppError::EmptyCart);
    }

    let mut order = Order::pending(user.id);
    let mut total = Decimal::ZERO;

    for cart_item in &snapshot.items {
      // A dangling book reference means a corrupted cart row; abort the whole
      // operation rather than committing a partial order.
      let book = self.store.get_book(cart_item.book_id).await?.ok_or_else(|| {
        AppError::DataInconsistency(format!(
          "Book not found for cart item ID: {}. Cart data inconsistency.",
          cart_item.id
        ))
      })?;

      order.add_item(book.id, cart_item.quantity, book.price);
      total += book.price * Decimal::from(cart_item.quantity);
    }
    order.total_amount = total;

    // One atomic write: persist order + items, clear the cart, or neither.
    let saved = self.store.commit_order(order, &snapshot).await?;
    info!(order_id = %saved.id, total = %saved.total_amount, lines = saved.items.len(), "Order placed.");
    Ok(saved)
  }

  /// All orders owned by the user, oldest first.
  #[instrument(name = "order_service::list_orders", skip(self), err(Display))]
  pub async fn list_orders(&self, username: &str) -> Result<Vec<Order>> {
    let user = self
      .store
      .find_user_by_username(username)
      .await?
      .ok_or_else(|| AppError::NotFound(format!("User not found: {}", username)))?;
    Ok(self.store.orders_for_user(user.id).await?)
  }

  /// Owner-scoped lookup. The store query filters by owner, so an order
  /// belonging to someone else is reported exactly like a missing one.
  #[instrument(name = "order_service::get_order", skip(self), err(Display))]
  pub async fn get_order(&self, username: &str, order_id: Uuid) -> Result<Order> {
    let user = self
      .store
      .find_user_by_username(username)
      .await?
      .ok_or_else(|| AppError::NotFound(format!("User not found: {}", username)))?;

    self
      .store
      .find_order_for_user(user.id, order_id)
      .await?
      .ok_or_else(|| {
        AppError::NotFound(format!(
          "Order not found with ID: {} or not belonging to user.",
          order_id
        ))
      })
  }
}
