// bookstore_core/src/services/cart_service.rs

//! The cart manager: add/update/remove/clear/list over the user's cart rows.
//! Every operation takes a resolved principal supplied by the authenticator
//! collaborator; quantity and existence invariants are enforced here.

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::models::{Book, CartItem, User};
use crate::store::BookstoreStore;

/// One cart row resolved with its book, as returned by [`CartService::list_cart`].
#[derive(Debug, Clone, Serialize)]
pub struct CartLine {
  pub item: CartItem,
  pub book: Book,
}

impl CartLine {
  pub fn subtotal(&self) -> rust_decimal::Decimal {
    self.book.price * rust_decimal::Decimal::from(self.item.quantity)
  }
}

pub struct CartService {
  store: Arc<dyn BookstoreStore>,
}

impl CartService {
  pub fn new(store: Arc<dyn BookstoreStore>) -> Self {
    Self { store }
  }

  /// Adds `quantity` of a book to the user's cart. If a row for (user, book)
  /// already exists the quantities are merged, never duplicated.
  ///
  /// Note: no stock-availability check against `Book.stock_quantity` is
  /// performed here, preserving the source system's behavior.
  #[instrument(name = "cart_service::add_to_cart", skip(self, user), fields(user_id = %user.id), err(Display))]
  pub async fn add_to_cart(&self, user: &User, book_id: Uuid, quantity: i32) -> Result<CartItem> {
    if quantity <= 0 {
      warn!(quantity, "Rejected add-to-cart with non-positive quantity.");
      return Err(AppError::Validation("Quantity must be a positive number.".to_string()));
    }

    if self.store.get_book(book_id).await?.is_none() {
      return Err(AppError::NotFound(format!("Book with ID {} not found.", book_id)));
    }

    let item = self.store.add_to_cart(user.id, book_id, quantity).await?;
    info!(book_id = %book_id, quantity = item.quantity, "Cart item added or merged.");
    Ok(item)
  }

  /// Overwrites the stored quantity for the (user, book) row. A new quantity
  /// of zero or less removes the row, equivalent to [`CartService::remove_item`].
  #[instrument(name = "cart_service::update_quantity", skip(self, user), fields(user_id = %user.id), err(Display))]
  pub async fn update_quantity(&self, user: &User, book_id: Uuid, new_quantity: i32) -> Result<()> {
    if new_quantity <= 0 {
      let removed = self.store.remove_cart_item_for_book(user.id, book_id).await?;
      if !removed {
        return Err(AppError::NotFound(format!("No cart item for book {}.", book_id)));
      }
      info!(book_id = %book_id, "Cart item removed via zero-quantity update.");
      return Ok(());
    }

    match self.store.set_cart_quantity(user.id, book_id, new_quantity).await? {
      Some(_) => Ok(()),
      None => Err(AppError::NotFound(format!("No cart item for book {}.", book_id))),
    }
  }

  /// Removes one cart row by id. Rows belonging to other users are reported
  /// exactly like missing rows.
  #[instrument(name = "cart_service::remove_item", skip(self, user), fields(user_id = %user.id), err(Display))]
  pub async fn remove_item(&self, user: &User, cart_item_id: Uuid) -> Result<()> {
    let removed = self.store.remove_cart_item(user.id, cart_item_id).await?;
    if !removed {
      return Err(AppError::NotFound(format!("Cart item {} not found.", cart_item_id)));
    }
    Ok(())
  }

  /// Deletes all of the user's cart rows. Clearing an empty cart succeeds.
  #[instrument(name = "cart_service::clear_cart", skip(self, user), fields(user_id = %user.id), err(Display))]
  pub async fn clear_cart(&self, user: &User) -> Result<()> {
    self.store.clear_cart(user.id).await?;
    Ok(())
  }

  /// Returns the user's cart rows, each resolved with its book. Order is not
  /// guaranteed. A row referencing a deleted book is a data inconsistency.
  #[instrument(name = "cart_service::list_cart", skip(self, user), fields(user_id = %user.id), err(Display))]
  pub async fn list_cart(&self, user: &User) -> Result<Vec<CartLine>> {
    let items = self.store.cart_items(user.id).await?;
    let mut lines = Vec::with_capacity(items.len());
    for item in items {
      let book = self.store.get_book(item.book_id).await?.ok_or_else(|| {
        AppError::DataInconsistency(format!("Book not found for cart item ID: {}.", item.id))
      })?;
      lines.push(CartLine { item, book });
    }
    Ok(lines)
  }
}
