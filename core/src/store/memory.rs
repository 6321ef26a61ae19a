// bookstore_core/src/store/memory.rs

//! Thread-safe in-memory implementation of [`BookstoreStore`], useful for
//! tests, examples, and development scenarios where persistence is not
//! required. All operations take the single inner lock for their full
//! duration, which gives every trait method its required atomicity.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;
use uuid::Uuid;

use crate::models::{Book, CartItem, Order, User};
use crate::store::{BookstoreStore, CartSnapshot, StoreError, StoreResult};

#[derive(Default)]
struct StoreInner {
  users: HashMap<Uuid, User>,
  books: HashMap<Uuid, Book>,
  // user_id -> book_id -> row; at most one row per (user, book) pair
  carts: HashMap<Uuid, HashMap<Uuid, CartItem>>,
  // user_id -> cart version, bumped on every cart mutation
  cart_versions: HashMap<Uuid, u64>,
  orders: HashMap<Uuid, Order>,
}

impl StoreInner {
  fn cart_version(&self, user_id: Uuid) -> u64 {
    self.cart_versions.get(&user_id).copied().unwrap_or(0)
  }

  fn bump_cart_version(&mut self, user_id: Uuid) {
    *self.cart_versions.entry(user_id).or_insert(0) += 1;
  }
}

#[derive(Clone, Default)]
pub struct InMemoryStore {
  inner: Arc<RwLock<StoreInner>>,
}

impl InMemoryStore {
  pub fn new() -> Self {
    Self::default()
  }
}

#[async_trait]
impl BookstoreStore for InMemoryStore {
  async fn insert_user(&self, user: User) -> StoreResult<User> {
    let mut inner = self.inner.write();
    if inner.users.values().any(|u| u.username == user.username) {
      return Err(StoreError::Duplicate { field: "username" });
    }
    if inner.users.values().any(|u| u.email == user.email) {
      return Err(StoreError::Duplicate { field: "email" });
    }
    inner.users.insert(user.id, user.clone());
    Ok(user)
  }

  async fn find_user_by_username(&self, username: &str) -> StoreResult<Option<User>> {
    let inner = self.inner.read();
    Ok(inner.users.values().find(|u| u.username == username).cloned())
  }

  async fn find_user_by_id(&self, id: Uuid) -> StoreResult<Option<User>> {
    Ok(self.inner.read().users.get(&id).cloned())
  }

  async fn insert_book(&self, book: Book) -> StoreResult<Book> {
    self.inner.write().books.insert(book.id, book.clone());
    Ok(book)
  }

  async fn update_book(&self, book: Book) -> StoreResult<bool> {
    let mut inner = self.inner.write();
    if !inner.books.contains_key(&book.id) {
      return Ok(false);
    }
    inner.books.insert(book.id, book);
    Ok(true)
  }

  async fn get_book(&self, id: Uuid) -> StoreResult<Option<Book>> {
    Ok(self.inner.read().books.get(&id).cloned())
  }

  async fn list_books(&self) -> StoreResult<Vec<Book>> {
    Ok(self.inner.read().books.values().cloned().collect())
  }

  async fn delete_book(&self, id: Uuid) -> StoreResult<bool> {
    // Deliberately leaves cart rows referencing the book untouched; cleanup
    // is the caller's concern, and the order workflow treats such rows as a
    // data inconsistency.
    Ok(self.inner.write().books.remove(&id).is_some())
  }

  async fn count_books(&self) -> StoreResult<u64> {
    Ok(self.inner.read().books.len() as u64)
  }

  async fn add_to_cart(&self, user_id: Uuid, book_id: Uuid, quantity: i32) -> StoreResult<CartItem> {
    let mut inner = self.inner.write();
    let cart = inner.carts.entry(user_id).or_default();
    let item = match cart.get_mut(&book_id) {
      Some(existing) => {
        existing.quantity += quantity;
        existing.clone()
      }
      None => {
        let item = CartItem::new(user_id, book_id, quantity);
        cart.insert(book_id, item.clone());
        item
      }
    };
    inner.bump_cart_version(user_id);
    Ok(item)
  }

  async fn set_cart_quantity(&self, user_id: Uuid, book_id: Uuid, quantity: i32) -> StoreResult<Option<CartItem>> {
    let mut inner = self.inner.write();
    let Some(existing) = inner.carts.get_mut(&user_id).and_then(|cart| cart.get_mut(&book_id)) else {
      return Ok(None);
    };
    existing.quantity = quantity;
    let item = existing.clone();
    inner.bump_cart_version(user_id);
    Ok(Some(item))
  }

  async fn remove_cart_item(&self, user_id: Uuid, cart_item_id: Uuid) -> StoreResult<bool> {
    let mut inner = self.inner.write();
    let Some(cart) = inner.carts.get_mut(&user_id) else {
      return Ok(false);
    };
    // Lookup filters by owner: a foreign row is never visible here.
    let Some(book_id) = cart.values().find(|item| item.id == cart_item_id).map(|item| item.book_id) else {
      return Ok(false);
    };
    cart.remove(&book_id);
    inner.bump_cart_version(user_id);
    Ok(true)
  }

  async fn remove_cart_item_for_book(&self, user_id: Uuid, book_id: Uuid) -> StoreResult<bool> {
    let mut inner = self.inner.write();
    let removed = inner
      .carts
      .get_mut(&user_id)
      .is_some_and(|cart| cart.remove(&book_id).is_some());
    if removed {
      inner.bump_cart_version(user_id);
    }
    Ok(removed)
  }

  async fn clear_cart(&self, user_id: Uuid) -> StoreResult<()> {
    let mut inner = self.inner.write();
    let had_rows = inner.carts.get(&user_id).is_some_and(|cart| !cart.is_empty());
    inner.carts.remove(&user_id);
    if had_rows {
      inner.bump_cart_version(user_id);
    }
    Ok(())
  }

  async fn cart_items(&self, user_id: Uuid) -> StoreResult<Vec<CartItem>> {
    let inner = self.inner.read();
    Ok(
      inner
        .carts
        .get(&user_id)
        .map(|cart| cart.values().cloned().collect())
        .unwrap_or_default(),
    )
  }

  async fn snapshot_cart(&self, user_id: Uuid) -> StoreResult<CartSnapshot> {
    let inner = self.inner.read();
    Ok(CartSnapshot {
      user_id,
      version: inner.cart_version(user_id),
      items: inner
        .carts
        .get(&user_id)
        .map(|cart| cart.values().cloned().collect())
        .unwrap_or_default(),
    })
  }

  async fn commit_order(&self, order: Order, snapshot: &CartSnapshot) -> StoreResult<Order> {
    let mut inner = self.inner.write();

    // Verify the expected version before any write, so a conflicting commit
    // leaves no partial state behind.
    let current = inner.cart_version(snapshot.user_id);
    if current != snapshot.version {
      return Err(StoreError::Conflict {
        user_id: snapshot.user_id,
        expected: snapshot.version,
        found: current,
      });
    }

    inner.orders.insert(order.id, order.clone());
    inner.carts.remove(&snapshot.user_id);
    inner.bump_cart_version(snapshot.user_id);
    Ok(order)
  }

  async fn orders_for_user(&self, user_id: Uuid) -> StoreResult<Vec<Order>> {
    let inner = self.inner.read();
    let mut orders: Vec<Order> = inner.orders.values().filter(|o| o.user_id == user_id).cloned().collect();
    orders.sort_by_key(|o| o.created_at);
    Ok(orders)
  }

  async fn find_order_for_user(&self, user_id: Uuid, order_id: Uuid) -> StoreResult<Option<Order>> {
    let inner = self.inner.read();
    Ok(
      inner
        .orders
        .get(&order_id)
        .filter(|o| o.user_id == user_id)
        .cloned(),
    )
  }
}
