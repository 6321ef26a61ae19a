// bookstore_core/src/store/mod.rs

//! The persistence seam: a transactional row store reachable by primary key
//! and by owner, plus the snapshot/commit primitive the order commitment
//! workflow builds on.
//!
//! Isolation model: every user's cart carries a version counter. Each cart
//! mutation is a single atomic read-modify-write that bumps the counter.
//! `snapshot_cart` captures the rows together with the counter, and
//! `commit_order` re-checks the counter before writing anything — a mismatch
//! surfaces as the retryable [`StoreError::Conflict`]. Dropping a snapshot
//! without committing is the rollback path; no intermediate state is ever
//! observable.

pub mod memory;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{Book, CartItem, Order, User};

pub use memory::InMemoryStore;

#[derive(Debug, Error)]
pub enum StoreError {
  /// The user's cart changed between `snapshot_cart` and `commit_order`.
  /// Transient: the whole calling operation may be retried from the top.
  #[error("Cart for user {user_id} was modified concurrently (expected version {expected}, found {found})")]
  Conflict { user_id: Uuid, expected: u64, found: u64 },

  /// A uniqueness constraint was violated (e.g. username or email).
  #[error("Duplicate value for unique field '{field}'")]
  Duplicate { field: &'static str },

  #[error("Store unavailable: {0}")]
  Unavailable(String),
}

impl StoreError {
  pub fn is_retryable(&self) -> bool {
    matches!(self, StoreError::Conflict { .. })
  }
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// A consistent view of one user's cart rows, pinned to the cart version it
/// was taken at. Feed it to [`BookstoreStore::commit_order`] to commit, or
/// drop it to roll back.
#[derive(Debug, Clone)]
pub struct CartSnapshot {
  pub user_id: Uuid,
  pub version: u64,
  pub items: Vec<CartItem>,
}

impl CartSnapshot {
  pub fn is_empty(&self) -> bool {
    self.items.is_empty()
  }
}

#[async_trait]
pub trait BookstoreStore: Send + Sync {
  // --- users ---

  /// Inserts a user, enforcing username/email uniqueness.
  async fn insert_user(&self, user: User) -> StoreResult<User>;
  async fn find_user_by_username(&self, username: &str) -> StoreResult<Option<User>>;
  async fn find_user_by_id(&self, id: Uuid) -> StoreResult<Option<User>>;

  // --- catalog ---

  async fn insert_book(&self, book: Book) -> StoreResult<Book>;
  /// Overwrites the row with the same id. Returns false if it does not exist.
  async fn update_book(&self, book: Book) -> StoreResult<bool>;
  async fn get_book(&self, id: Uuid) -> StoreResult<Option<Book>>;
  async fn list_books(&self) -> StoreResult<Vec<Book>>;
  async fn delete_book(&self, id: Uuid) -> StoreResult<bool>;
  async fn count_books(&self) -> StoreResult<u64>;

  // --- cart (each call is one atomic read-modify-write) ---

  /// Upsert-merge: if a row for (user, book) exists its quantity is
  /// incremented by `quantity`, otherwise a new row is created.
  async fn add_to_cart(&self, user_id: Uuid, book_id: Uuid, quantity: i32) -> StoreResult<CartItem>;

  /// Overwrites the stored quantity. Returns None if no row exists for the
  /// (user, book) pair.
  async fn set_cart_quantity(&self, user_id: Uuid, book_id: Uuid, quantity: i32) -> StoreResult<Option<CartItem>>;

  /// Deletes by cart item id, filtered by owner. Returns false when the row
  /// is absent or belongs to a different user (indistinguishable).
  async fn remove_cart_item(&self, user_id: Uuid, cart_item_id: Uuid) -> StoreResult<bool>;

  /// Deletes the row for the (user, book) pair, if any.
  async fn remove_cart_item_for_book(&self, user_id: Uuid, book_id: Uuid) -> StoreResult<bool>;

  /// Deletes all of the user's cart rows. Idempotent.
  async fn clear_cart(&self, user_id: Uuid) -> StoreResult<()>;

  async fn cart_items(&self, user_id: Uuid) -> StoreResult<Vec<CartItem>>;

  // --- commitment ---

  /// Captures the user's cart rows with their current version.
  async fn snapshot_cart(&self, user_id: Uuid) -> StoreResult<CartSnapshot>;

  /// Atomically persists `order` with all its items and clears the user's
  /// cart, provided the cart version still matches `snapshot`. On mismatch
  /// nothing is written and [`StoreError::Conflict`] is returned.
  async fn commit_order(&self, order: Order, snapshot: &CartSnapshot) -> StoreResult<Order>;

  // --- orders ---

  async fn orders_for_user(&self, user_id: Uuid) -> StoreResult<Vec<Order>>;

  /// Owner-filtered lookup: the query itself filters by `user_id`, so a
  /// foreign order is reported exactly like a missing one.
  async fn find_order_for_user(&self, user_id: Uuid, order_id: Uuid) -> StoreResult<Option<Order>>;
}
