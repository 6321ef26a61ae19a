// tests/common/mod.rs
#![allow(dead_code)] // Allow unused helpers in this common test module

use std::sync::Arc;

use bookstore::models::book::NewBook;
use bookstore::{Book, InMemoryStore, Role, User};
use once_cell::sync::Lazy;
use rust_decimal::Decimal;
use uuid::Uuid;

static TRACING: Lazy<()> = Lazy::new(|| {
  let _ = tracing_subscriber::fmt()
    .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
    .with_test_writer()
    .try_init();
});

pub fn setup_tracing() {
  Lazy::force(&TRACING);
}

pub fn test_store() -> Arc<InMemoryStore> {
  setup_tracing();
  Arc::new(InMemoryStore::new())
}

pub fn money(s: &str) -> Decimal {
  s.parse().expect("valid decimal literal")
}

/// Inserts a user directly, bypassing password hashing (tests that exercise
/// real credentials go through SessionAuthenticator instead).
pub async fn seed_user(store: &Arc<InMemoryStore>, username: &str) -> User {
  use bookstore::BookstoreStore;
  let user = User::new(
    username,
    format!("{}@example.com", username),
    "unused-hash",
    Role::User,
  );
  store.insert_user(user).await.expect("seed user")
}

pub async fn seed_book(store: &Arc<InMemoryStore>, title: &str, price: &str, stock: i32) -> Book {
  use bookstore::BookstoreStore;
  let book = Book::from_draft(NewBook {
    title: title.to_string(),
    author: "Test Author".to_string(),
    description: None,
    price: money(price),
    stock_quantity: stock,
    image_url: None,
  });
  store.insert_book(book).await.expect("seed book")
}

pub fn random_id() -> Uuid {
  Uuid::new_v4()
}
