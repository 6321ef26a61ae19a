// tests/cart_tests.rs
mod common;

use common::*;

use bookstore::{AppError, BookstoreStore, CartService};

#[tokio::test]
async fn add_to_cart_twice_merges_into_single_row() {
  let store = test_store();
  let user = seed_user(&store, "alice").await;
  let book = seed_book(&store, "The Rust Book", "10.00", 5).await;
  let cart = CartService::new(store.clone());

  cart.add_to_cart(&user, book.id, 2).await.unwrap();
  cart.add_to_cart(&user, book.id, 3).await.unwrap();

  let lines = cart.list_cart(&user).await.unwrap();
  assert_eq!(lines.len(), 1, "re-adding the same book must merge, not duplicate");
  assert_eq!(lines[0].item.quantity, 5);
  assert_eq!(lines[0].book.id, book.id);
}

#[tokio::test]
async fn add_to_cart_rejects_non_positive_quantity() {
  let store = test_store();
  let user = seed_user(&store, "alice").await;
  let book = seed_book(&store, "The Rust Book", "10.00", 5).await;
  let cart = CartService::new(store.clone());

  for bad in [0, -1] {
    let err = cart.add_to_cart(&user, book.id, bad).await.unwrap_err();
    assert!(matches!(&err, AppError::Validation(_)), "got {:?}", err);
  }
  assert!(cart.list_cart(&user).await.unwrap().is_empty(), "no side effects on rejection");
}

#[tokio::test]
async fn add_to_cart_fails_for_unknown_book() {
  let store = test_store();
  let user = seed_user(&store, "alice").await;
  let cart = CartService::new(store.clone());

  let err = cart.add_to_cart(&user, random_id(), 1).await.unwrap_err();
  assert!(matches!(&err, AppError::NotFound(_)), "got {:?}", err);
}

#[tokio::test]
async fn update_quantity_overwrites_stored_value() {
  let store = test_store();
  let user = seed_user(&store, "alice").await;
  let book = seed_book(&store, "The Rust Book", "10.00", 5).await;
  let cart = CartService::new(store.clone());

  cart.add_to_cart(&user, book.id, 2).await.unwrap();
  cart.update_quantity(&user, book.id, 7).await.unwrap();

  let lines = cart.list_cart(&user).await.unwrap();
  assert_eq!(lines[0].item.quantity, 7);
}

#[tokio::test]
async fn update_quantity_to_zero_removes_the_item() {
  let store = test_store();
  let user = seed_user(&store, "alice").await;
  let book = seed_book(&store, "The Rust Book", "10.00", 5).await;
  let cart = CartService::new(store.clone());

  cart.add_to_cart(&user, book.id, 2).await.unwrap();
  cart.update_quantity(&user, book.id, 0).await.unwrap();

  assert!(cart.list_cart(&user).await.unwrap().is_empty());
}

#[tokio::test]
async fn update_quantity_fails_when_no_row_exists() {
  let store = test_store();
  let user = seed_user(&store, "alice").await;
  let book = seed_book(&store, "The Rust Book", "10.00", 5).await;
  let cart = CartService::new(store.clone());

  let err = cart.update_quantity(&user, book.id, 3).await.unwrap_err();
  assert!(matches!(&err, AppError::NotFound(_)), "got {:?}", err);

  // The zero-quantity path reports a missing row the same way.
  let err = cart.update_quantity(&user, book.id, 0).await.unwrap_err();
  assert!(matches!(&err, AppError::NotFound(_)), "got {:?}", err);
}

#[tokio::test]
async fn remove_item_enforces_ownership() {
  let store = test_store();
  let alice = seed_user(&store, "alice").await;
  let bob = seed_user(&store, "bob").await;
  let book = seed_book(&store, "The Rust Book", "10.00", 5).await;
  let cart = CartService::new(store.clone());

  let alice_item = cart.add_to_cart(&alice, book.id, 1).await.unwrap();

  // Bob must not be able to remove Alice's row, and the failure must look
  // exactly like a missing row.
  let err = cart.remove_item(&bob, alice_item.id).await.unwrap_err();
  assert!(matches!(&err, AppError::NotFound(_)), "got {:?}", err);
  assert_eq!(cart.list_cart(&alice).await.unwrap().len(), 1, "Alice's row untouched");

  cart.remove_item(&alice, alice_item.id).await.unwrap();
  assert!(cart.list_cart(&alice).await.unwrap().is_empty());
}

#[tokio::test]
async fn clear_cart_is_idempotent() {
  let store = test_store();
  let user = seed_user(&store, "alice").await;
  let book = seed_book(&store, "The Rust Book", "10.00", 5).await;
  let cart = CartService::new(store.clone());

  cart.clear_cart(&user).await.unwrap(); // empty cart, still succeeds

  cart.add_to_cart(&user, book.id, 2).await.unwrap();
  cart.clear_cart(&user).await.unwrap();
  cart.clear_cart(&user).await.unwrap();

  assert!(cart.list_cart(&user).await.unwrap().is_empty());
}

#[tokio::test]
async fn list_cart_resolves_books_and_flags_dangling_rows() {
  let store = test_store();
  let user = seed_user(&store, "alice").await;
  let book = seed_book(&store, "The Rust Book", "10.00", 5).await;
  let cart = CartService::new(store.clone());

  cart.add_to_cart(&user, book.id, 2).await.unwrap();
  let lines = cart.list_cart(&user).await.unwrap();
  assert_eq!(lines[0].book.title, "The Rust Book");
  assert_eq!(lines[0].subtotal(), money("20.00"));

  // Delete the book out from under the cart row.
  store.delete_book(book.id).await.unwrap();
  let err = cart.list_cart(&user).await.unwrap_err();
  assert!(matches!(&err, AppError::DataInconsistency(_)), "got {:?}", err);
}
