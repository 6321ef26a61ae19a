// tests/order_tests.rs
mod common;

use common::*;

use bookstore::models::book::NewBook;
use bookstore::{AppError, BookService, BookstoreStore, CartService, OrderService, OrderStatus};

#[tokio::test]
async fn place_order_prices_lines_and_clears_cart() {
  let store = test_store();
  let user = seed_user(&store, "alice").await;
  let book_a = seed_book(&store, "Book A", "10.00", 5).await;
  let book_b = seed_book(&store, "Book B", "5.50", 5).await;
  let cart = CartService::new(store.clone());
  let orders = OrderService::new(store.clone());

  cart.add_to_cart(&user, book_a.id, 2).await.unwrap();
  cart.add_to_cart(&user, book_b.id, 1).await.unwrap();

  let order = orders.place_order("alice").await.unwrap();

  assert_eq!(order.status, OrderStatus::Pending);
  assert_eq!(order.total_amount, money("25.50"));
  assert_eq!(order.items.len(), 2);
  for item in &order.items {
    assert_eq!(item.order_id, order.id);
    if item.book_id == book_a.id {
      assert_eq!(item.quantity, 2);
      assert_eq!(item.price_at_purchase, money("10.00"));
    } else {
      assert_eq!(item.book_id, book_b.id);
      assert_eq!(item.quantity, 1);
      assert_eq!(item.price_at_purchase, money("5.50"));
    }
  }

  assert!(cart.list_cart(&user).await.unwrap().is_empty(), "cart must be empty after commit");

  // The persisted order matches what was returned.
  let fetched = orders.get_order("alice", order.id).await.unwrap();
  assert_eq!(fetched.total_amount, order.total_amount);
  assert_eq!(fetched.items.len(), 2);
}

#[tokio::test]
async fn place_order_on_empty_cart_fails_without_side_effects() {
  let store = test_store();
  seed_user(&store, "alice").await;
  let orders = OrderService::new(store.clone());

  let err = orders.place_order("alice").await.unwrap_err();
  assert!(matches!(&err, AppError::EmptyCart), "got {:?}", err);
  assert!(!err.is_retryable(), "domain precondition failures are not retryable");

  assert!(orders.list_orders("alice").await.unwrap().is_empty(), "no order created");
}

#[tokio::test]
async fn place_order_fails_for_unknown_user() {
  let store = test_store();
  let orders = OrderService::new(store.clone());

  let err = orders.place_order("nobody").await.unwrap_err();
  assert!(matches!(&err, AppError::NotFound(_)), "got {:?}", err);
}

#[tokio::test]
async fn order_items_keep_snapshot_price_after_catalog_change() {
  let store = test_store();
  let user = seed_user(&store, "alice").await;
  let book = seed_book(&store, "Book A", "10.00", 5).await;
  let cart = CartService::new(store.clone());
  let orders = OrderService::new(store.clone());
  let books = BookService::new(store.clone());

  cart.add_to_cart(&user, book.id, 2).await.unwrap();
  let order = orders.place_order("alice").await.unwrap();

  // Reprice the book after the order is committed.
  books
    .update_book(
      book.id,
      NewBook {
        title: book.title.clone(),
        author: book.author.clone(),
        description: None,
        price: money("99.99"),
        stock_quantity: book.stock_quantity,
        image_url: None,
      },
    )
    .await
    .unwrap();

  let fetched = orders.get_order("alice", order.id).await.unwrap();
  assert_eq!(fetched.items[0].price_at_purchase, money("10.00"));
  assert_eq!(fetched.total_amount, money("20.00"));
}

#[tokio::test]
async fn dangling_book_reference_aborts_the_whole_commitment() {
  let store = test_store();
  let user = seed_user(&store, "alice").await;
  let book_a = seed_book(&store, "Book A", "10.00", 5).await;
  let book_b = seed_book(&store, "Book B", "5.50", 5).await;
  let cart = CartService::new(store.clone());
  let orders = OrderService::new(store.clone());

  cart.add_to_cart(&user, book_a.id, 1).await.unwrap();
  cart.add_to_cart(&user, book_b.id, 1).await.unwrap();

  // Corrupt one cart row by deleting its book.
  store.delete_book(book_b.id).await.unwrap();

  let err = orders.place_order("alice").await.unwrap_err();
  assert!(matches!(&err, AppError::DataInconsistency(_)), "got {:?}", err);

  // Nothing committed: no order, and both cart rows still present.
  assert!(orders.list_orders("alice").await.unwrap().is_empty());
  assert_eq!(store.cart_items(user.id).await.unwrap().len(), 2);
}

#[tokio::test]
async fn get_order_hides_other_users_orders() {
  let store = test_store();
  let alice = seed_user(&store, "alice").await;
  seed_user(&store, "bob").await;
  let book = seed_book(&store, "Book A", "10.00", 5).await;
  let cart = CartService::new(store.clone());
  let orders = OrderService::new(store.clone());

  cart.add_to_cart(&alice, book.id, 1).await.unwrap();
  let alice_order = orders.place_order("alice").await.unwrap();

  let foreign = orders.get_order("bob", alice_order.id).await.unwrap_err();
  let missing = orders.get_order("bob", random_id()).await.unwrap_err();

  // Ownership mismatch and true absence must be indistinguishable.
  match (&foreign, &missing) {
    (AppError::NotFound(_), AppError::NotFound(_)) => {}
    other => panic!("expected two NotFound errors, got {:?}", other),
  }
}

#[tokio::test]
async fn list_orders_is_scoped_to_the_requesting_user() {
  let store = test_store();
  let alice = seed_user(&store, "alice").await;
  let bob = seed_user(&store, "bob").await;
  let book = seed_book(&store, "Book A", "10.00", 5).await;
  let cart = CartService::new(store.clone());
  let orders = OrderService::new(store.clone());

  cart.add_to_cart(&alice, book.id, 1).await.unwrap();
  orders.place_order("alice").await.unwrap();
  cart.add_to_cart(&bob, book.id, 2).await.unwrap();
  orders.place_order("bob").await.unwrap();

  let alice_orders = orders.list_orders("alice").await.unwrap();
  assert_eq!(alice_orders.len(), 1);
  assert_eq!(alice_orders[0].user_id, alice.id);

  let bob_orders = orders.list_orders("bob").await.unwrap();
  assert_eq!(bob_orders.len(), 1);
  assert_eq!(bob_orders[0].user_id, bob.id);
}

#[tokio::test]
async fn stock_is_not_decremented_by_order_placement() {
  let store = test_store();
  let user = seed_user(&store, "alice").await;
  let book = seed_book(&store, "Book A", "10.00", 7).await;
  let cart = CartService::new(store.clone());
  let orders = OrderService::new(store.clone());

  cart.add_to_cart(&user, book.id, 3).await.unwrap();
  orders.place_order("alice").await.unwrap();

  let after = store.get_book(book.id).await.unwrap().unwrap();
  assert_eq!(after.stock_quantity, 7);
}
