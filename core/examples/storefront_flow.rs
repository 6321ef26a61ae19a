// bookstore_core/examples/storefront_flow.rs

use std::sync::Arc;

use bookstore::{
  bootstrap, AppConfig, AppError, Authenticator, BookService, CartService, InMemoryStore, MockCatalogSource,
  OrderService, SessionAuthenticator,
};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), AppError> {
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();

  info!("--- Storefront Flow Example ---");

  // Injected configuration; defaults stand in for env vars here.
  let config = AppConfig::default();
  let store = Arc::new(InMemoryStore::new());
  let auth = SessionAuthenticator::new(store.clone());
  let source = MockCatalogSource;

  // Seed default accounts and an initial catalog.
  bootstrap::initialize(&config, store.clone(), &auth, &source).await?;

  let books = BookService::new(store.clone());
  let cart = CartService::new(store.clone());
  let orders = OrderService::new(store.clone());

  // Sign in as the seeded demo user.
  let token = auth.login(&config.demo_username, &config.demo_password).await?;
  let user = auth.authenticate(&token).await?;
  info!(username = %user.username, "Signed in.");

  // Browse the catalog and add the two cheapest titles.
  let mut catalog = books.list_books().await?;
  catalog.sort_by(|a, b| a.price.cmp(&b.price).then_with(|| a.title.cmp(&b.title)));
  let first = &catalog[0];
  let second = &catalog[1];
  cart.add_to_cart(&user, first.id, 2).await?;
  cart.add_to_cart(&user, second.id, 1).await?;

  for line in cart.list_cart(&user).await? {
    info!(title = %line.book.title, qty = line.item.quantity, subtotal = %line.subtotal(), "In cart");
  }

  // Commit the cart into an order.
  let order = orders.place_order(&user.username).await?;
  info!(order_id = %order.id, total = %order.total_amount, status = ?order.status, "Order placed.");

  let after = cart.list_cart(&user).await?;
  info!(remaining_lines = after.len(), "Cart after checkout.");

  auth.logout(&token);
  Ok(())
}
