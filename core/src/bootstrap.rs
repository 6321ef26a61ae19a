// bookstore_core/src/bootstrap.rs

//! Startup data initialization: default accounts and, when the catalog is
//! empty, an initial catalog population from the configured source.

use std::sync::Arc;

use tracing::{error, info, instrument};

use crate::config::AppConfig;
use crate::error::Result;
use crate::models::Role;
use crate::services::{BookService, CatalogSource, SessionAuthenticator};
use crate::store::BookstoreStore;

/// Seeds default admin/demo accounts (if missing) and populates the catalog
/// from `source` when no books exist yet. Safe to call on every startup.
#[instrument(name = "bootstrap::initialize", skip_all, err(Display))]
pub async fn initialize(
  config: &AppConfig,
  store: Arc<dyn BookstoreStore>,
  auth: &SessionAuthenticator,
  source: &dyn CatalogSource,
) -> Result<()> {
  if !config.seed_db {
    info!("SEED_DB disabled; skipping initial data checks.");
    return Ok(());
  }

  info!("Checking store for initial data...");

  if store.find_user_by_username(&config.admin_username).await?.is_none() {
    let email = format!("{}@bookstore.com", config.admin_username);
    auth
      .register(&config.admin_username, &email, &config.admin_password, Role::Admin)
      .await?;
    info!(username = %config.admin_username, "Default admin user created.");
  }

  if store.find_user_by_username(&config.demo_username).await?.is_none() {
    let email = format!("{}@bookstore.com", config.demo_username);
    auth
      .register(&config.demo_username, &email, &config.demo_password, Role::User)
      .await?;
    info!(username = %config.demo_username, "Default regular user created.");
  }

  let books = BookService::new(store);
  if books.count_books().await? == 0 {
    info!("No books found. Populating catalog from source...");
    match books
      .populate(source, &config.catalog_populate_query, config.catalog_populate_limit)
      .await
    {
      Ok(saved) => info!(saved, "Catalog populated successfully."),
      Err(e) => error!(error = %e, "Failed to populate catalog on startup."),
    }
  } else {
    info!("Books already exist. Skipping population.");
  }

  Ok(())
}
